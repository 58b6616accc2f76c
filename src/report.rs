use std::fmt::Write;

use crate::router::{Survey, SurveyResult};

pub fn summary_line(result: &SurveyResult) -> String {
    match result {
        SurveyResult::Workload(assessment) => format!(
            "Workload score {} ({} burnout)",
            format_score(assessment.workload_score),
            assessment.burnout_level
        ),
        SurveyResult::StudyPressure(assessment) => {
            format!("{}: {}", assessment.level, assessment.message)
        }
        SurveyResult::TimeManagement(assessment) => {
            format!("{}: {}", assessment.level, assessment.message)
        }
        SurveyResult::AcademicPressure(assessment) => {
            format!("{}: {}", assessment.level, assessment.message)
        }
        SurveyResult::Goals(roadmap) => format!(
            "{} academic steps, {} health steps",
            roadmap.academic_plan.len(),
            roadmap.health_plan.len()
        ),
    }
}

pub fn build_report(survey: &Survey, result: &SurveyResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {} Assessment", survey.kind().title());
    let _ = writeln!(output);

    match (survey, result) {
        (Survey::Workload(form), SurveyResult::Workload(assessment)) => {
            let _ = writeln!(
                output,
                "Week: {}",
                form.week.as_deref().unwrap_or("unlabelled")
            );
            let _ = writeln!(output);
            let _ = writeln!(output, "## Inputs");
            let _ = writeln!(output, "- Study hours: {}", format_score(form.study_hours));
            let _ = writeln!(output, "- Sleep hours: {}", format_score(form.sleep_hours));
            let _ = writeln!(output, "- Assignments: {}", format_score(form.assignments));
            let _ = writeln!(output, "- Stress level: {}", format_score(form.stress_level));
            let _ = writeln!(output);
            let _ = writeln!(output, "## Result");
            let _ = writeln!(
                output,
                "- Workload score: {}",
                format_score(assessment.workload_score)
            );
            let _ = writeln!(output, "- Burnout level: {}", assessment.burnout_level);
        }
        (_, SurveyResult::Goals(roadmap)) => {
            let _ = writeln!(output, "## Academic Plan");
            if roadmap.academic_plan.is_empty() {
                let _ = writeln!(output, "No academic goal selected.");
            } else {
                for step in &roadmap.academic_plan {
                    let _ = writeln!(output, "- {step}");
                }
            }

            let _ = writeln!(output);
            let _ = writeln!(output, "## Health Plan");
            if roadmap.health_plan.is_empty() {
                let _ = writeln!(output, "No health goal selected.");
            } else {
                for step in &roadmap.health_plan {
                    let _ = writeln!(output, "- {step}");
                }
            }

            if !roadmap.weekly_rule.is_empty() {
                let _ = writeln!(output);
                let _ = writeln!(output, "## Weekly Rule");
                let _ = writeln!(output, "{}", roadmap.weekly_rule);
            }
        }
        (_, other) => {
            let _ = writeln!(output, "## Result");
            let _ = writeln!(output, "{}", summary_line(other));
        }
    }

    output
}

fn format_score(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormFields, GoalsForm};
    use crate::models::{BurnoutLevel, GoalsRoadmap, WorkloadAssessment};
    use crate::router::SurveyKind;
    use crate::scoring;

    #[test]
    fn workload_report_lists_inputs_and_result() {
        let survey = Survey::from_fields(
            SurveyKind::Workload,
            &FormFields::from_pairs([
                ("study_hours", "10"),
                ("sleep_hours", "2"),
                ("assignments", "5"),
                ("stress_level", "1"),
                ("week", "2026-W07"),
            ]),
        );
        let result = SurveyResult::Workload(WorkloadAssessment {
            workload_score: 33.0,
            burnout_level: BurnoutLevel::Medium,
        });

        let report = build_report(&survey, &result);
        assert!(report.starts_with("# Weekly Workload Assessment"));
        assert!(report.contains("Week: 2026-W07"));
        assert!(report.contains("- Workload score: 33"));
        assert!(report.contains("- Burnout level: MEDIUM"));
    }

    #[test]
    fn missing_numbers_render_as_not_available() {
        let survey = Survey::from_fields(SurveyKind::Workload, &FormFields::default());
        let result = SurveyResult::Workload(scoring::assess_workload(
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
        ));

        let report = build_report(&survey, &result);
        assert!(report.contains("Week: unlabelled"));
        assert!(report.contains("- Workload score: n/a"));
        assert!(report.contains("- Burnout level: LOW"));
    }

    #[test]
    fn empty_roadmap_says_nothing_was_selected() {
        let survey = Survey::Goals(GoalsForm::default());
        let result = SurveyResult::Goals(GoalsRoadmap::default());

        let report = build_report(&survey, &result);
        assert!(report.contains("No academic goal selected."));
        assert!(report.contains("No health goal selected."));
        assert!(!report.contains("## Weekly Rule"));
    }

    #[test]
    fn roadmap_report_includes_weekly_rule() {
        let survey = Survey::Goals(GoalsForm {
            academic: Some("consistency".to_string()),
            health: Some("sleep".to_string()),
        });
        let result = SurveyResult::Goals(scoring::build_roadmap(
            Some("consistency"),
            Some("sleep"),
        ));

        let report = build_report(&survey, &result);
        assert!(report.contains("- Limit tasks to 3 priorities"));
        assert!(report.contains("- Fixed sleep schedule"));
        assert!(report.contains("Weekly progress review every Sunday."));
    }

    #[test]
    fn summaries_pair_level_with_message() {
        let result = SurveyResult::StudyPressure(scoring::assess_study_pressure(2.0));
        assert_eq!(
            summary_line(&result),
            "Moderate: Your workload feels slightly heavy but manageable with structure."
        );
    }
}
