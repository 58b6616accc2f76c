use crate::models::{
    AcademicGoal, AcademicPressureLevel, Assessment, BurnoutLevel, GoalsRoadmap, HealthGoal,
    StudyPressureLevel, TimeManagementLevel, WorkloadAssessment,
};

const HIGH_STRESS_LEVEL: f64 = 4.0;
const MIN_RESTED_SLEEP_HOURS: f64 = 6.0;
const MEDIUM_WORKLOAD_SCORE: f64 = 20.0;

pub fn workload_score(study_hours: f64, assignments: f64, sleep_hours: f64) -> f64 {
    study_hours * 2.0 + assignments * 3.0 - sleep_hours
}

/// Comparisons against NaN are false, so unparseable inputs drift toward `Low`.
pub fn assess_workload(
    study_hours: f64,
    sleep_hours: f64,
    assignments: f64,
    stress_level: f64,
) -> WorkloadAssessment {
    let score = workload_score(study_hours, assignments, sleep_hours);

    let burnout_level = if stress_level >= HIGH_STRESS_LEVEL && sleep_hours < MIN_RESTED_SLEEP_HOURS
    {
        BurnoutLevel::High
    } else if score > MEDIUM_WORKLOAD_SCORE {
        BurnoutLevel::Medium
    } else {
        BurnoutLevel::Low
    };

    WorkloadAssessment {
        workload_score: score,
        burnout_level,
    }
}

pub fn assess_study_pressure(pressure: f64) -> Assessment<StudyPressureLevel> {
    let (level, message) = if pressure == 2.0 {
        (
            StudyPressureLevel::Moderate,
            "Your workload feels slightly heavy but manageable with structure.",
        )
    } else if pressure == 3.0 {
        (
            StudyPressureLevel::High,
            "You often feel overwhelmed by studies.",
        )
    } else if pressure == 4.0 {
        (
            StudyPressureLevel::VeryHigh,
            "Your workload feels mentally exhausting.",
        )
    } else {
        (
            StudyPressureLevel::Low,
            "Your academic workload feels manageable and balanced.",
        )
    };

    Assessment { level, message }
}

pub fn assess_time_management<S: AsRef<str>>(habits: &[S]) -> Assessment<TimeManagementLevel> {
    let score = habits.len();

    let mut assessment = Assessment {
        level: TimeManagementLevel::Good,
        message: "You manage your time fairly well.",
    };

    // Both thresholds apply in turn; four or more habits end on Chaotic.
    if score >= 3 {
        assessment = Assessment {
            level: TimeManagementLevel::Unstable,
            message: "Your time management lacks structure.",
        };
    }
    if score >= 4 {
        assessment = Assessment {
            level: TimeManagementLevel::Chaotic,
            message: "Poor time structure is affecting productivity.",
        };
    }

    assessment
}

pub fn assess_academic_pressure(value: f64) -> Assessment<AcademicPressureLevel> {
    if value >= 70.0 {
        Assessment {
            level: AcademicPressureLevel::High,
            message: "High academic pressure detected.",
        }
    } else if value >= 40.0 {
        Assessment {
            level: AcademicPressureLevel::Moderate,
            message: "Academic pressure is noticeable.",
        }
    } else {
        Assessment {
            level: AcademicPressureLevel::Low,
            message: "Academic pressure feels manageable.",
        }
    }
}

pub fn academic_plan(goal: AcademicGoal) -> (Vec<&'static str>, &'static str) {
    match goal {
        AcademicGoal::Consistency => (
            vec![
                "Study in fixed daily slots",
                "Limit tasks to 3 priorities",
                "Avoid last-minute cramming",
            ],
            "Weekly progress review every Sunday.",
        ),
        AcademicGoal::Performance => (
            vec![
                "Focus on weak subjects",
                "Use active recall",
                "Practice daily problems",
            ],
            "Weekly self-test.",
        ),
        AcademicGoal::Placements => (
            vec![
                "Daily 1-hour skill prep",
                "Weekly mini-project",
                "Track skill progress",
            ],
            "Improve one employability skill weekly.",
        ),
    }
}

pub fn health_plan(goal: HealthGoal) -> Vec<&'static str> {
    match goal {
        HealthGoal::Sleep => vec![
            "Fixed sleep schedule",
            "No late-night study",
            "Sleep is non-negotiable",
        ],
        HealthGoal::Stress => vec![
            "Break tasks into chunks",
            "Short guilt-free breaks",
            "Stress = overload, not laziness",
        ],
        HealthGoal::Balance => vec![
            "Daily non-study activity",
            "Avoid continuous screen time",
            "Consistency over intensity",
        ],
    }
}

pub fn build_roadmap(academic: Option<&str>, health: Option<&str>) -> GoalsRoadmap {
    let mut roadmap = GoalsRoadmap::default();

    if let Some(goal) = AcademicGoal::from_selector(academic) {
        let (plan, weekly_rule) = academic_plan(goal);
        roadmap.academic_plan = plan;
        roadmap.weekly_rule = weekly_rule;
    }

    if let Some(goal) = HealthGoal::from_selector(health) {
        roadmap.health_plan = health_plan(goal);
    }

    roadmap
}
