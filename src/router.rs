use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::SubmitError;
use crate::form::{FormFields, GoalsForm, HabitsForm, PressureForm, WorkloadForm};
use crate::models::{
    AcademicPressureLevel, Assessment, GoalsRoadmap, StudyPressureLevel, TimeManagementLevel,
    WorkloadAssessment,
};
use crate::scoring;
use crate::store::WeeklyEntryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyKind {
    Workload,
    StudyPressure,
    TimeHabits,
    AcademicPressure,
    Goals,
}

impl SurveyKind {
    pub fn path(&self) -> &'static str {
        match self {
            SurveyKind::Workload => "/submit",
            SurveyKind::StudyPressure => "/study",
            SurveyKind::TimeHabits => "/time",
            SurveyKind::AcademicPressure => "/pressure",
            SurveyKind::Goals => "/goals",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SurveyKind::Workload => "Weekly Workload",
            SurveyKind::StudyPressure => "Study Pattern",
            SurveyKind::TimeHabits => "Time Management",
            SurveyKind::AcademicPressure => "Academic Pressure",
            SurveyKind::Goals => "Goals & Roadmap",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Survey {
    Workload(WorkloadForm),
    StudyPressure(PressureForm),
    TimeHabits(HabitsForm),
    AcademicPressure(PressureForm),
    Goals(GoalsForm),
}

impl Survey {
    pub fn from_fields(kind: SurveyKind, fields: &FormFields) -> Self {
        match kind {
            SurveyKind::Workload => Survey::Workload(WorkloadForm::from_fields(fields)),
            SurveyKind::StudyPressure => Survey::StudyPressure(PressureForm::from_fields(fields)),
            SurveyKind::TimeHabits => Survey::TimeHabits(HabitsForm::from_fields(fields)),
            SurveyKind::AcademicPressure => {
                Survey::AcademicPressure(PressureForm::from_fields(fields))
            }
            SurveyKind::Goals => Survey::Goals(GoalsForm::from_fields(fields)),
        }
    }

    pub fn kind(&self) -> SurveyKind {
        match self {
            Survey::Workload(_) => SurveyKind::Workload,
            Survey::StudyPressure(_) => SurveyKind::StudyPressure,
            Survey::TimeHabits(_) => SurveyKind::TimeHabits,
            Survey::AcademicPressure(_) => SurveyKind::AcademicPressure,
            Survey::Goals(_) => SurveyKind::Goals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SurveyResult {
    Workload(WorkloadAssessment),
    StudyPressure(Assessment<StudyPressureLevel>),
    TimeManagement(Assessment<TimeManagementLevel>),
    AcademicPressure(Assessment<AcademicPressureLevel>),
    Goals(GoalsRoadmap),
}

/// Dispatches each submitted survey to its scoring rule.
///
/// Only workload submissions touch the store, and only when one is attached.
#[derive(Clone, Default)]
pub struct SurveyRouter {
    store: Option<Arc<dyn WeeklyEntryStore>>,
}

impl SurveyRouter {
    pub fn new(store: Arc<dyn WeeklyEntryStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn without_store() -> Self {
        Self { store: None }
    }

    pub fn persists(&self) -> bool {
        self.store.is_some()
    }

    pub async fn submit(&self, survey: &Survey) -> Result<SurveyResult, SubmitError> {
        let result = match survey {
            Survey::Workload(form) => SurveyResult::Workload(self.submit_workload(form).await?),
            Survey::StudyPressure(form) => SurveyResult::StudyPressure(self.study_pressure(form)),
            Survey::TimeHabits(form) => SurveyResult::TimeManagement(self.time_habits(form)),
            Survey::AcademicPressure(form) => {
                SurveyResult::AcademicPressure(self.academic_pressure(form))
            }
            Survey::Goals(form) => SurveyResult::Goals(self.goals(form)),
        };
        Ok(result)
    }

    /// Scores the week, then waits for the entry to be stored before
    /// returning. A failed write is returned, never swallowed.
    pub async fn submit_workload(
        &self,
        form: &WorkloadForm,
    ) -> Result<WorkloadAssessment, SubmitError> {
        let assessment = scoring::assess_workload(
            form.study_hours,
            form.sleep_hours,
            form.assignments,
            form.stress_level,
        );

        if let Some(store) = &self.store {
            if let Err(e) = store.append_weekly_entry(&form.to_entry()).await {
                warn!("Failed to store weekly entry: {e}");
                return Err(e.into());
            }
        }

        info!(
            score = assessment.workload_score,
            level = %assessment.burnout_level,
            "workload assessed"
        );
        Ok(assessment)
    }

    pub fn study_pressure(&self, form: &PressureForm) -> Assessment<StudyPressureLevel> {
        let assessment = scoring::assess_study_pressure(form.pressure);
        info!(level = %assessment.level, "study pressure assessed");
        assessment
    }

    pub fn time_habits(&self, form: &HabitsForm) -> Assessment<TimeManagementLevel> {
        let assessment = scoring::assess_time_management(form.habits.as_slice());
        info!(
            habits = form.habits.len(),
            level = %assessment.level,
            "time management assessed"
        );
        assessment
    }

    pub fn academic_pressure(&self, form: &PressureForm) -> Assessment<AcademicPressureLevel> {
        let assessment = scoring::assess_academic_pressure(form.pressure);
        info!(level = %assessment.level, "academic pressure assessed");
        assessment
    }

    pub fn goals(&self, form: &GoalsForm) -> GoalsRoadmap {
        let roadmap = scoring::build_roadmap(form.academic.as_deref(), form.health.as_deref());
        info!(
            academic = form.academic.as_deref().unwrap_or(""),
            health = form.health.as_deref().unwrap_or(""),
            "roadmap built"
        );
        roadmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::{BurnoutLevel, DEFAULT_USER_ID};
    use crate::store::testing::{FailingStore, MemoryStore};

    fn workload_fields() -> FormFields {
        FormFields::from_pairs([
            ("study_hours", "10"),
            ("sleep_hours", "2"),
            ("assignments", "5"),
            ("stress_level", "1"),
            ("week", "2026-W07"),
        ])
    }

    #[tokio::test]
    async fn workload_is_scored_and_stored_once() {
        let store = Arc::new(MemoryStore::default());
        let router = SurveyRouter::new(store.clone());

        let survey = Survey::from_fields(SurveyKind::Workload, &workload_fields());
        let result = router.submit(&survey).await.unwrap();

        assert_eq!(
            result,
            SurveyResult::Workload(WorkloadAssessment {
                workload_score: 33.0,
                burnout_level: BurnoutLevel::Medium,
            })
        );

        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, DEFAULT_USER_ID);
        assert_eq!(entries[0].study_hours, 10.0);
        assert_eq!(entries[0].week.as_deref(), Some("2026-W07"));
    }

    #[tokio::test]
    async fn duplicate_weeks_are_all_kept() {
        let store = Arc::new(MemoryStore::default());
        let router = SurveyRouter::new(store.clone());
        let survey = Survey::from_fields(SurveyKind::Workload, &workload_fields());

        router.submit(&survey).await.unwrap();
        router.submit(&survey).await.unwrap();

        assert_eq!(store.entries().len(), 2);
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let router = SurveyRouter::new(Arc::new(FailingStore));
        let survey = Survey::from_fields(SurveyKind::Workload, &workload_fields());

        let err = router.submit(&survey).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Persist(StoreError::Database(sqlx::Error::PoolTimedOut))
        ));
    }

    #[tokio::test]
    async fn dry_run_skips_persistence() {
        let router = SurveyRouter::without_store();
        assert!(!router.persists());

        let survey = Survey::from_fields(SurveyKind::Workload, &workload_fields());
        assert!(router.submit(&survey).await.is_ok());
    }

    #[tokio::test]
    async fn other_surveys_never_touch_the_store() {
        let router = SurveyRouter::new(Arc::new(FailingStore));

        let study = Survey::from_fields(
            SurveyKind::StudyPressure,
            &FormFields::from_pairs([("pressure", "3")]),
        );
        match router.submit(&study).await.unwrap() {
            SurveyResult::StudyPressure(assessment) => {
                assert_eq!(assessment.level, StudyPressureLevel::High)
            }
            other => panic!("unexpected result {other:?}"),
        }

        let habits = Survey::from_fields(
            SurveyKind::TimeHabits,
            &FormFields::from_pairs([("habits", "a"), ("habits", "b"), ("habits", "c")]),
        );
        match router.submit(&habits).await.unwrap() {
            SurveyResult::TimeManagement(assessment) => {
                assert_eq!(assessment.level, TimeManagementLevel::Unstable)
            }
            other => panic!("unexpected result {other:?}"),
        }

        let pressure = Survey::from_fields(
            SurveyKind::AcademicPressure,
            &FormFields::from_pairs([("pressure", "70")]),
        );
        match router.submit(&pressure).await.unwrap() {
            SurveyResult::AcademicPressure(assessment) => {
                assert_eq!(assessment.level, AcademicPressureLevel::High)
            }
            other => panic!("unexpected result {other:?}"),
        }

        let goals = Survey::from_fields(
            SurveyKind::Goals,
            &FormFields::from_pairs([("academic", "unknown")]),
        );
        assert_eq!(
            router.submit(&goals).await.unwrap(),
            SurveyResult::Goals(GoalsRoadmap::default())
        );
    }

    #[test]
    fn kinds_round_trip_through_surveys() {
        let fields = FormFields::default();
        for kind in [
            SurveyKind::Workload,
            SurveyKind::StudyPressure,
            SurveyKind::TimeHabits,
            SurveyKind::AcademicPressure,
            SurveyKind::Goals,
        ] {
            assert_eq!(Survey::from_fields(kind, &fields).kind(), kind);
        }
    }
}
