use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::form::{FormFields, WorkloadForm};
use crate::models::WorkloadAssessment;
use crate::router::SurveyRouter;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    study_hours: Option<String>,
    sleep_hours: Option<String>,
    assignments: Option<String>,
    stress_level: Option<String>,
    week: Option<String>,
}

impl CsvRow {
    fn into_fields(self) -> FormFields {
        let pairs = [
            ("study_hours", self.study_hours),
            ("sleep_hours", self.sleep_hours),
            ("assignments", self.assignments),
            ("stress_level", self.stress_level),
            ("week", self.week),
        ];

        FormFields::from_pairs(
            pairs
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value))),
        )
    }
}

/// Submits every CSV row as a workload survey, stopping at the first
/// row that cannot be read or stored.
pub async fn import_csv(
    router: &SurveyRouter,
    csv_path: &Path,
) -> anyhow::Result<Vec<WorkloadAssessment>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    import_reader(router, file).await
}

async fn import_reader<R: Read>(
    router: &SurveyRouter,
    reader: R,
) -> anyhow::Result<Vec<WorkloadAssessment>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut assessments = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("invalid CSV row {}", index + 1))?;
        let form = WorkloadForm::from_fields(&row.into_fields());
        let assessment = router
            .submit_workload(&form)
            .await
            .with_context(|| format!("row {} was not saved", index + 1))?;
        assessments.push(assessment);
    }

    info!(rows = assessments.len(), "CSV import finished");
    Ok(assessments)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::BurnoutLevel;
    use crate::store::testing::{FailingStore, MemoryStore};

    const SAMPLE: &str = "study_hours,sleep_hours,assignments,stress_level,week\n\
        10,2,5,1,2026-W06\n\
        1,4,0,5,2026-W07\n\
        ,,,,\n";

    #[tokio::test]
    async fn every_row_is_scored_and_stored() {
        let store = Arc::new(MemoryStore::default());
        let router = SurveyRouter::new(store.clone());

        let assessments = import_reader(&router, SAMPLE.as_bytes()).await.unwrap();

        assert_eq!(assessments.len(), 3);
        assert_eq!(assessments[0].burnout_level, BurnoutLevel::Medium);
        assert_eq!(assessments[1].burnout_level, BurnoutLevel::High);
        assert_eq!(assessments[2].burnout_level, BurnoutLevel::Low);

        let entries = store.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].week.as_deref(), Some("2026-W07"));
        assert!(entries[2].study_hours.is_nan());
        assert_eq!(entries[2].week, None);
    }

    #[tokio::test]
    async fn store_failure_aborts_the_import() {
        let router = SurveyRouter::new(Arc::new(FailingStore));
        let result = import_reader(&router, SAMPLE.as_bytes()).await;
        assert!(result.is_err());
    }
}
