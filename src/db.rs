use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::StoreError;
use crate::form::{FormFields, WorkloadForm};
use crate::models::{WeeklySurveyEntry, DEFAULT_USER_ID};
use crate::store::WeeklyEntryStore;

pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config.database_url()?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")
}

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Inserts the default student and a few sample weeks. Safe to run twice.
pub async fn seed(pool: &PgPool) -> anyhow::Result<usize> {
    sqlx::query(
        r#"
        INSERT INTO academic_wellness.users (id, name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(DEFAULT_USER_ID)
    .bind("Avery Lee")
    .bind("avery.lee@example.edu")
    .execute(pool)
    .await?;

    let weeks = [
        ("2026-W05", "18", "7", "3", "2"),
        ("2026-W06", "26", "5", "6", "4"),
        ("2026-W07", "12", "8", "2", "1"),
    ];

    let mut inserted = 0usize;
    for (week, study_hours, sleep_hours, assignments, stress_level) in weeks {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM academic_wellness.weekly_data WHERE user_id = $1 AND week = $2)",
        )
        .bind(DEFAULT_USER_ID)
        .bind(week)
        .fetch_one(pool)
        .await?;

        if exists {
            debug!(week, "seed week already present");
            continue;
        }

        let form = WorkloadForm::from_fields(&FormFields::from_pairs([
            ("study_hours", study_hours),
            ("sleep_hours", sleep_hours),
            ("assignments", assignments),
            ("stress_level", stress_level),
            ("week", week),
        ]));
        insert_weekly_entry(pool, &form.to_entry()).await?;
        inserted += 1;
    }

    Ok(inserted)
}

pub async fn insert_weekly_entry(
    pool: &PgPool,
    entry: &WeeklySurveyEntry,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO academic_wellness.weekly_data
        (id, user_id, study_hours, sleep_hours, assignments, stress_level, week, submitted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(entry.user_id)
    .bind(entry.study_hours)
    .bind(entry.sleep_hours)
    .bind(entry.assignments)
    .bind(entry.stress_level)
    .bind(entry.week.as_deref())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

pub struct PgWeeklyStore {
    pool: PgPool,
}

impl PgWeeklyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeeklyEntryStore for PgWeeklyStore {
    async fn append_weekly_entry(&self, entry: &WeeklySurveyEntry) -> Result<(), StoreError> {
        let id = insert_weekly_entry(&self.pool, entry).await?;
        info!(%id, week = entry.week.as_deref().unwrap_or(""), "weekly entry stored");
        Ok(())
    }
}
