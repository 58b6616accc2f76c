use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod db;
mod error;
mod form;
mod import;
mod models;
mod report;
mod router;
mod scoring;
mod server;
mod store;

use config::Config;
use db::PgWeeklyStore;
use form::FormFields;
use router::{Survey, SurveyKind, SurveyRouter};

#[derive(Parser)]
#[command(name = "wellness-check")]
#[command(about = "Academic wellness survey scoring service", long_about = None)]
struct Cli {
    /// Print the result payload as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Also write a markdown report of the result
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Insert the default student and sample weeks
    Seed,
    /// Submit workload surveys from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Run the HTTP survey service
    Serve {
        #[arg(long)]
        port: Option<u16>,
        /// Score workload submissions without saving them
        #[arg(long)]
        dry_run: bool,
    },
    /// Score a weekly workload and save it
    Workload {
        #[arg(long, allow_hyphen_values = true)]
        study_hours: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        sleep_hours: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        assignments: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        stress_level: Option<String>,
        #[arg(long)]
        week: Option<String>,
        /// Score without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Rate study pressure on a 1-4 scale
    Study {
        #[arg(long, allow_hyphen_values = true)]
        pressure: Option<String>,
    },
    /// Count time-management habits
    Time {
        #[arg(long = "habit")]
        habits: Vec<String>,
    },
    /// Rate academic pressure on a 0-100 scale
    Pressure {
        #[arg(long, allow_hyphen_values = true)]
        value: Option<String>,
    },
    /// Build a goals roadmap
    Goals {
        #[arg(long)]
        academic: Option<String>,
        #[arg(long)]
        health: Option<String>,
    },
}

fn survey_fields(pairs: Vec<(&str, Option<String>)>) -> FormFields {
    FormFields::from_pairs(
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value))),
    )
}

async fn store_router() -> anyhow::Result<SurveyRouter> {
    let pool = db::connect(&Config::load()?).await?;
    Ok(SurveyRouter::new(Arc::new(PgWeeklyStore::new(pool))))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}

/// Surveys scored without a store never read the environment.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let (kind, fields, dry_run) = match cli.command {
        Commands::InitDb => {
            let pool = db::connect(&Config::load()?).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
            return Ok(());
        }
        Commands::Seed => {
            let pool = db::connect(&Config::load()?).await?;
            let inserted = db::seed(&pool).await?;
            println!("Seed data inserted ({inserted} new weeks).");
            return Ok(());
        }
        Commands::Import { csv } => {
            let router = store_router().await?;
            let assessments = import::import_csv(&router, &csv).await?;
            println!(
                "Imported {} weekly entries from {}.",
                assessments.len(),
                csv.display()
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&assessments)?);
            }
            return Ok(());
        }
        Commands::Serve { port, dry_run } => {
            let config = Config::load()?;
            let router = if dry_run {
                SurveyRouter::without_store()
            } else {
                let pool = db::connect(&config).await?;
                SurveyRouter::new(Arc::new(PgWeeklyStore::new(pool)))
            };
            server::serve(router, port.unwrap_or(config.port)).await?;
            return Ok(());
        }
        Commands::Workload {
            study_hours,
            sleep_hours,
            assignments,
            stress_level,
            week,
            dry_run,
        } => (
            SurveyKind::Workload,
            survey_fields(vec![
                ("study_hours", study_hours),
                ("sleep_hours", sleep_hours),
                ("assignments", assignments),
                ("stress_level", stress_level),
                ("week", week),
            ]),
            dry_run,
        ),
        Commands::Study { pressure } => (
            SurveyKind::StudyPressure,
            survey_fields(vec![("pressure", pressure)]),
            true,
        ),
        Commands::Time { habits } => (
            SurveyKind::TimeHabits,
            FormFields::from_pairs(habits.into_iter().map(|habit| ("habits", habit))),
            true,
        ),
        Commands::Pressure { value } => (
            SurveyKind::AcademicPressure,
            survey_fields(vec![("pressure", value)]),
            true,
        ),
        Commands::Goals { academic, health } => (
            SurveyKind::Goals,
            survey_fields(vec![("academic", academic), ("health", health)]),
            true,
        ),
    };

    let router = if dry_run {
        SurveyRouter::without_store()
    } else {
        store_router().await?
    };

    let survey = Survey::from_fields(kind, &fields);
    let result = router.submit(&survey).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", report::summary_line(&result));
    }

    if let Some(out) = cli.out {
        std::fs::write(&out, report::build_report(&survey, &result))?;
        println!("Report written to {}.", out.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pure_surveys_ignore_broken_config() {
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "many");
        assert!(Config::load().is_err());

        for args in [
            vec!["wellness-check", "study", "--pressure", "3"],
            vec!["wellness-check", "time", "--habit", "late", "--habit", "cram"],
            vec!["wellness-check", "pressure", "--value", "70"],
            vec!["wellness-check", "goals", "--academic", "performance"],
            vec![
                "wellness-check",
                "workload",
                "--study-hours",
                "10",
                "--sleep-hours",
                "2",
                "--dry-run",
            ],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(run(cli).await.is_ok());
        }

        std::env::remove_var("DATABASE_MAX_CONNECTIONS");
    }
}
