use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fs;
use survey_payload_client::SqlClient;
use survey_payload_core::config::TransformConfig;
use survey_payload_core::{NumericPolicy, PayloadTransformer, Snapshot, SubmissionValidator};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Survey Payload Builder")]
struct Args {
    /// Config file path
    #[clap(short, long, global = true, env = "SURVEY_PAYLOAD_CONFIG")]
    config: Option<String>,

    /// Target database name, overriding both the config and the snapshot
    #[clap(long, global = true, env = "SURVEY_DB_NAME")]
    db_name: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a snapshot into a submission document
    Transform {
        /// Snapshot JSON file
        #[clap(short, long)]
        snapshot: String,

        /// Reject non-numeric id fields instead of sending null
        #[clap(long)]
        strict: bool,

        /// Write the document here instead of stdout
        #[clap(short, long)]
        output: Option<String>,
    },

    /// Check whether a snapshot is ready for submission
    Validate {
        /// Snapshot JSON file
        #[clap(short, long)]
        snapshot: String,
    },

    /// Transform a snapshot and post it to the SQL generation service
    Submit {
        /// Snapshot JSON file
        #[clap(short, long)]
        snapshot: String,

        /// Base URL of the SQL generation service
        #[clap(long, env = "SURVEY_SQL_ENDPOINT")]
        endpoint: Option<String>,

        /// Write the returned SQL here instead of stdout
        #[clap(short, long)]
        output: Option<String>,
    },
}

/// Read a snapshot file
///
/// `db_name` fills a snapshot that names no database; `db_override` replaces
/// whatever the snapshot says.
fn load_snapshot(path: &str, db_name: &str, db_override: Option<&str>) -> Result<Snapshot> {
    let json = fs::read_to_string(path).with_context(|| format!("reading snapshot {}", path))?;
    let mut snapshot = Snapshot::from_json_with_default(&json, db_name)?;
    if let Some(db_name) = db_override {
        snapshot.db_name = db_name.to_string();
    }
    Ok(snapshot)
}

fn write_output(output: Option<&str>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path))?;
            info!("Wrote {}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = TransformConfig::new();
    if let Some(config_path) = &args.config {
        config = TransformConfig::from_file(config_path)?;
    }

    // Initialize logging
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, &config.log_level),
    );

    // Override config with command-line arguments
    if let Some(db_name) = &args.db_name {
        config.db_name = db_name.clone();
    }
    let db_override = args.db_name.as_deref();

    match args.command {
        Command::Transform { snapshot, strict, output } => {
            if strict {
                config.numeric_policy = NumericPolicy::Strict;
            }

            let snapshot = load_snapshot(&snapshot, &config.db_name, db_override)?;

            let document = PayloadTransformer::from_config(&config).transform(&snapshot)?;
            for field in document.unparsed_fields() {
                warn!("{} will be sent as null", field);
            }
            write_output(output.as_deref(), &document.to_json_pretty()?)?;
        }
        Command::Validate { snapshot } => {
            let snapshot = load_snapshot(&snapshot, &config.db_name, db_override)?;
            let report = SubmissionValidator::validate_snapshot(&snapshot);
            for issue in report.issues() {
                println!("{}", issue);
            }
            if !report.is_valid() {
                bail!("snapshot is not ready: {} issue(s)", report.issues().len());
            }
            println!("Snapshot is ready for submission");
        }
        Command::Submit { snapshot, endpoint, output } => {
            if let Some(endpoint) = endpoint {
                config.endpoint.base_url = endpoint;
            }
            config.validate()?;

            let snapshot = load_snapshot(&snapshot, &config.db_name, db_override)?;
            let document = PayloadTransformer::from_config(&config).transform(&snapshot)?;

            let client = SqlClient::from_config(&config.endpoint);
            info!("Submitting {} questions to {}", document.questions.len(), client.base_url());
            let sql = client.post_survey(&document).await?;
            write_output(output.as_deref(), &sql)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use survey_payload_core::Reference;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_transform_args() {
        let args = Args::parse_from([
            "survey-payload", "transform", "--snapshot", "state.json", "--strict", "--db-name", "test_db",
        ]);
        assert_eq!(args.db_name.as_deref(), Some("test_db"));
        match args.command {
            Command::Transform { snapshot, strict, output } => {
                assert_eq!(snapshot, "state.json");
                assert!(strict);
                assert!(output.is_none());
            }
            other => panic!("Expected transform, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_config() {
        let args = Args::parse_from([
            "survey-payload", "submit", "--snapshot", "state.json", "--config", "config.json",
            "--db-name", "survey_staging",
        ]);
        assert_eq!(args.config.as_deref(), Some("config.json"));
        assert_eq!(args.db_name.as_deref(), Some("survey_staging"));
        assert!(matches!(args.command, Command::Submit { .. }));
    }

    #[test]
    fn test_load_snapshot_reports_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"surveys\": []}}").unwrap();

        let result = load_snapshot(file.path().to_str().unwrap(), "survey_db", None);
        assert!(result.is_err());
        assert!(load_snapshot("/nonexistent/state.json", "survey_db", None).is_err());
    }

    fn snapshot_file(db_name: Option<&str>) -> NamedTempFile {
        let mut value = serde_json::json!({
            "surveys": [], "sections": [], "options": [], "questions": [],
            "conditions": [], "tags": [], "attributes": [],
            "reference": Reference::default()
        });
        if let Some(db_name) = db_name {
            value["db_name"] = serde_json::json!(db_name);
        }
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    #[test]
    fn test_load_snapshot_db_name_layering() {
        let bare = snapshot_file(None);
        let path = bare.path().to_str().unwrap();
        assert_eq!(load_snapshot(path, "survey_staging", None).unwrap().db_name, "survey_staging");

        let named = snapshot_file(Some("survey_db"));
        let path = named.path().to_str().unwrap();
        assert_eq!(load_snapshot(path, "survey_staging", None).unwrap().db_name, "survey_db");
        assert_eq!(
            load_snapshot(path, "survey_staging", Some("survey_cli")).unwrap().db_name,
            "survey_cli"
        );
    }
}
