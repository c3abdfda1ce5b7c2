//! CLI helper functions

use crate::{
    client::{Auth, HttpClient},
    dataset::Dataset,
    etl::{Extractor, RunReport},
    source::{Source, SourceExtractor},
    summary::{Summary, summarize},
    transform::TransformSpec,
};
use eyre::{Context, Result, eyre};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Read request credentials from environment variables
///
/// Expected environment variables:
/// - ETL_TOKEN: Bearer token sent as `Authorization: Bearer ...` (optional)
/// - ETL_APIKEY: API key sent as `Authorization: ApiKey ...` (optional)
/// - ETL_USERNAME: Username for basic auth (optional)
/// - ETL_PASSWORD: Password for basic auth (optional)
///
/// A token takes precedence over an API key, which takes precedence over
/// username/password.
pub fn load_auth() -> Auth {
    Auth::new(
        std::env::var("ETL_USERNAME").ok(),
        std::env::var("ETL_PASSWORD").ok(),
        std::env::var("ETL_APIKEY").ok(),
        std::env::var("ETL_TOKEN").ok(),
    )
}

/// Resolve the request timeout: explicit flag, then ETL_TIMEOUT_SECS, then the default
pub fn load_timeout(flag: Option<u64>) -> Result<Duration> {
    if let Some(secs) = flag {
        return Ok(Duration::from_secs(secs));
    }
    match std::env::var("ETL_TIMEOUT_SECS") {
        Ok(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid ETL_TIMEOUT_SECS: {}", value))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(HttpClient::DEFAULT_TIMEOUT),
    }
}

/// Build the HTTP client from the environment
pub fn load_http_client(timeout: Option<u64>) -> Result<HttpClient> {
    let auth = load_auth();
    let timeout = load_timeout(timeout)?;
    log::debug!("HTTP auth: {}, timeout: {:?}", auth, timeout);
    HttpClient::try_new(auth, timeout).context("Failed to create HTTP client")
}

/// Parse a `COLUMN=VALUE` assignment
///
/// The value is read as JSON when it parses (`n=1`, `ok=true`,
/// `tags=["a"]`), otherwise it is kept as a plain string.
pub fn parse_column_assignment(arg: &str) -> Result<(String, Value)> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| eyre!("Expected COLUMN=VALUE, got '{}'", arg))?;
    let name = name.trim();
    if name.is_empty() {
        eyre::bail!("Column name is empty in '{}'", arg);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

/// Build a transform spec from repeated `--add` and `--remove` flags
pub fn build_transform(add: &[String], remove: &[String], strict: bool) -> Result<TransformSpec> {
    let mut spec = TransformSpec::default()
        .remove(remove.iter().map(|s| s.trim().to_string()))
        .strict(strict);
    for arg in add {
        let (name, value) = parse_column_assignment(arg)?;
        spec = spec.add(name, value);
    }
    Ok(spec)
}

/// Ask for the output format on `output`, reading the answer from `input`
///
/// Returns the trimmed, lowercased answer; it is not validated here.
pub fn prompt_output_format(mut input: impl BufRead, mut output: impl Write) -> Result<String> {
    write!(output, "Choose output format (csv, json, sqlite): ")?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read output format")?;
    Ok(answer.trim().to_lowercase())
}

/// Turn a finished run into the process result: `Ok` only when it completed
pub fn run_outcome(report: &RunReport) -> Result<()> {
    if let Some(error) = &report.error {
        log::error!("{} ({})", error, error.kind().red());
    }
    if !report.status.is_success() {
        eyre::bail!("ETL run ended with status {}", report.status);
    }
    Ok(())
}

/// Load a source and summarize it without saving anything
pub async fn inspect(input: &str, is_api: bool, client: HttpClient) -> Result<(Dataset, Summary)> {
    let source = Source::parse(input, is_api)?;
    log::info!("Inspecting {}", source);
    let dataset = SourceExtractor::new(source, client)
        .extract()
        .await
        .with_context(|| format!("Failed to load {}", input))?;
    let summary = summarize(Some(&dataset), "Data Summary");
    Ok((dataset, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EtlError;
    use crate::etl::RunStatus;
    use serde_json::json;

    #[test]
    #[serial_test::serial]
    fn test_load_auth_from_env() {
        unsafe {
            std::env::remove_var("ETL_TOKEN");
            std::env::remove_var("ETL_APIKEY");
            std::env::set_var("ETL_USERNAME", "elastic");
            std::env::set_var("ETL_PASSWORD", "changeme");
        }
        assert_eq!(
            load_auth(),
            Auth::Basic("elastic".to_string(), "changeme".to_string())
        );

        unsafe {
            std::env::set_var("ETL_APIKEY", "key");
        }
        assert_eq!(load_auth(), Auth::Apikey("key".to_string()));

        unsafe {
            std::env::set_var("ETL_TOKEN", "token");
        }
        assert_eq!(load_auth(), Auth::Bearer("token".to_string()));

        unsafe {
            std::env::remove_var("ETL_TOKEN");
            std::env::remove_var("ETL_APIKEY");
            std::env::remove_var("ETL_USERNAME");
            std::env::remove_var("ETL_PASSWORD");
        }
        assert_eq!(load_auth(), Auth::None);
    }

    #[test]
    #[serial_test::serial]
    fn test_load_timeout() {
        unsafe {
            std::env::remove_var("ETL_TIMEOUT_SECS");
        }
        assert_eq!(load_timeout(None).unwrap(), HttpClient::DEFAULT_TIMEOUT);
        assert_eq!(load_timeout(Some(5)).unwrap(), Duration::from_secs(5));

        unsafe {
            std::env::set_var("ETL_TIMEOUT_SECS", "12");
        }
        assert_eq!(load_timeout(None).unwrap(), Duration::from_secs(12));

        unsafe {
            std::env::set_var("ETL_TIMEOUT_SECS", "soon");
        }
        let err = load_timeout(None).unwrap_err();
        assert!(err.to_string().contains("Invalid ETL_TIMEOUT_SECS"));

        unsafe {
            std::env::remove_var("ETL_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_parse_column_assignment() {
        assert_eq!(
            parse_column_assignment("source=movies").unwrap(),
            ("source".to_string(), json!("movies"))
        );
        assert_eq!(
            parse_column_assignment("n=1").unwrap(),
            ("n".to_string(), json!(1))
        );
        assert_eq!(
            parse_column_assignment("zip=01234").unwrap(),
            ("zip".to_string(), json!("01234"))
        );
        assert_eq!(
            parse_column_assignment("note=a=b").unwrap(),
            ("note".to_string(), json!("a=b"))
        );
        assert!(parse_column_assignment("novalue").is_err());
        assert!(parse_column_assignment("=x").is_err());
    }

    #[test]
    fn test_build_transform() {
        let spec = build_transform(
            &["tag=x".to_string()],
            &["b".to_string(), " c ".to_string()],
            true,
        )
        .unwrap();
        assert_eq!(spec.remove, vec!["b", "c"]);
        assert_eq!(spec.add["tag"], "x");
        assert!(spec.strict);
    }

    #[test]
    fn test_prompt_output_format() {
        let mut shown = Vec::new();
        let answer = prompt_output_format(&b"  SQLite \n"[..], &mut shown).unwrap();
        assert_eq!(answer, "sqlite");
        assert_eq!(
            String::from_utf8(shown).unwrap(),
            "Choose output format (csv, json, sqlite): "
        );
    }

    #[test]
    fn test_run_outcome_follows_status() {
        let completed = RunReport {
            status: RunStatus::Completed,
            pre_summary: None,
            post_summary: None,
            save: None,
            dataset: None,
            error: None,
        };
        assert!(run_outcome(&completed).is_ok());

        for status in [
            RunStatus::AbortedLoad,
            RunStatus::AbortedTransform,
            RunStatus::AbortedFormat,
            RunStatus::SaveFailed,
        ] {
            let report = RunReport::aborted(status, EtlError::Transform("boom".into()));
            let err = run_outcome(&report).unwrap_err();
            assert!(err.to_string().contains(&status.to_string()));
        }
    }

    #[tokio::test]
    async fn test_inspect_local_csv() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("in.csv");
        std::fs::write(&path, "a,b\n1,\n2,3\n").unwrap();

        let client = HttpClient::try_default().unwrap();
        let (dataset, summary) = inspect(path.to_str().unwrap(), false, client)
            .await
            .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(summary.column("b").unwrap().missing, 1);
    }
}
