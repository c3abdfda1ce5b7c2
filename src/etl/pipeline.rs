//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, SaveReport, Transformer};
use crate::dataset::{Dataset, Record, type_name};
use crate::error::{EtlError, Result};
use crate::sink::SinkSpec;
use crate::summary::{Summary, summarize};
use owo_colors::OwoColorize;

/// Terminal state of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every step ran and the dataset was saved
    Completed,
    /// The source could not be loaded; nothing else ran
    AbortedLoad,
    /// A column operation failed; nothing was written
    AbortedTransform,
    /// The output selector was not recognized; nothing was written
    AbortedFormat,
    /// The sink reported a failure; the post-summary still ran
    SaveFailed,
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStatus::Completed => "completed",
            RunStatus::AbortedLoad => "aborted-load",
            RunStatus::AbortedTransform => "aborted-transform",
            RunStatus::AbortedFormat => "aborted-format",
            RunStatus::SaveFailed => "save-failed",
        };
        write!(f, "{}", name)
    }
}

/// Everything a caller needs to know about one run
#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    pub pre_summary: Option<Summary>,
    pub post_summary: Option<Summary>,
    pub save: Option<SaveReport>,
    /// The dataset as it stood when the run ended
    pub dataset: Option<Dataset>,
    /// The error behind any non-completed status
    pub error: Option<EtlError>,
}

impl RunReport {
    pub(crate) fn aborted(status: RunStatus, error: EtlError) -> Self {
        Self {
            status,
            pre_summary: None,
            post_summary: None,
            save: None,
            dataset: None,
            error: Some(error),
        }
    }
}

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// The run is linear: load, pre-summary, transform, select sink, save,
/// post-summary. Any failure is logged and turned into a terminal
/// [`RunStatus`]; `run` itself never fails.
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer over [`Record`]s
///
/// # Example
/// ```no_run
/// use etl_processor::etl::{IdentityTransformer, Pipeline};
/// use etl_processor::sink::SinkSpec;
/// use etl_processor::source::{Source, SourceExtractor};
/// use etl_processor::client::HttpClient;
/// # async fn example() -> eyre::Result<()> {
/// let source = Source::parse("people.csv", false)?;
/// let extractor = SourceExtractor::new(source, HttpClient::try_default()?);
///
/// let pipeline = Pipeline::new(
///     extractor,
///     IdentityTransformer::new(),
///     SinkSpec::new("json").with_destination("people.json"),
/// );
///
/// let report = pipeline.run().await;
/// println!("Run finished: {}", report.status);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T> {
    extractor: E,
    transformer: T,
    sink: SinkSpec,
}

impl<E, T> Pipeline<E, T>
where
    E: Extractor,
    T: Transformer<Input = Record, Output = Record>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, sink: SinkSpec) -> Self {
        Self {
            extractor,
            transformer,
            sink,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Load the dataset from the source
    /// 2. Summarize the loaded data
    /// 3. Remove then add columns
    /// 4. Resolve the output format
    /// 5. Save to the destination
    /// 6. Summarize the saved data
    pub async fn run(&self) -> RunReport {
        log::info!("Starting ETL pipeline");

        // Load
        let source = self.extractor.describe();
        log::debug!("Extracting from {}...", source);
        let dataset = match self.extractor.extract().await {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("Failed to load {}: {}", source.bright_black(), e);
                return RunReport::aborted(RunStatus::AbortedLoad, e);
            }
        };
        log::info!("Extracted {} record(s)", dataset.len());

        let pre_summary = summarize(Some(&dataset), "Pre-Processing Data Summary");
        log::info!("{}", pre_summary);

        // Transform
        log::debug!("Transforming records...");
        let dataset = match self.apply_transform(dataset) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("Column modification failed: {}", e);
                return RunReport {
                    pre_summary: Some(pre_summary),
                    ..RunReport::aborted(RunStatus::AbortedTransform, e)
                };
            }
        };

        // Select sink
        let sink = match self.sink.resolve() {
            Ok(sink) => sink,
            Err(e) => {
                log::error!("{}", e);
                return RunReport {
                    pre_summary: Some(pre_summary),
                    dataset: Some(dataset),
                    ..RunReport::aborted(RunStatus::AbortedFormat, e)
                };
            }
        };

        // Save
        log::debug!("Saving as {}...", sink.format());
        let (status, save, error) = match sink.load(&dataset).await {
            Ok(report) => {
                match &report.destination {
                    Some(path) => log::info!(
                        "✓ Saved {} record(s) as {} to {}",
                        report.rows,
                        report.format.cyan(),
                        path.display().bright_black()
                    ),
                    None => log::warn!("Nothing written for {}", report.format.cyan()),
                }
                (RunStatus::Completed, Some(report), None)
            }
            Err(e) => {
                log::error!("Error saving {}: {}", sink.format().cyan(), e);
                (RunStatus::SaveFailed, None, Some(e))
            }
        };

        let post_summary = summarize(Some(&dataset), "Post-Processing Data Summary");
        log::info!("{}", post_summary);

        log::info!("Pipeline finished: {}", status);
        RunReport {
            status,
            pre_summary: Some(pre_summary),
            post_summary: Some(post_summary),
            save,
            dataset: Some(dataset),
            error,
        }
    }

    fn apply_transform(&self, dataset: Dataset) -> Result<Dataset> {
        if self.transformer.is_identity() {
            return Ok(dataset);
        }
        match dataset {
            Dataset::Table(records) => {
                if let Some(first) = records.first() {
                    let columns: Vec<String> = first.keys().cloned().collect();
                    self.transformer.validate(&columns)?;
                }
                let transformed = self.transformer.transform_many(records)?;
                log::info!("Transformed {} record(s)", transformed.len());
                Ok(Dataset::Table(transformed))
            }
            Dataset::Document(value) => Err(EtlError::Transform(format!(
                "column operations need a list of records, got a JSON {}",
                type_name(&value)
            ))),
        }
    }
}
