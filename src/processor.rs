//! One-call entry point wiring a source, column changes, and a sink together

use crate::client::HttpClient;
use crate::etl::{Pipeline, RunReport, RunStatus};
use crate::sink::SinkSpec;
use crate::source::{Source, SourceExtractor};
use crate::transform::{ColumnTransform, TransformSpec};
use std::path::PathBuf;

/// Parameters of a single ETL run
#[derive(Debug, Clone)]
pub struct EtlRequest {
    /// Local path, file URL, or API endpoint
    pub input: String,
    /// Treat `input` as an API endpoint returning JSON
    pub is_api: bool,
    pub transform: TransformSpec,
    pub sink: SinkSpec,
    /// Where remote files are downloaded; current directory when unset
    pub download_dir: Option<PathBuf>,
}

impl EtlRequest {
    pub fn new(input: impl Into<String>, sink: SinkSpec) -> Self {
        Self {
            input: input.into(),
            is_api: false,
            transform: TransformSpec::default(),
            sink,
            download_dir: None,
        }
    }

    pub fn api(mut self, is_api: bool) -> Self {
        self.is_api = is_api;
        self
    }

    pub fn with_transform(mut self, transform: TransformSpec) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }
}

/// Load, reshape, and save a dataset as described by `request`
///
/// Never fails: every error ends up in the returned [`RunReport`].
pub async fn etl_processor(request: EtlRequest, client: HttpClient) -> RunReport {
    let source = match Source::parse(&request.input, request.is_api) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Cannot load {}: {}", request.input, e);
            return RunReport::aborted(RunStatus::AbortedLoad, e);
        }
    };

    let mut extractor = SourceExtractor::new(source, client);
    if let Some(dir) = &request.download_dir {
        extractor = extractor.with_download_dir(dir);
    }

    Pipeline::new(
        extractor,
        ColumnTransform::new(request.transform),
        request.sink,
    )
    .run()
    .await
}
