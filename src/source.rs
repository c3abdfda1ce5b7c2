//! Source descriptors and the extractor that acquires them
//!
//! A source is one of:
//! - an API endpoint whose JSON body is the dataset
//! - a remote `.csv`/`.json` file, downloaded before parsing
//! - a local `.csv`/`.json` file

use crate::client::HttpClient;
use crate::dataset::Dataset;
use crate::error::{EtlError, Result};
use crate::etl::Extractor;
use crate::storage::{CsvReader, JsonReader};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// File name stem used for downloaded sources
pub const DOWNLOAD_STEM: &str = "downloaded_file";

/// Parser selected by a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Pick the parser from a path's extension (case-insensitive)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "" => Err(EtlError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(EtlError::UnsupportedFormat(format!(
                "'.{}' input files are not supported ({})",
                other,
                path.display()
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
        }
    }

    /// Parse a local file of this format
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        match self {
            FileFormat::Csv => Ok(Dataset::Table(CsvReader::new(path).read()?)),
            FileFormat::Json => Ok(Dataset::from_value(JsonReader::new(path).read()?)),
        }
    }
}

/// Where the data comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// REST endpoint returning JSON
    Api(Url),
    /// File downloaded over HTTP(S)
    Remote { url: Url, format: FileFormat },
    /// File on the local filesystem
    Local { path: PathBuf, format: FileFormat },
}

impl Source {
    /// Classify an input string
    ///
    /// With `is_api` the input must be a URL. Otherwise an `http`/`https`
    /// URL is a remote file, any other URL scheme is rejected, and anything
    /// else is a local path. The file format is checked here, before any I/O.
    pub fn parse(input: &str, is_api: bool) -> Result<Self> {
        if is_api {
            let url = Url::parse(input)
                .map_err(|e| EtlError::fetch(input, format!("invalid API URL: {}", e)))?;
            return Ok(Source::Api(url));
        }

        if let Ok(url) = Url::parse(input) {
            let scheme = url.scheme().to_string();
            match scheme.as_str() {
                "http" | "https" => {
                    let file_name = url
                        .path_segments()
                        .and_then(|mut segments| segments.next_back())
                        .unwrap_or_default()
                        .to_string();
                    let format = FileFormat::from_path(&file_name).map_err(|_| {
                        EtlError::UnsupportedFormat(format!(
                            "cannot tell the file format of {}",
                            url
                        ))
                    })?;
                    return Ok(Source::Remote { url, format });
                }
                // Single letters are Windows drive prefixes such as `C:`
                scheme if scheme.len() > 1 => {
                    return Err(EtlError::UnsupportedFormat(format!(
                        "'{}' URLs are not supported ({})",
                        scheme, input
                    )));
                }
                _ => {}
            }
        }

        let path = PathBuf::from(input);
        let format = FileFormat::from_path(&path)?;
        Ok(Source::Local { path, format })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Api(url) => write!(f, "API {}", url),
            Source::Remote { url, .. } => write!(f, "{}", url),
            Source::Local { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// Extractor that acquires any [`Source`]
pub struct SourceExtractor {
    source: Source,
    client: HttpClient,
    download_dir: PathBuf,
}

impl SourceExtractor {
    /// Downloads go to the current directory unless overridden
    pub fn new(source: Source, client: HttpClient) -> Self {
        Self {
            source,
            client,
            download_dir: PathBuf::from("."),
        }
    }

    pub fn with_download_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.download_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Path a remote file of `format` is downloaded to
    pub fn download_path(&self, format: FileFormat) -> PathBuf {
        self.download_dir
            .join(format!("{}.{}", DOWNLOAD_STEM, format.extension()))
    }
}

impl Extractor for SourceExtractor {
    async fn extract(&self) -> Result<Dataset> {
        match &self.source {
            Source::Api(url) => {
                log::info!("Fetching data from API {}", url);
                let body = self.client.get_json(url).await?;
                Ok(Dataset::from_value(body))
            }
            Source::Remote { url, format } => {
                log::info!("Downloading {}", url);
                let local = self.client.download(url, self.download_path(*format)).await?;
                format.read(local)
            }
            Source::Local { path, format } => {
                log::info!("Loading {} file {}", format.extension(), path.display());
                format.read(path)
            }
        }
    }

    fn describe(&self) -> String {
        self.source.to_string()
    }
}
