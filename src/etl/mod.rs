//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building the pipeline that
//! acquires a dataset, reshapes its columns, and persists it.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::{Loader, SaveReport};
pub use pipeline::{Pipeline, RunReport, RunStatus};
pub use transform::{IdentityTransformer, Transformer};
