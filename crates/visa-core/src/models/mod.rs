//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{
    BaseDirection, EmptyDocumentPolicy, ExtractionConfig, NormalizerConfig, OutputConfig,
    SheetFormat, VisaConfig,
};
pub use record::{EntryType, VisaRecord};
