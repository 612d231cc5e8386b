pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    converter::{convert, ConvertOptions, Converter},
    etl::{EtlEngine, RunSummary},
    pipeline::ContactsPipeline,
};
pub use domain::model::{ContactTable, Conversion, Preview, RawTable, Record, SourceEncoding};
pub use utils::error::{ConvertError, FieldDerivationWarning, Result};
