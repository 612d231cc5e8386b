pub mod converter;
pub mod decode;
pub mod etl;
pub mod formatter;
pub mod mapper;
pub mod name_inference;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod sniffer;

pub use crate::domain::model::{Conversion, Record, SourceTable};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
