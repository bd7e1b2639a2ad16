//! Conversion layer between host objects and wire values
//!
//! Everything goes through a [`Converter`]:
//! - values: `to_value`, `to_object`, `to_object_flattened`
//! - keys: `to_key`, `key_to_object`
//! - records: `to_record`, `record_to_object`, `bins_to_object`
//! - batches: `batch_to_object`
//! - context paths: `to_context`, `context_from_operation`
//! - operation arguments: `operation_meta`, `index_from_object`,
//!   `bin_name_from_object`, `text_from_object`
//!
//! Failures are [`ConversionError`]s; [`Outcome`] collects them for callers
//! that want a status record, and [`outcome_to_object`] hands one to the host.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod batch;
mod collection;
pub mod config;
mod context;
pub mod converter;
mod dispatch;
pub mod driver;
mod extension;
mod key;
pub mod ops;
pub mod outcome;
pub mod pool;
pub mod record;
mod scalar;

pub use config::{ConfigError, ConverterConfig, CONFIG_FILE_NAME};
pub use converter::Converter;
pub use driver::{Capabilities, Driver};
pub use ops::OperationMeta;
pub use outcome::outcome_to_object;
pub use pool::ConversionPool;
pub use record::BinShape;

pub use kvmarshal_core::{ConversionError, ErrorKind, Outcome, Result};
