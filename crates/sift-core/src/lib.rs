//! Core types for sift.
//!
//! This crate contains the data structures shared by the filter engine and
//! the command line tool:
//! - Rows and raw cell values
//! - Field descriptors and display processors
//! - Filter specifications and popup search operators
//! - Column-oriented data frames
//! - Configuration and error types

mod config;
mod error;
mod field;
mod filter;
mod frame;
mod row;
mod value;

pub use config::{config_dir, config_path, DisplayConfig, FilterConfig, SiftConfig};
pub use error::{ConfigError, FilterError, FrameError};
pub use field::{
    display_fn, DisplayProcessor, Field, FieldConfig, FieldType, StandardDisplay, ValueMapping,
};
pub use filter::{Filter, FilterOperator, FilterSpec};
pub use frame::{DataFrame, FrameField, Table};
pub use row::{Cells, TableRow};
pub use value::{CellValue, DisplayValue};
