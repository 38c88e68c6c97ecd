// src/lib.rs
//! Extraction of business-simulation round exports into per-team records.
//!
//! [`parser::parse_round`] turns the bytes of one export into a [`model::Round`].
//! The rest of the crate serves the command-line caller: batch parsing, merging
//! and persistence of rounds.

pub mod batch;
pub mod extractors;
pub mod model;
pub mod parser;
pub mod sheet;
pub mod storage;
pub mod translate;
pub mod utils;

pub use model::{Round, Team};
pub use parser::{parse_round, parse_sheet, ParseOptions};
pub use utils::error::ParseError;
pub use utils::AppError;
