// src/sheet/mod.rs
pub mod models;
pub mod reader;

pub use models::{parse_number, Cell, Sheet};
pub use reader::{read_sheet, DEFAULT_SHEET_NAME};
