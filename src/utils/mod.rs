// src/utils/mod.rs
pub mod error;
pub mod logging;
pub mod sheet_debug;

pub use error::AppError; // Re-export main error type for convenience
