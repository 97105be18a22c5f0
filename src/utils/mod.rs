/// Module containing logging utilities
pub mod logger;

pub use logger::*;
