//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::{clean, CleanError};
pub use loader::{load_listings, LoaderError, DEFAULT_DATASET, REQUIRED_COLUMNS};
