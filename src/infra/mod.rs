//! Infrastructure module - logging and path resolution

pub mod logging;
pub mod paths;

pub use logging::init_tracing;
pub use paths::{auth_store_path, data_dir};
