pub mod error;
pub mod filename;
pub mod logger;
pub mod monitor;
pub mod validation;
