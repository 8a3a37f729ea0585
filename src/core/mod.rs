pub mod etl;
pub mod pipeline;
pub mod table;

pub use crate::domain::model::{Library, LoadOutcome, Record, Table, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
