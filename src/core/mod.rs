pub mod aggregator;
pub mod etl;
pub mod pipeline;
pub mod projector;
pub mod reader;
pub mod timestamp;

pub use crate::domain::model::{AccidentRecord, AccidentTable, RawBatch, RunSummary};
pub use crate::domain::ports::{Accumulator, ConfigProvider, Pipeline, Reporter, Storage};
pub use crate::utils::error::Result;
