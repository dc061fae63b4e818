pub mod engine;
pub mod generator;
pub mod reference;

pub use crate::domain::model::{
    DeviceRecord, ExportFormat, Place, ReferenceData, RunSummary, SeedPlan, SubmitOutcome,
};
pub use crate::domain::ports::{ConfigProvider, DeviceSink, Storage};
pub use crate::utils::error::Result;
