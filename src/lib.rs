pub mod catalog;
pub mod config;
pub mod error;
pub mod extraction;
pub mod field;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod query;
pub mod sensor;
pub mod statistics;
pub mod view;

pub use error::{Result, ThermwatchError};
pub use pipeline::ThermalPipeline;
