pub mod processor;
pub mod types;

pub use processor::{AstroProcessor, Ready, Uninitialized};
pub use types::{ChartLocation, NatalChart};
