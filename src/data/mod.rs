//! Data module - XML descriptor loading

mod loader;
mod model;

pub use loader::{ConstellationLoader, LoaderError, ScanReport, SkippedFile};
pub use model::{Constellation, ConstellationDescriptor, StarRecord};
