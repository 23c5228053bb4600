//! Pascal VOC object cropper
//!
//! This library crops every annotated object of a Pascal VOC dataset into
//! per-class folders and mirrors the source images together with freshly
//! generated annotation files.

pub mod annotation;
pub mod config;
pub mod conversion;
pub mod counter;
pub mod crop;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mirror;
pub mod types;
pub mod utils;
pub mod visualize;
pub mod writer;

// Re-export commonly used types and functions
pub use config::{Args, VisualizeArgs};
pub use conversion::{Converter, FileOutcome};
pub use counter::ClassInstanceCounter;
pub use dataset::process_dataset;
pub use error::{Error, Result};
pub use types::{AnnotationRecord, BoundingBox, ObjectAnnotation, OutputDirs, SourceDirs};
pub use writer::{AnnotationSerializer, OutputAnnotation, VocXmlWriter};
