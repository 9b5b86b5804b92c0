mod class;
mod metadata;
mod result;

pub use class::{DiseaseClass, NUM_CLASSES};
pub use metadata::{
    AGE_RANGE, HUMIDITY_RANGE, Metadata, MetadataError, MetadataField, TEMPERATURE_RANGE,
};
pub use result::ClassificationResult;
