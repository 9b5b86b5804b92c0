//! Disease classification for cucumber photos combined with greenhouse
//! readings (temperature, humidity, fruit age).
//!
//! ```no_run
//! use agropredictor::{Classifier, ClassifierConfig, InputImage};
//! use shared::Metadata;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = Classifier::load(&ClassifierConfig::from_env()?)?;
//! let metadata = Metadata::new(26.0, 88.0, 35.0)?;
//! let image = InputImage::from_path("leaf.jpg")?;
//! let result = classifier.classify_metadata(image, &metadata)?.await?;
//! println!("{} ({:.0}%)", result.class_name, result.confidence * 100.0);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod inference;
pub mod labels;
pub mod report;

pub use classifier::{Classifier, InputImage, PendingClassification};
pub use config::{ClassifierConfig, ConfigError, PreprocessingConfig};
pub use error::{ClassifierError, InferenceError};
pub use inference::model::{EngineError, InferenceEngine};
pub use inference::preprocess::ModelInputs;
