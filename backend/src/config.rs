use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::inference::model::EngineError;

pub const MODEL_PATH_VAR: &str = "AGRO_MODEL_PATH";
pub const LABELS_PATH_VAR: &str = "AGRO_LABELS_PATH";
pub const CONFIG_PATH_VAR: &str = "AGRO_CONFIG";

pub const DEFAULT_MODEL_PATH: &str = "assets/multimodal_cucumber.pt";
pub const DEFAULT_LABELS_PATH: &str = "assets/labels.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Failed to load model: {0}")]
    ModelLoad(#[source] EngineError),
    #[error("Labels mismatch: {0}")]
    Labels(String),
}

/// Everything needed to build a [`crate::Classifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub preprocessing: PreprocessingConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            labels_path: PathBuf::from(DEFAULT_LABELS_PATH),
            preprocessing: PreprocessingConfig::default(),
        }
    }
}

impl ClassifierConfig {
    /// Reads artifact paths and an optional preprocessing file from the
    /// environment (a `.env` file is honoured).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(path) = env::var(MODEL_PATH_VAR) {
            config.model_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var(LABELS_PATH_VAR) {
            config.labels_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            config.preprocessing = PreprocessingConfig::load(path)?;
        }
        Ok(config)
    }
}

/// Input preparation the model was trained with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    pub image: ImageConfig,
    pub metadata: MetadataScaling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Side of the square input, in pixels.
    pub size: u32,
    pub resize_method: String,
}

/// Standard-scaler parameters fitted on the training set, one per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataScaling {
    pub temperature: Standardization,
    pub humidity: Standardization,
    pub age: Standardization,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    pub mean: f32,
    pub scale: f32,
}

impl Standardization {
    pub fn apply(&self, value: f32) -> f32 {
        (value - self.mean) / self.scale
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            size: 224,
            resize_method: "nearest".to_string(),
        }
    }
}

impl Default for MetadataScaling {
    #[allow(clippy::excessive_precision)]
    fn default() -> Self {
        Self {
            temperature: Standardization {
                mean: 23.196046875,
                scale: 4.951200769540933,
            },
            humidity: Standardization {
                mean: 85.624296875,
                scale: 12.193795501170472,
            },
            age: Standardization {
                mean: 28.16296875,
                scale: 16.566792008005756,
            },
        }
    }
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            metadata: MetadataScaling::default(),
        }
    }
}

impl PreprocessingConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PreprocessingConfig = serde_yaml::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image.size == 0 {
            return Err(ConfigError::Invalid("image size must be positive".into()));
        }
        self.filter()?;

        for (name, scaling) in [
            ("temperature", &self.metadata.temperature),
            ("humidity", &self.metadata.humidity),
            ("age", &self.metadata.age),
        ] {
            if !scaling.mean.is_finite() || !scaling.scale.is_finite() || scaling.scale == 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} scaling needs a finite mean and a finite non-zero scale",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn filter(&self) -> Result<FilterType, ConfigError> {
        match self.image.resize_method.to_ascii_lowercase().as_str() {
            "nearest" => Ok(FilterType::Nearest),
            "triangle" | "bilinear" => Ok(FilterType::Triangle),
            "catmullrom" | "bicubic" => Ok(FilterType::CatmullRom),
            "gaussian" => Ok(FilterType::Gaussian),
            "lanczos3" => Ok(FilterType::Lanczos3),
            other => Err(ConfigError::Invalid(format!(
                "unknown resize method '{}'",
                other
            ))),
        }
    }
}
