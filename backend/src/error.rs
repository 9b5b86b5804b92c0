use crate::config::ConfigError;
use crate::inference::model::EngineError;

/// Failure of a classification call.
///
/// The three variants keep configuration, caller and runtime faults apart:
/// configuration errors only come out of construction, invalid input is
/// reported before any work is scheduled, and inference errors arrive through
/// the pending result.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
    #[error("Could not start classification worker: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Classification worker terminated without a result")]
    WorkerLost,
}

impl ClassifierError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ClassifierError::Configuration(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ClassifierError::InvalidInput(_))
    }

    pub fn is_inference(&self) -> bool {
        matches!(self, ClassifierError::Inference(_))
    }
}

impl From<EngineError> for ClassifierError {
    fn from(err: EngineError) -> Self {
        ClassifierError::Inference(InferenceError::Engine(err))
    }
}
