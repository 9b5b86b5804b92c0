use std::path::Path;

use super::preprocess::ModelInputs;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Model artifact not found: {0}")]
    MissingArtifact(String),
    #[error("Model could not be loaded: {0}")]
    Load(String),
    #[error("Forward pass failed: {0}")]
    Forward(String),
    #[cfg(feature = "torch")]
    #[error("Torch error: {0}")]
    Torch(#[from] tch::TchError),
}

/// A loaded multimodal model.
///
/// `forward` takes `&mut self` because engines are not required to be safe
/// for concurrent execution; the classifier runs one forward pass at a time.
/// The output is one score per class, in label order.
pub trait InferenceEngine: Send + 'static {
    fn forward(&mut self, inputs: &ModelInputs) -> Result<Vec<f32>, EngineError>;
}

/// Loads the model artifact with whichever backend this build carries.
pub fn load_engine(model_path: &Path) -> Result<Box<dyn InferenceEngine>, EngineError> {
    if !model_path.is_file() {
        return Err(EngineError::MissingArtifact(model_path.display().to_string()));
    }

    #[cfg(feature = "torch")]
    {
        let model = torch::TorchModel::load(model_path)?;
        Ok(Box::new(model))
    }

    #[cfg(not(feature = "torch"))]
    {
        Err(EngineError::Load(format!(
            "{}: built without an inference backend, enable the `torch` feature",
            model_path.display()
        )))
    }
}

#[cfg(feature = "torch")]
pub mod torch {
    use std::path::Path;

    use tch::{CModule, Device, Kind, Tensor};

    use super::{EngineError, InferenceEngine};
    use crate::inference::preprocess::ModelInputs;

    /// TorchScript export of the fused model. Inputs are passed as
    /// `(metadata [1, 3], image [1, S, S, 3])`.
    pub struct TorchModel {
        module: CModule,
        device: Device,
    }

    impl TorchModel {
        pub fn load(model_path: &Path) -> Result<Self, EngineError> {
            let device = Device::cuda_if_available();
            let mut module = CModule::load_on_device(model_path, device)
                .map_err(|e| EngineError::Load(e.to_string()))?;
            module.set_eval();
            log::info!("Loaded TorchScript model on {:?}", device);
            Ok(Self { module, device })
        }
    }

    impl InferenceEngine for TorchModel {
        fn forward(&mut self, inputs: &ModelInputs) -> Result<Vec<f32>, EngineError> {
            let metadata = tensor_from(inputs.metadata.as_slice(), inputs.metadata.shape())?
                .to_device(self.device);
            let image = tensor_from(inputs.image.as_slice(), inputs.image.shape())?
                .to_device(self.device);

            let output = tch::no_grad(|| self.module.forward_ts(&[metadata, image]))?;
            let output_flat = output
                .to_kind(Kind::Float)
                .to_device(Device::Cpu)
                .view([-1]);
            let num_elements = output_flat.size()[0] as usize;
            let mut output_vec = vec![0.0f32; num_elements];
            output_flat.copy_data(&mut output_vec, num_elements);
            Ok(output_vec)
        }
    }

    fn tensor_from(data: Option<&[f32]>, shape: &[usize]) -> Result<Tensor, EngineError> {
        let data = data.ok_or_else(|| {
            EngineError::Forward("input tensor is not contiguous".to_string())
        })?;
        let dims: Vec<i64> = shape.iter().map(|&d| d as i64).collect();
        Ok(Tensor::from_slice(data).view(dims.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_reported_before_any_backend() {
        let err = load_engine(Path::new("/nonexistent/model.pt")).err().unwrap();
        assert!(matches!(err, EngineError::MissingArtifact(_)));
    }

    #[cfg(not(feature = "torch"))]
    #[test]
    fn existing_artifact_without_backend_fails_to_load() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_engine(file.path()).err().unwrap();
        assert!(matches!(err, EngineError::Load(_)));
    }
}
