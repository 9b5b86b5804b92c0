use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::thread;
use std::time::Instant;

use image::DynamicImage;
use shared::{ClassificationResult, Metadata};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::config::{ClassifierConfig, ConfigError, PreprocessingConfig};
use crate::error::{ClassifierError, InferenceError};
use crate::inference::model::{self, InferenceEngine};
use crate::inference::postprocess;
use crate::inference::preprocess::{self, MetadataFeatures, ModelInputs};
use crate::labels;

/// Image handed to [`Classifier::classify`].
pub enum InputImage {
    /// Encoded bytes (JPEG, PNG, ...) as produced by a camera or cropper.
    Encoded(Vec<u8>),
    Decoded(DynamicImage),
}

impl InputImage {
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        std::fs::read(path).map(InputImage::Encoded)
    }

    fn decode(self) -> Result<DynamicImage, ClassifierError> {
        match self {
            InputImage::Encoded(bytes) => preprocess::decode_image(&bytes),
            InputImage::Decoded(image) => preprocess::check_dimensions(image),
        }
    }
}

impl From<Vec<u8>> for InputImage {
    fn from(bytes: Vec<u8>) -> Self {
        InputImage::Encoded(bytes)
    }
}

impl From<DynamicImage> for InputImage {
    fn from(image: DynamicImage) -> Self {
        InputImage::Decoded(image)
    }
}

/// Facade over the fused image + metadata model.
///
/// Built once and cloned into whatever issues classifications; clones share
/// the loaded model. Each call runs on its own worker thread. Forward passes
/// are serialized through a mutex because the engine is not assumed to be
/// safe for concurrent use, so concurrent calls queue on the model while
/// their preprocessing still runs in parallel.
#[derive(Clone)]
pub struct Classifier {
    inner: Arc<Inner>,
}

struct Inner {
    engine: Mutex<Box<dyn InferenceEngine>>,
    preprocessing: PreprocessingConfig,
    class_names: Vec<String>,
}

impl Classifier {
    /// Loads the labels and model artifacts named by `config`.
    pub fn load(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        config.preprocessing.validate()?;
        let class_names = labels::load_labels(&config.labels_path)?;
        let engine = model::load_engine(&config.model_path).map_err(ConfigError::ModelLoad)?;

        log::info!(
            "Loaded model {} with {} classes",
            config.model_path.display(),
            class_names.len()
        );
        Ok(Self::from_parts(
            engine,
            config.preprocessing.clone(),
            class_names,
        ))
    }

    /// Wraps an already loaded engine, using the built-in label order.
    pub fn with_engine<E: InferenceEngine>(
        engine: E,
        preprocessing: PreprocessingConfig,
    ) -> Result<Self, ClassifierError> {
        preprocessing.validate()?;
        Ok(Self::from_parts(
            Box::new(engine),
            preprocessing,
            labels::builtin_labels(),
        ))
    }

    fn from_parts(
        engine: Box<dyn InferenceEngine>,
        preprocessing: PreprocessingConfig,
        class_names: Vec<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                engine: Mutex::new(engine),
                preprocessing,
                class_names,
            }),
        }
    }

    /// Labels in the order of [`ClassificationResult::all_confidences`].
    pub fn class_names(&self) -> Vec<String> {
        self.inner.class_names.clone()
    }

    /// Starts one classification.
    ///
    /// Empty or undecodable images and non-finite metadata are refused here,
    /// before any work is scheduled. Everything after that, including
    /// inference failures, is delivered exactly once through the returned
    /// [`PendingClassification`]. Metadata ranges are not checked; build a
    /// [`Metadata`] for that.
    pub fn classify(
        &self,
        image: InputImage,
        temperature: f32,
        humidity: f32,
        age: f32,
    ) -> Result<PendingClassification, ClassifierError> {
        let features = MetadataFeatures::new(temperature, humidity, age)?;
        let image = image.decode()?;
        Ok(self.spawn(image, features))
    }

    pub fn classify_metadata(
        &self,
        image: InputImage,
        metadata: &Metadata,
    ) -> Result<PendingClassification, ClassifierError> {
        let image = image.decode()?;
        Ok(self.spawn(image, MetadataFeatures::from(metadata)))
    }

    fn spawn(&self, image: DynamicImage, features: MetadataFeatures) -> PendingClassification {
        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        let inner = Arc::clone(&self.inner);

        let spawned = thread::Builder::new()
            .name("agro-classify".to_string())
            .spawn(move || {
                let outcome = inner.run(id, &image, &features);
                if let Err(e) = &outcome {
                    log::error!("[{}] Classification failed: {}", id, e);
                }
                if tx.send(outcome).is_err() {
                    log::debug!("[{}] Result dropped, caller is gone", id);
                }
            });

        match spawned {
            Ok(_) => PendingClassification {
                id,
                state: State::Running(rx),
            },
            Err(e) => {
                log::error!("[{}] Failed to spawn classification worker: {}", id, e);
                PendingClassification {
                    id,
                    state: State::Failed(Some(InferenceError::Spawn(e).into())),
                }
            }
        }
    }
}

impl Inner {
    fn run(
        &self,
        id: Uuid,
        image: &DynamicImage,
        features: &MetadataFeatures,
    ) -> Result<ClassificationResult, ClassifierError> {
        let started = Instant::now();
        let inputs = ModelInputs::prepare(image, features, &self.preprocessing)?;
        log::debug!(
            "[{}] Metadata {:?} -> normalized {:?}",
            id,
            features.to_array(),
            inputs.metadata.as_slice()
        );

        let output = {
            let mut engine = self.engine.lock().unwrap_or_else(|poisoned| {
                log::warn!("[{}] Model lock poisoned by an earlier panic, reusing it", id);
                poisoned.into_inner()
            });
            engine.forward(&inputs)?
        };
        log::debug!("[{}] Scores: {:?}", id, output);

        let result = postprocess::interpret(output)?;
        log::info!(
            "[{}] Predicted {} ({:.2}%) in {:?}",
            id,
            result.class_name,
            result.confidence * 100.0,
            started.elapsed()
        );
        Ok(result)
    }
}

/// Result of a [`Classifier::classify`] call that has not been delivered yet.
///
/// Await it from async code, or call [`PendingClassification::wait`] from a
/// plain thread. Dropping it does not stop the worker.
pub struct PendingClassification {
    id: Uuid,
    state: State,
}

enum State {
    Running(oneshot::Receiver<Result<ClassificationResult, ClassifierError>>),
    Failed(Option<ClassifierError>),
}

impl PendingClassification {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Blocks the current thread until the result arrives. Must not be
    /// called from within an async runtime.
    pub fn wait(self) -> Result<ClassificationResult, ClassifierError> {
        match self.state {
            State::Running(rx) => rx
                .blocking_recv()
                .unwrap_or_else(|_| Err(InferenceError::WorkerLost.into())),
            State::Failed(err) => Err(err.unwrap_or_else(|| InferenceError::WorkerLost.into())),
        }
    }
}

impl Future for PendingClassification {
    type Output = Result<ClassificationResult, ClassifierError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Running(rx) => Pin::new(rx)
                .poll(cx)
                .map(|received| received.unwrap_or_else(|_| Err(InferenceError::WorkerLost.into()))),
            State::Failed(err) => Poll::Ready(Err(err
                .take()
                .unwrap_or_else(|| InferenceError::WorkerLost.into()))),
        }
    }
}
