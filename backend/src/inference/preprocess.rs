use image::DynamicImage;
use ndarray::{Array2, Array4};

use crate::config::{MetadataScaling, PreprocessingConfig};
use crate::error::ClassifierError;

/// The three metadata features, in the order the model was trained with.
///
/// The packing order (temperature, humidity, age) is part of the model
/// artifact's contract: a different order still runs but mispredicts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetadataFeatures {
    pub temperature: f32,
    pub humidity: f32,
    pub age: f32,
}

impl MetadataFeatures {
    /// Range checks belong to the caller; only non-finite values are refused.
    pub fn new(temperature: f32, humidity: f32, age: f32) -> Result<Self, ClassifierError> {
        for (name, value) in [
            ("temperature", temperature),
            ("humidity", humidity),
            ("age", age),
        ] {
            if !value.is_finite() {
                return Err(ClassifierError::InvalidInput(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            temperature,
            humidity,
            age,
        })
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.temperature, self.humidity, self.age]
    }

    pub fn standardize(&self, scaling: &MetadataScaling) -> [f32; 3] {
        [
            scaling.temperature.apply(self.temperature),
            scaling.humidity.apply(self.humidity),
            scaling.age.apply(self.age),
        ]
    }
}

impl From<&shared::Metadata> for MetadataFeatures {
    fn from(metadata: &shared::Metadata) -> Self {
        Self {
            temperature: metadata.temperature(),
            humidity: metadata.humidity(),
            age: metadata.age(),
        }
    }
}

/// Tensors handed to the engine for one forward pass.
#[derive(Debug, Clone)]
pub struct ModelInputs {
    /// `[1, 3]` standardized metadata.
    pub metadata: Array2<f32>,
    /// `[1, S, S, 3]` RGB in `[-1, 1]`, NHWC.
    pub image: Array4<f32>,
}

impl ModelInputs {
    pub fn prepare(
        image: &DynamicImage,
        features: &MetadataFeatures,
        config: &PreprocessingConfig,
    ) -> Result<Self, ClassifierError> {
        Ok(Self {
            metadata: metadata_tensor(features, &config.metadata),
            image: image_tensor(image, config)?,
        })
    }
}

pub fn metadata_tensor(features: &MetadataFeatures, scaling: &MetadataScaling) -> Array2<f32> {
    let [temperature, humidity, age] = features.standardize(scaling);
    Array2::from_shape_fn((1, 3), |(_, i)| [temperature, humidity, age][i])
}

/// Resizes to the square model resolution and rescales each channel from
/// `[0, 255]` to `[-1, 1]` (MobileNetV2 convention).
pub fn image_tensor(
    image: &DynamicImage,
    config: &PreprocessingConfig,
) -> Result<Array4<f32>, ClassifierError> {
    let size = config.image.size;
    let filter = config.filter()?;
    let resized = image.resize_exact(size, size, filter).to_rgb8();

    let side = size as usize;
    Ok(Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| {
        let value = resized.get_pixel(x as u32, y as u32)[c];
        (value as f32 / 255.0 - 0.5) * 2.0
    }))
}

/// Decodes an encoded image, refusing empty and zero-sized inputs.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ClassifierError> {
    if bytes.is_empty() {
        return Err(ClassifierError::InvalidInput("image is empty".to_string()));
    }
    let image = image::load_from_memory(bytes)
        .map_err(|e| ClassifierError::InvalidInput(format!("undecodable image: {}", e)))?;
    check_dimensions(image)
}

pub fn check_dimensions(image: DynamicImage) -> Result<DynamicImage, ClassifierError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ClassifierError::InvalidInput(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(image)
}
