use derive_more::Display;
use serde::Serialize;
use std::ops::RangeInclusive;

/// Accepted air temperature, in °C.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=50.0;
/// Accepted relative humidity, in %.
pub const HUMIDITY_RANGE: RangeInclusive<f32> = 0.0..=100.0;
/// Accepted fruit age, in days.
pub const AGE_RANGE: RangeInclusive<f32> = 0.0..=100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MetadataField {
    #[display(fmt = "temperature")]
    Temperature,
    #[display(fmt = "humidity")]
    Humidity,
    #[display(fmt = "fruit age")]
    Age,
}

impl MetadataField {
    pub fn range(self) -> &'static RangeInclusive<f32> {
        match self {
            MetadataField::Temperature => &TEMPERATURE_RANGE,
            MetadataField::Humidity => &HUMIDITY_RANGE,
            MetadataField::Age => &AGE_RANGE,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetadataField::Temperature => "°C",
            MetadataField::Humidity => "%",
            MetadataField::Age => "days",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetadataError {
    #[error("{field} is not a number: {input:?}")]
    NotANumber { field: MetadataField, input: String },
    #[error("{field} must be a finite number")]
    NotFinite { field: MetadataField },
    #[error("{field} must be between {min} and {max} {unit}, got {value}")]
    OutOfRange {
        field: MetadataField,
        value: f32,
        min: f32,
        max: f32,
        unit: &'static str,
    },
}

/// Environmental readings that accompany a cucumber photo.
///
/// Only constructible through [`Metadata::new`] or [`Metadata::parse`], so a
/// value of this type is always finite and inside the accepted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metadata {
    temperature: f32,
    humidity: f32,
    age: f32,
}

impl Metadata {
    pub fn new(temperature: f32, humidity: f32, age: f32) -> Result<Self, MetadataError> {
        Ok(Self {
            temperature: check(MetadataField::Temperature, temperature)?,
            humidity: check(MetadataField::Humidity, humidity)?,
            age: check(MetadataField::Age, age)?,
        })
    }

    /// Parses form input. Surrounding whitespace is ignored.
    pub fn parse(temperature: &str, humidity: &str, age: &str) -> Result<Self, MetadataError> {
        Self::new(
            parse_field(MetadataField::Temperature, temperature)?,
            parse_field(MetadataField::Humidity, humidity)?,
            parse_field(MetadataField::Age, age)?,
        )
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    pub fn age(&self) -> f32 {
        self.age
    }
}

impl Default for Metadata {
    /// Typical greenhouse conditions, used to prefill the input form.
    fn default() -> Self {
        Self {
            temperature: 26.0,
            humidity: 88.0,
            age: 35.0,
        }
    }
}

fn check(field: MetadataField, value: f32) -> Result<f32, MetadataError> {
    if !value.is_finite() {
        return Err(MetadataError::NotFinite { field });
    }
    let range = field.range();
    if !range.contains(&value) {
        return Err(MetadataError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
            unit: field.unit(),
        });
    }
    Ok(value)
}

fn parse_field(field: MetadataField, input: &str) -> Result<f32, MetadataError> {
    input
        .trim()
        .parse::<f32>()
        .map_err(|_| MetadataError::NotANumber {
            field,
            input: input.to_string(),
        })
}
