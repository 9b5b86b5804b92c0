use std::path::PathBuf;

use agropredictor::{Classifier, ClassifierConfig, InputImage, PreprocessingConfig, report};
use clap::Parser;
use shared::Metadata;

/// Classify a cucumber photo together with greenhouse readings.
#[derive(Parser, Debug)]
#[command(name = "agropredictor", version)]
struct Args {
    /// Photo of the cucumber fruit or leaf
    #[arg(long)]
    image: PathBuf,

    /// Air temperature in °C (0-50)
    #[arg(long, default_value = "26.0", allow_hyphen_values = true)]
    temperature: String,

    /// Relative humidity in % (0-100)
    #[arg(long, default_value = "88.0", allow_hyphen_values = true)]
    humidity: String,

    /// Fruit age in days (0-100)
    #[arg(long, default_value = "35", allow_hyphen_values = true)]
    age: String,

    /// Model artifact, overrides AGRO_MODEL_PATH
    #[arg(long)]
    model: Option<PathBuf>,

    /// Labels artifact, overrides AGRO_LABELS_PATH
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Preprocessing YAML, overrides AGRO_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn failure(message: String) -> std::io::Error {
    log::error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    let metadata = Metadata::parse(&args.temperature, &args.humidity, &args.age)
        .map_err(|e| failure(format!("Invalid metadata: {}", e)))?;

    let mut config =
        ClassifierConfig::from_env().map_err(|e| failure(format!("Configuration: {}", e)))?;
    if let Some(model) = args.model {
        config.model_path = model;
    }
    if let Some(labels) = args.labels {
        config.labels_path = labels;
    }
    if let Some(path) = args.config {
        config.preprocessing = PreprocessingConfig::load(&path)
            .map_err(|e| failure(format!("Configuration: {}", e)))?;
    }

    let classifier =
        Classifier::load(&config).map_err(|e| failure(format!("Model loading failed: {}", e)))?;

    let image = InputImage::from_path(&args.image).map_err(|e| {
        failure(format!(
            "Could not read image {}: {}",
            args.image.display(),
            e
        ))
    })?;

    let result = classifier
        .classify_metadata(image, &metadata)
        .map_err(|e| failure(e.to_string()))?
        .await
        .map_err(|e| failure(e.to_string()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| failure(format!("Could not serialize result: {}", e)))?;
        println!("{}", json);
    } else {
        println!("{}\n", report::summary(&result));
        println!("{}", report::detailed(&result, &classifier.class_names()));
        println!("\nRanking:\n{}", report::ranked(&result));
    }
    Ok(())
}
