use shared::{ClassificationResult, DiseaseClass, NUM_CLASSES};

use crate::error::InferenceError;

/// Index of the largest value; the first one wins on ties.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, max)) if v <= max => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Turns the raw output vector into a result. The vector is kept as is,
/// without re-normalization, so it must already be a distribution over
/// exactly [`NUM_CLASSES`] entries in `[0, 1]`.
pub fn interpret(confidences: Vec<f32>) -> Result<ClassificationResult, InferenceError> {
    if confidences.len() != NUM_CLASSES {
        return Err(InferenceError::MalformedOutput(format!(
            "expected {} scores, got {}",
            NUM_CLASSES,
            confidences.len()
        )));
    }
    if let Some((i, v)) = confidences
        .iter()
        .enumerate()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        return Err(InferenceError::MalformedOutput(format!(
            "score {} at index {} is not a probability",
            v, i
        )));
    }

    let predicted = argmax(&confidences)
        .and_then(DiseaseClass::from_index)
        .ok_or_else(|| InferenceError::MalformedOutput("empty output".to_string()))?;

    Ok(ClassificationResult {
        class: predicted,
        class_name: predicted.label().to_string(),
        confidence: confidences[predicted.index()],
        all_confidences: confidences,
    })
}
