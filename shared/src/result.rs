use serde::{Deserialize, Serialize};

use crate::class::DiseaseClass;

/// Outcome of one classification.
///
/// `all_confidences` is the model output exactly as produced, indexed like
/// [`DiseaseClass::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub class: DiseaseClass,
    pub class_name: String,
    pub confidence: f32,
    pub all_confidences: Vec<f32>,
}

impl ClassificationResult {
    /// Classes paired with their confidence, highest first. Equal
    /// confidences keep label order.
    pub fn ranked(&self) -> Vec<(DiseaseClass, f32)> {
        let mut ranked: Vec<(DiseaseClass, f32)> = DiseaseClass::ALL
            .iter()
            .copied()
            .zip(self.all_confidences.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    pub fn recommendation(&self) -> &'static str {
        self.class.recommendation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_is_descending_and_stable() {
        let result = ClassificationResult {
            class: DiseaseClass::BellyRot,
            class_name: DiseaseClass::BellyRot.label().to_string(),
            confidence: 0.4,
            all_confidences: vec![0.1, 0.1, 0.4, 0.0, 0.2, 0.2, 0.0, 0.0],
        };
        let ranked = result.ranked();
        assert_eq!(ranked.len(), 8);
        assert_eq!(ranked[0], (DiseaseClass::BellyRot, 0.4));
        assert_eq!(ranked[1], (DiseaseClass::FreshCucumber, 0.2));
        assert_eq!(ranked[2], (DiseaseClass::FreshLeaf, 0.2));
        assert_eq!(ranked[3], (DiseaseClass::Anthracnose, 0.1));
        assert_eq!(ranked[4], (DiseaseClass::BacterialWilt, 0.1));
    }
}
