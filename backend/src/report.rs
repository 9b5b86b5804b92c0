use std::fmt::Write;

use shared::ClassificationResult;

/// Whole percent, truncated: 0.879 shows as 87%.
pub fn percent(confidence: f32) -> u32 {
    (confidence * 100.0) as u32
}

/// `"Downy Mildew (87%)"`
pub fn summary(result: &ClassificationResult) -> String {
    format!("{} ({}%)", result.class_name, percent(result.confidence))
}

/// Every class in label order with its share, followed by the advice for
/// the predicted class.
pub fn detailed(result: &ClassificationResult, class_names: &[String]) -> String {
    let mut text = String::from("Detailed analysis:\n\n");
    for (name, confidence) in class_names.iter().zip(&result.all_confidences) {
        let _ = writeln!(text, "{}: {}%", name, percent(*confidence));
    }
    text.push('\n');
    text.push_str(result.recommendation());
    text
}

/// Classes sorted by confidence, numbered from 1.
pub fn ranked(result: &ClassificationResult) -> String {
    let mut text = String::new();
    for (rank, (class, confidence)) in result.ranked().iter().enumerate() {
        let _ = writeln!(
            text,
            "{:>2}. {:<18} {:>6.2}%",
            rank + 1,
            class.label(),
            confidence * 100.0
        );
    }
    text
}
