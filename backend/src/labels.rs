use std::path::Path;

use shared::{DiseaseClass, NUM_CLASSES};

use crate::config::ConfigError;

/// Reads the labels artifact shipped with the model and checks that it
/// lists exactly the known classes, in output-channel order.
pub fn load_labels(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let labels = parse_labels(&contents);
    verify_labels(&labels)?;
    Ok(labels)
}

/// One label per line; blank lines are skipped.
pub fn parse_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn verify_labels(labels: &[String]) -> Result<(), ConfigError> {
    if labels.len() != NUM_CLASSES {
        return Err(ConfigError::Labels(format!(
            "expected {} labels, found {}",
            NUM_CLASSES,
            labels.len()
        )));
    }
    for (i, (found, expected)) in labels.iter().zip(DiseaseClass::ALL).enumerate() {
        if found != expected.label() {
            return Err(ConfigError::Labels(format!(
                "label {} is '{}', expected '{}'",
                i,
                found,
                expected.label()
            )));
        }
    }
    Ok(())
}

pub fn builtin_labels() -> Vec<String> {
    DiseaseClass::ALL
        .iter()
        .map(|class| class.label().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_labels_match_classes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/labels.txt");
        assert_eq!(load_labels(&path).unwrap(), builtin_labels());
    }

    #[test]
    fn blank_lines_and_padding_are_ignored() {
        let contents = format!("\n  {}  \n\n", builtin_labels().join("\r\n"));
        assert_eq!(parse_labels(&contents), builtin_labels());
    }

    #[test]
    fn reordered_labels_are_rejected() {
        let mut labels = builtin_labels();
        labels.swap(4, 5);
        let err = verify_labels(&labels).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Labels mismatch: label 4 is 'Fresh Leaf', expected 'Fresh Cucumber'"
        );
    }

    #[test]
    fn missing_label_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut labels = builtin_labels();
        labels.pop();
        write!(file, "{}", labels.join("\n")).unwrap();
        assert!(matches!(
            load_labels(file.path()),
            Err(ConfigError::Labels(_))
        ));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        assert!(matches!(
            load_labels(Path::new("/nonexistent/labels.txt")),
            Err(ConfigError::Io { .. })
        ));
    }
}
