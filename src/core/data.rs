//! Shared RON loading helpers for the `assets/data` tree.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// Root directory of all data files.
pub const DATA_ROOT: &str = "assets/data";

/// Read and parse a single RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::read(path, e))?;
    parse_ron(path, &contents)
}

/// Parse RON text, attributing errors to `path`.
pub fn parse_ron<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::parse(path, e))
}

/// Load every `.ron` file in a directory, keyed by file stem.
///
/// Files that fail to load are logged and skipped; a missing directory
/// yields an empty list.
pub fn load_ron_dir<T: DeserializeOwned>(dir: impl AsRef<Path>) -> Vec<(String, T)> {
    let dir = dir.as_ref();

    if !dir.exists() {
        warn!("Data directory not found: {:?}", dir);
        return Vec::new();
    }

    let Ok(entries) = fs::read_dir(dir) else {
        warn!("Failed to read data directory {:?}", dir);
        return Vec::new();
    };

    let mut loaded = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_ron::<T>(&path) {
            Ok(value) => loaded.push((stem, value)),
            Err(e) => error!("{}", e),
        }
    }

    // read_dir order is platform dependent
    loaded.sort_by(|a, b| a.0.cmp(&b.0));
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn parses_ron_text() {
        let sample: Sample =
            parse_ron(Path::new("sample.ron"), r#"(name: "letter", count: 2)"#).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "letter".into(),
                count: 2
            }
        );
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = parse_ron::<Sample>(Path::new("broken.ron"), "(name: ").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { ref path, .. } if path == "broken.ron"));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = load_ron::<Sample>("assets/data/does_not_exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let loaded: Vec<(String, Sample)> = load_ron_dir("assets/data/no_such_dir");
        assert!(loaded.is_empty());
    }
}
