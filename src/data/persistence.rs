use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --data-dir argument.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

pub fn set_data_dir(path: PathBuf) {
    let _ = DATA_DIR.set(path);
}

pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_data_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

pub fn get_file_path(name: &str) -> Result<PathBuf> {
    Ok(get_data_dir()?.join(name))
}

/// On-disk encoding, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn for_file(name: &str) -> Self {
        if name.ends_with(".json") {
            FileFormat::Json
        } else {
            FileFormat::Yaml
        }
    }

    fn decode<T: DeserializeOwned>(self, contents: &str, path: &Path) -> Result<T> {
        match self {
            FileFormat::Json => serde_json::from_str(contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display())),
            FileFormat::Yaml => serde_norway::from_str(contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display())),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            FileFormat::Json => {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            }
            FileFormat::Yaml => serde_norway::to_string(value).context("failed to serialize YAML"),
        }
    }
}

/// A document stored as one file in the data directory. A missing file
/// loads as `Default`.
pub trait Persistable: Sized + Default + Serialize + DeserializeOwned {
    fn filename() -> &'static str;

    fn file_format() -> FileFormat {
        FileFormat::for_file(Self::filename())
    }

    fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    fn save(&self) -> Result<()> {
        self.save_to(&get_data_dir()?)
    }

    /// Load from an explicit directory, bypassing the global `DATA_DIR`.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::file_format().decode(&contents, &path)
    }

    /// Save to an explicit directory, bypassing the global `DATA_DIR`.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = Self::file_format().encode(self)?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct JsonDoc {
        value: String,
    }

    impl Persistable for JsonDoc {
        fn filename() -> &'static str {
            "doc.json"
        }
    }

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct YamlDoc {
        count: u32,
    }

    impl Persistable for YamlDoc {
        fn filename() -> &'static str {
            "doc.yaml"
        }
    }

    #[test]
    fn test_get_data_dir_returns_a_path() {
        // Either the fallback cwd/config or whatever a prior test set.
        assert!(get_data_dir().is_ok());
    }

    #[test]
    fn test_get_file_path_appends_filename() {
        let path = get_file_path("picker.yaml").unwrap();
        assert!(path.ends_with("picker.yaml"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::for_file("a.json"), FileFormat::Json);
        assert_eq!(FileFormat::for_file("picker.yaml"), FileFormat::Yaml);
        assert_eq!(JsonDoc::file_format(), FileFormat::Json);
        assert_eq!(YamlDoc::file_format(), FileFormat::Yaml);
    }

    #[test]
    fn test_load_from_returns_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let result = JsonDoc::load_from(tmp.path()).unwrap();
        assert_eq!(result, JsonDoc::default());
    }

    #[test]
    fn test_json_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let data = JsonDoc {
            value: "round-trip".to_string(),
        };
        data.save_to(tmp.path()).unwrap();
        assert_eq!(JsonDoc::load_from(tmp.path()).unwrap(), data);
    }

    #[test]
    fn test_yaml_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let data = YamlDoc { count: 99 };
        data.save_to(tmp.path()).unwrap();
        let written = fs::read_to_string(tmp.path().join("doc.yaml")).unwrap();
        assert!(written.contains("count: 99"));
        assert_eq!(YamlDoc::load_from(tmp.path()).unwrap(), data);
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let data = JsonDoc {
            value: "nested".to_string(),
        };
        data.save_to(&nested).unwrap();
        assert_eq!(JsonDoc::load_from(&nested).unwrap(), data);
    }

    #[test]
    fn test_parse_error_names_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("doc.json"), "{ not json").unwrap();
        let err = JsonDoc::load_from(tmp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("doc.json"));
    }
}
