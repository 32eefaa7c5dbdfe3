//! YAML configuration file support for parasim
//!
//! Every engine knob can be set from one YAML file. The file is optional: any
//! section or field left out falls back to the built-in default, and the CLI
//! can override individual values afterwards.
//!
//! Parallelism is one switch: the top-level `use_parallel` is copied into
//! every stage, and a `use_parallel` key inside a stage section is ignored.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "quora-paraphrase"
//! use_parallel: true         # applies to every stage
//!
//! input:
//!   dir: "data/"
//!   original_suffix: "-original.txt"
//!   paraphrase_suffix: "-paraphrase.txt"
//!   max_file_bytes: 1048576
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!   stopwords: english        # english | none
//!   extra_stopwords: ["etc"]
//!   stopwords_file: null      # newline-delimited, replaces the base list
//!
//! perceptual:
//!   version: 1
//!   num_hashes: 64
//!   seed: 17293822569102704557
//!   vocabulary_source: filtered
//!
//! index:
//!   num_bands: 32
//!
//! matcher:
//!   distance_threshold: 0.8
//!   top_k: 10
//!
//! output:
//!   csv: "paraphrases.csv"
//!   table: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use canonical::{CanonicalizeConfig, StopWordSource};
use index::BandConfig;
use ingest::IngestConfig;
use matcher::MatchConfig;
use perceptual::PerceptualConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PipelineConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to read stop-word file {path}: {message}")]
    StopwordsFile { path: String, message: String },

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParasimConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Run every stage on the rayon pool. Overrides any per-section
    /// `use_parallel`.
    #[serde(default = "true_value")]
    pub use_parallel: bool,

    #[serde(default)]
    pub input: InputYamlConfig,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub perceptual: PerceptualConfig,

    #[serde(default)]
    pub index: BandConfig,

    #[serde(default)]
    pub matcher: MatchConfig,

    #[serde(default)]
    pub output: OutputYamlConfig,
}

impl ParasimConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ParasimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.input
            .ingest_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("input: {e}")))?;
        self.canonical.validate()?;
        self.perceptual
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("perceptual: {e}")))?;
        self.index
            .validate_for(self.perceptual.num_hashes)
            .map_err(|e| ConfigLoadError::Validation(format!("index: {e}")))?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("matcher: {e}")))?;
        Ok(())
    }

    /// Engine configuration described by this file.
    ///
    /// Reads the stop-word file when one is configured. The top-level
    /// `use_parallel` is applied to every stage, replacing whatever the
    /// stage sections carry.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigLoadError> {
        let cfg = PipelineConfig {
            canonical: self.canonical.canonicalize_config()?,
            perceptual: self.perceptual.clone(),
            index: self.index.clone(),
            matcher: self.matcher.clone(),
        }
        .with_parallel(self.use_parallel);
        cfg.validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        Ok(cfg)
    }
}

impl Default for ParasimConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            use_parallel: true,
            input: InputYamlConfig::default(),
            canonical: CanonicalYamlConfig::default(),
            perceptual: PerceptualConfig::default(),
            index: BandConfig::default(),
            matcher: MatchConfig::default(),
            output: OutputYamlConfig::default(),
        }
    }
}

/// Input directory YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputYamlConfig {
    /// Directory holding the labeled text files.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_original_suffix")]
    pub original_suffix: String,

    #[serde(default = "default_paraphrase_suffix")]
    pub paraphrase_suffix: String,

    #[serde(default)]
    pub max_file_bytes: Option<usize>,
}

impl InputYamlConfig {
    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig {
            original_suffix: self.original_suffix.clone(),
            paraphrase_suffix: self.paraphrase_suffix.clone(),
            max_file_bytes: self.max_file_bytes,
            ..IngestConfig::default()
        }
    }
}

impl Default for InputYamlConfig {
    fn default() -> Self {
        Self {
            dir: None,
            original_suffix: default_original_suffix(),
            paraphrase_suffix: default_paraphrase_suffix(),
            max_file_bytes: None,
        }
    }
}

/// Base stop-word list named in YAML.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopwordBase {
    #[default]
    English,
    None,
}

/// Canonicalization stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub normalize_unicode: bool,

    #[serde(default)]
    pub stopwords: StopwordBase,

    /// Added on top of the base list (or the file).
    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    /// Newline-delimited stop-word file. Replaces `stopwords` when set.
    #[serde(default)]
    pub stopwords_file: Option<PathBuf>,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.version must be >= 1".to_string(),
            ));
        }
        if self.extra_stopwords.iter().any(|w| w.trim().is_empty()) {
            return Err(ConfigLoadError::Validation(
                "canonical.extra_stopwords must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the stop-word settings into a [`CanonicalizeConfig`].
    pub fn canonicalize_config(&self) -> Result<CanonicalizeConfig, ConfigLoadError> {
        let extra = self.extra_stopwords.clone();
        let stopwords = match (&self.stopwords_file, self.stopwords) {
            (Some(path), _) => {
                let mut words = load_stopwords_file(path)?;
                words.extend(extra);
                StopWordSource::Custom(words)
            }
            (None, StopwordBase::English) if extra.is_empty() => StopWordSource::English,
            (None, StopwordBase::English) => StopWordSource::EnglishPlus(extra),
            (None, StopwordBase::None) if extra.is_empty() => StopWordSource::None,
            (None, StopwordBase::None) => StopWordSource::Custom(extra),
        };
        Ok(CanonicalizeConfig {
            version: self.version,
            normalize_unicode: self.normalize_unicode,
            stopwords,
        })
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            stopwords: StopwordBase::English,
            extra_stopwords: Vec::new(),
            stopwords_file: None,
        }
    }
}

/// Output YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputYamlConfig {
    /// CSV file results are appended to.
    #[serde(default)]
    pub csv: Option<PathBuf>,

    /// Print the ranked table to stdout.
    #[serde(default = "true_value")]
    pub table: bool,
}

impl Default for OutputYamlConfig {
    fn default() -> Self {
        Self {
            csv: None,
            table: true,
        }
    }
}

/// Read a newline-delimited stop-word list.
///
/// Blank lines and lines starting with `#` are skipped; surrounding
/// whitespace is trimmed.
pub fn load_stopwords_file(path: &Path) -> Result<Vec<String>, ConfigLoadError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigLoadError::StopwordsFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_original_suffix() -> String {
    IngestConfig::default().original_suffix
}
fn default_paraphrase_suffix() -> String {
    IngestConfig::default().paraphrase_suffix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test"
perceptual:
  num_hashes: 128
index:
  num_bands: 16
matcher:
  distance_threshold: 0.5
  top_k: 3
"#;
        let config = ParasimConfig::from_yaml(yaml).expect("valid yaml");
        assert_eq!(config.name.as_deref(), Some("test"));
        assert_eq!(config.perceptual.num_hashes, 128);
        assert_eq!(config.perceptual.seed, PerceptualConfig::default().seed);
        assert_eq!(config.index.num_bands, 16);
        assert_eq!(config.matcher.top_k, 3);
        assert!(config.use_parallel);
        assert!(config.output.table);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "version: \"1.0\"\ninput:\n  dir: corpus/\n").unwrap();
        let config = ParasimConfig::from_file(file.path()).expect("load from file");
        assert_eq!(config.input.dir, Some(PathBuf::from("corpus/")));
        assert_eq!(config.input.original_suffix, "-original.txt");
    }

    #[test]
    fn test_default_config() {
        let config = ParasimConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.validate().is_ok());
        let pipeline = config.pipeline_config().unwrap();
        assert_eq!(pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_top_level_parallel_switch_wins() {
        let yaml = r#"
version: "1.0"
use_parallel: false
perceptual:
  use_parallel: true
index:
  use_parallel: true
matcher:
  use_parallel: true
"#;
        let pipeline = ParasimConfig::from_yaml(yaml)
            .unwrap()
            .pipeline_config()
            .unwrap();
        assert!(!pipeline.perceptual.use_parallel);
        assert!(!pipeline.index.use_parallel);
        assert!(!pipeline.matcher.use_parallel);

        let yaml = "version: \"1.0\"\nmatcher:\n  use_parallel: false\n";
        let pipeline = ParasimConfig::from_yaml(yaml)
            .unwrap()
            .pipeline_config()
            .unwrap();
        assert!(pipeline.matcher.use_parallel);
    }

    #[test]
    fn test_unsupported_version() {
        let err = ParasimConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_indivisible_banding_rejected() {
        let yaml = "version: \"1.0\"\nperceptual:\n  num_hashes: 64\nindex:\n  num_bands: 5\n";
        let err = ParasimConfig::from_yaml(yaml).unwrap_err();
        match err {
            ConfigLoadError::Validation(msg) => assert!(msg.contains("index")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let yaml = "version: \"1.0\"\nmatcher:\n  distance_threshold: 1.5\n";
        assert!(matches!(
            ParasimConfig::from_yaml(yaml),
            Err(ConfigLoadError::Validation(_))
        ));
    }

    #[test]
    fn test_stopword_resolution() {
        let mut cfg = CanonicalYamlConfig::default();
        assert_eq!(
            cfg.canonicalize_config().unwrap().stopwords,
            StopWordSource::English
        );

        cfg.extra_stopwords = vec!["etc".into()];
        assert_eq!(
            cfg.canonicalize_config().unwrap().stopwords,
            StopWordSource::EnglishPlus(vec!["etc".into()])
        );

        cfg.stopwords = StopwordBase::None;
        assert_eq!(
            cfg.canonicalize_config().unwrap().stopwords,
            StopWordSource::Custom(vec!["etc".into()])
        );

        cfg.extra_stopwords.clear();
        assert_eq!(
            cfg.canonicalize_config().unwrap().stopwords,
            StopWordSource::None
        );
    }

    #[test]
    fn test_stopwords_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# articles\nthe\n  a  \n\non\nwas").unwrap();

        let words = load_stopwords_file(file.path()).unwrap();
        assert_eq!(words, vec!["the", "a", "on", "was"]);

        let cfg = CanonicalYamlConfig {
            stopwords_file: Some(file.path().to_path_buf()),
            extra_stopwords: vec!["cat".into()],
            ..Default::default()
        };
        assert_eq!(
            cfg.canonicalize_config().unwrap().stopwords,
            StopWordSource::Custom(vec![
                "the".into(),
                "a".into(),
                "on".into(),
                "was".into(),
                "cat".into()
            ])
        );
    }

    #[test]
    fn test_missing_stopwords_file() {
        let cfg = CanonicalYamlConfig {
            stopwords_file: Some(PathBuf::from("/definitely/not/here.txt")),
            ..Default::default()
        };
        assert!(matches!(
            cfg.canonicalize_config(),
            Err(ConfigLoadError::StopwordsFile { .. })
        ));
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let config = ParasimConfig {
            name: Some("roundtrip".into()),
            use_parallel: false,
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        let back = ParasimConfig::from_yaml(&yaml).unwrap();
        assert_eq!(back.name.as_deref(), Some("roundtrip"));
        assert!(!back.use_parallel);
        assert_eq!(back.perceptual, config.perceptual);
        assert_eq!(back.matcher, config.matcher);
    }
}
