//! parasim ingest layer
//!
//! This is where documents enter the paraphrase detector. The crate owns the
//! engine's input contract ([`RawDocument`] + [`Label`]) and a thin adapter
//! that turns a directory of text files into that contract.
//!
//! ## What we do here
//!
//! - **Label by file name** - `*-original.txt` and `*-paraphrase.txt` by
//!   default, see [`IngestConfig`].
//! - **Read text** - every matching file is read whole as UTF-8; its file
//!   name becomes the document id.
//! - **Check the corpus** - ids must be non-empty and unique.
//! - **Log it** - structured events via `tracing`.
//!
//! Nothing here retries. A failure is returned to the caller as an
//! [`IngestError`] and the batch does not start.
//!
//! ## Example
//!
//! ```no_run
//! use ingest::{load_directory, IngestConfig};
//!
//! let docs = load_directory("data/", &IngestConfig::default()).unwrap();
//! println!("loaded {} documents", docs.len());
//! ```
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn, Level};

mod config;
mod error;
mod types;

pub use crate::config::IngestConfig;
pub use crate::error::IngestError;
pub use crate::types::{Label, RawDocument};

/// Read every labeled file directly under `dir`.
///
/// Files are visited in file-name order so the returned corpus, and therefore
/// every downstream stage, is reproducible. Sub-directories and files that
/// match neither suffix are skipped.
pub fn load_directory(
    dir: impl AsRef<Path>,
    cfg: &IngestConfig,
) -> Result<Vec<RawDocument>, IngestError> {
    let start = Instant::now();
    let dir = dir.as_ref();
    cfg.validate()?;

    let span = tracing::span!(Level::INFO, "ingest.load_directory", dir = %dir.display());
    let _guard = span.enter();

    if !dir.is_dir() {
        warn!(dir = %dir.display(), "ingest_failure");
        return Err(IngestError::NotADirectory(dir.display().to_string()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| IngestError::io(dir, &e))? {
        let entry = entry.map_err(|e| IngestError::io(dir, &e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!(path = %path.display(), "skipping non-utf8 file name");
            continue;
        };
        match cfg.label_for_file_name(file_name) {
            Some(label) => entries.push((file_name.to_string(), label, path.clone())),
            None => debug!(file_name, "skipping unlabeled file"),
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut docs = Vec::with_capacity(entries.len());
    for (file_name, label, path) in entries {
        let text = read_text(&path, cfg.max_file_bytes)?;
        docs.push(RawDocument {
            id: file_name,
            label,
            text,
        });
    }

    validate_corpus(&docs)?;

    let originals = docs.iter().filter(|d| d.label == Label::Original).count();
    info!(
        documents = docs.len(),
        originals,
        paraphrases = docs.len() - originals,
        elapsed_micros = start.elapsed().as_micros(),
        "ingest_success"
    );
    Ok(docs)
}

/// Check the engine's input invariants: non-empty, unique ids.
pub fn validate_corpus(docs: &[RawDocument]) -> Result<(), IngestError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(docs.len());
    for doc in docs {
        if doc.id.trim().is_empty() {
            return Err(IngestError::EmptyId);
        }
        if !seen.insert(doc.id.as_str()) {
            return Err(IngestError::DuplicateId(doc.id.clone()));
        }
    }
    Ok(())
}

fn read_text(path: &Path, max_bytes: Option<usize>) -> Result<String, IngestError> {
    let bytes = fs::read(path).map_err(|e| IngestError::io(path, &e))?;
    if let Some(limit) = max_bytes {
        if bytes.len() > limit {
            return Err(IngestError::FileTooLarge {
                path: path.display().to_string(),
                size: bytes.len(),
                limit,
            });
        }
    }
    String::from_utf8(bytes).map_err(|_| IngestError::InvalidUtf8(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_labeled_files_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b-paraphrase.txt"), "a cat was sitting").unwrap();
        fs::write(dir.path().join("a-original.txt"), "the cat sat").unwrap();
        fs::write(dir.path().join("readme.md"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested-original.txt")).unwrap();

        let docs = load_directory(dir.path(), &IngestConfig::default()).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a-original.txt");
        assert_eq!(docs[0].label, Label::Original);
        assert_eq!(docs[0].text, "the cat sat");
        assert_eq!(docs[1].id, "b-paraphrase.txt");
        assert_eq!(docs[1].label, Label::Paraphrase);
    }

    #[test]
    fn empty_directory_yields_empty_corpus() {
        let dir = tempdir().unwrap();
        let docs = load_directory(dir.path(), &IngestConfig::default()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = load_directory(&missing, &IngestConfig::default()).unwrap_err();
        assert!(matches!(err, IngestError::NotADirectory(_)));
    }

    #[test]
    fn non_utf8_file_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x-original.txt"), [0xff, 0xfe, 0x00]).unwrap();
        let err = load_directory(dir.path(), &IngestConfig::default()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidUtf8(_)));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x-original.txt"), "0123456789").unwrap();
        let cfg = IngestConfig {
            max_file_bytes: Some(4),
            ..Default::default()
        };
        let err = load_directory(dir.path(), &cfg).unwrap_err();
        assert!(matches!(
            err,
            IngestError::FileTooLarge {
                size: 10,
                limit: 4,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let docs = vec![
            RawDocument::new("a", Label::Original, "x"),
            RawDocument::new("a", Label::Paraphrase, "y"),
        ];
        assert_eq!(
            validate_corpus(&docs),
            Err(IngestError::DuplicateId("a".into()))
        );
    }

    #[test]
    fn blank_id_rejected() {
        let docs = vec![RawDocument::new("  ", Label::Original, "x")];
        assert_eq!(validate_corpus(&docs), Err(IngestError::EmptyId));
    }
}
