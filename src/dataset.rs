// Corpus loading for batch classification
//
// Accepts the shapes the import pipeline produces: a JSON array of records,
// JSONL exports (one record per line), and YAML lists. A directory is
// scanned recursively for any supported file.

use crate::models::ToolRecord;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} as JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {} as YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported corpus format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no tool records found under {}", .0.display())]
    Empty(PathBuf),
}

/// Load tool records from a file or a directory tree.
pub fn load(path: &Path) -> Result<Vec<ToolRecord>, DatasetError> {
    let records = if path.is_dir() {
        load_dir(path)?
    } else {
        load_file(path)?
    };

    if records.is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }

    Ok(records)
}

fn load_dir(dir: &Path) -> Result<Vec<ToolRecord>, DatasetError> {
    // Sort for a deterministic record order regardless of directory layout.
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_corpus_file(p))
        .collect();
    files.sort();

    let mut records = Vec::new();
    for file in files {
        debug!("Loading corpus file: {}", file.display());
        records.extend(load_file(&file)?);
    }

    Ok(records)
}

fn load_file(path: &Path) -> Result<Vec<ToolRecord>, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match ext.as_str() {
        "json" => parse_json(path, &content),
        "jsonl" | "ndjson" => Ok(parse_jsonl(path, &content)),
        "yaml" | "yml" => parse_yaml(path, &content),
        _ => Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn is_corpus_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json") | Some("jsonl") | Some("ndjson") | Some("yaml") | Some("yml")
    )
}

/// Parse a JSON corpus: an array of records, an object wrapping one under
/// a `tools` key (the catalog export shape), or a single record.
fn parse_json(path: &Path, content: &str) -> Result<Vec<ToolRecord>, DatasetError> {
    let value: Value = serde_json::from_str(content).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let array = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tools") {
            Some(Value::Array(items)) => items,
            _ => vec![Value::Object(map)],
        },
        other => vec![other],
    };

    array
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|source| DatasetError::Json {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

/// Parse a JSONL corpus, skipping blank and malformed lines.
///
/// Exports from the old pipeline occasionally contain truncated trailing
/// lines; a warning per bad line beats failing a 10k-row batch.
fn parse_jsonl(path: &Path, content: &str) -> Vec<ToolRecord> {
    let mut records = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("{}:{}: skipping bad record: {}", path.display(), number + 1, e);
            }
        }
    }
    records
}

fn parse_yaml(path: &Path, content: &str) -> Result<Vec<ToolRecord>, DatasetError> {
    serde_yaml::from_str(content).map_err(|source| DatasetError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json_array() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "tools.json",
            r#"[{"name": "A", "description": "writing"}, {"name": "B", "category": "chatbot"}]"#,
        );
        let records = load(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[1].category.as_deref(), Some("chatbot"));
    }

    #[test]
    fn test_load_json_export_object() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "export.json",
            r#"{"tools": [{"name": "A"}], "exported_at": "2024-01-01"}"#,
        );
        let records = load(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_jsonl_skips_bad_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "tools.jsonl",
            "{\"name\": \"A\"}\n\nnot json at all\n{\"name\": \"B\"}\n",
        );
        let records = load(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_yaml_list() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "tools.yaml",
            "- name: A\n  description: video editor\n- name: B\n  category: SEO\n",
        );
        let records = load(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].category.as_deref(), Some("SEO"));
    }

    #[test]
    fn test_load_directory_is_deterministic() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "b.json", r#"[{"name": "B"}]"#);
        write_file(&dir, "a.json", r#"[{"name": "A"}]"#);
        write_file(&dir, "notes.txt", "ignored");

        let first = load(dir.path()).unwrap();
        let second = load(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].name, "A");
        assert_eq!(first[1].name, "B");
    }

    #[test]
    fn test_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "tools.csv", "name,description\n");
        assert!(matches!(
            load(&path),
            Err(DatasetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_corpus_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load(dir.path()), Err(DatasetError::Empty(_))));
    }
}
