//! Train/test index manifests
//!
//! Each manifest is a CSV with a header row and at least a file-name column
//! and an integer class column.

use iegm_core::{IegmError, IegmResult, Partition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

const NAME_HEADERS: [&str; 5] = ["filename", "file name", "file_name", "name", "file"];
const LABEL_HEADERS: [&str; 2] = ["label", "class"];

/// One (file name, coarse class) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file_name: String,
    pub class: u8,
}

/// Insertion-ordered file name → class table for one partition
#[derive(Debug, Clone)]
pub struct Manifest {
    partition: Partition,
    entries: Vec<ManifestEntry>,
    index: HashMap<String, usize>,
}

impl Manifest {
    pub fn new(partition: Partition) -> Self {
        Manifest {
            partition,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add an entry; a repeated name replaces the earlier class in place
    pub fn insert(&mut self, file_name: impl Into<String>, class: u8) {
        let file_name = file_name.into();

        if let Some(&position) = self.index.get(&file_name) {
            self.entries[position].class = class;
            return;
        }

        self.index.insert(file_name.clone(), self.entries.len());
        self.entries.push(ManifestEntry { file_name, class });
    }

    /// Load a manifest CSV
    pub fn from_path(path: &Path, partition: Partition) -> IegmResult<Self> {
        if !path.is_file() {
            return Err(IegmError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| IegmError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let manifest = Self::from_reader(file, partition, path)?;
        debug!(path = %path.display(), entries = manifest.len(), "loaded manifest");

        Ok(manifest)
    }

    /// Parse manifest CSV from any reader; `source` is used in error messages
    pub fn from_reader<R: Read>(reader: R, partition: Partition, source: &Path) -> IegmResult<Self> {
        let manifest_error = |record: Option<u64>, reason: String| IegmError::Manifest {
            path: source.to_path_buf(),
            record,
            reason,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| manifest_error(None, e.to_string()))?
            .clone();
        let (name_col, label_col) = resolve_columns(&headers);

        let mut manifest = Manifest::new(partition);

        for (i, result) in reader.records().enumerate() {
            let record_no = i as u64 + 1;
            let record = result.map_err(|e| manifest_error(Some(record_no), e.to_string()))?;

            // Skip blank trailing lines
            if record.iter().all(str::is_empty) {
                continue;
            }

            let name = record.get(name_col).unwrap_or_default();
            if name.is_empty() {
                return Err(manifest_error(Some(record_no), "empty file name".to_string()));
            }

            let label = record.get(label_col).unwrap_or_default();
            let class = label.parse::<u8>().map_err(|_| {
                manifest_error(Some(record_no), format!("label '{}' is not a class index", label))
            })?;

            manifest.insert(name, class);
        }

        Ok(manifest)
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    /// Class for a file name
    pub fn label(&self, file_name: &str) -> Option<u8> {
        self.index.get(file_name).map(|&i| self.entries[i].class)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }
}

/// Locate name and label columns by header, falling back to the first two
fn resolve_columns(headers: &csv::StringRecord) -> (usize, usize) {
    let find = |candidates: &[&str]| {
        headers
            .iter()
            .position(|h| candidates.contains(&h.to_ascii_lowercase().as_str()))
    };

    match (find(&NAME_HEADERS[..]), find(&LABEL_HEADERS[..])) {
        (Some(name), Some(label)) => (name, label),
        _ => (0, 1),
    }
}

/// Both partition manifests from an indices directory
#[derive(Debug, Clone)]
pub struct Manifests {
    pub train: Manifest,
    pub test: Manifest,
}

impl Manifests {
    /// Load `train_indice.csv` and `test_indice.csv`
    pub fn load(path_indices: &Path) -> IegmResult<Self> {
        let path_for = |partition: Partition| -> PathBuf {
            path_indices.join(partition.manifest_file_name())
        };

        Ok(Manifests {
            train: Manifest::from_path(&path_for(Partition::Train), Partition::Train)?,
            test: Manifest::from_path(&path_for(Partition::Test), Partition::Test)?,
        })
    }

    pub fn get(&self, partition: Partition) -> &Manifest {
        match partition {
            Partition::Train => &self.train,
            Partition::Test => &self.test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> IegmResult<Manifest> {
        Manifest::from_reader(csv.as_bytes(), Partition::Train, Path::new("train_indice.csv"))
    }

    #[test]
    fn test_parse_named_columns() {
        let manifest = parse(",label,Filename\n0,0,100-SR-03.txt\n1,1,200-VT-01.txt\n").unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.label("100-SR-03.txt"), Some(0));
        assert_eq!(manifest.label("200-VT-01.txt"), Some(1));
        assert_eq!(manifest.label("300-SR-01.txt"), None);
    }

    #[test]
    fn test_parse_positional_columns() {
        let manifest = parse("a,b\n100-SR-03.txt, 0\n\n").unwrap();
        let entries: Vec<_> = manifest.iter().cloned().collect();

        assert_eq!(
            entries,
            vec![ManifestEntry { file_name: "100-SR-03.txt".to_string(), class: 0 }]
        );
    }

    #[test]
    fn test_duplicate_names_overwrite_in_place() {
        let manifest = parse("name,label\nA-SR-1.txt,0\nB-VT-1.txt,1\nA-SR-1.txt,1\n").unwrap();
        let names: Vec<&str> = manifest.iter().map(|e| e.file_name.as_str()).collect();

        assert_eq!(names, vec!["A-SR-1.txt", "B-VT-1.txt"]);
        assert_eq!(manifest.label("A-SR-1.txt"), Some(1));
    }

    #[test]
    fn test_bad_label_reports_record() {
        let err = parse("name,label\nA-SR-1.txt,0\nB-VT-1.txt,x\n").unwrap_err();
        match err {
            IegmError::Manifest { record, .. } => assert_eq!(record, Some(2)),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_name_is_error() {
        assert!(parse("name,label\n,0\n").is_err());
        assert!(parse("name\nA-SR-1.txt\n").is_err());
    }

    #[test]
    fn test_missing_manifest_file() {
        let err = Manifest::from_path(Path::new("/nonexistent/train_indice.csv"), Partition::Train)
            .unwrap_err();
        assert!(matches!(err, IegmError::FileNotFound { .. }));
    }
}
