//! Document locator.
//!
//! The dataset root is walked once and every file is indexed by its file name, so
//! each lookup afterwards is a map access instead of a recursive search.

use ignore::WalkBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Index of every file under a dataset root, keyed by file name
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    files: HashMap<String, PathBuf>,
}

impl FileIndex {
    /// Walk `root` recursively and index every regular file.
    ///
    /// Hidden files and ignore files are not special here: the whole tree is indexed.
    /// When several files share a name, the first in sorted walk order is kept.
    pub fn build(root: &Path) -> Self {
        let mut files: HashMap<String, PathBuf> = HashMap::new();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("Skipping entry while indexing {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            match files.get(name) {
                Some(existing) => {
                    tracing::debug!(
                        "Duplicate file name {}: keeping {}, ignoring {}",
                        name,
                        existing.display(),
                        entry.path().display()
                    );
                }
                None => {
                    files.insert(name.to_string(), entry.into_path());
                }
            }
        }

        tracing::debug!("Indexed {} files under {}", files.len(), root.display());

        Self { files }
    }

    /// Path of the file named exactly `file_name`, if any
    pub fn locate(&self, file_name: &str) -> Option<&Path> {
        self.files.get(file_name).map(PathBuf::as_path)
    }

    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
