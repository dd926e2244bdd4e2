//! Loading linked trees by path

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

use super::TreeRoot;

/// Errors that can occur while loading a linked tree
#[derive(Debug, Error)]
pub enum LoadError {
    /// No tree is known under the path
    #[error("linked tree not found: {path}")]
    NotFound { path: String },

    /// Error reading the tree file
    #[error("error reading linked tree {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not a valid tree
    #[error("error parsing linked tree {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Provides trees for linked sub-tree directives.
///
/// Implementations own any caching; the engine calls `load` every time a
/// directive is reached.
pub trait TreeLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<TreeRoot, LoadError>;
}

/// A loader that knows no trees
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLoader;

impl TreeLoader for NullLoader {
    fn load(&self, path: &str) -> Result<TreeRoot, LoadError> {
        Err(LoadError::NotFound {
            path: path.to_string(),
        })
    }
}

/// Trees registered in memory under their path
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    trees: HashMap<String, TreeRoot>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tree; a later insert under the same path replaces it
    pub fn insert(&mut self, path: impl Into<String>, tree: TreeRoot) -> &mut Self {
        self.trees.insert(path.into(), tree);
        self
    }

    pub fn with_tree(mut self, path: impl Into<String>, tree: TreeRoot) -> Self {
        self.insert(path, tree);
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.trees.contains_key(path)
    }
}

impl TreeLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<TreeRoot, LoadError> {
        self.trees
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_string(),
            })
    }
}

/// Reads JSON trees from disk and keeps parsed trees for later runs
#[derive(Debug, Default)]
pub struct FileLoader {
    /// Base path for resolving relative tree paths
    base_path: Option<PathBuf>,
    cache: RwLock<HashMap<PathBuf, TreeRoot>>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader resolving paths relative to `base_path`
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            base_path: Some(base_path),
            cache: RwLock::default(),
        }
    }

    pub fn base_path(&self) -> Option<&PathBuf> {
        self.base_path.as_ref()
    }

    /// Resolve a relative path against the base path
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        if let Some(base) = &self.base_path {
            base.join(relative)
        } else {
            PathBuf::from(relative)
        }
    }

    fn cached(&self, path: &PathBuf) -> Option<TreeRoot> {
        self.cache.read().ok()?.get(path).cloned()
    }
}

impl TreeLoader for FileLoader {
    fn load(&self, path: &str) -> Result<TreeRoot, LoadError> {
        let full_path = self.resolve_path(path);
        if let Some(tree) = self.cached(&full_path) {
            return Ok(tree);
        }

        let content = std::fs::read_to_string(&full_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_string(),
                }
            } else {
                LoadError::Io {
                    path: full_path.clone(),
                    source,
                }
            }
        })?;
        let tree = TreeRoot::from_json_str(&content).map_err(|source| LoadError::Json {
            path: full_path.clone(),
            source,
        })?;

        log::debug!("loaded linked tree {}", full_path.display());
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(full_path, tree.clone());
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ElementNode, Handling};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ui-resolver-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_null_loader() {
        let err = NullLoader.load("a.json").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with_tree(
            "header.json",
            TreeRoot::new(Handling::Static, ElementNode::new("text")),
        );
        assert!(loader.contains("header.json"));
        assert_eq!(
            loader.load("header.json").unwrap().root.unwrap().kind,
            "text"
        );
        assert!(loader.load("footer.json").is_err());
    }

    #[test]
    fn test_file_loader_reads_and_caches() {
        let dir = scratch_dir("loader");
        std::fs::write(
            dir.join("part.json"),
            r#"{"handling": "static", "root": {"type": "text"}}"#,
        )
        .unwrap();

        let loader = FileLoader::with_base_path(dir.clone());
        assert_eq!(loader.load("part.json").unwrap().root.unwrap().kind, "text");

        std::fs::remove_file(dir.join("part.json")).unwrap();
        assert!(loader.load("part.json").is_ok());
    }

    #[test]
    fn test_file_loader_missing_file() {
        let loader = FileLoader::with_base_path(scratch_dir("missing"));
        assert!(matches!(
            loader.load("nope.json"),
            Err(LoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_file_loader_bad_json() {
        let dir = scratch_dir("badjson");
        std::fs::write(dir.join("bad.json"), "{not json").unwrap();
        let loader = FileLoader::with_base_path(dir);
        let err = loader.load("bad.json").unwrap_err();
        assert!(err.to_string().contains("error parsing linked tree"));
    }
}
