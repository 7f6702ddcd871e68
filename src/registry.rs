//! Descriptor registry
//!
//! An ordered collection of schema files available for a cross-file
//! annotation scan. The registry is append-only while being built and
//! read-only afterwards; traversals never mutate it, so independent scans
//! may run concurrently once loading is done.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::descriptor::FileDescriptor;
use crate::error::Result;

/// All schema files known for a cross-file scan.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    files: Vec<FileDescriptor>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file; scan order is insertion order.
    pub fn add_file(&mut self, file: FileDescriptor) {
        self.files.push(file);
    }

    /// Files in scan order.
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    pub fn file_by_name(&self, name: &str) -> Option<&FileDescriptor> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Package names in scan order, deduplicated.
    pub fn packages(&self) -> Vec<&str> {
        let mut packages: Vec<&str> = Vec::new();
        for file in &self.files {
            if !packages.contains(&file.package.as_str()) {
                packages.push(&file.package);
            }
        }
        packages
    }

    /// Load every `*.json` descriptor file from a directory.
    ///
    /// Files are loaded in file-name order so the registry's scan order is
    /// deterministic regardless of directory enumeration order.
    pub fn load_dir(path: impl AsRef<Path>) -> Result<Self> {
        let dir = path.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            let content = fs::read_to_string(&path)?;
            let file: FileDescriptor = serde_json::from_str(&content)?;
            registry.add_file(file);
        }
        debug!(dir = %dir.display(), files = registry.files.len(), "loaded descriptor registry");
        Ok(registry)
    }
}
