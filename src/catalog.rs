//! Framework catalog loaded from `prism.frameworks.json`
//!
//! A catalog path is either one JSON file holding an array of frameworks or
//! a directory of such files. Lookups are by framework id; listing keeps the
//! order the frameworks were read in.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::framework::{Framework, FrameworkSummary};

/// Default location of the catalog, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "./public/prism.frameworks.json";

/// Read-only collection of frameworks keyed by id
#[derive(Debug, Default, Clone)]
pub struct FrameworkCatalog {
    frameworks: Vec<Framework>,
    by_id: HashMap<String, usize>,
}

impl FrameworkCatalog {
    /// Build a catalog from frameworks already in memory.
    /// Later duplicates of an id are dropped.
    pub fn from_frameworks(frameworks: Vec<Framework>) -> Self {
        let mut catalog = Self::default();
        for framework in frameworks {
            catalog.insert(framework);
        }
        catalog
    }

    /// Load from a JSON file or a directory of JSON files
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Frameworks data file not found: {:?}", path);
        }

        let files = if path.is_dir() {
            find_json_files(path)
        } else {
            vec![path.to_path_buf()]
        };

        let mut catalog = Self::default();
        for file in &files {
            let frameworks = read_frameworks(file)?;
            tracing::info!("Loaded {} frameworks from {:?}", frameworks.len(), file);
            for framework in frameworks {
                catalog.insert(framework);
            }
        }

        Ok(catalog)
    }

    fn insert(&mut self, framework: Framework) {
        if self.by_id.contains_key(&framework.id) {
            tracing::warn!("Duplicate framework id {:?} skipped", framework.id);
            return;
        }
        self.by_id.insert(framework.id.clone(), self.frameworks.len());
        self.frameworks.push(framework);
    }

    pub fn get(&self, id: &str) -> Option<&Framework> {
        self.by_id.get(id).map(|&idx| &self.frameworks[idx])
    }

    pub fn summaries(&self) -> Vec<FrameworkSummary> {
        self.frameworks.iter().map(Framework::summary).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Framework> {
        self.frameworks.iter()
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

fn read_frameworks(path: &Path) -> Result<Vec<Framework>> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse frameworks in {:?}", path))
}

fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path().extension().and_then(|ext| ext.to_str()) == Some("json")
        })
        .map(|e| e.into_path())
        .collect()
}
