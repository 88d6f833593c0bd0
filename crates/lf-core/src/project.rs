//! Project discovery: config, models, schema descriptors, and seeds

use crate::config::{Config, CONFIG_FILE};
use crate::error::{CoreError, CoreResult};
use crate::schema::{ModelSchema, SchemaFile};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A discovered model: a SQL file under one of the model paths
#[derive(Debug, Clone)]
pub struct Model {
    /// Model name (file stem)
    pub name: String,
    /// Path to the SQL file
    pub path: PathBuf,
    /// Raw (unrendered) SQL text
    pub raw_sql: String,
}

/// A discovered seed: a CSV file under one of the seed paths
#[derive(Debug, Clone)]
pub struct Seed {
    /// Seed name (file stem)
    pub name: String,
    /// Path to the CSV file
    pub path: PathBuf,
}

/// A loaded project: configuration plus everything discovered on disk.
///
/// Projects are reloaded from disk on every run, so fixture files rewritten
/// between runs are picked up without any cache invalidation.
#[derive(Debug)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,
    /// Parsed lakeflow.yml
    pub config: Config,
    /// Models by name
    pub models: BTreeMap<String, Model>,
    /// Schema descriptor entries by model name
    pub schemas: BTreeMap<String, ModelSchema>,
    /// Seeds in discovery order
    pub seeds: Vec<Seed>,
}

impl Project {
    /// Load a project from a directory containing lakeflow.yml
    pub fn load(root: &Path) -> CoreResult<Self> {
        if !root.is_dir() {
            return Err(CoreError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }
        let config = Config::load(root)?;

        let mut models = BTreeMap::new();
        let mut schemas = BTreeMap::new();
        for dir in &config.model_paths {
            let dir = root.join(dir);
            if !dir.is_dir() {
                continue;
            }
            for path in sorted_entries(&dir)? {
                match path.extension().and_then(|e| e.to_str()) {
                    Some("sql") => {
                        let model = load_model(&path)?;
                        if models.insert(model.name.clone(), model).is_some() {
                            let name = file_stem(&path);
                            return Err(CoreError::DuplicateModel { name });
                        }
                    }
                    Some("yml") | Some("yaml") => {
                        let file = SchemaFile::load(&path)?;
                        for entry in file.models {
                            let name = entry.name.clone();
                            if schemas.insert(name.clone(), entry).is_some() {
                                return Err(CoreError::DuplicateSchemaEntry { name });
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut seeds = Vec::new();
        for dir in &config.seed_paths {
            let dir = root.join(dir);
            if !dir.is_dir() {
                continue;
            }
            for path in sorted_entries(&dir)? {
                if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                    seeds.push(Seed {
                        name: file_stem(&path),
                        path,
                    });
                }
            }
        }

        log::debug!(
            "loaded project '{}': {} model(s), {} schema entr(ies), {} seed(s)",
            config.name,
            models.len(),
            schemas.len(),
            seeds.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            config,
            models,
            schemas,
            seeds,
        })
    }

    /// Look up a model by name
    pub fn get_model(&self, name: &str) -> CoreResult<&Model> {
        self.models.get(name).ok_or_else(|| CoreError::ModelNotFound {
            name: name.to_string(),
        })
    }

    /// Look up the schema descriptor entry for a model, if any
    pub fn schema_for(&self, name: &str) -> Option<&ModelSchema> {
        self.schemas.get(name)
    }

    /// Directory for run artifacts
    pub fn target_dir(&self) -> PathBuf {
        self.root.join(&self.config.target_path)
    }

    /// Path of the run artifact (the executed create statement) for a model
    pub fn run_artifact_path(&self, model: &str) -> PathBuf {
        self.target_dir().join("run").join(format!("{}.sql", model))
    }

    /// Resolved database path
    pub fn database_path(&self) -> String {
        self.config.database_path(&self.root)
    }

    /// Whether the directory looks like a project at all
    pub fn exists(root: &Path) -> bool {
        root.join(CONFIG_FILE).is_file()
    }
}

fn load_model(path: &Path) -> CoreResult<Model> {
    let raw_sql = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Model {
        name: file_stem(path),
        path: path.to_path_buf(),
        raw_sql,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sorted_entries(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
