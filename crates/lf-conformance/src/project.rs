//! Scratch-workspace harness for the conformance suites.
//!
//! Each `TestProject` is a transient Lakeflow project in a tempdir with its
//! own file-backed database and a unique scratch schema. Runs reload the
//! project from disk, so fixture files rewritten mid-test are picked up
//! exactly as a fresh CLI invocation would.

use lf_core::Project;
use lf_db::{Database, DuckDbBackend, Relation};
use lf_run::{clone_schema, run_models, run_seeds, RunOptions, RunResult, RunSummary};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Builder for a transient test project
pub struct TestProjectBuilder {
    name: String,
    models: Vec<(String, String)>,
    seeds: Vec<(String, String)>,
    delta_format: bool,
    seeds_schema_suffix: Option<String>,
}

impl TestProjectBuilder {
    /// Start a new project with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            models: Vec::new(),
            seeds: Vec::new(),
            delta_format: false,
            seeds_schema_suffix: None,
        }
    }

    /// Add a model or descriptor file under models/
    pub fn model(mut self, file: &str, content: &str) -> Self {
        self.models.push((file.to_string(), content.to_string()));
        self
    }

    /// Add a seed CSV under seeds/
    pub fn seed(mut self, file: &str, content: &str) -> Self {
        self.seeds.push((file.to_string(), content.to_string()));
        self
    }

    /// Apply the project-level `+file_format: delta` override
    pub fn delta_file_format(mut self) -> Self {
        self.delta_format = true;
        self
    }

    /// Load seeds into `<schema>_<suffix>` instead of the project schema
    pub fn seeds_schema(mut self, suffix: &str) -> Self {
        self.seeds_schema_suffix = Some(suffix.to_string());
        self
    }

    /// Write the workspace and open its database
    pub fn build(self) -> TestProject {
        let dir = tempfile::tempdir().expect("failed to create project workspace");
        let root = dir.path().to_path_buf();

        // one scratch schema per test project, never shared
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let schema = format!("lf_test_{}", &suffix[..12]);

        let mut config = format!(
            "name: {}\nschema: {}\ndatabase:\n  path: lakeflow.duckdb\n",
            self.name, schema
        );
        if self.delta_format {
            config.push_str("models:\n  +file_format: delta\n");
        }
        if let Some(suffix) = &self.seeds_schema_suffix {
            config.push_str(&format!("seeds:\n  +schema: {}\n", suffix));
        }
        std::fs::write(root.join("lakeflow.yml"), config).expect("failed to write config");

        let models = root.join("models");
        std::fs::create_dir_all(&models).expect("failed to create models dir");
        for (file, content) in &self.models {
            std::fs::write(models.join(file), content).expect("failed to write model");
        }
        if !self.seeds.is_empty() {
            let seeds = root.join("seeds");
            std::fs::create_dir_all(&seeds).expect("failed to create seeds dir");
            for (file, content) in &self.seeds {
                std::fs::write(seeds.join(file), content).expect("failed to write seed");
            }
        }

        // the harness holds the one connection; runs share it the way an
        // adapter shares its session
        let db: Arc<dyn Database> = Arc::new(
            DuckDbBackend::from_path(&root.join("lakeflow.duckdb"))
                .expect("failed to open project database"),
        );

        TestProject {
            _dir: dir,
            root,
            schema,
            db,
        }
    }
}

/// A transient project workspace plus its database connection
pub struct TestProject {
    _dir: TempDir,
    root: PathBuf,
    schema: String,
    db: Arc<dyn Database>,
}

impl TestProject {
    /// The project's scratch schema
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The schema seeds are loaded into
    pub fn seeds_schema(&self) -> String {
        self.load().config.seeds_schema()
    }

    /// The shared database handle
    pub fn db(&self) -> &Arc<dyn Database> {
        &self.db
    }

    /// Overwrite (or create) a file under models/
    pub fn write_model(&self, file: &str, content: &str) {
        std::fs::write(self.root.join("models").join(file), content)
            .expect("failed to write model");
    }

    /// Read a file under models/
    pub fn read_model(&self, file: &str) -> String {
        std::fs::read_to_string(self.root.join("models").join(file))
            .expect("failed to read model")
    }

    /// Read the archived run SQL for a model
    pub fn read_run_artifact(&self, model: &str) -> String {
        std::fs::read_to_string(self.load().run_artifact_path(model))
            .expect("failed to read run artifact")
    }

    /// Run the selected models, reloading the project from disk first
    pub async fn run(&self, select: &[&str]) -> RunResult<RunSummary> {
        let project = self.load();
        run_models(&self.db, &project, select, &RunOptions::default()).await
    }

    /// Run the selected models, asserting failure; returns the error text
    pub async fn run_expect_failure(&self, select: &[&str]) -> String {
        match self.run(select).await {
            Ok(_) => panic!("expected run of {:?} to fail", select),
            Err(e) => e.to_string(),
        }
    }

    /// Load all seeds
    pub async fn seed(&self) -> RunResult<Vec<String>> {
        let project = self.load();
        run_seeds(&self.db, &project).await
    }

    /// Clone one schema into another on the project's database
    pub async fn clone_to(&self, source: &str, target: &str) -> RunResult<Vec<Relation>> {
        clone_schema(&self.db, source, target).await
    }

    /// Ordered (name, type) columns of a relation in the scratch schema
    pub async fn table_schema(&self, relation: &str) -> Vec<(String, String)> {
        self.db
            .get_table_schema(&self.schema, relation)
            .await
            .expect("failed to read table schema")
    }

    /// First column of each row, as strings
    pub async fn query_strings(&self, sql: &str) -> Vec<String> {
        self.db.query_strings(sql).await.expect("query failed")
    }

    /// Drop a schema, asserting the drop succeeds
    pub async fn drop_schema(&self, schema: &str) {
        self.db
            .drop_schema(schema)
            .await
            .unwrap_or_else(|e| panic!("failed to drop schema '{}': {}", schema, e));
    }

    fn load(&self) -> Project {
        Project::load(&self.root).expect("failed to load project")
    }
}
