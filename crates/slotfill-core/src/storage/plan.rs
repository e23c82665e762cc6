//! JSON persistence for the user's commitments and tasks.
//!
//! The engine never reads storage; callers load a [`Plan`], hand its
//! slices to the scheduler, and save edits back here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{CoreError, Result};
use crate::schedule::{Commitment, Task};

/// Everything the user has declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// File-backed [`Plan`] at `<data dir>/plan.json`.
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    /// Store in the default data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(data_dir()?.join("plan.json")))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the plan; a missing file is an empty plan.
    pub fn load(&self) -> Result<Plan> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Plan::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, plan: &Plan) -> Result<()> {
        let content = serde_json::to_string_pretty(plan)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Append a commitment, generating an id when it has none.
    pub fn add_commitment(&self, mut commitment: Commitment) -> Result<Commitment> {
        if commitment.id.is_empty() {
            commitment.id = new_id();
        }
        commitment.resolve()?;

        let mut plan = self.load()?;
        if plan.commitments.iter().any(|c| c.id == commitment.id) {
            return Err(CoreError::Custom(format!(
                "commitment '{}' already exists",
                commitment.id
            )));
        }
        plan.commitments.push(commitment.clone());
        self.save(&plan)?;
        Ok(commitment)
    }

    /// Append a task, generating an id when it has none.
    pub fn add_task(&self, mut task: Task) -> Result<Task> {
        if task.id.is_empty() {
            task.id = new_id();
        }

        let mut plan = self.load()?;
        plan.tasks.push(task.clone());
        crate::schedule::validate_tasks(&plan.tasks)?;
        self.save(&plan)?;
        Ok(task)
    }

    /// Remove a commitment by id. Returns whether one was removed.
    pub fn remove_commitment(&self, id: &str) -> Result<bool> {
        let mut plan = self.load()?;
        let before = plan.commitments.len();
        plan.commitments.retain(|c| c.id != id);
        let removed = plan.commitments.len() != before;
        if removed {
            self.save(&plan)?;
        }
        Ok(removed)
    }

    /// Remove a task by id. Returns whether one was removed.
    pub fn remove_task(&self, id: &str) -> Result<bool> {
        let mut plan = self.load()?;
        let before = plan.tasks.len();
        plan.tasks.retain(|t| t.id != id);
        let removed = plan.tasks.len() != before;
        if removed {
            self.save(&plan)?;
        }
        Ok(removed)
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
