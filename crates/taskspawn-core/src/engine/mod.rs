//! Collaborator contract with the external task engine
//!
//! The facade owns no task state. Tasks live inside an engine that executes
//! them, persists them and drives their lifecycle; this module defines the
//! calls the facade makes into that engine and the data that comes back.
//! Transition legality is the engine's concern: the facade forwards requests
//! and surfaces whatever error the engine raises.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hooks::{HookInvoker, HookKind};

/// Opaque task identifier, stable for the task's lifetime.
pub type TaskId = String;

/// Opaque identifier of an engine-registered hook set.
pub type HookSetId = String;

/// Lifecycle states a task can be in.
///
/// The closed set is owned by the engine; the facade only reads it and
/// requests transitions. `pause`/`resume` transitions are engine-initiated
/// and surfaced through the `onpause`/`onresume` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Created but not yet submitted
    Pending,
    /// Submitted and being processed by the worker
    Running,
    /// Suspended by the engine, will resume
    Paused,
    /// Finished successfully
    Completed,
    /// Cancelled on request
    Cancelled,
    /// Execution failed inside the engine
    Failed,
    /// Shelved; `unarchive` restores the prior terminal status
    Archived,
}

impl TaskStatus {
    /// Check if this status allows archiving (no further execution possible)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Cancelled | TaskStatus::Failed
        )
    }

    /// Check if the task is currently owned by the worker
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::Running | TaskStatus::Paused)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Paused => "paused",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Failed => "failed",
            TaskStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One task as the engine sees it.
///
/// The facade holds these behind `TaskHandle` and never caches what it
/// reads: every projection reflects the engine's current value.
pub trait EngineTask: Send + Sync {
    fn id(&self) -> TaskId;
    fn status(&self) -> TaskStatus;
    fn prompt(&self) -> String;
    fn mode(&self) -> String;

    /// Queue the task for execution.
    fn submit(&self) -> Result<()>;

    /// Request cancellation. One-shot, not a cooperative token.
    fn cancel(&self) -> Result<()>;

    /// Shelve a finished task.
    fn archive(&self) -> Result<()>;

    /// Restore an archived task to its pre-archive status.
    fn unarchive(&self) -> Result<()>;
}

/// Record of one shell command the engine ran on behalf of a hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRun {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
}

/// One row of the engine's task list, for display surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub prompt: String,
    pub mode: String,
    pub status: TaskStatus,
}

/// Snapshot of the engine's task list and worker state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub tasks: Vec<TaskSummary>,
    pub worker_active: bool,
}

/// The external engine the facade delegates to.
///
/// All methods are synchronous calls from the facade's perspective except
/// `execute_shell`, which the caller awaits; suspension happens only inside
/// the engine.
#[async_trait]
pub trait TaskEngine: Send + Sync {
    /// Construct one pending task per prompt under `mode`, optionally bound
    /// to a previously registered hook set. Does not submit.
    fn create_tasks(
        &self,
        prompts: &[String],
        mode: &str,
        hooks: Option<&HookSetId>,
    ) -> Result<Vec<Arc<dyn EngineTask>>>;

    /// Register a four-slot hook group. The returned id can be attached to
    /// tasks at creation time; the engine fires the invokers at the matching
    /// lifecycle transitions.
    fn create_hooks(
        &self,
        onstart: Option<HookInvoker>,
        oncomplete: Option<HookInvoker>,
        onpause: Option<HookInvoker>,
        onresume: Option<HookInvoker>,
    ) -> Result<HookSetId>;

    /// Replace one slot of the engine's default hooks, used for tasks
    /// created without an explicit hook set.
    fn set_global_hook(&self, kind: HookKind, hook: Option<HookInvoker>);

    /// Pause the task-processing loop as a whole (not a single task).
    fn pause_worker(&self);

    /// Resume the task-processing loop.
    fn resume_worker(&self);

    /// Run a shell command in the configured working directory.
    async fn execute_shell(&self, command: String) -> Result<CommandRun>;

    /// Current task list and worker state.
    fn live_preview(&self) -> StatusSnapshot;

    /// Development aid: pause the worker and seed demo tasks.
    fn develop(&self);

    /// Directory in which hook shell commands run.
    fn set_working_directory(&self, path: PathBuf);
}
