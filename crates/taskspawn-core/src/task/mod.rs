//! Task handles over engine-owned tasks

use std::fmt;
use std::sync::Arc;

use crate::engine::{EngineTask, TaskId, TaskStatus};
use crate::error::Result;
use crate::telemetry::{CallArgs, Interceptor};

/// Non-owning reference to a task that lives inside the engine.
///
/// Projections forward to the engine's current values; nothing is cached
/// here. State-changing operations forward the request and surface whatever
/// error the engine raises, without pre-validating the transition.
#[derive(Clone)]
pub struct TaskHandle {
    task: Arc<dyn EngineTask>,
    telemetry: Interceptor,
}

impl TaskHandle {
    pub(crate) fn new(task: Arc<dyn EngineTask>, telemetry: Interceptor) -> Self {
        Self { task, telemetry }
    }

    /// Stable identifier assigned by the engine at creation.
    pub fn id(&self) -> TaskId {
        self.telemetry
            .read("task.id", CallArgs::new(), || self.task.id())
    }

    /// Current lifecycle status, as the engine sees it right now.
    pub fn status(&self) -> TaskStatus {
        self.telemetry
            .read("task.status", CallArgs::new(), || self.task.status())
    }

    pub fn prompt(&self) -> String {
        self.telemetry
            .read("task.prompt", CallArgs::new(), || self.task.prompt())
    }

    pub fn mode(&self) -> String {
        self.telemetry
            .read("task.mode", CallArgs::new(), || self.task.mode())
    }

    /// Queue the task for execution.
    pub fn submit(&self) -> Result<()> {
        self.telemetry
            .call("task.submit", CallArgs::new(), || self.task.submit())
    }

    /// Request cancellation of a queued or running task.
    pub fn cancel(&self) -> Result<()> {
        self.telemetry
            .call("task.cancel", CallArgs::new(), || self.task.cancel())
    }

    /// Shelve a finished task.
    pub fn archive(&self) -> Result<()> {
        self.telemetry
            .call("task.archive", CallArgs::new(), || self.task.archive())
    }

    /// Restore an archived task to its pre-archive status.
    pub fn unarchive(&self) -> Result<()> {
        self.telemetry
            .call("task.unarchive", CallArgs::new(), || self.task.unarchive())
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.task.id())
            .field("status", &self.task.status())
            .field("prompt", &self.task.prompt())
            .finish()
    }
}
