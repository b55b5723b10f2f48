//! Public control surface over the external engine
//!
//! `TaskSpawn` is the entry point callers use to enqueue tasks, observe
//! them, and manage lifecycle hooks. All real work happens in the engine;
//! this layer owns the hook registry, wraps engine tasks in handles, and
//! runs every public operation through the instrumentation interceptor.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::engine::{CommandRun, StatusSnapshot, TaskEngine};
use crate::error::Result;
use crate::hooks::{CurrentHooks, Hook, HookKind, HookRegistry, HookSet};
use crate::task::TaskHandle;
use crate::telemetry::{AnalyticsSink, CallArgs, Interceptor};

/// Default agent mode for new tasks.
pub const DEFAULT_MODE: &str = "code";

/// Control-plane entry point over an external task engine.
pub struct TaskSpawn {
    engine: Arc<dyn TaskEngine>,
    telemetry: Interceptor,
    hooks: Arc<HookRegistry>,
}

impl TaskSpawn {
    /// Build the facade over an engine and an analytics sink. The hook
    /// registry starts with all four slots empty.
    pub fn new(engine: Arc<dyn TaskEngine>, sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            engine,
            telemetry: Interceptor::new(sink),
            hooks: Arc::new(HookRegistry::new()),
        }
    }

    /// Install the default hook fired when a task starts, releasing the
    /// previously installed one.
    pub fn set_onstart(&self, hook: impl Into<Hook>) {
        self.set_hook("set_onstart", HookKind::OnStart, hook.into());
    }

    /// Install the default hook fired when a task completes.
    pub fn set_oncomplete(&self, hook: impl Into<Hook>) {
        self.set_hook("set_oncomplete", HookKind::OnComplete, hook.into());
    }

    /// Install the default hook fired when the engine pauses a task.
    pub fn set_onpause(&self, hook: impl Into<Hook>) {
        self.set_hook("set_onpause", HookKind::OnPause, hook.into());
    }

    /// Install the default hook fired when the engine resumes a task.
    pub fn set_onresume(&self, hook: impl Into<Hook>) {
        self.set_hook("set_onresume", HookKind::OnResume, hook.into());
    }

    fn set_hook(&self, op: &str, kind: HookKind, hook: Hook) {
        let args = CallArgs::new().tag("hook", hook.type_label());
        self.telemetry.read(op, args, || {
            self.hooks
                .install(kind, hook, &self.telemetry, self.engine.as_ref());
        });
    }

    /// Live view of the process-wide default hooks. Not a snapshot: reads
    /// reflect later setter calls. Use `override_with` on the result for an
    /// independent, engine-registered set.
    pub fn current_hooks(&self) -> CurrentHooks {
        self.telemetry.read("current_hooks", CallArgs::new(), || {
            CurrentHooks::new(
                Arc::clone(&self.hooks),
                Arc::clone(&self.engine),
                self.telemetry.clone(),
            )
        })
    }

    /// Create one pending task per prompt, in order, optionally bound to a
    /// hook set. Does not submit them. An empty `prompts` slice yields an
    /// empty result.
    pub fn create_tasks(
        &self,
        prompts: &[String],
        mode: &str,
        hooks: Option<&HookSet>,
    ) -> Result<Vec<TaskHandle>> {
        let mut args = CallArgs::new().arg("prompts", &prompts).arg("mode", &mode);
        if hooks.is_some() {
            args = args.tag("hooks", "hook_set");
        }
        self.telemetry.call("create_tasks", args, || {
            let tasks = self
                .engine
                .create_tasks(prompts, mode, hooks.map(HookSet::id))?;
            info!(count = tasks.len(), mode, "created tasks");
            Ok(tasks
                .into_iter()
                .map(|task| TaskHandle::new(task, self.telemetry.clone()))
                .collect())
        })
    }

    /// Create and submit tasks in one go, submitting in creation order.
    ///
    /// Submission stops at the first engine error, which propagates to the
    /// caller; tasks submitted before it stay submitted.
    pub fn submit_tasks(
        &self,
        prompts: &[String],
        mode: &str,
        hooks: Option<&HookSet>,
    ) -> Result<Vec<TaskHandle>> {
        let mut args = CallArgs::new().arg("prompts", &prompts).arg("mode", &mode);
        if hooks.is_some() {
            args = args.tag("hooks", "hook_set");
        }
        self.telemetry.call("submit_tasks", args, || {
            let tasks = self.create_tasks(prompts, mode, hooks)?;
            for task in &tasks {
                task.submit()?;
            }
            Ok(tasks)
        })
    }

    /// Pause the engine's task-processing loop as a whole.
    pub fn pause_task_flow(&self) {
        self.telemetry.read("pause_task_flow", CallArgs::new(), || {
            self.engine.pause_worker();
        });
    }

    /// Resume the engine's task-processing loop.
    pub fn resume_task_flow(&self) {
        self.telemetry.read("resume_task_flow", CallArgs::new(), || {
            self.engine.resume_worker();
        });
    }

    /// Set the directory in which hook shell commands run.
    pub fn working_directory(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let args = CallArgs::new().arg("path", &path);
        self.telemetry.read("working_directory", args, || {
            self.engine.set_working_directory(path);
        });
    }

    /// Run a shell command through the engine and await its record.
    pub async fn execute_shell(&self, command: impl Into<String>) -> Result<CommandRun> {
        let command = command.into();
        let args = CallArgs::new().arg("command", &command);
        self.telemetry
            .call_async("execute_shell", args, self.engine.execute_shell(command))
            .await
    }

    /// Current task list and worker state.
    pub fn live_preview(&self) -> StatusSnapshot {
        self.telemetry
            .read("live_preview", CallArgs::new(), || self.engine.live_preview())
    }

    /// Development aid: ask the engine to seed demo tasks, then return the
    /// resulting snapshot.
    pub fn develop(&self) -> StatusSnapshot {
        self.telemetry.read("develop", CallArgs::new(), || {
            self.engine.develop();
            self.engine.live_preview()
        })
    }
}
