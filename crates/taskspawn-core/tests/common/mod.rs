//! Shared test doubles: an in-process mock engine implementing the task
//! state machine, and a sink that records every instrumentation event.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use taskspawn_core::{
    AnalyticsSink, CommandRun, EngineTask, Error, EventAttrs, HookInvoker, HookKind, HookSetId,
    Result, StatusSnapshot, TaskEngine, TaskId, TaskSpawn, TaskStatus, TaskSummary,
};

pub struct RecordingSink {
    events: Mutex<Vec<(String, EventAttrs)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<(String, EventAttrs)> {
        self.events.lock().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl AnalyticsSink for RecordingSink {
    fn emit(&self, event: &str, attributes: EventAttrs) {
        self.events.lock().push((event.to_string(), attributes));
    }
}

pub struct MockTask {
    id: TaskId,
    prompt: String,
    mode: String,
    status: Mutex<TaskStatus>,
    prior: Mutex<Option<TaskStatus>>,
    fail_submit: AtomicBool,
}

impl MockTask {
    fn new(prompt: String, mode: String) -> Arc<Self> {
        let id = Uuid::new_v4().simple().to_string()[..5].to_string();
        Arc::new(Self {
            id,
            prompt,
            mode,
            status: Mutex::new(TaskStatus::Pending),
            prior: Mutex::new(None),
            fail_submit: AtomicBool::new(false),
        })
    }

    /// Simulate an engine-driven transition (finish, pause, fail).
    pub fn force_status(&self, status: TaskStatus) {
        *self.status.lock() = status;
    }
}

impl EngineTask for MockTask {
    fn id(&self) -> TaskId {
        self.id.clone()
    }

    fn status(&self) -> TaskStatus {
        *self.status.lock()
    }

    fn prompt(&self) -> String {
        self.prompt.clone()
    }

    fn mode(&self) -> String {
        self.mode.clone()
    }

    fn submit(&self) -> Result<()> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(Error::Engine("worker queue unavailable".to_string()));
        }
        let mut status = self.status.lock();
        match *status {
            // The mock has no queue; submitted tasks run immediately.
            TaskStatus::Pending => {
                *status = TaskStatus::Running;
                Ok(())
            }
            other => Err(Error::InvalidTransition(format!(
                "cannot submit task in status {other}"
            ))),
        }
    }

    fn cancel(&self) -> Result<()> {
        let mut status = self.status.lock();
        match *status {
            TaskStatus::Running | TaskStatus::Paused => {
                *status = TaskStatus::Cancelled;
                Ok(())
            }
            other => Err(Error::InvalidTransition(format!(
                "cannot cancel task in status {other}"
            ))),
        }
    }

    fn archive(&self) -> Result<()> {
        let mut status = self.status.lock();
        if !status.is_terminal() {
            return Err(Error::InvalidTransition(format!(
                "cannot archive task in status {status}"
            )));
        }
        *self.prior.lock() = Some(*status);
        *status = TaskStatus::Archived;
        Ok(())
    }

    fn unarchive(&self) -> Result<()> {
        let mut status = self.status.lock();
        match *status {
            TaskStatus::Archived => {
                *status = self.prior.lock().take().unwrap_or(TaskStatus::Completed);
                Ok(())
            }
            other => Err(Error::InvalidTransition(format!(
                "cannot unarchive task in status {other}"
            ))),
        }
    }
}

/// The invokers an engine-side hook set was registered with.
#[derive(Clone, Default)]
pub struct RegisteredHooks {
    pub onstart: Option<HookInvoker>,
    pub oncomplete: Option<HookInvoker>,
    pub onpause: Option<HookInvoker>,
    pub onresume: Option<HookInvoker>,
}

impl RegisteredHooks {
    pub fn get(&self, kind: HookKind) -> Option<HookInvoker> {
        match kind {
            HookKind::OnStart => self.onstart.clone(),
            HookKind::OnComplete => self.oncomplete.clone(),
            HookKind::OnPause => self.onpause.clone(),
            HookKind::OnResume => self.onresume.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CreateCall {
    pub prompts: Vec<String>,
    pub mode: String,
    pub hooks: Option<HookSetId>,
}

pub struct MockEngine {
    tasks: Mutex<Vec<Arc<MockTask>>>,
    hook_sets: Mutex<HashMap<HookSetId, RegisteredHooks>>,
    globals: Mutex<HashMap<HookKind, HookInvoker>>,
    worker_active: AtomicBool,
    working_dir: Mutex<Option<PathBuf>>,
    create_calls: Mutex<Vec<CreateCall>>,
    fail_submit_prompts: Mutex<HashSet<String>>,
    next_hook_set: Mutex<u64>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tasks: Mutex::new(Vec::new()),
            hook_sets: Mutex::new(HashMap::new()),
            globals: Mutex::new(HashMap::new()),
            worker_active: AtomicBool::new(true),
            working_dir: Mutex::new(None),
            create_calls: Mutex::new(Vec::new()),
            fail_submit_prompts: Mutex::new(HashSet::new()),
            next_hook_set: Mutex::new(0),
        })
    }

    /// Make `submit` fail for tasks created later with this prompt.
    pub fn fail_submit_for(&self, prompt: &str) {
        self.fail_submit_prompts.lock().insert(prompt.to_string());
    }

    pub fn task(&self, index: usize) -> Arc<MockTask> {
        self.tasks.lock()[index].clone()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn hook_set(&self, id: &HookSetId) -> RegisteredHooks {
        self.hook_sets.lock().get(id).cloned().unwrap_or_default()
    }

    pub fn global(&self, kind: HookKind) -> Option<HookInvoker> {
        self.globals.lock().get(&kind).cloned()
    }

    pub fn worker_active(&self) -> bool {
        self.worker_active.load(Ordering::SeqCst)
    }

    pub fn working_dir(&self) -> Option<PathBuf> {
        self.working_dir.lock().clone()
    }

    pub fn create_calls(&self) -> Vec<CreateCall> {
        self.create_calls.lock().clone()
    }
}

#[async_trait]
impl TaskEngine for MockEngine {
    fn create_tasks(
        &self,
        prompts: &[String],
        mode: &str,
        hooks: Option<&HookSetId>,
    ) -> Result<Vec<Arc<dyn EngineTask>>> {
        self.create_calls.lock().push(CreateCall {
            prompts: prompts.to_vec(),
            mode: mode.to_string(),
            hooks: hooks.cloned(),
        });

        let fail_prompts = self.fail_submit_prompts.lock();
        let mut created = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let task = MockTask::new(prompt.clone(), mode.to_string());
            if fail_prompts.contains(prompt) {
                task.fail_submit.store(true, Ordering::SeqCst);
            }
            self.tasks.lock().push(task.clone());
            created.push(task as Arc<dyn EngineTask>);
        }
        Ok(created)
    }

    fn create_hooks(
        &self,
        onstart: Option<HookInvoker>,
        oncomplete: Option<HookInvoker>,
        onpause: Option<HookInvoker>,
        onresume: Option<HookInvoker>,
    ) -> Result<HookSetId> {
        let mut next = self.next_hook_set.lock();
        let id = format!("hookset-{}", *next);
        *next += 1;
        self.hook_sets.lock().insert(
            id.clone(),
            RegisteredHooks {
                onstart,
                oncomplete,
                onpause,
                onresume,
            },
        );
        Ok(id)
    }

    fn set_global_hook(&self, kind: HookKind, hook: Option<HookInvoker>) {
        let mut globals = self.globals.lock();
        match hook {
            Some(hook) => {
                globals.insert(kind, hook);
            }
            None => {
                globals.remove(&kind);
            }
        }
    }

    fn pause_worker(&self) {
        self.worker_active.store(false, Ordering::SeqCst);
    }

    fn resume_worker(&self) {
        self.worker_active.store(true, Ordering::SeqCst);
    }

    async fn execute_shell(&self, command: String) -> Result<CommandRun> {
        let started = Utc::now();
        Ok(CommandRun {
            command,
            exit_code: 0,
            stdout: "ok\n".to_string(),
            stderr: String::new(),
            started,
            finished: Utc::now(),
        })
    }

    fn live_preview(&self) -> StatusSnapshot {
        let tasks = self
            .tasks
            .lock()
            .iter()
            .map(|task| TaskSummary {
                id: task.id(),
                prompt: task.prompt(),
                mode: task.mode(),
                status: task.status(),
            })
            .collect();
        StatusSnapshot {
            tasks,
            worker_active: self.worker_active(),
        }
    }

    fn develop(&self) {
        self.pause_worker();
        let seeds = [
            ("write a fibonacci function", TaskStatus::Running),
            ("add a cache layer", TaskStatus::Completed),
            ("migrate the settings page", TaskStatus::Failed),
        ];
        for (prompt, status) in seeds {
            let task = MockTask::new(prompt.to_string(), "code".to_string());
            task.force_status(status);
            self.tasks.lock().push(task);
        }
    }

    fn set_working_directory(&self, path: PathBuf) {
        *self.working_dir.lock() = Some(path);
    }
}

/// Facade wired to a fresh mock engine and recording sink.
pub fn spawn() -> (TaskSpawn, Arc<MockEngine>, Arc<RecordingSink>) {
    let engine = MockEngine::new();
    let sink = RecordingSink::new();
    let facade = TaskSpawn::new(engine.clone(), sink.clone());
    (facade, engine, sink)
}
