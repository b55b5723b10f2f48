//! TaskSpawn Core - control plane over an external agent task engine
//!
//! This crate provides the control surface callers use to drive an
//! autonomous-agent task runner:
//! - Batch task creation and submission with per-task lifecycle hooks
//! - The four-slot global hook registry with override/inherit semantics
//! - Task handles exposing status and state-changing operations
//! - Call/success/exception instrumentation around every public operation
//!
//! Execution, persistence and shell access live in the external engine,
//! consumed through the [`engine::TaskEngine`] trait.
//!
//! # Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskspawn_core::{Hook, HookOverrides, TaskSpawn, DEFAULT_MODE};
//!
//! let spawn = TaskSpawn::new(engine, sink);
//!
//! // Default hooks for every task
//! spawn.set_onstart("git stash");
//! spawn.set_oncomplete(Hook::callback(|task| {
//!     Ok(Some(format!("finished {}", task.id())))
//! }));
//!
//! // A batch with an overridden oncomplete hook
//! let hooks = spawn
//!     .current_hooks()
//!     .override_with(HookOverrides::new().oncomplete("git commit -am wip"))?;
//! let tasks = spawn.submit_tasks(
//!     &["fix the flaky test".to_string()],
//!     DEFAULT_MODE,
//!     Some(&hooks),
//! )?;
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod task;
pub mod telemetry;

pub use api::{TaskSpawn, DEFAULT_MODE};
pub use error::{Error, Result};

// Engine contract exports
pub use engine::{
    CommandRun, EngineTask, HookSetId, StatusSnapshot, TaskEngine, TaskId, TaskStatus, TaskSummary,
};

// Hook system exports
pub use hooks::{
    CurrentHooks, Hook, HookCallback, HookHandle, HookInvoker, HookKind, HookOverrides,
    HookRegistry, HookSet,
};

// Task handle exports
pub use task::TaskHandle;

// Telemetry exports
pub use telemetry::{AnalyticsSink, CallArgs, EventAttrs, Interceptor, NullSink};
