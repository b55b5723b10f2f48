//! Hook handles: owned callback slots with explicit release

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::engine::EngineTask;
use crate::error::{Error, Result};
use crate::task::TaskHandle;
use crate::telemetry::Interceptor;

/// User callback fired at a lifecycle point. Receives the task wrapped in an
/// instrumented `TaskHandle`; the returned string, if any, is handed back to
/// the engine as the hook's result.
pub type HookCallback = Arc<dyn Fn(TaskHandle) -> Result<Option<String>> + Send + Sync>;

/// Input accepted when installing a hook.
#[derive(Clone)]
pub enum Hook {
    /// No result, regardless of task.
    Empty,
    /// Fixed result string, regardless of task.
    Constant(String),
    /// Dynamic callback deciding per task.
    Callback(HookCallback),
}

impl Hook {
    /// Wrap a closure as a callback hook.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(TaskHandle) -> Result<Option<String>> + Send + Sync + 'static,
    {
        Hook::Callback(Arc::new(f))
    }

    /// Label used in call-event argument summaries.
    pub fn type_label(&self) -> &'static str {
        match self {
            Hook::Empty => "empty",
            Hook::Constant(_) => "constant",
            Hook::Callback(_) => "callback",
        }
    }
}

impl From<&str> for Hook {
    fn from(result: &str) -> Self {
        Hook::Constant(result.to_string())
    }
}

impl From<String> for Hook {
    fn from(result: String) -> Self {
        Hook::Constant(result)
    }
}

impl From<Option<String>> for Hook {
    fn from(result: Option<String>) -> Self {
        match result {
            Some(result) => Hook::Constant(result),
            None => Hook::Empty,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Empty => write!(f, "Hook::Empty"),
            Hook::Constant(result) => f.debug_tuple("Hook::Constant").field(result).finish(),
            Hook::Callback(_) => write!(f, "Hook::Callback(..)"),
        }
    }
}

/// What a live handle does when the engine fires it. Immutable after
/// install; duplicating a handle shares this without invoking it.
#[derive(Clone)]
enum Behavior {
    Constant(Option<String>),
    Callback {
        callback: HookCallback,
        telemetry: Interceptor,
    },
}

struct HookCell {
    behavior: Behavior,
    released: AtomicBool,
}

/// An installed hook occupying exactly one slot.
///
/// Not `Clone`: sharing a hook across two slots goes through `duplicate()`,
/// which produces an independent handle with its own release lifecycle over
/// the same behavior. Dropping the handle (or `destroy()`, which consumes
/// it) releases it exactly once; invokers obtained from it fail afterwards.
pub struct HookHandle {
    cell: Arc<HookCell>,
}

impl HookHandle {
    /// Wrap a hook input into a live handle. Callback hooks capture the
    /// telemetry channel so the `TaskHandle` they receive is instrumented
    /// like any other.
    pub(crate) fn install(hook: Hook, telemetry: &Interceptor) -> Self {
        let behavior = match hook {
            Hook::Empty => Behavior::Constant(None),
            Hook::Constant(result) => Behavior::Constant(Some(result)),
            Hook::Callback(callback) => Behavior::Callback {
                callback,
                telemetry: telemetry.clone(),
            },
        };
        Self::from_behavior(behavior)
    }

    fn from_behavior(behavior: Behavior) -> Self {
        Self {
            cell: Arc::new(HookCell {
                behavior,
                released: AtomicBool::new(false),
            }),
        }
    }

    /// Independent handle over the same behavior. Never invokes the
    /// underlying callback.
    pub fn duplicate(&self) -> HookHandle {
        Self::from_behavior(self.cell.behavior.clone())
    }

    /// Invocable view handed to the engine. Valid until this handle is
    /// released.
    pub fn invoker(&self) -> HookInvoker {
        HookInvoker {
            cell: Arc::clone(&self.cell),
        }
    }

    /// Release the handle explicitly. Equivalent to dropping it.
    pub fn destroy(self) {}
}

impl Drop for HookHandle {
    fn drop(&mut self) {
        self.cell.released.store(true, Ordering::Release);
    }
}

impl fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.cell.behavior {
            Behavior::Constant(None) => "empty",
            Behavior::Constant(Some(_)) => "constant",
            Behavior::Callback { .. } => "callback",
        };
        f.debug_struct("HookHandle").field("kind", &kind).finish()
    }
}

/// Engine-facing view of a hook handle.
///
/// Cheap to clone; all clones observe the owning handle's release.
#[derive(Clone)]
pub struct HookInvoker {
    cell: Arc<HookCell>,
}

impl HookInvoker {
    /// Fire the hook for `task`.
    ///
    /// A callback that fails is logged and reported as "no override result"
    /// rather than surfaced to the engine, which is mid-transition and has
    /// no recovery for it.
    pub fn invoke(&self, task: Arc<dyn EngineTask>) -> Result<Option<String>> {
        if self.is_released() {
            return Err(Error::HookReleased);
        }
        match &self.cell.behavior {
            Behavior::Constant(result) => Ok(result.clone()),
            Behavior::Callback {
                callback,
                telemetry,
            } => {
                let handle = TaskHandle::new(task, telemetry.clone());
                match callback(handle) {
                    Ok(result) => Ok(result),
                    Err(err) => {
                        warn!(error = %err, "hook callback failed, treating as no override");
                        Ok(None)
                    }
                }
            }
        }
    }

    pub fn is_released(&self) -> bool {
        self.cell.released.load(Ordering::Acquire)
    }
}

impl fmt::Debug for HookInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookInvoker")
            .field("released", &self.is_released())
            .finish()
    }
}
