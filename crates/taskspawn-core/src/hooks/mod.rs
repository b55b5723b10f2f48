//! Lifecycle hooks for tasks
//!
//! Hooks fire when the engine starts, completes, pauses or resumes a task.
//! This module implements:
//! - `Hook`: the input union (nothing, a constant result, or a callback)
//! - `HookHandle`/`HookInvoker`: the owned resource and its engine-facing
//!   invocable view
//! - `HookSet`: an immutable four-slot group registered with the engine
//! - `HookRegistry`/`CurrentHooks`: the process-wide default slots
//!
//! A handle occupies exactly one live slot. Sharing always goes through
//! `duplicate()`, which yields an independent handle over the same behavior;
//! dropping a handle releases it exactly once, after which its invokers fail
//! with `Error::HookReleased`.

mod handle;
mod registry;
mod set;

pub use handle::{Hook, HookCallback, HookHandle, HookInvoker};
pub use registry::{CurrentHooks, HookRegistry};
pub use set::{HookOverrides, HookSet};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task lifecycle points that can carry a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    OnStart,
    OnComplete,
    OnPause,
    OnResume,
}

impl HookKind {
    pub const ALL: [HookKind; 4] = [
        HookKind::OnStart,
        HookKind::OnComplete,
        HookKind::OnPause,
        HookKind::OnResume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::OnStart => "onstart",
            HookKind::OnComplete => "oncomplete",
            HookKind::OnPause => "onpause",
            HookKind::OnResume => "onresume",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
