//! Process-wide default hooks

use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::TaskEngine;
use crate::error::Result;
use crate::telemetry::Interceptor;

use super::handle::{Hook, HookHandle, HookInvoker};
use super::set::{overridden_slots, HookOverrides, HookSet, HookSlots};
use super::HookKind;

/// The process-wide default hook slots.
///
/// Created once per facade; slots start empty. Each slot is replaced as a
/// unit under the lock: the outgoing handle is released before the incoming
/// invoker becomes visible, so no reader ever observes a half-replaced slot
/// and no handle leaks. There is no destroy API for the registry itself; it
/// is torn down when the facade drops.
pub struct HookRegistry {
    slots: Mutex<HookSlots>,
}

impl HookRegistry {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(HookSlots::default()),
        }
    }

    /// Replace one slot with a fresh handle for `hook` and mirror the new
    /// invoker into the engine's default-hooks slot.
    pub(crate) fn install(
        &self,
        kind: HookKind,
        hook: Hook,
        telemetry: &Interceptor,
        engine: &dyn TaskEngine,
    ) {
        let handle = HookHandle::install(hook, telemetry);
        let invoker = handle.invoker();
        {
            let mut slots = self.slots.lock();
            slots.set(kind, Some(handle));
        }
        engine.set_global_hook(kind, Some(invoker));
    }

    pub(crate) fn invoker(&self, kind: HookKind) -> Option<HookInvoker> {
        self.slots.lock().get(kind).map(HookHandle::invoker)
    }

    pub(crate) fn is_set(&self, kind: HookKind) -> bool {
        self.slots.lock().get(kind).is_some()
    }
}

/// Live view of the registry's current hooks.
///
/// Not a copy: reads consult the slots at use time. Callers that need an
/// independent snapshot build one with `override_with`, which duplicates the
/// current slots into a fresh engine-registered `HookSet`.
pub struct CurrentHooks {
    registry: Arc<HookRegistry>,
    engine: Arc<dyn TaskEngine>,
    telemetry: Interceptor,
}

impl CurrentHooks {
    pub(crate) fn new(
        registry: Arc<HookRegistry>,
        engine: Arc<dyn TaskEngine>,
        telemetry: Interceptor,
    ) -> Self {
        Self {
            registry,
            engine,
            telemetry,
        }
    }

    /// Whether the slot currently carries a hook.
    pub fn is_set(&self, kind: HookKind) -> bool {
        self.registry.is_set(kind)
    }

    /// Invocable view of the slot's current handle, if any.
    pub fn invoker(&self, kind: HookKind) -> Option<HookInvoker> {
        self.registry.invoker(kind)
    }

    /// Snapshot the current defaults into an independent `HookSet`, with the
    /// given slots replaced. Later registry changes do not affect the result,
    /// and dropping the result does not affect the registry.
    pub fn override_with(&self, overrides: HookOverrides) -> Result<HookSet> {
        let args = overrides.call_args();
        self.telemetry.call("hooks.override", args, || {
            let slots = {
                let guard = self.registry.slots.lock();
                overridden_slots(&guard, overrides, &self.telemetry)
            };
            HookSet::register(Arc::clone(&self.engine), self.telemetry.clone(), slots)
        })
    }
}
