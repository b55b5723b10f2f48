//! Hook sets: immutable four-slot groups registered with the engine

use std::fmt;
use std::sync::Arc;

use crate::engine::{HookSetId, TaskEngine};
use crate::error::Result;
use crate::telemetry::{CallArgs, Interceptor};

use super::handle::{Hook, HookHandle};
use super::HookKind;

/// The four slots of a hook set, at most one live handle each.
#[derive(Default)]
pub(crate) struct HookSlots {
    pub onstart: Option<HookHandle>,
    pub oncomplete: Option<HookHandle>,
    pub onpause: Option<HookHandle>,
    pub onresume: Option<HookHandle>,
}

impl HookSlots {
    pub fn get(&self, kind: HookKind) -> Option<&HookHandle> {
        match kind {
            HookKind::OnStart => self.onstart.as_ref(),
            HookKind::OnComplete => self.oncomplete.as_ref(),
            HookKind::OnPause => self.onpause.as_ref(),
            HookKind::OnResume => self.onresume.as_ref(),
        }
    }

    /// Replace one slot. The previous handle, if any, drops here and is
    /// thereby released.
    pub fn set(&mut self, kind: HookKind, handle: Option<HookHandle>) {
        match kind {
            HookKind::OnStart => self.onstart = handle,
            HookKind::OnComplete => self.oncomplete = handle,
            HookKind::OnPause => self.onpause = handle,
            HookKind::OnResume => self.onresume = handle,
        }
    }
}

/// Replacement hooks for an override.
///
/// An absent slot inherits from the base set; `Hook::Empty` is an explicit
/// replacement that yields no result.
#[derive(Default)]
pub struct HookOverrides {
    pub onstart: Option<Hook>,
    pub oncomplete: Option<Hook>,
    pub onpause: Option<Hook>,
    pub onresume: Option<Hook>,
}

impl HookOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn onstart(mut self, hook: impl Into<Hook>) -> Self {
        self.onstart = Some(hook.into());
        self
    }

    pub fn oncomplete(mut self, hook: impl Into<Hook>) -> Self {
        self.oncomplete = Some(hook.into());
        self
    }

    pub fn onpause(mut self, hook: impl Into<Hook>) -> Self {
        self.onpause = Some(hook.into());
        self
    }

    pub fn onresume(mut self, hook: impl Into<Hook>) -> Self {
        self.onresume = Some(hook.into());
        self
    }

    pub(crate) fn call_args(&self) -> CallArgs {
        let mut args = CallArgs::new();
        for (name, hook) in [
            ("onstart", &self.onstart),
            ("oncomplete", &self.oncomplete),
            ("onpause", &self.onpause),
            ("onresume", &self.onresume),
        ] {
            if let Some(hook) = hook {
                args = args.tag(name, hook.type_label());
            }
        }
        args
    }
}

/// Build the slots of an override result: explicit replacements are
/// installed fresh, everything else inherits by duplicating the base's
/// handle for that slot, so the result never aliases the base.
pub(crate) fn overridden_slots(
    base: &HookSlots,
    overrides: HookOverrides,
    telemetry: &Interceptor,
) -> HookSlots {
    fn slot(
        explicit: Option<Hook>,
        inherited: Option<&HookHandle>,
        telemetry: &Interceptor,
    ) -> Option<HookHandle> {
        match explicit {
            Some(hook) => Some(HookHandle::install(hook, telemetry)),
            None => inherited.map(HookHandle::duplicate),
        }
    }

    HookSlots {
        onstart: slot(overrides.onstart, base.onstart.as_ref(), telemetry),
        oncomplete: slot(overrides.oncomplete, base.oncomplete.as_ref(), telemetry),
        onpause: slot(overrides.onpause, base.onpause.as_ref(), telemetry),
        onresume: slot(overrides.onresume, base.onresume.as_ref(), telemetry),
    }
}

/// An immutable four-slot group of hooks, registered with the engine.
///
/// The set owns its handles; the engine holds their invokers under the
/// opaque id returned by `create_hooks`. Dropping the set releases the
/// handles, which is why inheritance always duplicates rather than shares.
pub struct HookSet {
    id: HookSetId,
    slots: HookSlots,
    engine: Arc<dyn TaskEngine>,
    telemetry: Interceptor,
}

impl HookSet {
    /// Register `slots` with the engine and wrap the result.
    pub(crate) fn register(
        engine: Arc<dyn TaskEngine>,
        telemetry: Interceptor,
        slots: HookSlots,
    ) -> Result<Self> {
        let id = engine.create_hooks(
            slots.onstart.as_ref().map(HookHandle::invoker),
            slots.oncomplete.as_ref().map(HookHandle::invoker),
            slots.onpause.as_ref().map(HookHandle::invoker),
            slots.onresume.as_ref().map(HookHandle::invoker),
        )?;
        Ok(Self {
            id,
            slots,
            engine,
            telemetry,
        })
    }

    /// Engine-side id of this set, attachable to tasks at creation.
    pub fn id(&self) -> &HookSetId {
        &self.id
    }

    /// Whether a slot carries a hook.
    pub fn is_set(&self, kind: HookKind) -> bool {
        self.slots.get(kind).is_some()
    }

    /// Produce a new engine-registered set with the given slots replaced and
    /// the remaining ones inherited from this set. This set is unchanged.
    pub fn override_with(&self, overrides: HookOverrides) -> Result<HookSet> {
        let args = overrides.call_args();
        self.telemetry.call("hooks.override", args, || {
            let slots = overridden_slots(&self.slots, overrides, &self.telemetry);
            HookSet::register(Arc::clone(&self.engine), self.telemetry.clone(), slots)
        })
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field("id", &self.id)
            .field("onstart", &self.slots.onstart.is_some())
            .field("oncomplete", &self.slots.oncomplete.is_some())
            .field("onpause", &self.slots.onpause.is_some())
            .field("onresume", &self.slots.onresume.is_some())
            .finish()
    }
}
