use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Accessor for one process-wide boolean setting shared with the host application.
pub trait SharedSetting: Send + Sync {
    fn get(&self) -> bool;
    fn set(&self, value: bool);
}

/// Atomic-backed [`SharedSetting`], shared between host and recorders through `Arc`.
///
/// Models the host's "compile shaders asynchronously" switch, which must be off while buffers
/// are captured so that a shader recompiling mid-frame cannot corrupt a readback.
#[derive(Debug)]
pub struct ProcessSetting {
    value: AtomicBool,
}

impl ProcessSetting {
    pub fn new(value: bool) -> Self {
        Self {
            value: AtomicBool::new(value),
        }
    }

    pub fn shared(value: bool) -> Arc<Self> {
        Arc::new(Self::new(value))
    }
}

impl SharedSetting for ProcessSetting {
    fn get(&self) -> bool {
        self.value.load(Ordering::SeqCst)
    }

    fn set(&self, value: bool) {
        self.value.store(value, Ordering::SeqCst);
    }
}

/// Scoped override of a [`SharedSetting`].
///
/// Acquiring stores the current value and forces a new one; the stored value is written back
/// by [`SettingOverride::restore`] or, failing that, when the guard is dropped.
pub struct SettingOverride {
    setting: Arc<dyn SharedSetting>,
    saved: bool,
    restored: bool,
}

impl SettingOverride {
    pub fn acquire(setting: Arc<dyn SharedSetting>, forced: bool) -> Self {
        let saved = setting.get();
        setting.set(forced);
        tracing::debug!(saved, forced, "shared setting overridden");
        Self {
            setting,
            saved,
            restored: false,
        }
    }

    /// Value observed when the override was acquired.
    pub fn saved(&self) -> bool {
        self.saved
    }

    /// Restore the saved value and return it.
    pub fn restore(mut self) -> bool {
        self.restore_in_place();
        self.saved
    }

    fn restore_in_place(&mut self) {
        if !self.restored {
            self.setting.set(self.saved);
            self.restored = true;
            tracing::debug!(restored = self.saved, "shared setting restored");
        }
    }
}

impl Drop for SettingOverride {
    fn drop(&mut self) {
        self.restore_in_place();
    }
}

impl std::fmt::Debug for SettingOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingOverride")
            .field("saved", &self.saved)
            .field("restored", &self.restored)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/shared.rs"]
mod tests;
