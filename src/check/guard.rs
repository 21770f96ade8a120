//! Scoped run-time overrides.
//!
//! Checks that test whether a setting can be overridden change it through a
//! guard. The guard records the original value when acquired and restores it
//! when dropped, so the runtime is left untouched on every exit path,
//! including early returns, `?` and unwinding.

use crate::error::Result;
use crate::runtime::Runtime;

/// Holds the runtime while an ini setting is overridden.
pub struct SettingGuard<'a> {
    runtime: &'a mut dyn Runtime,
    name: String,
    original: Option<String>,
}

impl<'a> SettingGuard<'a> {
    /// Record the current value of `name` and take the runtime.
    pub fn acquire(runtime: &'a mut dyn Runtime, name: &str) -> Result<Self> {
        let original = runtime.setting(name)?;
        Ok(Self {
            runtime,
            name: name.to_string(),
            original,
        })
    }

    /// Value of the setting when the guard was acquired.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// The runtime, for overriding and reading back.
    pub fn runtime(&mut self) -> &mut dyn Runtime {
        &mut *self.runtime
    }
}

impl Drop for SettingGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self
            .runtime
            .set_setting(&self.name, self.original.as_deref())
        {
            tracing::warn!("Failed to restore {}: {}", self.name, e);
        }
    }
}

/// Holds the runtime while the `ignore_user_abort` flag is toggled.
pub struct AbortFlagGuard<'a> {
    runtime: &'a mut dyn Runtime,
    original: bool,
}

impl<'a> AbortFlagGuard<'a> {
    /// Record the current flag and take the runtime.
    pub fn acquire(runtime: &'a mut dyn Runtime) -> Result<Self> {
        let original = runtime.ignore_user_abort()?;
        Ok(Self { runtime, original })
    }

    /// Flag value when the guard was acquired.
    pub fn original(&self) -> bool {
        self.original
    }

    /// The runtime, for toggling and reading back.
    pub fn runtime(&mut self) -> &mut dyn Runtime {
        &mut *self.runtime
    }
}

impl Drop for AbortFlagGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.runtime.set_ignore_user_abort(self.original) {
            tracing::warn!("Failed to restore ignore_user_abort: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthCheckError;
    use crate::runtime::{Snapshot, SnapshotRuntime};

    fn runtime_with(name: &str, value: &str) -> SnapshotRuntime {
        let mut snapshot = Snapshot::default();
        snapshot.settings.insert(name.into(), value.into());
        SnapshotRuntime::new(snapshot)
    }

    #[test]
    fn setting_restored_on_drop() {
        let mut runtime = runtime_with("memory_limit", "64M");
        {
            let mut guard = SettingGuard::acquire(&mut runtime, "memory_limit").unwrap();
            assert_eq!(guard.original(), Some("64M"));
            guard
                .runtime()
                .set_setting("memory_limit", Some("247M"))
                .unwrap();
            assert_eq!(
                guard.runtime().setting("memory_limit").unwrap().as_deref(),
                Some("247M")
            );
        }
        assert_eq!(
            runtime.setting("memory_limit").unwrap().as_deref(),
            Some("64M")
        );
    }

    #[test]
    fn unset_setting_is_unset_again_after_drop() {
        let mut runtime = SnapshotRuntime::new(Snapshot::default());
        {
            let mut guard = SettingGuard::acquire(&mut runtime, "memory_limit").unwrap();
            guard
                .runtime()
                .set_setting("memory_limit", Some("247M"))
                .unwrap();
        }
        assert!(runtime.setting("memory_limit").unwrap().is_none());
    }

    #[test]
    fn setting_restored_on_early_error() {
        fn failing_probe(runtime: &mut dyn Runtime) -> Result<()> {
            let mut guard = SettingGuard::acquire(runtime, "memory_limit")?;
            guard.runtime().set_setting("memory_limit", Some("1M"))?;
            guard.runtime().module_loaded("mod_rewrite")?;
            Ok(())
        }

        let mut runtime = runtime_with("memory_limit", "64M");
        let err = failing_probe(&mut runtime).unwrap_err();

        assert!(matches!(err, HealthCheckError::ProbeFailed { .. }));
        assert_eq!(runtime.snapshot().settings["memory_limit"], "64M");
    }

    #[test]
    fn setting_restored_on_panic() {
        let mut runtime = runtime_with("memory_limit", "64M");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = SettingGuard::acquire(&mut runtime, "memory_limit").unwrap();
            guard
                .runtime()
                .set_setting("memory_limit", Some("1M"))
                .unwrap();
            panic!("comparison blew up");
        }));

        assert!(result.is_err());
        assert_eq!(runtime.snapshot().settings["memory_limit"], "64M");
    }

    #[test]
    fn abort_flag_restored_on_drop() {
        let mut runtime = SnapshotRuntime::new(Snapshot::default());
        {
            let mut guard = AbortFlagGuard::acquire(&mut runtime).unwrap();
            assert!(!guard.original());
            guard.runtime().set_ignore_user_abort(true).unwrap();
            assert!(guard.runtime().ignore_user_abort().unwrap());
        }
        assert!(!runtime.ignore_user_abort().unwrap());
    }
}
