//=========================================================================
// Application Binding Guard
//=========================================================================
//
// Enforces at most one bound application per process.
//
// Acquired by `PlatformBuilder::build()`, released when the `Platform`
// is torn down or dropped.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicBool, Ordering};

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;

static BOUND: AtomicBool = AtomicBool::new(false);

//=== ApplicationBinding ==================================================

/// Process-wide token held by the single live `Platform`.
#[derive(Debug)]
pub(crate) struct ApplicationBinding {
    _private: (),
}

impl ApplicationBinding {
    pub(crate) fn acquire() -> Result<Self, PlatformError> {
        if BOUND
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PlatformError::AlreadyBound);
        }

        info!(target: "platform", "Application bound");
        Ok(Self { _private: () })
    }

    #[cfg(test)]
    pub(crate) fn is_bound() -> bool {
        BOUND.load(Ordering::Acquire)
    }
}

impl Drop for ApplicationBinding {
    fn drop(&mut self) {
        BOUND.store(false, Ordering::Release);
        info!(target: "platform", "Application unbound");
    }
}

//=========================================================================
// Test Support
//=========================================================================

/// Serializes tests that bind an application (the binding is
/// process-wide and the test harness runs tests in parallel).
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::Mutex;

    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

//=========================================================================
// Unit Tests
//=========================================================================
