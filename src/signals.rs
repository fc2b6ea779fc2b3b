//! Ctrl+C handling
//!
//! The handler only raises a flag; long-running stages poll it between
//! steps and bail out with [`IcdError::Interrupted`].

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{IcdError, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Called from the signal handler
#[inline]
pub fn set_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

#[inline]
pub fn reset_interrupted() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Fail with `Interrupted` if Ctrl+C was pressed since startup
pub fn check_interrupted() -> Result<()> {
    if was_interrupted() {
        Err(IcdError::Interrupted)
    } else {
        Ok(())
    }
}
