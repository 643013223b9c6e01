#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(loom))]
pub(crate) use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(not(loom))]
pub(crate) type Contender = crossbeam_utils::Backoff;

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicU32, Ordering};

#[cfg(loom)]
pub(crate) use loom::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(loom)]
pub(crate) type Contender = CustomBackoff;

#[cfg(loom)]
pub(crate) struct CustomBackoff;

#[cfg(loom)]
impl CustomBackoff {
    pub fn new() -> Self {
        Self {}
    }

    pub fn snooze(&self) {
        loom::thread::yield_now();
    }
}
