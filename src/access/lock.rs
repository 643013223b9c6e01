use std::sync::TryLockError;

use crate::access::{AccessControl, Claim};
use crate::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Access control backed by the platform readers-writer lock. Contended
/// claims park the calling thread.
pub struct LockAccessControl {
    lock: RwLock<()>,
}

impl Default for LockAccessControl {
    fn default() -> Self {
        Self {
            lock: RwLock::new(()),
        }
    }
}

impl AccessControl for LockAccessControl {
    type ReadClaim<'a>
        = RwLockReadGuard<'a, ()>
    where
        Self: 'a;
    type WriteClaim<'a>
        = RwLockWriteGuard<'a, ()>
    where
        Self: 'a;

    // The lock guards a unit payload, so poisoning carries no broken state
    // worth propagating. A claim from a panicked holder is recovered as-is.
    fn write(&self) -> Self::WriteClaim<'_> {
        match self.lock.write() {
            Ok(claim) => claim,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn read(&self) -> Self::ReadClaim<'_> {
        match self.lock.read() {
            Ok(claim) => claim,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn try_write(&self) -> Option<Self::WriteClaim<'_>> {
        match self.lock.try_write() {
            Ok(claim) => Some(claim),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    fn try_read(&self) -> Option<Self::ReadClaim<'_>> {
        match self.lock.try_read() {
            Ok(claim) => Some(claim),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

impl Claim for RwLockWriteGuard<'_, ()> {}
impl Claim for RwLockReadGuard<'_, ()> {}
