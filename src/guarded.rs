use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::access::AccessControl;
use crate::access::cas::CASAccessControl;
use crate::access::lock::LockAccessControl;

/// A value owned together with the access control that admits callers to it.
///
/// The value is reachable only through the accessors handed out by
/// [`read`](Guarded::read) and [`write`](Guarded::write), so every use site
/// holds a claim for exactly as long as the accessor lives. Releasing is the
/// accessor going out of scope, including by unwinding.
pub struct Guarded<T, A>
where
    A: AccessControl,
{
    value: UnsafeCell<T>,
    control: A,
}

// Accessors hand out &T and &mut T across threads under the claim discipline,
// which is exactly what RwLock<T> promises. Same bounds as std.
unsafe impl<T: Send, A: AccessControl> Send for Guarded<T, A> {}
unsafe impl<T: Send + Sync, A: AccessControl> Sync for Guarded<T, A> {}

impl<T> Guarded<T, LockAccessControl> {
    pub fn new_lock(value: T) -> Guarded<T, LockAccessControl> {
        Self::with_control(value, LockAccessControl::default())
    }
}

impl<T> Guarded<T, CASAccessControl> {
    pub fn new_cas(value: T) -> Guarded<T, CASAccessControl> {
        Self::with_control(value, CASAccessControl::default())
    }
}

impl<T, A: AccessControl> Guarded<T, A> {
    /// Wraps `value` behind a caller-supplied access control.
    pub fn with_control(value: T, control: A) -> Guarded<T, A> {
        Guarded {
            value: UnsafeCell::new(value),
            control,
        }
    }

    /// Claims exclusive access, blocking until every other accessor is gone.
    ///
    /// Claims are not reentrant. Taking a second accessor from a thread that
    /// already holds one on this container deadlocks.
    pub fn write(&self) -> WriteGuard<'_, T, A> {
        let claim = self.control.write();

        // The exclusive claim is live for the accessor's whole lifetime, so
        // no other reference into the cell can exist until it drops.
        WriteGuard {
            value: unsafe { &mut *self.value.get() },
            _claim: claim,
        }
    }

    /// Claims shared access, blocking while a writer is in.
    ///
    /// Claims are not reentrant. Taking a second accessor from a thread that
    /// already holds one on this container can deadlock.
    pub fn read(&self) -> ReadGuard<'_, T, A> {
        let claim = self.control.read();

        ReadGuard {
            value: unsafe { &*self.value.get() },
            _claim: claim,
        }
    }

    /// Like [`write`](Guarded::write) but refuses with `None` instead of
    /// blocking.
    pub fn try_write(&self) -> Option<WriteGuard<'_, T, A>> {
        let claim = self.control.try_write()?;

        Some(WriteGuard {
            value: unsafe { &mut *self.value.get() },
            _claim: claim,
        })
    }

    /// Like [`read`](Guarded::read) but refuses with `None` instead of
    /// blocking.
    pub fn try_read(&self) -> Option<ReadGuard<'_, T, A>> {
        let claim = self.control.try_read()?;

        Some(ReadGuard {
            value: unsafe { &*self.value.get() },
            _claim: claim,
        })
    }

    /// Direct access through an exclusive borrow of the container itself.
    /// The borrow checker already rules out any live accessor.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Consumes the container and hands the value back.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

impl<T: Default, A: AccessControl + Default> Default for Guarded<T, A> {
    fn default() -> Guarded<T, A> {
        Self::with_control(T::default(), A::default())
    }
}

impl<T, A: AccessControl + Default> From<T> for Guarded<T, A> {
    fn from(value: T) -> Guarded<T, A> {
        Self::with_control(value, A::default())
    }
}

impl<T: fmt::Debug, A: AccessControl> fmt::Debug for Guarded<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Guarded");
        match self.try_read() {
            Some(accessor) => out.field("value", &*accessor),
            None => out.field("value", &format_args!("<write locked>")),
        }
        .finish()
    }
}

/// Shared accessor. Dereferences to the wrapped value, never mutably.
pub struct ReadGuard<'a, T, A>
where
    A: AccessControl + 'a,
{
    value: &'a T,
    _claim: A::ReadClaim<'a>,
}

impl<T, A: AccessControl> Deref for ReadGuard<'_, T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
    }
}

impl<T: fmt::Debug, A: AccessControl> fmt::Debug for ReadGuard<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Exclusive accessor. Dereferences to the wrapped value, mutably on demand.
pub struct WriteGuard<'a, T, A>
where
    A: AccessControl + 'a,
{
    value: &'a mut T,
    _claim: A::WriteClaim<'a>,
}

impl<T, A: AccessControl> Deref for WriteGuard<'_, T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
    }
}

impl<T, A: AccessControl> DerefMut for WriteGuard<'_, T, A> {
    fn deref_mut(&mut self) -> &mut T {
        self.value
    }
}

impl<T: fmt::Debug, A: AccessControl> fmt::Debug for WriteGuard<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
