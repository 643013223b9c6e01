use crate::access::{AccessControl, Claim};
use crate::sync::{AtomicU32, Contender, Ordering};

/// Lock-free access control over a single atomic word. Contended claims spin
/// with backoff instead of parking.
///
/// Admission is raced through compare-exchange, so arrival order grants
/// nothing. A stream of readers can starve a spinning writer.
pub struct CASAccessControl {
    // Bit 31 flags the writer, the lower bits count live readers.
    flags: AtomicU32,
}

impl CASAccessControl {
    const WRITER_MASK: u32 = 1 << 31;
    const READERS_MASK: u32 = !Self::WRITER_MASK;
}

impl Default for CASAccessControl {
    fn default() -> Self {
        Self {
            flags: AtomicU32::new(0),
        }
    }
}

impl AccessControl for CASAccessControl {
    type ReadClaim<'a>
        = CASReadClaim<'a>
    where
        Self: 'a;
    type WriteClaim<'a>
        = CASWriteClaim<'a>
    where
        Self: 'a;

    fn write(&self) -> Self::WriteClaim<'_> {
        let mut flags = self.flags.load(Ordering::SeqCst);
        let backoff = Contender::new();

        loop {
            if flags != 0 {
                backoff.snooze();
                flags = self.flags.load(Ordering::SeqCst);
            } else if let Err(err_flags) = self.flags.compare_exchange(
                0,
                Self::WRITER_MASK,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                flags = err_flags;
            } else {
                break;
            }
        }

        CASWriteClaim::new(self)
    }

    fn read(&self) -> Self::ReadClaim<'_> {
        let mut flags = self.flags.load(Ordering::SeqCst);
        let backoff = Contender::new();

        loop {
            if flags & Self::WRITER_MASK != 0 {
                backoff.snooze();
                flags = self.flags.load(Ordering::SeqCst);
            } else if let Err(err_flags) = self.flags.compare_exchange(
                flags,
                flags + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                flags = err_flags;
            } else {
                break;
            }
        }

        CASReadClaim::new(self)
    }

    fn try_write(&self) -> Option<Self::WriteClaim<'_>> {
        self.flags
            .compare_exchange(0, Self::WRITER_MASK, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| CASWriteClaim::new(self))
    }

    fn try_read(&self) -> Option<Self::ReadClaim<'_>> {
        let mut flags = self.flags.load(Ordering::SeqCst);

        loop {
            if flags & Self::WRITER_MASK != 0 {
                return None;
            }

            match self
                .flags
                .compare_exchange(flags, flags + 1, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Some(CASReadClaim::new(self)),
                Err(err_flags) => flags = err_flags,
            }
        }
    }
}

pub struct CASReadClaim<'a> {
    control: &'a CASAccessControl,
}

impl<'a> CASReadClaim<'a> {
    fn new(control: &'a CASAccessControl) -> Self {
        Self { control }
    }
}

impl Drop for CASReadClaim<'_> {
    fn drop(&mut self) {
        self.control.flags.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct CASWriteClaim<'a> {
    control: &'a CASAccessControl,
}

impl<'a> CASWriteClaim<'a> {
    fn new(control: &'a CASAccessControl) -> Self {
        Self { control }
    }
}

impl Drop for CASWriteClaim<'_> {
    fn drop(&mut self) {
        self.control
            .flags
            .fetch_and(CASAccessControl::READERS_MASK, Ordering::SeqCst);
    }
}

impl Claim for CASReadClaim<'_> {}
impl Claim for CASWriteClaim<'_> {}
