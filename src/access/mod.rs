pub mod cas;
pub mod lock;

/// Marker for a held claim on an access control. Dropping the claim releases
/// it, there is no other way to give one back.
pub trait Claim {}

/// Readers-writer admission policy. A shared claim may coexist with any
/// number of other shared claims, an exclusive claim coexists with nothing.
///
/// The blocking acquisitions park or spin until the claim is granted, the
/// `try_` variants refuse with `None` instead of waiting.
pub trait AccessControl: Send + Sync {
    type ReadClaim<'a>: Claim
    where
        Self: 'a;
    type WriteClaim<'a>: Claim
    where
        Self: 'a;

    fn write(&self) -> Self::WriteClaim<'_>;
    fn read(&self) -> Self::ReadClaim<'_>;
    fn try_write(&self) -> Option<Self::WriteClaim<'_>>;
    fn try_read(&self) -> Option<Self::ReadClaim<'_>>;
}
