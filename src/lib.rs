//! Scope-bound thread safety. A value lives inside [`guarded::Guarded`]
//! together with its readers-writer access control, and the only way to reach
//! it is through RAII accessors that hold the claim until they drop. The
//! admission policy is swappable through [`access::AccessControl`].

pub mod access;
pub mod guarded;
mod sync;
