//! Storage contracts for identity users and roles.
//!
//! I/O operations are async and take a [`CancellationToken`] that is checked
//! before any work starts. Field accessors only touch the in-memory record;
//! persist changes with `update`.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod role_stores;
pub mod user_stores;
