//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that implements the two engines and
//! their supporting pieces: the sync engine (provider fan-out, merge, upsert,
//! retention sweep), the reminder pipeline (scheduling, auto-subscription,
//! dispatch), the retry wrapper, and the outbound notification seam.

pub mod auto_subscribe;
pub mod dispatch;
pub mod merge;
pub mod notify;
pub mod reminder;
pub mod retry;
pub mod sync;
