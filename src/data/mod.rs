//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over database operations, organizing
//! data access by table (contests, profiles, subscriptions, reminders, sync logs).

pub mod contest;
pub mod profile;
pub mod reminder;
pub mod subscription;
pub mod sync_log;
