//! HTTP controller endpoints for the AlgoBell API.
//!
//! This module contains Axum handlers for the sync and dispatch triggers, contest
//! browsing, subscriptions, and profile preferences. Controllers handle HTTP
//! requests, validate references, delegate to services, and return appropriate
//! HTTP responses. Authentication happens upstream in the presentation layer;
//! handlers only validate that referenced rows exist.

pub mod contest;
pub mod dispatch;
pub mod profile;
pub mod subscription;
pub mod sync;
