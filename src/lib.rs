//! AlgoBell server application core.
//!
//! This crate contains the backend for the AlgoBell contest reminder platform:
//! the contest sync engine (parallel upstream fetch with retry, merge, idempotent
//! upsert, retention sweep), the reminder pipeline (subscription-time scheduling,
//! platform auto-subscription fan-out, due-reminder dispatch), and the HTTP
//! surface that exposes both engines' triggers alongside the presentation-layer
//! API.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod provider;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
