//! Core engine for the HR administration platform: performance evaluation
//! scoring and the timed, category-sequenced applicant assessment flow.
//!
//! Identity, role checks, and durable storage are collaborators supplied by
//! the embedding service; this crate defines the traits they implement and
//! the invariants the engine enforces on top of them.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
