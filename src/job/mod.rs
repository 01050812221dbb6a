//! Job scheduling and status tracking for a fixed pool of drivers.
//!
//! Office staff schedule jobs one at a time or in bulk from delimited text,
//! drivers view their own jobs by day or month and report completion, and an
//! admin board shows every job from yesterday to tomorrow. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Input checks in [`validation`] and [`bulk`]
//! - Pure date and filtering helpers in [`calendar`] and [`query`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod bulk;
pub mod calendar;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
