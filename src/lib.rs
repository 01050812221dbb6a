//! Driver jobs: scheduling and status tracking for field work.
//!
//! This crate schedules jobs for a fixed pool of twelve drivers, tracks each
//! job through its completion workflow and builds the date-scoped views that
//! drivers and office staff work from.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`job`]: Job model, validation, bulk import, calendar and query helpers
//! - [`config`]: Runtime configuration and log subscriber set-up

pub mod config;
pub mod job;
