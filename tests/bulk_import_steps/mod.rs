//! Step definitions for bulk import scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
