//! Adapters for external systems.

pub mod providers;
