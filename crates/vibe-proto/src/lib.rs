//! Shared contract between the VibeAlchemy client and the recommendation
//! service: wire types, configuration, and platform path helpers.

pub mod config;
pub mod platform;
pub mod protocol;
