//! Configuration and output models.

pub mod config;
pub mod report;
