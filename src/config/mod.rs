/// Configuration subsystem - Editor settings and preferences
///
/// This module handles loading and applying configuration from .mdnotesrc
/// files: history depth, smart update behavior and the default log level.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};
