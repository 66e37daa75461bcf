//! Configuration for control flow graph construction.
//!
//! This module provides [`CfgConfig`], which controls whether built graphs are
//! simplified and how deeply the builder may descend into nested statements.

/// Configuration for the [`CfgBuilder`](crate::CfgBuilder).
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::{CfgBuilder, CfgConfig};
///
/// // Keep every block the traversal creates, e.g. to inspect the raw shape
/// let builder = CfgBuilder::with_config(CfgConfig::raw());
/// assert!(!builder.config().simplify);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfgConfig {
    /// Run merge and empty-block elimination on every built graph (default: true).
    pub simplify: bool,

    /// Maximum statement nesting depth before the builder gives up (default: 256).
    pub max_depth: usize,
}

impl Default for CfgConfig {
    fn default() -> Self {
        Self {
            simplify: true,
            max_depth: 256,
        }
    }
}

impl CfgConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that leaves built graphs unsimplified.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            simplify: false,
            ..Self::default()
        }
    }

    /// Returns a copy of this configuration with a different nesting limit.
    ///
    /// # Arguments
    ///
    /// * `max_depth` - The maximum nesting depth accepted by the builder
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
