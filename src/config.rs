//! Layout configuration.
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```toml
//! header_height = 3
//! footer_height = 1
//! pool_capacity = 32
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::renderer::DEFAULT_POOL_CAPACITY;

/// Sizes the fixed regions and the buffer pool of a
/// [`LayoutManager`](crate::layout::LayoutManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Rows reserved at the top.
    pub header_height: u16,
    /// Rows reserved at the bottom.
    pub footer_height: u16,
    /// Most released buffers the pool keeps for reuse.
    pub pool_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: 1,
            footer_height: 1,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl LayoutConfig {
    /// Parse a config from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        debug!(
            header_height = config.header_height,
            footer_height = config.footer_height,
            pool_capacity = config.pool_capacity,
            "loaded layout config"
        );
        Ok(config)
    }

    pub fn header_height(mut self, rows: u16) -> Self {
        self.header_height = rows;
        self
    }

    pub fn footer_height(mut self, rows: u16) -> Self {
        self.footer_height = rows;
        self
    }

    pub fn pool_capacity(mut self, buffers: usize) -> Self {
        self.pool_capacity = buffers;
        self
    }
}
