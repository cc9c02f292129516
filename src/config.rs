//! Configuration for blobmem
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a MemoryStore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Backend Configuration
    // -------------------------------------------------------------------------
    /// Human-readable label returned by `Backend::location`
    pub location: String,

    // -------------------------------------------------------------------------
    // Listing Configuration
    // -------------------------------------------------------------------------
    /// Channel bound used when a listing is fed through a producer thread.
    /// 0 means a rendezvous channel (every send waits for the consumer).
    pub list_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: "Memory Backend".to_string(),
            list_channel_capacity: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the location label
    pub fn location(mut self, label: impl Into<String>) -> Self {
        self.config.location = label.into();
        self
    }

    /// Set the listing channel capacity
    pub fn list_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.list_channel_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
