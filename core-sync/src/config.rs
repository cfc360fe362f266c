//! Engine configuration.

/// Tunables for the synchronization engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Uploads at or above this payload size are classified as
    /// `FileTooLarge` when their blob writes fail; smaller failures are
    /// generic `WriteFailed`. The clients in the field use decimal
    /// megabytes, hence 5_000_000 rather than 5 MiB.
    pub large_upload_threshold_bytes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            large_upload_threshold_bytes: 5_000_000,
        }
    }
}

impl EngineConfig {
    /// Set the large-upload classification threshold.
    pub fn with_large_upload_threshold(mut self, bytes: u64) -> Self {
        self.large_upload_threshold_bytes = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_is_five_decimal_megabytes() {
        assert_eq!(EngineConfig::default().large_upload_threshold_bytes, 5_000_000);
    }

    #[test]
    fn test_builder_overrides_threshold() {
        let config = EngineConfig::default().with_large_upload_threshold(1024);
        assert_eq!(config.large_upload_threshold_bytes, 1024);
    }
}
