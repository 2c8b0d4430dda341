use crate::retry::RetryPolicy;
use std::time::Duration;

/// Configuration for the resolution pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Songs requested per catalog page
    pub per_page: u32,
    /// Stop collecting once this many primary songs are gathered
    pub max_songs: usize,
    /// Retry and timeout policy for every upstream call
    pub retry: RetryPolicy,
    /// Tokens this close to expiry are refreshed early
    pub token_safety_margin: Duration,
}

impl PipelineConfig {
    pub fn new(per_page: u32, max_songs: usize, retry: RetryPolicy) -> Self {
        Self {
            per_page,
            max_songs,
            retry,
            token_safety_margin: Duration::from_secs(60),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            per_page: 50,
            max_songs: 100,
            retry: RetryPolicy::default(),
            token_safety_margin: Duration::from_secs(60),
        }
    }
}
