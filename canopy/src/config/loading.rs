//! Loading indicator configuration

use std::time::Duration;

use serde::Deserialize;

/// Default time a loading indicator stays visible after an expand.
pub const DEFAULT_LOADING_DURATION: Duration = Duration::from_millis(1000);

/// Controls the transient loading indicator shown when a node is expanded.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use canopy::config::LoadingBehavior;
///
/// let loading = LoadingBehavior::default().with_duration(Duration::from_millis(250));
/// assert!(loading.show_on_expand);
/// assert_eq!(loading.duration(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadingBehavior {
    /// Show the indicator when a node with children is expanded.
    ///
    /// Default: true
    pub show_on_expand: bool,

    /// How long the indicator stays, in milliseconds.
    ///
    /// Default: 1000
    pub duration_ms: u64,
}

impl Default for LoadingBehavior {
    fn default() -> Self {
        Self {
            show_on_expand: true,
            duration_ms: DEFAULT_LOADING_DURATION.as_millis() as u64,
        }
    }
}

impl LoadingBehavior {
    /// Creates an enabled behavior with the default duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a behavior that never shows the indicator.
    pub fn disabled() -> Self {
        Self {
            show_on_expand: false,
            ..Self::default()
        }
    }

    /// Sets how long the indicator stays visible.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Returns the indicator duration.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
