//! Workflow configuration.

use std::time::Duration;

use derive_builder::Builder;

/// Default timeout applied to every collaborator call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default capacity of the event and notification channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Default distance, in degrees, under which a point counts as lying on a route.
pub const DEFAULT_OVERLAP_TOLERANCE: f64 = 1e-4;

/// Configuration for a drawing session.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WorkflowConfig {
    /// Timeout for loading existing routes.
    #[builder(default = "DEFAULT_CALL_TIMEOUT")]
    pub fetch_timeout: Duration,

    /// Timeout for snapping a drawn path to the road network.
    #[builder(default = "DEFAULT_CALL_TIMEOUT")]
    pub snap_timeout: Duration,

    /// Timeout for persisting a snapped route.
    #[builder(default = "DEFAULT_CALL_TIMEOUT")]
    pub persist_timeout: Duration,

    /// Number of events that may wait for the session task.
    #[builder(default = "DEFAULT_CHANNEL_CAPACITY")]
    pub event_buffer: usize,

    /// Number of route notifications kept for slow subscribers.
    #[builder(default = "DEFAULT_CHANNEL_CAPACITY")]
    pub notification_capacity: usize,

    /// Distance, in degrees, under which a point counts as lying on a route.
    #[builder(default = "DEFAULT_OVERLAP_TOLERANCE")]
    pub overlap_tolerance: f64,
}

impl WorkflowConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(buffer) = self.event_buffer
            && buffer == 0
        {
            return Err("event_buffer must be at least 1".into());
        }
        if let Some(capacity) = self.notification_capacity
            && capacity == 0
        {
            return Err("notification_capacity must be at least 1".into());
        }
        if let Some(tolerance) = self.overlap_tolerance
            && !(tolerance.is_finite() && tolerance > 0.0)
        {
            return Err("overlap_tolerance must be a positive number of degrees".into());
        }
        for (name, timeout) in [
            ("fetch_timeout", self.fetch_timeout),
            ("snap_timeout", self.snap_timeout),
            ("persist_timeout", self.persist_timeout),
        ] {
            if timeout.is_some_and(|timeout| timeout.is_zero()) {
                return Err(format!("{name} must be greater than zero"));
            }
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_CALL_TIMEOUT,
            snap_timeout: DEFAULT_CALL_TIMEOUT,
            persist_timeout: DEFAULT_CALL_TIMEOUT,
            event_buffer: DEFAULT_CHANNEL_CAPACITY,
            notification_capacity: DEFAULT_CHANNEL_CAPACITY,
            overlap_tolerance: DEFAULT_OVERLAP_TOLERANCE,
        }
    }
}

impl WorkflowConfig {
    /// Returns a builder with every field at its default.
    pub fn builder() -> WorkflowConfigBuilder {
        WorkflowConfigBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = WorkflowConfig::builder().build().unwrap();
        let default = WorkflowConfig::default();
        assert_eq!(built.snap_timeout, default.snap_timeout);
        assert_eq!(built.event_buffer, default.event_buffer);
        assert_eq!(built.overlap_tolerance, default.overlap_tolerance);
    }

    #[test]
    fn builder_overrides_timeouts() {
        let config = WorkflowConfig::builder()
            .snap_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(config.snap_timeout, Duration::from_secs(5));
        assert_eq!(config.persist_timeout, DEFAULT_CALL_TIMEOUT);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(WorkflowConfig::builder().event_buffer(0usize).build().is_err());
        assert!(
            WorkflowConfig::builder()
                .notification_capacity(0usize)
                .build()
                .is_err()
        );
        assert!(
            WorkflowConfig::builder()
                .fetch_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(
            WorkflowConfig::builder()
                .overlap_tolerance(-1.0)
                .build()
                .is_err()
        );
    }
}
