use std::time::Duration;

/// Settings for a [`CaptureLoop`](crate::CaptureLoop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLoopOptions {
    /// Minimum time between the starts of two captures. `None` captures
    /// back to back.
    pub min_interval: Option<Duration>,
    /// Stop the loop after this many failed captures in a row. `None` keeps
    /// retrying forever.
    pub max_consecutive_failures: Option<u32>,
    /// Name of the producer thread.
    pub thread_name: String,
}

impl Default for CaptureLoopOptions {
    fn default() -> Self {
        CaptureLoopOptions {
            min_interval: None,
            max_consecutive_failures: None,
            thread_name: "bmpshot-capture".to_string(),
        }
    }
}

impl CaptureLoopOptions {
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = Some(min_interval);
        self
    }

    /// Caps the capture rate. `0` removes the cap.
    pub fn with_max_fps(mut self, fps: u32) -> Self {
        self.min_interval = match fps {
            0 => None,
            fps => Some(Duration::from_secs(1) / fps),
        };
        self
    }

    pub fn with_max_consecutive_failures(mut self, max_consecutive_failures: u32) -> Self {
        self.max_consecutive_failures = Some(max_consecutive_failures);
        self
    }

    pub fn with_thread_name<S: Into<String>>(mut self, thread_name: S) -> Self {
        self.thread_name = thread_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_unthrottled_loop() {
        let options = CaptureLoopOptions::default();

        assert_eq!(options.min_interval, None);
        assert_eq!(options.max_consecutive_failures, None);
        assert_eq!(options.thread_name, "bmpshot-capture");
    }

    #[test]
    fn test_max_fps() {
        let options = CaptureLoopOptions::default().with_max_fps(50);
        assert_eq!(options.min_interval, Some(Duration::from_millis(20)));

        let options = options.with_max_fps(0);
        assert_eq!(options.min_interval, None);
    }

    #[test]
    fn test_builders_chain() {
        let options = CaptureLoopOptions::default()
            .with_min_interval(Duration::from_millis(5))
            .with_max_consecutive_failures(3)
            .with_thread_name("screen-0");

        assert_eq!(options.min_interval, Some(Duration::from_millis(5)));
        assert_eq!(options.max_consecutive_failures, Some(3));
        assert_eq!(options.thread_name, "screen-0");
    }
}
