//! Minimum-level gate

use crate::core::{Event, Interceptor, LogLevel};

/// Stops every event below a minimum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    min_level: LogLevel,
}

impl LevelFilter {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Interceptor for LevelFilter {
    fn intercept(&self, event: &Event) -> bool {
        event.level < self.min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Fields;

    #[test]
    fn test_stops_levels_below_minimum() {
        let filter = LevelFilter::new(LogLevel::Warn);

        let stopped: Vec<LogLevel> = LogLevel::ALL
            .into_iter()
            .filter(|level| filter.intercept(&Event::new(*level, "x", Fields::new())))
            .collect();

        assert_eq!(stopped, vec![LogLevel::Debug, LogLevel::Info]);
    }

    #[test]
    fn test_debug_minimum_lets_everything_through() {
        let filter = LevelFilter::new(LogLevel::Debug);
        for level in LogLevel::ALL {
            assert!(!filter.intercept(&Event::new(level, "x", Fields::new())));
        }
    }
}
