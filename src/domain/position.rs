use std::time::Instant;

/// Tracks playback position as an anchor plus elapsed wall-clock time,
/// rather than a value ticked by a timer. See spec §3 "PositionModel" and
/// §4.1 (position must read correctly across pause/resume/seek).
#[derive(Debug, Clone, Copy)]
pub struct PositionModel {
    anchor_position_sec: f64,
    anchor_monotonic: Instant,
    running: bool,
}

impl PositionModel {
    pub fn new() -> Self {
        Self {
            anchor_position_sec: 0.0,
            anchor_monotonic: Instant::now(),
            running: false,
        }
    }

    /// Re-anchors at `position_sec` and starts (or keeps) the clock running.
    pub fn set_running(&mut self, position_sec: f64) {
        self.anchor_position_sec = position_sec.max(0.0);
        self.anchor_monotonic = Instant::now();
        self.running = true;
    }

    /// Freezes the position at its current computed value.
    pub fn pause(&mut self) {
        let now = self.current();
        self.anchor_position_sec = now;
        self.anchor_monotonic = Instant::now();
        self.running = false;
    }

    /// Re-anchors at `position_sec` without starting the clock (used when
    /// stopping or loading a fresh track).
    pub fn reset_to(&mut self, position_sec: f64) {
        self.anchor_position_sec = position_sec.max(0.0);
        self.anchor_monotonic = Instant::now();
        self.running = false;
    }

    /// Current position in seconds, accounting for elapsed time since the
    /// anchor if the clock is running.
    pub fn current(&self) -> f64 {
        if self.running {
            self.anchor_position_sec + self.anchor_monotonic.elapsed().as_secs_f64()
        } else {
            self.anchor_position_sec
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for PositionModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn paused_position_does_not_advance() {
        let mut pos = PositionModel::new();
        pos.set_running(5.0);
        sleep(Duration::from_millis(20));
        pos.pause();
        let frozen = pos.current();
        sleep(Duration::from_millis(20));
        assert_eq!(pos.current(), frozen);
    }

    #[test]
    fn running_position_advances() {
        let mut pos = PositionModel::new();
        pos.set_running(0.0);
        sleep(Duration::from_millis(20));
        assert!(pos.current() >= 0.02);
    }

    #[test]
    fn reset_clamps_negative_to_zero() {
        let mut pos = PositionModel::new();
        pos.reset_to(-5.0);
        assert_eq!(pos.current(), 0.0);
        assert!(!pos.is_running());
    }
}
