use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of lines the in-memory ring buffer keeps (spec §9).
const LOG_RING_CAPACITY: usize = 300;

/// One line of captured worker output or supervisor activity. `stream`
/// identifies the producer (`"A"`, `"B"`, `"C"`, or `"supervisor"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub stream: String,
    pub text: String,
}

impl LogLine {
    pub fn new(stream: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            stream: stream.into(),
            text: text.into(),
        }
    }
}

/// Bounded FIFO of the most recent log lines, exposed over `GET /logs` so a
/// client can poll recent activity without tailing stdout.
#[derive(Debug, Default)]
pub struct LogRing {
    lines: VecDeque<LogLine>,
}

impl LogRing {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(LOG_RING_CAPACITY),
        }
    }

    pub fn push(&mut self, line: LogLine) {
        if self.lines.len() == LOG_RING_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Most recent `limit` lines, oldest first (spec §6 `GET /logs?limit=N`).
    pub fn recent(&self, limit: usize) -> Vec<LogLine> {
        let skip = self.lines.len().saturating_sub(limit);
        self.lines.iter().skip(skip).cloned().collect()
    }

    pub fn snapshot(&self) -> Vec<LogLine> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_drops_oldest_past_capacity() {
        let mut ring = LogRing::new();
        for i in 0..(LOG_RING_CAPACITY + 10) {
            ring.push(LogLine::new("supervisor", format!("line {i}")));
        }
        assert_eq!(ring.len(), LOG_RING_CAPACITY);
        let snapshot = ring.snapshot();
        assert_eq!(snapshot.first().unwrap().text, "line 10");
        assert_eq!(
            snapshot.last().unwrap().text,
            format!("line {}", LOG_RING_CAPACITY + 9)
        );
    }

    #[test]
    fn recent_returns_last_n_oldest_first() {
        let mut ring = LogRing::new();
        for i in 0..10 {
            ring.push(LogLine::new("supervisor", format!("line {i}")));
        }
        let last3 = ring.recent(3);
        assert_eq!(last3.len(), 3);
        assert_eq!(last3[0].text, "line 7");
        assert_eq!(last3[2].text, "line 9");
    }
}
