use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

pub const DEFAULT_LOG_CACHE_LINES: usize = 500;

/// Recent backend log lines served by `GET /api/logs`. Every recorded line
/// is also sent to the `log` facade.
#[derive(Debug)]
pub struct LogCache {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Default for LogCache {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CACHE_LINES)
    }
}

impl LogCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&self, message: &str) {
        log::info!("{message}");
        let line = format!(
            "[{}] {message}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
        );
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_lines_are_evicted_at_capacity() {
        let cache = LogCache::new(2);
        cache.record("one");
        cache.record("two");
        cache.record("three");
        let lines = cache.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] two"));
        assert!(lines[1].ends_with("] three"));
        assert!(lines[0].starts_with('['));
    }
}
