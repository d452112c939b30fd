//! Bounded accumulator for streamed tool output

use std::collections::VecDeque;

/// Keeps the most recent lines of a stream within a byte budget
///
/// Older lines are discarded first; a single oversized line is cut down to
/// the budget.
#[derive(Debug)]
pub struct DiagnosticTail {
    max_bytes: usize,
    bytes: usize,
    dropped: usize,
    lines: VecDeque<String>,
}

impl DiagnosticTail {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            bytes: 0,
            dropped: 0,
            lines: VecDeque::new(),
        }
    }

    pub fn push(&mut self, line: &str) {
        if self.max_bytes == 0 {
            self.dropped += 1;
            return;
        }

        let line = truncate_to_boundary(line, self.max_bytes);
        while self.bytes + line.len() > self.max_bytes {
            match self.lines.pop_front() {
                Some(old) => {
                    self.bytes -= old.len();
                    self.dropped += 1;
                }
                None => break,
            }
        }
        self.bytes += line.len();
        self.lines.push_back(line.to_string());
    }

    /// Number of lines discarded to stay within budget
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn joined(&self) -> String {
        let body = self
            .lines
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if self.dropped > 0 {
            format!("[{} earlier lines truncated]\n{}", self.dropped, body)
        } else {
            body
        }
    }
}

fn truncate_to_boundary(line: &str, max_bytes: usize) -> &str {
    if line.len() <= max_bytes {
        return line;
    }
    let mut end = max_bytes;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_everything_under_budget() {
        let mut tail = DiagnosticTail::new(1024);
        tail.push("first");
        tail.push("second");
        assert_eq!(tail.joined(), "first\nsecond");
        assert_eq!(tail.dropped(), 0);
    }

    #[test]
    fn test_drops_oldest_lines_first() {
        let mut tail = DiagnosticTail::new(10);
        tail.push("aaaa");
        tail.push("bbbb");
        tail.push("cccc");
        assert_eq!(tail.dropped(), 1);
        assert_eq!(tail.joined(), "[1 earlier lines truncated]\nbbbb\ncccc");
    }

    #[test]
    fn test_oversized_line_is_cut() {
        let mut tail = DiagnosticTail::new(4);
        tail.push("abcdefgh");
        assert_eq!(tail.joined(), "abcd");
    }

    #[test]
    fn test_cut_respects_char_boundaries() {
        let mut tail = DiagnosticTail::new(3);
        tail.push("aé€");
        assert_eq!(tail.joined(), "aé");
    }

    #[test]
    fn test_zero_budget_keeps_nothing() {
        let mut tail = DiagnosticTail::new(0);
        tail.push("noise");
        assert_eq!(tail.dropped(), 1);
        assert_eq!(tail.joined(), "[1 earlier lines truncated]\n");
    }
}
