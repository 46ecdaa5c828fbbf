//! Line reassembly
//!
//! Pipe reads hand us arbitrary byte chunks. Lines are split on `\n` with a
//! trailing `\r` removed, and an unterminated tail is carried over to the
//! next chunk. Decoding happens per complete line, so a UTF-8 sequence split
//! across two reads still decodes correctly.

/// Turns a chunked byte stream into complete lines
#[derive(Debug, Default)]
pub struct LineReassembler {
    /// Unterminated tail of the previous chunk
    pending: Vec<u8>,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning the lines it completes in order
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(newline) = rest.iter().position(|&b| b == b'\n') {
            let (head, tail) = rest.split_at(newline);
            rest = &tail[1..];

            let line = if self.pending.is_empty() {
                decode(head)
            } else {
                self.pending.extend_from_slice(head);
                let line = decode(&self.pending);
                self.pending.clear();
                line
            };
            lines.push(line);
        }

        self.pending.extend_from_slice(rest);
        lines
    }

    /// Whether a partial line is being held back
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// End of stream: drop any unterminated tail
    ///
    /// The editor always terminates its last line, so a leftover fragment
    /// is truncated output and carries nothing we could classify reliably.
    pub fn finish(self) {
        if !self.pending.is_empty() {
            tracing::debug!(
                bytes = self.pending.len(),
                "Discarding unterminated line at end of stream"
            );
        }
    }
}

fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_lines() {
        let mut lines = LineReassembler::new();
        assert_eq!(lines.feed(b"one\ntwo\n"), vec!["one", "two"]);
        assert!(!lines.has_pending());
    }

    #[test]
    fn test_partial_line_is_held_back() {
        let mut lines = LineReassembler::new();
        assert!(lines.feed(b"LogAutomationController: Display: Test Sta").is_empty());
        assert!(lines.has_pending());
        assert_eq!(
            lines.feed(b"rted.\nnext"),
            vec!["LogAutomationController: Display: Test Started."]
        );
        assert_eq!(lines.feed(b"\n"), vec!["next"]);
        assert!(!lines.has_pending());
    }

    #[test]
    fn test_crlf_is_normalized_everywhere() {
        let mut lines = LineReassembler::new();
        assert_eq!(lines.feed(b"a\r\nb\r\nc\r"), vec!["a", "b"]);
        assert_eq!(lines.feed(b"\n"), vec!["c"]);
    }

    #[test]
    fn test_empty_lines_are_kept() {
        let mut lines = LineReassembler::new();
        assert_eq!(lines.feed(b"\n\nx\n"), vec!["", "", "x"]);
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let text = "Name={Überprüfung}\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut lines = LineReassembler::new();
        assert!(lines.feed(&text[..split]).is_empty());
        assert_eq!(lines.feed(&text[split..]), vec!["Name={Überprüfung}"]);
    }

    #[test]
    fn test_byte_at_a_time() {
        let input = b"first line\r\nsecond\n";
        let mut lines = LineReassembler::new();
        let out: Vec<String> = input
            .iter()
            .flat_map(|b| lines.feed(std::slice::from_ref(b)))
            .collect();
        assert_eq!(out, vec!["first line", "second"]);
    }
}
