//! Test group headers
//!
//! Tests are printed under their nested group names. When the next test
//! lives in a different group only the part of its path that changed is
//! printed again, indented by depth.

/// Group headers to print before a test
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRender {
    /// Print a blank line first: the top-level group changed
    pub separator: bool,
    /// `(depth, label)` pairs, depth starting at 1
    pub segments: Vec<(usize, String)>,
}

impl PathRender {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// The group path printed most recently
#[derive(Debug, Default)]
pub struct PathCursor {
    current: Vec<String>,
}

impl PathCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &[String] {
        &self.current
    }

    /// Move to `path`, returning the headers that need printing
    ///
    /// Everything after the common prefix with the previous path is printed.
    /// A path that is a strict prefix of the previous one prints nothing.
    pub fn advance(&mut self, path: &[String]) -> PathRender {
        let common = self
            .current
            .iter()
            .zip(path)
            .take_while(|(old, new)| old == new)
            .count();

        let segments: Vec<(usize, String)> = path
            .iter()
            .enumerate()
            .skip(common)
            .map(|(i, label)| (i + 1, label.clone()))
            .collect();

        self.current = path.to_vec();

        PathRender {
            separator: common == 0 && !segments.is_empty(),
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn seg(depth: usize, label: &str) -> (usize, String) {
        (depth, label.to_string())
    }

    #[test]
    fn test_first_path_prints_everything() {
        let mut cursor = PathCursor::new();
        let render = cursor.advance(&path(&["A", "B"]));
        assert!(render.separator);
        assert_eq!(render.segments, vec![seg(1, "A"), seg(2, "B")]);
        assert_eq!(cursor.current(), path(&["A", "B"]).as_slice());
    }

    #[test]
    fn test_sibling_group_prints_only_the_change() {
        let mut cursor = PathCursor::new();
        cursor.advance(&path(&["A", "B"]));
        let render = cursor.advance(&path(&["A", "C"]));
        assert!(!render.separator);
        assert_eq!(render.segments, vec![seg(2, "C")]);
    }

    #[test]
    fn test_same_group_prints_nothing() {
        let mut cursor = PathCursor::new();
        cursor.advance(&path(&["A", "B"]));
        assert!(cursor.advance(&path(&["A", "B"])).is_empty());
    }

    #[test]
    fn test_new_top_level_group_gets_separator() {
        let mut cursor = PathCursor::new();
        cursor.advance(&path(&["A", "B"]));
        let render = cursor.advance(&path(&["X", "B"]));
        assert!(render.separator);
        assert_eq!(render.segments, vec![seg(1, "X"), seg(2, "B")]);
    }

    #[test]
    fn test_deeper_path_prints_the_growth() {
        let mut cursor = PathCursor::new();
        cursor.advance(&path(&["A"]));
        let render = cursor.advance(&path(&["A", "B", "C"]));
        assert!(!render.separator);
        assert_eq!(render.segments, vec![seg(2, "B"), seg(3, "C")]);
    }

    #[test]
    fn test_shrinking_path_prints_nothing() {
        let mut cursor = PathCursor::new();
        cursor.advance(&path(&["A", "B"]));
        let render = cursor.advance(&path(&["A"]));
        assert!(render.is_empty());
        assert!(!render.separator);
        assert_eq!(cursor.current(), path(&["A"]).as_slice());

        // Growing back prints the segment again
        assert_eq!(cursor.advance(&path(&["A", "B"])).segments, vec![seg(2, "B")]);
    }

    #[test]
    fn test_empty_path() {
        let mut cursor = PathCursor::new();
        let render = cursor.advance(&[]);
        assert!(render.is_empty());
        assert!(!render.separator);
    }
}
