//! Canonical node paths.
//!
//! The root of every tree has the empty path. A child's path is its parent's
//! path and its own name joined with `/`, or just its name under the root.

pub const SEPARATOR: char = '/';

/// Join a parent path and a single segment name.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{SEPARATOR}{name}")
    }
}

/// Split a raw slash-separated path, dropping empty segments.
///
/// Leading, trailing and doubled separators all disappear, so `"a//b/"`
/// yields `["a", "b"]`.
pub fn segments(raw: &str) -> Vec<&str> {
    raw.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Normalize a raw path into canonical form: `"/a//b/"` becomes `"a/b"`.
pub fn canonical(raw: &str) -> String {
    segments(raw)
        .into_iter()
        .fold(String::new(), |acc, segment| join(&acc, segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("", "proj"), "proj");
        assert_eq!(join("src", "utils"), "src/utils");
        assert_eq!(join("src/utils", "helpers.js"), "src/utils/helpers.js");
    }

    #[test]
    fn test_join_keeps_name_verbatim() {
        assert_eq!(join("a", " spaced name "), "a/ spaced name ");
        assert_eq!(join("a", "..."), "a/...");
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("a/b/c.txt"), vec!["a", "b", "c.txt"]);
        assert_eq!(segments("a/b/"), vec!["a", "b"]);
        assert_eq!(segments("/a//b"), vec!["a", "b"]);
        assert!(segments("").is_empty());
        assert!(segments("///").is_empty());
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical("src/utils/helpers.js"), "src/utils/helpers.js");
        assert_eq!(canonical("/src//utils/"), "src/utils");
        assert_eq!(canonical("README.md"), "README.md");
        assert_eq!(canonical("///"), "");
    }
}
