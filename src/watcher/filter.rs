//! Path exclusion.

use std::path::Path;

use super::events::ChangeEvent;

/// Drops events under excluded path prefixes.
///
/// Matching is a plain string-prefix test on the path, not a path-segment
/// test: excluding `/data/tmp` also excludes `/data/tmpfiles/x`.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    prefixes: Vec<String>,
}

impl ExclusionFilter {
    /// Create a filter from excluded prefixes.
    #[must_use]
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `path` starts with any excluded prefix.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Whether an event should be dropped. Renames are judged by their old path.
    #[must_use]
    pub fn rejects(&self, event: &ChangeEvent) -> bool {
        self.is_excluded(event.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let filter = ExclusionFilter::default();
        assert!(!filter.is_excluded(Path::new("/anything")));
    }

    #[test]
    fn test_prefix_excludes_subtree() {
        let filter = ExclusionFilter::new(["/home/me/.cache"]);
        assert!(filter.is_excluded(Path::new("/home/me/.cache/thumbs/1.png")));
        assert!(!filter.is_excluded(Path::new("/home/me/docs/a.txt")));
    }

    #[test]
    fn test_prefix_is_not_segment_aware() {
        let filter = ExclusionFilter::new(["/a/b"]);
        assert!(filter.is_excluded(Path::new("/a/b/c.txt")));
        assert!(filter.is_excluded(Path::new("/a/bc/d.txt")));
        assert!(filter.is_excluded(Path::new("/a/b.txt")));
        assert!(!filter.is_excluded(Path::new("/a/c/b.txt")));
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let filter = ExclusionFilter::new(["/Data/tmp"]);
        assert!(!filter.is_excluded(Path::new("/data/tmp/x")));
    }

    #[test]
    fn test_rename_judged_by_old_path() {
        let filter = ExclusionFilter::new(["/scratch/"]);

        let out_of_scratch = ChangeEvent::renamed("/scratch/a.txt", "/docs/a.txt");
        assert!(filter.rejects(&out_of_scratch));

        let into_scratch = ChangeEvent::renamed("/docs/a.txt", "/scratch/a.txt");
        assert!(!filter.rejects(&into_scratch));
    }
}
