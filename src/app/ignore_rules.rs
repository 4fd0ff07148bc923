//! Gitignore-style exclusion rules.
//!
//! One matcher per ignore file, stacked as the walk descends. Deeper files are
//! consulted first, so their rules (including `!` re-includes) win over the
//! ones above them.

use crate::app::error::IgnoreFileError;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    stack: Vec<Gitignore>,
}

impl IgnoreRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of matchers on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Drops every matcher pushed after the stack had `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.stack.truncate(len);
    }

    /// Pushes one matcher built from `lines`, with patterns relative to `dir`.
    ///
    /// On the first invalid pattern nothing is pushed.
    pub fn add_patterns<I, S>(
        &mut self,
        dir: &Path,
        lines: I,
        origin: &Path,
    ) -> Result<usize, IgnoreFileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(dir);
        for line in lines {
            let line = line.as_ref();
            builder
                .add_line(Some(origin.to_path_buf()), line)
                .map_err(|source| IgnoreFileError::Pattern {
                    path: origin.to_path_buf(),
                    pattern: line.to_string(),
                    source,
                })?;
        }
        let matcher = builder.build().map_err(|source| IgnoreFileError::Pattern {
            path: origin.to_path_buf(),
            pattern: String::new(),
            source,
        })?;

        let added = matcher.num_ignores() as usize + matcher.num_whitelists() as usize;
        if added > 0 {
            self.stack.push(matcher);
        }
        Ok(added)
    }

    /// Loads the ignore file at `path`, if there is one, scoped to `dir`.
    pub fn load_file(&mut self, dir: &Path, path: &Path) -> Result<usize, IgnoreFileError> {
        if !path.is_file() {
            return Ok(0);
        }
        let content = fs::read_to_string(path).map_err(|source| IgnoreFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_patterns(dir, content.lines(), path)
    }

    /// `path` must lie under the directory of every matcher on the stack.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        for matcher in self.stack.iter().rev() {
            let matched = matcher.matched(path, is_dir);
            if matched.is_ignore() {
                return true;
            }
            if matched.is_whitelist() {
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_utils::TestTree;

    const ROOT: &str = "/project";

    fn rules(lines: &[&str]) -> IgnoreRuleSet {
        let mut set = IgnoreRuleSet::new();
        set.add_patterns(Path::new(ROOT), lines, Path::new(".gitignore"))
            .expect("patterns should parse");
        set
    }

    fn ignored(set: &IgnoreRuleSet, rel: &str, is_dir: bool) -> bool {
        set.is_ignored(&Path::new(ROOT).join(rel), is_dir)
    }

    #[test]
    fn test_basename_pattern_matches_at_any_depth() {
        let set = rules(&["*.log"]);
        assert!(ignored(&set, "debug.log", false));
        assert!(ignored(&set, "a/b/debug.log", false));
        assert!(!ignored(&set, "debug.txt", false));
    }

    #[test]
    fn test_comments_and_blank_lines_add_no_matcher() {
        let set = rules(&["# comment", "", "   "]);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_anchored_pattern_only_matches_from_base() {
        let set = rules(&["/build", "docs/*.md"]);
        assert!(ignored(&set, "build", true));
        assert!(!ignored(&set, "src/build", true));
        assert!(ignored(&set, "docs/intro.md", false));
        assert!(!ignored(&set, "docs/deep/intro.md", false));
    }

    #[test]
    fn test_dir_only_pattern_skips_files() {
        let set = rules(&["target/"]);
        assert!(ignored(&set, "target", true));
        assert!(ignored(&set, "nested/target", true));
        assert!(!ignored(&set, "target", false));
    }

    #[test]
    fn test_negation_reincludes_later_match() {
        let set = rules(&["*.log", "!keep.log"]);
        assert!(ignored(&set, "drop.log", false));
        assert!(!ignored(&set, "keep.log", false));
    }

    #[test]
    fn test_later_rule_wins_over_negation() {
        let set = rules(&["!keep.log", "*.log"]);
        assert!(ignored(&set, "keep.log", false));
    }

    #[test]
    fn test_nested_file_overrides_parent() {
        let mut set = rules(&["*.log"]);
        set.add_patterns(
            &Path::new(ROOT).join("sub"),
            ["!keep.log", "*.tmp"],
            Path::new("sub/.gitignore"),
        )
        .unwrap();
        assert!(!ignored(&set, "sub/keep.log", false));
        assert!(ignored(&set, "sub/other.log", false));
        assert!(ignored(&set, "sub/deeper/a.tmp", false));
    }

    #[test]
    fn test_nested_rules_are_anchored_to_their_dir() {
        let mut set = IgnoreRuleSet::new();
        set.add_patterns(
            &Path::new(ROOT).join("sub"),
            ["/only-here.txt"],
            Path::new("sub/.gitignore"),
        )
        .unwrap();
        assert!(ignored(&set, "sub/only-here.txt", false));
        assert!(!ignored(&set, "sub/deeper/only-here.txt", false));
    }

    #[test]
    fn test_truncate_drops_nested_rules() {
        let mut set = rules(&["*.log"]);
        let mark = set.len();
        set.add_patterns(
            &Path::new(ROOT).join("sub"),
            ["*.txt"],
            Path::new("sub/.gitignore"),
        )
        .unwrap();
        assert!(ignored(&set, "sub/a.txt", false));
        set.truncate(mark);
        assert!(!ignored(&set, "sub/a.txt", false));
        assert!(ignored(&set, "sub/a.log", false));
    }

    #[test]
    fn test_invalid_pattern_adds_nothing() {
        let mut set = IgnoreRuleSet::new();
        let result = set.add_patterns(
            Path::new(ROOT),
            ["*.log", "a[", "*.tmp"],
            Path::new(".gitignore"),
        );
        assert!(matches!(result, Err(IgnoreFileError::Pattern { .. })));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_load_file_missing_is_empty() {
        let tree = TestTree::new();
        let mut set = IgnoreRuleSet::new();
        let added = set
            .load_file(tree.path(), &tree.path().join(".gitignore"))
            .unwrap();
        assert_eq!(added, 0);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_load_file_reads_rules() {
        let tree = TestTree::new();
        tree.add_file(".gitignore", "# build output\ntarget/\n*.log\r\n");
        let mut set = IgnoreRuleSet::new();
        let added = set
            .load_file(tree.path(), &tree.path().join(".gitignore"))
            .unwrap();
        assert_eq!(added, 2);
        assert!(set.is_ignored(&tree.path().join("target"), true));
        assert!(set.is_ignored(&tree.path().join("x.log"), false));
    }
}
