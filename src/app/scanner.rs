use crate::app::ignore_rules::IgnoreRuleSet;
use crate::app::models::{EntryKind, TraversalOptions, TreeEntry};
use pathdiff::diff_paths;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Directories that are never listed, whatever the filters say.
const ALWAYS_SKIPPED: &[&str] = &[".git", "__pycache__"];

struct Child {
    name: String,
    path: PathBuf,
    relative_path: String,
    kind: EntryKind,
    error: Option<String>,
}

pub struct Scanner<'a> {
    root: PathBuf,
    options: &'a TraversalOptions,
    skip_path: Option<PathBuf>,
}

impl<'a> Scanner<'a> {
    pub fn new(root: PathBuf, options: &'a TraversalOptions) -> Self {
        Self {
            root,
            options,
            skip_path: None,
        }
    }

    /// Leaves `path` out of the walk, e.g. the output file.
    pub fn with_skip_path(mut self, path: PathBuf) -> Self {
        self.skip_path = Some(path);
        self
    }

    /// Walks the tree depth-first and returns the listed entries in tree order.
    pub fn scan(&self) -> Vec<TreeEntry> {
        let mut rules = IgnoreRuleSet::new();
        if let Err(err) = rules.add_patterns(
            &self.root,
            &self.options.extra_excludes,
            Path::new("preset excludes"),
        ) {
            log::warn!("Ignoring preset excludes: {}", err);
        }

        let mut entries = Vec::new();
        self.walk_dir(&self.root, 0, &mut rules, &mut entries);
        entries
    }

    fn walk_dir(
        &self,
        dir: &Path,
        depth: usize,
        rules: &mut IgnoreRuleSet,
        entries: &mut Vec<TreeEntry>,
    ) {
        let mark = rules.len();
        let ignore_path = dir.join(&self.options.ignore_file);
        match rules.load_file(dir, &ignore_path) {
            Ok(0) => {}
            Ok(count) => log::debug!("Loaded {} rules from {}", count, ignore_path.display()),
            Err(err) => log::warn!("Skipping ignore file: {}", err),
        }

        let child_depth = depth + 1;
        let children = match self.list_children(dir, rules) {
            Ok(children) => children,
            Err(err) => {
                log::warn!("Cannot read directory {}: {}", dir.display(), err);
                // Stands in for the children so the directory does not look empty.
                vec![Child {
                    name: String::new(),
                    path: dir.to_path_buf(),
                    relative_path: relative_string(dir, &self.root).unwrap_or_default(),
                    kind: EntryKind::Unreadable,
                    error: Some(err.to_string()),
                }]
            }
        };
        let last = children.len().saturating_sub(1);

        for (index, child) in children.into_iter().enumerate() {
            let descend = child.kind == EntryKind::Directory
                && self.options.max_depth.map_or(true, |max| child_depth <= max);
            let include_content = !self.options.dir_only
                && match child.kind {
                    EntryKind::File => true,
                    // Links are never descended; a link to a directory stays a bare leaf.
                    EntryKind::Symlink => !child.path.is_dir(),
                    EntryKind::Directory | EntryKind::Unreadable => false,
                };

            let path = child.path;
            entries.push(TreeEntry {
                name: child.name,
                path: path.clone(),
                relative_path: child.relative_path,
                depth: child_depth,
                kind: child.kind,
                is_last: index == last,
                include_content,
                error: child.error,
            });

            if descend {
                self.walk_dir(&path, child_depth, rules, entries);
            } else if child.kind == EntryKind::Directory {
                log::debug!("Depth limit reached at {}", path.display());
            }
        }

        rules.truncate(mark);
    }

    /// Filtered children of `dir`, sorted by file name.
    fn list_children(&self, dir: &Path, rules: &IgnoreRuleSet) -> io::Result<Vec<Child>> {
        let mut dir_entries: Vec<_> = fs::read_dir(dir)?
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Error walking entry in {}: {}", dir.display(), err);
                    None
                }
            })
            .collect();
        dir_entries.sort_by_key(|entry| entry.file_name());

        Ok(dir_entries
            .into_iter()
            .filter_map(|entry| self.process_entry(&entry, rules))
            .collect())
    }

    fn process_entry(&self, entry: &fs::DirEntry, rules: &IgnoreRuleSet) -> Option<Child> {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        if ALWAYS_SKIPPED.contains(&name.as_str()) {
            return None;
        }
        if !self.options.include_hidden && name.starts_with('.') {
            return None;
        }
        if self.skip_path.as_deref() == Some(path.as_path()) {
            return None;
        }

        let relative_path = relative_string(&path, &self.root)?;
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                log::warn!("Cannot stat {}: {}", path.display(), err);
                return Some(Child {
                    name,
                    path,
                    relative_path,
                    kind: EntryKind::Unreadable,
                    error: Some(err.to_string()),
                });
            }
        };
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            log::debug!("Skipping special file {}", path.display());
            return None;
        };

        if rules.is_ignored(&path, kind == EntryKind::Directory) {
            log::debug!("Ignored by rule: {}", relative_path);
            return None;
        }

        Some(Child {
            name,
            path,
            relative_path,
            kind,
            error: None,
        })
    }
}

/// `path` relative to `root`, joined with `/` on every platform.
fn relative_string(path: &Path, root: &Path) -> Option<String> {
    let relative = diff_paths(path, root)?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}
