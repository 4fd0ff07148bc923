use std::path::PathBuf;

/// Where the rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    pub root_dir: PathBuf,
    pub output_target: OutputTarget,
    pub dir_only: bool,
    pub full_project: bool,
    pub include_hidden: bool,
    /// `None` walks the whole tree. `Some(0)` lists only the root's children.
    pub max_depth: Option<usize>,
    /// File name of the per-directory ignore file.
    pub ignore_file: String,
    /// Extra gitignore-style patterns anchored at the root.
    pub extra_excludes: Vec<String>,
    pub preamble: Option<String>,
}

impl TraversalOptions {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_target: OutputTarget::Stdout,
            dir_only: false,
            full_project: false,
            include_hidden: false,
            max_depth: None,
            ignore_file: ".gitignore".to_string(),
            extra_excludes: Vec::new(),
            preamble: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    /// Placeholder for something the walk could not read or stat.
    Unreadable,
}

/// Represents a single entry discovered during the scan.
#[derive(Debug)]
pub struct TreeEntry {
    /// Name shown in the tree; empty for a directory-read diagnostic.
    pub name: String,
    pub path: PathBuf,
    pub relative_path: String,
    pub depth: usize,
    pub kind: EntryKind,
    /// Last among its siblings; drives the tree connectors.
    pub is_last: bool,
    pub include_content: bool,
    pub error: Option<String>,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub directories: usize,
    pub files: usize,
    pub symlinks: usize,
    pub unreadable: usize,
    pub bytes: usize,
}
