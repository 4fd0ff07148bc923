use crate::app::error::UnreadableFile;
use crate::app::models::{EntryKind, TreeEntry};
use std::fs;
use std::path::Path;

const TEE: &str = "├──";
const ELBOW: &str = "└──";
const PIPE_PREFIX: &str = "│   ";
const SPACE_PREFIX: &str = "    ";
const RULE_WIDTH: usize = 80;

/// File sections plus how many of them hold a placeholder.
#[derive(Debug, Default)]
pub struct RenderedContent {
    pub text: String,
    pub unreadable: usize,
}

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_tree(root: &Path, entries: &[TreeEntry]) -> String {
        // The filesystem root has no name and already ends in a separator.
        let mut output = match root.file_name() {
            Some(name) => format!("{}/\n", name.to_string_lossy()),
            None => format!("{}\n", root.display()),
        };
        // Whether the open ancestor at each level was the last of its siblings.
        let mut ancestors: Vec<bool> = Vec::new();

        for entry in entries {
            ancestors.truncate(entry.depth.saturating_sub(1));
            let prefix: String = ancestors
                .iter()
                .map(|&last| if last { SPACE_PREFIX } else { PIPE_PREFIX })
                .collect();
            let connector = if entry.is_last { ELBOW } else { TEE };

            output.push_str(&format!("{}{} {}\n", prefix, connector, tree_label(entry)));
            ancestors.push(entry.is_last);
        }

        output.trim_end().to_string()
    }

    pub fn generate_content(entries: &[TreeEntry]) -> RenderedContent {
        let mut rendered = RenderedContent::default();
        let rule = "=".repeat(RULE_WIDTH);

        for entry in entries.iter().filter(|e| e.include_content) {
            rendered.text.push_str(&format!(
                "\n# {rule}\n# {}\n# {rule}\n\n",
                entry.relative_path
            ));

            match read_text(&entry.path) {
                Ok(content) => rendered.text.push_str(&content),
                Err(e) => {
                    log::warn!("Cannot read {}: {}", entry.relative_path, e);
                    rendered.text.push_str(&format!("<unreadable: {}>\n", e));
                    rendered.unreadable += 1;
                }
            }
        }

        rendered
    }

    pub fn format_full_output(preamble: Option<&str>, tree: &str, content: &str) -> String {
        let mut out = String::new();

        if let Some(preamble) = preamble {
            out.push_str("# Instructions:\n");
            out.push_str(preamble.trim());
            out.push_str(&format!("\n\n# {}\n\n", "=".repeat(RULE_WIDTH)));
        }

        out.push_str("# Project Structure:\n");
        out.push_str(tree);
        out.push('\n');

        if !content.is_empty() {
            out.push('\n');
            out.push_str(content);
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }
}

fn tree_label(entry: &TreeEntry) -> String {
    match (entry.kind, entry.error.as_deref()) {
        (EntryKind::Directory, _) => format!("{}/", entry.name),
        (EntryKind::Unreadable, Some(reason)) if entry.name.is_empty() => {
            format!("<unreadable: {}>", reason)
        }
        (EntryKind::Unreadable, Some(reason)) => format!("{} <unreadable: {}>", entry.name, reason),
        _ => entry.name.clone(),
    }
}

/// Reads a file as text, rejecting binary and non-UTF-8 content.
pub fn read_text(path: &Path) -> Result<String, UnreadableFile> {
    let bytes = fs::read(path)?;
    if bytes.contains(&0) {
        return Err(UnreadableFile::Binary);
    }
    String::from_utf8(bytes).map_err(|_| UnreadableFile::NotUtf8)
}
