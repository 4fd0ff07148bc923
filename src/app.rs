// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod ignore_rules;
pub mod models;
pub mod root;
pub mod scanner;

#[cfg(test)]
mod test_utils;

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::resolve_config;
use self::error::SerializeError;
use self::formatter::OutputGenerator;
use self::models::{EntryKind, OutputTarget, TraversalOptions, WrittenOutput};
use self::root::resolve_root;
use self::scanner::Scanner;

/// Resolves configuration from the CLI and presets, then serializes.
pub fn run(args: Cli) -> Result<WrittenOutput> {
    // Preset auto-detection keys on the name of the effective root.
    let project_name = resolve_root(&args.root_dir, args.full_project)
        .ok()
        .and_then(|root| root.file_name().map(|n| n.to_string_lossy().into_owned()));

    let options = resolve_config(args, project_name.as_deref())?;
    let written = serialize(&options)?;

    log::info!(
        "Wrote {} directories and {} files ({} bytes, {} unreadable)",
        written.directories,
        written.files + written.symlinks,
        written.bytes,
        written.unreadable
    );
    Ok(written)
}

/// Walks the effective root and writes the tree listing plus file contents.
///
/// The whole document is built before the output target is touched, so an
/// invalid root never creates or truncates the output file.
pub fn serialize(options: &TraversalOptions) -> Result<WrittenOutput, SerializeError> {
    let root = resolve_root(&options.root_dir, options.full_project)?;
    log::debug!("Serializing {}", root.display());

    let mut scanner = Scanner::new(root.clone(), options);
    if let Some(output_path) = output_path(&options.output_target) {
        scanner = scanner.with_skip_path(output_path);
    }
    let entries = scanner.scan();

    let tree = OutputGenerator::generate_tree(&root, &entries);
    let content = OutputGenerator::generate_content(&entries);
    let output =
        OutputGenerator::format_full_output(options.preamble.as_deref(), &tree, &content.text);

    write_output(&options.output_target, &output)?;

    let count = |kind: EntryKind| entries.iter().filter(|e| e.kind == kind).count();
    Ok(WrittenOutput {
        directories: count(EntryKind::Directory),
        files: count(EntryKind::File),
        symlinks: count(EntryKind::Symlink),
        unreadable: content.unreadable + count(EntryKind::Unreadable),
        bytes: output.len(),
    })
}

/// Absolute location of the output file, so the walk can leave it out.
fn output_path(target: &OutputTarget) -> Option<PathBuf> {
    let OutputTarget::File(path) = target else {
        return None;
    };
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(parent.canonicalize().ok()?.join(file_name))
}

fn write_output(target: &OutputTarget, output: &str) -> Result<(), SerializeError> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| SerializeError::OutputWrite {
                    target: "stdout".to_string(),
                    source,
                })
        }
        OutputTarget::File(path) => {
            fs::write(path, output).map_err(|source| SerializeError::OutputWrite {
                target: path.display().to_string(),
                source,
            })
        }
    }
}
