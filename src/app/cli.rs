use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "code_tree",
    author,
    version,
    about = "Serialize a project's tree and file contents into one text file"
)]
pub struct Cli {
    /// Root directory of the project to serialize
    #[arg(short = 'r', long = "root_dir", default_value = ".")]
    pub root_dir: PathBuf,

    /// File to write the output to (default: stdout)
    #[arg(short = 'o', long = "output_file")]
    pub output_file: Option<PathBuf>,

    /// List the tree only, without file contents
    #[arg(short = 'd', long = "dir_only")]
    pub dir_only: bool,

    /// Serialize the whole project containing the root directory
    #[arg(short = 'f', long = "full_project")]
    pub full_project: bool,

    /// Include hidden files and directories
    #[arg(short = 'i', long = "include_hidden")]
    pub include_hidden: bool,

    /// Descend only N levels below the root's children (0 = root's children only)
    #[arg(short = 'l', long = "limit_depth", value_name = "N")]
    pub limit_depth: Option<usize>,

    /// Extra gitignore-style patterns to exclude (e.g., 'target/' '*.lock')
    #[arg(short = 'e', long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Name of the per-directory ignore file
    #[arg(long = "ignore_file", default_value = ".gitignore")]
    pub ignore_file: String,

    /// Use a named preset from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Log traversal decisions
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
