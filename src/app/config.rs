use crate::app::cli::Cli;
use crate::app::models::{OutputTarget, TraversalOptions};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub exclude: Option<Vec<String>>,
    pub include_hidden: Option<bool>,
    pub dir_only: Option<bool>,
    pub limit_depth: Option<usize>,
    pub preamble: Option<String>,
}

fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(
        home.join(".config")
            .join("code_tree")
            .join("presets.toml"),
    )
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let Some(config_path) = presets_path() else {
        log::debug!("No home directory; skipping presets");
        return Ok(HashMap::new());
    };

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content).context(format!("Failed to parse {:?}", config_path))
}

pub fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

/// Concatenates both lists, dropping duplicates while keeping order.
fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// CLI flags win over the preset; boolean flags can only be switched on.
pub fn merge_config(cli: Cli, preset: PresetConfig) -> TraversalOptions {
    let output_target = match cli.output_file {
        Some(path) => OutputTarget::File(path),
        None => OutputTarget::Stdout,
    };

    TraversalOptions {
        output_target,
        dir_only: cli.dir_only || preset.dir_only.unwrap_or(false),
        full_project: cli.full_project,
        include_hidden: cli.include_hidden || preset.include_hidden.unwrap_or(false),
        max_depth: cli.limit_depth.or(preset.limit_depth),
        ignore_file: cli.ignore_file,
        extra_excludes: merge_vecs(preset.exclude, cli.exclude),
        preamble: preset.preamble,
        ..TraversalOptions::new(cli.root_dir)
    }
}

pub fn resolve_config(cli: Cli, project_name: Option<&str>) -> Result<TraversalOptions> {
    let presets = load_presets_file()?;

    // Determine preset to use: CLI flag > Auto-detect > None
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = match preset_key.and_then(|k| presets.get(k)) {
        Some(preset) => {
            log::debug!("Using preset '{}'", preset_key.unwrap_or_default());
            preset.clone()
        }
        None => {
            if let Some(name) = cli.preset.as_deref() {
                log::warn!("Preset '{}' not found", name);
            }
            PresetConfig::default()
        }
    };

    Ok(merge_config(cli, preset))
}
