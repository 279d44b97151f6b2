use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::pencil::Pencil;

/// Pencil defaults gathered from rc files and the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub durability: Option<i64>,
    pub length: Option<i64>,
    pub eraser_durability: Option<u32>,
    pub json: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            durability: other.durability.or(self.durability),
            length: other.length.or(self.length),
            eraser_durability: other.eraser_durability.or(self.eraser_durability),
            json: self.json || other.json,
        }
    }

    /// Build a pencil, falling back to the stock budgets for unset values.
    pub fn pencil(&self) -> Pencil {
        let mut pencil = Pencil::new();
        if let Some(durability) = self.durability {
            pencil = pencil.with_durability(durability);
        }
        if let Some(length) = self.length {
            pencil = pencil.with_length(length);
        }
        if let Some(eraser) = self.eraser_durability {
            pencil = pencil.with_eraser_durability(eraser);
        }
        pencil
    }
}

const APP_DIR: &str = "pencil";
const RC_FILE: &str = ".pencilrc";

/// Per-user configuration root for this platform.
fn config_home() -> Option<PathBuf> {
    let var = |name: &str| std::env::var_os(name).map(PathBuf::from);
    if cfg!(target_os = "windows") {
        var("APPDATA")
    } else if cfg!(target_os = "macos") {
        var("HOME").map(|home| home.join("Library").join("Application Support"))
    } else {
        var("XDG_CONFIG_HOME").or_else(|| var("HOME").map(|home| home.join(".config")))
    }
}

/// Where `--save` writes defaults. Falls back to the local rc file when no
/// home directory is known.
pub fn global_config_path() -> PathBuf {
    config_home().map_or_else(local_override_path, |root| root.join(APP_DIR).join("config"))
}

/// Per-directory overrides, layered over the global defaults.
pub fn local_override_path() -> PathBuf {
    PathBuf::from(RC_FILE)
}

/// Read flag tokens from an rc file. A missing file means no defaults.
///
/// Everything from `#` to the end of a line is a comment.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ConfigFlags::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read config {}", path.display()));
        }
    };
    let tokens = content
        .lines()
        .filter_map(|line| line.split('#').next())
        .flat_map(str::split_whitespace)
        .map(ToOwned::to_owned)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# pencil defaults (saved with --save)".to_string());
    if let Some(durability) = flags.durability {
        lines.push(format!("--durability {durability}"));
    }
    if let Some(length) = flags.length {
        lines.push(format!("--length {length}"));
    }
    if let Some(eraser) = flags.eraser_durability {
        lines.push(format!("--eraser-durability {eraser}"));
    }
    if flags.json {
        lines.push("--json".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("Failed to remove {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Pick the flags this crate understands out of a token stream.
///
/// Unknown tokens and unparsable values are ignored, so a hand-edited rc
/// file with a typo still loads.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--json" {
            flags.json = true;
        } else if let Some(value) = option_value(tokens, &mut i, "--durability") {
            flags.durability = value.parse().ok().or(flags.durability);
        } else if let Some(value) = option_value(tokens, &mut i, "--length") {
            flags.length = value.parse().ok().or(flags.length);
        } else if let Some(value) = option_value(tokens, &mut i, "--eraser-durability") {
            flags.eraser_durability = value.parse().ok().or(flags.eraser_durability);
        }
        i += 1;
    }
    flags
}

/// Value of `--name VALUE` or `--name=VALUE` at `tokens[*i]`, advancing past
/// a separate value token.
fn option_value<'a>(tokens: &'a [String], i: &mut usize, name: &str) -> Option<&'a str> {
    let token = &tokens[*i];
    if token == name {
        let next = tokens.get(*i + 1)?;
        *i += 1;
        return Some(next.as_str());
    }
    token.strip_prefix(name)?.strip_prefix('=')
}
