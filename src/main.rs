//! Pencil - run a pencil over a sheet of paper from a command script.
//!
//! # Usage
//!
//! ```bash
//! pencil script.txt
//! pencil --durability 40 --text "Once upon a time" script.txt
//! echo "write Hello" | pencil --json -
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use pencil_durability::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags, ConfigFlags,
};
use pencil_durability::paper::Paper;
use pencil_durability::pencil::PencilStatus;
use pencil_durability::script;

/// Write, erase and edit text with a pencil that wears down
#[derive(Parser, Debug)]
#[command(name = "pencil", version, about, long_about = None)]
struct Cli {
    /// Command script to run (`-` reads stdin)
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Start from the contents of this file
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    paper: Option<PathBuf>,

    /// Start from this text
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Starting graphite durability (negative values clamp to zero)
    #[arg(long, allow_negative_numbers = true)]
    durability: Option<i64>,

    /// Number of sharpenings that still restore the point
    #[arg(long, allow_negative_numbers = true)]
    length: Option<i64>,

    /// Characters the eraser can remove
    #[arg(long)]
    eraser_durability: Option<u32>,

    /// Print the paper and pencil state as JSON
    #[arg(long)]
    json: bool,

    /// Save current pencil flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    const fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            durability: self.durability,
            length: self.length,
            eraser_durability: self.eraser_durability,
            json: self.json,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    text: &'a str,
    pencil: PencilStatus,
}

fn read_script(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read script from stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective pencil flags");

    let mut paper = match (&cli.paper, &cli.text) {
        (Some(path), _) => Paper::from_text(
            &std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read paper {}", path.display()))?,
        ),
        (None, Some(text)) => Paper::from_text(text),
        (None, None) => Paper::new(),
    };
    let mut pencil = effective.pencil();

    let source = read_script(&cli.script)?;
    let steps = script::parse(&source)
        .with_context(|| format!("Invalid script {}", cli.script.display()))?;
    script::run(&steps, &mut pencil, &mut paper).context("Script failed")?;

    let text = paper.text();
    if effective.json {
        let report = Report {
            text: &text,
            pencil: pencil.status(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{text}");
    }
    Ok(())
}
