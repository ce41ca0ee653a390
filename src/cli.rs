use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::{BuildConfig, DEFAULT_BASE_DIR};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render today's page, archive it and rebuild the archive index.
    Build(BuildArgs),
    /// Rebuild only the archive index.
    Index(IndexArgs),
}

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Directory holding `data.json`, `template.html`, `index.html` and `archive/`.
    #[arg(long, default_value = DEFAULT_BASE_DIR)]
    pub base_dir: String,

    /// Snapshot path (default: `<base-dir>/data.json`).
    #[arg(long)]
    pub data: Option<String>,

    /// Template path (default: `<base-dir>/template.html`).
    #[arg(long)]
    pub template: Option<String>,

    /// Current-day page path (default: `<base-dir>/index.html`).
    #[arg(long)]
    pub out: Option<String>,

    /// Archive directory (default: `<base-dir>/archive`).
    #[arg(long)]
    pub archive_dir: Option<String>,
}

impl PathArgs {
    pub fn to_config(&self) -> BuildConfig {
        let mut config = BuildConfig::from_base_dir(&self.base_dir);
        if let Some(data) = &self.data {
            config.snapshot_path = data.into();
        }
        if let Some(template) = &self.template {
            config.template_path = template.into();
        }
        if let Some(out) = &self.out {
            config.output_path = out.into();
        }
        if let Some(archive_dir) = &self.archive_dir {
            config.archive_dir = archive_dir.into();
        }
        config
    }
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Build date as YYYY-MM-DD (default: today, local time).
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct IndexArgs {
    #[command(flatten)]
    pub paths: PathArgs,
}
