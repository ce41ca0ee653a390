use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::archive;
use crate::archive_index::{self, IndexReport};
use crate::cli::{BuildArgs, IndexArgs};
use crate::config::BuildConfig;
use crate::formats::{ArchiveMetadata, Snapshot};
use crate::page;
use crate::snapshot;
use crate::template::Template;

#[derive(Debug)]
pub enum BuildOutcome {
    Built(BuildReport),
    /// No snapshot on disk; nothing was written.
    MissingSnapshot { snapshot_path: PathBuf },
}

#[derive(Debug)]
pub struct BuildReport {
    pub date: NaiveDate,
    pub home_path: PathBuf,
    pub entry_path: PathBuf,
    pub index: IndexReport,
}

pub fn run(args: BuildArgs) -> anyhow::Result<BuildOutcome> {
    let config = args.paths.to_config();
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    build(&config, date)
}

pub fn run_index(args: IndexArgs) -> anyhow::Result<IndexReport> {
    let config = args.paths.to_config();
    archive_index::rebuild(&config.archive_dir).context("rebuild archive index")
}

pub fn build(config: &BuildConfig, date: NaiveDate) -> anyhow::Result<BuildOutcome> {
    let Some(snapshot) = snapshot::load(&config.snapshot_path).context("load snapshot")? else {
        return Ok(BuildOutcome::MissingSnapshot {
            snapshot_path: config.snapshot_path.clone(),
        });
    };

    let template = Template::load(&config.template_path).context("load template")?;

    tracing::info!(date = %date, "build: compose");
    let pages = page::compose(&template, &snapshot, date);

    tracing::info!("build: write");
    let written = archive::write(config, date, &pages, &sidecar_metadata(&snapshot, date))
        .context("write pages")?;

    tracing::info!("build: archive index");
    let index = archive_index::rebuild(&config.archive_dir).context("rebuild archive index")?;

    Ok(BuildOutcome::Built(BuildReport {
        date,
        home_path: written.home_path,
        entry_path: written.entry_path,
        index,
    }))
}

/// The same values the date and hero headings of the archived page carry.
fn sidecar_metadata(snapshot: &Snapshot, date: NaiveDate) -> ArchiveMetadata {
    ArchiveMetadata {
        date: page::date_cn(date),
        hero: snapshot.hero_news.display_title().to_owned(),
        temp: snapshot.weather.temp.trim().to_owned(),
        degraded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"<h1>{{DATE_CN}}</h1>
<h2><a href="{{HERO_URL}}">{{HERO_TITLE}}</a></h2>
<span class="weather-temp">{{WEATHER_TEMP_VAL}}</span>
<a href="{{ARCHIVE_LINK}}">archive</a>
{{STOCK_LIST}}"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date")
    }

    #[test]
    fn missing_snapshot_writes_nothing() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let config = BuildConfig::from_base_dir(temp.path());
        std::fs::write(&config.template_path, TEMPLATE)?;

        let outcome = build(&config, date())?;
        assert!(matches!(outcome, BuildOutcome::MissingSnapshot { .. }));
        assert!(!config.output_path.exists());
        assert!(!config.archive_dir.exists());
        Ok(())
    }

    #[test]
    fn sidecar_matches_markup_extraction() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let config = BuildConfig::from_base_dir(temp.path());
        std::fs::write(&config.template_path, TEMPLATE)?;
        std::fs::write(
            &config.snapshot_path,
            r#"{"heroNews": {"title": "Fish & Chips"}, "weather": {"temp": "7°C"}}"#,
        )?;

        let BuildOutcome::Built(report) = build(&config, date())? else {
            anyhow::bail!("expected a build");
        };

        let from_markup = crate::metadata::extract(&report.entry_path);
        let from_sidecar = crate::metadata::read_sidecar(&archive::sidecar_path(&report.entry_path))
            .expect("sidecar written");
        assert_eq!(from_markup, from_sidecar);
        assert_eq!(from_sidecar.hero, "Fish & Chips");
        assert_eq!(from_sidecar.temp, "7°C");

        std::fs::write(&config.snapshot_path, r#"{"heroNews": {"title": "   "}}"#)?;
        let BuildOutcome::Built(report) = build(&config, date())? else {
            anyhow::bail!("expected a build");
        };
        let from_markup = crate::metadata::extract(&report.entry_path);
        let from_sidecar = crate::metadata::read_sidecar(&archive::sidecar_path(&report.entry_path))
            .expect("sidecar written");
        assert_eq!(from_markup, from_sidecar);
        assert_eq!(from_sidecar.hero, crate::formats::DEFAULT_HERO_TITLE);
        assert!(!from_sidecar.degraded);
        Ok(())
    }

    #[test]
    fn invalid_template_is_an_error() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let config = BuildConfig::from_base_dir(temp.path());
        std::fs::write(&config.template_path, "<h1>{{DATE_CN}}</h1>{{NOPE}}")?;
        std::fs::write(&config.snapshot_path, "{}")?;

        let err = build(&config, date()).expect_err("unknown placeholder must fail");
        assert!(format!("{err:#}").contains("NOPE"));
        assert!(!config.output_path.exists());
        Ok(())
    }
}
