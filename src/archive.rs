use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::config::BuildConfig;
use crate::formats::ArchiveMetadata;
use crate::page::{self, ComposedPages};

pub const INDEX_FILE_NAME: &str = "index.html";

#[derive(Debug, Clone)]
pub struct WrittenPages {
    pub home_path: PathBuf,
    pub entry_path: PathBuf,
    pub sidecar_path: PathBuf,
}

pub fn entry_path(archive_dir: &Path, date: NaiveDate) -> PathBuf {
    archive_dir.join(format!("{}.html", page::iso_date(date)))
}

pub fn sidecar_path(entry_path: &Path) -> PathBuf {
    entry_path.with_extension("json")
}

/// Writes the current-day page, the dated archive entry and its metadata
/// sidecar. All three are overwritten when the same date is built again.
pub fn write(
    config: &BuildConfig,
    date: NaiveDate,
    pages: &ComposedPages,
    metadata: &ArchiveMetadata,
) -> anyhow::Result<WrittenPages> {
    let home_path = config.output_path.clone();
    if let Some(parent) = home_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }
    std::fs::write(&home_path, &pages.home)
        .with_context(|| format!("write home page: {}", home_path.display()))?;

    std::fs::create_dir_all(&config.archive_dir)
        .with_context(|| format!("create archive dir: {}", config.archive_dir.display()))?;

    let entry_path = entry_path(&config.archive_dir, date);
    std::fs::write(&entry_path, &pages.archived)
        .with_context(|| format!("write archive entry: {}", entry_path.display()))?;

    let sidecar_path = sidecar_path(&entry_path);
    let sidecar = serde_json::to_string_pretty(metadata).context("serialize archive sidecar")?;
    std::fs::write(&sidecar_path, sidecar)
        .with_context(|| format!("write archive sidecar: {}", sidecar_path.display()))?;

    tracing::info!(
        home = %home_path.display(),
        entry = %entry_path.display(),
        "wrote pages"
    );

    Ok(WrittenPages {
        home_path,
        entry_path,
        sidecar_path,
    })
}

/// Archive entries, newest first. ISO-dated file names sort chronologically.
pub fn list_entries(archive_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !archive_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(archive_dir)
        .with_context(|| format!("read archive dir: {}", archive_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(INDEX_FILE_NAME) {
            continue;
        }
        entries.push(path);
    }

    entries.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> ComposedPages {
        ComposedPages {
            home: "home".to_owned(),
            archived: "archived".to_owned(),
        }
    }

    fn metadata() -> ArchiveMetadata {
        ArchiveMetadata {
            date: "01月02日".to_owned(),
            hero: "X".to_owned(),
            temp: "12°C".to_owned(),
            degraded: false,
        }
    }

    #[test]
    fn write_creates_archive_dir_and_overwrites_same_day() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let config = BuildConfig::from_base_dir(temp.path());
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");

        let written = write(&config, date, &pages(), &metadata())?;
        assert_eq!(written.entry_path, temp.path().join("archive/2024-01-02.html"));
        assert_eq!(written.sidecar_path, temp.path().join("archive/2024-01-02.json"));
        assert_eq!(std::fs::read_to_string(&written.home_path)?, "home");

        let mut second = pages();
        second.archived = "archived again".to_owned();
        write(&config, date, &second, &metadata())?;

        assert_eq!(list_entries(&config.archive_dir)?.len(), 1);
        assert_eq!(
            std::fs::read_to_string(&written.entry_path)?,
            "archived again"
        );
        Ok(())
    }

    #[test]
    fn list_entries_sorts_newest_first_and_skips_index() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let dir = temp.path();
        for name in [
            "2024-01-02.html",
            "2023-12-31.html",
            "2024-01-10.html",
            "index.html",
            "2024-01-02.json",
            "notes.txt",
        ] {
            std::fs::write(dir.join(name), "")?;
        }

        let names: Vec<String> = list_entries(dir)?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_owned))
            .collect();
        assert_eq!(
            names,
            vec!["2024-01-10.html", "2024-01-02.html", "2023-12-31.html"]
        );
        Ok(())
    }

    #[test]
    fn list_entries_of_missing_dir_is_empty() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        assert!(list_entries(&temp.path().join("archive"))?.is_empty());
        Ok(())
    }
}
