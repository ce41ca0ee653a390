use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::archive::{self, INDEX_FILE_NAME};
use crate::formats::ArchiveMetadata;
use crate::metadata;
use crate::render::escape_html;

const EMPTY_ARCHIVE: &str = "暂无归档";

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub file_name: String,
    pub metadata: ArchiveMetadata,
}

#[derive(Debug, Clone)]
pub struct IndexReport {
    pub index_path: PathBuf,
    pub entries: usize,
    pub degraded: usize,
}

/// Rescans the archive directory and rewrites `index.html` from scratch.
pub fn rebuild(archive_dir: &Path) -> anyhow::Result<IndexReport> {
    std::fs::create_dir_all(archive_dir)
        .with_context(|| format!("create archive dir: {}", archive_dir.display()))?;

    let entries = collect(archive_dir)?;
    let html = render_index(&entries);

    let index_path = archive_dir.join(INDEX_FILE_NAME);
    std::fs::write(&index_path, html)
        .with_context(|| format!("write archive index: {}", index_path.display()))?;

    let degraded = entries.iter().filter(|e| e.metadata.degraded).count();
    tracing::info!(
        path = %index_path.display(),
        entries = entries.len(),
        degraded,
        "rebuilt archive index"
    );

    Ok(IndexReport {
        index_path,
        entries: entries.len(),
        degraded,
    })
}

pub fn collect(archive_dir: &Path) -> anyhow::Result<Vec<IndexEntry>> {
    let entries = archive::list_entries(archive_dir)?
        .into_iter()
        .map(|path| IndexEntry {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            metadata: metadata::load(&path),
        })
        .collect();
    Ok(entries)
}

pub fn render_index(entries: &[IndexEntry]) -> String {
    let cards = if entries.is_empty() {
        format!("<div class=\"text-sm text-gray-500\">{EMPTY_ARCHIVE}</div>")
    } else {
        entries.iter().map(render_card).collect::<String>()
    };

    format!(
        r#"<!DOCTYPE html><html lang="zh-CN" class="dark"><head><meta charset="UTF-8"><meta name="viewport" content="width=device-width, initial-scale=1.0"><title>归档</title><script src="https://cdn.tailwindcss.com"></script><style>body{{background-color:#050505;color:#fff;min-height:100vh}}</style></head><body class="p-6 md:p-12"><div class="max-w-5xl mx-auto"><header class="mb-12 flex justify-between"><div><h1 class="text-3xl font-bold">归档时间线</h1></div><a href="../index.html" class="text-sm text-gray-500 hover:text-white">&larr; 返回首页</a></header><div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">{cards}</div></div></body></html>"#
    )
}

fn render_card(entry: &IndexEntry) -> String {
    let temp = if entry.metadata.temp.is_empty() {
        String::new()
    } else {
        format!(
            "<span class=\"text-sm font-mono text-gray-400\">{}</span>",
            escape_html(&entry.metadata.temp)
        )
    };

    format!(
        r#"
        <a href="{href}" class="archive-card group relative block p-6 bg-white/5 border border-white/10 rounded-xl overflow-hidden hover:border-blue-500/50 hover:bg-white/10 transition-all duration-300">
            <div class="absolute inset-0 bg-gradient-to-r from-blue-500/0 via-blue-500/0 to-blue-500/0 group-hover:from-blue-500/5 group-hover:to-purple-500/5 transition-all"></div>
            <div class="flex justify-between items-start mb-4">
                <div class="flex flex-col">
                    <span class="text-xs font-mono text-blue-300 uppercase tracking-wider">简报</span>
                    <span class="text-xl font-bold text-white mt-1">{date}</span>
                </div>
                {temp}
            </div>
            <h3 class="text-gray-300 font-medium leading-relaxed group-hover:text-white transition-colors line-clamp-2">{hero}</h3>
        </a>
        "#,
        href = escape_html(&entry.file_name),
        date = escape_html(&entry.metadata.date),
        hero = escape_html(&entry.metadata.hero),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_entry(dir: &Path, date: &str, hero: &str) -> anyhow::Result<()> {
        std::fs::write(
            dir.join(format!("{date}.html")),
            format!("<h1>{date}</h1><h2><a href=\"#\">{hero}</a></h2>"),
        )?;
        Ok(())
    }

    #[test]
    fn one_card_per_entry_newest_first() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let dir = temp.path();
        write_entry(dir, "2024-01-01", "First")?;
        write_entry(dir, "2024-01-03", "Third")?;
        write_entry(dir, "2024-01-02", "Second")?;

        let report = rebuild(dir)?;
        assert_eq!(report.entries, 3);
        assert_eq!(report.degraded, 0);

        let html = std::fs::read_to_string(&report.index_path)?;
        assert_eq!(html.matches("archive-card").count(), 3);
        let third = html.find("Third").expect("third card");
        let second = html.find("Second").expect("second card");
        let first = html.find("First").expect("first card");
        assert!(third < second && second < first);
        assert!(html.contains("href=\"2024-01-03.html\""));
        assert!(html.contains("href=\"../index.html\""));

        let report = rebuild(dir)?;
        assert_eq!(report.entries, 3, "index file itself must not be counted");
        Ok(())
    }

    #[test]
    fn broken_entry_does_not_abort_rebuild() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let dir = temp.path();
        write_entry(dir, "2024-01-01", "Fine")?;
        std::fs::write(dir.join("2024-01-02.html"), "")?;

        let report = rebuild(dir)?;
        assert_eq!(report.entries, 2);
        assert_eq!(report.degraded, 1);

        let html = std::fs::read_to_string(&report.index_path)?;
        assert!(html.contains(metadata::UNKNOWN_HERO));
        assert!(html.contains("Fine"));
        Ok(())
    }

    #[test]
    fn empty_archive_renders_placeholder() {
        let html = render_index(&[]);
        assert!(html.contains(EMPTY_ARCHIVE));
        assert!(!html.contains("archive-card"));
    }
}
