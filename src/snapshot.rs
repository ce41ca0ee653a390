use std::path::Path;

use anyhow::Context as _;

use crate::formats::Snapshot;

/// Reads today's snapshot. A missing file is reported as `Ok(None)` so the
/// caller can skip the build without treating it as a crash.
pub fn load(path: &Path) -> anyhow::Result<Option<Snapshot>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no snapshot found; nothing to build");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read snapshot: {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&contents)
        .with_context(|| format!("parse snapshot: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        session_id = %snapshot.session_id,
        "loaded snapshot"
    );
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_snapshot_is_none() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        assert!(load(&temp.path().join("data.json"))?.is_none());
        Ok(())
    }

    #[test]
    fn malformed_snapshot_is_an_error() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("data.json");
        std::fs::write(&path, "{ not json")?;
        let err = load(&path).expect_err("malformed json must fail");
        assert!(format!("{err:#}").contains("parse snapshot"));
        Ok(())
    }

    #[test]
    fn loads_partial_snapshot() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("data.json");
        std::fs::write(&path, r#"{"heroNews": {"title": "X"}}"#)?;
        let snapshot = load(&path)?.expect("snapshot present");
        assert_eq!(snapshot.hero_news.title, "X");
        assert_eq!(snapshot.weather.temp, "--");
        Ok(())
    }
}
