use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_DIR: &str = "daily_brief";

/// File locations used by one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub snapshot_path: PathBuf,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub archive_dir: PathBuf,
}

impl BuildConfig {
    /// `data.json`, `template.html`, `index.html` and `archive/` under `base_dir`.
    pub fn from_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            snapshot_path: base_dir.join("data.json"),
            template_path: base_dir.join("template.html"),
            output_path: base_dir.join("index.html"),
            archive_dir: base_dir.join("archive"),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::from_base_dir(DEFAULT_BASE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_dir_layout() {
        let config = BuildConfig::from_base_dir("/srv/brief");
        assert_eq!(config.snapshot_path, PathBuf::from("/srv/brief/data.json"));
        assert_eq!(config.template_path, PathBuf::from("/srv/brief/template.html"));
        assert_eq!(config.output_path, PathBuf::from("/srv/brief/index.html"));
        assert_eq!(config.archive_dir, PathBuf::from("/srv/brief/archive"));
    }
}
