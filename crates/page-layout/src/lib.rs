#![deny(warnings)]

//! Page layout files: which targets exist and whether charts can be drawn.
//!
//! A layout is a small YAML document:
//!
//! ```yaml
//! charts: true
//! absent: [chart_s3_bars, s6_madurez]
//! ```
//!
//! Both keys are optional. [`LayoutWatcher`] reloads the file when its
//! modification time advances.

use panel_core::PageLayout;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid layout: {0}")]
    Yaml(String),
}

impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        LayoutError::Io(e.to_string())
    }
}

impl From<serde_yaml::Error> for LayoutError {
    fn from(e: serde_yaml::Error) -> Self {
        LayoutError::Yaml(e.to_string())
    }
}

/// Parse a layout document. An empty document is the full page.
pub fn parse_layout(text: &str) -> Result<PageLayout, LayoutError> {
    if text.trim().is_empty() {
        return Ok(PageLayout::full());
    }
    Ok(serde_yaml::from_str(text)?)
}

pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<PageLayout, LayoutError> {
    let text = fs::read_to_string(path.as_ref())?;
    let layout = parse_layout(&text)?;
    debug!(
        path = %path.as_ref().display(),
        charts = layout.charts,
        absent = layout.absent.len(),
        "layout loaded"
    );
    Ok(layout)
}

/// Keeps a layout file and its last seen modification time.
#[derive(Debug, Clone)]
pub struct LayoutWatcher {
    path: PathBuf,
    mtime: SystemTime,
    current: PageLayout,
}

impl LayoutWatcher {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref().to_path_buf();
        let mtime = modified(&path)?;
        let current = load_layout(&path)?;
        Ok(Self {
            path,
            mtime,
            current,
        })
    }

    pub fn current(&self) -> &PageLayout {
        &self.current
    }

    /// Re-read the file if it changed on disk. Returns the new layout when
    /// it was reloaded; a file that fails to parse keeps the previous one.
    pub fn reload_if_changed(&mut self) -> Result<Option<&PageLayout>, LayoutError> {
        let mtime = modified(&self.path)?;
        if mtime <= self.mtime {
            return Ok(None);
        }
        self.mtime = mtime;
        self.current = load_layout(&self.path)?;
        info!("Reloading layout: {}", self.path.display());
        Ok(Some(&self.current))
    }
}

fn modified(path: &Path) -> Result<SystemTime, LayoutError> {
    Ok(fs::metadata(path)?
        .modified()
        .unwrap_or(SystemTime::UNIX_EPOCH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("page-layout-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn parses_partial_documents() {
        let layout = parse_layout("absent: [chart_s3_bars]\n").unwrap();
        assert!(layout.charts);
        assert!(!layout.has("chart_s3_bars"));
        assert!(layout.has("s3_eff"));

        let layout = parse_layout("charts: false").unwrap();
        assert!(!layout.charts);
        assert!(layout.absent.is_empty());

        assert_eq!(parse_layout("  \n").unwrap(), PageLayout::full());
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            parse_layout("charts: [not, a, bool]"),
            Err(LayoutError::Yaml(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_layout(scratch("does-not-exist.yaml")),
            Err(LayoutError::Io(_))
        ));
    }

    #[test]
    fn watcher_reloads_on_newer_mtime() {
        let path = scratch("watch.yaml");
        fs::write(&path, "charts: true\n").unwrap();
        let mut watcher = LayoutWatcher::open(&path).unwrap();
        assert!(watcher.current().charts);
        assert!(watcher.reload_if_changed().unwrap().is_none());

        fs::write(&path, "charts: false\nabsent: [s1_entorno]\n").unwrap();
        let later = SystemTime::now() + Duration::from_secs(5);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();
        let reloaded = watcher.reload_if_changed().unwrap().cloned().unwrap();
        assert!(!reloaded.charts);
        assert!(!reloaded.has("s1_entorno"));
        assert_eq!(watcher.current(), &reloaded);
        fs::remove_file(&path).ok();
    }
}
