//! Hot reload of theme configuration files.
//!
//! [ConfigWatcher] watches a configuration file (and the palette files it
//! references) on a background notify thread. Nothing is applied from that
//! thread: the UI turn calls [ConfigWatcher::reload] which drains pending
//! events and, if something changed, publishes the re-resolved palette.
//!
//! A reload that fails (a half-written save, a missing custom palette) stays
//! pending and is retried by the next call to [ConfigWatcher::reload], even
//! when no further event arrives. Palette files that do not exist are not
//! watched.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::ThemeConfig;
use crate::error::ThemeResult;
use crate::registry::{BroadcastReport, ThemeRegistry};

/// Watches a theme configuration file for changes.
pub struct ConfigWatcher {
    watcher: RecommendedWatcher,
    event_rx: mpsc::Receiver<notify::Result<Event>>,
    config_path: PathBuf,
    palette_files: Vec<PathBuf>,
    pending: bool,
}

impl ConfigWatcher {
    /// Start watching `config_path` and every existing palette file it references.
    pub fn new<P: AsRef<Path>>(config_path: P) -> ThemeResult<Self> {
        let config_path = config_path.as_ref().to_path_buf();
        let config = ThemeConfig::from_file(&config_path)?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(&config_path, RecursiveMode::NonRecursive)?;

        let mut this = Self {
            watcher,
            event_rx: rx,
            config_path,
            palette_files: Vec::new(),
            pending: false,
        };
        this.rewatch_palettes(&config);
        Ok(this)
    }

    /// The configuration file being watched.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Palette files currently watched.
    pub fn watched_palette_files(&self) -> &[PathBuf] {
        &self.palette_files
    }

    /// Whether a change is waiting to be applied, including a failed reload.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drain pending events. Returns whether any of them touched a watched file.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        changed = true;
                    }
                },
                Err(err) => log::warn!("Theme watcher error: {}", err),
            }
        }
        changed
    }

    /// Apply pending changes to `registry`.
    ///
    /// Returns `Ok(None)` when nothing changed. A configuration that no longer
    /// parses or resolves is reported as an error, leaves the current palette
    /// alone and is tried again on the next call.
    pub fn reload(&mut self, registry: &ThemeRegistry) -> ThemeResult<Option<BroadcastReport>> {
        if self.poll() {
            self.pending = true;
        }
        if !self.pending {
            return Ok(None);
        }

        let config = ThemeConfig::from_file(&self.config_path)?;
        let palette = config.resolve()?;
        self.pending = false;

        log::info!("Theme config {:?} changed, applying '{}'", self.config_path, palette.name());
        let report = registry.set_current(palette);
        self.rewatch_palettes(&config);
        Ok(Some(report))
    }

    fn rewatch_palettes(&mut self, config: &ThemeConfig) {
        for path in self.palette_files.drain(..) {
            if let Err(err) = self.watcher.unwatch(&path) {
                log::debug!("Could not unwatch {:?}: {}", path, err);
            }
        }

        for path in config.palette_files() {
            if !path.exists() {
                log::warn!("Palette file {:?} does not exist, not watching it", path);
                continue;
            }
            match self.watcher.watch(&path, RecursiveMode::NonRecursive) {
                Ok(()) => self.palette_files.push(path),
                Err(err) => log::warn!("Could not watch palette file {:?}: {}", path, err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, Instant};

    #[test]
    fn missing_config_is_an_error() {
        assert!(ConfigWatcher::new("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn edit_is_applied_on_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "[theme]\ndefault = \"dark\"\n").unwrap();

        let registry = ThemeRegistry::default();
        let mut watcher = ConfigWatcher::new(&path).unwrap();
        assert!(watcher.reload(&registry).unwrap().is_none());

        fs::write(&path, "[theme]\ndefault = \"nord\"\n").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while registry.get_current().name() != "Nord" && Instant::now() < deadline {
            // Partial writes may briefly fail to parse.
            let _ = watcher.reload(&registry);
            std::thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(registry.get_current().name(), "Nord");
    }

    #[test]
    fn failed_reload_is_retried_without_new_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "[theme]\ndefault = \"dark\"\n").unwrap();

        let registry = ThemeRegistry::default();
        let mut watcher = ConfigWatcher::new(&path).unwrap();

        fs::write(&path, "[theme\ndefault = ").unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !watcher.is_pending() && Instant::now() < deadline {
            let _ = watcher.reload(&registry);
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(watcher.is_pending());
        assert!(watcher.reload(&registry).is_err());
        assert!(watcher.is_pending());

        fs::write(&path, "[theme]\ndefault = \"dracula\"\n").unwrap();
        std::thread::sleep(Duration::from_millis(100));
        watcher.poll();

        // The drained events no longer matter; the failed reload is still owed.
        let report = watcher.reload(&registry).unwrap();
        assert!(report.is_some());
        assert!(!watcher.is_pending());
        assert_eq!(registry.get_current().name(), "Dracula");
    }
}
