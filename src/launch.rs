//! Launching things on the host: URLs, files, and configured programs.
//!
//! The OS hand-off sits behind [`SystemOpener`] so every action that pokes
//! the desktop (browser tabs, media files, the alarm sound) can be exercised
//! in tests without side effects.

use crate::error::{AssistantError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Opens URLs and files with the OS default handler.
pub trait SystemOpener: Send + Sync {
    /// Open a URL in the default browser (new tab if one is running).
    fn open_url(&self, url: &str) -> Result<()>;

    /// Open a file with whatever the OS associates with it.
    fn open_path(&self, path: &Path) -> Result<()>;
}

impl<T: SystemOpener + ?Sized> SystemOpener for std::sync::Arc<T> {
    fn open_url(&self, url: &str) -> Result<()> {
        (**self).open_url(url)
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        (**self).open_path(path)
    }
}

/// [`SystemOpener`] backed by the platform open command.
#[derive(Debug, Default)]
pub struct DesktopOpener;

impl DesktopOpener {
    fn spawn_open(&self, target: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = {
            let mut c = Command::new("open");
            c.arg(target);
            c
        };
        #[cfg(target_os = "windows")]
        let mut command = {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", target]);
            c
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = {
            let mut c = Command::new("xdg-open");
            c.arg(target);
            c
        };

        command
            .spawn()
            .map_err(|e| AssistantError::Launch(format!("cannot open {target}: {e}")))?;
        Ok(())
    }
}

impl SystemOpener for DesktopOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        info!("opening url: {url}");
        self.spawn_open(url)
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(AssistantError::Resource(format!(
                "no such file: {}",
                path.display()
            )));
        }
        info!("opening file: {}", path.display());
        self.spawn_open(&path.display().to_string())
    }
}

/// Launches programs registered as per-program path files.
///
/// Registering a program means dropping `<name>.txt` into the paths
/// directory, containing nothing but the executable path to run.
#[derive(Debug, Clone)]
pub struct ProgramLauncher {
    paths_dir: PathBuf,
}

impl ProgramLauncher {
    /// Create a launcher over the given paths directory.
    pub fn new(paths_dir: impl Into<PathBuf>) -> Self {
        Self {
            paths_dir: paths_dir.into(),
        }
    }

    /// Read the path file for `name` and return the executable path it names.
    ///
    /// # Errors
    ///
    /// Returns a resource error when `<name>.txt` is missing or empty.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path_file = self.paths_dir.join(format!("{name}.txt"));
        let raw = std::fs::read_to_string(&path_file).map_err(|e| {
            AssistantError::Resource(format!(
                "no path file for program '{name}' ({}): {e}",
                path_file.display()
            ))
        })?;
        let program = raw.trim();
        if program.is_empty() {
            return Err(AssistantError::Resource(format!(
                "path file for program '{name}' is empty"
            )));
        }
        Ok(PathBuf::from(program))
    }

    /// Launch the program registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns a resource error for a missing path file, or a launch error
    /// when the contained path cannot be executed.
    pub fn launch(&self, name: &str) -> Result<()> {
        let program = self.resolve(name)?;
        info!("launching program: {}", program.display());
        Command::new(&program)
            .spawn()
            .map_err(|e| AssistantError::Launch(format!("cannot run {}: {e}", program.display())))?;
        Ok(())
    }
}
