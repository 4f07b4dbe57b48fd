use std::{io, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Opened,
    Unsupported,
}

/// Shows a file or folder in the platform's file browser.
pub trait RevealInFileBrowser: Send + Sync {
    fn reveal(&self, path: &Path) -> io::Result<RevealOutcome>;
}

pub struct SystemFileBrowser;

impl RevealInFileBrowser for SystemFileBrowser {
    #[cfg(target_os = "windows")]
    fn reveal(&self, path: &Path) -> io::Result<RevealOutcome> {
        use std::{os::windows::process::CommandExt, process::Command};

        if path.is_dir() {
            Command::new("explorer").arg(path).spawn()?;
        } else {
            // explorer only understands the select switch unquoted, with the path quoted after the comma
            Command::new("explorer").raw_arg(explorer_select_arg(path)).spawn()?;
        }
        Ok(RevealOutcome::Opened)
    }

    #[cfg(target_os = "macos")]
    fn reveal(&self, path: &Path) -> io::Result<RevealOutcome> {
        use std::process::Command;

        Command::new("open").arg("-R").arg(path).spawn()?;
        Ok(RevealOutcome::Opened)
    }

    #[cfg(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    ))]
    fn reveal(&self, path: &Path) -> io::Result<RevealOutcome> {
        // No portable "select file" call here, so open the containing folder
        let folder = if path.is_dir() { path } else { path.parent().unwrap_or(path) };
        open::that_detached(folder)?;
        Ok(RevealOutcome::Opened)
    }

    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "linux",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    )))]
    fn reveal(&self, _path: &Path) -> io::Result<RevealOutcome> {
        Ok(RevealOutcome::Unsupported)
    }
}

#[cfg(any(target_os = "windows", test))]
fn explorer_select_arg(path: &Path) -> String {
    format!("/select,\"{}\"", path.display())
}

pub struct NoFileBrowser;

impl RevealInFileBrowser for NoFileBrowser {
    fn reveal(&self, _path: &Path) -> io::Result<RevealOutcome> {
        Ok(RevealOutcome::Unsupported)
    }
}

#[cfg(test)]
pub mod recording {
    use std::{
        io,
        path::{Path, PathBuf},
        sync::{Arc, Mutex},
    };

    use super::{RevealInFileBrowser, RevealOutcome};

    #[derive(Default, Clone)]
    pub struct RecordingFileBrowser {
        revealed: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl RecordingFileBrowser {
        pub fn revealed(&self) -> Vec<PathBuf> {
            self.revealed.lock().unwrap().clone()
        }
    }

    impl RevealInFileBrowser for RecordingFileBrowser {
        fn reveal(&self, path: &Path) -> io::Result<RevealOutcome> {
            self.revealed.lock().unwrap().push(path.to_path_buf());
            Ok(RevealOutcome::Opened)
        }
    }
}
