/*
[INPUT]:  Mount/unmount shell commands and the clue file path on removable media
[OUTPUT]: Clue text, or a media error the game turns into an in-band message
[POS]:    Media layer - floppy disk clue reader
[UPDATE]: When media handling or clue file rules change
*/

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{DeskError, Result};

/// Clue text as seen by the game controller.
pub trait ClueSource {
    fn read_clue(&mut self) -> Result<String>;
}

/// Floppy drive settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloppyConfig {
    pub clue_path: PathBuf,
    pub mount_command: String,
    pub unmount_command: String,
    /// Pause between reading and unmounting
    pub settle: Duration,
}

impl Default for FloppyConfig {
    fn default() -> Self {
        Self {
            clue_path: PathBuf::from("/media/pi/clue.txt"),
            mount_command: "sudo mount -t msdos /dev/sda /media/pi".to_string(),
            unmount_command: "sudo umount -t msdos /dev/sda".to_string(),
            settle: Duration::from_secs(1),
        }
    }
}

/// Mounts the drive, reads the clue file and unmounts again.
#[derive(Debug, Clone)]
pub struct FloppyDrive {
    config: FloppyConfig,
}

impl FloppyDrive {
    pub fn new(config: FloppyConfig) -> Self {
        Self { config }
    }

    fn mounted_read(&self) -> Result<String> {
        run_shell(&self.config.mount_command)?;
        let text = read_txt(&self.config.clue_path)?;
        std::thread::sleep(self.config.settle);
        run_shell(&self.config.unmount_command)?;
        Ok(text)
    }
}

impl ClueSource for FloppyDrive {
    fn read_clue(&mut self) -> Result<String> {
        let result = self.mounted_read();
        // leave the drive unmounted even when the read failed
        if let Err(err) = run_shell(&self.config.unmount_command) {
            debug!(error = %err, "cautionary unmount failed");
        }
        match &result {
            Ok(text) => info!(chars = text.chars().count(), "clue read from floppy"),
            Err(err) => warn!(error = %err, "floppy clue unavailable"),
        }
        result
    }
}

/// Read a UTF-8 `.txt` file.
pub fn read_txt(path: &Path) -> Result<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
        return Err(DeskError::NotTextFile(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| DeskError::ClueUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Run a shell command line. A non-zero exit is logged, not returned.
fn run_shell(command: &str) -> Result<()> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|source| DeskError::MediaCommand {
            command: command.to_string(),
            source,
        })?;
    if !status.success() {
        debug!(command, status = %status, "media command exited unsuccessfully");
    }
    Ok(())
}
