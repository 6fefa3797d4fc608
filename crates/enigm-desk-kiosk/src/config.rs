/*
[INPUT]:  YAML configuration file, ENIGM_* environment overrides
[OUTPUT]: Parsed and validated kiosk configuration
[POS]:    Configuration layer - hardware links, roster, timing, screen geometry
[UPDATE]: When adding new configuration options
*/

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};

use enigm_desk_adapter::{CardIdentifier, FloppyConfig, SerialConfig};

use crate::controller::GameTiming;
use crate::regions::ScreenGeometry;
use crate::unlock::TASK_COUNT;

/// Prefix of environment overrides, e.g. `ENIGM_SERIAL__PORT`
pub const ENV_PREFIX: &str = "ENIGM";

/// Top-level configuration for the kiosk
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub serial: SerialSection,
    #[serde(default)]
    pub rfid: RfidSection,
    #[serde(default)]
    pub media: MediaSection,
    #[serde(default)]
    pub pictures: PicturesSection,
    #[serde(default)]
    pub timing: TimingSection,
    #[serde(default)]
    pub screen: ScreenGeometry,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Sensor microcontroller link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SerialSection {
    #[serde(default = "default_serial_port")]
    pub port: String,
    #[serde(default = "default_serial_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_serial_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

/// RFID bridge link and the ordered task roster
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RfidSection {
    #[serde(default = "default_rfid_port")]
    pub port: String,
    #[serde(default = "default_rfid_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_rfid_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// One card per task, in required completion order
    #[serde(default = "default_cards")]
    pub cards: Vec<CardIdentifier>,
}

/// Floppy disk holding the clue file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MediaSection {
    #[serde(default = "default_clue_path")]
    pub clue_path: PathBuf,
    #[serde(default = "default_mount_command")]
    pub mount_command: String,
    #[serde(default = "default_unmount_command")]
    pub unmount_command: String,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PicturesSection {
    #[serde(default = "default_picture_folder")]
    pub folder: PathBuf,
    #[serde(default = "default_picture_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimingSection {
    #[serde(default = "default_picture_interval_secs")]
    pub picture_interval_secs: u64,
    #[serde(default = "default_clue_reveal_secs")]
    pub clue_reveal_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Unset means polling phases wait forever
    #[serde(default)]
    pub phase_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSection {
    /// Defaults to `<data-local-dir>/enigm-desk/logs`
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for SerialSection {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_serial_baud_rate(),
            read_timeout_ms: default_serial_read_timeout_ms(),
        }
    }
}

impl Default for RfidSection {
    fn default() -> Self {
        Self {
            port: default_rfid_port(),
            baud_rate: default_rfid_baud_rate(),
            read_timeout_ms: default_rfid_read_timeout_ms(),
            cards: default_cards(),
        }
    }
}

impl Default for MediaSection {
    fn default() -> Self {
        Self {
            clue_path: default_clue_path(),
            mount_command: default_mount_command(),
            unmount_command: default_unmount_command(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for PicturesSection {
    fn default() -> Self {
        Self {
            folder: default_picture_folder(),
            extension: default_picture_extension(),
        }
    }
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            picture_interval_secs: default_picture_interval_secs(),
            clue_reveal_secs: default_clue_reveal_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            phase_timeout_secs: None,
        }
    }
}

fn default_serial_port() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_serial_baud_rate() -> u32 {
    9600
}

fn default_serial_read_timeout_ms() -> u64 {
    10_000
}

fn default_rfid_port() -> String {
    "/dev/ttyUSB1".to_string()
}

fn default_rfid_baud_rate() -> u32 {
    115_200
}

fn default_rfid_read_timeout_ms() -> u64 {
    500
}

fn default_cards() -> Vec<CardIdentifier> {
    vec![
        CardIdentifier::new([25, 201, 83, 179, 48]),
        CardIdentifier::new([105, 26, 84, 179, 148]),
        CardIdentifier::new([249, 138, 83, 179, 147]),
        CardIdentifier::new([137, 225, 73, 178, 147]),
        CardIdentifier::new([217, 194, 99, 178, 202]),
    ]
}

fn default_clue_path() -> PathBuf {
    PathBuf::from("/media/pi/clue.txt")
}

fn default_mount_command() -> String {
    "sudo mount -t msdos /dev/sda /media/pi".to_string()
}

fn default_unmount_command() -> String {
    "sudo umount -t msdos /dev/sda".to_string()
}

fn default_settle_ms() -> u64 {
    1000
}

fn default_picture_folder() -> PathBuf {
    PathBuf::from("PictureFrame")
}

fn default_picture_extension() -> String {
    "png".to_string()
}

fn default_picture_interval_secs() -> u64 {
    20
}

fn default_clue_reveal_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    50
}

impl KioskConfig {
    /// Load configuration from a YAML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::load(path.as_ref(), None)
    }

    /// `env` replaces the process environment when given.
    fn load(path: &Path, env: Option<::config::Map<String, String>>) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Yaml))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = settings
            .try_deserialize()
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.rfid.cards.len() == TASK_COUNT,
            "rfid.cards must list exactly {TASK_COUNT} cards, found {}",
            self.rfid.cards.len()
        );
        let mut seen = HashSet::new();
        for card in &self.rfid.cards {
            if !seen.insert(card) {
                bail!("rfid.cards lists {card} more than once");
            }
        }
        ensure!(
            self.media.clue_path.extension().and_then(|ext| ext.to_str()) == Some("txt"),
            "media.clue_path must point at a .txt file"
        );
        ensure!(self.serial.baud_rate > 0, "serial.baud_rate must be positive");
        ensure!(self.rfid.baud_rate > 0, "rfid.baud_rate must be positive");
        ensure!(
            self.serial.read_timeout_ms > 0,
            "serial.read_timeout_ms must be positive"
        );
        ensure!(
            self.rfid.read_timeout_ms > 0,
            "rfid.read_timeout_ms must be positive"
        );
        ensure!(
            self.timing.poll_interval_ms > 0,
            "timing.poll_interval_ms must be positive"
        );
        ensure!(
            self.screen.is_consistent(),
            "screen geometry leaves no room between header and footer"
        );
        Ok(())
    }

    /// Ordered roster; call after [`KioskConfig::validate`]
    pub fn roster(&self) -> anyhow::Result<[CardIdentifier; TASK_COUNT]> {
        self.rfid
            .cards
            .clone()
            .try_into()
            .map_err(|cards: Vec<CardIdentifier>| {
                anyhow::anyhow!("expected {TASK_COUNT} cards, found {}", cards.len())
            })
    }

    pub fn sensor_link(&self) -> SerialConfig {
        SerialConfig {
            port: self.serial.port.clone(),
            baud_rate: self.serial.baud_rate,
            read_timeout: Duration::from_millis(self.serial.read_timeout_ms),
        }
    }

    pub fn rfid_link(&self) -> SerialConfig {
        SerialConfig {
            port: self.rfid.port.clone(),
            baud_rate: self.rfid.baud_rate,
            read_timeout: Duration::from_millis(self.rfid.read_timeout_ms),
        }
    }

    pub fn floppy(&self) -> FloppyConfig {
        FloppyConfig {
            clue_path: self.media.clue_path.clone(),
            mount_command: self.media.mount_command.clone(),
            unmount_command: self.media.unmount_command.clone(),
            settle: Duration::from_millis(self.media.settle_ms),
        }
    }

    pub fn timing(&self) -> GameTiming {
        GameTiming {
            picture_interval: Duration::from_secs(self.timing.picture_interval_secs),
            clue_reveal: Duration::from_secs(self.timing.clue_reveal_secs),
            poll_interval: Duration::from_millis(self.timing.poll_interval_ms),
            phase_timeout: self.timing.phase_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn log_directory(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("enigm-desk")
                .join("logs")
        })
    }
}
