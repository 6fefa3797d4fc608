/*
[INPUT]:  CLI arguments, YAML configuration file, ENIGM_* environment overrides
[OUTPUT]: Running kiosk session, hardware diagnostics or a generated config
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup order, or shutdown handling
*/

mod cli;
mod tui;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use enigm_desk_adapter::{list_pictures, FloppyDrive, RfidReader, SensorClient, SerialTagDevice};
use enigm_desk_kiosk::{GameController, Hardware, KioskConfig, SessionEnd, TaskUnlockEngine};

use crate::tui::TuiSurface;

const LOG_FILE_PREFIX: &str = "kiosk.log";

#[derive(Parser, Debug)]
#[command(name = "enigm-desk-kiosk", version, about = "Escape-room desk kiosk")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    /// Load and validate the configuration, then exit
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full game session (default)
    Run,
    /// Query both desk sensors once
    Sensors,
    /// Scan one RFID badge
    Scan,
    /// Generate a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH", default_value = "kiosk.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    match args.command.unwrap_or(Command::Run) {
        Command::Init { output } => cli::init::run_init(output),
        command => run_with_config(args.config_path.as_deref(), &args.log_level, args.dry_run, command),
    }
}

fn run_with_config(
    config_path: Option<&Path>,
    log_level: &str,
    dry_run: bool,
    command: Command,
) -> Result<()> {
    let config_path = config_path.context("--config <PATH> is required")?;
    let config = load_config(config_path)?;

    if dry_run {
        init_stderr_tracing(log_level)?;
        info!(
            config_path = %config_path.display(),
            cards = config.rfid.cards.len(),
            "dry-run requested; configuration validated"
        );
        return Ok(());
    }

    match command {
        Command::Sensors => {
            init_stderr_tracing(log_level)?;
            cli::diagnostics::run_sensors(&config)
        }
        Command::Scan => {
            init_stderr_tracing(log_level)?;
            cli::diagnostics::run_scan(&config)
        }
        _ => {
            let _guard = init_file_tracing(log_level, &config.log_directory())?;
            info!(config_path = %config_path.display(), "starting enigm-desk-kiosk");
            run_kiosk(&config)
        }
    }
}

fn run_kiosk(config: &KioskConfig) -> Result<()> {
    let roster = config.roster()?;

    let sensor_link = config.sensor_link();
    let sensors = SensorClient::open(&sensor_link)
        .with_context(|| format!("open sensor link {}", sensor_link.port))?;
    info!(port = %sensor_link.port, "sensor link ready");

    let pictures = match list_pictures(&config.pictures.folder, &config.pictures.extension) {
        Ok(pictures) => pictures,
        Err(err) => {
            warn!(
                folder = %config.pictures.folder.display(),
                error = %err,
                "picture folder unreadable; showing a blank frame"
            );
            Vec::new()
        }
    };
    info!(count = pictures.len(), "pictures loaded");

    let rfid_link = config.rfid_link();
    let device = SerialTagDevice::open(&rfid_link)
        .with_context(|| format!("open rfid bridge {}", rfid_link.port))?;
    info!(port = %rfid_link.port, "rfid bridge ready");

    let hardware = Hardware {
        sensors: Box::new(sensors),
        scanner: Box::new(RfidReader::new(device)),
        clues: Box::new(FloppyDrive::new(config.floppy())),
    };
    let surface = TuiSurface::new(config.screen).context("enter full-screen terminal")?;

    let mut controller =
        GameController::new(hardware, Box::new(surface), TaskUnlockEngine::new(roster))
            .with_timing(config.timing())
            .with_geometry(config.screen)
            .with_pictures(pictures);

    let outcome = controller.run();
    controller.shutdown();
    drop(controller);

    match outcome.context("kiosk session")? {
        SessionEnd::Quit => info!("session ended from the quit region"),
        SessionEnd::Exit => info!("session ended with the exit key"),
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<KioskConfig> {
    let config = KioskConfig::from_file(path).context("load config")?;
    config.validate().context("validate config")?;
    Ok(config)
}

fn init_stderr_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// The terminal UI owns stdout, so the session logs to a daily rolling file.
fn init_file_tracing(log_level: &str, directory: &Path) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("create log directory {}", directory.display()))?;
    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
