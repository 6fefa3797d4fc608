/*
[INPUT]:  Sensor bus, card scanner, clue source, display/input surface, clock
[OUTPUT]: Sequenced game phases, rendered screens, actuator commands, session end
[POS]:    Game domain logic - top-level phase controller
[UPDATE]: When phase sequencing, polling or tap handling changes
*/

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use enigm_desk_adapter::{
    ActuatorCommand, CardScanner, ClueSource, DeskError, SensorName, SensorBus,
};

use crate::clock::{Clock, SystemClock};
use crate::phase::{route_tap, GamePhase, TapAction};
use crate::regions::{Point, ScreenGeometry};
use crate::screen::{
    Chrome, Display, InputEvent, InputSource, RfidOutcome, Screen, FLOPPY_TITLE, HUB_TITLE,
    MEDIA_ERROR_TEXT, RFID_TITLE, WIN_TITLE,
};
use crate::unlock::{TaskUnlockEngine, UnlockOutcome};

/// How long the interactive loop waits for input before polling again
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Timing of the polling phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTiming {
    /// Picture cadence while waiting for the pressure sensor
    pub picture_interval: Duration,
    /// Elapsed time in `WaitLoadCell` before the clue is revealed
    pub clue_reveal: Duration,
    /// Delay between two sensor queries
    pub poll_interval: Duration,
    /// Upper bound on a single polling phase
    pub phase_timeout: Option<Duration>,
}

impl Default for GameTiming {
    fn default() -> Self {
        Self {
            picture_interval: Duration::from_secs(20),
            clue_reveal: Duration::from_secs(30),
            poll_interval: Duration::from_millis(50),
            phase_timeout: None,
        }
    }
}

/// Conditions that end a session early
#[derive(Debug, Error)]
pub enum KioskError {
    #[error("Display error: {0}")]
    Display(#[from] io::Error),

    #[error("Phase {phase} timed out after {}s without sensor activation", waited.as_secs())]
    PhaseTimeout { phase: GamePhase, waited: Duration },

    #[error("Sensor link lost: {0}")]
    SensorLinkLost(#[source] DeskError),
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Quit region tapped; the solenoid was released
    Quit,
    /// Exit key pressed
    Exit,
}

/// Display and input backed by the same full-screen surface
pub trait Surface: Display + InputSource {}

impl<T: Display + InputSource> Surface for T {}

/// Hardware collaborators owned by the controller
pub struct Hardware {
    pub sensors: Box<dyn SensorBus>,
    pub scanner: Box<dyn CardScanner>,
    pub clues: Box<dyn ClueSource>,
}

/// Top-level state machine for one kiosk session
pub struct GameController {
    hardware: Hardware,
    surface: Box<dyn Surface>,
    clock: Box<dyn Clock>,
    engine: TaskUnlockEngine,
    geometry: ScreenGeometry,
    timing: GameTiming,
    pictures: Vec<PathBuf>,
    phase: GamePhase,
}

impl GameController {
    pub fn new(hardware: Hardware, surface: Box<dyn Surface>, engine: TaskUnlockEngine) -> Self {
        Self {
            hardware,
            surface,
            clock: Box::new(SystemClock),
            engine,
            geometry: ScreenGeometry::default(),
            timing: GameTiming::default(),
            pictures: Vec::new(),
            phase: GamePhase::PictureFrame,
        }
    }

    pub fn with_timing(mut self, timing: GameTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_geometry(mut self, geometry: ScreenGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_pictures(mut self, pictures: Vec<PathBuf>) -> Self {
        self.pictures = pictures;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn engine(&self) -> &TaskUnlockEngine {
        &self.engine
    }

    /// Run the whole session: both polling phases, then tap handling until quit or exit.
    pub fn run(&mut self) -> Result<SessionEnd, KioskError> {
        info!(pictures = self.pictures.len(), "session started");
        if let Some(end) = self.await_pressure()? {
            return Ok(end);
        }
        if let Some(end) = self.await_load_cell()? {
            return Ok(end);
        }
        loop {
            let Some(event) = self.surface.poll_event(INPUT_POLL_INTERVAL)? else {
                continue;
            };
            if let Some(end) = self.handle_event(event)? {
                return Ok(end);
            }
        }
    }

    /// `PictureFrame`: cycle pictures until the pressure sensor fires.
    pub fn await_pressure(&mut self) -> Result<Option<SessionEnd>, KioskError> {
        self.phase = GamePhase::PictureFrame;
        let started = self.clock.now();
        let mut cursor = 0;
        let mut shown_at = self.show_next_picture(&mut cursor)?;

        loop {
            if self.sensor_active(SensorName::PressureSensor)? {
                info!("pressure sensor activated");
                self.enter(GamePhase::WaitLoadCell)?;
                return Ok(None);
            }
            if self.clock.now().duration_since(shown_at) >= self.timing.picture_interval {
                shown_at = self.show_next_picture(&mut cursor)?;
            }
            if let Some(end) = self.idle(started)? {
                return Ok(Some(end));
            }
        }
    }

    /// `WaitLoadCell`: poll the load cell, revealing the clue once after the threshold.
    pub fn await_load_cell(&mut self) -> Result<Option<SessionEnd>, KioskError> {
        self.phase = GamePhase::WaitLoadCell;
        let started = self.clock.now();
        let mut clue_shown = false;

        loop {
            if self.sensor_active(SensorName::LoadCell)? {
                info!("load cell activated");
                self.enter(GamePhase::SelectionHub)?;
                return Ok(None);
            }
            if !clue_shown && self.clock.now().duration_since(started) >= self.timing.clue_reveal {
                info!("revealing load cell clue");
                self.surface.render(&Screen::LoadCellClue)?;
                clue_shown = true;
            }
            if let Some(end) = self.idle(started)? {
                return Ok(Some(end));
            }
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Result<Option<SessionEnd>, KioskError> {
        match event {
            InputEvent::Exit => {
                info!(phase = %self.phase, "exit key pressed");
                Ok(Some(SessionEnd::Exit))
            }
            InputEvent::Tap(point) => self.handle_tap(point),
        }
    }

    pub fn handle_tap(&mut self, point: Point) -> Result<Option<SessionEnd>, KioskError> {
        let Some(region) = self.geometry.classify(point) else {
            return Ok(None);
        };

        match route_tap(self.phase, region, self.engine.all_completed()) {
            TapAction::Quit => {
                self.hardware
                    .sensors
                    .command(ActuatorCommand::DeactivateSolenoid);
                info!(phase = %self.phase, "quit requested");
                Ok(Some(SessionEnd::Quit))
            }
            TapAction::Navigate(next) => {
                self.enter(next)?;
                Ok(None)
            }
            TapAction::Ignore => {
                debug!(phase = %self.phase, ?region, "tap ignored");
                Ok(None)
            }
        }
    }

    /// Issue `cleanup` on the sensor link.
    pub fn shutdown(&mut self) {
        self.hardware.sensors.shutdown();
    }

    fn enter(&mut self, next: GamePhase) -> Result<(), KioskError> {
        info!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
        match next {
            GamePhase::PictureFrame => Ok(()),
            GamePhase::WaitLoadCell => self.surface.render(&Screen::DeskError).map_err(Into::into),
            GamePhase::SelectionHub => {
                let chrome = self.chrome(HUB_TITLE, false);
                self.surface
                    .render(&Screen::SelectionHub { chrome })
                    .map_err(Into::into)
            }
            GamePhase::FloppyView => self.show_floppy(),
            GamePhase::RfidView => self.show_rfid(),
            GamePhase::WinScreen => {
                self.hardware
                    .sensors
                    .command(ActuatorCommand::DeactivateSolenoid);
                let chrome = self.chrome(WIN_TITLE, false);
                self.surface.render(&Screen::Win { chrome }).map_err(Into::into)
            }
        }
    }

    fn show_floppy(&mut self) -> Result<(), KioskError> {
        let chrome = self.chrome(FLOPPY_TITLE, true);
        self.surface.render(&Screen::FloppyLoading {
            chrome: chrome.clone(),
        })?;

        let text = match self.hardware.clues.read_clue() {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "floppy read failed");
                MEDIA_ERROR_TEXT.to_string()
            }
        };
        self.surface.render(&Screen::floppy_clue(chrome, text))?;
        Ok(())
    }

    fn show_rfid(&mut self) -> Result<(), KioskError> {
        let chrome = self.chrome(RFID_TITLE, true);
        self.surface.render(&Screen::RfidScanning { chrome })?;

        let outcome = match self.hardware.scanner.scan() {
            Ok(card) => {
                let outcome = self.engine.apply(&card);
                match outcome {
                    UnlockOutcome::NewlyCompleted(task) => info!(task, %card, "task completed"),
                    UnlockOutcome::AlreadyCompleted(task) => {
                        info!(task, %card, "task already completed")
                    }
                    UnlockOutcome::OutOfOrder(task) => warn!(task, %card, "card scanned out of order"),
                    UnlockOutcome::UnknownCard => warn!(%card, "unknown card"),
                }
                RfidOutcome::Unlock(outcome)
            }
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "rfid scan failed");
                RfidOutcome::ScanFailed
            }
            Err(err) => {
                error!(error = %err, "rfid reader error");
                RfidOutcome::ScanFailed
            }
        };

        if self.engine.all_completed() {
            info!("all tasks completed");
        }
        let chrome = self.chrome(RFID_TITLE, true);
        self.surface
            .render(&Screen::RfidResult { chrome, outcome })?;
        Ok(())
    }

    fn sensor_active(&mut self, sensor: SensorName) -> Result<bool, KioskError> {
        self.hardware.sensors.query(sensor).map_err(|err| {
            error!(sensor = %sensor, phase = %self.phase, error = %err, "sensor link lost");
            KioskError::SensorLinkLost(err)
        })
    }

    fn show_next_picture(&mut self, cursor: &mut usize) -> Result<Instant, KioskError> {
        let picture = if self.pictures.is_empty() {
            None
        } else {
            let picture = self.pictures[*cursor % self.pictures.len()].clone();
            *cursor += 1;
            Some(picture)
        };
        debug!(picture = ?picture, "showing picture");
        self.surface.render(&Screen::PictureFrame { picture })?;
        Ok(self.clock.now())
    }

    /// Pause between polls, enforce the phase timeout and honor exit/quit input.
    fn idle(&mut self, started: Instant) -> Result<Option<SessionEnd>, KioskError> {
        self.clock.sleep(self.timing.poll_interval);

        if let Some(limit) = self.timing.phase_timeout {
            let waited = self.clock.now().duration_since(started);
            if waited >= limit {
                warn!(phase = %self.phase, waited_secs = waited.as_secs(), "phase timed out");
                return Err(KioskError::PhaseTimeout {
                    phase: self.phase,
                    waited,
                });
            }
        }

        match self.surface.poll_event(Duration::ZERO)? {
            Some(event) => self.handle_event(event),
            None => Ok(None),
        }
    }

    fn chrome(&self, title: &'static str, back: bool) -> Chrome {
        Chrome::new(
            title,
            back,
            self.engine.progress(),
            self.engine.all_completed(),
        )
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
