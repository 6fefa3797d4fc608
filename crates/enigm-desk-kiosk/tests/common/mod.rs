/*
[INPUT]:  Scripted sensor readings, scans, clue reads, input events
[OUTPUT]: Shared test doubles and fixtures for controller tests
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for enigm-desk-kiosk tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use enigm_desk_adapter::{
    ActuatorCommand, CardIdentifier, CardScanner, ClueSource, DeskError, Result, SensorName,
    SensorBus,
};
use enigm_desk_kiosk::{
    Clock, Display, GameController, GameTiming, Hardware, InputEvent, InputSource, Point, Screen,
    TaskUnlockEngine, TASK_COUNT,
};

pub const TOP_LEFT: Point = Point { x: 40, y: 40 };
pub const TOP_RIGHT: Point = Point { x: 1880, y: 40 };
pub const LEFT: Point = Point { x: 400, y: 540 };
pub const RIGHT: Point = Point { x: 1500, y: 540 };
pub const BOTTOM: Point = Point { x: 960, y: 1000 };

/// Roster of badges `[n, n, n, n, n]` for n in 1..=5
pub fn roster() -> [CardIdentifier; TASK_COUNT] {
    std::array::from_fn(|index| card(index as u8 + 1))
}

pub fn card(n: u8) -> CardIdentifier {
    CardIdentifier::new([n; 5])
}

/// Clock that only moves when the controller sleeps.
#[derive(Clone)]
pub struct FakeClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn sleep(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
    }
}

/// What the controller did with the sensor link
#[derive(Debug, Default)]
pub struct SensorLog {
    pub pressure_polls: usize,
    pub load_cell_polls: usize,
    pub commands: Vec<ActuatorCommand>,
    pub shutdowns: usize,
}

/// Sensors replaying scripted readings; an exhausted script reads `false`.
///
/// With `lost_after` set, every query past that many fails as a broken link.
pub struct ScriptedSensors {
    pressure: VecDeque<bool>,
    load_cell: VecDeque<bool>,
    lost_after: Option<usize>,
    log: Rc<RefCell<SensorLog>>,
}

impl ScriptedSensors {
    pub fn new(pressure: Vec<bool>, load_cell: Vec<bool>) -> (Self, Rc<RefCell<SensorLog>>) {
        let log = Rc::new(RefCell::new(SensorLog::default()));
        let sensors = Self {
            pressure: pressure.into(),
            load_cell: load_cell.into(),
            lost_after: None,
            log: log.clone(),
        };
        (sensors, log)
    }
}

impl SensorBus for ScriptedSensors {
    fn query(&mut self, sensor: SensorName) -> Result<bool> {
        let mut log = self.log.borrow_mut();
        let polls = log.pressure_polls + log.load_cell_polls;
        if self.lost_after.is_some_and(|limit| polls >= limit) {
            return Err(DeskError::Io(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        match sensor {
            SensorName::PressureSensor => {
                log.pressure_polls += 1;
                Ok(self.pressure.pop_front().unwrap_or(false))
            }
            SensorName::LoadCell => {
                log.load_cell_polls += 1;
                Ok(self.load_cell.pop_front().unwrap_or(false))
            }
        }
    }

    fn command(&mut self, command: ActuatorCommand) {
        self.log.borrow_mut().commands.push(command);
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().shutdowns += 1;
    }
}

/// Scanner replaying scripted scans; an exhausted script fails recoverably.
pub struct ScriptedScanner {
    scans: VecDeque<Result<CardIdentifier>>,
}

impl ScriptedScanner {
    pub fn new(scans: Vec<Result<CardIdentifier>>) -> Self {
        Self {
            scans: scans.into(),
        }
    }

    pub fn cards(cards: &[CardIdentifier]) -> Self {
        Self::new(cards.iter().copied().map(Ok).collect())
    }
}

impl CardScanner for ScriptedScanner {
    fn scan(&mut self) -> Result<CardIdentifier> {
        self.scans
            .pop_front()
            .unwrap_or_else(|| Err(DeskError::Anticollision("no tag".to_string())))
    }
}

/// Clue source returning the same text, or failing when `None`.
pub struct ScriptedClues(pub Option<String>);

impl ClueSource for ScriptedClues {
    fn read_clue(&mut self) -> Result<String> {
        match &self.0 {
            Some(text) => Ok(text.clone()),
            None => Err(DeskError::ClueUnreadable {
                path: PathBuf::from("/media/pi/clue.txt"),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }
}

/// Surface recording rendered screens and replaying input.
///
/// Non-blocking polls (from the sensor loops) consume `idle`, then report
/// nothing. Blocking polls (from the tap loop) consume `taps`, then press exit.
pub struct RecordingSurface {
    screens: Rc<RefCell<Vec<Screen>>>,
    idle: VecDeque<Option<InputEvent>>,
    taps: VecDeque<InputEvent>,
}

impl RecordingSurface {
    pub fn new(
        idle: Vec<Option<InputEvent>>,
        taps: Vec<InputEvent>,
    ) -> (Self, Rc<RefCell<Vec<Screen>>>) {
        let screens = Rc::new(RefCell::new(Vec::new()));
        let surface = Self {
            screens: screens.clone(),
            idle: idle.into(),
            taps: taps.into(),
        };
        (surface, screens)
    }
}

impl Display for RecordingSurface {
    fn render(&mut self, screen: &Screen) -> io::Result<()> {
        self.screens.borrow_mut().push(screen.clone());
        Ok(())
    }
}

impl InputSource for RecordingSurface {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if timeout.is_zero() {
            Ok(self.idle.pop_front().flatten())
        } else {
            Ok(Some(self.taps.pop_front().unwrap_or(InputEvent::Exit)))
        }
    }
}

/// Everything a controller test inspects after a run
pub struct Rig {
    pub controller: GameController,
    pub sensors: Rc<RefCell<SensorLog>>,
    pub screens: Rc<RefCell<Vec<Screen>>>,
    pub clock: FakeClock,
}

/// Builder for a controller wired to test doubles
pub struct RigBuilder {
    pressure: Vec<bool>,
    load_cell: Vec<bool>,
    scanner: ScriptedScanner,
    clue: Option<String>,
    idle: Vec<Option<InputEvent>>,
    taps: Vec<InputEvent>,
    pictures: Vec<PathBuf>,
    timing: GameTiming,
    sensor_link_lost_after: Option<usize>,
}

impl RigBuilder {
    pub fn new() -> Self {
        Self {
            pressure: Vec::new(),
            load_cell: Vec::new(),
            scanner: ScriptedScanner::new(Vec::new()),
            clue: Some("Look under the lamp".to_string()),
            idle: Vec::new(),
            taps: Vec::new(),
            pictures: Vec::new(),
            timing: GameTiming {
                picture_interval: Duration::from_millis(100),
                clue_reveal: Duration::from_millis(100),
                poll_interval: Duration::from_millis(50),
                phase_timeout: None,
            },
            sensor_link_lost_after: None,
        }
    }

    pub fn pressure(mut self, readings: Vec<bool>) -> Self {
        self.pressure = readings;
        self
    }

    pub fn load_cell(mut self, readings: Vec<bool>) -> Self {
        self.load_cell = readings;
        self
    }

    pub fn scanner(mut self, scanner: ScriptedScanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn clue(mut self, clue: Option<&str>) -> Self {
        self.clue = clue.map(str::to_string);
        self
    }

    pub fn idle(mut self, events: Vec<Option<InputEvent>>) -> Self {
        self.idle = events;
        self
    }

    pub fn taps(mut self, points: &[Point]) -> Self {
        self.taps = points.iter().copied().map(InputEvent::Tap).collect();
        self
    }

    pub fn pictures(mut self, names: &[&str]) -> Self {
        self.pictures = names.iter().map(PathBuf::from).collect();
        self
    }

    pub fn phase_timeout(mut self, timeout: Duration) -> Self {
        self.timing.phase_timeout = Some(timeout);
        self
    }

    /// Answer `polls` sensor queries, then fail every later one.
    pub fn sensor_link_lost_after(mut self, polls: usize) -> Self {
        self.sensor_link_lost_after = Some(polls);
        self
    }

    pub fn build(self) -> Rig {
        let (mut sensors, sensor_log) = ScriptedSensors::new(self.pressure, self.load_cell);
        sensors.lost_after = self.sensor_link_lost_after;
        let (surface, screens) = RecordingSurface::new(self.idle, self.taps);
        let clock = FakeClock::new();

        let hardware = Hardware {
            sensors: Box::new(sensors),
            scanner: Box::new(self.scanner),
            clues: Box::new(ScriptedClues(self.clue)),
        };
        let controller =
            GameController::new(hardware, Box::new(surface), TaskUnlockEngine::new(roster()))
                .with_timing(self.timing)
                .with_pictures(self.pictures)
                .with_clock(Box::new(clock.clone()));

        Rig {
            controller,
            sensors: sensor_log,
            screens,
            clock,
        }
    }
}
