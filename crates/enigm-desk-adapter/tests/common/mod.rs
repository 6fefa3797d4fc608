/*
[INPUT]:  Scripted replies for serial links and tag devices
[OUTPUT]: Shared test doubles for adapter integration tests
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for enigm-desk-adapter tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::rc::Rc;

use enigm_desk_adapter::{DeskError, Result, TagDevice};

/// One scripted read on the transport
#[allow(dead_code)]
pub enum Reply {
    Line(&'static str),
    Timeout,
}

/// Serial transport replaying scripted reads and recording writes.
pub struct ScriptedTransport {
    replies: VecDeque<Reply>,
    pending: Vec<u8>,
    written: Rc<RefCell<Vec<u8>>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> (Self, Rc<RefCell<Vec<u8>>>) {
        let written = Rc::new(RefCell::new(Vec::new()));
        let transport = Self {
            replies: replies.into(),
            pending: Vec::new(),
            written: written.clone(),
        };
        (transport, written)
    }
}

impl Read for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            match self.replies.pop_front() {
                Some(Reply::Line(line)) => self.pending.extend_from_slice(line.as_bytes()),
                Some(Reply::Timeout) => return Err(io::Error::from(io::ErrorKind::TimedOut)),
                None => return Ok(0),
            }
        }
        let len = buf.len().min(self.pending.len());
        buf[..len].copy_from_slice(&self.pending[..len]);
        self.pending.drain(..len);
        Ok(len)
    }
}

impl Write for ScriptedTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serial transport whose device is gone: every read and write fails.
#[allow(dead_code)]
pub struct UnpluggedTransport;

impl Read for UnpluggedTransport {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

impl Write for UnpluggedTransport {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

/// Lines written so far
pub fn written_lines(written: &Rc<RefCell<Vec<u8>>>) -> Vec<String> {
    String::from_utf8_lossy(&written.borrow())
        .lines()
        .map(str::to_string)
        .collect()
}

/// Where a scripted tag exchange should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum FailAt {
    Nowhere,
    Wait,
    Request,
    Anticollision,
}

/// Tag device recording every step it is asked to perform.
pub struct ScriptedTagDevice {
    pub uid: Vec<u8>,
    pub fail_at: FailAt,
    pub steps: Vec<&'static str>,
}

impl ScriptedTagDevice {
    pub fn new(uid: Vec<u8>, fail_at: FailAt) -> Self {
        Self {
            uid,
            fail_at,
            steps: Vec::new(),
        }
    }
}

impl TagDevice for ScriptedTagDevice {
    fn wait_for_tag(&mut self) -> Result<()> {
        self.steps.push("wait");
        if self.fail_at == FailAt::Wait {
            return Err(DeskError::Io(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        Ok(())
    }

    fn request(&mut self) -> Result<()> {
        self.steps.push("request");
        if self.fail_at == FailAt::Request {
            return Err(DeskError::BridgeReply("no answer".to_string()));
        }
        Ok(())
    }

    fn anticollision(&mut self) -> Result<Vec<u8>> {
        self.steps.push("anticoll");
        if self.fail_at == FailAt::Anticollision {
            return Err(DeskError::Anticollision("collision".to_string()));
        }
        Ok(self.uid.clone())
    }

    fn deauthenticate(&mut self) {
        self.steps.push("deauth");
    }

    fn release(&mut self) {
        self.steps.push("release");
    }
}
