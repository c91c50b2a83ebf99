//! Scripted device channel for tests.
//!
//! Replays a fixed list of events, then does whatever its end behaviour
//! says: report end-of-stream, stay pending forever (like an idle device),
//! or fail with an I/O error (like a daemon crash).

use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use spnav_core::DeviceEvent;

use crate::application::dispatch::{DeviceChannel, DeviceError};

#[derive(Debug, Clone, Copy)]
enum AtEnd {
    Close,
    HoldOpen,
    Fail(io::ErrorKind),
}

/// A [`DeviceChannel`] that replays a predetermined event list.
#[derive(Debug)]
pub struct ScriptedChannel {
    events: VecDeque<DeviceEvent>,
    at_end: AtEnd,
    closed: bool,
}

impl ScriptedChannel {
    /// Replays `events`, then reports end-of-stream.
    pub fn new(events: Vec<DeviceEvent>) -> Self {
        Self::with_end(events, AtEnd::Close)
    }

    /// Replays `events`, then blocks forever.
    pub fn held_open(events: Vec<DeviceEvent>) -> Self {
        Self::with_end(events, AtEnd::HoldOpen)
    }

    /// Replays `events`, then fails with an I/O error of `kind`.
    pub fn failing_after(events: Vec<DeviceEvent>, kind: io::ErrorKind) -> Self {
        Self::with_end(events, AtEnd::Fail(kind))
    }

    fn with_end(events: Vec<DeviceEvent>, at_end: AtEnd) -> Self {
        Self {
            events: events.into(),
            at_end,
            closed: false,
        }
    }

    /// Whether [`DeviceChannel::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl DeviceChannel for ScriptedChannel {
    async fn next_event(&mut self) -> Result<Option<DeviceEvent>, DeviceError> {
        if self.closed {
            return Ok(None);
        }
        if let Some(event) = self.events.pop_front() {
            return Ok(Some(event));
        }
        match self.at_end {
            AtEnd::Close => Ok(None),
            AtEnd::HoldOpen => std::future::pending().await,
            AtEnd::Fail(kind) => Err(DeviceError::Io(kind.into())),
        }
    }

    async fn close(&mut self) -> Result<(), DeviceError> {
        self.closed = true;
        Ok(())
    }
}
