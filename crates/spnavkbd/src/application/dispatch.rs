//! EventDispatcher: the main loop from device channel to script handler.
//!
//! # State machine (for beginners)
//!
//! The dispatcher alternates between two states:
//!
//! ```text
//!            event arrives
//!  WAITING ─────────────────▶ DISPATCHING
//!     ▲                            │
//!     └────────────────────────────┘
//!        handler returned (ok or error)
//! ```
//!
//! - **WAITING** – suspended in [`DeviceChannel::next_event`].  This is the
//!   only suspension point of the whole program.
//! - **DISPATCHING** – converts the event into script arguments and calls
//!   the matching handler.  A failing handler is logged and forgotten; it
//!   never stops the loop.
//!
//! The loop ends when the channel reports end-of-stream or when the
//! shutdown future completes.  Shutdown is checked before every read and
//! raced against the read itself, so a pending wait is abandoned as soon as
//! the interrupt arrives and no handler runs afterwards.  A handler that is
//! running when the interrupt arrives is aborted by the engine (see
//! [`ShutdownToken`](crate::application::shutdown::ShutdownToken)) and the
//! loop stops on its next check.

use std::future::Future;

use async_trait::async_trait;
use spnav_core::DeviceEvent;
use thiserror::Error;
use tracing::{debug, error, info};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors raised by the device channel.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device daemon could not be reached at startup.
    #[error("failed to connect to the space navigator daemon at {path}: {source}")]
    ConnectFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// An I/O error occurred on the established channel.
    #[error("device channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the scripting engine.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The configuration script could not be read from disk.
    #[error("cannot read script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The configuration script failed to compile or to run.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },
    /// No global of that name exists.
    #[error("'{0}' not a function (undefined)")]
    HandlerMissing(String),
    /// The global exists but cannot be called.
    #[error("'{name}' not a function ({type_name})")]
    NotCallable { name: String, type_name: String },
    /// The handler raised an error while running.
    #[error("error in '{name}': {message}")]
    Runtime { name: String, message: String },
    /// The script was aborted because shutdown was requested.
    #[error("'{0}' interrupted by shutdown")]
    Interrupted(String),
    /// The engine itself could not be set up.
    #[error("scripting engine error: {0}")]
    Engine(String),
}

/// Fatal errors that end the dispatch loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Device(#[from] DeviceError),
}

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Source of device events.
#[async_trait]
pub trait DeviceChannel {
    /// Waits for the next event.  `Ok(None)` means the channel closed cleanly.
    async fn next_event(&mut self) -> Result<Option<DeviceEvent>, DeviceError>;

    /// Closes the channel.  Safe to call more than once.
    async fn close(&mut self) -> Result<(), DeviceError>;
}

/// Late-bound handler invocation.
///
/// Handlers are looked up by name on every call, so a script may redefine
/// them at any time.
pub trait ScriptEngine {
    /// Calls the global function `name` with `args`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if the name is unbound, not callable, or the
    /// call raised.  The engine stays usable afterwards.
    fn call_handler(&self, name: &str, args: &[HandlerArg]) -> Result<(), ScriptError>;
}

// ── Handler binding ───────────────────────────────────────────────────────────

/// The script globals the dispatcher calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerName {
    MotionEvent,
    ButtonEvent,
}

impl HandlerName {
    pub fn as_str(self) -> &'static str {
        match self {
            HandlerName::MotionEvent => "motion_event",
            HandlerName::ButtonEvent => "button_event",
        }
    }
}

/// A positional argument handed to a script handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerArg {
    Integer(i64),
    Text(&'static str),
}

/// Converts a device event into the handler call it triggers.
///
/// - Motion → `motion_event(x, y, z, rx, ry, rz)`
/// - Button → `button_event("press" | "release", id)`
pub fn handler_call(event: &DeviceEvent) -> (HandlerName, Vec<HandlerArg>) {
    match event {
        DeviceEvent::Motion(m) => (
            HandlerName::MotionEvent,
            m.axes()
                .iter()
                .map(|&v| HandlerArg::Integer(i64::from(v)))
                .collect(),
        ),
        DeviceEvent::Button(b) => (
            HandlerName::ButtonEvent,
            vec![
                HandlerArg::Text(b.state_label()),
                HandlerArg::Integer(i64::from(b.id)),
            ],
        ),
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Why the dispatch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The device channel reached end-of-stream.
    StreamClosed,
    /// The shutdown future completed.
    Cancelled,
}

/// The main loop.
pub struct EventDispatcher<C, E> {
    channel: C,
    engine: E,
    dispatched: u64,
}

impl<C: DeviceChannel, E: ScriptEngine> EventDispatcher<C, E> {
    pub fn new(channel: C, engine: E) -> Self {
        Self {
            channel,
            engine,
            dispatched: 0,
        }
    }

    /// Delivers one event to its handler.  Handler failures are logged only.
    pub fn dispatch(&mut self, event: &DeviceEvent) {
        let (name, args) = handler_call(event);
        self.dispatched += 1;
        match self.engine.call_handler(name.as_str(), &args) {
            Ok(()) => {}
            Err(e @ ScriptError::Interrupted(_)) => info!("{e}"),
            Err(e) => error!("{e}"),
        }
    }

    /// Runs until the channel closes or `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if the channel fails with anything other
    /// than a clean end-of-stream.
    pub async fn run<S>(&mut self, shutdown: S) -> Result<DispatchOutcome, DispatchError>
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let next = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                next = self.channel.next_event() => Some(next),
            };

            let Some(next) = next else {
                info!("shutdown requested after {} events", self.dispatched);
                return Ok(DispatchOutcome::Cancelled);
            };

            match next? {
                Some(event) => {
                    debug!(?event, "dispatching");
                    self.dispatch(&event);
                }
                None => {
                    info!("device channel closed after {} events", self.dispatched);
                    return Ok(DispatchOutcome::StreamClosed);
                }
            }
        }
    }

    /// Closes the device channel.
    pub async fn shutdown(&mut self) -> Result<(), DeviceError> {
        self.channel.close().await
    }

    /// Number of events handed to the engine so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
