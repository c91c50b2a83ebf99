//! spnavkbd entry point.
//!
//! Wires the X11 display, the spacenavd channel, and the Lua engine
//! together, then runs the dispatch loop on the main thread.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ listen_for_signals()          -- SIGINT/SIGTERM armed before anything else
//!  └─ Settings::load()              -- spnavkbd.toml, all fields optional
//!  └─ NativeDisplay::open()         -- X server connection        (exit 1)
//!  └─ SpnavSocket::connect()        -- spacenavd socket           (exit 1)
//!  └─ LuaEngine::load_config()      -- spnavkbd.lua, run once     (exit 1)
//!  └─ EventDispatcher::run()
//!       ├─ Motion  -> motion_event(x, y, z, rx, ry, rz)
//!       ├─ Button  -> button_event("press" | "release", id)
//!       ├─ EOF     -> exit 0
//!       └─ SIGINT / SIGTERM -> close socket, exit 0
//! ```
//!
//! Every fatal startup error is returned from `main`, which prints it and
//! exits with status 1.  A signal at any point, including during startup or
//! inside a running handler, ends the process with status 0.
//!
//! # Threads
//!
//! The dispatcher, the Lua engine, and the X connection all live on the main
//! thread.  The runtime has one worker thread, used only by the signal
//! listener, so a signal is noticed even while a handler keeps the main
//! thread busy.

use std::rc::Rc;

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

use spnavkbd::application::dispatch::{DispatchOutcome, EventDispatcher, ScriptError};
use spnavkbd::application::host_api::{DesktopHost, HostApi};
use spnavkbd::application::inject_key::{DisplayBackend, KeyInjector};
use spnavkbd::application::shutdown::ShutdownToken;
use spnavkbd::infrastructure::{
    device::SpnavSocket,
    display::DisplayError,
    scripting::LuaEngine,
    signals::listen_for_signals,
    storage::Settings,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 1)]
async fn main() -> anyhow::Result<()> {
    // ── Signals ───────────────────────────────────────────────────────────────
    let shutdown = ShutdownToken::new();
    listen_for_signals(shutdown.clone()).context("failed to install signal handlers")?;

    let settings = Settings::load().context("failed to load settings")?;
    init_logging(&settings.log_level);

    info!("spnavkbd starting");

    // ── Display ───────────────────────────────────────────────────────────────
    let display = open_display()?;
    if shutdown.is_triggered() {
        info!("spnavkbd stopped by signal during startup");
        return Ok(());
    }

    // ── Device channel ────────────────────────────────────────────────────────
    let channel = tokio::select! {
        biased;
        _ = shutdown.cancelled() => {
            info!("spnavkbd stopped by signal during startup");
            return Ok(());
        }
        channel = SpnavSocket::connect(&settings.socket_path) => channel?,
    };

    // ── Script engine ─────────────────────────────────────────────────────────
    let host: Rc<dyn HostApi> = Rc::new(DesktopHost::new(KeyInjector::new(display)));
    let mut engine = LuaEngine::new(host)?;
    engine.interrupt_on(shutdown.clone());
    match engine.load_config(&settings.script_path) {
        Ok(()) => info!("loaded config {}", settings.script_path.display()),
        Err(ScriptError::Interrupted(_)) => {
            info!("spnavkbd stopped by signal while loading config");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    // ── Main dispatch loop ────────────────────────────────────────────────────
    let mut dispatcher = EventDispatcher::new(channel, engine);
    let outcome = dispatcher.run(shutdown.cancelled()).await;

    if let Err(e) = dispatcher.shutdown().await {
        warn!("closing device channel: {e}");
    }

    match outcome? {
        DispatchOutcome::Cancelled => info!("spnavkbd stopped by signal"),
        DispatchOutcome::StreamClosed => info!("spnavkbd stopped: device channel closed"),
    }
    Ok(())
}

/// Routes WARN and ERROR to stderr and everything else to stdout.
fn init_logging(default_level: &str) {
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(writer)
        .init();
}

#[cfg(target_os = "linux")]
fn open_display() -> Result<Rc<dyn DisplayBackend>, DisplayError> {
    use spnavkbd::infrastructure::display::NativeDisplay;

    Ok(Rc::new(NativeDisplay::open()?))
}

#[cfg(not(target_os = "linux"))]
fn open_display() -> Result<Rc<dyn DisplayBackend>, DisplayError> {
    Err(DisplayError::Unsupported)
}
