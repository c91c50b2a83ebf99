//! Embedded Lua 5.4 interpreter running the user's configuration script.
//!
//! One `LuaEngine` exists per process.  It is created once at startup, loads
//! the script once, and then serves handler calls from the dispatcher until
//! the process exits.
//!
//! # Host calls
//!
//! | Global         | Alias        | Signature                        |
//! |----------------|--------------|----------------------------------|
//! | `current_time` | `gettime`    | `() -> number` (epoch seconds)   |
//! | `send_key`     | `send_keyev` | `(code, modifiers?) -> nothing`  |
//!
//! The aliases keep older scripts that use the short names working.
//!
//! # Error containment
//!
//! Every handler runs in protected mode.  A Lua error, a missing handler, or
//! a bad argument to `send_key` becomes a [`ScriptError`] for that single
//! call; the interpreter state stays intact for the next event.
//!
//! # Interrupts
//!
//! Once [`LuaEngine::interrupt_on`] has been called, a VM hook checks the
//! shutdown flag every [`INTERRUPT_CHECK_INTERVAL`] instructions and raises
//! a Lua error when it is set.  That aborts a running handler (or a slow
//! top-level script) and surfaces as [`ScriptError::Interrupted`].

use std::path::Path;
use std::rc::Rc;

use mlua::{Function, HookTriggers, Lua, MultiValue, Value, VmState};
use spnav_core::{KeyCode, ModifierMask};
use tracing::{debug, info};

use crate::application::dispatch::{HandlerArg, ScriptEngine, ScriptError};
use crate::application::host_api::HostApi;
use crate::application::shutdown::ShutdownToken;

/// VM instructions executed between two checks of the shutdown flag.
pub const INTERRUPT_CHECK_INTERVAL: u32 = 10_000;

/// The process-wide script interpreter.
pub struct LuaEngine {
    lua: Lua,
    shutdown: Option<ShutdownToken>,
}

impl LuaEngine {
    /// Creates an interpreter with the standard libraries and the host calls
    /// registered as globals.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Engine`] if the host functions cannot be
    /// registered.
    pub fn new(host: Rc<dyn HostApi>) -> Result<Self, ScriptError> {
        let lua = Lua::new();
        register_host_api(&lua, host).map_err(|e| ScriptError::Engine(e.to_string()))?;
        Ok(Self {
            lua,
            shutdown: None,
        })
    }

    /// Aborts any running script code once `shutdown` is triggered.
    pub fn interrupt_on(&mut self, shutdown: ShutdownToken) {
        let flag = shutdown.clone();
        self.lua.set_hook(
            HookTriggers::new().every_nth_instruction(INTERRUPT_CHECK_INTERVAL),
            move |_, _| {
                if flag.is_triggered() {
                    Err(mlua::Error::runtime("interrupted by shutdown"))
                } else {
                    Ok(VmState::Continue)
                }
            },
        );
        self.shutdown = Some(shutdown);
    }

    fn interrupted(&self) -> bool {
        self.shutdown
            .as_ref()
            .is_some_and(ShutdownToken::is_triggered)
    }

    /// Reads, compiles, and runs the script at `path` once.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Read`] if the file cannot be read, or
    /// [`ScriptError::Load`] if it fails to compile or raises while running.
    pub fn load_config(&self, path: &Path) -> Result<(), ScriptError> {
        info!("loading rc: {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.load_source(&path.display().to_string(), &source)
    }

    /// Compiles and runs `source` as a chunk named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Load`] on a syntax or runtime error, or
    /// [`ScriptError::Interrupted`] if shutdown aborted the chunk.
    pub fn load_source(&self, name: &str, source: &str) -> Result<(), ScriptError> {
        self.lua
            .load(source)
            .set_name(format!("@{name}"))
            .exec()
            .map_err(|e| {
                if self.interrupted() {
                    ScriptError::Interrupted(name.to_string())
                } else {
                    ScriptError::Load {
                        path: name.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    fn lookup(&self, name: &str) -> Result<Function, ScriptError> {
        let value: Value = self
            .lua
            .globals()
            .get(name)
            .map_err(|e| ScriptError::Engine(e.to_string()))?;
        match value {
            Value::Function(f) => Ok(f),
            Value::Nil => Err(ScriptError::HandlerMissing(name.to_string())),
            other => Err(ScriptError::NotCallable {
                name: name.to_string(),
                type_name: other.type_name().to_string(),
            }),
        }
    }

    fn to_lua_args(&self, args: &[HandlerArg]) -> mlua::Result<MultiValue> {
        args.iter()
            .map(|arg| match arg {
                HandlerArg::Integer(n) => Ok(Value::Integer(*n)),
                HandlerArg::Text(s) => self.lua.create_string(*s).map(Value::String),
            })
            .collect()
    }
}

impl ScriptEngine for LuaEngine {
    fn call_handler(&self, name: &str, args: &[HandlerArg]) -> Result<(), ScriptError> {
        let handler = self.lookup(name)?;
        let args = self
            .to_lua_args(args)
            .map_err(|e| ScriptError::Engine(e.to_string()))?;

        debug!(handler = name, nargs = args.len(), "calling handler");
        handler.call::<()>(args).map_err(|e| {
            if self.interrupted() {
                ScriptError::Interrupted(name.to_string())
            } else {
                ScriptError::Runtime {
                    name: name.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}

/// Installs `current_time` and `send_key` (plus their legacy aliases).
fn register_host_api(lua: &Lua, host: Rc<dyn HostApi>) -> mlua::Result<()> {
    let clock = Rc::clone(&host);
    let current_time = lua.create_function(move |_, ()| Ok(clock.current_time()))?;

    let send_key = lua.create_function(move |_, (code, modifiers): (u32, Option<u32>)| {
        host.send_key(KeyCode(code), ModifierMask::from(modifiers));
        Ok(())
    })?;

    let globals = lua.globals();
    globals.set("current_time", current_time.clone())?;
    globals.set("gettime", current_time)?;
    globals.set("send_key", send_key.clone())?;
    globals.set("send_keyev", send_key)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
