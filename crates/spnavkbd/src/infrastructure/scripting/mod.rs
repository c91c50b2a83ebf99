//! Lua scripting backend (mlua, Lua 5.4).
//!
//! Provides the `LuaEngine` that implements `ScriptEngine` from the
//! application layer and exposes `HostApi` to user scripts.

mod lua_engine;

pub use lua_engine::LuaEngine;

/// The configuration script loaded when no other path is configured.
pub const DEFAULT_SCRIPT_PATH: &str = "spnavkbd.lua";
