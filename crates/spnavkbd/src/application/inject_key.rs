//! Synthetic key injection: press + release delivered to the focused window.
//!
//! This use case owns the [`KeyEventTemplate`] and talks to the display
//! server through a [`DisplayBackend`] trait object.  The X11 implementation
//! lives in the infrastructure layer.
//!
//! # Why a template? (for beginners)
//!
//! An X11 key event carries far more than a key code: the root window, a
//! pointer position, a "same screen" flag, and the window it is addressed to.
//! Most of those never change for keyboard synthesis, so the injector keeps
//! one template around and only rewrites the fields that differ per call:
//! target window, key code, modifier state, and press/release.
//!
//! The target window is *always* re-read from the display server right
//! before sending.  Focus can move between two device events, so a cached
//! value would send keys to the wrong application.

use std::rc::Rc;

use spnav_core::{KeyCode, ModifierMask};
use thiserror::Error;
use tracing::debug;

/// Error type for key injection.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The display server could not be queried for the focused window.
    #[error("failed to query input focus: {0}")]
    FocusQuery(String),
    /// The display server refused to accept the synthetic event.
    #[error("display server rejected synthetic {kind:?} for key {code}")]
    SendRejected { kind: KeyEventKind, code: KeyCode },
}

/// X11 window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowId(pub u64);

/// Press/release discriminator of a synthetic key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// Pointer coordinates stamped into every synthetic key event.
///
/// Position is irrelevant to keyboard input but the event record requires
/// one, so it stays fixed at `(1, 1)` in both window and root coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
    pub x_root: i32,
    pub y_root: i32,
}

impl PointerPosition {
    pub const FIXED: PointerPosition = PointerPosition {
        x: 1,
        y: 1,
        x_root: 1,
        y_root: 1,
    };
}

/// The next synthetic key event to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEventTemplate {
    /// Root window of the default screen, set once.
    pub root: WindowId,
    /// Constant pointer fields.
    pub pointer: PointerPosition,
    /// Always `true`: the synthetic pointer lives on the root's screen.
    pub same_screen: bool,
    /// Recomputed from the input focus before every injection.
    pub target: WindowId,
    pub key_code: KeyCode,
    pub modifiers: ModifierMask,
    pub kind: KeyEventKind,
}

impl KeyEventTemplate {
    /// Creates a template addressed to `root` with no key loaded yet.
    pub fn new(root: WindowId) -> Self {
        Self {
            root,
            pointer: PointerPosition::FIXED,
            same_screen: true,
            target: root,
            key_code: KeyCode::default(),
            modifiers: ModifierMask::NONE,
            kind: KeyEventKind::Press,
        }
    }
}

/// Port to the display server.
///
/// Each supported windowing system provides an implementation in the
/// infrastructure layer.  Methods take `&self`; the Xlib connection is only
/// ever touched from the dispatcher thread.
#[cfg_attr(test, mockall::automock)]
pub trait DisplayBackend {
    /// Root window of the default screen.
    fn root_window(&self) -> WindowId;

    /// Window that currently holds keyboard focus.
    fn focused_window(&self) -> Result<WindowId, InjectionError>;

    /// Sends one synthetic key event addressed to `event.target`, asking the
    /// server to propagate it to ancestors the target does not handle.
    fn send_key_event(&self, event: &KeyEventTemplate) -> Result<(), InjectionError>;

    /// Pushes any buffered requests to the server.
    fn flush(&self) -> Result<(), InjectionError>;
}

/// The Synthetic Input Injector.
pub struct KeyInjector {
    display: Rc<dyn DisplayBackend>,
    template: KeyEventTemplate,
}

impl KeyInjector {
    /// Creates an injector whose template is rooted at the display's root window.
    pub fn new(display: Rc<dyn DisplayBackend>) -> Self {
        let template = KeyEventTemplate::new(display.root_window());
        Self { display, template }
    }

    /// Sends a press followed by a release of `code` to the focused window.
    ///
    /// Whether the window still exists when the events arrive is not checked;
    /// the display server drops events for vanished windows.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] if focus cannot be queried or the display
    /// server refuses an event.  A refused press is not followed by a release.
    pub fn inject_key(
        &mut self,
        code: KeyCode,
        modifiers: ModifierMask,
    ) -> Result<(), InjectionError> {
        self.template.target = self.display.focused_window()?;
        self.template.key_code = code;
        self.template.modifiers = modifiers;

        debug!(
            code = code.0,
            modifiers = modifiers.0,
            target = self.template.target.0,
            "injecting key"
        );

        self.template.kind = KeyEventKind::Press;
        self.display.send_key_event(&self.template)?;
        self.template.kind = KeyEventKind::Release;
        self.display.send_key_event(&self.template)?;

        self.display.flush()
    }

    /// Current template contents, as last sent.
    pub fn template(&self) -> &KeyEventTemplate {
        &self.template
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
