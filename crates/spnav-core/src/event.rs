//! Decoded device events.
//!
//! A [`DeviceEvent`] is produced by the device channel, read exactly once by
//! the dispatcher, and then dropped.  Nothing in spnavkbd queues or buffers
//! events beyond the iteration that consumed them.

/// One sample read from the device channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Translation and rotation deltas since the previous sample.
    Motion(MotionEvent),
    /// A single button transition.
    Button(ButtonEvent),
}

/// Six-axis motion sample.
///
/// `x`, `y`, `z` are translation deltas; `rx`, `ry`, `rz` are rotation
/// deltas around the same axes.  Values are signed and unscaled, exactly as
/// the driver reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionEvent {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub rx: i32,
    pub ry: i32,
    pub rz: i32,
    /// Milliseconds since the previous motion sample, as reported by the daemon.
    pub period_ms: u32,
}

impl MotionEvent {
    /// Returns the six deltas in the fixed order `(x, y, z, rx, ry, rz)`.
    pub fn axes(&self) -> [i32; 6] {
        [self.x, self.y, self.z, self.rx, self.ry, self.rz]
    }
}

/// Button press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Zero-based button number.
    pub id: u32,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

impl ButtonEvent {
    /// The label handed to scripts: `"press"` or `"release"`.
    pub fn state_label(&self) -> &'static str {
        if self.pressed {
            "press"
        } else {
            "release"
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_preserve_fixed_order() {
        let motion = MotionEvent {
            x: 1,
            y: -2,
            z: 3,
            rx: -4,
            ry: 5,
            rz: -6,
            period_ms: 16,
        };

        assert_eq!(motion.axes(), [1, -2, 3, -4, 5, -6]);
    }

    #[test]
    fn test_state_label_for_press_and_release() {
        let press = ButtonEvent { id: 0, pressed: true };
        let release = ButtonEvent { id: 0, pressed: false };

        assert_eq!(press.state_label(), "press");
        assert_eq!(release.state_label(), "release");
    }
}
