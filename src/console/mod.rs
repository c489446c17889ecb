// ── Console control wrapper ───────────────────────────────────────────────────
//
// Direct pass-through to the console API.  Mode and attribute flags are
// platform-defined; this layer neither validates nor transforms them, and
// bits without a named constant are carried through unchanged.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[cfg(windows)]
pub use crate::platform::win32::console::{
    get_mode, send_ctrl_event, set_mode, set_text_attribute, std_handle, ConsoleHandle,
};

// ── Control events ────────────────────────────────────────────────────────────

/// A console control signal (`CTRL_*_EVENT`).
///
/// `GenerateConsoleCtrlEvent` only accepts `CtrlC` and `Break`; the other
/// kinds are delivered by the system and are listed for completeness.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[repr(u32)]
pub enum ControlEvent {
    CtrlC = 0,
    Break = 1,
    Close = 2,
    Logoff = 5,
    Shutdown = 6,
}

impl ControlEvent {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::CtrlC),
            1 => Some(Self::Break),
            2 => Some(Self::Close),
            5 => Some(Self::Logoff),
            6 => Some(Self::Shutdown),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

// ── Standard streams ──────────────────────────────────────────────────────────

/// Which standard handle to look up with `std_handle`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum StdStream {
    Input,
    Output,
    Error,
}

// ── Mode flags ────────────────────────────────────────────────────────────────

bitflags! {
    /// Console mode bitmask as read by `GetConsoleMode`.
    ///
    /// Input-buffer and screen-buffer flags share bit positions; which table
    /// applies depends on the handle the mode belongs to.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
    pub struct ConsoleMode: u32 {
        // Input buffer.
        const ENABLE_PROCESSED_INPUT = 0x0001;
        const ENABLE_LINE_INPUT = 0x0002;
        const ENABLE_ECHO_INPUT = 0x0004;
        const ENABLE_WINDOW_INPUT = 0x0008;
        const ENABLE_MOUSE_INPUT = 0x0010;
        const ENABLE_INSERT_MODE = 0x0020;
        const ENABLE_QUICK_EDIT_MODE = 0x0040;
        const ENABLE_EXTENDED_FLAGS = 0x0080;
        const ENABLE_VIRTUAL_TERMINAL_INPUT = 0x0200;

        // Screen buffer.
        const ENABLE_PROCESSED_OUTPUT = 0x0001;
        const ENABLE_WRAP_AT_EOL_OUTPUT = 0x0002;
        const ENABLE_VIRTUAL_TERMINAL_PROCESSING = 0x0004;
        const DISABLE_NEWLINE_AUTO_RETURN = 0x0008;
        const ENABLE_LVB_GRID_WORLDWIDE = 0x0010;

        // Unnamed bits are preserved.
        const _ = !0;
    }
}

bitflags! {
    /// Character attributes for `SetConsoleTextAttribute`.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
    pub struct CharAttributes: u16 {
        const FOREGROUND_BLUE = 0x0001;
        const FOREGROUND_GREEN = 0x0002;
        const FOREGROUND_RED = 0x0004;
        const FOREGROUND_INTENSITY = 0x0008;
        const BACKGROUND_BLUE = 0x0010;
        const BACKGROUND_GREEN = 0x0020;
        const BACKGROUND_RED = 0x0040;
        const BACKGROUND_INTENSITY = 0x0080;

        const _ = !0;
    }
}

impl CharAttributes {
    /// Light grey on black, the console's default colours.
    pub const DEFAULT_COLORS: Self = Self::FOREGROUND_RED
        .union(Self::FOREGROUND_GREEN)
        .union(Self::FOREGROUND_BLUE);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_event_values_match_platform() {
        assert_eq!(ControlEvent::CtrlC.as_raw(), 0);
        assert_eq!(ControlEvent::Break.as_raw(), 1);
        assert_eq!(ControlEvent::Close.as_raw(), 2);
        assert_eq!(ControlEvent::Logoff.as_raw(), 5);
        assert_eq!(ControlEvent::Shutdown.as_raw(), 6);
    }

    #[test]
    fn control_event_gaps_are_not_events() {
        assert_eq!(ControlEvent::from_raw(3), None);
        assert_eq!(ControlEvent::from_raw(4), None);
        assert_eq!(ControlEvent::from_raw(6), Some(ControlEvent::Shutdown));
    }

    #[test]
    fn unknown_mode_bits_survive() {
        let mode = ConsoleMode::from_bits_retain(0x8000_0004);
        assert_eq!(mode.bits(), 0x8000_0004);
        assert!(mode.contains(ConsoleMode::ENABLE_VIRTUAL_TERMINAL_PROCESSING));
    }

    #[test]
    fn input_and_output_flags_share_bits() {
        assert_eq!(
            ConsoleMode::ENABLE_ECHO_INPUT.bits(),
            ConsoleMode::ENABLE_VIRTUAL_TERMINAL_PROCESSING.bits()
        );
    }

    #[test]
    fn mode_serde_round_trip_keeps_bits() {
        let mode = ConsoleMode::ENABLE_LINE_INPUT
            | ConsoleMode::ENABLE_ECHO_INPUT
            | ConsoleMode::ENABLE_VIRTUAL_TERMINAL_INPUT;
        let json = serde_json::to_string(&mode).expect("serialize");
        let back: ConsoleMode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.bits(), 0x0206);
    }

    #[test]
    fn default_colors_are_light_grey() {
        assert_eq!(CharAttributes::DEFAULT_COLORS.bits(), 0x0007);
    }

    #[test]
    fn control_event_deserializes_by_name() {
        let ev: ControlEvent = serde_json::from_str(r#""Break""#).expect("deserialize");
        assert_eq!(ev, ControlEvent::Break);
    }
}
