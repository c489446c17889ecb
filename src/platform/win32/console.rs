// ── Console FFI ───────────────────────────────────────────────────────────────
//
// One native call per function.  Console functions report failure with a
// zero BOOL and a thread-local last-error code; the `windows` crate turns
// that into `windows::core::Result`, and `Error::from_windows` maps a missing
// last-error code to ERROR_INVALID_PARAMETER.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use windows::Win32::{
    Foundation::{ERROR_INVALID_HANDLE, HANDLE},
    System::Console::{
        GenerateConsoleCtrlEvent, GetConsoleMode, GetStdHandle, SetConsoleMode,
        SetConsoleTextAttribute, CONSOLE_CHARACTER_ATTRIBUTES, CONSOLE_MODE, STD_ERROR_HANDLE,
        STD_INPUT_HANDLE, STD_OUTPUT_HANDLE,
    },
};

use crate::{
    console::{CharAttributes, ConsoleMode, ControlEvent, StdStream},
    error::{Error, Result},
};

/// A console input or screen-buffer handle.
///
/// Borrowed from the caller or the process; never closed by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsoleHandle(HANDLE);

impl ConsoleHandle {
    /// Wrap a raw handle.  An invalid handle is not rejected here; the
    /// native call using it will fail instead.
    pub fn from_raw(handle: HANDLE) -> Self {
        Self(handle)
    }

    pub fn as_raw(self) -> HANDLE {
        self.0
    }
}

/// Look up the process's standard input, output or error handle.
///
/// Fails with `ERROR_INVALID_HANDLE` when the process has no such handle
/// (e.g. a GUI process without an attached console).
pub fn std_handle(stream: StdStream) -> Result<ConsoleHandle> {
    let which = match stream {
        StdStream::Input => STD_INPUT_HANDLE,
        StdStream::Output => STD_OUTPUT_HANDLE,
        StdStream::Error => STD_ERROR_HANDLE,
    };

    // SAFETY: GetStdHandle takes a constant selector and has no pointer
    // arguments.
    let handle =
        unsafe { GetStdHandle(which) }.map_err(|e| logged(Error::from_windows("GetStdHandle", &e)))?;

    if handle.is_invalid() {
        return Err(logged(Error::Win32 {
            function: "GetStdHandle",
            code: ERROR_INVALID_HANDLE.0,
        }));
    }
    Ok(ConsoleHandle(handle))
}

/// Send `event` to every process in the console process group
/// `process_group_id` (0 means all processes sharing this console).
pub fn send_ctrl_event(event: ControlEvent, process_group_id: u32) -> Result<()> {
    // SAFETY: both arguments are plain integers; the call has no memory
    // safety preconditions.
    unsafe { GenerateConsoleCtrlEvent(event.as_raw(), process_group_id) }
        .map_err(|e| logged(Error::from_windows("GenerateConsoleCtrlEvent", &e)))?;

    log::trace!("sent {event:?} to process group {process_group_id}");
    Ok(())
}

/// Read the current mode of a console input or screen buffer.
pub fn get_mode(handle: ConsoleHandle) -> Result<ConsoleMode> {
    let mut mode = CONSOLE_MODE::default();

    // SAFETY: `mode` is a valid out-pointer for the duration of the call.
    // An invalid handle makes the call fail; it does not cause UB.
    unsafe { GetConsoleMode(handle.0, &mut mode) }
        .map_err(|e| logged(Error::from_windows("GetConsoleMode", &e)))?;

    Ok(ConsoleMode::from_bits_retain(mode.0))
}

/// Replace the mode of a console input or screen buffer.
///
/// The bitmask is passed through as-is, unknown bits included.
pub fn set_mode(handle: ConsoleHandle, mode: ConsoleMode) -> Result<()> {
    // SAFETY: plain value arguments; an invalid handle fails cleanly.
    unsafe { SetConsoleMode(handle.0, CONSOLE_MODE(mode.bits())) }
        .map_err(|e| logged(Error::from_windows("SetConsoleMode", &e)))?;

    log::trace!("console mode set to {:#06x}", mode.bits());
    Ok(())
}

/// Set the colours used for text subsequently written to a screen buffer.
pub fn set_text_attribute(handle: ConsoleHandle, attrs: CharAttributes) -> Result<()> {
    // SAFETY: plain value arguments; an invalid handle fails cleanly.
    unsafe { SetConsoleTextAttribute(handle.0, CONSOLE_CHARACTER_ATTRIBUTES(attrs.bits())) }
        .map_err(|e| logged(Error::from_windows("SetConsoleTextAttribute", &e)))
}

fn logged(e: Error) -> Error {
    log::debug!("{e}");
    e
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// `cargo test` may run without a console (redirected output, CI services).
// Tests that need a real console return early when none is attached.

#[cfg(test)]
mod tests {
    use super::*;

    /// The stdout screen buffer and its current mode, if one is attached.
    fn attached_output() -> Option<(ConsoleHandle, ConsoleMode)> {
        let _ = env_logger::builder().is_test(true).try_init();
        let handle = std_handle(StdStream::Output).ok()?;
        let mode = get_mode(handle).ok()?;
        Some((handle, mode))
    }

    #[test]
    fn set_then_get_mode_round_trips() {
        let Some((handle, original)) = attached_output() else {
            return;
        };

        let toggled = original ^ ConsoleMode::ENABLE_WRAP_AT_EOL_OUTPUT;
        set_mode(handle, toggled).expect("set_mode");
        let read_back = get_mode(handle).expect("get_mode");

        set_mode(handle, original).expect("restore mode");
        assert_eq!(read_back, toggled);
    }

    #[test]
    fn text_attribute_accepts_default_colors() {
        let Some((handle, _)) = attached_output() else {
            return;
        };
        set_text_attribute(handle, CharAttributes::DEFAULT_COLORS).expect("set_text_attribute");
    }

    #[test]
    fn null_handle_fails_get_mode() {
        let err = get_mode(ConsoleHandle::from_raw(HANDLE::default())).unwrap_err();
        match err {
            Error::Win32 { function, code } => {
                assert_eq!(function, "GetConsoleMode");
                assert_ne!(code, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn null_handle_fails_set_mode() {
        let err = set_mode(ConsoleHandle::from_raw(HANDLE::default()), ConsoleMode::empty())
            .unwrap_err();
        assert!(matches!(err, Error::Win32 { function: "SetConsoleMode", .. }));
    }

    #[test]
    fn ctrl_event_to_unknown_group_fails() {
        if attached_output().is_none() {
            return;
        }

        // Process ids are multiples of four, so no process group has this id.
        let err = send_ctrl_event(ControlEvent::Break, 0x7FFF_FFFF).unwrap_err();
        match err {
            Error::Win32 { function, code } => {
                assert_eq!(function, "GenerateConsoleCtrlEvent");
                assert_ne!(code, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn close_event_cannot_be_generated() {
        // Only CTRL_C and CTRL_BREAK can be generated; the group id is
        // irrelevant here.
        let err = send_ctrl_event(ControlEvent::Close, 0x7FFF_FFFF).unwrap_err();
        assert!(matches!(
            err,
            Error::Win32 { function: "GenerateConsoleCtrlEvent", .. }
        ));
    }
}
