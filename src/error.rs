// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in winprim return `error::Result<T>`.  Native
// failures are surfaced unmodified: no retry, no recovery, no remapping of
// the platform's error code.

use crate::registry::ValueType;

/// `ERROR_FILE_NOT_FOUND`: the key or value does not exist.
pub const ERROR_FILE_NOT_FOUND: u32 = 2;

/// `ERROR_INVALID_PARAMETER`: reported when a console call fails without
/// leaving a more specific last-error code behind.
pub const ERROR_INVALID_PARAMETER: u32 = 87;

/// `ERROR_UNSUPPORTED_TYPE`: the code `RegGetValueW` returns when the stored
/// value type does not match the requested one.  The typed getters report it
/// without calling `RegGetValueW`, which older Windows versions lack.
pub const ERROR_UNSUPPORTED_TYPE: u32 = 1630;

/// Every error that winprim can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code})")]
    Win32 {
        /// The name of the failing function.
        function: &'static str,
        /// The raw Win32 error code.
        code: u32,
    },

    /// The stored registry value has a different type than requested.
    #[error("registry value has type {found}, expected {expected}")]
    UnsupportedType {
        expected: ValueType,
        /// Raw type tag as reported by `RegQueryValueExW`.
        found: u32,
    },

    /// A string argument contained a NUL and cannot be passed as a
    /// NUL-terminated wide string.
    #[error("string argument contains a NUL at UTF-16 offset {position}")]
    InteriorNul { position: usize },

    /// A registry root name did not match any known root.
    #[error("unknown registry root {0:?}")]
    UnknownRoot(String),
}

impl Error {
    /// The native error code this error corresponds to, if any.
    ///
    /// Type mismatches report [`ERROR_UNSUPPORTED_TYPE`].
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::Win32 { code, .. } => Some(*code),
            Self::UnsupportedType { .. } => Some(ERROR_UNSUPPORTED_TYPE),
            Self::InteriorNul { .. } | Self::UnknownRoot(_) => None,
        }
    }

    /// `true` when the key or value addressed by the call does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(ERROR_FILE_NOT_FOUND)
    }

    /// `true` for the typed-getter mismatch error.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }

    /// Build a `Win32` error from a `windows` crate error.
    ///
    /// Win32 errors arrive as `0x8007xxxx` HRESULTs; the low word is the
    /// native code.  An HRESULT of zero means the call failed without setting
    /// a last-error value, which is reported as [`ERROR_INVALID_PARAMETER`].
    #[cfg(windows)]
    pub(crate) fn from_windows(function: &'static str, e: &windows::core::Error) -> Self {
        Self::Win32 {
            function,
            code: win32_code_from_hresult(e.code().0),
        }
    }
}

// Split out from `from_windows` so the mapping is testable on every host.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn win32_code_from_hresult(hr: i32) -> u32 {
    // HRESULT.0 is i32; reinterpret bits as u32.
    let bits = hr as u32;
    match bits {
        0 => ERROR_INVALID_PARAMETER,
        b if b & 0xFFFF_0000 == 0x8007_0000 => b & 0xFFFF,
        b => b,
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        match e.code() {
            Some(code) => std::io::Error::from_raw_os_error(code as i32),
            None => std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

// ── Tests ─────────────────────────────────────────────────────────────────────
