// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32`, which holds
// the Win32 FFI.  Each unsafe block in that module MUST carry a `// SAFETY:`
// comment.
#![deny(unsafe_code)]

//! Leak-free access to two Win32 facilities:
//!
//! * [`registry`]: read, write and delete single `REG_DWORD` / `REG_SZ`
//!   values.  Every call opens its own key and closes it before returning.
//! * [`console`]: console mode get/set, text attributes and control events.
//!
//! The native operations exist only on Windows.  The plain-data types
//! ([`RegRoot`], [`ValueType`], [`ConsoleMode`], …) and [`Error`] compile on
//! every target so configuration code can share them.
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn demo() -> winprim::Result<()> {
//! use winprim::registry::{self, RegRoot};
//!
//! registry::set_dword(RegRoot::CurrentUser, r"Software\Example", "Runs", 3)?;
//! let runs = registry::get_dword(RegRoot::CurrentUser, r"Software\Example", "Runs")?;
//! assert_eq!(runs, 3);
//! # Ok(())
//! # }
//! ```

pub mod console;
pub mod error;
pub mod registry;

mod platform;
mod wide;

pub use console::{CharAttributes, ConsoleMode, ControlEvent, StdStream};
pub use error::{Error, Result};
pub use registry::{RegRoot, ValueType};
