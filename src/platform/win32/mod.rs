// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only module tree in the crate where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing here is `pub` beyond what `registry` and `console` re-export.

#![allow(unsafe_code)]

pub(crate) mod console; // GenerateConsoleCtrlEvent, Get/SetConsoleMode
pub(crate) mod registry; // Reg* value access behind a RAII key handle
