// ── Platform layer ────────────────────────────────────────────────────────────
//
// All FFI lives below this module.  The public `registry` and `console`
// modules re-export the safe functions defined here; no raw handle or
// `unsafe` block leaks outward.

#[cfg(windows)]
pub(crate) mod win32;
