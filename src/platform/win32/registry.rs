// ── Registry FFI ──────────────────────────────────────────────────────────────
//
// Every public function here follows the same shape:
//   open (or create) key → one query / set / delete → close key.
//
// The key handle is owned by `KeyHandle`, whose `Drop` calls `RegCloseKey`,
// so the handle is released on every exit path including `?` early returns.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{ERROR_SUCCESS, WIN32_ERROR},
        System::Registry::{
            RegCloseKey, RegCreateKeyExW, RegDeleteKeyW, RegDeleteValueW, RegOpenKeyExW,
            RegQueryValueExW, RegSetValueExW, HKEY, HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG,
            HKEY_CURRENT_USER, HKEY_DYN_DATA, HKEY_LOCAL_MACHINE, HKEY_PERFORMANCE_DATA,
            HKEY_USERS, KEY_READ, KEY_WRITE, REG_DWORD, REG_OPTION_NON_VOLATILE, REG_SAM_FLAGS,
            REG_SZ, REG_VALUE_TYPE,
        },
    },
};

use crate::{
    error::{Error, Result},
    registry::{RegRoot, ValueType},
    wide::{as_bytes, from_wide, to_wide},
};

// ── Key handle ────────────────────────────────────────────────────────────────

/// RAII owner of an open registry key.
///
/// Exactly one `RegCloseKey` per successful open, performed on `Drop`.
struct KeyHandle(HKEY);

impl KeyHandle {
    /// `RegOpenKeyExW(root, subkey)` with the requested access.
    fn open(root: RegRoot, subkey: &str, access: REG_SAM_FLAGS) -> Result<Self> {
        let subkey = to_wide(subkey)?;
        let mut hkey = HKEY::default();

        // SAFETY: `subkey` is a NUL-terminated UTF-16 buffer that outlives the
        // call; `hkey` is a valid out-pointer.  The root is a predefined key
        // and needs no opening.
        let status = unsafe {
            RegOpenKeyExW(
                root_hkey(root),
                PCWSTR(subkey.as_ptr()),
                0,
                access,
                &mut hkey,
            )
        };
        check("RegOpenKeyExW", status)?;

        Ok(Self::adopt(hkey))
    }

    /// `RegCreateKeyExW(root, subkey)` for write access, creating missing
    /// keys along the path.
    fn create(root: RegRoot, subkey: &str) -> Result<Self> {
        let subkey = to_wide(subkey)?;
        let mut hkey = HKEY::default();

        // SAFETY: same buffer invariants as `open`.  Null class, default
        // security and no disposition out-pointer are all documented as valid.
        let status = unsafe {
            RegCreateKeyExW(
                root_hkey(root),
                PCWSTR(subkey.as_ptr()),
                0,
                PCWSTR::null(),
                REG_OPTION_NON_VOLATILE,
                KEY_WRITE,
                None,
                &mut hkey,
                None,
            )
        };
        check("RegCreateKeyExW", status)?;

        Ok(Self::adopt(hkey))
    }

    fn adopt(hkey: HKEY) -> Self {
        #[cfg(test)]
        stats::opened();
        Self(hkey)
    }

    /// First phase of a read: type tag and byte size, no data.
    fn query_info(&self, name: &[u16]) -> Result<(u32, u32)> {
        let mut value_type = REG_VALUE_TYPE::default();
        let mut size = 0u32;

        // SAFETY: self.0 is an open key; `name` is NUL-terminated; the type
        // and size out-pointers are valid for the duration of the call.  A
        // `None` data pointer asks only for the size.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(name.as_ptr()),
                None,
                Some(&mut value_type),
                None,
                Some(&mut size),
            )
        };
        check("RegQueryValueExW", status)?;

        Ok((value_type.0, size))
    }

    /// Second phase of a read: copy the value's data into `buf`.
    ///
    /// `T` is only ever `u8` or `u16`; the registry writes raw bytes and both
    /// types accept any bit pattern.  Returns the number of bytes written.
    fn query_into<T: Copy>(&self, name: &[u16], buf: &mut [T]) -> Result<u32> {
        let mut size = std::mem::size_of_val(buf) as u32;

        // SAFETY: `buf` is valid for writes of `size` bytes, which is exactly
        // the capacity we report to the API.  The API never writes more than
        // `size` bytes; on overflow it returns ERROR_MORE_DATA instead.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(name.as_ptr()),
                None,
                None,
                Some(buf.as_mut_ptr().cast::<u8>()),
                Some(&mut size),
            )
        };
        check("RegQueryValueExW", status)?;

        Ok(size)
    }

    fn set(&self, name: &[u16], value_type: REG_VALUE_TYPE, data: &[u8]) -> Result<()> {
        // SAFETY: self.0 is a key opened with KEY_WRITE; `name` is
        // NUL-terminated; `data` is a valid slice for the call's duration.
        let status = unsafe { RegSetValueExW(self.0, PCWSTR(name.as_ptr()), 0, value_type, Some(data)) };
        check("RegSetValueExW", status)
    }
}

impl Drop for KeyHandle {
    fn drop(&mut self) {
        // SAFETY: self.0 was returned by a successful RegOpenKeyExW or
        // RegCreateKeyExW and has not been closed since.
        let status = unsafe { RegCloseKey(self.0) };
        if status != ERROR_SUCCESS {
            log::debug!("RegCloseKey failed (error {})", status.0);
        }
        #[cfg(test)]
        stats::closed();
    }
}

// ── Public operations ─────────────────────────────────────────────────────────

/// Delete the value `name` from `root\subkey`.
pub fn delete_value(root: RegRoot, subkey: &str, name: &str) -> Result<()> {
    let name_w = to_wide(name)?;
    let key = KeyHandle::open(root, subkey, KEY_WRITE)?;

    // SAFETY: key.0 is open with KEY_WRITE; name_w is NUL-terminated.
    let status = unsafe { RegDeleteValueW(key.0, PCWSTR(name_w.as_ptr())) };
    check("RegDeleteValueW", status)?;

    log::trace!("deleted {root}\\{subkey}\\{name}");
    Ok(())
}

/// Read `root\subkey\name` as a `REG_DWORD`.
///
/// Fails with [`Error::UnsupportedType`] if the value exists with any other
/// type.
pub fn get_dword(root: RegRoot, subkey: &str, name: &str) -> Result<u32> {
    let name_w = to_wide(name)?;
    let key = KeyHandle::open(root, subkey, KEY_READ)?;

    let (value_type, size) = key.query_info(&name_w)?;
    expect_type(value_type, ValueType::Dword)?;

    // Sized to the declared size; at least 4 so a short value still decodes.
    let mut buf = vec![0u8; (size as usize).max(4)];
    key.query_into(&name_w, &mut buf[..size as usize])?;

    let value = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    log::trace!("read {root}\\{subkey}\\{name} = {value}");
    Ok(value)
}

/// Read `root\subkey\name` as a `REG_SZ`.
///
/// The terminating NUL is not part of the returned string.  Fails with
/// [`Error::UnsupportedType`] if the value exists with any other type.
pub fn get_string(root: RegRoot, subkey: &str, name: &str) -> Result<String> {
    let name_w = to_wide(name)?;
    let key = KeyHandle::open(root, subkey, KEY_READ)?;

    let (value_type, size) = key.query_info(&name_w)?;
    expect_type(value_type, ValueType::Sz)?;

    // Round odd byte counts up to a whole UTF-16 unit.
    let units = (size as usize).div_ceil(2);
    let mut buf = vec![0u16; units];
    key.query_into(&name_w, &mut buf)?;

    let value = from_wide(&buf);
    log::trace!("read {root}\\{subkey}\\{name} ({} chars)", value.chars().count());
    Ok(value)
}

/// Write `value` to `root\subkey\name` as a `REG_DWORD`, creating the key if
/// it does not exist.
pub fn set_dword(root: RegRoot, subkey: &str, name: &str, value: u32) -> Result<()> {
    let name_w = to_wide(name)?;
    let key = KeyHandle::create(root, subkey)?;

    key.set(&name_w, REG_DWORD, &value.to_le_bytes())?;

    log::trace!("wrote {root}\\{subkey}\\{name} = {value}");
    Ok(())
}

/// Write `value` to `root\subkey\name` as a `REG_SZ`, creating the key if it
/// does not exist.  The stored data includes the terminating NUL.
pub fn set_string(root: RegRoot, subkey: &str, name: &str, value: &str) -> Result<()> {
    let name_w = to_wide(name)?;
    let value_w = to_wide(value)?;
    let key = KeyHandle::create(root, subkey)?;

    // 2 × (units + 1) bytes: `value_w` already carries the NUL.
    key.set(&name_w, REG_SZ, &as_bytes(&value_w))?;

    log::trace!("wrote {root}\\{subkey}\\{name} ({} units)", value_w.len() - 1);
    Ok(())
}

/// Delete the key `root\subkey` together with its values.
///
/// The key must not have subkeys.
pub fn delete_key(root: RegRoot, subkey: &str) -> Result<()> {
    let subkey_w = to_wide(subkey)?;

    // SAFETY: subkey_w is NUL-terminated; the root is a predefined key.
    let status = unsafe { RegDeleteKeyW(root_hkey(root), PCWSTR(subkey_w.as_ptr())) };
    check("RegDeleteKeyW", status)?;

    log::trace!("deleted key {root}\\{subkey}");
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn root_hkey(root: RegRoot) -> HKEY {
    match root {
        RegRoot::ClassesRoot => HKEY_CLASSES_ROOT,
        RegRoot::CurrentUser => HKEY_CURRENT_USER,
        RegRoot::LocalMachine => HKEY_LOCAL_MACHINE,
        RegRoot::Users => HKEY_USERS,
        RegRoot::PerformanceData => HKEY_PERFORMANCE_DATA,
        RegRoot::CurrentConfig => HKEY_CURRENT_CONFIG,
        RegRoot::DynData => HKEY_DYN_DATA,
    }
}

/// Registry functions return the error code directly instead of via
/// `GetLastError`.
fn check(function: &'static str, status: WIN32_ERROR) -> Result<()> {
    if status == ERROR_SUCCESS {
        return Ok(());
    }
    log::debug!("{function} failed (error {})", status.0);
    Err(Error::Win32 {
        function,
        code: status.0,
    })
}

fn expect_type(found: u32, expected: ValueType) -> Result<()> {
    if found == expected.as_raw() {
        return Ok(());
    }
    log::debug!("registry value has type {found}, expected {expected}");
    Err(Error::UnsupportedType { expected, found })
}

// ── Handle accounting (tests only) ────────────────────────────────────────────
//
// Per-thread so that tests running in parallel do not see each other's keys.


// ── Tests ─────────────────────────────────────────────────────────────────────
