// ── Registry accessor ─────────────────────────────────────────────────────────
//
// Each operation opens (or creates) one key under a predefined root, performs
// exactly one read, write, or delete of a named value, and closes the key.
// There is no caching and no state carried between calls.
//
// The root and value-type tables below are plain data and compile on every
// host; the operations themselves live in `platform::win32::registry` and are
// re-exported here on Windows.

use std::{fmt, str::FromStr};

use enumn::N;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[cfg(windows)]
pub use crate::platform::win32::registry::{
    delete_key, delete_value, get_dword, get_string, set_dword, set_string,
};

// ── Predefined roots ──────────────────────────────────────────────────────────

/// One of the predefined top-level registry keys.
///
/// Discriminants are the platform's `HKEY_*` handle values.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[repr(u32)]
pub enum RegRoot {
    #[serde(rename = "HKEY_CLASSES_ROOT", alias = "HKCR")]
    ClassesRoot = 0x8000_0000,
    #[serde(rename = "HKEY_CURRENT_USER", alias = "HKCU")]
    CurrentUser = 0x8000_0001,
    #[serde(rename = "HKEY_LOCAL_MACHINE", alias = "HKLM")]
    LocalMachine = 0x8000_0002,
    #[serde(rename = "HKEY_USERS", alias = "HKU")]
    Users = 0x8000_0003,
    #[serde(rename = "HKEY_PERFORMANCE_DATA", alias = "HKPD")]
    PerformanceData = 0x8000_0004,
    #[serde(rename = "HKEY_CURRENT_CONFIG", alias = "HKCC")]
    CurrentConfig = 0x8000_0005,
    /// Windows 9x only; opening it fails on NT-based systems.
    #[serde(rename = "HKEY_DYN_DATA", alias = "HKDD")]
    DynData = 0x8000_0006,
}

impl RegRoot {
    pub const ALL: [RegRoot; 7] = [
        Self::ClassesRoot,
        Self::CurrentUser,
        Self::LocalMachine,
        Self::Users,
        Self::PerformanceData,
        Self::CurrentConfig,
        Self::DynData,
    ];

    /// The raw predefined-handle value.
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// Long name, e.g. `"HKEY_CURRENT_USER"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::ClassesRoot => "HKEY_CLASSES_ROOT",
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::Users => "HKEY_USERS",
            Self::PerformanceData => "HKEY_PERFORMANCE_DATA",
            Self::CurrentConfig => "HKEY_CURRENT_CONFIG",
            Self::DynData => "HKEY_DYN_DATA",
        }
    }

    /// Short name, e.g. `"HKCU"`.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::ClassesRoot => "HKCR",
            Self::CurrentUser => "HKCU",
            Self::LocalMachine => "HKLM",
            Self::Users => "HKU",
            Self::PerformanceData => "HKPD",
            Self::CurrentConfig => "HKCC",
            Self::DynData => "HKDD",
        }
    }
}

impl fmt::Display for RegRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegRoot {
    type Err = Error;

    /// Accepts `HKCU` and `HKEY_CURRENT_USER` spellings, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| s.eq_ignore_ascii_case(r.name()) || s.eq_ignore_ascii_case(r.short_name()))
            .ok_or_else(|| Error::UnknownRoot(s.to_owned()))
    }
}

// ── Value types ───────────────────────────────────────────────────────────────

/// Type tag of a stored registry value (`REG_*`).
#[derive(Clone, Copy, Debug, Eq, Hash, N, PartialEq, Serialize, Deserialize)]
#[repr(u32)]
pub enum ValueType {
    None = 0,
    Sz = 1,
    ExpandSz = 2,
    Binary = 3,
    Dword = 4,
    DwordBigEndian = 5,
    Link = 6,
    MultiSz = 7,
    ResourceList = 8,
    FullResourceDescriptor = 9,
    ResourceRequirementsList = 10,
    Qword = 11,
}

impl ValueType {
    /// Decode a raw type tag; `None` for tags outside the documented set.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::n(raw)
    }

    pub fn as_raw(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "REG_NONE",
            Self::Sz => "REG_SZ",
            Self::ExpandSz => "REG_EXPAND_SZ",
            Self::Binary => "REG_BINARY",
            Self::Dword => "REG_DWORD",
            Self::DwordBigEndian => "REG_DWORD_BIG_ENDIAN",
            Self::Link => "REG_LINK",
            Self::MultiSz => "REG_MULTI_SZ",
            Self::ResourceList => "REG_RESOURCE_LIST",
            Self::FullResourceDescriptor => "REG_FULL_RESOURCE_DESCRIPTOR",
            Self::ResourceRequirementsList => "REG_RESOURCE_REQUIREMENTS_LIST",
            Self::Qword => "REG_QWORD",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_carry_predefined_handle_values() {
        assert_eq!(RegRoot::ClassesRoot.as_raw(), 0x8000_0000);
        assert_eq!(RegRoot::CurrentUser.as_raw(), 0x8000_0001);
        assert_eq!(RegRoot::LocalMachine.as_raw(), 0x8000_0002);
        assert_eq!(RegRoot::Users.as_raw(), 0x8000_0003);
        assert_eq!(RegRoot::PerformanceData.as_raw(), 0x8000_0004);
        assert_eq!(RegRoot::CurrentConfig.as_raw(), 0x8000_0005);
        assert_eq!(RegRoot::DynData.as_raw(), 0x8000_0006);
    }

    #[test]
    fn root_parses_short_and_long_names() {
        assert_eq!("HKCU".parse::<RegRoot>().unwrap(), RegRoot::CurrentUser);
        assert_eq!("hklm".parse::<RegRoot>().unwrap(), RegRoot::LocalMachine);
        assert_eq!(
            "HKEY_Classes_Root".parse::<RegRoot>().unwrap(),
            RegRoot::ClassesRoot
        );
        for root in RegRoot::ALL {
            assert_eq!(root.to_string().parse::<RegRoot>().unwrap(), root);
        }
    }

    #[test]
    fn unknown_root_is_rejected() {
        assert_eq!(
            "HKEY_NOWHERE".parse::<RegRoot>().unwrap_err(),
            Error::UnknownRoot("HKEY_NOWHERE".to_owned())
        );
    }

    #[test]
    fn root_serializes_as_long_name_and_accepts_alias() {
        let json = serde_json::to_string(&RegRoot::CurrentUser).expect("serialize");
        assert_eq!(json, r#""HKEY_CURRENT_USER""#);
        let root: RegRoot = serde_json::from_str(r#""HKLM""#).expect("deserialize alias");
        assert_eq!(root, RegRoot::LocalMachine);
    }

    #[test]
    fn value_type_decodes_known_tags_only() {
        assert_eq!(ValueType::from_raw(1), Some(ValueType::Sz));
        assert_eq!(ValueType::from_raw(4), Some(ValueType::Dword));
        assert_eq!(ValueType::from_raw(11), Some(ValueType::Qword));
        assert_eq!(ValueType::from_raw(12), None);
        assert_eq!(ValueType::Dword.to_string(), "REG_DWORD");
    }
}
