//! Settings axes that identify a build variant
//!
//! The four recognized axes (`os`, `compiler`, `build_type`, `arch`) are part
//! of any build-configuration identity. Each axis type parses from the
//! spelling used in recipes and CLI flags and displays in the same spelling.

use kiln_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating system axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Macos,
    Windows,
}

impl Os {
    /// Detect the operating system of the running host
    #[must_use]
    pub fn detect_host() -> Option<Self> {
        match std::env::consts::OS {
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::Macos),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }

    /// CMake `CMAKE_SYSTEM_NAME` spelling
    #[must_use]
    pub fn cmake_system_name(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Macos => "Darwin",
            Self::Windows => "Windows",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Macos => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for Os {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            _ => Err(ConfigError::InvalidValue {
                field: "os".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Target architecture axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "aarch64")]
    Aarch64,
}

impl Arch {
    /// Detect the architecture of the running host
    #[must_use]
    pub fn detect_host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Some(Self::X86_64),
            "aarch64" => Some(Self::Aarch64),
            _ => None,
        }
    }

    /// CMake `CMAKE_SYSTEM_PROCESSOR` spelling
    #[must_use]
    pub fn cmake_system_processor(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86_64 => write!(f, "x86_64"),
            Self::Aarch64 => write!(f, "aarch64"),
        }
    }
}

impl FromStr for Arch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "aarch64" | "arm64" => Ok(Self::Aarch64),
            _ => Err(ConfigError::InvalidValue {
                field: "arch".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Build type axis, spelled the way CMake spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::Release => write!(f, "Release"),
            Self::RelWithDebInfo => write!(f, "RelWithDebInfo"),
            Self::MinSizeRel => write!(f, "MinSizeRel"),
        }
    }
}

impl FromStr for BuildType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            _ => Err(ConfigError::InvalidValue {
                field: "build_type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl CompilerFamily {
    /// Default C/C++ compiler executables for this family
    #[must_use]
    pub fn executables(self) -> (&'static str, &'static str) {
        match self {
            Self::Gcc => ("gcc", "g++"),
            Self::Clang | Self::AppleClang => ("clang", "clang++"),
            Self::Msvc => ("cl", "cl"),
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gcc => write!(f, "gcc"),
            Self::Clang => write!(f, "clang"),
            Self::AppleClang => write!(f, "apple-clang"),
            Self::Msvc => write!(f, "msvc"),
        }
    }
}

/// Compiler identity: family plus major version, e.g. `gcc-13`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Compiler {
    pub family: CompilerFamily,
    pub version: u32,
}

// Config files and recipes spell compilers as "gcc-13", so the serde form is
// the display string, not a struct.
impl Serialize for Compiler {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Compiler {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl Compiler {
    #[must_use]
    pub fn new(family: CompilerFamily, version: u32) -> Self {
        Self { family, version }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family, self.version)
    }
}

impl FromStr for Compiler {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue {
            field: "compiler".to_string(),
            value: s.to_string(),
        };

        // Family names may themselves contain '-' (apple-clang-17), so split
        // on the last dash.
        let (family, version) = s.rsplit_once('-').ok_or_else(invalid)?;
        let family = match family {
            "gcc" => CompilerFamily::Gcc,
            "clang" => CompilerFamily::Clang,
            "apple-clang" => CompilerFamily::AppleClang,
            "msvc" => CompilerFamily::Msvc,
            _ => return Err(invalid()),
        };
        let version: u32 = version.parse().map_err(|_| invalid())?;
        Ok(Self { family, version })
    }
}

/// One of the four recognized settings axis names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsAxis {
    Os,
    Compiler,
    BuildType,
    Arch,
}

impl SettingsAxis {
    /// All four axes, in the order recipes declare them
    pub const ALL: [SettingsAxis; 4] = [Self::Os, Self::Compiler, Self::BuildType, Self::Arch];
}

impl fmt::Display for SettingsAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Os => write!(f, "os"),
            Self::Compiler => write!(f, "compiler"),
            Self::BuildType => write!(f, "build_type"),
            Self::Arch => write!(f, "arch"),
        }
    }
}
