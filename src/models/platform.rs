use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// Access ids at or above this value belong to iOS applications.
pub const IOS_MIN_ACCESS_ID: i64 = 2_200_000_000;

pub const IOSENV_PROD: i32 = 1;
pub const IOSENV_DEV: i32 = 2;

/// Device family codes used by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    All,
    Browser,
    Pc,
    Android,
    Ios,
    WinPhone,
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DeviceType::All => write!(f, "all"),
            DeviceType::Browser => write!(f, "browser"),
            DeviceType::Pc => write!(f, "pc"),
            DeviceType::Android => write!(f, "android"),
            DeviceType::Ios => write!(f, "ios"),
            DeviceType::WinPhone => write!(f, "winphone"),
        }
    }
}

pub fn is_ios_environment(environment: i32) -> bool {
    environment == IOSENV_PROD || environment == IOSENV_DEV
}
