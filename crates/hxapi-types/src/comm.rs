//! Communication medium selector for the controller connection.
//!
//! The raw values are part of the controller's call signatures and must
//! not change: `COM_ETHERNET = 0`, `COM_RTX = 1`, `COM_RTX_CH = 2`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HxError, HxResult};
use crate::typedef::Int32;

/// Transport used to reach the controller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum CommMedium {
    /// TCP/IP over Ethernet.
    #[default]
    Ethernet = 0,
    /// Real-time extension shared memory.
    Rtx = 1,
    /// Real-time extension with an explicit channel.
    #[serde(rename = "rtx_ch")]
    RtxChannel = 2,
}

/// Raw value of [`CommMedium::Ethernet`].
pub const COM_ETHERNET: Int32 = CommMedium::Ethernet.as_raw();
/// Raw value of [`CommMedium::Rtx`].
pub const COM_RTX: Int32 = CommMedium::Rtx.as_raw();
/// Raw value of [`CommMedium::RtxChannel`].
pub const COM_RTX_CH: Int32 = CommMedium::RtxChannel.as_raw();

impl CommMedium {
    /// All media in ascending raw order.
    pub const ALL: [CommMedium; 3] = [Self::Ethernet, Self::Rtx, Self::RtxChannel];

    /// Raw wire value.
    #[must_use]
    pub const fn as_raw(self) -> Int32 {
        self as Int32
    }

    /// Header constant name.
    #[must_use]
    pub const fn c_name(self) -> &'static str {
        match self {
            Self::Ethernet => "COM_ETHERNET",
            Self::Rtx => "COM_RTX",
            Self::RtxChannel => "COM_RTX_CH",
        }
    }

    /// Returns true if the medium needs a channel number.
    #[must_use]
    pub const fn requires_channel(self) -> bool {
        matches!(self, Self::RtxChannel)
    }
}

impl fmt::Display for CommMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

impl From<CommMedium> for Int32 {
    fn from(medium: CommMedium) -> Self {
        medium.as_raw()
    }
}

impl TryFrom<Int32> for CommMedium {
    type Error = HxError;

    fn try_from(value: Int32) -> HxResult<Self> {
        match value {
            COM_ETHERNET => Ok(Self::Ethernet),
            COM_RTX => Ok(Self::Rtx),
            COM_RTX_CH => Ok(Self::RtxChannel),
            other => Err(HxError::UnknownMedium(other)),
        }
    }
}

impl FromStr for CommMedium {
    type Err = HxError;

    /// Accepts the header names (`COM_RTX`) and the config names (`rtx`),
    /// ignoring ASCII case.
    fn from_str(s: &str) -> HxResult<Self> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("com_").unwrap_or(name.as_str());
        match name {
            "ethernet" => Ok(Self::Ethernet),
            "rtx" => Ok(Self::Rtx),
            "rtx_ch" => Ok(Self::RtxChannel),
            _ => Err(HxError::UnknownMediumName(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values() {
        assert_eq!(COM_ETHERNET, 0);
        assert_eq!(COM_RTX, 1);
        assert_eq!(COM_RTX_CH, 2);
        assert_eq!(Int32::from(CommMedium::RtxChannel), 2);
    }

    #[test]
    fn test_ordering() {
        assert!(CommMedium::Ethernet < CommMedium::Rtx);
        assert!(CommMedium::Rtx < CommMedium::RtxChannel);
        let mut sorted = CommMedium::ALL;
        sorted.sort();
        assert_eq!(sorted, CommMedium::ALL);
    }

    #[test]
    fn test_try_from_raw() {
        for medium in CommMedium::ALL {
            assert_eq!(CommMedium::try_from(medium.as_raw()), Ok(medium));
        }
        assert_eq!(CommMedium::try_from(3), Err(HxError::UnknownMedium(3)));
        assert_eq!(CommMedium::try_from(-1), Err(HxError::UnknownMedium(-1)));
    }

    #[test]
    fn test_display_uses_header_names() {
        assert_eq!(CommMedium::Ethernet.to_string(), "COM_ETHERNET");
        assert_eq!(CommMedium::RtxChannel.to_string(), "COM_RTX_CH");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("COM_RTX".parse::<CommMedium>(), Ok(CommMedium::Rtx));
        assert_eq!("rtx_ch".parse::<CommMedium>(), Ok(CommMedium::RtxChannel));
        assert_eq!(" Ethernet ".parse::<CommMedium>(), Ok(CommMedium::Ethernet));
        assert_eq!(
            "serial".parse::<CommMedium>(),
            Err(HxError::UnknownMediumName("serial".to_string()))
        );
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&CommMedium::RtxChannel).unwrap(),
            "\"rtx_ch\""
        );
        let medium: CommMedium = serde_json::from_str("\"ethernet\"").unwrap();
        assert_eq!(medium, CommMedium::Ethernet);
        assert!(serde_json::from_str::<CommMedium>("\"COM_RTX\"").is_err());
    }

    #[test]
    fn test_requires_channel() {
        assert!(CommMedium::RtxChannel.requires_channel());
        assert!(!CommMedium::Ethernet.requires_channel());
        assert!(!CommMedium::Rtx.requires_channel());
    }

    #[test]
    fn test_default_is_ethernet() {
        assert_eq!(CommMedium::default(), CommMedium::Ethernet);
    }
}
