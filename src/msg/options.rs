//! Output options shared by all message builders.

use crate::common::codepage::DEFAULT_CODE_PAGE;
use crate::ole::SectorSize;
#[cfg(feature = "rtf")]
use crate::rtf::RtfCompression;
use serde::{Deserialize, Serialize};

/// Options controlling how a message file is written.
///
/// Every field has a default, so partial configurations deserialize:
///
/// ```
/// use oxmsg::msg::MsgOptions;
///
/// let options: MsgOptions = serde_json::from_str(r#"{ "code_page": 1251 }"#)?;
/// assert_eq!(options.code_page, 1251);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgOptions {
    /// Sector size of the compound file
    pub sector_size: SectorSize,
    /// Code page for `String8` values and `PidTagMessageCodepage`
    pub code_page: u32,
    /// Also emit the body as compressed RTF
    #[cfg(feature = "rtf")]
    pub body_as_rtf: bool,
    /// Compression mode of the RTF body
    #[cfg(feature = "rtf")]
    pub rtf_compression: RtfCompression,
}

impl Default for MsgOptions {
    fn default() -> Self {
        Self {
            sector_size: SectorSize::default(),
            code_page: DEFAULT_CODE_PAGE,
            #[cfg(feature = "rtf")]
            body_as_rtf: false,
            #[cfg(feature = "rtf")]
            rtf_compression: RtfCompression::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MsgOptions::default();
        assert_eq!(options.code_page, 1252);
        assert_eq!(options.sector_size, SectorSize::V3);
    }

    #[test]
    fn test_json_round_trip() {
        let options = MsgOptions {
            sector_size: SectorSize::V4,
            ..MsgOptions::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"4096\""));
        let back: MsgOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[cfg(feature = "rtf")]
    #[test]
    fn test_rtf_mode_names() {
        let options: MsgOptions =
            serde_json::from_str(r#"{ "body_as_rtf": true, "rtf_compression": "never" }"#).unwrap();
        assert!(options.body_as_rtf);
        assert_eq!(options.rtf_compression, RtfCompression::Never);
    }
}
