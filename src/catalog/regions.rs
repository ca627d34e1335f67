//! AWS region codes and the location names the price list uses for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Regions the price list can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Region {
    #[serde(rename = "ap-northeast-1")]
    ApNortheast1,
    #[serde(rename = "ap-southeast-1")]
    ApSoutheast1,
    #[serde(rename = "ap-southeast-2")]
    ApSoutheast2,
    #[serde(rename = "eu-central-1")]
    EuCentral1,
    #[serde(rename = "eu-west-1")]
    EuWest1,
    #[serde(rename = "sa-east-1")]
    SaEast1,
    #[default]
    #[serde(rename = "us-east-1")]
    UsEast1,
    #[serde(rename = "us-west-1")]
    UsWest1,
    #[serde(rename = "us-west-2")]
    UsWest2,
}

impl Region {
    /// Returns the short region code, e.g. `us-east-1`.
    pub fn code(&self) -> &'static str {
        match self {
            Region::ApNortheast1 => "ap-northeast-1",
            Region::ApSoutheast1 => "ap-southeast-1",
            Region::ApSoutheast2 => "ap-southeast-2",
            Region::EuCentral1 => "eu-central-1",
            Region::EuWest1 => "eu-west-1",
            Region::SaEast1 => "sa-east-1",
            Region::UsEast1 => "us-east-1",
            Region::UsWest1 => "us-west-1",
            Region::UsWest2 => "us-west-2",
        }
    }

    /// Returns the location name product attributes carry for this region.
    ///
    /// Matching against offer files is an exact string comparison, so these
    /// must track the provider's spelling character for character.
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::ApNortheast1 => "Asia Pacific (Tokyo)",
            Region::ApSoutheast1 => "Asia Pacific (Singapore)",
            Region::ApSoutheast2 => "Asia Pacific (Sydney)",
            Region::EuCentral1 => "EU (Frankfurt)",
            Region::EuWest1 => "EU (Ireland)",
            Region::SaEast1 => "South America (Sao Paulo)",
            Region::UsEast1 => "US East (N. Virginia)",
            Region::UsWest1 => "US West (N. California)",
            Region::UsWest2 => "US West (Oregon)",
        }
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[
            Region::ApNortheast1,
            Region::ApSoutheast1,
            Region::ApSoutheast2,
            Region::EuCentral1,
            Region::EuWest1,
            Region::SaEast1,
            Region::UsEast1,
            Region::UsWest1,
            Region::UsWest2,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::all()
            .iter()
            .copied()
            .find(|r| {
                r.code().eq_ignore_ascii_case(wanted) || r.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| RegionParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Error)]
#[error("Unknown region '{0}'. Valid regions: ap-northeast-1, ap-southeast-1, ap-southeast-2, eu-central-1, eu-west-1, sa-east-1, us-east-1, us-west-1, us-west-2")]
pub struct RegionParseError(String);
