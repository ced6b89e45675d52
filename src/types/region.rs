//! Region - Validated object-store region identifier

use super::DeployError;
use std::fmt;

/// Mirrors the `aws` partition region list of the SDK endpoint metadata.
/// Kept by hand: add new regions here when they launch.
const KNOWN_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "us-gov-east-1",
    "us-gov-west-1",
    "ca-central-1",
    "ca-west-1",
    "sa-east-1",
    "mx-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "af-south-1",
    "me-south-1",
    "me-central-1",
    "il-central-1",
    "ap-east-1",
    "ap-south-1",
    "ap-south-2",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    "ap-southeast-6",
    "ap-southeast-7",
    "cn-north-1",
    "cn-northwest-1",
];

/// A region identifier known to the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region(&'static str);

impl Region {
    /// Resolve a region name, failing with `UnknownRegion` for anything unlisted
    pub fn parse(name: &str) -> Result<Self, DeployError> {
        KNOWN_REGIONS
            .iter()
            .copied()
            .find(|known| *known == name)
            .map(Region)
            .ok_or_else(|| DeployError::UnknownRegion(name.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_region_parses() {
        let region = Region::parse("eu-west-1").expect("eu-west-1 is known");
        assert_eq!(region.as_str(), "eu-west-1");
        assert_eq!(region.to_string(), "eu-west-1");
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        let err = Region::parse("moon-base-1").unwrap_err();
        assert!(matches!(err, DeployError::UnknownRegion(ref r) if r == "moon-base-1"));
    }

    #[test]
    fn test_empty_region_is_rejected() {
        assert!(Region::parse("").is_err());
    }
}
