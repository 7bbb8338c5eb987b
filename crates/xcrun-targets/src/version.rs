//! Lenient deployment-version scanning.
//!
//! Deployment targets come from hand-written `info.ini` files and are scanned
//! rather than parsed: digits accumulate into the current field and any other
//! byte, `.` included, moves on to the next field. Nothing is rejected,
//! so `"10..3"` reads as `10.0.3`.

use std::fmt;

/// A `major.minor.patch` deployment version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeploymentVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl DeploymentVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Scan a version string.
    ///
    /// Returns `None` only for an empty input; any other string produces a
    /// version, with missing fields left at zero and fields past the third
    /// ignored.
    pub fn scan(input: &str) -> Option<Self> {
        if input.is_empty() {
            return None;
        }

        let mut fields = [0u32; 3];
        let mut index = 0usize;
        for byte in input.bytes() {
            if byte.is_ascii_digit() {
                if let Some(field) = fields.get_mut(index) {
                    *field = field.saturating_mul(10).saturating_add(u32::from(byte - b'0'));
                }
            } else {
                index = index.saturating_add(1);
            }
        }

        Some(Self::new(fields[0], fields[1], fields[2]))
    }
}

impl fmt::Display for DeploymentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
