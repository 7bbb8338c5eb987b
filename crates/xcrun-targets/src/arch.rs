//! CPU architecture classification.

/// Coarse class of a CPU architecture name.
///
/// Only the x86 family is treated as desktop (macOS) hardware; every other
/// architecture is assumed to be a mobile or embedded (iOS) device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchClass {
    Desktop,
    Mobile,
}

/// x86 family names that identify desktop-class targets.
const DESKTOP_ARCHES: &[&str] = &["x86_64", "x86_64h", "i386", "i486", "i586", "i686", "x86"];

impl ArchClass {
    /// Classify an architecture name such as `x86_64` or `arm64`.
    pub fn of(arch: &str) -> Self {
        if DESKTOP_ARCHES.contains(&arch) {
            ArchClass::Desktop
        } else {
            ArchClass::Mobile
        }
    }

    pub fn is_desktop(self) -> bool {
        self == ArchClass::Desktop
    }
}
