//! Semantic version of a glTF asset.

use std::fmt;

/// Semantic version `{major, minor, patch}`.
///
/// Ordering is lexicographic over the three parts, so the default
/// `v0.0.0` compares below every real asset version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a version from its parts.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse `"2.0"`, `"v1.2.3"` and similar.
    ///
    /// Parsing stops at the first part that is not a number; that part and
    /// every following one stay 0.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let text = text.strip_prefix('v').unwrap_or(text);
        let mut parts = [0u32; 3];
        for (slot, part) in parts.iter_mut().zip(text.split('.')) {
            let digits: &str = {
                let end = part
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(part.len());
                &part[..end]
            };
            match digits.parse() {
                Ok(value) => *slot = value,
                Err(_) => break,
            }
            if digits.len() != part.len() {
                break;
            }
        }
        Self::new(parts[0], parts[1], parts[2])
    }

    /// Returns true if any part is non-zero.
    #[inline]
    pub fn is_set(&self) -> bool {
        *self > Self::default()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        assert_eq!(Version::parse("2.0"), Version::new(2, 0, 0));
        assert_eq!(Version::parse("v1.2.3"), Version::new(1, 2, 3));
        assert_eq!(Version::parse(""), Version::default());
        assert_eq!(Version::parse("abc"), Version::default());
        assert_eq!(Version::parse("2.x.5"), Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_order() {
        assert!(Version::new(2, 0, 0) > Version::new(1, 9, 9));
        assert!(!Version::default().is_set());
        assert!(Version::parse("0.0.1").is_set());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::parse("2.0").to_string(), "v2.0.0");
    }
}
