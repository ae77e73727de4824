//! Where the trainer status block lives in remote memory, per game version.

use crate::error::{Error, Result};

/// How to reach the status block for one game version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// Directly readable address.
    Absolute(u64),
    /// Pointer chain: the first entry is a base address, each later entry
    /// is added after dereferencing the previous result. The chain ends at
    /// the address the block is read from.
    Chain(&'static [i64]),
}

/// A resolved location plus how many bytes to read there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationDescriptor {
    pub source: LocationSource,
    pub len: usize,
}

impl LocationDescriptor {
    pub const fn absolute(address: u64, len: usize) -> Self {
        Self {
            source: LocationSource::Absolute(address),
            len,
        }
    }

    pub const fn chain(chain: &'static [i64], len: usize) -> Self {
        Self {
            source: LocationSource::Chain(chain),
            len,
        }
    }
}

/// Mapping from a game version string to its location descriptor.
///
/// Lookups are exact-string; a version without an entry is a hard failure,
/// never a fallback to a neighboring entry, since a stale address would be
/// silently read as garbage.
#[derive(Debug, Clone, Copy)]
pub struct VersionOffsetTable {
    entries: &'static [(&'static str, LocationDescriptor)],
}

impl VersionOffsetTable {
    pub const fn new(entries: &'static [(&'static str, LocationDescriptor)]) -> Self {
        Self { entries }
    }

    pub fn resolve(&self, version: &str) -> Result<LocationDescriptor> {
        self.entries
            .iter()
            .find(|(v, _)| *v == version)
            .map(|(_, descriptor)| *descriptor)
            .ok_or_else(|| Error::UnsupportedVersion(version.to_string()))
    }

    pub fn versions(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(v, _)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: VersionOffsetTable = VersionOffsetTable::new(&[
        ("1.0.0", LocationDescriptor::absolute(0x1000, 4)),
        ("1.1.0", LocationDescriptor::chain(&[0x2000, 0x10], 4)),
    ]);

    #[test]
    fn test_resolve_known_version() {
        let descriptor = TABLE.resolve("1.0.0").unwrap();
        assert_eq!(descriptor.source, LocationSource::Absolute(0x1000));
        assert_eq!(descriptor.len, 4);
    }

    #[test]
    fn test_resolve_unknown_version_fails() {
        let err = TABLE.resolve("9.9.9").unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(v) if v == "9.9.9"));
    }

    #[test]
    fn test_resolve_requires_exact_match() {
        // No prefix matching, no "closest" entry.
        assert!(TABLE.resolve("1.0").is_err());
        assert!(TABLE.resolve("1.0.0 ").is_err());
    }

    #[test]
    fn test_versions_iterates_entries() {
        let versions: Vec<_> = TABLE.versions().collect();
        assert_eq!(versions, vec!["1.0.0", "1.1.0"]);
    }
}
