//! Set difference between wanted and present extensions

use crate::identity::ExtensionIdentity;
use std::collections::HashSet;

/// Return the wanted identities whose (publisher, name, version) triple
/// does not appear in `present`, without duplicates.
///
/// Result order follows first appearance in `wanted`; callers must not
/// rely on it beyond determinism.
pub fn missing(
    wanted: &[ExtensionIdentity],
    present: &[ExtensionIdentity],
) -> Vec<ExtensionIdentity> {
    let present: HashSet<&ExtensionIdentity> = present.iter().collect();
    let mut seen: HashSet<&ExtensionIdentity> = HashSet::new();
    wanted
        .iter()
        .filter(|ext| !present.contains(*ext) && seen.insert(*ext))
        .cloned()
        .collect()
}
