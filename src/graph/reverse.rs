//! Reverse (dependents) index construction.

use indexmap::IndexMap;

use crate::parser::PackageIndex;

/// Inverts a forward dependency index into a dependents index.
///
/// For every (package, dependency) pair in the forward index, `package`
/// appears in the output under `dependency`. Packages nobody depends on are
/// absent from the output entirely, so callers must treat a missing key as
/// "no dependents". Dependents are listed in the order they were discovered
/// while scanning the forward index, which is first-seen order and therefore
/// deterministic for a given deserialization.
///
/// # Example
///
/// ```rust
/// use apkscope::graph::build_reverse_index;
/// use apkscope::parser::local;
///
/// let index = local::parse_str("app -> libfoo\ntool -> libfoo\n");
/// let reverse = build_reverse_index(&index);
///
/// assert_eq!(reverse.neighbors("libfoo"), ["app".to_string(), "tool".to_string()]);
/// assert!(!reverse.contains("app"));
/// ```
pub fn build_reverse_index(index: &PackageIndex) -> PackageIndex {
    let mut reverse: IndexMap<String, Vec<String>> = IndexMap::new();

    for (package, deps) in index.iter() {
        for dep in deps {
            reverse.entry(dep.clone()).or_default().push(package.clone());
        }
    }

    PackageIndex::from(reverse)
}
