// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Collapse fully-qualified protobuf names onto the shortest unique flat
//! identifiers used as OpenAPI definition keys.

use std::collections::HashMap;

/// Resolve every FQN to a flat name.
///
/// For each name, the candidate at depth `d` is the concatenation of its
/// last `d + 1` dot-separated segments; the first candidate whose segment
/// suffix is unique across all inputs wins. Names that never become
/// unique fall back to the concatenation of every segment. With
/// `use_fqn` set, the FQN itself (leading dot stripped) is used instead.
///
/// The result only depends on the input set, so callers memoize it per
/// registry.
pub fn resolve_names(fqns: &[&str], use_fqn: bool) -> HashMap<String, String> {
    let mut unique_names = HashMap::with_capacity(fqns.len());
    if use_fqn {
        for fqn in fqns {
            unique_names.insert(fqn.to_string(), fqn.trim_start_matches('.').to_string());
        }
        return unique_names;
    }

    let hierarchies: Vec<Vec<&str>> = fqns
        .iter()
        .map(|f| f.trim_start_matches('.').split('.').collect())
        .collect();

    // suffix_counts[d] counts every suffix of d + 1 segments.
    let max_depth = hierarchies.iter().map(Vec::len).max().unwrap_or(0);
    let mut suffix_counts: Vec<HashMap<&[&str], usize>> = vec![HashMap::new(); max_depth];
    for h in &hierarchies {
        for depth in 0..h.len() {
            let suffix = &h[h.len() - depth - 1..];
            *suffix_counts[depth].entry(suffix).or_insert(0) += 1;
        }
    }

    for (fqn, h) in fqns.iter().zip(&hierarchies) {
        let mut name = None;
        for depth in 0..h.len() {
            let suffix = &h[h.len() - depth - 1..];
            if suffix_counts[depth].get(suffix).copied() == Some(1) {
                name = Some(suffix.concat());
                break;
            }
        }
        unique_names.insert(fqn.to_string(), name.unwrap_or_else(|| h.concat()));
    }
    unique_names
}
