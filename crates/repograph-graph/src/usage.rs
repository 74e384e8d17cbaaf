//! Usage metadata capability.
//!
//! `used_in` on a hierarchy node is opaque to the layout engine. This module
//! is the single place that produces it, from either supplied data or a seeded
//! approximation. The approximation is not authoritative and exists so demos
//! and tests have something to show.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use repograph_core::{HierarchyNode, ParseError};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_HEURISTIC_PROBABILITY: f64 = 0.3;
pub const DEFAULT_HEURISTIC_SEED: u64 = 0;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UsageResolver {
    /// Leave `used_in` unset
    #[default]
    None,
    /// Target path to the paths that reference it
    Provided(BTreeMap<String, Vec<String>>),
    /// Random script-to-script references, reproducible per seed
    Heuristic { seed: u64, probability: f64 },
}

impl UsageResolver {
    pub fn heuristic(seed: u64) -> Self {
        UsageResolver::Heuristic {
            seed,
            probability: DEFAULT_HEURISTIC_PROBABILITY,
        }
    }

    /// Overwrite `used_in` on every node of the tree.
    pub fn annotate(&self, roots: &mut [HierarchyNode]) {
        match self {
            UsageResolver::None => {
                for_each_node_mut(roots, |node| node.used_in = None);
            }
            UsageResolver::Provided(mapping) => {
                for_each_node_mut(roots, |node| {
                    node.used_in = if node.is_directory() {
                        None
                    } else {
                        mapping.get(&node.path).cloned()
                    };
                });
            }
            UsageResolver::Heuristic { seed, probability } => {
                annotate_heuristic(roots, *seed, *probability);
            }
        }
    }
}

fn annotate_heuristic(roots: &mut [HierarchyNode], seed: u64, probability: f64) {
    let probability = if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut scripts = Vec::new();
    for_each_node_mut(roots, |node| {
        if node.category().is_some_and(|category| category.is_script()) {
            scripts.push(node.path.clone());
        }
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let mut used_in: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for source in &scripts {
        for target in &scripts {
            if source != target && rng.gen_bool(probability) {
                used_in
                    .entry(target.as_str())
                    .or_default()
                    .push(source.clone());
            }
        }
    }

    let mut annotated = 0usize;
    for_each_node_mut(roots, |node| {
        node.used_in = if node.category().is_some_and(|category| category.is_script()) {
            annotated += 1;
            Some(used_in.remove(node.path.as_str()).unwrap_or_default())
        } else {
            None
        };
    });

    tracing::debug!(
        "Heuristic usage: {} script files annotated (seed {}, p = {})",
        annotated,
        seed,
        probability
    );
}

/// Pre-order mutable visit without recursion.
fn for_each_node_mut(roots: &mut [HierarchyNode], mut visit: impl FnMut(&mut HierarchyNode)) {
    let mut stack: Vec<&mut HierarchyNode> = roots.iter_mut().rev().collect();
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.children.iter_mut().rev());
    }
}

impl fmt::Display for UsageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageResolver::None => f.write_str("none"),
            UsageResolver::Provided(mapping) => write!(f, "provided({} targets)", mapping.len()),
            UsageResolver::Heuristic { seed, .. } => write!(f, "heuristic:{}", seed),
        }
    }
}

impl FromStr for UsageResolver {
    type Err = ParseError;

    /// `none`, `heuristic`, or `heuristic:<seed>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.split_once(':') {
            None if value == "none" => Ok(UsageResolver::None),
            None if value == "heuristic" => Ok(UsageResolver::heuristic(DEFAULT_HEURISTIC_SEED)),
            Some(("heuristic", seed)) => seed
                .parse()
                .map(UsageResolver::heuristic)
                .map_err(|_| ParseError::InvalidUsageResolver(s.to_string())),
            _ => Err(ParseError::InvalidUsageResolver(s.to_string())),
        }
    }
}
