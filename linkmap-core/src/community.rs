//! Community detection over the link graph.
//!
//! Four algorithms are exposed behind a closed enum so an unsupported
//! name fails as a typed error at parse time instead of a lookup failure
//! at call time. All of them treat the graph as undirected.

use crate::error::{AnalysisError, Result};
use crate::graph::LinkGraph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Upper bound on the number of spin states for the spinglass run.
/// The algorithm may settle on fewer communities than this, never more.
const MAX_SPINS: usize = 25;

/// Sweep limit for the iterative algorithms.
const MAX_SWEEPS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityAlgorithm {
    LabelPropagation,
    Spinglass,
    Infomap,
    LeadingEigenvector,
}

impl CommunityAlgorithm {
    pub const ALL: [CommunityAlgorithm; 4] = [
        CommunityAlgorithm::LabelPropagation,
        CommunityAlgorithm::Spinglass,
        CommunityAlgorithm::Infomap,
        CommunityAlgorithm::LeadingEigenvector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommunityAlgorithm::LabelPropagation => "label_propagation",
            CommunityAlgorithm::Spinglass => "spinglass",
            CommunityAlgorithm::Infomap => "infomap",
            CommunityAlgorithm::LeadingEigenvector => "leading_eigenvector",
        }
    }
}

impl fmt::Display for CommunityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommunityAlgorithm {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "label_propagation" => Ok(CommunityAlgorithm::LabelPropagation),
            "spinglass" => Ok(CommunityAlgorithm::Spinglass),
            "infomap" => Ok(CommunityAlgorithm::Infomap),
            "leading_eigenvector" => Ok(CommunityAlgorithm::LeadingEigenvector),
            other => Err(AnalysisError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Total assignment of vertices to communities, indexed by vertex index.
///
/// Ids are compact: they run from 0 to `community_count() - 1` in
/// first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    assignments: Vec<usize>,
    count: usize,
}

impl Membership {
    fn new(mut raw: Vec<usize>) -> Self {
        let mut remap = HashMap::new();
        for label in &mut raw {
            let next = remap.len();
            *label = *remap.entry(*label).or_insert(next);
        }
        let count = remap.len();
        Self {
            assignments: raw,
            count,
        }
    }

    pub fn community_of(&self, vertex: usize) -> usize {
        self.assignments[vertex]
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    pub fn community_count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Detect communities in `graph` with the chosen algorithm.
///
/// The seed makes a single run reproducible. Calling twice with the same
/// seed repeats the same draw; it does not produce independent samples.
pub fn detect(graph: &LinkGraph, algorithm: CommunityAlgorithm, seed: u64) -> Membership {
    let mut rng = StdRng::seed_from_u64(seed);
    debug!(algorithm = %algorithm, seed, "detecting communities");
    let raw = match algorithm {
        CommunityAlgorithm::LabelPropagation => label_propagation(graph, &mut rng),
        CommunityAlgorithm::Spinglass => spinglass(graph, &mut rng),
        CommunityAlgorithm::Infomap => infomap(graph, &mut rng),
        CommunityAlgorithm::LeadingEigenvector => leading_eigenvector(graph, &mut rng),
    };
    Membership::new(raw)
}

/// Keep only the vertices of one community.
///
/// A negative `community` keeps everything unchanged. Otherwise the
/// retained vertex set is the exact preimage of the id under the
/// membership mapping; an id with no members is an error.
pub fn filter_community(
    graph: &LinkGraph,
    membership: &Membership,
    community: i64,
) -> Result<(LinkGraph, Membership)> {
    if community < 0 {
        return Ok((graph.clone(), membership.clone()));
    }
    let id = community as usize;
    let keep: Vec<bool> = membership
        .assignments()
        .iter()
        .map(|&label| label == id)
        .collect();
    if !keep.iter().any(|&k| k) {
        return Err(AnalysisError::EmptyCommunity(community));
    }
    let filtered = graph.induced_subgraph(&keep);
    let assignments = membership
        .assignments()
        .iter()
        .copied()
        .filter(|&label| label == id)
        .collect();
    Ok((filtered, Membership::new(assignments)))
}

/// Asynchronous label propagation (Raghavan et al. 2007).
///
/// Every vertex starts in its own community and repeatedly adopts the
/// label held by most of its neighbours, ties broken at random, until a
/// full sweep changes nothing.
fn label_propagation(graph: &LinkGraph, rng: &mut StdRng) -> Vec<usize> {
    let adjacency = graph.undirected_adjacency();
    let n = adjacency.len();
    let mut labels: Vec<usize> = (0..n).collect();
    let mut order: Vec<usize> = (0..n).collect();

    for _ in 0..MAX_SWEEPS {
        order.shuffle(rng);
        let mut changed = false;
        for &v in &order {
            if adjacency[v].is_empty() {
                continue;
            }
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for &u in &adjacency[v] {
                *counts.entry(labels[u]).or_default() += 1;
            }
            let best = counts.values().copied().max().unwrap_or(0);
            let mut candidates: Vec<usize> = counts
                .into_iter()
                .filter(|&(_, count)| count == best)
                .map(|(label, _)| label)
                .collect();
            // Sort before the random draw so ties depend only on the rng,
            // not on hash-map iteration order.
            candidates.sort_unstable();
            let new_label = *candidates.choose(rng).unwrap_or(&labels[v]);
            if new_label != labels[v] {
                labels[v] = new_label;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    labels
}

/// Spinglass community detection: simulated annealing of a Potts model
/// with at most [`MAX_SPINS`] spin states (Reichardt & Bornholdt 2006,
/// gamma = 1, in which case the ground state maximises modularity).
fn spinglass(graph: &LinkGraph, rng: &mut StdRng) -> Vec<usize> {
    let adjacency = graph.undirected_adjacency();
    let n = adjacency.len();
    let spins = MAX_SPINS.min(n.max(1));
    let degrees: Vec<f64> = adjacency.iter().map(|a| a.len() as f64).collect();
    let two_m: f64 = degrees.iter().sum();
    if two_m == 0.0 {
        return (0..n).collect();
    }

    let mut state: Vec<usize> = (0..n).map(|_| rng.gen_range(0..spins)).collect();
    let mut spin_degree = vec![0.0_f64; spins];
    for v in 0..n {
        spin_degree[state[v]] += degrees[v];
    }

    // Energy of putting v into spin s, with v's own contribution to the
    // spin degree excluded: -(links into s) + d_v * D_s / 2m.
    let local_energy = |v: usize,
                        s: usize,
                        state: &[usize],
                        spin_degree: &[f64]|
     -> f64 {
        let links = adjacency[v].iter().filter(|&&u| state[u] == s).count() as f64;
        let mut total = spin_degree[s];
        if state[v] == s {
            total -= degrees[v];
        }
        -links + degrees[v] * total / two_m
    };

    let mut temperature = 1.0_f64;
    let cooling = 0.96_f64;
    for _ in 0..MAX_SWEEPS {
        for v in 0..n {
            let proposal = rng.gen_range(0..spins);
            if proposal == state[v] {
                continue;
            }
            let delta = local_energy(v, proposal, &state, &spin_degree)
                - local_energy(v, state[v], &state, &spin_degree);
            if delta <= 0.0 || rng.gen_range(0.0..1.0) < (-delta / temperature).exp() {
                spin_degree[state[v]] -= degrees[v];
                state[v] = proposal;
                spin_degree[proposal] += degrees[v];
            }
        }
        temperature *= cooling;
    }

    // Finish with a zero-temperature sweep so the result is a local
    // minimum, not wherever the last accepted fluctuation left it.
    for v in 0..n {
        let current = local_energy(v, state[v], &state, &spin_degree);
        let best = (0..spins)
            .min_by(|&a, &b| {
                local_energy(v, a, &state, &spin_degree)
                    .total_cmp(&local_energy(v, b, &state, &spin_degree))
            })
            .unwrap_or(state[v]);
        if local_energy(v, best, &state, &spin_degree) < current {
            spin_degree[state[v]] -= degrees[v];
            state[v] = best;
            spin_degree[best] += degrees[v];
        }
    }
    state
}

fn plogp(x: f64) -> f64 {
    if x > 0.0 { x * x.log2() } else { 0.0 }
}

/// Infomap-style community detection: greedy local moves minimising the
/// two-level map equation (Rosvall & Bergstrom 2008), with node visit
/// rates approximated by the degree distribution.
fn infomap(graph: &LinkGraph, rng: &mut StdRng) -> Vec<usize> {
    let adjacency = graph.undirected_adjacency();
    let n = adjacency.len();
    let degrees: Vec<f64> = adjacency.iter().map(|a| a.len() as f64).collect();
    let two_m: f64 = degrees.iter().sum();
    if two_m == 0.0 {
        return (0..n).collect();
    }

    let mut module: Vec<usize> = (0..n).collect();
    // Per-module aggregates: total degree and cut size (edge endpoints
    // leaving the module), both in raw counts.
    let mut deg_sum = degrees.clone();
    let mut cut = degrees.clone();

    // Map equation terms that vary with the partition, up to the constant
    // per-node entropy. q and p are normalised by 2m.
    let partition_cost = |cut_i: f64, deg_i: f64| -> f64 {
        let q = cut_i / two_m;
        let p = deg_i / two_m;
        -2.0 * plogp(q) + plogp(q + p)
    };

    let mut order: Vec<usize> = (0..n).collect();
    for _ in 0..MAX_SWEEPS {
        order.shuffle(rng);
        let mut improved = false;

        for &v in &order {
            let home = module[v];
            if adjacency[v].is_empty() {
                continue;
            }

            // Edges from v into each adjacent module, own module included.
            let mut links: HashMap<usize, f64> = HashMap::new();
            for &u in &adjacency[v] {
                *links.entry(module[u]).or_default() += 1.0;
            }
            let to_home = links.get(&home).copied().unwrap_or(0.0);

            let cut_total: f64 = cut.iter().sum();
            let q_total = cut_total / two_m;

            let home_after_cut = cut[home] - degrees[v] + 2.0 * to_home;
            let home_after_deg = deg_sum[home] - degrees[v];

            let mut best_target = home;
            let mut best_delta = 0.0_f64;
            let mut candidates: Vec<usize> =
                links.keys().copied().filter(|&m| m != home).collect();
            candidates.sort_unstable();

            for target in candidates {
                let to_target = links[&target];
                let target_after_cut = cut[target] + degrees[v] - 2.0 * to_target;
                let target_after_deg = deg_sum[target] + degrees[v];

                let cut_delta =
                    (home_after_cut - cut[home]) + (target_after_cut - cut[target]);
                let q_total_after = (cut_total + cut_delta) / two_m;

                let before = plogp(q_total)
                    + partition_cost(cut[home], deg_sum[home])
                    + partition_cost(cut[target], deg_sum[target]);
                let after = plogp(q_total_after)
                    + partition_cost(home_after_cut, home_after_deg)
                    + partition_cost(target_after_cut, target_after_deg);

                let delta = after - before;
                if delta < best_delta - 1e-12 {
                    best_delta = delta;
                    best_target = target;
                }
            }

            if best_target != home {
                cut[home] = home_after_cut;
                deg_sum[home] = home_after_deg;
                cut[best_target] += degrees[v] - 2.0 * links[&best_target];
                deg_sum[best_target] += degrees[v];
                module[v] = best_target;
                improved = true;
            }
        }

        if !improved {
            break;
        }
    }
    module
}

/// Leading-eigenvector community detection (Newman 2006): recursive
/// bisection along the sign of the leading eigenvector of the modularity
/// matrix, estimated by shifted power iteration. A split with a
/// non-positive leading eigenvalue marks the group indivisible.
fn leading_eigenvector(graph: &LinkGraph, rng: &mut StdRng) -> Vec<usize> {
    let adjacency = graph.undirected_adjacency();
    let n = adjacency.len();
    let degrees: Vec<f64> = adjacency.iter().map(|a| a.len() as f64).collect();
    let two_m: f64 = degrees.iter().sum();
    if two_m == 0.0 {
        return (0..n).collect();
    }

    let mut labels = vec![0_usize; n];
    let mut next_label = 1;
    let mut pending: Vec<(usize, Vec<usize>)> = vec![(0, (0..n).collect())];

    while let Some((label, members)) = pending.pop() {
        if members.len() < 2 {
            continue;
        }
        if let Some((keep, split)) = bisect(&adjacency, &degrees, two_m, &members, rng) {
            for &v in &split {
                labels[v] = next_label;
            }
            pending.push((label, keep));
            pending.push((next_label, split));
            next_label += 1;
        }
    }
    labels
}

/// One spectral bisection step over the generalised modularity matrix
/// restricted to `members`. Returns the two halves, or `None` when the
/// group is indivisible (leading eigenvalue not positive, or the split
/// is trivial).
fn bisect(
    adjacency: &[Vec<usize>],
    degrees: &[f64],
    two_m: f64,
    members: &[usize],
    rng: &mut StdRng,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let size = members.len();
    let mut local: HashMap<usize, usize> = HashMap::with_capacity(size);
    for (i, &v) in members.iter().enumerate() {
        local.insert(v, i);
    }

    let group_degree: f64 = members.iter().map(|&v| degrees[v]).sum();

    // Row sums of B restricted to the group; subtracted on the diagonal so
    // each row of the generalised matrix sums to zero.
    let mut row_sum = vec![0.0_f64; size];
    let mut internal_degree = vec![0.0_f64; size];
    for (i, &v) in members.iter().enumerate() {
        let inside = adjacency[v].iter().filter(|u| local.contains_key(u)).count() as f64;
        internal_degree[i] = inside;
        row_sum[i] = inside - degrees[v] * group_degree / two_m;
    }

    // Gershgorin-style shift so power iteration converges to the leading
    // algebraic eigenvector rather than the largest-magnitude one.
    let shift = members
        .iter()
        .enumerate()
        .map(|(i, &v)| internal_degree[i] + degrees[v] * group_degree / two_m + row_sum[i].abs())
        .fold(0.0_f64, f64::max);

    let multiply = |x: &[f64], y: &mut [f64]| {
        let weighted: f64 = members
            .iter()
            .enumerate()
            .map(|(i, &v)| degrees[v] * x[i])
            .sum();
        for (i, &v) in members.iter().enumerate() {
            let mut acc = 0.0;
            for u in &adjacency[v] {
                if let Some(&j) = local.get(u) {
                    acc += x[j];
                }
            }
            acc -= degrees[v] * weighted / two_m;
            acc -= row_sum[i] * x[i];
            acc += shift * x[i];
            y[i] = acc;
        }
    };

    let mut vector: Vec<f64> = (0..size).map(|_| rng.gen_range(-0.5..0.5)).collect();
    let mut next = vec![0.0_f64; size];
    let mut eigenvalue = 0.0_f64;
    for _ in 0..200 {
        multiply(&vector, &mut next);
        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm < 1e-12 {
            return None;
        }
        for x in &mut next {
            *x /= norm;
        }
        eigenvalue = norm;
        std::mem::swap(&mut vector, &mut next);
    }
    // Undo the shift to recover the modularity-matrix eigenvalue.
    if eigenvalue - shift <= 1e-9 {
        return None;
    }

    let (mut keep, mut split) = (Vec::new(), Vec::new());
    for (i, &v) in members.iter().enumerate() {
        if vector[i] >= 0.0 {
            keep.push(v);
        } else {
            split.push(v);
        }
    }
    if keep.is_empty() || split.is_empty() {
        return None;
    }
    Some((keep, split))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgelist::Edge;

    // Two 4-cliques joined by a single bridge edge (3 -- 4).
    fn dumbbell() -> LinkGraph {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut edges = Vec::new();
        for clique in [[0, 1, 2, 3], [4, 5, 6, 7]] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push(Edge::new(names[clique[i]], names[clique[j]]));
                }
            }
        }
        edges.push(Edge::new("d", "e"));
        LinkGraph::from_edges(&edges).unwrap()
    }

    #[test]
    fn test_membership_ids_are_compact() {
        let membership = Membership::new(vec![7, 3, 7, 9, 3]);
        assert_eq!(membership.assignments(), &[0, 1, 0, 2, 1]);
        assert_eq!(membership.community_count(), 3);
    }

    #[test]
    fn test_all_algorithms_cover_every_vertex() {
        let graph = dumbbell();
        for algorithm in CommunityAlgorithm::ALL {
            let membership = detect(&graph, algorithm, 2000);
            assert_eq!(membership.len(), graph.node_count(), "{algorithm}");
            assert!(
                membership.community_count() <= graph.node_count(),
                "{algorithm}"
            );
            let max = membership.assignments().iter().copied().max().unwrap();
            assert_eq!(max + 1, membership.community_count(), "{algorithm}");
        }
    }

    #[test]
    fn test_same_seed_same_draw() {
        let graph = dumbbell();
        for algorithm in CommunityAlgorithm::ALL {
            let first = detect(&graph, algorithm, 42);
            let second = detect(&graph, algorithm, 42);
            assert_eq!(first, second, "{algorithm}");
        }
    }

    #[test]
    fn test_label_propagation_separates_cliques() {
        let graph = dumbbell();
        let membership = detect(&graph, CommunityAlgorithm::LabelPropagation, 2000);
        let m = membership.assignments();
        assert_eq!(m[0], m[1]);
        assert_eq!(m[1], m[2]);
        assert_eq!(m[5], m[6]);
        assert_eq!(m[6], m[7]);
    }

    #[test]
    fn test_leading_eigenvector_separates_cliques() {
        let graph = dumbbell();
        let membership = detect(&graph, CommunityAlgorithm::LeadingEigenvector, 2000);
        let m = membership.assignments();
        // Interior clique members land together, on opposite sides of
        // the bisection.
        assert_eq!(m[0], m[1]);
        assert_eq!(m[1], m[2]);
        assert_eq!(m[5], m[6]);
        assert_eq!(m[6], m[7]);
        assert_ne!(m[0], m[7]);
    }

    #[test]
    fn test_unsupported_algorithm_echoes_name() {
        let err = "louvain".parse::<CommunityAlgorithm>().unwrap_err();
        assert!(err.to_string().contains("louvain"));
    }

    #[test]
    fn test_filter_community_negative_keeps_all() {
        let graph = dumbbell();
        let membership = detect(&graph, CommunityAlgorithm::LabelPropagation, 2000);
        let (kept, kept_membership) = filter_community(&graph, &membership, -1).unwrap();
        assert_eq!(kept.node_count(), graph.node_count());
        assert_eq!(kept_membership.assignments(), membership.assignments());
    }

    #[test]
    fn test_filter_community_is_exact_preimage() {
        let graph = dumbbell();
        let membership = detect(&graph, CommunityAlgorithm::LabelPropagation, 2000);
        let id = membership.community_of(0);
        let expected: Vec<&str> = graph
            .labels()
            .iter()
            .zip(membership.assignments())
            .filter(|&(_, &label)| label == id)
            .map(|(&url, _)| url)
            .collect();

        let (kept, kept_membership) = filter_community(&graph, &membership, id as i64).unwrap();
        assert_eq!(kept.labels(), expected);
        assert!(kept_membership.assignments().iter().all(|&label| label == 0));
    }

    #[test]
    fn test_filter_community_unknown_id_is_an_error() {
        let graph = dumbbell();
        let membership = detect(&graph, CommunityAlgorithm::LabelPropagation, 2000);
        let err = filter_community(&graph, &membership, 999).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyCommunity(999)));
    }
}
