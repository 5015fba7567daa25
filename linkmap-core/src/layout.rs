//! Force-directed 2-D layout (Fruchterman & Reingold 1991).

use crate::graph::LinkGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Iteration count used when the caller has no preference.
pub const DEFAULT_ITERATIONS: usize = 100;

/// A vertex position on the unit canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Compute a force-directed layout for the graph.
///
/// Edge direction is ignored. Positions are seeded from the rng and
/// recomputed in full on every call; nothing is cached. Returns one
/// point per vertex, in vertex-index order.
pub fn fruchterman_reingold(graph: &LinkGraph, seed: u64, iterations: usize) -> Vec<Point> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions: Vec<Point> = (0..n)
        .map(|_| Point {
            x: rng.gen_range(-0.5..0.5),
            y: rng.gen_range(-0.5..0.5),
        })
        .collect();
    if n == 1 {
        return positions;
    }

    let edges = graph.edge_endpoints();
    // Ideal pairwise distance for a unit-area canvas.
    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1_f64;
    let step = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut displacement = vec![(0.0_f64, 0.0_f64); n];

        // Repulsion between every vertex pair.
        for v in 0..n {
            for u in (v + 1)..n {
                let dx = positions[v].x - positions[u].x;
                let dy = positions[v].y - positions[u].y;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = k * k / dist;
                displacement[v].0 += dx / dist * force;
                displacement[v].1 += dy / dist * force;
                displacement[u].0 -= dx / dist * force;
                displacement[u].1 -= dy / dist * force;
            }
        }

        // Attraction along edges.
        for &(a, b) in &edges {
            if a == b {
                continue;
            }
            let dx = positions[a].x - positions[b].x;
            let dy = positions[a].y - positions[b].y;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let force = dist * dist / k;
            displacement[a].0 -= dx / dist * force;
            displacement[a].1 -= dy / dist * force;
            displacement[b].0 += dx / dist * force;
            displacement[b].1 += dy / dist * force;
        }

        // Move, capped by the cooling temperature.
        for v in 0..n {
            let (dx, dy) = displacement[v];
            let length = (dx * dx + dy * dy).sqrt().max(1e-9);
            let capped = length.min(temperature);
            positions[v].x += dx / length * capped;
            positions[v].y += dy / length * capped;
        }
        temperature = (temperature - step).max(1e-3);
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgelist::Edge;

    fn path_graph() -> LinkGraph {
        let edges = vec![
            Edge::new("a", "b"),
            Edge::new("b", "c"),
            Edge::new("c", "d"),
        ];
        LinkGraph::from_edges(&edges).unwrap()
    }

    #[test]
    fn test_one_point_per_vertex() {
        let graph = path_graph();
        let points = fruchterman_reingold(&graph, 2000, 50);
        assert_eq!(points.len(), graph.node_count());
        assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let graph = path_graph();
        let first = fruchterman_reingold(&graph, 7, DEFAULT_ITERATIONS);
        let second = fruchterman_reingold(&graph, 7, DEFAULT_ITERATIONS);
        assert_eq!(first, second);
    }

    #[test]
    fn test_adjacent_vertices_sit_closer_than_distant_ones() {
        let graph = path_graph();
        let points = fruchterman_reingold(&graph, 2000, DEFAULT_ITERATIONS);
        let labels = graph.labels();
        let of = |name: &str| points[labels.iter().position(|&l| l == name).unwrap()];
        let dist = |p: Point, q: Point| ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt();

        // Endpoints of the path should end up further apart than
        // neighbouring vertices.
        assert!(dist(of("a"), of("d")) > dist(of("a"), of("b")));
    }
}
