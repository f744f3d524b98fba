//! Skeleton graph construction and simplification.
//!
//! [`build_graph`] lifts a thinned [`SkeletonMask`] into an undirected
//! graph: one node per skeleton pixel (positioned at the pixel center,
//! weighted by the normalized distance-field value), one edge per
//! 8-adjacent pixel pair. The graph is then simplified branch by branch:
//! runs of collinear, similarly-weighted nodes collapse into single
//! edges, one-pixel stubs are discarded, and branching points fan out
//! into independently-processed sub-branches.
//!
//! A root whose pixel has more than one neighbor gets a sentinel node
//! placed one pixel above it so that traversal always starts from a
//! degree-1 node; [`SkeletonGraph::strip_sentinels`] removes them once
//! the caller no longer needs the traversal entry points.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

use crate::distance::DistanceField;
use crate::thin::{SkeletonMask, encode_neighborhood};
use crate::types::{PipelineError, Point, SkeletonConfig};

/// Number of branch pixels traversed before the angle and weight
/// constraints engage, giving the direction estimate time to settle.
const DIRECTION_WARMUP: usize = 3;

/// Neighbor offsets matching the [`encode_neighborhood`] bit order.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
];

/// A node of the skeleton graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonNode {
    /// Position at the source pixel's center: `(x + 0.5, y + 0.5)`.
    pub position: Point,
    /// Stroke half-width at this pixel, in pixel units (the normalized
    /// distance-field value).
    pub weight: f64,
}

/// Parameters for [`build_graph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphParams {
    /// Maximum angular deviation (radians) tolerated while collapsing a
    /// branch.
    pub branch_angle: f64,
    /// Maximum ratio between the larger and smaller node weight along a
    /// collapsing branch, in `[1.0, +inf)`.
    pub weight_ratio: f64,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            branch_angle: SkeletonConfig::DEFAULT_BRANCH_ANGLE,
            weight_ratio: SkeletonConfig::DEFAULT_WEIGHT_RATIO,
        }
    }
}

/// The simplified skeleton graph of an image.
#[derive(Debug, Clone)]
pub struct SkeletonGraph {
    graph: StableUnGraph<SkeletonNode, ()>,
    roots: Vec<NodeIndex>,
    sentinels: Vec<(NodeIndex, NodeIndex)>,
    positions: HashMap<(u32, u32), NodeIndex>,
}

impl SkeletonGraph {
    /// Number of nodes, sentinels included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// One traversal entry point per connected component, in image scan
    /// order. Entries are sentinel nodes where the component's seed pixel
    /// had more than one neighbor.
    #[must_use]
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// The node payload for `index`, if the node still exists.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&SkeletonNode> {
        self.graph.node_weight(index)
    }

    /// The surviving node built from the skeleton pixel at `(x, y)`.
    #[must_use]
    pub fn node_at(&self, x: u32, y: u32) -> Option<NodeIndex> {
        self.positions.get(&(x, y)).copied()
    }

    /// Number of edges incident to `index`.
    #[must_use]
    pub fn degree(&self, index: NodeIndex) -> usize {
        self.graph.neighbors(index).count()
    }

    /// Neighbors of `index`.
    pub fn neighbors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(index)
    }

    /// All surviving nodes with their indices.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &SkeletonNode)> {
        self.graph
            .node_indices()
            .filter_map(|i| self.graph.node_weight(i).map(|n| (i, n)))
    }

    /// All edges as endpoint pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
    }

    /// The underlying petgraph structure.
    #[must_use]
    pub const fn inner(&self) -> &StableUnGraph<SkeletonNode, ()> {
        &self.graph
    }

    /// Remove the sentinel nodes and point each affected root back at the
    /// component's original seed node.
    ///
    /// Sentinels exist only to give branch traversal a degree-1 starting
    /// point; callers consuming the graph as geometry should strip them.
    pub fn strip_sentinels(&mut self) {
        for (sentinel, original) in self.sentinels.drain(..) {
            self.graph.remove_node(sentinel);
            for root in &mut self.roots {
                if *root == sentinel {
                    *root = original;
                }
            }
        }
    }
}

/// Build and simplify the skeleton graph of `skeleton`.
///
/// Node weights come from `distance`: the scaled field value divided by
/// its coefficient, i.e. the stroke half-width in pixel units. Isolated
/// skeleton pixels (no 8-neighbors) produce no node at all.
///
/// # Errors
///
/// Returns [`PipelineError::DimensionMismatch`] when `skeleton` and
/// `distance` disagree on dimensions, and
/// [`PipelineError::InvalidConfig`] when `params.weight_ratio < 1.0`
/// (the compared ratio is always at least 1, so a smaller threshold
/// would reject every edge).
pub fn build_graph(
    skeleton: &SkeletonMask,
    distance: &DistanceField,
    params: &GraphParams,
) -> Result<SkeletonGraph, PipelineError> {
    if params.weight_ratio < 1.0 {
        return Err(PipelineError::InvalidConfig(format!(
            "weight_ratio ({}) must be at least 1.0",
            params.weight_ratio,
        )));
    }
    if skeleton.dimensions() != distance.dimensions() {
        return Err(PipelineError::dimension_mismatch(
            skeleton.dimensions(),
            distance.dimensions(),
        ));
    }

    let w = skeleton.width() as usize;
    let h = skeleton.height() as usize;
    let mut data = skeleton.data().to_vec();

    let mut graph = StableUnGraph::<SkeletonNode, ()>::with_capacity(0, 0);
    let mut positions: HashMap<(u32, u32), NodeIndex> = HashMap::new();
    let mut roots: Vec<NodeIndex> = Vec::new();

    // Component discovery in scan order. Pixels with no neighbors are
    // wiped rather than turned into nodes; every other unvisited pixel
    // seeds a flood fill that nodes and links its whole component.
    for k in 0..data.len() {
        if data[k] & 1 == 0 {
            continue;
        }
        if encode_neighborhood(&data, w, h, k) == 0 {
            data[k] = 0;
            continue;
        }
        let key = pixel_key(k, w);
        if positions.contains_key(&key) {
            continue;
        }
        let root = add_pixel_node(&mut graph, &mut positions, distance, key);
        roots.push(root);
        flood_component(&mut graph, &mut positions, distance, &data, w, h, k);
    }

    // A root with several neighbors gets a sentinel one pixel above it so
    // that every traversal starts from a degree-1 node.
    let mut sentinels: Vec<(NodeIndex, NodeIndex)> = Vec::new();
    for root in &mut roots {
        let original = *root;
        if graph.neighbors(original).count() > 1 {
            let node = graph[original];
            let sentinel = graph.add_node(SkeletonNode {
                position: Point::new(node.position.x, node.position.y - 1.0),
                weight: node.weight,
            });
            graph.add_edge(sentinel, original, ());
            sentinels.push((sentinel, original));
            *root = sentinel;
        }
    }

    let mut simplifier = Simplifier {
        graph: &mut graph,
        branch_angle: params.branch_angle,
        weight_ratio: params.weight_ratio,
        processed: HashSet::new(),
        work: Vec::new(),
    };
    for &root in &roots {
        simplifier.run(root);
    }

    // Collapsed-away nodes keep their slot in the graph until now; drop
    // everything that ended up unconnected, except the roots themselves
    // (a fully-discarded component still reports its root).
    let keep: HashSet<NodeIndex> = roots
        .iter()
        .copied()
        .chain(sentinels.iter().map(|&(_, original)| original))
        .collect();
    let orphans: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|&n| graph.neighbors(n).next().is_none() && !keep.contains(&n))
        .collect();
    for n in orphans {
        graph.remove_node(n);
    }
    positions.retain(|_, index| graph.node_weight(*index).is_some());

    Ok(SkeletonGraph {
        graph,
        roots,
        sentinels,
        positions,
    })
}

const fn pixel_key(k: usize, w: usize) -> (u32, u32) {
    ((k % w) as u32, (k / w) as u32)
}

fn add_pixel_node(
    graph: &mut StableUnGraph<SkeletonNode, ()>,
    positions: &mut HashMap<(u32, u32), NodeIndex>,
    distance: &DistanceField,
    key: (u32, u32),
) -> NodeIndex {
    let index = graph.add_node(SkeletonNode {
        position: Point::new(f64::from(key.0) + 0.5, f64::from(key.1) + 0.5),
        weight: distance.normalized(key.0, key.1),
    });
    positions.insert(key, index);
    index
}

/// Flood fill one component with an explicit stack, creating nodes and
/// linking every 8-adjacent pixel pair exactly once.
fn flood_component(
    graph: &mut StableUnGraph<SkeletonNode, ()>,
    positions: &mut HashMap<(u32, u32), NodeIndex>,
    distance: &DistanceField,
    data: &[u8],
    w: usize,
    h: usize,
    seed: usize,
) {
    let mut stack = vec![seed];
    while let Some(k) = stack.pop() {
        let key = pixel_key(k, w);
        let Some(&here) = positions.get(&key) else {
            continue;
        };
        let bits = encode_neighborhood(data, w, h, k);
        for (bit, &(dx, dy)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            if bits & (1 << bit) == 0 {
                continue;
            }
            let nx = (i64::from(key.0) + dx) as u32;
            let ny = (i64::from(key.1) + dy) as u32;
            let there = match positions.get(&(nx, ny)) {
                Some(&existing) => existing,
                None => {
                    let created = add_pixel_node(graph, positions, distance, (nx, ny));
                    stack.push(ny as usize * w + nx as usize);
                    created
                }
            };
            if graph.find_edge(here, there).is_none() {
                graph.add_edge(here, there, ());
            }
        }
    }
}

/// Angle of `(x, y)` with respect to the positive x axis, in `[0, 2π)`.
fn polar_angle(x: f64, y: f64) -> f64 {
    let angle = y.atan2(x);
    if angle < 0.0 {
        angle + 2.0 * std::f64::consts::PI
    } else {
        angle
    }
}

/// Branch-by-branch simplification state for one component traversal.
struct Simplifier<'a> {
    graph: &'a mut StableUnGraph<SkeletonNode, ()>,
    branch_angle: f64,
    weight_ratio: f64,
    processed: HashSet<NodeIndex>,
    work: Vec<(NodeIndex, NodeIndex)>,
}

impl Simplifier<'_> {
    fn run(&mut self, root: NodeIndex) {
        self.processed.clear();
        self.work.clear();
        self.processed.insert(root);
        if let Some(first) = self.ordered_neighbors(root).into_iter().next() {
            self.work.push((root, first));
        }
        while let Some((branch_root, next)) = self.work.pop() {
            self.process_branch(branch_root, next);
        }
    }

    fn degree(&self, n: NodeIndex) -> usize {
        self.graph.neighbors(n).count()
    }

    /// Neighbors in edge-insertion order (petgraph iterates newest
    /// first).
    fn ordered_neighbors(&self, n: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(n).collect();
        neighbors.reverse();
        neighbors
    }

    fn link(&mut self, a: NodeIndex, b: NodeIndex) {
        if a != b && self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, ());
        }
    }

    fn unlink(&mut self, a: NodeIndex, b: NodeIndex) {
        if let Some(edge) = self.graph.find_edge(a, b) {
            self.graph.remove_edge(edge);
        }
    }

    fn position(&self, n: NodeIndex) -> Point {
        self.graph[n].position
    }

    fn weight(&self, n: NodeIndex) -> f64 {
        self.graph[n].weight
    }

    /// Walk one branch starting at `root` in the direction of `next`,
    /// collapsing straight runs and scheduling follow-up branches.
    fn process_branch(&mut self, root: NodeIndex, next: NodeIndex) {
        let mut curr = next;
        let mut dir_x = 0.0f64;
        let mut dir_y = 0.0f64;
        let mut angle_ok = true;
        let mut weight_ok = true;
        let mut suspect: Option<NodeIndex> = None;
        let mut count = 0usize;
        let mut curr_degree = self.degree(curr);

        // Straight-run collapse. `curr` always has `root` as one of its
        // two neighbors here (the previous iteration relinked them), so
        // the other neighbor is the branch continuation.
        while curr_degree == 2 && angle_ok && weight_ok && !self.processed.contains(&curr) {
            let s = curr;
            let Some(forward) = self.graph.neighbors(s).find(|&n| n != root) else {
                break;
            };
            suspect = Some(s);
            curr = forward;

            // The direction estimate averages the first few positions so
            // that pixel-lattice jitter does not dominate the angle test.
            let pos = self.position(curr);
            if count < DIRECTION_WARMUP {
                dir_x += pos.x;
                dir_y += pos.y;
            }
            if count == DIRECTION_WARMUP - 1 {
                let warmup = DIRECTION_WARMUP as f64;
                let origin = self.position(root);
                dir_x = warmup.mul_add(-origin.x, dir_x) / warmup;
                dir_y = warmup.mul_add(-origin.y, dir_y) / warmup;
            }
            count += 1;

            let origin = self.position(root);
            let deviation =
                polar_angle(pos.x - origin.x, pos.y - origin.y) - polar_angle(dir_x, dir_y);
            if !(deviation.abs() < self.branch_angle || count < DIRECTION_WARMUP) {
                angle_ok = false;
            }
            if count >= DIRECTION_WARMUP {
                let mut ratio = self.weight(root) / self.weight(curr);
                if ratio < 1.0 {
                    ratio = 1.0 / ratio;
                }
                if ratio > self.weight_ratio {
                    weight_ok = false;
                }
            }

            if angle_ok && weight_ok {
                self.unlink(root, s);
                self.unlink(curr, s);
                self.link(root, curr);
            }
            self.processed.insert(s);
            curr_degree = self.degree(curr);
        }

        // Reaching a processed node means this branch merged into one
        // that was already walked; nothing left to do.
        if self.processed.contains(&curr) {
            return;
        }

        if curr_degree == 1 {
            // Branch end. A tip that broke the constraints is discarded
            // rather than kept as its own two-node branch, and a branch
            // of a single pixel is dropped entirely.
            if !angle_ok || !weight_ok {
                if let Some(s) = suspect {
                    self.unlink(s, curr);
                }
            }
            if count == 0 {
                self.unlink(root, curr);
            }
            self.processed.insert(curr);
        } else if curr_degree == 2 {
            // Still a plain line, but the constraints broke: the last
            // kept node becomes the root of a fresh branch.
            if let Some(s) = suspect {
                self.work.push((s, curr));
                self.processed.insert(s);
            }
        } else {
            self.branch_out(root, curr, suspect);
        }
    }

    /// Handle a branching point: absorb the incoming run, split the
    /// outgoing directions apart, and schedule each as its own branch.
    fn branch_out(&mut self, root: NodeIndex, curr: NodeIndex, suspect: Option<NodeIndex>) {
        let nexts: Vec<NodeIndex> = self
            .ordered_neighbors(curr)
            .into_iter()
            .filter(|&n| Some(n) != suspect && n != root)
            .collect();

        // The suspect collapses into the branching point even when it was
        // failing the constraints.
        if let Some(s) = suspect {
            self.unlink(root, s);
            self.unlink(curr, s);
            self.link(root, curr);
        }
        self.processed.insert(curr);

        // Outgoing directions must not stay cross-linked, or each would
        // be walked as part of the other. Collect their remaining
        // neighbors (second-degree relative to `curr`) along the way.
        let mut second_degree: Vec<NodeIndex> = Vec::new();
        for (i, &a) in nexts.iter().enumerate() {
            for &b in &nexts[i + 1..] {
                self.unlink(a, b);
            }
            for n in self.ordered_neighbors(a) {
                if !second_degree.contains(&n) {
                    second_degree.push(n);
                }
            }
        }
        second_degree.retain(|&n| n != curr);

        // A second-degree node touching several outgoing directions would
        // be claimed by each of them; keep only the adjacent (distance
        // <= 1) links.
        for n in second_degree {
            let touching = nexts
                .iter()
                .filter(|&&x| self.graph.find_edge(n, x).is_some())
                .count();
            if touching > 1 {
                for &x in &nexts {
                    if self.graph.find_edge(n, x).is_some()
                        && self.position(n).distance(self.position(x)) > 1.0
                    {
                        self.unlink(n, x);
                    }
                }
            }
        }

        // LIFO stack: push in reverse so branches run in neighbor order.
        for &n in nexts.iter().rev() {
            self.work.push((curr, n));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::grid::PixelGrid;

    /// Build a skeleton mask and matching distance field from ASCII art.
    /// Letters a-z mark skeleton pixels with weight 1-26 (distance value
    /// = weight * 3); `#` is shorthand for weight 1.
    fn fixtures(rows: &[&str]) -> (SkeletonMask, DistanceField) {
        let height = u32::try_from(rows.len()).unwrap();
        let width = u32::try_from(rows[0].len()).unwrap();
        let mut mask = vec![0u8; (width * height) as usize];
        let mut dist = vec![0u32; (width * height) as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let k = y * width as usize + x;
                let weight = match c {
                    '#' => 1,
                    'a'..='z' => u32::from(c) - u32::from('a') + 1,
                    _ => continue,
                };
                mask[k] = 1;
                dist[k] = weight * 3;
            }
        }
        let mask = SkeletonMask::from_grid(
            PixelGrid::from_raw(width, height, mask).unwrap(),
            0,
        );
        let dist = DistanceField::from_grid(
            PixelGrid::from_raw(width, height, dist).unwrap(),
            3,
        );
        (mask, dist)
    }

    fn build(rows: &[&str]) -> SkeletonGraph {
        let (mask, dist) = fixtures(rows);
        build_graph(&mask, &dist, &GraphParams::default()).unwrap()
    }

    #[test]
    fn weight_ratio_below_one_is_rejected() {
        let (mask, dist) = fixtures(&["###"]);
        let params = GraphParams {
            weight_ratio: 0.5,
            ..GraphParams::default()
        };
        assert!(matches!(
            build_graph(&mask, &dist, &params),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let (mask, _) = fixtures(&["####"]);
        let (_, dist) = fixtures(&["###"]);
        assert!(matches!(
            build_graph(&mask, &dist, &GraphParams::default()),
            Err(PipelineError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_mask_gives_empty_graph() {
        let graph = build(&["....", "....", "...."]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.roots().is_empty());
    }

    #[test]
    fn straight_line_collapses_to_its_endpoints() {
        let graph = build(&[
            "..............",
            "..............",
            "..#########...",
            "..............",
            "..............",
        ]);
        assert_eq!(graph.roots().len(), 1);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        let start = graph.node_at(2, 2).unwrap();
        let end = graph.node_at(10, 2).unwrap();
        assert_eq!(graph.roots()[0], start);
        assert_eq!(graph.degree(start), 1);
        assert_eq!(graph.neighbors(start).next(), Some(end));

        let node = graph.node(start).unwrap();
        assert!((node.position.x - 2.5).abs() < f64::EPSILON);
        assert!((node.position.y - 2.5).abs() < f64::EPSILON);
        assert!((node.weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn l_shape_keeps_the_corner_and_drops_the_stub() {
        // Horizontal run (2,2)..(11,2) meeting a vertical run
        // (11,3)..(11,11). The corner pixel (11,2) forms a triangle with
        // (10,2) and (11,3) and survives only as a discarded stub; the
        // vertical run hangs off (10,2) within the angle tolerance.
        let mut rows = vec!["............", "............", "..##########"];
        rows.extend(std::iter::repeat_n("...........#", 9));
        let graph = build(&rows);

        assert_eq!(graph.roots().len(), 1);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.node_at(11, 2).is_none(), "corner stub should be gone");

        let start = graph.node_at(2, 2).unwrap();
        let junction = graph.node_at(10, 2).unwrap();
        let end = graph.node_at(11, 11).unwrap();
        assert_eq!(graph.degree(start), 1);
        assert_eq!(graph.degree(junction), 2);
        assert_eq!(graph.degree(end), 1);
        let mut junction_neighbors: Vec<NodeIndex> = graph.neighbors(junction).collect();
        junction_neighbors.sort();
        let mut expected = vec![start, end];
        expected.sort();
        assert_eq!(junction_neighbors, expected);
    }

    #[test]
    fn weight_step_splits_the_branch() {
        // Uniform weight 1 up to x=11, then weight 2: the 1.25 ratio cap
        // breaks the collapse at the step, keeping the boundary nodes.
        let graph = build(&[
            ".........................",
            ".........................",
            "..aaaaaaaaaabbbbbbbbbbb..",
            ".........................",
        ]);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);

        let a = graph.node_at(2, 2).unwrap();
        let b = graph.node_at(11, 2).unwrap();
        let c = graph.node_at(14, 2).unwrap();
        let d = graph.node_at(22, 2).unwrap();
        assert_eq!(graph.degree(a), 1);
        assert_eq!(graph.degree(b), 2);
        assert_eq!(graph.degree(c), 2);
        assert_eq!(graph.degree(d), 1);
        assert!(graph.inner().find_edge(a, b).is_some());
        assert!(graph.inner().find_edge(b, c).is_some());
        assert!(graph.inner().find_edge(c, d).is_some());
    }

    #[test]
    fn multi_neighbor_root_gets_a_sentinel() {
        // The seed pixel (1,0) has two diagonal neighbors, so traversal
        // starts from a sentinel placed one pixel above it.
        let mut graph = build(&[".#.", "#.#"]);
        assert_eq!(graph.roots().len(), 1);

        let root = graph.roots()[0];
        let sentinel = graph.node(root).unwrap();
        assert!((sentinel.position.x - 1.5).abs() < f64::EPSILON);
        assert!((sentinel.position.y - (-0.5)).abs() < f64::EPSILON);

        let before = graph.node_count();
        graph.strip_sentinels();
        assert_eq!(graph.node_count(), before - 1);
        let restored = graph.roots()[0];
        assert_eq!(graph.node_at(1, 0), Some(restored));
    }

    #[test]
    fn isolated_pixels_produce_no_nodes() {
        // The lone pixel at (1,0) is wiped; the two-pixel pair keeps its
        // seed as a root but the one-pixel branch is discarded.
        let graph = build(&[".#...##.", "........"]);
        assert_eq!(graph.roots().len(), 1);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.node_at(1, 0).is_none());
        assert_eq!(graph.node_at(5, 0), Some(graph.roots()[0]));
    }

    #[test]
    fn separate_components_get_separate_roots() {
        let graph = build(&[
            "...................",
            "..#####............",
            "...................",
            "..........#####....",
            "...................",
        ]);
        assert_eq!(graph.roots().len(), 2);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn node_weights_follow_the_distance_field() {
        let graph = build(&["....", ".cc.", "...."]);
        // Two pixels of weight 3 (value 9 / coeff 3).
        let root = graph.roots()[0];
        assert!((graph.node(root).unwrap().weight - 3.0).abs() < f64::EPSILON);
    }
}
