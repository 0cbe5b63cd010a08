use conv::ValueFrom;
use ordered_float::OrderedFloat;

use crate::{
    error::{MTreeError, Result},
    metric::{Euclidean, Metric},
    node::{Node, NodeKind},
    point::Point,
};

/// A dynamic M-tree: points are kept in leaves, every node carries the
/// centroid and covering radius of its subtree, and range queries prune
/// subtrees whose covering ball cannot intersect the query ball.
pub struct MTree<T, M = Euclidean> {
    max_node_size: usize,
    dimension: Option<usize>,
    root: usize,
    nodes: Vec<Node<T>>,
    num_points: usize,
    metric: M,
}

impl<T> MTree<T> {
    pub fn new(max_node_size: usize) -> Result<Self> {
        Self::with_metric(max_node_size, Euclidean)
    }
}

impl<T, M: Metric> MTree<T, M> {
    pub fn with_metric(max_node_size: usize, metric: M) -> Result<Self> {
        if max_node_size < 1 {
            return Err(MTreeError::InvalidNodeSize(max_node_size));
        }
        let mut tree = MTree {
            max_node_size,
            dimension: None,
            root: 0,
            nodes: Vec::new(),
            num_points: 0,
            metric,
        };
        tree.root = tree.add_node(Node::leaf(Vec::new()));
        Ok(tree)
    }

    /// Inserts a point. The first insertion fixes the tree's dimension;
    /// later vectors of a different length are rejected before any state
    /// is touched. Duplicate coordinates are stored independently.
    pub fn insert(&mut self, point: Point<T>) -> Result<()> {
        match self.dimension {
            Some(dimension) if point.coords.len() != dimension => {
                return Err(MTreeError::DimensionMismatch {
                    expected: dimension,
                    actual: point.coords.len(),
                });
            }
            Some(_) => {}
            None => self.dimension = Some(point.coords.len()),
        }

        self.insert_recursive(self.root, point);
        self.num_points += 1;
        Ok(())
    }

    /// Returns every stored point within `radius` of `center`, in no
    /// particular order. Read-only; a tree with no insertions yet has no
    /// established dimension and matches nothing.
    pub fn search(&self, center: &[f64], radius: f64) -> Result<Vec<&Point<T>>> {
        let dimension = match self.dimension {
            Some(dimension) => dimension,
            None => return Ok(Vec::new()),
        };
        if center.len() != dimension {
            return Err(MTreeError::DimensionMismatch {
                expected: dimension,
                actual: center.len(),
            });
        }

        let mut result = Vec::new();
        self.search_recursive(self.root, center, radius, &mut result);
        Ok(result)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.num_points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn insert_recursive(&mut self, node_id: usize, point: Point<T>) {
        match &mut self.nodes[node_id].kind {
            NodeKind::Internal(children) => {
                let children = children.clone();
                let child = self.nearest_child(&children, &point.coords);
                self.insert_recursive(child, point);
            }
            NodeKind::Leaf(entries) => {
                entries.push(point);
                if entries.len() > self.max_node_size {
                    self.split(node_id);
                }
            }
        }
        // Reshaping on the unwind keeps every ancestor's centroid and
        // covering radius exact, not just the touched leaf's.
        self.reshape(node_id);
    }

    fn nearest_child(&self, children: &[usize], coords: &[f64]) -> usize {
        let mut best_distance = f64::INFINITY;
        let mut best_child = children[0];
        for &child_id in children {
            let distance = self.metric.distance(&self.nodes[child_id].centroid, coords);
            if distance < best_distance {
                best_distance = distance;
                best_child = child_id;
            }
        }
        best_child
    }

    // Sort the overflowing leaf's entries by their first coordinate, bisect
    // at the midpoint, and convert the leaf in place into an internal node
    // over the two halves. The conversion occupies the same child slot in
    // its parent, so splits never cascade.
    fn split(&mut self, node_id: usize) {
        let mut entries = match &mut self.nodes[node_id].kind {
            NodeKind::Leaf(entries) => std::mem::take(entries),
            NodeKind::Internal(_) => unreachable!("split is only triggered on leaves"),
        };

        // Zero-dimensional points all sort equal.
        entries.sort_by_key(|entry| OrderedFloat(entry.coords.first().copied().unwrap_or(0.0)));
        let right = entries.split_off(entries.len() / 2);

        let left_id = self.add_node(Node::leaf(entries));
        let right_id = self.add_node(Node::leaf(right));
        self.reshape(left_id);
        self.reshape(right_id);

        self.nodes[node_id].kind = NodeKind::Internal(vec![left_id, right_id]);
        self.reshape(node_id);
    }

    fn reshape(&mut self, node_id: usize) {
        let centroid = self.calculate_centroid(node_id);
        let mut radius: f64 = 0.0;
        let mut weight = 0;
        match &self.nodes[node_id].kind {
            NodeKind::Leaf(entries) => {
                for entry in entries {
                    radius = radius.max(self.metric.distance(&centroid, &entry.coords));
                }
                weight = entries.len();
            }
            NodeKind::Internal(children) => {
                for &child_id in children {
                    let child = &self.nodes[child_id];
                    radius = radius
                        .max(self.metric.distance(&centroid, &child.centroid) + child.radius);
                    weight += child.weight;
                }
            }
        }
        let node = &mut self.nodes[node_id];
        node.centroid = centroid;
        node.radius = radius;
        node.weight = weight;
    }

    fn calculate_centroid(&self, node_id: usize) -> Vec<f64> {
        match &self.nodes[node_id].kind {
            NodeKind::Leaf(entries) => {
                let mut centroid = vec![0.0; entries[0].coords.len()];
                for entry in entries {
                    for (dim, x) in centroid.iter_mut().zip(&entry.coords) {
                        *dim += x;
                    }
                }
                let count = f64::value_from(entries.len()).unwrap();
                for dim in &mut centroid {
                    *dim /= count;
                }
                centroid
            }
            NodeKind::Internal(children) => {
                // Weighted by subtree point counts, so the centroid is the
                // exact mean of every point below this node.
                let mut centroid = vec![0.0; self.nodes[children[0]].centroid.len()];
                let mut weight = 0;
                for &child_id in children {
                    let child = &self.nodes[child_id];
                    for (dim, x) in centroid.iter_mut().zip(&child.centroid) {
                        *dim += x * f64::value_from(child.weight).unwrap();
                    }
                    weight += child.weight;
                }
                let weight = f64::value_from(weight).unwrap();
                for dim in &mut centroid {
                    *dim /= weight;
                }
                centroid
            }
        }
    }

    fn search_recursive<'a>(
        &'a self,
        node_id: usize,
        center: &[f64],
        radius: f64,
        result: &mut Vec<&'a Point<T>>,
    ) {
        let node = &self.nodes[node_id];
        match &node.kind {
            NodeKind::Leaf(entries) => {
                for entry in entries {
                    if self.metric.distance(&entry.coords, center) <= radius {
                        debug_assert!(
                            self.metric.distance(&node.centroid, &entry.coords) <= node.radius,
                            "stale covering radius at a leaf hit"
                        );
                        result.push(entry);
                    }
                }
            }
            NodeKind::Internal(children) => {
                for &child_id in children {
                    if self.min_distance(child_id, center) <= radius {
                        self.search_recursive(child_id, center, radius, result);
                    }
                }
            }
        }
    }

    // Lower bound on the distance from `point` to anything in the node's
    // subtree; the branch-and-bound pruning test.
    fn min_distance(&self, node_id: usize, point: &[f64]) -> f64 {
        let node = &self.nodes[node_id];
        (self.metric.distance(&node.centroid, point) - node.radius).max(0.0)
    }

    fn height_of(&self, node_id: usize) -> usize {
        match &self.nodes[node_id].kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Internal(children) => {
                1 + children
                    .iter()
                    .map(|&child_id| self.height_of(child_id))
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    fn add_node(&mut self, node: Node<T>) -> usize {
        let node_id = self.nodes.len();
        self.nodes.push(node);
        node_id
    }
}

impl<T> Default for MTree<T> {
    fn default() -> Self {
        MTree::new(4).expect("Invalid node size")
    }
}
