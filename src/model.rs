//! In-memory category tree: the host-side hierarchy behind the list.
//!
//! The tree is an arena of nodes built from a snapshot document. Leaves own
//! their row and marked counts; internal nodes carry the sums over their
//! leaves, recomputed after every marking transaction.

use serde::{Deserialize, Serialize};

use crate::error::ListError;
use crate::traits::{DataView, Hierarchy, HierarchyNode, Labeled, MarkCommand, Markable, MarkingMode, NodeId};

/// One node of a snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotNode {
    pub label: Option<String>,
    pub rows: usize,
    pub marked: usize,
    pub value: Option<f64>,
    pub children: Vec<SnapshotNode>,
}

/// Serialized form of a data delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Names of the hierarchy levels, outermost first
    pub levels: Vec<String>,
    /// Errors the host reports for this delivery
    pub errors: Vec<String>,
    pub root: SnapshotNode,
}

#[derive(Debug, Clone)]
struct TreeNode {
    label: Option<String>,
    value: Option<f64>,
    children: Vec<usize>,
    rows: usize,
    marked: usize,
}

/// Arena-backed category hierarchy implementing the host traits.
#[derive(Debug, Clone)]
pub struct CategoryTree {
    nodes: Vec<TreeNode>,
    levels: Vec<String>,
    errors: Vec<String>,
    generation: u64,
    has_sort_dimension: bool,
}

impl CategoryTree {
    /// Builds a tree from a snapshot document. Node 0 is the root.
    ///
    /// # Errors
    /// Returns `ListError::Snapshot` if the hierarchy is deeper than the declared levels.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, ListError> {
        let mut nodes = Vec::new();
        let depth = push_node(&mut nodes, &snapshot.root);

        if !snapshot.levels.is_empty() && depth > snapshot.levels.len() {
            return Err(ListError::Snapshot(format!(
                "hierarchy has {} levels but only {} are declared",
                depth,
                snapshot.levels.len()
            )));
        }

        let has_sort_dimension = nodes.iter().any(|n| n.children.is_empty() && n.value.is_some());
        let levels = if snapshot.levels.is_empty() {
            (0..depth).map(|i| format!("Level {}", i + 1)).collect()
        } else {
            snapshot.levels.clone()
        };

        let mut tree = Self {
            nodes,
            levels,
            errors: snapshot.errors.clone(),
            generation: 0,
            has_sort_dimension,
        };
        tree.recompute_counts();

        tracing::info!(
            "built category tree: {} nodes, {} levels, {} rows",
            tree.node_count(),
            tree.levels.len(),
            DataView::row_count(&tree)
        );
        Ok(tree)
    }

    /// Converts the tree back into a snapshot document, including current marks.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            levels: self.levels.clone(),
            errors: self.errors.clone(),
            root: self.snapshot_node(0),
        }
    }

    /// Sets the generation this tree is delivered for.
    pub fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    /// Returns the total node count, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn level_names(&self) -> &[String] {
        &self.levels
    }

    /// Returns the total number of marked data rows.
    pub fn marked_rows(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.marked)
    }

    /// Returns a node handle by ID.
    pub fn node(&self, id: NodeId) -> Option<CategoryNodeRef<'_>> {
        let index = usize::try_from(id).ok()?;
        (index < self.nodes.len()).then_some(CategoryNodeRef { tree: self, index })
    }

    fn snapshot_node(&self, index: usize) -> SnapshotNode {
        let node = &self.nodes[index];
        SnapshotNode {
            label: node.label.clone(),
            rows: node.rows,
            marked: node.marked,
            value: node.value,
            children: node.children.iter().map(|&c| self.snapshot_node(c)).collect(),
        }
    }

    /// Indices of all leaves under `index` (the node itself if it is a leaf).
    fn leaves_under(&self, index: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![index];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i];
            if node.children.is_empty() {
                leaves.push(i);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }

    fn set_subtree_marked(&mut self, index: usize, marked: bool) {
        for leaf in self.leaves_under(index) {
            let node = &mut self.nodes[leaf];
            node.marked = if marked { node.rows } else { 0 };
        }
    }

    /// Recomputes internal row and marked counts bottom-up.
    fn recompute_counts(&mut self) {
        // Children always have larger indices than their parent
        for i in (0..self.nodes.len()).rev() {
            if self.nodes[i].children.is_empty() {
                let node = &mut self.nodes[i];
                node.marked = node.marked.min(node.rows);
                continue;
            }
            let (rows, marked) = self.nodes[i]
                .children
                .iter()
                .fold((0, 0), |(r, m), &c| (r + self.nodes[c].rows, m + self.nodes[c].marked));
            self.nodes[i].rows = rows;
            self.nodes[i].marked = marked;
        }
    }
}

/// Appends a snapshot subtree in pre-order and returns its depth below `node`.
fn push_node(nodes: &mut Vec<TreeNode>, node: &SnapshotNode) -> usize {
    let index = nodes.len();
    nodes.push(TreeNode {
        label: node.label.clone(),
        value: node.value,
        children: Vec::with_capacity(node.children.len()),
        rows: node.rows,
        marked: node.marked,
    });

    let mut depth = 0;
    for child in &node.children {
        let child_index = nodes.len();
        nodes[index].children.push(child_index);
        depth = depth.max(1 + push_node(nodes, child));
    }
    depth
}

impl Markable for CategoryTree {
    /// Applies one gesture's commands as a single marking transaction.
    ///
    /// Toggle decisions are taken against the marking as it was before the batch.
    fn mark(&mut self, commands: &[MarkCommand]) {
        let targets: Vec<(usize, MarkingMode, bool)> = commands
            .iter()
            .filter_map(|cmd| {
                let node = self.node(cmd.node)?;
                let fully_marked = node.marked_row_count() == node.row_count();
                Some((node.index, cmd.mode, fully_marked))
            })
            .collect();

        if targets.iter().any(|(_, mode, _)| *mode == MarkingMode::Replace) {
            for node in &mut self.nodes {
                node.marked = 0;
            }
        }

        for &(index, mode, fully_marked) in &targets {
            match mode {
                MarkingMode::Replace => self.set_subtree_marked(index, true),
                MarkingMode::ToggleOrAdd => self.set_subtree_marked(index, !fully_marked),
            }
        }
        self.recompute_counts();

        tracing::debug!(
            "applied {} mark commands, {} rows marked",
            targets.len(),
            self.marked_rows()
        );
    }
}

/// Borrowed handle to one tree node.
#[derive(Debug, Clone, Copy)]
pub struct CategoryNodeRef<'a> {
    tree: &'a CategoryTree,
    index: usize,
}

impl<'a> CategoryNodeRef<'a> {
    fn node(&self) -> &'a TreeNode {
        &self.tree.nodes[self.index]
    }
}

impl<'a> Labeled for CategoryNodeRef<'a> {
    fn formatted_value(&self) -> String {
        self.node().label.clone().unwrap_or_default()
    }

    fn has_value(&self) -> bool {
        self.node().label.as_deref().is_some_and(|l| !l.is_empty())
    }
}

impl<'a> HierarchyNode for CategoryNodeRef<'a> {
    fn id(&self) -> NodeId {
        self.index as NodeId
    }

    fn row_count(&self) -> usize {
        self.node().rows
    }

    fn marked_row_count(&self) -> usize {
        self.node().marked
    }

    fn num_children(&self) -> usize {
        self.node().children.len()
    }

    fn child_at(&self, index: usize) -> Option<Self> {
        let child = *self.node().children.get(index)?;
        Some(CategoryNodeRef { tree: self.tree, index: child })
    }

    fn sort_value(&self) -> Option<f64> {
        self.node().value
    }
}

impl Hierarchy for CategoryTree {
    type Node<'a> = CategoryNodeRef<'a> where Self: 'a;

    fn root(&self) -> Self::Node<'_> {
        CategoryNodeRef { tree: self, index: 0 }
    }

    fn levels(&self) -> usize {
        self.levels.len()
    }

    fn has_sort_dimension(&self) -> bool {
        self.has_sort_dimension
    }
}

impl DataView for CategoryTree {
    fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }

    fn row_count(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.rows)
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str, rows: usize) -> SnapshotNode {
        SnapshotNode { label: Some(label.into()), rows, ..Default::default() }
    }

    fn group(label: &str, children: Vec<SnapshotNode>) -> SnapshotNode {
        SnapshotNode { label: Some(label.into()), children, ..Default::default() }
    }

    /// root(0) -> A(1) -> a1(2), a2(3); B(4) -> b1(5)
    fn sample() -> CategoryTree {
        let snapshot = Snapshot {
            levels: vec!["Group".into(), "Item".into()],
            errors: vec![],
            root: SnapshotNode {
                children: vec![group("A", vec![leaf("a1", 2), leaf("a2", 3)]), group("B", vec![leaf("b1", 4)])],
                ..Default::default()
            },
        };
        CategoryTree::from_snapshot(&snapshot).unwrap()
    }

    fn marked(tree: &CategoryTree, id: NodeId) -> usize {
        tree.node(id).unwrap().marked_row_count()
    }

    #[test]
    fn test_counts_aggregate_over_leaves() {
        let tree = sample();
        assert_eq!(tree.node_count(), 6);
        assert_eq!(DataView::row_count(&tree), 9);
        assert_eq!(tree.node(1).unwrap().row_count(), 5);
        assert_eq!(tree.levels(), 2);
        assert!(!tree.has_sort_dimension());
        assert!(!tree.root().has_value());
    }

    #[test]
    fn test_child_navigation() {
        let tree = sample();
        let a = tree.root().child_at(0).unwrap();
        assert_eq!(a.formatted_value(), "A");
        assert_eq!(a.child_at(1).unwrap().formatted_value(), "a2");
        assert!(a.child_at(2).is_none());
        assert!(a.child_at(0).unwrap().is_leaf());
    }

    #[test]
    fn test_replace_clears_previous_marking() {
        let mut tree = sample();
        tree.mark(&[MarkCommand { node: 4, mode: MarkingMode::Replace }]);
        assert_eq!(tree.marked_rows(), 4);

        tree.mark(&[
            MarkCommand { node: 2, mode: MarkingMode::Replace },
            MarkCommand { node: 3, mode: MarkingMode::Replace },
        ]);
        assert_eq!(tree.marked_rows(), 5);
        assert_eq!(marked(&tree, 1), 5);
        assert_eq!(marked(&tree, 4), 0);
    }

    #[test]
    fn test_toggle_or_add() {
        let mut tree = sample();
        tree.mark(&[MarkCommand { node: 2, mode: MarkingMode::Replace }]);

        // A is partially marked: toggle adds all its rows
        tree.mark(&[MarkCommand { node: 1, mode: MarkingMode::ToggleOrAdd }]);
        assert_eq!(marked(&tree, 1), 5);

        // Now fully marked: toggle removes them, B stays untouched
        tree.mark(&[MarkCommand { node: 5, mode: MarkingMode::ToggleOrAdd }]);
        tree.mark(&[MarkCommand { node: 1, mode: MarkingMode::ToggleOrAdd }]);
        assert_eq!(marked(&tree, 1), 0);
        assert_eq!(marked(&tree, 4), 4);
    }

    #[test]
    fn test_toggle_uses_state_before_batch() {
        let mut tree = sample();
        tree.mark(&[MarkCommand { node: 1, mode: MarkingMode::Replace }]);

        // Parent and child both fully marked before the batch: both unmark
        tree.mark(&[
            MarkCommand { node: 1, mode: MarkingMode::ToggleOrAdd },
            MarkCommand { node: 2, mode: MarkingMode::ToggleOrAdd },
        ]);
        assert_eq!(tree.marked_rows(), 0);
    }

    #[test]
    fn test_unknown_nodes_are_ignored() {
        let mut tree = sample();
        tree.mark(&[MarkCommand { node: 99, mode: MarkingMode::Replace }]);
        assert_eq!(tree.marked_rows(), 0);
    }

    #[test]
    fn test_marked_clamped_and_sort_dimension_detected() {
        let snapshot = Snapshot {
            root: SnapshotNode {
                children: vec![SnapshotNode { label: Some("x".into()), rows: 1, marked: 7, value: Some(2.5), children: vec![] }],
                ..Default::default()
            },
            ..Default::default()
        };
        let tree = CategoryTree::from_snapshot(&snapshot).unwrap();
        assert_eq!(tree.marked_rows(), 1);
        assert!(tree.has_sort_dimension());
        assert_eq!(tree.level_names(), ["Level 1".to_string()]);
    }

    #[test]
    fn test_depth_exceeding_levels_is_rejected() {
        let snapshot = Snapshot {
            levels: vec!["Only".into()],
            root: SnapshotNode { children: vec![group("A", vec![leaf("a", 1)])], ..Default::default() },
            ..Default::default()
        };
        assert!(matches!(CategoryTree::from_snapshot(&snapshot), Err(ListError::Snapshot(_))));
    }

    #[test]
    fn test_to_snapshot_keeps_marks() {
        let mut tree = sample();
        tree.mark(&[MarkCommand { node: 5, mode: MarkingMode::Replace }]);
        let rebuilt = CategoryTree::from_snapshot(&tree.to_snapshot()).unwrap();
        assert_eq!(rebuilt.marked_rows(), 4);
        assert_eq!(marked(&rebuilt, 4), 4);
    }
}
