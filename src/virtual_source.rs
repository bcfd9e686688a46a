use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use crate::model::{CategoryTree, Snapshot, SnapshotNode};
use crate::traits::SnapshotSource;

const DEFAULT_LEVELS: usize = 3;
const DEFAULT_MIN_CHILDREN: usize = 2;
const DEFAULT_MAX_CHILDREN: usize = 6;
const DEFAULT_MAX_ROWS: usize = 12;

const LEVEL_NAMES: &[&str] = &["Region", "Category", "Product", "Variant", "Batch", "Lot"];

const WORDS: &[&str] = &[
    "amber", "apple", "basil", "birch", "cedar", "cherry", "clover", "copper",
    "delta", "ember", "fennel", "garnet", "hazel", "indigo", "juniper", "kiwi",
    "lemon", "maple", "nectar", "olive", "pepper", "quartz", "raven", "saffron",
    "thyme", "umber", "violet", "walnut", "yarrow", "zinnia",
];

/// Seeded generator of synthetic category snapshots.
///
/// The same configuration and seed always produce the same snapshot.
#[derive(Debug, Clone)]
pub struct VirtualSource {
    levels: usize,
    min_children: usize,
    max_children: usize,
    max_rows: usize,
    seed: u64,
    sort_dimension: bool,
}

impl Default for VirtualSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualSource {
    pub fn new() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            min_children: DEFAULT_MIN_CHILDREN,
            max_children: DEFAULT_MAX_CHILDREN,
            max_rows: DEFAULT_MAX_ROWS,
            seed: 42, // Default seed for reproducibility
            sort_dimension: false,
        }
    }

    pub fn with_config(levels: usize, min_children: usize, max_children: usize, max_rows: usize, seed: u64) -> Self {
        Self {
            levels: levels.max(1),
            min_children: min_children.max(1),
            max_children: max_children.max(min_children.max(1)),
            max_rows: max_rows.max(1),
            seed,
            sort_dimension: false,
        }
    }

    /// Attaches a numeric sort value to every leaf.
    pub fn with_sort_dimension(mut self, enabled: bool) -> Self {
        self.sort_dimension = enabled;
        self
    }

    /// Generates the snapshot document.
    pub fn generate(&self) -> Snapshot {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let children = self.generate_children(&mut rng, 0);

        Snapshot {
            levels: (0..self.levels)
                .map(|i| LEVEL_NAMES.get(i).map_or_else(|| format!("Level {}", i + 1), |s| s.to_string()))
                .collect(),
            errors: Vec::new(),
            root: SnapshotNode { children, ..Default::default() },
        }
    }

    fn generate_children(&self, rng: &mut StdRng, level: usize) -> Vec<SnapshotNode> {
        let count = rng.gen_range(self.min_children..=self.max_children);
        let is_leaf_level = level + 1 == self.levels;

        (0..count)
            .map(|i| {
                let word = WORDS[rng.gen_range(0..WORDS.len())];
                let label = if level == 0 {
                    format!("{}{} {}", word[..1].to_uppercase(), &word[1..], i + 1)
                } else {
                    format!("{}-{}", word, rng.gen_range(1..100))
                };

                if is_leaf_level {
                    SnapshotNode {
                        label: Some(label),
                        rows: rng.gen_range(1..=self.max_rows),
                        marked: 0,
                        value: self
                            .sort_dimension
                            .then(|| (rng.gen_range(0.0..1000.0_f64) * 100.0).round() / 100.0),
                        children: Vec::new(),
                    }
                } else {
                    SnapshotNode {
                        label: Some(label),
                        children: self.generate_children(rng, level + 1),
                        ..Default::default()
                    }
                }
            })
            .collect()
    }
}

impl SnapshotSource for VirtualSource {
    fn describe(&self) -> String {
        format!("virtual data (seed {})", self.seed)
    }

    fn load(&self) -> anyhow::Result<CategoryTree> {
        Ok(CategoryTree::from_snapshot(&self.generate())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{DataView, Hierarchy, HierarchyNode};

    fn depth_of(node: &SnapshotNode) -> usize {
        node.children.iter().map(|c| 1 + depth_of(c)).max().unwrap_or(0)
    }

    #[test]
    fn test_same_seed_same_snapshot() {
        let a = VirtualSource::with_config(3, 2, 4, 5, 7).generate();
        let b = VirtualSource::with_config(3, 2, 4, 5, 7).generate();
        assert_eq!(a, b);

        let c = VirtualSource::with_config(3, 2, 4, 5, 8).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_shape_follows_config() {
        let snapshot = VirtualSource::with_config(4, 2, 3, 5, 1).generate();
        assert_eq!(snapshot.levels.len(), 4);
        assert_eq!(depth_of(&snapshot.root), 4);
        assert!((2..=3).contains(&snapshot.root.children.len()));
    }

    #[test]
    fn test_sort_dimension_on_leaves() {
        let tree = VirtualSource::new().with_sort_dimension(true).load().unwrap();
        assert!(tree.has_sort_dimension());
        assert_eq!(tree.levels(), 3);
        assert!(DataView::row_count(&tree) > 0);
        assert!(tree.root().child_at(0).unwrap().sort_value().is_none());
    }
}
