//! Flattening of the category hierarchy into an ordered list of display items.
//!
//! Traversal is depth-first pre-order over the host hierarchy, excluding the
//! synthetic root. Sorting is hierarchical: only sibling order changes, so
//! every child still follows its parent. Filtering is applied per node on its
//! own label; a non-matching parent is dropped even when children match.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::search::SearchMatcher;
use crate::traits::{Hierarchy, HierarchyNode, Labeled, NodeId};

/// Strategy used to derive sibling sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Collated comparison of the formatted labels
    Label,
    /// Leaves by their own sort value, internal nodes by the sum over their leaves
    NumericAggregate,
}

impl SortMode {
    /// Picks the numeric strategy whenever the hierarchy carries a sort dimension.
    pub fn for_hierarchy<H: Hierarchy>(hierarchy: &H) -> Self {
        if hierarchy.has_sort_dimension() {
            SortMode::NumericAggregate
        } else {
            SortMode::Label
        }
    }
}

/// Derived key a display item was sorted by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Label(String),
}

impl SortKey {
    /// Compares two keys. Numbers order before labels when kinds are mixed.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Label(a), SortKey::Label(b)) => collate(a, b),
            (SortKey::Number(_), SortKey::Label(_)) => Ordering::Less,
            (SortKey::Label(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Visual classification of a row, derived from its depth and the number of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Item,
    Header,
    SuperHeader,
    MegaSuperHeader,
}

impl RowStyle {
    /// Classifies a row. Only top-level rows of a multi-level list are headers.
    pub fn classify(depth: usize, levels: usize) -> Self {
        if depth != 0 {
            return RowStyle::Item;
        }
        match levels {
            l if l > 3 => RowStyle::MegaSuperHeader,
            l if l > 2 => RowStyle::SuperHeader,
            2 => RowStyle::Header,
            _ => RowStyle::Item,
        }
    }
}

/// One flattened, sorted, filter-surviving row.
///
/// Display items are rebuilt wholesale on every snapshot and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    /// Formatted label
    pub text: String,
    /// Nesting level, 0 for children of the root
    pub depth: usize,
    pub is_leaf: bool,
    pub row_count: usize,
    /// Never exceeds `row_count`
    pub marked_row_count: usize,
    pub sort_key: SortKey,
    /// Originating host node, used only for mark commands
    pub node: NodeId,
}

impl DisplayItem {
    /// Returns true if every row under this item is marked.
    pub fn is_fully_marked(&self) -> bool {
        self.marked_row_count == self.row_count
    }
}

/// Flattens a hierarchy into display order.
///
/// # Arguments
/// * `hierarchy` - The host hierarchy; its root is not emitted
/// * `sort_mode` - How sibling sort keys are derived
/// * `reverse` - Flips the sibling comparator
/// * `matcher` - Compiled search expression applied to every node's own label
pub fn flatten<H: Hierarchy>(
    hierarchy: &H,
    sort_mode: SortMode,
    reverse: bool,
    matcher: &SearchMatcher,
) -> Vec<DisplayItem> {
    let root = hierarchy.root();

    let mut aggregates = HashMap::new();
    if sort_mode == SortMode::NumericAggregate {
        aggregate_sort_values(&root, &mut aggregates);
    }

    let mut items = Vec::new();
    let mut stack: Vec<(H::Node<'_>, usize)> = Vec::new();
    push_sorted_children(&mut stack, &root, 0, sort_mode, reverse, &aggregates);

    while let Some((node, depth)) = stack.pop() {
        if node.has_value() {
            let text = node.formatted_value();
            if matcher.is_empty() || matcher.test(&text) {
                let row_count = node.row_count();
                items.push(DisplayItem {
                    sort_key: sort_key(&node, sort_mode, &aggregates),
                    depth,
                    is_leaf: node.is_leaf(),
                    row_count,
                    marked_row_count: node.marked_row_count().min(row_count),
                    node: node.id(),
                    text,
                });
            }
        }

        push_sorted_children(&mut stack, &node, depth + 1, sort_mode, reverse, &aggregates);
    }

    tracing::trace!("flattened hierarchy into {} items", items.len());
    items
}

/// Computes sorted child indices for a given parent.
///
/// Sorting is stable, so siblings with equal keys keep their host order.
pub fn sort_child_indices<N: HierarchyNode>(
    parent: &N,
    sort_mode: SortMode,
    reverse: bool,
    aggregates: &HashMap<NodeId, f64>,
) -> Vec<usize> {
    let mut keyed: Vec<(usize, SortKey)> = (0..parent.num_children())
        .filter_map(|i| parent.child_at(i).map(|child| (i, sort_key(&child, sort_mode, aggregates))))
        .collect();

    keyed.sort_by(|a, b| {
        if reverse {
            b.1.compare(&a.1)
        } else {
            a.1.compare(&b.1)
        }
    });

    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Pushes children onto the traversal stack so they pop in sorted order.
fn push_sorted_children<N: HierarchyNode>(
    stack: &mut Vec<(N, usize)>,
    parent: &N,
    child_depth: usize,
    sort_mode: SortMode,
    reverse: bool,
    aggregates: &HashMap<NodeId, f64>,
) {
    let order = sort_child_indices(parent, sort_mode, reverse, aggregates);
    for &i in order.iter().rev() {
        if let Some(child) = parent.child_at(i) {
            stack.push((child, child_depth));
        }
    }
}

fn sort_key<N: HierarchyNode>(node: &N, sort_mode: SortMode, aggregates: &HashMap<NodeId, f64>) -> SortKey {
    match sort_mode {
        SortMode::Label => SortKey::Label(node.formatted_value()),
        SortMode::NumericAggregate => SortKey::Number(aggregates.get(&node.id()).copied().unwrap_or(0.0)),
    }
}

/// Bottom-up sum of leaf sort values. Leaves without a value count as zero.
fn aggregate_sort_values<N: HierarchyNode>(node: &N, out: &mut HashMap<NodeId, f64>) -> f64 {
    let total = if node.is_leaf() {
        node.sort_value().unwrap_or(0.0)
    } else {
        (0..node.num_children())
            .filter_map(|i| node.child_at(i))
            .map(|child| aggregate_sort_values(&child, out))
            .sum()
    };
    out.insert(node.id(), total);
    total
}

/// Case-insensitive natural collation: "item2" < "Item10".
///
/// Labels that differ only in letter case compare equal. Characters are
/// compared by lowercase code point; diacritics are not folded.
pub fn collate(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek(), b_chars.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ac), Some(&bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let a_num = collect_digits(&mut a_chars);
                    let b_num = collect_digits(&mut b_chars);
                    match compare_digit_runs(&a_num, &b_num) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }

                let al = ac.to_lowercase();
                let bl = bc.to_lowercase();
                match al.cmp(bl) {
                    Ordering::Equal => {
                        a_chars.next();
                        b_chars.next();
                    }
                    other => return other,
                }
            }
        }
    }
}

fn collect_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

/// Compares digit runs by numeric value without overflowing on long runs.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct MockNode {
        id: u64,
        label: Option<&'static str>,
        value: Option<f64>,
        rows: usize,
        marked: usize,
        children: Vec<MockNode>,
    }

    fn leaf(id: u64, label: &'static str, value: f64) -> MockNode {
        MockNode { id, label: Some(label), value: Some(value), rows: 1, marked: 0, children: vec![] }
    }

    fn parent(id: u64, label: &'static str, children: Vec<MockNode>) -> MockNode {
        let rows = children.iter().map(|c| c.rows).sum();
        MockNode { id, label: Some(label), value: None, rows, marked: 0, children }
    }

    impl Labeled for &MockNode {
        fn formatted_value(&self) -> String {
            self.label.unwrap_or_default().to_string()
        }

        fn has_value(&self) -> bool {
            self.label.is_some_and(|l| !l.is_empty())
        }
    }

    impl<'a> HierarchyNode for &'a MockNode {
        fn id(&self) -> NodeId {
            self.id
        }
        fn row_count(&self) -> usize {
            self.rows
        }
        fn marked_row_count(&self) -> usize {
            self.marked
        }
        fn num_children(&self) -> usize {
            self.children.len()
        }
        fn child_at(&self, index: usize) -> Option<Self> {
            let node: &'a MockNode = self;
            node.children.get(index)
        }
        fn sort_value(&self) -> Option<f64> {
            self.value
        }
    }

    struct MockTree {
        root: MockNode,
        levels: usize,
        sorted: bool,
    }

    impl Hierarchy for MockTree {
        type Node<'a> = &'a MockNode;

        fn root(&self) -> &MockNode {
            &self.root
        }
        fn levels(&self) -> usize {
            self.levels
        }
        fn has_sort_dimension(&self) -> bool {
            self.sorted
        }
    }

    fn sample_tree() -> MockTree {
        let root = MockNode {
            id: 0,
            label: None,
            value: None,
            rows: 0,
            marked: 0,
            children: vec![
                parent(1, "Fruit", vec![leaf(2, "pear", 5.0), leaf(3, "Apple", 1.0), leaf(4, "banana", 3.0)]),
                parent(5, "Berries", vec![leaf(6, "raspberry", 10.0), leaf(7, "blueberry", 2.0)]),
            ],
        };
        MockTree { root, levels: 2, sorted: false }
    }

    fn labels(items: &[DisplayItem]) -> Vec<&str> {
        items.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn test_label_sort_is_hierarchical() {
        let tree = sample_tree();
        let items = flatten(&tree, SortMode::Label, false, &SearchMatcher::default());

        assert_eq!(
            labels(&items),
            vec!["Berries", "blueberry", "raspberry", "Fruit", "Apple", "banana", "pear"]
        );
        assert_eq!(items[0].depth, 0);
        assert_eq!(items[1].depth, 1);
        assert!(!items[0].is_leaf);
        assert!(items[1].is_leaf);
    }

    #[test]
    fn test_reverse_flips_sibling_order_only() {
        let tree = sample_tree();
        let items = flatten(&tree, SortMode::Label, true, &SearchMatcher::default());

        assert_eq!(
            labels(&items),
            vec!["Fruit", "pear", "banana", "Apple", "Berries", "raspberry", "blueberry"]
        );
    }

    #[test]
    fn test_numeric_aggregate_sort() {
        let mut tree = sample_tree();
        tree.sorted = true;
        assert_eq!(SortMode::for_hierarchy(&tree), SortMode::NumericAggregate);

        let items = flatten(&tree, SortMode::NumericAggregate, false, &SearchMatcher::default());

        // Fruit sums to 9, Berries to 12
        assert_eq!(
            labels(&items),
            vec!["Fruit", "Apple", "banana", "pear", "Berries", "blueberry", "raspberry"]
        );
        assert_eq!(items[0].sort_key, SortKey::Number(9.0));
        assert_eq!(items[4].sort_key, SortKey::Number(12.0));
    }

    #[test]
    fn test_filter_applies_to_own_label() {
        let tree = sample_tree();
        let matcher = SearchMatcher::compile("b");
        let items = flatten(&tree, SortMode::Label, false, &matcher);

        // "Fruit" does not match but its child "banana" is still emitted
        assert_eq!(labels(&items), vec!["Berries", "blueberry", "banana"]);
        assert_eq!(items[2].depth, 1);
    }

    #[test]
    fn test_nodes_without_value_are_skipped() {
        let mut tree = sample_tree();
        tree.root.children[0].children[0].label = None;
        tree.root.children[1].children[0].label = Some("");

        let items = flatten(&tree, SortMode::Label, false, &SearchMatcher::default());
        assert_eq!(items.len(), 5);
        assert!(!labels(&items).contains(&"pear"));
    }

    #[test]
    fn test_output_never_exceeds_node_count() {
        let tree = sample_tree();
        let items = flatten(&tree, SortMode::Label, false, &SearchMatcher::compile("*e*"));
        assert!(items.len() <= 7);
    }

    #[test]
    fn test_equal_keys_keep_host_order() {
        let root = parent(0, "", vec![leaf(1, "same", 1.0), leaf(2, "Same", 1.0), leaf(3, "a", 1.0)]);
        let tree = MockTree { root, levels: 1, sorted: true };

        let by_value = flatten(&tree, SortMode::NumericAggregate, false, &SearchMatcher::default());
        assert_eq!(by_value.iter().map(|i| i.node).collect::<Vec<_>>(), vec![1, 2, 3]);

        let by_value_rev = flatten(&tree, SortMode::NumericAggregate, true, &SearchMatcher::default());
        assert_eq!(by_value_rev.iter().map(|i| i.node).collect::<Vec<_>>(), vec![1, 2, 3]);

        let by_label = flatten(&tree, SortMode::Label, false, &SearchMatcher::default());
        assert_eq!(by_label.iter().map(|i| i.node).collect::<Vec<_>>(), vec![3, 1, 2]);

        let by_label_rev = flatten(&tree, SortMode::Label, true, &SearchMatcher::default());
        assert_eq!(by_label_rev.iter().map(|i| i.node).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reverse_twice_restores_order() {
        let tree = sample_tree();
        let matcher = SearchMatcher::default();
        let forward = flatten(&tree, SortMode::Label, false, &matcher);

        let root = &tree.root;
        let rev = sort_child_indices(&root, SortMode::Label, true, &HashMap::new());
        let fwd = sort_child_indices(&root, SortMode::Label, false, &HashMap::new());
        assert_eq!(rev.iter().rev().copied().collect::<Vec<_>>(), fwd);

        assert_eq!(flatten(&tree, SortMode::Label, false, &matcher), forward);
    }

    #[test]
    fn test_marked_count_clamped_and_fully_marked() {
        let mut tree = sample_tree();
        tree.root.children[0].children[0].marked = 4;
        let items = flatten(&tree, SortMode::Label, false, &SearchMatcher::default());
        let pear = items.iter().find(|i| i.text == "pear").unwrap();
        assert_eq!(pear.marked_row_count, 1);
        assert!(pear.is_fully_marked());
        assert!(!items[0].is_fully_marked());
    }

    #[test]
    fn test_natural_collation() {
        assert_eq!(collate("item2", "Item10"), Ordering::Less);
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("a007", "a7x"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
        assert_eq!(collate("same", "Same"), Ordering::Equal);
        assert_eq!(collate("ITEM10", "item10"), Ordering::Equal);
        assert_eq!(collate("v99999999999999999999999", "v100000000000000000000000"), Ordering::Less);
    }

    #[test]
    fn test_row_style_classification() {
        assert_eq!(RowStyle::classify(0, 1), RowStyle::Item);
        assert_eq!(RowStyle::classify(0, 2), RowStyle::Header);
        assert_eq!(RowStyle::classify(0, 3), RowStyle::SuperHeader);
        assert_eq!(RowStyle::classify(0, 4), RowStyle::MegaSuperHeader);
        assert_eq!(RowStyle::classify(1, 4), RowStyle::Item);
    }
}
