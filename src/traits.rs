/// Type alias for node IDs (host-side identifiers of hierarchy nodes)
pub type NodeId = u64;

/// How a mark command changes the host's marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkingMode {
    /// Marking is set exclusively to the rows of the commanded nodes
    Replace,
    /// Rows of each commanded node are toggled, or added when partially marked
    ToggleOrAdd,
}

/// A request to mark all rows under one hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkCommand {
    pub node: NodeId,
    pub mode: MarkingMode,
}

/// Anything with a display label.
pub trait Labeled {
    /// Returns the formatted label shown to the user
    fn formatted_value(&self) -> String;

    /// Returns false when the node carries no value (empty/null category)
    fn has_value(&self) -> bool;
}

/// Trait for accessing a node of the host's category hierarchy
///
/// Nodes are cheap handles: cloning one must not copy the subtree. Children
/// returned by `child_at` share the lifetime of their parent.
pub trait HierarchyNode: Labeled + Clone {
    /// Returns the node ID used to issue mark commands
    fn id(&self) -> NodeId;

    /// Returns the number of data rows under this node
    fn row_count(&self) -> usize;

    /// Returns the number of marked data rows under this node
    fn marked_row_count(&self) -> usize;

    /// Returns the number of children
    fn num_children(&self) -> usize;

    /// Returns the child at the given index
    fn child_at(&self, index: usize) -> Option<Self>;

    /// Returns the value of the numeric sort dimension (leaves only)
    fn sort_value(&self) -> Option<f64>;

    /// Returns true if this node has no children
    fn is_leaf(&self) -> bool {
        self.num_children() == 0
    }
}

/// Trait for accessing a category hierarchy
pub trait Hierarchy {
    type Node<'a>: HierarchyNode
    where
        Self: 'a;

    /// Returns the synthetic root node. The root itself is never displayed.
    fn root(&self) -> Self::Node<'_>;

    /// Returns the number of levels in the hierarchy (root excluded)
    fn levels(&self) -> usize;

    /// Returns true if leaves carry a numeric sort value
    fn has_sort_dimension(&self) -> bool;
}

/// One delivery of host data: a hierarchy plus its health information.
pub trait DataView: Hierarchy {
    /// Returns the errors the host reports for this view
    fn errors(&self) -> Vec<String>;

    /// Returns the total number of data rows in the view
    fn row_count(&self) -> usize;

    /// Returns the generation this view was fetched for
    fn generation(&self) -> u64;
}

/// Receiver of mark commands.
///
/// Commands produced by a single gesture are delivered as one batch and
/// must be applied as a single marking transaction.
pub trait Markable {
    fn mark(&mut self, commands: &[MarkCommand]);
}

/// A named, persisted property value.
pub trait ReadableProperty<T> {
    fn name(&self) -> &str;
    fn value(&self) -> T;
}

/// A property that can be written back to the host.
pub trait WritableProperty<T>: ReadableProperty<T> {
    fn set(&mut self, value: T);
}

/// Notified once a paint completed (used for print/export synchronization).
pub trait RenderListener {
    fn render_complete(&mut self);
}

/// Anything that can produce a category tree delivery (file, generator).
pub trait SnapshotSource: Send {
    /// Returns a short human-readable description of the source
    fn describe(&self) -> String;

    /// Loads the data, typically on a background thread
    fn load(&self) -> anyhow::Result<crate::model::CategoryTree>;
}
