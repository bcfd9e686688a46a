pub mod traits;
pub mod error;
pub mod search;
pub mod flatten;
pub mod scroll_window;
pub mod scrollbar;
pub mod selection;
pub mod config;
pub mod guard;
pub mod controller;
pub mod model;
pub mod parser;
pub mod writer;
pub mod virtual_source;
pub mod styling;

// Export traits
pub use traits::{
    NodeId, MarkingMode, MarkCommand,
    Labeled, HierarchyNode, Hierarchy, DataView, Markable,
    ReadableProperty, WritableProperty, RenderListener, SnapshotSource
};

pub use error::ListError;

// Export list pipeline
pub use search::{SearchMatcher, SearchToken, TokenKind};
pub use flatten::{flatten, DisplayItem, RowStyle, SortMode};
pub use scroll_window::{ScrollState, WindowGeometry};
pub use scrollbar::{ScrollbarControl, ScrollbarPart, LinearScale};
pub use selection::{SelectionController, SelectionRectangle, RenderedRow};
pub use guard::{RenderGuard, GuardOutcome, ErrorOverlay, OverlayCategory};
pub use controller::{CategoryListController, ListUpdate, ListKey};
pub use config::{ListConfig, ListProperties, PropertySet, PropertyName, PropertyValue};

// Export snapshot model and I/O
pub use model::{CategoryTree, CategoryNodeRef, Snapshot, SnapshotNode};
pub use parser::{FileSource, parse_snapshot, read_snapshot};
pub use writer::SnapshotWriter;
pub use virtual_source::VirtualSource;

// Export styling support
pub use styling::{Styling, StylingManager, hex_to_color32, adjust_brightness, with_alpha};
