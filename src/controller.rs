//! Per-instance owner of all list state.
//!
//! The controller holds the flattened items, the scroll position, the
//! scrollbar and the rectangle selection for one list. Host deliveries go
//! through `apply_snapshot`; local gestures (wheel, drag, step buttons, keys)
//! are handled here and report a `ListUpdate` without a host round trip.
//!
//! Pointer coordinates are local to the list area: `(0, 0)` is the top-left
//! corner below the search field.

use crate::config::{ListConfig, ListProperties};
use crate::flatten::{flatten, DisplayItem, RowStyle, SortMode};
use crate::scroll_window::ScrollState;
use crate::scrollbar::{ScrollbarControl, ScrollbarPart};
use crate::search::SearchMatcher;
use crate::selection::{RenderedRow, SelectionController};
use crate::traits::{Hierarchy, MarkCommand};

/// Result of a local interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListUpdate {
    /// Nothing visible changed
    None,
    /// Overlay or hover state changed; repaint without new data
    Redraw,
    /// The scroll offset changed to the given value
    OffsetChanged(usize),
}

/// Keyboard scrolling commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Which surface captured the current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerCapture {
    Scrollbar(ScrollbarPart),
    List,
}

pub struct CategoryListController {
    config: ListConfig,
    properties: ListProperties,
    matcher: SearchMatcher,
    items: Vec<DisplayItem>,
    levels: usize,
    scroll: ScrollState,
    scrollbar: ScrollbarControl,
    selection: SelectionController,
    viewport: egui::Vec2,
    interactive: bool,
    capture: Option<PointerCapture>,
}

impl CategoryListController {
    pub fn new(config: ListConfig) -> Self {
        let scrollbar = ScrollbarControl::new(config.scrollbar_button_size);
        Self {
            config,
            properties: ListProperties::default(),
            matcher: SearchMatcher::default(),
            items: Vec::new(),
            levels: 0,
            scroll: ScrollState::new(),
            scrollbar,
            selection: SelectionController::new(),
            viewport: egui::Vec2::ZERO,
            interactive: true,
            capture: None,
        }
    }

    // ===== Host-driven updates =====

    /// Rebuilds the display items from a fresh delivery and re-clamps the scroll state.
    pub fn apply_snapshot<H: Hierarchy>(&mut self, hierarchy: &H) {
        let sort_mode = SortMode::for_hierarchy(hierarchy);
        self.items = flatten(hierarchy, sort_mode, self.properties.reverse_order, &self.matcher);
        self.levels = hierarchy.levels();
        self.refresh_geometry();

        tracing::debug!(
            "applied snapshot: {} items, {:?}, offset {}",
            self.items.len(),
            sort_mode,
            self.scroll.offset()
        );
    }

    /// Applies new property values.
    ///
    /// # Returns
    /// `true` if the items must be rebuilt (search or sort direction changed).
    /// Layout-only changes are applied immediately.
    pub fn set_properties(&mut self, properties: ListProperties) -> bool {
        let needs_rebuild = properties.search_expression != self.properties.search_expression
            || properties.reverse_order != self.properties.reverse_order;
        let layout_changed = properties.show_search_field != self.properties.show_search_field;

        if properties.search_expression != self.properties.search_expression {
            self.matcher = SearchMatcher::compile(&properties.search_expression);
        }
        self.properties = properties;

        if layout_changed {
            self.refresh_geometry();
        }
        needs_rebuild
    }

    /// Sets the size of the whole container, search field included.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let size = egui::vec2(width.max(0.0), height.max(0.0));
        if size != self.viewport {
            self.viewport = size;
            self.refresh_geometry();
        }
    }

    /// Enables or disables user interaction (e.g. while the host is exporting).
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
        if !interactive {
            self.selection.cancel();
            self.capture = None;
        }
    }

    fn refresh_geometry(&mut self) {
        let height = self.list_height();
        self.scroll.update_geometry(height, self.config.line_height, self.items.len());
        self.scrollbar.update(height, &self.scroll, self.config.wheel_scroll_distance);
    }

    // ===== Queries =====

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn properties(&self) -> &ListProperties {
        &self.properties
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scrollbar(&self) -> &ScrollbarControl {
        &self.scrollbar
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Height reserved for the search field, zero when hidden.
    pub fn search_field_height(&self) -> f32 {
        if self.properties.show_search_field {
            self.config.search_field_height
        } else {
            0.0
        }
    }

    /// Height of the list area below the search field.
    pub fn list_height(&self) -> f32 {
        (self.viewport.y - self.search_field_height()).max(0.0)
    }

    pub fn list_width(&self) -> f32 {
        self.viewport.x
    }

    /// The slice of items currently rendered.
    pub fn visible_items(&self) -> &[DisplayItem] {
        let range = self.scroll.visible_range();
        &self.items[range.start.min(self.items.len())..range.end.min(self.items.len())]
    }

    /// Bounding boxes of the rendered rows, in list coordinates.
    pub fn rendered_rows(&self) -> Vec<RenderedRow> {
        let line_height = self.config.line_height;
        self.visible_items()
            .iter()
            .enumerate()
            .map(|(i, item)| RenderedRow {
                node: item.node,
                top: i as f32 * line_height,
                height: line_height,
            })
            .collect()
    }

    /// Visual class of a rendered item.
    pub fn row_style(&self, item: &DisplayItem) -> RowStyle {
        RowStyle::classify(item.depth, self.levels)
    }

    pub fn scrollbar_visible(&self) -> bool {
        self.scrollbar.is_visible(self.interactive)
    }

    /// Returns true if a list-local x coordinate lies in the scrollbar column.
    fn in_scrollbar_column(&self, x: f32) -> bool {
        x >= self.list_width() - self.config.scrollbar_width
    }

    // ===== Local interaction =====

    /// Records pointer hover over the container.
    pub fn set_hovered(&mut self, hovered: bool) -> ListUpdate {
        let was_visible = self.scrollbar_visible();
        self.scrollbar.set_hovered(hovered);
        if was_visible != self.scrollbar_visible() {
            ListUpdate::Redraw
        } else {
            ListUpdate::None
        }
    }

    /// Routes a primary-button press. The scrollbar takes precedence over the list body.
    pub fn pointer_down(&mut self, pos: egui::Pos2) -> ListUpdate {
        if !self.interactive || pos.y < 0.0 || pos.y > self.list_height() {
            return ListUpdate::None;
        }

        if self.scrollbar_visible() && self.in_scrollbar_column(pos.x) {
            let (part, changed) = self.scrollbar.pointer_down(pos.y);
            self.capture = Some(PointerCapture::Scrollbar(part));
            return match self.commit_offset(changed) {
                ListUpdate::None => ListUpdate::Redraw,
                update => update,
            };
        }

        self.selection.begin(pos.y, self.list_width());
        self.capture = Some(PointerCapture::List);
        ListUpdate::Redraw
    }

    /// Continues the captured gesture.
    pub fn pointer_move(&mut self, pos: egui::Pos2) -> ListUpdate {
        match self.capture {
            Some(PointerCapture::Scrollbar(ScrollbarPart::Handle)) => {
                let changed = self.scrollbar.drag_to(pos.y);
                self.commit_offset(changed)
            }
            Some(PointerCapture::List) => {
                self.selection.update(pos.y);
                ListUpdate::Redraw
            }
            _ => ListUpdate::None,
        }
    }

    /// Ends the captured gesture.
    ///
    /// # Returns
    /// The update to apply and the mark commands produced by a rectangle selection.
    pub fn pointer_up(&mut self, pos: egui::Pos2, modifier: bool) -> (ListUpdate, Vec<MarkCommand>) {
        match self.capture.take() {
            Some(PointerCapture::Scrollbar(ScrollbarPart::Handle)) => {
                let changed = self.scrollbar.end_drag(pos.y);
                let update = match self.commit_offset(changed) {
                    ListUpdate::None => ListUpdate::Redraw,
                    update => update,
                };
                (update, Vec::new())
            }
            Some(PointerCapture::List) => {
                let rows = self.rendered_rows();
                let commands = self.selection.finish(pos.y, modifier, &rows);
                (ListUpdate::Redraw, commands)
            }
            _ => (ListUpdate::None, Vec::new()),
        }
    }

    /// Scrolls by a wheel delta in pixels.
    pub fn on_wheel(&mut self, delta_y: f32) -> ListUpdate {
        if !self.interactive {
            return ListUpdate::None;
        }
        let changed = self.scrollbar.wheel(delta_y);
        self.commit_offset(changed)
    }

    /// Keyboard scrolling, clamped to the valid offsets.
    pub fn on_key(&mut self, key: ListKey) -> ListUpdate {
        if !self.interactive {
            return ListUpdate::None;
        }
        let page = self.scroll.extent().max(1) as i64;
        let changed = match key {
            ListKey::Up => self.scroll.scroll_by(-1),
            ListKey::Down => self.scroll.scroll_by(1),
            ListKey::PageUp => self.scroll.scroll_by(-page),
            ListKey::PageDown => self.scroll.scroll_by(page),
            ListKey::Home => self.scroll.set_offset(0),
            ListKey::End => self.scroll.set_offset(self.scroll.max()),
        };
        if !changed {
            return ListUpdate::None;
        }
        self.scrollbar.set_offset(self.scroll.offset());
        ListUpdate::OffsetChanged(self.scroll.offset())
    }

    fn commit_offset(&mut self, changed: Option<usize>) -> ListUpdate {
        match changed {
            Some(offset) => {
                self.scroll.set_offset(offset);
                ListUpdate::OffsetChanged(self.scroll.offset())
            }
            None => ListUpdate::None,
        }
    }
}
