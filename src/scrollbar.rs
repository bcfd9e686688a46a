//! Custom scrollbar control.
//!
//! The control maps item indices to pixels along its track and owns all
//! pointer, wheel and drag interaction for three surfaces: the drag handle,
//! the two step buttons and the bare track. It reports offset changes upward
//! instead of mutating the list directly.
//!
//! All coordinates are local to the scrollbar, with `y = 0` at its top edge.

use crate::scroll_window::ScrollState;

/// Default size of the square step buttons
pub const DEFAULT_BUTTON_SIZE: f32 = 12.0;

/// Minimum handle height so a nearly full list still shows a grabbable handle
pub const MIN_HANDLE_HEIGHT: f32 = 2.0;

/// Linear map from a numeric domain onto a pixel range.
///
/// A degenerate domain maps every value onto the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Maps a domain value to the range.
    pub fn apply(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Maps a range value back to the domain.
    pub fn invert(&self, pixel: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn range_start(&self) -> f32 {
        self.range.0
    }

    pub fn range_end(&self) -> f32 {
        self.range.1
    }
}

/// Pixel position and size of the drag handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGeometry {
    pub top: f32,
    pub height: f32,
}

impl HandleGeometry {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom()
    }
}

/// Interactive surface under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarPart {
    UpButton,
    DownButton,
    Handle,
    Track,
}

/// Stateful scrollbar widget logic.
#[derive(Debug, Clone)]
pub struct ScrollbarControl {
    button_size: f32,
    track_height: f32,
    /// Wheel delta (in pixels) that scrolls by one row
    scroll_distance: f32,
    offset: usize,
    max: usize,
    extent: usize,
    total: usize,
    /// Unsnapped handle top while dragging
    handle_top: f32,
    dragging: bool,
    drag_anchor_y: f32,
    hovered: bool,
}

impl Default for ScrollbarControl {
    fn default() -> Self {
        Self::new(DEFAULT_BUTTON_SIZE)
    }
}

impl ScrollbarControl {
    /// Creates a scrollbar with the given step button size.
    pub fn new(button_size: f32) -> Self {
        Self {
            button_size,
            track_height: 0.0,
            scroll_distance: 1.0,
            offset: 0,
            max: 0,
            extent: 0,
            total: 0,
            handle_top: 0.0,
            dragging: false,
            drag_anchor_y: 0.0,
            hovered: false,
        }
    }

    /// Applies new geometry from the rendering cycle.
    ///
    /// # Arguments
    /// * `track_height` - Full height of the scrollbar in pixels
    /// * `state` - The clamped scroll state of the list
    /// * `scroll_distance` - Wheel pixels per row
    pub fn update(&mut self, track_height: f32, state: &ScrollState, scroll_distance: f32) {
        self.track_height = track_height;
        self.total = state.total();
        self.extent = state.extent();
        self.max = state.max();
        self.offset = state.offset();
        self.scroll_distance = if scroll_distance > 0.0 { scroll_distance } else { 1.0 };

        if self.is_empty() {
            self.dragging = false;
        }
        self.sync_handle();
    }

    /// Sets the offset without emitting a change (e.g. after keyboard scrolling).
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max);
        self.sync_handle();
    }

    // ===== Queries =====

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn button_size(&self) -> f32 {
        self.button_size
    }

    pub fn track_height(&self) -> f32 {
        self.track_height
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns true if there is nothing to scroll.
    pub fn is_empty(&self) -> bool {
        self.total == 0 || self.extent >= self.total
    }

    /// Returns the index-to-pixel scale, or `None` when there is nothing to scroll.
    pub fn scale(&self) -> Option<LinearScale> {
        if self.is_empty() {
            return None;
        }
        Some(LinearScale::new(
            (0.0, (self.total - 1) as f32),
            (self.button_size + 2.0, self.track_height - self.button_size - 4.0),
        ))
    }

    /// Returns the current handle geometry, or `None` when there is nothing to scroll.
    pub fn handle_geometry(&self) -> Option<HandleGeometry> {
        let scale = self.scale()?;
        let height = (scale.apply(self.extent as f32 - 1.0) - scale.apply(0.0)).max(MIN_HANDLE_HEIGHT);
        let top = if self.dragging {
            self.handle_top
        } else {
            scale.apply(self.offset as f32)
        };
        Some(HandleGeometry { top, height })
    }

    /// Classifies a local y coordinate.
    pub fn hit_test(&self, y: f32) -> ScrollbarPart {
        if y < self.button_size {
            return ScrollbarPart::UpButton;
        }
        if y >= self.track_height - self.button_size - 3.0 {
            return ScrollbarPart::DownButton;
        }
        match self.handle_geometry() {
            Some(handle) if handle.contains(y) => ScrollbarPart::Handle,
            _ => ScrollbarPart::Track,
        }
    }

    // ===== Visibility =====

    /// Records whether the pointer is over the list container.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Returns true if the scrollbar should be painted.
    ///
    /// A drag in progress keeps the scrollbar visible after the pointer leaves.
    pub fn is_visible(&self, interactive: bool) -> bool {
        !self.is_empty() && interactive && (self.hovered || self.dragging)
    }

    // ===== Interaction =====

    /// Routes a primary-button press at local `y` to the surface under it.
    ///
    /// # Returns
    /// The pressed surface and the new offset if it changed.
    pub fn pointer_down(&mut self, y: f32) -> (ScrollbarPart, Option<usize>) {
        let part = self.hit_test(y);
        let changed = match part {
            ScrollbarPart::UpButton => self.step_up(),
            ScrollbarPart::DownButton => self.step_down(),
            ScrollbarPart::Handle => {
                self.begin_drag(y);
                None
            }
            ScrollbarPart::Track => self.track_click(y),
        };
        (part, changed)
    }

    /// Pages the handle one handle-height towards the click.
    pub fn track_click(&mut self, y: f32) -> Option<usize> {
        let scale = self.scale()?;
        let handle = self.handle_geometry()?;
        let mut top = handle.top;

        if y < handle.top {
            top = (top - handle.height).max(scale.range_start());
        }
        if y > handle.bottom() {
            top += handle.height;
            if top + handle.height > scale.range_end() {
                top = scale.range_end() - handle.height;
            }
        }

        self.commit_pixel(top, &scale)
    }

    /// Scrolls by `round(delta_y / scroll_distance)` rows.
    pub fn wheel(&mut self, delta_y: f32) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let change = (delta_y / self.scroll_distance).round() as i64;
        let target = (self.offset as i64).saturating_add(change).clamp(0, self.max as i64) as usize;
        self.commit_offset(target)
    }

    /// Scrolls one row up; no-op at the top.
    pub fn step_up(&mut self) -> Option<usize> {
        if self.is_empty() || self.offset == 0 {
            return None;
        }
        self.commit_offset(self.offset - 1)
    }

    /// Scrolls one row down; no-op at the bottom.
    pub fn step_down(&mut self) -> Option<usize> {
        if self.is_empty() || self.offset >= self.max {
            return None;
        }
        self.commit_offset(self.offset + 1)
    }

    /// Enters the dragging state anchored at `y`.
    pub fn begin_drag(&mut self, y: f32) {
        let Some(handle) = self.handle_geometry() else {
            return;
        };
        self.handle_top = handle.top;
        self.drag_anchor_y = y;
        self.dragging = true;
        tracing::trace!("scrollbar drag started at y={}", y);
    }

    /// Moves the handle by the pointer delta since the last anchor.
    pub fn drag_to(&mut self, y: f32) -> Option<usize> {
        if !self.dragging {
            return None;
        }
        let scale = self.scale()?;
        let handle = self.handle_geometry()?;

        let mut top = self.handle_top + (y - self.drag_anchor_y);
        if top < scale.range_start() {
            top = scale.range_start();
        }
        if top + handle.height > scale.range_end() {
            top = scale.range_end() - handle.height;
        }
        self.handle_top = top;
        self.drag_anchor_y = y;

        let index = scale.invert(top).round().max(0.0) as usize;
        self.commit_offset(index.min(self.max))
    }

    /// Leaves the dragging state, committing the final position.
    pub fn end_drag(&mut self, y: f32) -> Option<usize> {
        if !self.dragging {
            return None;
        }
        let changed = self.drag_to(y);
        self.dragging = false;
        self.sync_handle();
        tracing::trace!("scrollbar drag ended at offset {}", self.offset);
        changed
    }

    // ===== Internal =====

    fn commit_pixel(&mut self, top: f32, scale: &LinearScale) -> Option<usize> {
        let index = scale.invert(top).round().max(0.0) as usize;
        self.commit_offset(index.min(self.max))
    }

    fn commit_offset(&mut self, offset: usize) -> Option<usize> {
        let changed = offset != self.offset;
        self.offset = offset;
        self.sync_handle();
        changed.then_some(offset)
    }

    fn sync_handle(&mut self) {
        if self.dragging {
            return;
        }
        if let Some(scale) = self.scale() {
            self.handle_top = scale.apply(self.offset as f32);
        }
    }
}
