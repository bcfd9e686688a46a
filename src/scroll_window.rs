//! Virtualization window: which slice of the list fits in the container.
//!
//! All functions here are pure; the rendering cycle owns the resulting
//! `ScrollState` and re-clamps it after every geometry change.

use std::ops::Range;

/// Visible extent and maximum offset for a given container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    /// Number of items that fit in the container
    pub extent: usize,
    /// Largest valid scroll offset
    pub max: usize,
}

/// Computes the window geometry.
///
/// `extent = min(total, floor(container_height / line_height))` and
/// `max = total - extent`. Non-positive sizes yield an empty window.
pub fn measure(container_height: f32, line_height: f32, total: usize) -> WindowGeometry {
    let fitting = if line_height > 0.0 && container_height > 0.0 {
        (container_height / line_height).floor() as usize
    } else {
        0
    };
    let extent = fitting.min(total);
    WindowGeometry {
        extent,
        max: total - extent,
    }
}

/// Clamps an offset into `[0, max]`.
pub fn clamp_offset(offset: usize, geometry: WindowGeometry) -> usize {
    offset.min(geometry.max)
}

/// Scroll position of a virtualized list.
///
/// Invariant: `offset <= max == total - extent` and `extent <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    offset: usize,
    extent: usize,
    total: usize,
    max: usize,
}

impl ScrollState {
    /// Creates an empty scroll state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-measures the window for new geometry and clamps the current offset.
    ///
    /// # Returns
    /// `true` if the offset had to be clamped.
    pub fn update_geometry(&mut self, container_height: f32, line_height: f32, total: usize) -> bool {
        let geometry = measure(container_height, line_height, total);
        self.extent = geometry.extent;
        self.total = total;
        self.max = geometry.max;

        let clamped = clamp_offset(self.offset, geometry);
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    // ===== Queries =====

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Returns true if more items exist than fit in the window.
    pub fn has_overflow(&self) -> bool {
        self.total > self.extent
    }

    /// Returns the index range of the rendered slice.
    pub fn visible_range(&self) -> Range<usize> {
        self.offset..self.offset + self.extent
    }

    // ===== Mutations =====

    /// Sets the offset, clamped to `[0, max]`.
    ///
    /// # Returns
    /// `true` if the offset changed.
    pub fn set_offset(&mut self, offset: usize) -> bool {
        let clamped = offset.min(self.max);
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Moves the offset by a signed number of rows, clamped to `[0, max]`.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (self.offset as i64).saturating_add(delta).max(0);
        self.set_offset(target as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_reference_case() {
        let geometry = measure(205.0, 20.0, 100);
        assert_eq!(geometry.extent, 10);
        assert_eq!(geometry.max, 90);
        assert_eq!(clamp_offset(95, geometry), 90);
        assert_eq!(clamp_offset(42, geometry), 42);
    }

    #[test]
    fn test_measure_short_list() {
        let geometry = measure(400.0, 20.0, 5);
        assert_eq!(geometry.extent, 5);
        assert_eq!(geometry.max, 0);
    }

    #[test]
    fn test_measure_empty_and_degenerate() {
        assert_eq!(measure(200.0, 20.0, 0), WindowGeometry { extent: 0, max: 0 });
        assert_eq!(measure(0.0, 20.0, 10), WindowGeometry { extent: 0, max: 10 });
        assert_eq!(measure(200.0, 0.0, 10), WindowGeometry { extent: 0, max: 10 });
        assert_eq!(measure(-5.0, 20.0, 10), WindowGeometry { extent: 0, max: 10 });
    }

    #[test]
    fn test_update_geometry_reclamps() {
        let mut state = ScrollState::new();
        state.update_geometry(205.0, 20.0, 100);
        assert!(state.set_offset(80));

        // Container grows: max shrinks to 80, offset still valid
        assert!(!state.update_geometry(405.0, 20.0, 100));
        assert_eq!(state.offset(), 80);

        // List shrinks after a new search
        assert!(state.update_geometry(405.0, 20.0, 30));
        assert_eq!(state.offset(), 10);
        assert_eq!(state.visible_range(), 10..30);
    }

    #[test]
    fn test_scroll_by_clamps_both_ends() {
        let mut state = ScrollState::new();
        state.update_geometry(100.0, 20.0, 20);
        assert_eq!(state.max(), 15);

        assert!(!state.scroll_by(-3));
        assert_eq!(state.offset(), 0);
        assert!(state.scroll_by(100));
        assert_eq!(state.offset(), 15);
        assert!(state.scroll_by(-4));
        assert_eq!(state.offset(), 11);
    }

    #[test]
    fn test_overflow() {
        let mut state = ScrollState::new();
        state.update_geometry(100.0, 20.0, 5);
        assert!(!state.has_overflow());
        state.update_geometry(100.0, 20.0, 6);
        assert!(state.has_overflow());
    }
}
