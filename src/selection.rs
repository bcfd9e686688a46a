//! Rectangle (drag) selection over the rendered rows.
//!
//! Selection is row-based: the rectangle always spans the full list width
//! and only its vertical extent decides which rows are hit. Only rows that
//! are rendered at release time take part.

use crate::traits::{MarkCommand, MarkingMode, NodeId};

/// Screen-space selection rectangle in list coordinates.
///
/// Not normalized: `y2` may be above `y1` when dragging upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRectangle {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl SelectionRectangle {
    /// Returns `(top, bottom)` with the vertical bounds swapped if inverted.
    pub fn normalized_vertical(&self) -> (f32, f32) {
        if self.y1 <= self.y2 {
            (self.y1, self.y2)
        } else {
            (self.y2, self.y1)
        }
    }

    /// Returns true if a row band `[top, top + height)` intersects the rectangle.
    pub fn intersects_row(&self, top: f32, height: f32) -> bool {
        let (rect_top, rect_bottom) = self.normalized_vertical();
        top < rect_bottom && top + height > rect_top
    }

    /// Converts to an egui rectangle with normalized corners.
    pub fn to_rect(&self) -> egui::Rect {
        egui::Rect::from_two_pos(egui::pos2(self.x1, self.y1), egui::pos2(self.x2, self.y2))
    }
}

/// Bounding box of one rendered row, in list coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedRow {
    pub node: NodeId,
    pub top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum SelectionPhase {
    #[default]
    Idle,
    Selecting(SelectionRectangle),
}

/// Idle/Selecting state machine for rectangle selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    phase: SelectionPhase,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a rectangle is being dragged.
    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, SelectionPhase::Selecting(_))
    }

    /// Returns the current rectangle, if selecting.
    pub fn rectangle(&self) -> Option<SelectionRectangle> {
        match self.phase {
            SelectionPhase::Selecting(rect) => Some(rect),
            SelectionPhase::Idle => None,
        }
    }

    /// Returns the normalized overlay rectangle to paint, if selecting.
    pub fn overlay_rect(&self) -> Option<egui::Rect> {
        self.rectangle().map(|rect| rect.to_rect())
    }

    /// Idle -> Selecting: anchors a full-width rectangle at `y`.
    pub fn begin(&mut self, y: f32, width: f32) {
        let rect = SelectionRectangle {
            x1: 0.0,
            y1: y,
            x2: (width - 2.0).max(0.0),
            y2: y,
        };
        self.phase = SelectionPhase::Selecting(rect);
    }

    /// Moves the free corner of the rectangle. Ignored while idle.
    pub fn update(&mut self, y: f32) {
        if let SelectionPhase::Selecting(rect) = &mut self.phase {
            rect.y2 = y;
        }
    }

    /// Selecting -> Idle: returns one mark command per rendered row hit.
    ///
    /// # Arguments
    /// * `y` - Pointer position at release
    /// * `modifier` - Whether ctrl/cmd was held (toggle instead of replace)
    /// * `rows` - Rows rendered at the time of release
    pub fn finish(&mut self, y: f32, modifier: bool, rows: &[RenderedRow]) -> Vec<MarkCommand> {
        self.update(y);
        let SelectionPhase::Selecting(rect) = std::mem::take(&mut self.phase) else {
            return Vec::new();
        };

        let mode = if modifier { MarkingMode::ToggleOrAdd } else { MarkingMode::Replace };
        let commands: Vec<MarkCommand> = rows
            .iter()
            .filter(|row| rect.intersects_row(row.top, row.height))
            .map(|row| MarkCommand { node: row.node, mode })
            .collect();

        tracing::debug!("rectangle selection hit {} rows ({:?})", commands.len(), mode);
        commands
    }

    /// Drops the current gesture without marking anything.
    pub fn cancel(&mut self) {
        self.phase = SelectionPhase::Idle;
    }
}
