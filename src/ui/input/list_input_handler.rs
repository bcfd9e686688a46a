//! List input handling for scrolling and rectangle selection.
//!
//! This module translates egui input into list controller calls:
//! - Primary press/drag/release (scrollbar surfaces or rectangle selection)
//! - Ctrl/Cmd held at release (toggle instead of replace)
//! - Scroll wheel
//! - Arrow, page, Home and End keys while the pointer is over the list

use catlist::{CategoryListController, ListKey, ListUpdate, MarkCommand};
use eframe::egui;

/// Result of list input handling
#[derive(Debug, PartialEq)]
pub enum ListInputResult {
    /// No interaction occurred
    None,
    /// Overlay or hover state changed
    Redraw,
    /// The scroll offset changed
    Scrolled(usize),
    /// A rectangle selection finished with mark commands
    Marked(Vec<MarkCommand>),
}

impl ListInputResult {
    /// Folds a controller update into the result; marks take priority over scrolling.
    fn absorb(self, update: ListUpdate) -> Self {
        match (self, update) {
            (result @ ListInputResult::Marked(_), _) => result,
            (_, ListUpdate::OffsetChanged(offset)) => ListInputResult::Scrolled(offset),
            (result @ ListInputResult::Scrolled(_), _) => result,
            (_, ListUpdate::Redraw) => ListInputResult::Redraw,
            (result, ListUpdate::None) => result,
        }
    }
}

const KEY_BINDINGS: [(egui::Key, ListKey); 6] = [
    (egui::Key::ArrowUp, ListKey::Up),
    (egui::Key::ArrowDown, ListKey::Down),
    (egui::Key::PageUp, ListKey::PageUp),
    (egui::Key::PageDown, ListKey::PageDown),
    (egui::Key::Home, ListKey::Home),
    (egui::Key::End, ListKey::End),
];

/// Handles all list input events for one frame.
///
/// # Arguments
/// * `ctx` - The egui context for input access
/// * `list_rect` - Screen rect of the list area, the origin of list coordinates
/// * `response` - Response of the list area allocation
/// * `list` - The list controller to drive
///
/// # Returns
/// The combined result of this frame's input
pub fn handle_list_input(
    ctx: &egui::Context,
    list_rect: egui::Rect,
    response: &egui::Response,
    list: &mut CategoryListController,
) -> ListInputResult {
    let to_local = |pos: egui::Pos2| (pos - list_rect.min).to_pos2();
    let hovered = response.hovered();
    let mut result = ListInputResult::None.absorb(list.set_hovered(hovered));

    let (pressed, down, released, pointer, delta, modifier, wheel) = ctx.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
            i.pointer.delta(),
            i.modifiers.ctrl || i.modifiers.command,
            i.raw_scroll_delta.y,
        )
    });

    if let Some(pos) = pointer {
        let local = to_local(pos);
        if pressed && hovered {
            result = result.absorb(list.pointer_down(local));
        } else if down && delta != egui::Vec2::ZERO {
            result = result.absorb(list.pointer_move(local));
        }
        if released {
            let (update, commands) = list.pointer_up(local, modifier);
            result = result.absorb(update);
            if !commands.is_empty() {
                result = ListInputResult::Marked(commands);
            }
        }
    }

    if hovered && wheel != 0.0 {
        // egui reports positive deltas when scrolling up
        result = result.absorb(list.on_wheel(-wheel));
    }

    let keyboard_free = ctx.memory(|m| m.focused().is_none());
    if hovered && keyboard_free {
        for (key, list_key) in KEY_BINDINGS {
            if ctx.input(|i| i.key_pressed(key)) {
                result = result.absorb(list.on_key(list_key));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use catlist::MarkingMode;

    #[test]
    fn test_marks_take_priority() {
        let marked = ListInputResult::Marked(vec![MarkCommand { node: 1, mode: MarkingMode::Replace }]);
        assert!(matches!(marked.absorb(ListUpdate::OffsetChanged(3)), ListInputResult::Marked(_)));
    }

    #[test]
    fn test_scroll_survives_redraw() {
        let result = ListInputResult::None
            .absorb(ListUpdate::OffsetChanged(4))
            .absorb(ListUpdate::Redraw)
            .absorb(ListUpdate::None);
        assert_eq!(result, ListInputResult::Scrolled(4));
    }

    #[test]
    fn test_redraw_over_none() {
        assert_eq!(ListInputResult::None.absorb(ListUpdate::Redraw), ListInputResult::Redraw);
        assert_eq!(ListInputResult::None.absorb(ListUpdate::None), ListInputResult::None);
    }
}
