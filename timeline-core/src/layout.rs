//! Left/right placement of cards and images along the central bar.

use serde::{Deserialize, Serialize};

use crate::scroll::SourceMode;

/// Which side of the bar a slot sits on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// What a slot renders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotContent {
    /// Title plus body copy.
    Card,
    /// The entry's image.
    Image,
    /// Deliberate empty space so row heights stay symmetric.
    Empty,
}

/// Desktop placement alternates strictly by parity.
pub fn desktop_side(ordinal_index: usize) -> Side {
    if ordinal_index % 2 == 0 {
        Side::Left
    } else {
        Side::Right
    }
}

/// Placement for the current viewport class: alternating two-column layout
/// on desktop, every card pinned to `mobile_side` on mobile.
pub fn side_for(ordinal_index: usize, mode: SourceMode, mobile_side: Side) -> Side {
    match mode {
        SourceMode::ContainerRelative => desktop_side(ordinal_index),
        SourceMode::WindowGlobal => mobile_side,
    }
}

/// Content for one of the two desktop slots of an entry.
///
/// The slot matching the entry's side carries the card; the opposite slot
/// carries the image when there is one, otherwise it stays empty (not
/// collapsed).
pub fn slot_content(slot: Side, card_side: Side, has_image: bool) -> SlotContent {
    if slot == card_side {
        SlotContent::Card
    } else if has_image {
        SlotContent::Image
    } else {
        SlotContent::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_alternate_by_parity() {
        for index in 0..10 {
            assert_ne!(desktop_side(index), desktop_side(index + 1));
        }
        assert_eq!(desktop_side(0), Side::Left);
        assert_eq!(desktop_side(1), Side::Right);
    }

    #[test]
    fn opposite_slot_prefers_image_over_empty() {
        assert_eq!(slot_content(Side::Left, Side::Left, true), SlotContent::Card);
        assert_eq!(
            slot_content(Side::Right, Side::Left, true),
            SlotContent::Image
        );
        assert_eq!(
            slot_content(Side::Right, Side::Left, false),
            SlotContent::Empty
        );
    }
}
