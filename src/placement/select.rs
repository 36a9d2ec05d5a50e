use std::cmp::Ordering;

use super::candidate::Side;
use super::{Candidate, PopupPosition};
use crate::geometry::PopupSize;

/// How a candidate won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pick {
    /// Accepted from the block-direction pair.
    Block,
    /// Largest remaining candidate.
    BestFit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Selection {
    pub side: Side,
    pub position: PopupPosition,
    pub pick: Pick,
}

/// Chooses among `candidates`, which must be in preference order.
///
/// Returns `None` only when every candidate is infeasible.
pub(crate) fn select_layout(
    candidates: &[Candidate],
    is_vertical_text: bool,
    popup_size: PopupSize,
    safe_bottom: f32,
) -> Option<Selection> {
    let block = candidates.iter().take(2).find_map(|candidate| {
        let position = candidate.position?;
        accepts_block_layout(&position, is_vertical_text, popup_size, safe_bottom).then_some(
            Selection {
                side: candidate.side,
                position,
                pick: Pick::Block,
            },
        )
    });
    if block.is_some() {
        return block;
    }

    candidates
        .iter()
        .filter_map(|candidate| candidate.position.map(|position| (candidate.side, position)))
        .min_by(|(_, a), (_, b)| compare_size(a, b, popup_size))
        .map(|(side, position)| Selection {
            side,
            position,
            pick: Pick::BestFit,
        })
}

fn accepts_block_layout(
    position: &PopupPosition,
    is_vertical_text: bool,
    popup_size: PopupSize,
    safe_bottom: f32,
) -> bool {
    // Vertical text is laid out in columns, so a full width matters most.
    if is_vertical_text {
        return position.constrain_width.is_none();
    }
    // An unclamped popup may still run past the bottom when the page can be
    // scrolled; only accept one that is fully visible as is.
    position.constrain_height.is_none() && position.y + popup_size.height < safe_bottom
}

/// Orders `a` before `b` when it is wider, or equally wide with more area.
///
/// Losing a few rows at the bottom is tolerable; clipping every entry on the
/// right is not.
fn compare_size(a: &PopupPosition, b: &PopupPosition, popup_size: PopupSize) -> Ordering {
    let size_a = a.effective_size(popup_size);
    let size_b = b.effective_size(popup_size);
    size_b
        .width
        .total_cmp(&size_a.width)
        .then_with(|| area(size_b).total_cmp(&area(size_a)))
}

fn area(size: PopupSize) -> f32 {
    size.width * size.height
}
