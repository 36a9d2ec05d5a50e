use super::{PopupPosition, PositionMode};
use crate::geometry::{Point, PopupSize};
use crate::stage::Stage;

/// Pins the popup to a corner of the safe area. Returns `None` for
/// [`PositionMode::Auto`].
///
/// Neither corner emits constraints: a popup taller than the safe area is
/// left for the user to scroll rather than being clipped.
pub fn fixed_position(
    mode: PositionMode,
    stage: &Stage,
    popup_size: PopupSize,
) -> Option<PopupPosition> {
    let safe = &stage.safe_area;
    let local = match mode {
        PositionMode::Auto => return None,
        PositionMode::TopLeft => Point::new(safe.left, safe.top),
        PositionMode::BottomRight => Point::new(
            safe.right - popup_size.width,
            safe.bottom - popup_size.height.min(stage.available_height()),
        ),
    };
    Some(PopupPosition::at(stage.to_page(local)))
}
