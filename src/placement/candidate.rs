// Directional candidates. Above/below and left/right are the same algorithm
// run along different axes, so a single generator handles all four sides.

use serde::{Deserialize, Serialize};

use super::{PointerType, PopupPosition};
use crate::geometry::{MarginBox, Point, PopupSize, SafeArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Above,
    Below,
    Left,
    Right,
}

impl Side {
    pub fn axis(self) -> Axis {
        match self {
            Side::Above | Side::Below => Axis::Vertical,
            Side::Left | Side::Right => Axis::Horizontal,
        }
    }

    /// True when the popup sits on the low-coordinate side of the pointer.
    fn leads(self) -> bool {
        matches!(self, Side::Above | Side::Left)
    }

    fn clearance(self, clearance: &MarginBox) -> f32 {
        match self {
            Side::Above => clearance.top,
            Side::Below => clearance.bottom,
            Side::Left => clearance.left,
            Side::Right => clearance.right,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Above => "above",
            Side::Below => "below",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    fn coord(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    fn length(self, size: PopupSize) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    fn bounds(self, safe_area: &SafeArea) -> (f32, f32) {
        match self {
            Axis::Horizontal => (safe_area.left, safe_area.right),
            Axis::Vertical => (safe_area.top, safe_area.bottom),
        }
    }
}

/// Start coordinate and optional clamp along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    start: f32,
    constraint: Option<f32>,
}

impl Extent {
    fn new(start: f32, size: f32, limit: f32) -> Self {
        Self {
            start,
            constraint: (start + size > limit).then(|| limit - start),
        }
    }
}

/// Inputs shared by every directional candidate, in viewport coordinates.
#[derive(Debug, Clone)]
pub(crate) struct CandidateContext<'a> {
    pub clearance: &'a MarginBox,
    pub popup_size: PopupSize,
    pub safe_area: SafeArea,
    pub target: Point,
    pub pointer_type: PointerType,
    pub margin_to_popup: f32,
    pub scroll: Point,
    pub page_scroll_limit: Option<f32>,
}

impl CandidateContext<'_> {
    /// Viewport-local layout on `side` of the pointer, or `None` when there is
    /// no room at all in that direction.
    pub fn generate(&self, side: Side) -> Option<PopupPosition> {
        let axis = side.axis();
        if axis == Axis::Horizontal && self.safe_area.height() <= 0.0 {
            return None;
        }

        let mut main = self.main_extent(side)?;
        let mut cross = self.cross_extent(axis.cross());

        match (side, self.pointer_type) {
            // The user can scroll the page to see the rest without dismissing
            // the popup. Never relaxed above the pointer, where the overflow
            // would cover it.
            (Side::Below, PointerType::Cursor) => {
                if main.constraint.is_some() && self.page_can_reveal(main.start) {
                    main.constraint = None;
                }
            }
            (Side::Left | Side::Right, PointerType::Cursor) => cross.constraint = None,
            _ => {}
        }

        Some(match axis {
            Axis::Vertical => PopupPosition {
                x: cross.start,
                y: main.start,
                constrain_width: cross.constraint,
                constrain_height: main.constraint,
            },
            Axis::Horizontal => PopupPosition {
                x: main.start,
                y: cross.start,
                constrain_width: main.constraint,
                constrain_height: cross.constraint,
            },
        })
    }

    fn main_extent(&self, side: Side) -> Option<Extent> {
        let axis = side.axis();
        let size = axis.length(self.popup_size);
        let target = axis.coord(self.target);
        let (safe_start, safe_end) = axis.bounds(&self.safe_area);
        let gap = side.clearance(self.clearance) + self.margin_to_popup;

        if side.leads() {
            let limit = target - gap;
            let start = safe_start.max(limit - size);
            if start >= limit {
                return None;
            }
            Some(Extent::new(start, size, limit))
        } else {
            let start = target + gap;
            if start >= safe_end {
                return None;
            }
            Some(Extent::new(start, size, safe_end))
        }
    }

    /// Aligns the popup's leading edge with the pointer, sliding it back
    /// inside the safe area if it would overflow the far edge.
    fn cross_extent(&self, axis: Axis) -> Extent {
        let size = axis.length(self.popup_size);
        let ideal = axis.coord(self.target);
        let (safe_start, safe_end) = axis.bounds(&self.safe_area);
        let start = if ideal + size > safe_end {
            safe_start.max(safe_end - size)
        } else {
            ideal
        };
        Extent::new(start, size, safe_end)
    }

    fn page_can_reveal(&self, top: f32) -> bool {
        self.page_scroll_limit
            .is_some_and(|limit| self.scroll.y + top + self.popup_size.height < limit)
    }
}
