//! Popup placement.
//!
//! [`compute_popup_placement`] composes the stage, then either pins the popup
//! to a corner or tries the four sides of the pointer in preference order,
//! falling back to the largest candidate and finally to the safe top-left.

mod candidate;
mod fixed;
mod preference;
mod select;

pub use candidate::{Axis, Side};
pub use fixed::fixed_position;
pub use preference::preference_order;

use candidate::CandidateContext;
use select::{Pick, select_layout};
use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;
use crate::document::{DocumentEnv, page_scroll_limit};
use crate::geometry::{MarginBox, PaddingBox, Point, PopupSize, Rect};
use crate::stage::Stage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionMode {
    TopLeft,
    #[default]
    Auto,
    BottomRight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    /// Mouse cursor.
    #[default]
    Cursor,
    /// Synthetic touch/pen indicator.
    Puck,
}

/// Final popup position in page coordinates.
///
/// A `None` constraint means the popup renders at its natural size on that
/// axis; `Some(extent)` asks the caller to shrink or clip it to `extent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupPosition {
    pub x: f32,
    pub y: f32,
    pub constrain_width: Option<f32>,
    pub constrain_height: Option<f32>,
}

impl PopupPosition {
    pub fn at(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            constrain_width: None,
            constrain_height: None,
        }
    }

    pub fn effective_size(&self, natural: PopupSize) -> PopupSize {
        PopupSize {
            width: self.constrain_width.unwrap_or(natural.width),
            height: self.constrain_height.unwrap_or(natural.height),
        }
    }

    pub fn rect(&self, natural: PopupSize) -> Rect {
        let size = self.effective_size(natural);
        Rect::new(self.x, self.y, size.width, size.height)
    }

    pub fn translate(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRequest {
    #[serde(default)]
    pub cursor_clearance: MarginBox,
    #[serde(default)]
    pub is_vertical_text: bool,
    /// Pointer location in viewport coordinates.
    #[serde(default)]
    pub mouse_pos: Option<Point>,
    pub popup_size: PopupSize,
    #[serde(default)]
    pub position_mode: PositionMode,
    /// Caller insets; the gutter is added on top.
    #[serde(default)]
    pub safe_area: PaddingBox,
    #[serde(default)]
    pub pointer_type: PointerType,
}

impl PositionRequest {
    pub fn new(popup_size: PopupSize) -> Self {
        Self {
            cursor_clearance: MarginBox::default(),
            is_vertical_text: false,
            mouse_pos: None,
            popup_size,
            position_mode: PositionMode::Auto,
            safe_area: PaddingBox::default(),
            pointer_type: PointerType::Cursor,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.mouse_pos = Some(Point::new(x, y));
        self
    }

    /// Pointer location used by auto placement; a missing pointer sits at
    /// the viewport origin.
    pub fn target(&self) -> Point {
        self.mouse_pos.unwrap_or(Point::ORIGIN)
    }
}

/// A directional candidate in viewport coordinates; `position` is `None`
/// when there is no room on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub side: Side,
    pub position: Option<PopupPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Strategy {
    Fixed { mode: PositionMode },
    BlockDirection { side: Side },
    BestFit { side: Side },
    LastResort,
}

impl Strategy {
    pub fn side(&self) -> Option<Side> {
        match self {
            Strategy::BlockDirection { side } | Strategy::BestFit { side } => Some(*side),
            Strategy::Fixed { .. } | Strategy::LastResort => None,
        }
    }
}

/// Result of one placement, with everything that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub position: PopupPosition,
    pub strategy: Strategy,
    pub stage: Stage,
    /// Candidates in preference order; empty for fixed modes.
    pub candidates: Vec<Candidate>,
    pub popup_size: PopupSize,
    pub pointer: Point,
    pub clearance: MarginBox,
}

pub fn compute_popup_position(
    request: &PositionRequest,
    env: &impl DocumentEnv,
    config: &PlacementConfig,
) -> PopupPosition {
    compute_popup_placement(request, env, config).position
}

/// Places the popup and records how the position was chosen.
///
/// Every returned coordinate is in page space, including the last-resort
/// anchor: when no side fits, the result is the safe area's top-left corner
/// plus the scroll offset, not the bare viewport-local `(safeLeft, safeTop)`.
pub fn compute_popup_placement(
    request: &PositionRequest,
    env: &impl DocumentEnv,
    config: &PlacementConfig,
) -> Placement {
    let stage = Stage::compose(env, &request.safe_area, config);
    let mut placement = Placement {
        position: PopupPosition::at(stage.to_page(Point::new(
            stage.safe_area.left,
            stage.safe_area.top,
        ))),
        strategy: Strategy::LastResort,
        stage,
        candidates: Vec::new(),
        popup_size: request.popup_size,
        pointer: request.target(),
        clearance: request.cursor_clearance,
    };

    if let Some(position) = fixed_position(request.position_mode, &stage, request.popup_size) {
        placement.position = position;
        placement.strategy = Strategy::Fixed {
            mode: request.position_mode,
        };
        return placement;
    }

    let context = CandidateContext {
        clearance: &request.cursor_clearance,
        popup_size: request.popup_size,
        safe_area: stage.safe_area,
        target: request.target(),
        pointer_type: request.pointer_type,
        margin_to_popup: config.margin_to_popup,
        scroll: stage.scroll,
        page_scroll_limit: page_scroll_limit(env),
    };
    placement.candidates = preference_order(request.is_vertical_text, request.pointer_type)
        .into_iter()
        .map(|side| {
            let position = context.generate(side);
            tracing::trace!(side = side.name(), ?position, "generated candidate");
            Candidate { side, position }
        })
        .collect();

    match select_layout(
        &placement.candidates,
        request.is_vertical_text,
        request.popup_size,
        stage.safe_area.bottom,
    ) {
        Some(selection) => {
            placement.position = selection.position.translate(stage.scroll);
            placement.strategy = match selection.pick {
                Pick::Block => Strategy::BlockDirection {
                    side: selection.side,
                },
                Pick::BestFit => Strategy::BestFit {
                    side: selection.side,
                },
            };
            tracing::debug!(
                side = selection.side.name(),
                pick = ?selection.pick,
                "placed popup"
            );
        }
        None => {
            tracing::debug!("no side has room; pinning popup to the safe top-left");
        }
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentMetrics, Overflow};

    fn place(request: &PositionRequest, metrics: &DocumentMetrics) -> Placement {
        compute_popup_placement(request, metrics, &PlacementConfig::default())
    }

    fn popup(width: f32, height: f32) -> PositionRequest {
        PositionRequest::new(PopupSize::new(width, height))
    }

    fn assert_inside_safe_area(placement: &Placement) {
        let safe = placement.stage.safe_area.rect().translate(placement.stage.scroll);
        let rect = placement.position.rect(placement.popup_size);
        assert!(safe.contains(&rect), "{rect:?} escapes {safe:?}");
    }

    #[test]
    fn places_below_the_pointer_when_there_is_room() {
        let placement = place(&popup(300.0, 200.0).at(500.0, 400.0), &DocumentMetrics::new(1000.0, 800.0));
        assert_eq!(placement.strategy, Strategy::BlockDirection { side: Side::Below });
        assert_eq!(placement.position, PopupPosition::at(Point::new(500.0, 425.0)));
        assert_inside_safe_area(&placement);
    }

    #[test]
    fn caller_insets_shrink_the_safe_area() {
        let mut request = popup(300.0, 200.0).at(500.0, 400.0);
        request.safe_area = PaddingBox::uniform(5.0);
        let placement = place(&request, &DocumentMetrics::new(1000.0, 800.0));
        assert_eq!(placement.stage.safe_area.bottom, 790.0);
        assert_eq!(placement.position.y, 425.0);
        assert_eq!(placement.position.constrain_height, None);
    }

    #[test]
    fn falls_back_to_above_near_the_bottom() {
        let metrics = DocumentMetrics::new(1000.0, 800.0);
        let placement = place(&popup(300.0, 200.0).at(500.0, 750.0), &metrics);
        assert_eq!(placement.strategy, Strategy::BlockDirection { side: Side::Above });
        assert_eq!(placement.position, PopupPosition::at(Point::new(500.0, 525.0)));

        // Even a scrollable page doesn't make a popup running off-screen the
        // preferred block layout.
        let scrollable = metrics.with_scroll_height(4000.0);
        let placement = place(&popup(300.0, 200.0).at(500.0, 750.0), &scrollable);
        assert_eq!(placement.strategy, Strategy::BlockDirection { side: Side::Above });
    }

    #[test]
    fn result_is_in_page_coordinates() {
        let metrics = DocumentMetrics::new(1000.0, 800.0).with_scroll(30.0, 1500.0);
        let placement = place(&popup(300.0, 200.0).at(500.0, 400.0), &metrics);
        assert_eq!(placement.position, PopupPosition::at(Point::new(530.0, 1925.0)));
        let local = placement.candidates[0].position.expect("below candidate");
        assert_eq!(local.y, 425.0);
    }

    #[test]
    fn puck_prefers_above() {
        let mut request = popup(300.0, 200.0).at(500.0, 400.0);
        request.pointer_type = PointerType::Puck;
        let placement = place(&request, &DocumentMetrics::new(1000.0, 800.0));
        assert_eq!(placement.strategy, Strategy::BlockDirection { side: Side::Above });
        assert_eq!(placement.position, PopupPosition::at(Point::new(500.0, 175.0)));
    }

    #[test]
    fn vertical_text_prefers_an_unconstrained_side() {
        let mut request = popup(300.0, 200.0).at(900.0, 400.0);
        request.is_vertical_text = true;
        let placement = place(&request, &DocumentMetrics::new(1000.0, 800.0));
        assert_eq!(placement.strategy, Strategy::BlockDirection { side: Side::Left });
        assert_eq!(placement.position, PopupPosition::at(Point::new(575.0, 400.0)));
    }

    #[test]
    fn vertical_text_falls_back_to_the_widest_candidate() {
        let mut request = popup(600.0, 200.0).at(500.0, 400.0);
        request.is_vertical_text = true;
        let placement = place(&request, &DocumentMetrics::new(1000.0, 800.0));
        assert_eq!(placement.strategy, Strategy::BestFit { side: Side::Below });
        assert_eq!(placement.position, PopupPosition::at(Point::new(395.0, 425.0)));
    }

    #[test]
    fn pointer_type_only_changes_vertical_order() {
        // Both vertical candidates are clamped to the same size, so the
        // best-fit outcome only depends on which one is tried first.
        let metrics = DocumentMetrics::new(1000.0, 800.0);
        let mut request = popup(1200.0, 500.0).at(500.0, 400.0);
        let cursor = place(&request, &metrics);
        request.pointer_type = PointerType::Puck;
        let puck = place(&request, &metrics);
        assert_eq!(cursor.strategy, Strategy::BestFit { side: Side::Below });
        assert_eq!(puck.strategy, Strategy::BestFit { side: Side::Above });
        assert_eq!(cursor.position.constrain_width, puck.position.constrain_width);
    }

    #[test]
    fn every_side_blocked_pins_to_safe_top_left() {
        let mut request = popup(300.0, 200.0).at(500.0, 400.0);
        request.cursor_clearance = MarginBox::uniform(500.0);
        let placement = place(&request, &DocumentMetrics::new(1000.0, 800.0));
        assert_eq!(placement.strategy, Strategy::LastResort);
        assert_eq!(placement.position, PopupPosition::at(Point::new(5.0, 5.0)));
        assert!(placement.candidates.iter().all(|c| c.position.is_none()));
    }

    #[test]
    fn last_resort_is_scroll_adjusted() {
        let metrics = DocumentMetrics::new(40.0, 40.0).with_scroll(100.0, 200.0);
        let placement = place(&popup(300.0, 200.0).at(20.0, 20.0), &metrics);
        assert_eq!(placement.strategy, Strategy::LastResort);
        assert_eq!(placement.position, PopupPosition::at(Point::new(105.0, 205.0)));
    }

    #[test]
    fn fixed_modes_ignore_the_pointer() {
        let metrics = DocumentMetrics::new(1000.0, 800.0);
        let mut request = popup(300.0, 200.0).at(500.0, 400.0);
        request.position_mode = PositionMode::TopLeft;
        let placement = place(&request, &metrics);
        assert_eq!(placement.position, PopupPosition::at(Point::new(5.0, 5.0)));
        assert!(placement.candidates.is_empty());

        request.mouse_pos = None;
        request.position_mode = PositionMode::BottomRight;
        let placement = place(&request, &metrics);
        assert_eq!(placement.position, PopupPosition::at(Point::new(695.0, 595.0)));
    }

    #[test]
    fn missing_pointer_uses_the_origin() {
        let placement = place(&popup(300.0, 200.0), &DocumentMetrics::new(1000.0, 800.0));
        assert_eq!(placement.pointer, Point::ORIGIN);
        assert_eq!(placement.strategy, Strategy::BlockDirection { side: Side::Below });
        assert_eq!(placement.position, PopupPosition::at(Point::new(0.0, 25.0)));
    }

    #[test]
    fn clipped_body_keeps_the_below_clamp() {
        let mut metrics = DocumentMetrics::new(1000.0, 800.0).with_scroll_height(5000.0);
        metrics.body_overflow_y = Overflow::Hidden;
        let placement = place(&popup(300.0, 200.0).at(500.0, 700.0), &metrics);
        let below = placement
            .candidates
            .iter()
            .find(|c| c.side == Side::Below)
            .and_then(|c| c.position)
            .expect("below candidate");
        assert_eq!(below.constrain_height, Some(70.0));
    }

    #[test]
    fn accepted_block_layouts_stay_inside_the_safe_area() {
        let metrics = DocumentMetrics::new(1280.0, 720.0).with_scroll(0.0, 300.0);
        for vertical in [false, true] {
            for pointer_type in [PointerType::Cursor, PointerType::Puck] {
                for x in (40..1280).step_by(160) {
                    for y in (45..720).step_by(90) {
                        let mut request = popup(360.0, 240.0).at(x as f32, y as f32);
                        request.is_vertical_text = vertical;
                        request.pointer_type = pointer_type;
                        request.cursor_clearance = MarginBox {
                            top: 4.0,
                            bottom: 20.0,
                            left: 2.0,
                            right: 12.0,
                        };
                        let placement = place(&request, &metrics);
                        if !matches!(placement.strategy, Strategy::BlockDirection { .. }) {
                            continue;
                        }
                        let side = placement.strategy.side().expect("block side");
                        // Cursor side placements may run past the bottom.
                        if vertical && pointer_type == PointerType::Cursor {
                            let safe = placement.stage.safe_area;
                            let local_x = placement.position.x - placement.stage.scroll.x;
                            assert!(local_x >= safe.left, "{side:?} at ({x}, {y})");
                            continue;
                        }
                        assert_inside_safe_area(&placement);
                    }
                }
            }
        }
    }
}
