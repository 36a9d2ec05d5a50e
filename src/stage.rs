use serde::Serialize;

use crate::config::PlacementConfig;
use crate::document::DocumentEnv;
use crate::geometry::{PaddingBox, Point, SafeArea};

/// The visible viewport the popup is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub width: f32,
    pub height: f32,
    /// Caller inset merged with the gutter.
    pub insets: PaddingBox,
    pub safe_area: SafeArea,
    pub scroll: Point,
}

impl Stage {
    pub fn compose(env: &impl DocumentEnv, padding: &PaddingBox, config: &PlacementConfig) -> Self {
        let width = env.client_width();
        let height = stage_height(env, padding);
        let insets = padding.inflate(config.gutter);
        Self {
            width,
            height,
            insets,
            safe_area: SafeArea {
                left: insets.left,
                right: width - insets.right,
                top: insets.top,
                bottom: height - insets.bottom,
            },
            scroll: env.scroll_offset(),
        }
    }

    /// Vertical space between the safe top and bottom.
    pub fn available_height(&self) -> f32 {
        self.safe_area.height()
    }

    pub fn to_page(&self, point: Point) -> Point {
        Point::new(point.x + self.scroll.x, point.y + self.scroll.y)
    }
}

fn stage_height(env: &impl DocumentEnv, padding: &PaddingBox) -> f32 {
    // Safe-area insets are measured against the full window on some mobile
    // browsers, so a vertical inset switches to the inner height.
    if padding.has_vertical_inset() {
        return env.inner_height();
    }
    if env.is_quirks_mode() {
        return env
            .body_client_height()
            .filter(|height| *height > 0.0)
            .unwrap_or_else(|| env.inner_height());
    }
    env.client_height()
}
