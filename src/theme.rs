use serde::{Deserialize, Serialize};

/// Palette for the debug rendering of a placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub stage_stroke: String,
    pub safe_area_fill: String,
    pub safe_area_stroke: String,
    pub clearance_fill: String,
    pub pointer_color: String,
    pub candidate_stroke: String,
    pub chosen_fill: String,
    pub chosen_stroke: String,
    pub text_color: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            stage_stroke: "#7A8AA6".to_string(),
            safe_area_fill: "#F7FAFF".to_string(),
            safe_area_stroke: "#C7D2E5".to_string(),
            clearance_fill: "rgba(255, 170, 0, 0.35)".to_string(),
            pointer_color: "#D9480F".to_string(),
            candidate_stroke: "#9AA5B8".to_string(),
            chosen_fill: "rgba(76, 110, 245, 0.18)".to_string(),
            chosen_stroke: "#4C6EF5".to_string(),
            text_color: "#1C2430".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#15181E".to_string(),
            stage_stroke: "#5C6678".to_string(),
            safe_area_fill: "#1D2129".to_string(),
            safe_area_stroke: "#3A4252".to_string(),
            clearance_fill: "rgba(255, 190, 60, 0.30)".to_string(),
            pointer_color: "#FF8A4C".to_string(),
            candidate_stroke: "#6B768A".to_string(),
            chosen_fill: "rgba(116, 143, 252, 0.25)".to_string(),
            chosen_stroke: "#91A7FF".to_string(),
            text_color: "#E4E8F0".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
