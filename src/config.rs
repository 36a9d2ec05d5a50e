use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum space between the popup and the edge of the stage.
pub const DEFAULT_GUTTER: f32 = 5.0;
/// Gap between the pointer clearance box and the nearest popup edge.
pub const DEFAULT_MARGIN_TO_POPUP: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementConfig {
    pub gutter: f32,
    pub margin_to_popup: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            gutter: DEFAULT_GUTTER,
            margin_to_popup: DEFAULT_MARGIN_TO_POPUP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub placement: PlacementConfig,
    pub render: RenderConfig,
    pub theme: Theme,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PlacementConfigFile {
    gutter: Option<f32>,
    margin_to_popup: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    stage_stroke: Option<String>,
    safe_area_fill: Option<String>,
    safe_area_stroke: Option<String>,
    clearance_fill: Option<String>,
    pointer_color: Option<String>,
    candidate_stroke: Option<String>,
    chosen_fill: Option<String>,
    chosen_stroke: Option<String>,
    text_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    placement: Option<PlacementConfigFile>,
    render: Option<RenderConfig>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    match parsed.theme.as_deref() {
        Some("dark") => config.theme = Theme::dark(),
        Some("light") | Some("default") | None => {}
        Some(other) => return Err(anyhow::anyhow!("Unknown theme '{other}'")),
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(placement) = parsed.placement {
        if let Some(v) = placement.gutter {
            config.placement.gutter = v;
        }
        if let Some(v) = placement.margin_to_popup {
            config.placement.margin_to_popup = v;
        }
    }

    if let Some(render) = parsed.render {
        config.render = render;
    }

    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.stage_stroke {
        theme.stage_stroke = v;
    }
    if let Some(v) = vars.safe_area_fill {
        theme.safe_area_fill = v;
    }
    if let Some(v) = vars.safe_area_stroke {
        theme.safe_area_stroke = v;
    }
    if let Some(v) = vars.clearance_fill {
        theme.clearance_fill = v;
    }
    if let Some(v) = vars.pointer_color {
        theme.pointer_color = v;
    }
    if let Some(v) = vars.candidate_stroke {
        theme.candidate_stroke = v;
    }
    if let Some(v) = vars.chosen_fill {
        theme.chosen_fill = v;
    }
    if let Some(v) = vars.chosen_stroke {
        theme.chosen_stroke = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
}
