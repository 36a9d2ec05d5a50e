//! Scenario files: a placement request paired with the document it runs in.
//!
//! Files are JSON5 so fixtures can carry comments. A file holds either one
//! scenario or an array of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::DocumentMetrics;
use crate::placement::PositionRequest;

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("no scenarios found in input")]
    Empty,

    #[error("{scenario}: {field} must be a finite number")]
    NonFinite {
        scenario: String,
        field: &'static str,
    },

    #[error("{scenario}: {field} must not be negative")]
    Negative {
        scenario: String,
        field: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub request: PositionRequest,
    pub document: DocumentMetrics,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioInput {
    Many(Vec<Scenario>),
    One(Box<Scenario>),
}

impl Scenario {
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("scenario {}", index + 1))
    }

    /// Rejects values the placement engine assumes never occur.
    pub fn validate(&self, index: usize) -> Result<(), ScenarioError> {
        let label = self.label(index);
        let request = &self.request;
        let document = &self.document;

        let mut finite: Vec<(&'static str, f32)> = vec![
            ("popupSize.width", request.popup_size.width),
            ("popupSize.height", request.popup_size.height),
            ("cursorClearance.top", request.cursor_clearance.top),
            ("cursorClearance.bottom", request.cursor_clearance.bottom),
            ("cursorClearance.left", request.cursor_clearance.left),
            ("cursorClearance.right", request.cursor_clearance.right),
            ("safeArea.top", request.safe_area.top),
            ("safeArea.bottom", request.safe_area.bottom),
            ("safeArea.left", request.safe_area.left),
            ("safeArea.right", request.safe_area.right),
            ("document.clientWidth", document.client_width),
            ("document.clientHeight", document.client_height),
            ("document.scrollX", document.scroll_x),
            ("document.scrollY", document.scroll_y),
        ];
        if let Some(pos) = request.mouse_pos {
            finite.push(("mousePos.x", pos.x));
            finite.push(("mousePos.y", pos.y));
        }
        for (field, value) in [
            ("document.bodyClientHeight", document.body_client_height),
            ("document.innerHeight", document.inner_height),
            ("document.scrollHeight", document.scroll_height),
        ] {
            if let Some(value) = value {
                finite.push((field, value));
            }
        }
        if let Some(&(field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ScenarioError::NonFinite {
                scenario: label,
                field,
            });
        }

        let non_negative = [
            ("popupSize.width", request.popup_size.width),
            ("popupSize.height", request.popup_size.height),
            ("cursorClearance.top", request.cursor_clearance.top),
            ("cursorClearance.bottom", request.cursor_clearance.bottom),
            ("cursorClearance.left", request.cursor_clearance.left),
            ("cursorClearance.right", request.cursor_clearance.right),
            ("document.clientWidth", document.client_width),
            ("document.clientHeight", document.client_height),
        ];
        if let Some(&(field, _)) = non_negative.iter().find(|(_, value)| *value < 0.0) {
            return Err(ScenarioError::Negative {
                scenario: label,
                field,
            });
        }
        Ok(())
    }
}

pub fn parse_scenarios(input: &str) -> Result<Vec<Scenario>, ScenarioError> {
    let parsed: ScenarioInput =
        json5::from_str(input).map_err(|err| ScenarioError::Parse(err.to_string()))?;
    let scenarios = match parsed {
        ScenarioInput::Many(list) => list,
        ScenarioInput::One(scenario) => vec![*scenario],
    };
    if scenarios.is_empty() {
        return Err(ScenarioError::Empty);
    }
    for (idx, scenario) in scenarios.iter().enumerate() {
        scenario.validate(idx)?;
    }
    Ok(scenarios)
}
