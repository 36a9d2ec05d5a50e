use crate::geometry::{MarginBox, Point, PopupSize, SafeArea};
use crate::placement::{Placement, PopupPosition, Strategy};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDump {
    pub name: Option<String>,
    pub position: PopupPosition,
    pub strategy: Strategy,
    pub side: Option<String>,
    pub stage: StageDump,
    pub pointer: Point,
    pub clearance: MarginBox,
    pub popup_size: PopupSize,
    pub candidates: Vec<CandidateDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageDump {
    pub width: f32,
    pub height: f32,
    pub scroll: Point,
    pub safe_area: SafeArea,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDump {
    pub side: String,
    pub feasible: bool,
    pub block_direction: bool,
    pub chosen: bool,
    /// Viewport-local position, as compared by the selector.
    pub position: Option<PopupPosition>,
    pub effective_size: Option<PopupSize>,
}

impl PlacementDump {
    pub fn from_placement(placement: &Placement, name: Option<String>) -> Self {
        let chosen_side = placement.strategy.side();
        let candidates = placement
            .candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| CandidateDump {
                side: candidate.side.name().to_string(),
                feasible: candidate.position.is_some(),
                block_direction: idx < 2,
                chosen: chosen_side == Some(candidate.side),
                position: candidate.position,
                effective_size: candidate
                    .position
                    .map(|position| position.effective_size(placement.popup_size)),
            })
            .collect();

        Self {
            name,
            position: placement.position,
            strategy: placement.strategy,
            side: chosen_side.map(|side| side.name().to_string()),
            stage: StageDump {
                width: placement.stage.width,
                height: placement.stage.height,
                scroll: placement.stage.scroll,
                safe_area: placement.stage.safe_area,
            },
            pointer: placement.pointer,
            clearance: placement.clearance,
            popup_size: placement.popup_size,
            candidates,
        }
    }
}

pub fn write_placement_dump(path: &Path, dumps: &[PlacementDump]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dumps)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlacementConfig;
    use crate::document::DocumentMetrics;
    use crate::placement::{PositionRequest, compute_popup_placement};

    #[test]
    fn dump_marks_the_chosen_candidate() {
        let request = PositionRequest::new(PopupSize::new(300.0, 200.0)).at(500.0, 750.0);
        let placement = compute_popup_placement(
            &request,
            &DocumentMetrics::new(1000.0, 800.0),
            &PlacementConfig::default(),
        );
        let dump = PlacementDump::from_placement(&placement, Some("near-bottom".to_string()));
        assert_eq!(dump.side.as_deref(), Some("above"));
        let chosen: Vec<_> = dump.candidates.iter().filter(|c| c.chosen).collect();
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].side, "above");
        assert!(chosen[0].block_direction);
        assert_eq!(
            dump.candidates[0].effective_size,
            Some(PopupSize::new(300.0, 20.0))
        );

        let json = serde_json::to_value(&dump).expect("dump serializes");
        assert_eq!(json["strategy"]["kind"], "blockDirection");
        assert_eq!(json["position"]["constrainHeight"], serde_json::Value::Null);
    }
}
