#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod geometry;
pub mod placement;
pub mod placement_dump;
pub mod render;
pub mod scenario;
pub mod stage;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PlacementConfig, load_config};
pub use document::{DocumentEnv, DocumentMetrics, Overflow, ScrollElement};
pub use geometry::{MarginBox, PaddingBox, Point, PopupSize, SafeArea};
pub use placement::{
    Placement, PointerType, PopupPosition, PositionMode, PositionRequest, Side, Strategy,
    compute_popup_placement, compute_popup_position,
};
pub use render::render_svg;
pub use scenario::{Scenario, ScenarioError, parse_scenarios};
pub use stage::Stage;
pub use theme::Theme;
