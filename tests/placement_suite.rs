use std::path::Path;

use popup_position::{
    PlacementConfig, Point, PopupPosition, PositionMode, Side, Strategy, Theme,
    compute_popup_placement, parse_scenarios, render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn load_fixture(rel: &str) -> Vec<popup_position::Scenario> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    assert!(path.exists(), "fixture missing: {}", rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_scenarios(&input).expect("fixture parse failed")
}

#[test]
fn place_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let expectations: [(&str, Strategy, PopupPosition); 7] = [
        (
            "mouse_center.json5",
            Strategy::BlockDirection { side: Side::Below },
            PopupPosition::at(Point::new(500.0, 425.0)),
        ),
        (
            "near_bottom.json5",
            Strategy::BlockDirection { side: Side::Above },
            PopupPosition::at(Point::new(500.0, 525.0)),
        ),
        (
            "scrolled_page.json5",
            Strategy::BlockDirection { side: Side::Above },
            PopupPosition::at(Point::new(500.0, 1675.0)),
        ),
        (
            "vertical_text.json5",
            Strategy::BlockDirection { side: Side::Left },
            PopupPosition::at(Point::new(575.0, 400.0)),
        ),
        (
            "touch_puck.json5",
            Strategy::BlockDirection { side: Side::Above },
            PopupPosition::at(Point::new(105.0, 185.0)),
        ),
        (
            "all_blocked.json5",
            Strategy::LastResort,
            PopupPosition::at(Point::new(25.0, 65.0)),
        ),
        (
            "fixed_corners.json5",
            Strategy::Fixed {
                mode: PositionMode::TopLeft,
            },
            PopupPosition::at(Point::new(5.0, 5.0)),
        ),
    ];

    for (rel, strategy, position) in expectations {
        let scenarios = load_fixture(rel);
        let scenario = &scenarios[0];
        let placement = compute_popup_placement(
            &scenario.request,
            &scenario.document,
            &PlacementConfig::default(),
        );
        assert_eq!(placement.strategy, strategy, "{rel}: strategy");
        assert_eq!(placement.position, position, "{rel}: position");
        assert_valid_svg(&render_svg(&placement, &Theme::light()), rel);
    }
}

#[test]
fn tall_bottom_right_popup_stays_below_safe_top() {
    let scenarios = load_fixture("fixed_corners.json5");
    assert_eq!(scenarios.len(), 2);
    let scenario = &scenarios[1];
    let placement = compute_popup_placement(
        &scenario.request,
        &scenario.document,
        &PlacementConfig::default(),
    );
    assert_eq!(
        placement.strategy,
        Strategy::Fixed {
            mode: PositionMode::BottomRight
        }
    );
    assert_eq!(placement.position, PopupPosition::at(Point::new(695.0, 5.0)));
}

#[test]
fn scrolled_page_drops_the_below_clamp_but_still_flips() {
    let scenario = load_fixture("scrolled_page.json5").remove(0);
    let placement = compute_popup_placement(
        &scenario.request,
        &scenario.document,
        &PlacementConfig::default(),
    );
    let below = placement
        .candidates
        .iter()
        .find(|candidate| candidate.side == Side::Below)
        .and_then(|candidate| candidate.position)
        .expect("below candidate");
    assert_eq!(below.constrain_height, None);
    assert_eq!(below.y, 725.0);
}

#[test]
fn placement_is_deterministic() {
    let scenario = load_fixture("touch_puck.json5").remove(0);
    let config = PlacementConfig::default();
    let first = compute_popup_placement(&scenario.request, &scenario.document, &config);
    for _ in 0..8 {
        let again = compute_popup_placement(&scenario.request, &scenario.document, &config);
        assert_eq!(again, first);
    }
}

#[test]
fn margin_to_popup_is_configurable() {
    let scenario = load_fixture("mouse_center.json5").remove(0);
    let config = PlacementConfig {
        margin_to_popup: 10.0,
        ..PlacementConfig::default()
    };
    let placement = compute_popup_placement(&scenario.request, &scenario.document, &config);
    assert_eq!(placement.position.y, 410.0);
}
