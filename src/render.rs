use crate::config::RenderConfig;
use crate::geometry::{Point, Rect};
use crate::placement::{Placement, PositionMode, Strategy};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Draws a placement in viewport coordinates: the stage, its safe area, the
/// pointer clearance, every feasible candidate and the chosen rectangle.
pub fn render_svg(placement: &Placement, theme: &Theme) -> String {
    let mut svg = String::new();
    let stage = &placement.stage;
    let width = stage.width.max(1.0);
    let height = stage.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
        theme.background, theme.stage_stroke
    ));

    let safe = stage.safe_area.rect();
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-dasharray=\"6 4\" stroke-width=\"1\"/>",
        safe.x,
        safe.y,
        safe.width.max(0.0),
        safe.height.max(0.0),
        theme.safe_area_fill,
        theme.safe_area_stroke
    ));

    for candidate in &placement.candidates {
        let Some(position) = candidate.position else {
            continue;
        };
        let rect = position.rect(placement.popup_size);
        svg.push_str(&rect_svg(&rect, "none", &theme.candidate_stroke, Some("3 3")));
        svg.push_str(&label_svg(rect.x + 4.0, rect.y + theme.font_size + 2.0, candidate.side.name(), theme));
    }

    let clearance = Rect::around(placement.pointer, &placement.clearance);
    svg.push_str(&rect_svg(&clearance, &theme.clearance_fill, "none", None));
    let (px, py) = (placement.pointer.x, placement.pointer.y);
    svg.push_str(&format!(
        "<path d=\"M {:.2} {py:.2} L {:.2} {py:.2} M {px:.2} {:.2} L {px:.2} {:.2}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
        px - 6.0,
        px + 6.0,
        py - 6.0,
        py + 6.0,
        theme.pointer_color
    ));

    let chosen = placement
        .position
        .translate(Point::new(-stage.scroll.x, -stage.scroll.y))
        .rect(placement.popup_size);
    svg.push_str(&rect_svg(&chosen, &theme.chosen_fill, &theme.chosen_stroke, None));
    let caption = match placement.strategy.side() {
        Some(side) => format!("{} ({})", side.name(), strategy_name(placement)),
        None => strategy_name(placement).to_string(),
    };
    svg.push_str(&label_svg(
        chosen.x + 4.0,
        chosen.bottom() - 4.0,
        &caption,
        theme,
    ));

    svg.push_str("</svg>");
    svg
}

fn strategy_name(placement: &Placement) -> &'static str {
    match placement.strategy {
        Strategy::Fixed {
            mode: PositionMode::TopLeft,
        } => "top-left",
        Strategy::Fixed {
            mode: PositionMode::BottomRight,
        } => "bottom-right",
        Strategy::Fixed {
            mode: PositionMode::Auto,
        } => "auto",
        Strategy::BlockDirection { .. } => "block direction",
        Strategy::BestFit { .. } => "best fit",
        Strategy::LastResort => "last resort",
    }
}

fn rect_svg(rect: &Rect, fill: &str, stroke: &str, dash: Option<&str>) -> String {
    let dash = dash
        .map(|pattern| format!(" stroke-dasharray=\"{pattern}\""))
        .unwrap_or_default();
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.2\"{dash}/>",
        rect.x,
        rect.y,
        rect.width.max(0.0),
        rect.height.max(0.0),
        fill,
        stroke
    )
}

fn label_svg(x: f32, y: f32, text: &str, theme: &Theme) -> String {
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color,
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let width = render_cfg.width.round().max(1.0);
    let height = render_cfg.height.round().max(1.0);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width as u32, height as u32)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    // The SVG carries the stage size; stretch it onto the requested canvas.
    let transform = resvg::tiny_skia::Transform::from_scale(
        width / tree.size().width(),
        height / tree.size().height(),
    );
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, transform, &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the 'png' feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
