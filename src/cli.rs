use crate::config::{Config, load_config};
use crate::placement::{Placement, compute_popup_placement};
use crate::placement_dump::{PlacementDump, write_placement_dump};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::scenario::{Scenario, parse_scenarios};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "popup-pos", version, about = "Place a popup next to a pointer inside a safe area")]
pub struct Args {
    /// Scenario file (JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (json/svg/png). Defaults to stdout for JSON and SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file (placement constants, theme, render size)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Include the strategy and every candidate in JSON output (json only)
    #[arg(long = "explain")]
    pub explain: bool,

    /// Also write the full placement explanation to this file
    #[arg(long = "dumpPlacement")]
    pub dump: Option<PathBuf>,

    /// PNG width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// PNG height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    check_args(&args)?;
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    let input = read_input(args.input.as_deref())?;
    let scenarios = parse_scenarios(&input)?;
    let placements = place_all(&scenarios, &config);
    tracing::info!(count = placements.len(), "computed placements");

    if let Some(path) = args.dump.as_deref() {
        let dumps = explain_all(&scenarios, &placements);
        write_placement_dump(path, &dumps)?;
    }

    match args.output_format {
        OutputFormat::Json => {
            let json = placements_json(&scenarios, &placements, args.explain)?;
            write_output_text(&json, args.output.as_deref())?;
        }
        OutputFormat::Svg | OutputFormat::Png if placements.len() == 1 => {
            let svg = render_svg(&placements[0], &config.theme);
            if args.output_format == OutputFormat::Svg {
                write_output_svg(&svg, args.output.as_deref())?;
            } else {
                let output = ensure_output(&args.output, "png")?;
                write_output_png(&svg, &output, &config.render)?;
            }
        }
        OutputFormat::Svg | OutputFormat::Png => {
            let outputs =
                resolve_multi_outputs(args.output.as_deref(), args.output_format, placements.len())?;
            for (placement, output) in placements.iter().zip(&outputs) {
                let svg = render_svg(placement, &config.theme);
                if args.output_format == OutputFormat::Svg {
                    write_output_svg(&svg, Some(output))?;
                } else {
                    write_output_png(&svg, output, &config.render)?;
                }
            }
        }
    }

    Ok(())
}

fn check_args(args: &Args) -> Result<()> {
    if args.explain && args.output_format != OutputFormat::Json {
        anyhow::bail!("--explain only applies to json output; use --dumpPlacement with svg/png");
    }
    Ok(())
}

fn place_all(scenarios: &[Scenario], config: &Config) -> Vec<Placement> {
    scenarios
        .iter()
        .enumerate()
        .map(|(idx, scenario)| {
            let placement =
                compute_popup_placement(&scenario.request, &scenario.document, &config.placement);
            tracing::debug!(
                scenario = %scenario.label(idx),
                x = placement.position.x,
                y = placement.position.y,
                "placed scenario"
            );
            placement
        })
        .collect()
}

fn explain_all(scenarios: &[Scenario], placements: &[Placement]) -> Vec<PlacementDump> {
    scenarios
        .iter()
        .zip(placements)
        .map(|(scenario, placement)| PlacementDump::from_placement(placement, scenario.name.clone()))
        .collect()
}

fn placements_json(
    scenarios: &[Scenario],
    placements: &[Placement],
    explain: bool,
) -> Result<String> {
    let value = if explain {
        let mut dumps = explain_all(scenarios, placements);
        if dumps.len() == 1 {
            serde_json::to_value(dumps.remove(0))?
        } else {
            serde_json::to_value(dumps)?
        }
    } else {
        let positions: Vec<_> = placements.iter().map(|p| p.position).collect();
        if positions.len() == 1 {
            serde_json::to_value(positions[0])?
        } else {
            serde_json::to_value(positions)?
        }
    };
    let mut json = serde_json::to_string_pretty(&value)?;
    json.push('\n');
    Ok(json)
}

fn write_output_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{}", text),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = match format {
        OutputFormat::Json => "json",
        OutputFormat::Svg => "svg",
        OutputFormat::Png => "png",
    };
    let base =
        output.ok_or_else(|| anyhow::anyhow!("Output path required for multiple scenarios"))?;
    if base.is_dir() {
        let mut outputs = Vec::new();
        for idx in 0..count {
            outputs.push(base.join(format!("scenario-{}.{}", idx + 1, ext)));
        }
        return Ok(outputs);
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("scenario");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    let mut outputs = Vec::new();
    for idx in 0..count {
        outputs.push(parent.join(format!("{}-{}.{}", stem, idx + 1, ext)));
    }
    Ok(outputs)
}
