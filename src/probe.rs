//! Command-line probe: build a board and print answers as JSON
//!
//! ```text
//! tessera <kind> <width> <height> [--wrap] <command>
//! tessera --config <file.json> <command>
//!
//! commands:
//!   info
//!   neighbours <index>
//!   at <x> <y>
//!   visible <xmin> <ymin> <width> <height>
//!   types <index>
//! ```

use std::fs;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::debug;
use serde_json::{json, Value};

use crate::core::{Grid, GridConfig, Tiling};
use crate::types::ViewBox;

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeCommand {
    Info,
    Neighbours(usize),
    At(f64, f64),
    Visible(ViewBox),
    Types(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeArgs {
    pub config: GridConfig,
    pub command: ProbeCommand,
}

pub const USAGE: &str = "usage: tessera <kind> <width> <height> [--wrap] <command>\n       \
tessera --config <file.json> <command>\n\
commands: info | neighbours <index> | at <x> <y> | visible <xmin> <ymin> <width> <height> | types <index>";

fn parse_value<T: FromStr>(args: &[String], i: usize, what: &str) -> Result<T> {
    let v = args
        .get(i)
        .ok_or_else(|| anyhow!("probe: missing value for {}", what))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("probe: invalid {} value: {}", what, v))
}

pub fn parse_probe_args(args: &[String]) -> Result<ProbeArgs> {
    let (config, i) = match args.first().map(String::as_str) {
        Some("--config") => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("probe: missing value for --config"))?;
            let text = fs::read_to_string(path)
                .map_err(|e| anyhow!("probe: read {} failed: {}", path, e))?;
            let config = serde_json::from_str::<GridConfig>(&text)
                .map_err(|e| anyhow!("probe: bad config {}: {}", path, e))?;
            (config, 2)
        }
        Some(kind) => {
            let width = parse_value(args, 1, "width")?;
            let height = parse_value(args, 2, "height")?;
            let wrap = args.get(3).map(String::as_str) == Some("--wrap");
            (GridConfig::named(kind, width, height, wrap)?, 3 + usize::from(wrap))
        }
        None => return Err(anyhow!("probe: missing arguments\n{}", USAGE)),
    };
    let command = match args.get(i).map(String::as_str) {
        Some("info") | None => ProbeCommand::Info,
        Some("neighbours") | Some("neighbors") => {
            ProbeCommand::Neighbours(parse_value(args, i + 1, "index")?)
        }
        Some("at") => ProbeCommand::At(
            parse_value(args, i + 1, "x")?,
            parse_value(args, i + 2, "y")?,
        ),
        Some("visible") => ProbeCommand::Visible(ViewBox::new(
            parse_value(args, i + 1, "xmin")?,
            parse_value(args, i + 2, "ymin")?,
            parse_value(args, i + 3, "width")?,
            parse_value(args, i + 4, "height")?,
        )),
        Some("types") => ProbeCommand::Types(parse_value(args, i + 1, "index")?),
        Some(other) => return Err(anyhow!("probe: unknown command: {}", other)),
    };

    Ok(ProbeArgs { config, command })
}

fn check_cell(grid: &Grid, index: usize) -> Result<()> {
    if index >= grid.total() {
        return Err(anyhow!(
            "probe: cell {} out of range 0..{}",
            index,
            grid.total()
        ));
    }
    Ok(())
}

/// Build the board and answer the command
pub fn run_probe(args: &ProbeArgs) -> Result<Value> {
    let grid = args.config.build()?;
    debug!("probe {:?} on {:?}", args.command, args.config);

    let answer = match args.command {
        ProbeCommand::Info => json!({
            "kind": grid.kind(),
            "width": grid.width(),
            "height": grid.height(),
            "wrap": grid.wrap(),
            "units": grid.units(),
            "total": grid.total(),
            "directions": grid.directions(),
            "edgemark_directions": grid.edgemark_directions(),
            "extents": grid.extents(),
            "holes": grid.empty_cells().sorted(),
        }),
        ProbeCommand::Neighbours(index) => {
            check_cell(&grid, index)?;
            let polygon = grid.polygon_at(index);
            let neighbours: Vec<Value> = grid
                .directions()
                .iter()
                .filter(|&&direction| polygon.side_of(direction).is_some())
                .map(|&direction| {
                    let found = grid.find_neighbour(index, direction);
                    json!({
                        "direction": direction,
                        "neighbour": found.neighbour,
                        "empty": found.empty,
                    })
                })
                .collect();
            json!({
                "index": index,
                "empty": grid.is_empty(index),
                "neighbours": neighbours,
            })
        }
        ProbeCommand::At(x, y) => json!(grid.which_tile_at(x, y)),
        ProbeCommand::Visible(view) => json!(grid.visible_tiles(&view)),
        ProbeCommand::Types(index) => {
            check_cell(&grid, index)?;
            let polygon = grid.polygon_at(index);
            json!({
                "index": index,
                "sides": polygon.sides(),
                "directions": polygon.directions(),
                "types": grid.tile_types_at(index).types(),
                "contour": grid.tile_path(index),
                "transform": grid.tile_transform(index),
            })
        }
    };
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridKind;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_kind_and_command() {
        let parsed = parse_probe_args(&args("hex 3 3 --wrap neighbours 4")).unwrap();
        assert_eq!(parsed.config, GridConfig::new(GridKind::Hexagonal, 3, 3, true));
        assert_eq!(parsed.command, ProbeCommand::Neighbours(4));

        let parsed = parse_probe_args(&args("square 2 2")).unwrap();
        assert_eq!(parsed.command, ProbeCommand::Info);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_probe_args(&[]).is_err());
        assert!(parse_probe_args(&args("square x 2 info")).is_err());
        assert!(parse_probe_args(&args("penrose 2 2 info")).is_err());
        assert!(parse_probe_args(&args("square 2 2 at 1.0")).is_err());
        assert!(parse_probe_args(&args("square 2 2 jump")).is_err());
    }

    #[test]
    fn test_run_neighbours_skips_missing_sides() {
        // etrat up triangle has no north side
        let parsed = parse_probe_args(&args("etrat 3 3 --wrap neighbours 0")).unwrap();
        let answer = run_probe(&parsed).unwrap();
        assert_eq!(answer["neighbours"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_run_at_and_range_check() {
        let parsed = parse_probe_args(&args("square 3 3 at 1.2 0.9")).unwrap();
        let answer = run_probe(&parsed).unwrap();
        assert_eq!(answer["index"], json!(4));

        let parsed = parse_probe_args(&args("square 3 3 types 9")).unwrap();
        assert!(run_probe(&parsed).is_err());
    }
}
