//! Probe tests - config files and JSON answers from the command-line probe

use std::fs;

use serde::Deserialize;
use serde_json::json;

use tessera::core::{GridConfig, GridConfigError, Tiling};
use tessera::probe::{parse_probe_args, run_probe, ProbeCommand};
use tessera::types::GridKind;

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

#[derive(Debug, Deserialize)]
struct NeighbourAnswer {
    direction: u8,
    neighbour: Option<usize>,
    empty: bool,
}

#[test]
fn test_probe_from_config_file() {
    let path = std::env::temp_dir().join(format!("tessera-probe-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{"kind": "cube", "width": 3, "height": 3, "tiles": [1,1,1, 1,1,1, 1,1,1, 1,1,1, 1,1,0]}"#,
    )
    .unwrap();

    let line = format!("--config {} neighbours 9", path.display());
    let parsed = parse_probe_args(&args(&line)).unwrap();
    assert_eq!(parsed.config.kind, GridKind::Cube);
    assert_eq!(parsed.command, ProbeCommand::Neighbours(9));

    let answer = run_probe(&parsed).unwrap();
    let neighbours: Vec<NeighbourAnswer> =
        serde_json::from_value(answer["neighbours"].clone()).unwrap();
    let east = neighbours.iter().find(|n| n.direction == 1).unwrap();
    assert_eq!(east.neighbour, Some(14));
    assert!(east.empty);
    let south = neighbours.iter().find(|n| n.direction == 8).unwrap();
    assert_eq!((south.neighbour, south.empty), (Some(22), false));

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_probe_missing_config_file() {
    let err = parse_probe_args(&args("--config /nonexistent/tessera.json info")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/tessera.json"));
}

#[test]
fn test_probe_info() {
    let parsed = parse_probe_args(&args("octagon 3 3 info")).unwrap();
    let answer = run_probe(&parsed).unwrap();
    assert_eq!(answer["kind"], json!("octagonal"));
    assert_eq!(answer["total"], json!(18));
    assert_eq!(answer["units"], json!(2));
    assert_eq!(answer["holes"], json!([11, 14, 15, 16, 17]));
}

#[test]
fn test_probe_visible_and_types() {
    let parsed = parse_probe_args(&args("square 3 3 visible -0.5 -0.5 1 1")).unwrap();
    let answer = run_probe(&parsed).unwrap();
    assert_eq!(answer.as_array().unwrap().len(), 4);

    let parsed = parse_probe_args(&args("cubes 2 2 types 1")).unwrap();
    let answer = run_probe(&parsed).unwrap();
    assert_eq!(answer["sides"], json!(4));
    assert_eq!(answer["types"], json!([0, 1, 3, 5, 7, 15]));
    assert!(answer["transform"]["skew_x"].as_f64().unwrap() > 0.5);
}

#[test]
fn test_config_build_errors_surface() {
    let err = GridConfig::new(GridKind::Etrat, 3, 0, false).build().unwrap_err();
    assert_eq!(err, GridConfigError::ZeroSize { width: 3, height: 0 });

    let parsed = parse_probe_args(&args("hex 0 2 info")).unwrap();
    let err = run_probe(&parsed).unwrap_err();
    assert!(err.to_string().contains("0x2"));
}

#[test]
fn test_config_builds_every_kind() {
    for kind in GridKind::ALL {
        let json = format!(r#"{{"kind": "{}", "width": 2, "height": 3, "wrap": true}}"#, kind.as_str());
        let config: GridConfig = serde_json::from_str(&json).unwrap();
        let grid = config.build().unwrap();
        assert_eq!(grid.kind(), kind);
        assert!(grid.wrap());
    }
}
