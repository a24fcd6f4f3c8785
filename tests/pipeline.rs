use std::fs;
use std::path::Path;

use radial_source::config::{Params, SourceParams};
use radial_source::error::GenError;
use radial_source::{OutputPaths, generate, preview, write_outputs};

const TEMPLATE: &str = "RUN_NAME='runname'\nRESTART='restartfile'\nX0=x_min\nNX=nx_cells\nDX=dx\n";

fn scenario() -> SourceParams {
    SourceParams {
        nx_cells: 10,
        r_init: 1.85,
        h_init: 0.0,
        t_init: 0.0,
        vel_init: 0.0,
        alfas_init: 0.0,
    }
}

fn write_template(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("SW_VAR_DENS_MODEL.template");
    fs::write(&path, TEMPLATE).unwrap();
    path
}

#[test]
fn ten_cell_run_writes_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let params = Params::default();
    let (scenario_out, timings) = generate(&scenario(), &params).unwrap();

    assert_eq!(scenario_out.grid.dx, 20.0);
    assert_eq!(scenario_out.grid.ny_cells, 10);
    assert!(scenario_out.state.h.data.iter().all(|&h| h == 0.0));
    assert_eq!(timings.last().unwrap().name, "TOTAL");

    let out = OutputPaths::in_dir(dir.path(), &params);
    write_outputs(&scenario_out, &scenario(), &params, &template, &out, &timings).unwrap();

    assert!(out.topography.ends_with("topography_dem.asc"));
    assert!(out.restart.ends_with("example_RS_0000.q_2d"));
    let deck = fs::read_to_string(&out.input_deck).unwrap();
    assert_eq!(
        deck,
        "RUN_NAME='exampleRS'\nRESTART='example_RS_0000.q_2d'\nX0=-100.0D0\nNX=10\nDX=20.0D0\n"
    );
    let restart = fs::read_to_string(&out.restart).unwrap();
    assert_eq!(restart.lines().filter(|l| !l.trim().is_empty()).count(), 100);
    let topo = fs::read_to_string(&out.topography).unwrap();
    assert!(topo.starts_with("ncols     11\n"));
}

#[test]
fn missing_template_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let params = Params::default();
    let (s, _) = generate(&scenario(), &params).unwrap();
    let out = OutputPaths::in_dir(dir.path(), &params);

    let absent = dir.path().join("absent.template");
    let err = write_outputs(&s, &scenario(), &params, &absent, &out, &[]).unwrap_err();
    assert!(matches!(err, GenError::MissingInput { .. }));
    assert!(!out.topography.exists());
    assert!(!out.restart.exists());
    assert!(!out.input_deck.exists());
}

#[test]
fn failed_write_removes_earlier_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let params = Params::default();
    let (s, _) = generate(&scenario(), &params).unwrap();
    let out = OutputPaths::in_dir(dir.path(), &params);
    // A directory in place of the input deck makes the last write fail.
    fs::create_dir(&out.input_deck).unwrap();

    let err = write_outputs(&s, &scenario(), &params, &template, &out, &[]).unwrap_err();
    assert!(matches!(err, GenError::Io { .. }));
    assert!(!out.topography.exists());
    assert!(!out.restart.exists());
    assert!(out.input_deck.is_dir());
}

#[test]
fn failed_summary_removes_every_output() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let params = Params::default();
    let (s, timings) = generate(&scenario(), &params).unwrap();
    let out = OutputPaths::in_dir(dir.path(), &params)
        .with_preview(dir.path().join("preview.png"))
        .with_summary(dir.path().join("no_such_dir").join("summary.json"));

    let err = write_outputs(&s, &scenario(), &params, &template, &out, &timings).unwrap_err();
    assert!(matches!(err, GenError::Io { .. }));
    assert!(!out.topography.exists());
    assert!(!out.restart.exists());
    assert!(!out.input_deck.exists());
    assert!(!out.preview.as_ref().unwrap().exists());

    let mut left: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    left.sort();
    assert_eq!(left, ["SW_VAR_DENS_MODEL.template"]);
}

#[test]
fn invalid_arguments_fail_before_computation() {
    let params = Params::default();
    let cases = [
        SourceParams { nx_cells: 0, ..scenario() },
        SourceParams { nx_cells: 100_000_000, ..scenario() },
        SourceParams { r_init: 0.0, ..scenario() },
        SourceParams { r_init: f64::NAN, ..scenario() },
        SourceParams { h_init: f64::INFINITY, ..scenario() },
        SourceParams { alfas_init: 1.5, ..scenario() },
        SourceParams { alfas_init: -0.1, ..scenario() },
    ];
    for source in cases {
        assert!(
            matches!(generate(&source, &params), Err(GenError::InvalidArgument(_))),
            "{source:?}"
        );
    }
}

#[test]
fn negative_velocity_is_accepted() {
    let source = SourceParams { vel_init: -3.0, ..scenario() };
    assert!(generate(&source, &Params::default()).is_ok());
}

#[test]
fn params_from_json_keep_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.json");
    fs::write(&path, r#"{ "x_min": -50.0, "x_max": 50.0, "run_name": "small" }"#).unwrap();
    let params = Params::from_json_file(&path).unwrap();
    assert_eq!(params.x_min, -50.0);
    assert_eq!(params.run_name, "small");
    assert_eq!(params.y_max, 100.0);
    assert_eq!(params.n_solid, 1);
    assert_eq!(params.topography_file, "topography_dem.asc");

    fs::write(&path, r#"{ "x_min": 10.0, "x_max": 0.0 }"#).unwrap();
    assert!(matches!(
        Params::from_json_file(&path),
        Err(GenError::InvalidArgument(_))
    ));
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Params::from_json_file(&path), Err(GenError::Json(_))));
}

#[test]
fn summary_and_preview() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let params = Params::default();
    let (s, timings) = generate(&scenario(), &params).unwrap();
    let summary_path = dir.path().join("summary.json");
    let png = dir.path().join("preview.png");
    let out = OutputPaths::in_dir(dir.path(), &params)
        .with_preview(&png)
        .with_summary(&summary_path);

    write_outputs(&s, &scenario(), &params, &template, &out, &timings).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(v["grid"]["ny_cells"], 10);
    assert_eq!(v["grid"]["dx"], 20.0);
    assert_eq!(v["source"]["r_init"], 1.85);
    assert_eq!(v["timings"].as_array().unwrap().len(), timings.len());
    assert!(v["outputs"]["preview"].is_string());

    assert!(fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn preview_is_upscaled() {
    let (s, _) = generate(&scenario(), &Params::default()).unwrap();
    let (rgba, w, h) = preview::render_surface(&s.state.w, &s.state.h);
    assert_eq!(rgba.len(), w * h * 4);
    assert!(w >= 512 && h >= 512);
    assert_eq!(w % s.grid.nx_cells, 0);
}
