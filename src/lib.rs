pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod numfmt;
pub mod preview;
pub mod raster;
pub mod restart;
pub mod state;
pub mod template;
pub mod topography;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use config::{Params, SourceParams};
use error::{GenError, Result};
use field::Field;
use grid::Grid;
use state::{InitialState, SourceRegion};

/// Everything computed for one run, before anything is written.
pub struct Scenario {
    pub grid: Grid,
    pub topography: Field<f64>,
    pub region: SourceRegion,
    pub state: InitialState,
}

#[derive(Clone, Debug, Serialize)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

fn timed<T>(timings: &mut Vec<Timing>, name: &'static str, f: impl FnOnce() -> T) -> T {
    let t = Instant::now();
    let out = f();
    timings.push(Timing {
        name,
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });
    out
}

/// Grid -> topography -> initial state. Inputs are validated first; no I/O.
pub fn generate(source: &SourceParams, params: &Params) -> Result<(Scenario, Vec<Timing>)> {
    source.validate()?;
    params.validate()?;

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Mesh
    let grid = timed(&mut timings, "grid", || {
        Grid::build(source.nx_cells, params.x_min, params.x_max, params.y_max)
    })?;
    log::info!(
        "mesh {}x{} cells, dx={}, y in [{}, {}]",
        grid.nx_cells,
        grid.ny_cells,
        grid.dx,
        grid.y_min,
        grid.y_max
    );

    // 2. Bed elevation at vertices
    let topography = timed(&mut timings, "topography", || {
        topography::build_topography(&grid, params.topo_elevation)
    });

    // 3. Cell-centred initial solution
    let region = SourceRegion::new(&grid, params.source_offset_x, source.r_init);
    let state = timed(&mut timings, "initial_state", || {
        state::build_initial_state(&grid, &topography, &region, params.n_solid)
    });
    log::debug!(
        "source circle at ({}, {}) r={} covers {} of {} cells",
        region.cx,
        region.cy,
        region.radius,
        state.source_cells,
        grid.n_cells()
    );

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((
        Scenario {
            grid,
            topography,
            region,
            state,
        },
        timings,
    ))
}

/// Paths of the files produced by one run.
#[derive(Clone, Debug, Serialize)]
pub struct OutputPaths {
    pub topography: PathBuf,
    pub restart: PathBuf,
    pub input_deck: PathBuf,
    /// PNG of the initial free surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PathBuf>,
    /// JSON `RunSummary`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PathBuf>,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path, params: &Params) -> Self {
        Self {
            topography: dir.join(&params.topography_file),
            restart: dir.join(&params.restart_file),
            input_deck: dir.join(&params.input_file),
            preview: None,
            summary: None,
        }
    }

    pub fn with_preview(mut self, path: impl Into<PathBuf>) -> Self {
        self.preview = Some(path.into());
        self
    }

    pub fn with_summary(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary = Some(path.into());
        self
    }
}

/// Removes every registered file on drop unless the run was committed.
struct Rollback {
    created: Vec<PathBuf>,
    committed: bool,
}

impl Rollback {
    fn new() -> Self {
        Self {
            created: Vec::new(),
            committed: false,
        }
    }

    fn track(&mut self, path: &Path) {
        self.created.push(path.to_path_buf());
    }
}

impl Drop for Rollback {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in &self.created {
            if fs::remove_file(path).is_ok() {
                log::warn!("removed partial output {}", path.display());
            }
        }
    }
}

/// Write topography, restart file and input deck, then the optional preview
/// and run summary. The template is read before anything is written; if any
/// write fails, every file already written by this call is removed.
pub fn write_outputs(
    scenario: &Scenario,
    source: &SourceParams,
    params: &Params,
    template_path: &Path,
    out: &OutputPaths,
    timings: &[Timing],
) -> Result<()> {
    let template_text = template::read_template(template_path)?;
    let grid = &scenario.grid;
    let mut rollback = Rollback::new();

    rollback.track(&out.topography);
    raster::write_topography_raster(
        &out.topography,
        &scenario.topography,
        grid,
        params.nodata_value,
    )?;
    log::info!("wrote {}", out.topography.display());

    rollback.track(&out.restart);
    restart::write_initial_condition(&out.restart, grid, &scenario.state)?;
    log::info!("wrote {}", out.restart.display());

    rollback.track(&out.input_deck);
    template::write_config(&out.input_deck, &template_text, grid, source, params)?;
    log::info!("wrote {}", out.input_deck.display());

    if let Some(path) = &out.preview {
        rollback.track(path);
        preview::save_preview(path, &scenario.state.w, &scenario.state.h)?;
        log::info!("wrote {}", path.display());
    }

    if let Some(path) = &out.summary {
        rollback.track(path);
        RunSummary {
            grid,
            source,
            source_cells: scenario.state.source_cells,
            outputs: out,
            timings,
        }
        .write(path)?;
        log::info!("wrote {}", path.display());
    }

    rollback.committed = true;
    Ok(())
}

/// Machine-readable record of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub grid: &'a Grid,
    pub source: &'a SourceParams,
    pub source_cells: usize,
    pub outputs: &'a OutputPaths,
    pub timings: &'a [Timing],
}

impl RunSummary<'_> {
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| GenError::io(path, e))
    }
}
