use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Scenario constants. Defaults reproduce the radial source example;
/// a JSON file may override any subset of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Domain
    pub x_min: f64,
    pub x_max: f64,
    /// Nominal y half-extent. The actual extent is rounded up to whole cells.
    pub y_max: f64,

    // Source placement and terrain
    pub source_offset_x: f64,
    pub topo_elevation: f64,
    pub n_solid: usize,

    // Output naming
    pub run_name: String,
    pub topography_file: String,
    pub restart_file: String,
    pub input_file: String,
    pub nodata_value: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            x_min: -100.0,
            x_max: 100.0,
            y_max: 100.0,
            source_offset_x: crate::state::SOURCE_OFFSET_X,
            topo_elevation: crate::topography::FLAT_ELEVATION,
            n_solid: 1,
            run_name: "exampleRS".into(),
            topography_file: "topography_dem.asc".into(),
            restart_file: "example_RS_0000.q_2d".into(),
            input_file: "SW_VAR_DENS_MODEL.inp".into(),
            nodata_value: -9999.0,
        }
    }
}

impl Params {
    /// Load overrides from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => GenError::MissingInput {
                path: path.to_path_buf(),
            },
            _ => GenError::io(path, e),
        })?;
        let params: Params = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("x_min", self.x_min),
            ("x_max", self.x_max),
            ("y_max", self.y_max),
            ("source_offset_x", self.source_offset_x),
            ("topo_elevation", self.topo_elevation),
            ("nodata_value", self.nodata_value),
        ] {
            if !v.is_finite() {
                return Err(GenError::invalid(format!("{name} must be finite, got {v}")));
            }
        }
        if self.x_max <= self.x_min {
            return Err(GenError::invalid(format!(
                "x_max must exceed x_min (x_min={}, x_max={})",
                self.x_min, self.x_max
            )));
        }
        if self.y_max <= 0.0 {
            return Err(GenError::invalid(format!(
                "y_max must be positive, got {}",
                self.y_max
            )));
        }
        for (name, file) in [
            ("topography_file", &self.topography_file),
            ("restart_file", &self.restart_file),
            ("input_file", &self.input_file),
        ] {
            if file.trim().is_empty() {
                return Err(GenError::invalid(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// The six per-run values given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceParams {
    pub nx_cells: usize,
    /// Source radius.
    pub r_init: f64,
    /// Initial thickness.
    pub h_init: f64,
    /// Source temperature.
    pub t_init: f64,
    /// Radial velocity.
    pub vel_init: f64,
    /// Solid volume fraction.
    pub alfas_init: f64,
}

impl SourceParams {
    /// Single fatal validation pass, run before any computation or I/O.
    pub fn validate(&self) -> Result<()> {
        if self.nx_cells == 0 {
            return Err(GenError::invalid("nx_cells must be a positive integer"));
        }
        if self.nx_cells > crate::grid::MAX_CELLS {
            return Err(GenError::invalid(format!(
                "nx_cells={} exceeds the {}-cell limit",
                self.nx_cells,
                crate::grid::MAX_CELLS
            )));
        }
        for (name, v) in [
            ("r_init", self.r_init),
            ("h_init", self.h_init),
            ("T_init", self.t_init),
            ("vel_init", self.vel_init),
            ("alfas_init", self.alfas_init),
        ] {
            if !v.is_finite() {
                return Err(GenError::invalid(format!("{name} must be a finite number, got {v}")));
            }
        }
        if self.r_init <= 0.0 {
            return Err(GenError::invalid(format!(
                "source radius must be positive, got {}",
                self.r_init
            )));
        }
        if !(0.0..=1.0).contains(&self.alfas_init) {
            return Err(GenError::invalid(format!(
                "solid volume fraction must lie in [0, 1], got {}",
                self.alfas_init
            )));
        }
        if self.h_init <= 0.0 {
            log::warn!("initial thickness is {} (expected > 0)", self.h_init);
        }
        if self.t_init <= 0.0 {
            log::warn!("source temperature is {} (expected > 0)", self.t_init);
        }
        Ok(())
    }
}
