use serde::Serialize;

use crate::error::{GenError, Result};

/// Axis-aligned uniform mesh with square cells.
///
/// The x-extent is given; the y-extent is derived from the x step so that
/// the mesh always has an even number of cell rows, symmetric about the
/// nominal y centre line.
#[derive(Clone, Debug, Serialize)]
pub struct Grid {
    pub dx: f64,
    pub nx_cells: usize,
    pub ny_cells: usize,
    pub nx_points: usize,
    pub ny_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Vertex x-coordinates, `nx_points` values.
    #[serde(skip)]
    pub x: Vec<f64>,
    /// Vertex y-coordinates, `ny_points` values.
    #[serde(skip)]
    pub y: Vec<f64>,
    /// Cell-centre x-coordinates, `nx_cells` values.
    #[serde(skip)]
    pub x_cent: Vec<f64>,
    /// Cell-centre y-coordinates, `ny_cells` values.
    #[serde(skip)]
    pub y_cent: Vec<f64>,
}

/// Largest mesh, in cells, that will be built. Each cell-centred field
/// at this size holds 512 MiB of `f64`.
pub const MAX_CELLS: usize = 1 << 26;

/// `n` evenly spaced values over `[start, stop]`, endpoint included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut v: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            // Pin the endpoint so it does not drift.
            v[n - 1] = stop;
            v
        }
    }
}

/// Mesh over `[x_min, x_max]` with `nx_cells` columns; the y half-extent
/// uses the same bound as x.
pub fn build_grid(nx_cells: usize, x_min: f64, x_max: f64) -> Result<Grid> {
    Grid::build(nx_cells, x_min, x_max, x_max)
}

impl Grid {
    /// Build the mesh. `y_max_nominal` is rounded up to a whole number of
    /// `dx`-sized cells on each side of `y = 0`.
    pub fn build(nx_cells: usize, x_min: f64, x_max: f64, y_max_nominal: f64) -> Result<Self> {
        if nx_cells == 0 {
            return Err(GenError::invalid("nx_cells must be a positive integer"));
        }
        if nx_cells > MAX_CELLS {
            return Err(GenError::invalid(format!(
                "nx_cells={nx_cells} exceeds the {MAX_CELLS}-cell limit"
            )));
        }
        if x_min.is_nan() || x_max.is_nan() || x_max <= x_min {
            return Err(GenError::invalid(format!(
                "empty x-range [{x_min}, {x_max}]"
            )));
        }
        if y_max_nominal.is_nan() || y_max_nominal <= 0.0 {
            return Err(GenError::invalid(format!(
                "y half-extent must be positive, got {y_max_nominal}"
            )));
        }

        let nx_points = nx_cells + 1;
        let dx = (x_max - x_min) / nx_cells as f64;
        let x = linspace(x_min, x_max, nx_points);
        let x_cent = linspace(x_min + 0.5 * dx, x_max - 0.5 * dx, nx_cells);

        // dy == dx
        let ny_half = (y_max_nominal / dx).ceil();
        let too_large = || {
            GenError::invalid(format!(
                "mesh of {nx_cells} x {} cells exceeds the {MAX_CELLS}-cell limit",
                2.0 * ny_half
            ))
        };
        if !ny_half.is_finite() || ny_half > MAX_CELLS as f64 {
            return Err(too_large());
        }
        let ny_half_cells = ny_half as usize;
        let ny_cells = 2 * ny_half_cells;
        match nx_cells.checked_mul(ny_cells) {
            Some(n) if n <= MAX_CELLS => {}
            _ => return Err(too_large()),
        }
        let ny_points = ny_cells + 1;
        let y_min = -dx * ny_half_cells as f64;
        let y_max = -y_min;
        let y = linspace(y_min, y_max, ny_points);
        let y_cent = linspace(y_min + 0.5 * dx, y_max - 0.5 * dx, ny_cells);

        Ok(Self {
            dx,
            nx_cells,
            ny_cells,
            nx_points,
            ny_points,
            x_min,
            x_max,
            y_min,
            y_max,
            x,
            y,
            x_cent,
            y_cent,
        })
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx_cells * self.ny_cells
    }

    /// Geometric centre of the domain.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (0.5 * (self.x_min + self.x_max), 0.5 * (self.y_min + self.y_max))
    }
}
