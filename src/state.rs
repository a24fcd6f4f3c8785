use rayon::prelude::*;

use crate::field::Field;
use crate::grid::Grid;

/// x-offset of the source circle from the domain centre.
pub const SOURCE_OFFSET_X: f64 = 7.0;

/// Circular source region in physical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRegion {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl SourceRegion {
    /// Circle of `radius` placed `offset_x` to the right of the domain centre.
    pub fn new(grid: &Grid, offset_x: f64, radius: f64) -> Self {
        let (x_mid, y_mid) = grid.center();
        Self {
            cx: x_mid + offset_x,
            cy: y_mid,
            radius,
        }
    }

    #[inline]
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        ((x - self.cx).powi(2) + (y - self.cy).powi(2)).sqrt()
    }

    /// Boundary counts as inside.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance(x, y) <= self.radius
    }
}

/// Cell-centred initial state. All fields are `nx_cells` wide and `ny_cells` tall.
#[derive(Clone, Debug)]
pub struct InitialState {
    /// Bed elevation.
    pub z: Field<f64>,
    /// Free-surface elevation.
    pub w: Field<f64>,
    /// Fluid depth, `w - z`.
    pub h: Field<f64>,
    pub u: Field<f64>,
    pub v: Field<f64>,
    /// Temperature.
    pub t: Field<f64>,
    /// Solid volume fraction, one field per solid species.
    pub alpha: Vec<Field<f64>>,
    /// Number of cells whose centre lies in the source circle.
    pub source_cells: usize,
}

impl InitialState {
    pub fn n_solid(&self) -> usize {
        self.alpha.len()
    }
}

#[derive(Clone, Copy, Debug)]
struct CellState {
    w: f64,
    u: f64,
    v: f64,
    t: f64,
    alpha: f64,
}

/// Lake at rest over the bed: no fluid, no motion, no solids.
#[inline]
fn ambient_state(z: f64) -> CellState {
    CellState {
        w: z,
        u: 0.0,
        v: 0.0,
        t: 0.0,
        alpha: 0.0,
    }
}

/// The source region currently starts from the ambient state; the radial
/// inflow is imposed by the solver through the input deck, not the restart.
#[inline]
fn source_state(z: f64) -> CellState {
    ambient_state(z)
}

/// Mean of the four vertices enclosing cell `(i, j)`.
#[inline]
pub fn cell_center_average(vertex: &Field<f64>, i: usize, j: usize) -> f64 {
    0.25 * (vertex.get(i, j)
        + vertex.get(i, j + 1)
        + vertex.get(i + 1, j)
        + vertex.get(i + 1, j + 1))
}

/// Reconstruct bed elevation at cell centres and assign the initial
/// solution, distinguishing the source circle from the ambient region.
pub fn build_initial_state(
    grid: &Grid,
    topo: &Field<f64>,
    region: &SourceRegion,
    n_solid: usize,
) -> InitialState {
    debug_assert_eq!((topo.w, topo.h), (grid.nx_points, grid.ny_points));
    let w = grid.nx_cells;
    let h = grid.ny_cells;
    let n = w * h;

    let cells: Vec<(f64, CellState, bool)> = (0..n)
        .into_par_iter()
        .map(|k| {
            let i = k % w;
            let j = k / w;
            let z = cell_center_average(topo, i, j);
            let inside = region.contains(grid.x_cent[i], grid.y_cent[j]);
            let cell = if inside {
                source_state(z)
            } else {
                ambient_state(z)
            };
            (z, cell, inside)
        })
        .collect();

    let mut state = InitialState {
        z: Field::new(w, h),
        w: Field::new(w, h),
        h: Field::new(w, h),
        u: Field::new(w, h),
        v: Field::new(w, h),
        t: Field::new(w, h),
        alpha: vec![Field::new(w, h); n_solid],
        source_cells: 0,
    };

    for (k, (z, cell, inside)) in cells.into_iter().enumerate() {
        state.z.data[k] = z;
        state.w.data[k] = cell.w;
        state.h.data[k] = cell.w - z;
        state.u.data[k] = cell.u;
        state.v.data[k] = cell.v;
        state.t.data[k] = cell.t;
        for a in state.alpha.iter_mut() {
            a.data[k] = cell.alpha;
        }
        if inside {
            state.source_cells += 1;
        }
    }

    state
}
