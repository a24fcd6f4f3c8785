use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{GenError, Result};
use crate::grid::Grid;
use crate::numfmt::sci;
use crate::state::InitialState;

const FIELD_WIDTH: usize = 19;
const FIELD_PRECISION: usize = 12;

/// Columns before the per-species solid fractions: x, y, h, hu, hv, hT.
pub const BASE_COLUMNS: usize = 6;

/// Row-block separator. The solver's reader skips it as an empty record.
const BLOCK_SEPARATOR: &str = " ";

/// Conserved variables of cell `(i, j)` in column order.
fn cell_record(grid: &Grid, state: &InitialState, i: usize, j: usize) -> Vec<f64> {
    let k = state.h.idx(i, j);
    let h = state.h.data[k];
    let mut rec = Vec::with_capacity(BASE_COLUMNS + state.n_solid());
    rec.extend_from_slice(&[
        grid.x_cent[i],
        grid.y_cent[j],
        h,
        h * state.u.data[k],
        h * state.v.data[k],
        h * state.t.data[k],
    ]);
    rec.extend(state.alpha.iter().map(|a| h * a.data[k]));
    rec
}

/// Write the restart (`.q_2d`) file: one line per cell, one block per row
/// of cells, south to north. The file is truncated for the first row and
/// appended to for the rest.
pub fn write_initial_condition(path: &Path, grid: &Grid, state: &InitialState) -> Result<()> {
    if (state.h.w, state.h.h) != (grid.nx_cells, grid.ny_cells) {
        return Err(GenError::invalid(format!(
            "state is {}x{}, mesh has {}x{} cells",
            state.h.w, state.h.h, grid.nx_cells, grid.ny_cells
        )));
    }
    let io = |e| GenError::io(path, e);

    for j in 0..grid.ny_cells {
        let file = if j == 0 {
            File::create(path)
        } else {
            OpenOptions::new().append(true).open(path)
        }
        .map_err(io)?;
        let mut out = BufWriter::new(file);

        for i in 0..grid.nx_cells {
            let line = cell_record(grid, state, i, j)
                .into_iter()
                .map(|v| sci(v, FIELD_WIDTH, FIELD_PRECISION))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{line}").map_err(io)?;
        }
        writeln!(out, "{BLOCK_SEPARATOR}").map_err(io)?;
        out.flush().map_err(io)?;
    }
    Ok(())
}
