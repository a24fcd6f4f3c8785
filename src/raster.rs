use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{GenError, Result};
use crate::field::Field;
use crate::grid::Grid;
use crate::numfmt::{fixed, real_repr};

/// Decimal places for elevation values.
const VALUE_PRECISION: usize = 12;

/// The six-line header of an ASCII raster grid.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterHeader {
    pub ncols: usize,
    pub nrows: usize,
    pub xllcorner: f64,
    pub yllcorner: f64,
    pub cellsize: f64,
    pub nodata_value: f64,
}

impl RasterHeader {
    /// Header for a vertex field. Each vertex is treated as the centre of a
    /// raster cell, so the lower-left corner sits half a step outside the mesh.
    pub fn for_vertices(grid: &Grid, nodata_value: f64) -> Self {
        Self {
            ncols: grid.nx_points,
            nrows: grid.ny_points,
            xllcorner: grid.x_min - 0.5 * grid.dx,
            yllcorner: grid.y_min - 0.5 * grid.dx,
            cellsize: grid.dx,
            nodata_value,
        }
    }
}

/// Write the vertex elevation field as an ESRI ASCII grid (`.asc`).
/// Rows run north to south as the format requires.
pub fn write_topography_raster(
    path: &Path,
    z: &Field<f64>,
    grid: &Grid,
    nodata_value: f64,
) -> Result<()> {
    if (z.w, z.h) != (grid.nx_points, grid.ny_points) {
        return Err(GenError::invalid(format!(
            "topography is {}x{}, mesh has {}x{} vertices",
            z.w, z.h, grid.nx_points, grid.ny_points
        )));
    }
    let header = RasterHeader::for_vertices(grid, nodata_value);
    let io = |e| GenError::io(path, e);

    let mut out = BufWriter::new(File::create(path).map_err(io)?);
    write_header(&mut out, &header).map_err(io)?;
    for j in (0..z.h).rev() {
        let line = z
            .row(j)
            .iter()
            .map(|&v| fixed(v, VALUE_PRECISION))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{line}").map_err(io)?;
    }
    out.flush().map_err(io)?;
    Ok(())
}

fn write_header<W: Write>(out: &mut W, h: &RasterHeader) -> std::io::Result<()> {
    writeln!(out, "ncols     {}", h.ncols)?;
    writeln!(out, "nrows    {}", h.nrows)?;
    writeln!(out, "xllcorner {}", real_repr(h.xllcorner))?;
    writeln!(out, "yllcorner {}", real_repr(h.yllcorner))?;
    writeln!(out, "cellsize {}", real_repr(h.cellsize))?;
    writeln!(out, "NODATA_value {}", nodata_repr(h.nodata_value))
}

/// Integral no-data markers are written without a fractional part (`-9999`).
fn nodata_repr(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        real_repr(v)
    }
}

/// Read back the header of an ASCII raster grid. Keys are matched
/// case-insensitively and may appear in any order.
pub fn read_raster_header(path: &Path) -> Result<RasterHeader> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => GenError::MissingInput {
            path: path.to_path_buf(),
        },
        _ => GenError::io(path, e),
    })?;

    let mut ncols = None;
    let mut nrows = None;
    let mut xll = None;
    let mut yll = None;
    let mut cellsize = None;
    let mut nodata = None;

    for line in BufReader::new(file).lines().take(6) {
        let line = line.map_err(|e| GenError::io(path, e))?;
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            return Err(GenError::invalid(format!(
                "{}: malformed header line {line:?}",
                path.display()
            )));
        };
        let bad = || GenError::invalid(format!("{}: bad value for {key}: {value}", path.display()));
        match key.to_ascii_lowercase().as_str() {
            "ncols" => ncols = Some(value.parse::<usize>().map_err(|_| bad())?),
            "nrows" => nrows = Some(value.parse::<usize>().map_err(|_| bad())?),
            "xllcorner" => xll = Some(value.parse::<f64>().map_err(|_| bad())?),
            "yllcorner" => yll = Some(value.parse::<f64>().map_err(|_| bad())?),
            "cellsize" => cellsize = Some(value.parse::<f64>().map_err(|_| bad())?),
            "nodata_value" => nodata = Some(value.parse::<f64>().map_err(|_| bad())?),
            _ => {
                return Err(GenError::invalid(format!(
                    "{}: unexpected header key {key}",
                    path.display()
                )));
            }
        }
    }

    let missing = |k: &str| GenError::invalid(format!("{}: header lacks {k}", path.display()));
    Ok(RasterHeader {
        ncols: ncols.ok_or_else(|| missing("ncols"))?,
        nrows: nrows.ok_or_else(|| missing("nrows"))?,
        xllcorner: xll.ok_or_else(|| missing("xllcorner"))?,
        yllcorner: yll.ok_or_else(|| missing("yllcorner"))?,
        cellsize: cellsize.ok_or_else(|| missing("cellsize"))?,
        nodata_value: nodata.ok_or_else(|| missing("NODATA_value"))?,
    })
}
