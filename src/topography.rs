use crate::field::Field;
use crate::grid::Grid;

/// Bed elevation of the flat test terrain.
pub const FLAT_ELEVATION: f64 = 1.0;

/// Vertex elevation field, constant over the whole domain.
pub fn build_topography(grid: &Grid, elevation: f64) -> Field<f64> {
    Field::filled(grid.nx_points, grid.ny_points, elevation)
}
