use radial_source::error::GenError;
use radial_source::grid::{Grid, MAX_CELLS, build_grid, linspace};

#[test]
fn ten_cell_scenario_dimensions() {
    let g = build_grid(10, -100.0, 100.0).unwrap();
    assert_eq!(g.dx, 20.0);
    assert_eq!(g.nx_cells, 10);
    assert_eq!(g.ny_cells, 10);
    assert_eq!(g.nx_points, 11);
    assert_eq!(g.ny_points, 11);
    assert_eq!(g.y_min, -100.0);
    assert_eq!(g.y_max, 100.0);
    assert_eq!(g.n_cells(), 100);
}

#[test]
fn coordinate_array_lengths() {
    for nx in 1..=64 {
        let g = build_grid(nx, -100.0, 100.0).unwrap();
        assert_eq!(g.x.len(), nx + 1);
        assert_eq!(g.x_cent.len(), nx);
        assert_eq!(g.y.len(), g.ny_points);
        assert_eq!(g.y_cent.len(), g.ny_cells);
        assert_eq!(g.ny_points, g.ny_cells + 1);
    }
}

#[test]
fn row_count_is_always_even() {
    for nx in [1, 2, 3, 7, 13, 30, 99, 128, 333] {
        let g = build_grid(nx, -100.0, 100.0).unwrap();
        assert_eq!(g.ny_cells % 2, 0, "nx={nx}");
        assert!(g.ny_cells >= 2);
    }
}

#[test]
fn y_extent_rounds_up_to_whole_cells() {
    // dx = 200/3, 100/dx = 1.5 -> 2 cells each side
    let g = build_grid(3, -100.0, 100.0).unwrap();
    assert_eq!(g.ny_cells, 4);
    assert!((g.y_min + 2.0 * g.dx).abs() < 1e-12);
    assert!(g.y_max >= 100.0);
    assert_eq!(g.y_max, -g.y_min);
}

#[test]
fn cells_are_square_and_centred() {
    let g = build_grid(7, -100.0, 100.0).unwrap();
    for w in g.x.windows(2) {
        assert!((w[1] - w[0] - g.dx).abs() < 1e-9);
    }
    for w in g.y.windows(2) {
        assert!((w[1] - w[0] - g.dx).abs() < 1e-9);
    }
    for i in 0..g.nx_cells {
        assert!((g.x_cent[i] - 0.5 * (g.x[i] + g.x[i + 1])).abs() < 1e-9);
    }
    for j in 0..g.ny_cells {
        assert!((g.y_cent[j] - 0.5 * (g.y[j] + g.y[j + 1])).abs() < 1e-9);
    }
    assert_eq!(g.x[0], -100.0);
    assert_eq!(*g.x.last().unwrap(), 100.0);
    assert_eq!(g.center(), (0.0, 0.0));
}

#[test]
fn explicit_y_extent() {
    let g = Grid::build(20, 0.0, 100.0, 12.0).unwrap();
    assert_eq!(g.dx, 5.0);
    assert_eq!(g.ny_cells, 6);
    assert_eq!(g.y_min, -15.0);
}

#[test]
fn rejects_zero_cells() {
    assert!(matches!(
        build_grid(0, -100.0, 100.0),
        Err(GenError::InvalidArgument(_))
    ));
}

#[test]
fn rejects_empty_range() {
    assert!(matches!(
        build_grid(10, 5.0, 5.0),
        Err(GenError::InvalidArgument(_))
    ));
}

#[test]
fn linspace_endpoints() {
    let v = linspace(-1.0, 1.0, 5);
    assert_eq!(v, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
    assert!(linspace(0.0, 1.0, 0).is_empty());
}

#[test]
fn oversized_meshes_are_rejected() {
    // 100M columns; also squares past the total cell limit
    for nx in [100_000_000, 10_000, MAX_CELLS + 1, usize::MAX] {
        assert!(
            matches!(build_grid(nx, -100.0, 100.0), Err(GenError::InvalidArgument(_))),
            "nx={nx}"
        );
    }
    // Narrow x-range with a huge nominal y-extent
    assert!(matches!(
        Grid::build(10, -1.0, 1.0, 1e300),
        Err(GenError::InvalidArgument(_))
    ));
    assert!(matches!(
        Grid::build(10, -1.0, 1.0, f64::INFINITY),
        Err(GenError::InvalidArgument(_))
    ));
}

#[test]
fn largest_square_mesh_is_accepted() {
    // 8192 x 8192 = MAX_CELLS exactly
    let g = build_grid(8192, -100.0, 100.0).unwrap();
    assert_eq!(g.n_cells(), MAX_CELLS);
}
