use std::fs;
use std::path::Path;

use crate::config::{Params, SourceParams};
use crate::error::{GenError, Result};
use crate::grid::Grid;
use crate::numfmt::real_repr;

/// One placeholder and its rendered replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    pub placeholder: &'static str,
    pub value: String,
}

impl Substitution {
    pub fn new(placeholder: &'static str, value: impl Into<String>) -> Self {
        Self {
            placeholder,
            value: value.into(),
        }
    }
}

/// Double-precision literal for a Fortran reader: `-100.0D0`.
pub fn fortran_double(v: f64) -> String {
    format!("{}D0", real_repr(v))
}

/// Replace every occurrence of each placeholder, in list order.
///
/// Placeholders are plain words in the template (`x_min`, `nx_cells`, ...),
/// so the order of `subs` matters: a placeholder must be replaced before any
/// later replacement value could introduce text that matches it.
pub fn render_config(template: &str, subs: &[Substitution]) -> String {
    subs.iter().fold(template.to_string(), |text, s| {
        text.replace(s.placeholder, &s.value)
    })
}

/// The substitution list for the radial source input deck, in the order
/// the placeholders must be applied.
pub fn canonical_substitutions(
    grid: &Grid,
    source: &SourceParams,
    params: &Params,
) -> Vec<Substitution> {
    let (x_mid, y_mid) = grid.center();
    vec![
        Substitution::new("runname", params.run_name.clone()),
        Substitution::new("restartfile", params.restart_file.clone()),
        Substitution::new("x_min", fortran_double(grid.x_min)),
        Substitution::new("y_min", fortran_double(grid.y_min)),
        Substitution::new("nx_cells", grid.nx_cells.to_string()),
        Substitution::new("ny_cells", grid.ny_cells.to_string()),
        Substitution::new("dx", fortran_double(grid.dx)),
        Substitution::new("source_x", fortran_double(x_mid)),
        Substitution::new("source_y", fortran_double(y_mid)),
        Substitution::new("source_h", fortran_double(source.h_init)),
        Substitution::new("source_r", fortran_double(source.r_init)),
        Substitution::new("source_T", fortran_double(source.t_init)),
        Substitution::new("source_vel", fortran_double(source.vel_init)),
        Substitution::new("source_alphas", real_repr(source.alfas_init)),
    ]
}

/// Read the template text. Absence is reported as a missing input.
pub fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => GenError::MissingInput {
            path: path.to_path_buf(),
        },
        _ => GenError::io(path, e),
    })
}

/// Render `template` with the canonical substitutions and write it to `path`.
pub fn write_config(
    path: &Path,
    template: &str,
    grid: &Grid,
    source: &SourceParams,
    params: &Params,
) -> Result<()> {
    let subs = canonical_substitutions(grid, source, params);
    let text = render_config(template, &subs);
    fs::write(path, text).map_err(|e| GenError::io(path, e))
}
