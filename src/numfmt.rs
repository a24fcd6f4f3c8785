// The solver's readers expect C-style numbers: exponents carry an explicit
// sign and at least two digits, and integral reals keep a trailing `.0`.

/// Rewrite a Rust exponent suffix (`e5`, `e-7`) as `e+05`, `e-07`.
fn c_exponent(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s.to_string(),
    }
}

fn non_finite(v: f64) -> Option<&'static str> {
    if v.is_nan() {
        Some("nan")
    } else if v == f64::INFINITY {
        Some("inf")
    } else if v == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Shortest round-trip representation of a real, always recognisable as
/// a real: `-100.0`, `20.0`, `1.85`, `1e-05`, `1e+16`.
pub fn real_repr(v: f64) -> String {
    if let Some(s) = non_finite(v) {
        return s.to_string();
    }
    let a = v.abs();
    if a == 0.0 || (1e-4..1e16).contains(&a) {
        let s = format!("{v}");
        if s.contains('.') { s } else { format!("{s}.0") }
    } else {
        c_exponent(&format!("{v:e}"))
    }
}

/// `%<width>.<prec>e`: scientific notation, right-aligned.
pub fn sci(v: f64, width: usize, prec: usize) -> String {
    let body = match non_finite(v) {
        Some(s) => s.to_string(),
        None => c_exponent(&format!("{v:.prec$e}")),
    };
    format!("{body:>width$}")
}

/// `%1.<prec>f`.
pub fn fixed(v: f64, prec: usize) -> String {
    match non_finite(v) {
        Some(s) => s.to_string(),
        None => format!("{v:.prec$}"),
    }
}
