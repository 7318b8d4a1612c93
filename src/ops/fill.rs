/// Forward-fills gaps with the latest present value.
///
/// Returns the filled copy and the number of leading gaps, which stay missing.
pub fn forward_fill(x: &[f64]) -> (Vec<f64>, usize) {
    let mut out = Vec::with_capacity(x.len());
    let mut last = f64::NAN;
    for &v in x {
        if v.is_nan() {
            out.push(last);
        } else {
            last = v;
            out.push(v);
        }
    }
    let leading = out.iter().take_while(|v| v.is_nan()).count();
    (out, leading)
}
