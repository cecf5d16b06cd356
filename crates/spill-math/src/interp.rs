//! Bilinear (and time-linear) sampling of a FieldGrid.
//!
//! The spatial part mirrors the classic fractional-index scheme: map the
//! query to fractional axis indices, clamp, and blend the four cell
//! corners. Time-varying fields add a linear blend between the two
//! bracketing time slices.

use spill_types::grid::FieldGrid;

/// Sample `var` at a geographic position and grid-relative hour.
///
/// Never fails: an absent variable yields 0.0 and out-of-axis inputs
/// clamp to the grid boundary. Whether an out-of-domain parcel should
/// receive this grid's contribution at all is the caller's decision via
/// [`FieldGrid::contains`].
pub fn sample(grid: &FieldGrid, var: &str, lat: f64, lon: f64, time_hours: f64) -> f64 {
    let data = match grid.var(var) {
        Some(data) => data,
        None => return 0.0,
    };

    let n_lat = grid.n_lat();
    let n_lon = grid.n_lon();

    let fi = ((lat - grid.lat_min()) / grid.d_lat()).clamp(0.0, (n_lat - 1) as f64);
    let fj = ((lon - grid.lon_min()) / grid.d_lon()).clamp(0.0, (n_lon - 1) as f64);

    let i0 = (fi.floor() as usize).min(n_lat - 2);
    let j0 = (fj.floor() as usize).min(n_lon - 2);
    let di = fi - i0 as f64;
    let dj = fj - j0 as f64;

    let bilinear = |t: usize| -> f64 {
        let v00 = data[grid.idx(t, i0, j0)];
        let v01 = data[grid.idx(t, i0, j0 + 1)];
        let v10 = data[grid.idx(t, i0 + 1, j0)];
        let v11 = data[grid.idx(t, i0 + 1, j0 + 1)];
        (1.0 - di) * (1.0 - dj) * v00
            + (1.0 - di) * dj * v01
            + di * (1.0 - dj) * v10
            + di * dj * v11
    };

    let times = match &grid.time_hours {
        Some(times) if times.len() > 1 => times,
        // Static field, or a degenerate single-slice time axis.
        _ => return bilinear(0),
    };

    let n_time = times.len();
    let th = time_hours.clamp(times[0], times[n_time - 1]);

    // Linear scan; nT is small (tens of slices) in practice.
    let mut t0 = n_time - 2;
    for k in 0..n_time - 1 {
        if th <= times[k + 1] {
            t0 = k;
            break;
        }
    }
    let span = times[t0 + 1] - times[t0];
    let dt_frac = if span > 0.0 { (th - times[t0]) / span } else { 0.0 };

    (1.0 - dt_frac) * bilinear(t0) + dt_frac * bilinear(t0 + 1)
}
