/// Endpoints of the fixed diverging ramp: cool blue through near-white to
/// warm red, low importance to high.
const COOL: (u8, u8, u8) = (59, 76, 192);
const MID: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// RGB color for a display position t in [0, 1]; out-of-range values clamp.
pub fn diverging_color(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        lerp(COOL, MID, t * 2.0)
    } else {
        lerp(MID, WARM, (t - 0.5) * 2.0)
    }
}

/// Map raw scores onto [0, 1] display positions using the observed min and
/// max, so the palette spans the working set's actual score range. A flat
/// score column maps everything to the midpoint.
pub fn display_positions(scores: &[f64]) -> Vec<f64> {
    let mut bounds: Option<(f64, f64)> = None;
    for score in scores {
        bounds = Some(match bounds {
            None => (*score, *score),
            Some((lo, hi)) => (lo.min(*score), hi.max(*score)),
        });
    }
    let Some((lo, hi)) = bounds else {
        return Vec::new();
    };
    let span = hi - lo;
    scores
        .iter()
        .map(|score| if span > 0.0 { (score - lo) / span } else { 0.5 })
        .collect()
}

fn lerp(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let channel = |x: u8, y: u8| -> u8 {
        (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8
    };
    (channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}
