use image::Rgb;
use rand::Rng;

/// Viridis color map sampled at eleven evenly spaced stops
const VIRIDIS: [[u8; 3]; 11] = [
    [68, 1, 84],
    [72, 36, 117],
    [65, 68, 135],
    [53, 95, 141],
    [42, 120, 142],
    [33, 145, 140],
    [34, 168, 132],
    [68, 190, 112],
    [122, 209, 81],
    [189, 223, 38],
    [253, 231, 37],
];

/// Linearly interpolated viridis color for `t` in `[0, 1]`
pub fn viridis(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (VIRIDIS.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = pos - lo as f64;

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    Rgb([
        mix(VIRIDIS[lo][0], VIRIDIS[hi][0]),
        mix(VIRIDIS[lo][1], VIRIDIS[hi][1]),
        mix(VIRIDIS[lo][2], VIRIDIS[hi][2]),
    ])
}

/// Random color from the map
pub fn random_color<R: Rng>(rng: &mut R) -> Rgb<u8> {
    viridis(rng.gen_range(0.0..1.0))
}
