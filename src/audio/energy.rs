//! Frame energy estimation.

/// Root-mean-square of a frame's samples.
///
/// Pure and deterministic, no allocation. Samples are expected to be
/// normalized to [-1.0, 1.0], so the result is also in [0.0, 1.0]:
/// 0.0 is silence, ~0.707 a full-scale sine wave.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&sample| {
            let s = sample as f64;
            s * s
        })
        .sum();

    (sum_squares / samples.len() as f64).sqrt() as f32
}
