//! Scroll-progress math and the small animation engine built on it.

pub mod ease;
pub mod tween;
pub mod visual;

pub use ease::Ease;
pub use tween::{Timeline, Tween};
pub use visual::{Animated, StyleSink, VisualPatch, VisualState};

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + t * (end - start)
}

/// Rescales `progress` so that `[from, to]` maps onto `[0, 1]`, holding at
/// the nearest end outside that window.
pub fn phase(progress: f64, from: f64, to: f64) -> f64 {
    if to <= from {
        return if clamp01(progress) >= to { 1.0 } else { 0.0 };
    }
    clamp01((clamp01(progress) - from) / (to - from))
}

/// Local progress of item `index` when `[0, 1]` is split into `count` equal
/// segments.
pub fn segment_progress(progress: f64, index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let size = 1.0 / count as f64;
    phase(progress, index as f64 * size, (index + 1) as f64 * size)
}

/// Exponential approach toward `target`, independent of frame rate.
/// `lambda` is per second, `dt` in seconds.
pub fn damp(current: f64, target: f64, lambda: f64, dt: f64) -> f64 {
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(f64::NAN), 0.0);
    }

    #[test]
    fn phase_holds_outside_window() {
        assert_eq!(phase(0.2, 0.5, 1.0), 0.0);
        assert_eq!(phase(0.5, 0.5, 1.0), 0.0);
        assert_close(phase(0.75, 0.5, 1.0), 0.5);
        assert_eq!(phase(1.0, 0.5, 1.0), 1.0);
        assert_eq!(phase(0.8, 0.0, 0.5), 1.0);
        assert_eq!(phase(3.0, 0.0, 0.5), 1.0);
    }

    #[test]
    fn segment_boundaries() {
        for count in 1..6 {
            for index in 0..count {
                let start = index as f64 / count as f64;
                let end = (index + 1) as f64 / count as f64;
                assert_close(segment_progress(start, index, count), 0.0);
                assert_close(segment_progress(end, index, count), 1.0);
                assert_close(segment_progress((start + end) / 2.0, index, count), 0.5);
            }
        }
        assert_eq!(segment_progress(0.5, 0, 0), 0.0);
    }

    #[test]
    fn damp_converges_without_overshoot() {
        let mut value = 0.0;
        for _ in 0..600 {
            value = damp(value, 100.0, 6.0, 1.0 / 60.0);
            assert!(value <= 100.0);
        }
        assert!((value - 100.0).abs() < 1e-6);
    }
}
