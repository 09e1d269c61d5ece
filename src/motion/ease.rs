use std::f64::consts::PI;

/// Easing curves, named after their GSAP counterparts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// `power2.out`, cubic.
    Power2Out,
    /// `power3.out`, quartic.
    Power3Out,
    BackOut { overshoot: f64 },
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = super::clamp01(t);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::BackOut { overshoot } => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Ease::ElasticOut { amplitude, period } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let amplitude = amplitude.max(1.0);
                let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin() + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::assert_close;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::BackOut { overshoot: 1.7 },
        Ease::ElasticOut { amplitude: 1.0, period: 0.3 },
    ];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert_close(ease.apply(0.0), 0.0);
            assert_close(ease.apply(1.0), 1.0);
            assert_close(ease.apply(-2.0), 0.0);
            assert_close(ease.apply(4.0), 1.0);
        }
    }

    #[test]
    fn power_curves_are_monotonic_and_front_loaded() {
        for ease in [Ease::Power2Out, Ease::Power3Out] {
            let mut last = 0.0;
            for step in 1..=100 {
                let value = ease.apply(step as f64 / 100.0);
                assert!(value >= last);
                last = value;
            }
            assert!(ease.apply(0.5) > 0.5);
        }
        assert!(Ease::Power3Out.apply(0.3) > Ease::Power2Out.apply(0.3));
    }

    #[test]
    fn back_out_overshoots() {
        let ease = Ease::BackOut { overshoot: 1.7 };
        let peak = (1..100)
            .map(|step| ease.apply(step as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}
