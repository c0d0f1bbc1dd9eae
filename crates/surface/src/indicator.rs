/// Number of pulsing dots under the spinner.
pub const DOT_COUNT: usize = 3;

const SPIN_PERIOD: f32 = 1.0;
const PULSE_PERIOD: f32 = 1.5;
const PULSE_STAGGER: f32 = 0.2;

/// Presentation state of one pulsing dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotPulse {
    pub scale: f32,
    pub opacity: f32,
}

/// Stateless loading placeholder: a spinning ring, a label, and three
/// independently-phased pulsing dots. Purely a function of elapsed time;
/// success or failure is the caller's state, not the indicator's.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    pub label: String,
}

impl LoadingIndicator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Spinner rotation in radians: one full revolution per second.
    pub fn spinner_angle(t: f32) -> f32 {
        std::f32::consts::TAU * (t / SPIN_PERIOD)
    }

    /// Pulse state for dot `index` at elapsed time `t`.
    ///
    /// Each dot repeats a 1.5 s pulse (scale 1.0 -> 1.2 -> 1.0, opacity
    /// 0.5 -> 1.0 -> 0.5), offset by 0.2 s per dot so the three are never
    /// in phase together. Before its first pulse a dot rests.
    pub fn dot_pulse(index: usize, t: f32) -> DotPulse {
        let local = t - index as f32 * PULSE_STAGGER;
        if local < 0.0 {
            return DotPulse {
                scale: 1.0,
                opacity: 0.5,
            };
        }
        let phase = (local / PULSE_PERIOD).fract();
        let s = (std::f32::consts::PI * phase).sin();
        DotPulse {
            scale: 1.0 + 0.2 * s,
            opacity: 0.5 + 0.5 * s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_completes_a_revolution_per_second() {
        assert_eq!(LoadingIndicator::spinner_angle(0.0), 0.0);
        let one = LoadingIndicator::spinner_angle(1.0);
        assert!((one - std::f32::consts::TAU).abs() < 1e-6);
        // Linear in time.
        let half = LoadingIndicator::spinner_angle(0.5);
        assert!((one - 2.0 * half).abs() < 1e-5);
    }

    #[test]
    fn dot_pulse_stays_in_bounds() {
        for index in 0..DOT_COUNT {
            for step in 0..300 {
                let p = LoadingIndicator::dot_pulse(index, step as f32 * 0.05);
                assert!((1.0..=1.2).contains(&p.scale));
                assert!((0.5..=1.0).contains(&p.opacity));
            }
        }
    }

    #[test]
    fn dots_are_staggered() {
        // At the moment dot 0 peaks, dot 2 lags by 0.4 s of phase.
        let t = PULSE_PERIOD / 2.0;
        let first = LoadingIndicator::dot_pulse(0, t);
        let third = LoadingIndicator::dot_pulse(2, t);
        assert!((first.scale - 1.2).abs() < 1e-5);
        assert!(third.scale < first.scale);
    }

    #[test]
    fn dot_rests_before_its_delay() {
        let p = LoadingIndicator::dot_pulse(2, 0.1);
        assert_eq!(
            p,
            DotPulse {
                scale: 1.0,
                opacity: 0.5
            }
        );
    }

    #[test]
    fn label_is_caller_supplied() {
        let i = LoadingIndicator::new("Loading Interactive Skills...");
        assert_eq!(i.label, "Loading Interactive Skills...");
    }
}
