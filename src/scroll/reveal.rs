use std::rc::Rc;

use web_sys::Element;

use super::registry::{self, TriggerHandle, TriggerSpec};
use crate::error::Result;
use crate::motion::{Animated, Ease, Timeline, Tween, VisualPatch};

/// A one-shot fade-and-rise played the first time a region scrolls into view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub start: &'static str,
    /// Initial downward offset in pixels.
    pub offset: f64,
    pub duration: f64,
    pub delay: f64,
    /// Extra delay per target after the first.
    pub stagger: f64,
    pub ease: Ease,
}

impl Default for Reveal {
    fn default() -> Self {
        Self {
            start: "top 85%",
            offset: 30.0,
            duration: 0.8,
            delay: 0.0,
            stagger: 0.0,
            ease: Ease::Power3Out,
        }
    }
}

impl Reveal {
    pub fn at(start: &'static str) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn delays(&self, count: usize) -> Vec<f64> {
        (0..count)
            .map(|index| self.delay + index as f64 * self.stagger)
            .collect()
    }

    pub fn hidden(&self) -> VisualPatch {
        VisualPatch::new().opacity(0.0).y(self.offset)
    }

    pub fn shown() -> VisualPatch {
        VisualPatch::new().opacity(1.0).y(0.0)
    }

    pub fn tweens(&self, targets: &[Rc<Animated>]) -> Vec<Tween> {
        targets
            .iter()
            .zip(self.delays(targets.len()))
            .map(|(target, delay)| {
                Tween::to(target, Self::shown())
                    .duration(self.duration)
                    .delay(delay)
                    .ease(self.ease)
            })
            .collect()
    }
}

/// Hides `targets`, then plays `reveal` on them once `region` enters.
pub fn reveal_on_enter(
    region: &Element,
    targets: Vec<Rc<Animated>>,
    reveal: Reveal,
    timeline: &Rc<Timeline>,
) -> Result<TriggerHandle> {
    let spec = TriggerSpec::once_at(reveal.start)?.label("reveal");
    for target in &targets {
        target.set(reveal.hidden());
    }
    let timeline = timeline.clone();
    let spec = spec.on_enter(move || {
        for tween in reveal.tweens(&targets) {
            timeline.add(tween);
        }
    });
    Ok(registry::register(region, spec))
}
