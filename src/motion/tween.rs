use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{clamp01, Animated, Ease, VisualPatch};
use crate::scroll::ticker;

/// A one-shot animation of some visual properties toward target values.
pub struct Tween {
    target: Rc<Animated>,
    from: Option<VisualPatch>,
    to: VisualPatch,
    duration: f64,
    delay: f64,
    ease: Ease,
    started_at: Option<f64>,
    start_values: Option<VisualPatch>,
}

impl Tween {
    /// Animates from whatever the target currently shows.
    pub fn to(target: &Rc<Animated>, to: VisualPatch) -> Self {
        Self {
            target: target.clone(),
            from: None,
            to,
            duration: 0.5,
            delay: 0.0,
            ease: Ease::Power2Out,
            started_at: None,
            start_values: None,
        }
    }

    /// Animates from explicit values, which are applied right away so a
    /// delayed tween does not flash its final state.
    pub fn from_to(target: &Rc<Animated>, from: VisualPatch, to: VisualPatch) -> Self {
        target.set(from);
        Self {
            from: Some(from),
            ..Self::to(target, to)
        }
    }

    /// Seconds.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Seconds.
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Advances to frame time `now` (milliseconds). The first tick marks the
    /// start. Returns true once the tween has written its final values.
    pub fn tick(&mut self, now: f64) -> bool {
        let started = *self.started_at.get_or_insert(now);
        let elapsed = (now - started) / 1000.0 - self.delay;
        if elapsed < 0.0 {
            return false;
        }

        let start = match self.start_values {
            Some(start) => start,
            None => {
                let current = self.to.capture(&self.target.state());
                let start = self.from.map_or(current, |from| from.or(current));
                self.start_values = Some(start);
                start
            }
        };

        let t = if self.duration <= 0.0 {
            1.0
        } else {
            clamp01(elapsed / self.duration)
        };
        self.target
            .set(VisualPatch::between(&start, &self.to, self.ease.apply(t)));
        t >= 1.0
    }
}

/// Running tweens, ticked once per frame in start order.
#[derive(Default)]
pub struct Animator {
    next_id: u64,
    running: Vec<(u64, Tween)>,
}

impl Animator {
    pub fn add(&mut self, tween: Tween) -> u64 {
        self.next_id += 1;
        self.running.push((self.next_id, tween));
        self.next_id
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.running.len();
        self.running.retain(|(running_id, _)| *running_id != id);
        self.running.len() != before
    }

    pub fn tick(&mut self, now: f64) {
        self.running.retain_mut(|(_, tween)| !tween.tick(now));
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

thread_local! {
    static ANIMATOR: RefCell<Animator> = RefCell::new(Animator::default());
}

/// Starts `tween` on the shared frame loop.
pub fn play(tween: Tween) -> TweenHandle {
    let id = ANIMATOR.with(|animator| animator.borrow_mut().add(tween));
    ticker::wake();
    TweenHandle {
        id,
        live: Cell::new(true),
    }
}

pub(crate) fn tick(now: f64) {
    ANIMATOR.with(|animator| animator.borrow_mut().tick(now));
}

pub(crate) fn is_idle() -> bool {
    ANIMATOR.with(|animator| animator.borrow().is_empty())
}

/// Stops its tween when killed or dropped.
pub struct TweenHandle {
    id: u64,
    live: Cell<bool>,
}

impl TweenHandle {
    pub fn kill(&self) {
        if !self.live.replace(false) {
            return;
        }
        let _ = ANIMATOR.try_with(|animator| {
            if let Ok(mut animator) = animator.try_borrow_mut() {
                animator.remove(self.id);
            }
        });
    }
}

impl Drop for TweenHandle {
    fn drop(&mut self) {
        self.kill();
    }
}

/// A group of tweens that share a lifetime with the section that started
/// them.
#[derive(Default)]
pub struct Timeline {
    handles: RefCell<Vec<TweenHandle>>,
}

impl Timeline {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn add(&self, tween: Tween) {
        let handle = play(tween);
        self.handles.borrow_mut().push(handle);
    }

    pub fn kill(&self) {
        for handle in self.handles.borrow_mut().drain(..) {
            handle.kill();
        }
    }
}
