//! The single `requestAnimationFrame` loop. Each frame runs, in order: the
//! smooth-scroll step, trigger updates, then tweens.

use std::cell::{Cell, RefCell};

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{registry, smooth};
use crate::dom;
use crate::error::Result;
use crate::motion::tween;

/// Longest frame gap fed to time-based easing, in seconds.
const MAX_FRAME_DT: f64 = 0.1;

thread_local! {
    static RUNNING: Cell<bool> = Cell::new(false);
    static LAST_FRAME: Cell<Option<f64>> = Cell::new(None);
    static FRAME: RefCell<Option<Closure<dyn FnMut(f64)>>> = RefCell::new(None);
}

/// Starts the loop if it is not already running.
pub fn wake() {
    if RUNNING.with(|running| running.replace(true)) {
        return;
    }
    LAST_FRAME.with(|last| last.set(None));
    if let Err(e) = schedule() {
        warn!("Could not start the frame loop: {}", e);
        RUNNING.with(|running| running.set(false));
    }
}

fn schedule() -> Result<()> {
    let window = dom::window()?;
    FRAME.with(|frame| {
        let mut frame = frame.borrow_mut();
        let callback = frame.get_or_insert_with(|| Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(())
    })
}

fn on_frame(now: f64) {
    let dt = LAST_FRAME
        .with(|last| last.replace(Some(now)))
        .map_or(1.0 / 60.0, |last| ((now - last) / 1000.0).clamp(0.0, MAX_FRAME_DT));

    smooth::step(dt);
    registry::update(super::position(), dt);
    tween::tick(now);

    let idle = !smooth::is_active() && registry::is_idle() && tween::is_idle();
    if idle {
        RUNNING.with(|running| running.set(false));
    } else if let Err(e) = schedule() {
        warn!("Frame loop stopped: {}", e);
        RUNNING.with(|running| running.set(false));
    }
}
