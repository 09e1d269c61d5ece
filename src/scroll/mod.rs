//! Scroll-driven animation: trigger ranges, smooth scrolling and the frame
//! loop that ties them together.

pub mod boundary;
pub mod registry;
pub mod reveal;
pub mod smooth;
pub mod ticker;

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::Callback;

use crate::config;
use crate::dom;
use crate::motion::Timeline;

pub use registry::{refresh, register, Scrub, TriggerHandle, TriggerSpec};
pub use reveal::{reveal_on_enter, Reveal};

/// Scroll position triggers are evaluated against: the eased position while
/// smooth scrolling is active, the native one otherwise.
pub fn position() -> f64 {
    smooth::position().unwrap_or_else(|| dom::scroll_y().unwrap_or_default())
}

thread_local! {
    static REFRESH_PENDING: Cell<bool> = Cell::new(false);
}

/// Schedules a re-measure shortly. Requests arriving before it runs are
/// merged into it.
pub fn request_refresh() {
    if REFRESH_PENDING.with(|pending| pending.replace(true)) {
        return;
    }
    let timeout = Timeout::new(config::IMAGE_REFRESH_DEBOUNCE_MS, || {
        REFRESH_PENDING.with(|pending| pending.set(false));
        refresh();
    });
    timeout.forget();
}

/// `onload` handler for images whose size can move trigger ranges.
pub fn refresh_on_load() -> Callback<web_sys::Event> {
    Callback::from(|_| request_refresh())
}

/// Everything a mounted section registered. Dropping it disposes the
/// triggers and stops the tweens.
pub struct Bindings {
    triggers: Vec<TriggerHandle>,
    timeline: Rc<Timeline>,
}

impl Bindings {
    pub fn new(triggers: Vec<TriggerHandle>, timeline: Rc<Timeline>) -> Self {
        Self { triggers, timeline }
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        for trigger in &self.triggers {
            trigger.kill();
        }
        self.timeline.kill();
    }
}
