//! Eased wheel scrolling. Wheel input moves a target position; every frame
//! the page scrolls part of the way there.

use std::cell::RefCell;

use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, WheelEvent};

use super::ticker;
use crate::config::SmoothScrollOptions;
use crate::dom;
use crate::error::{Error, Result};
use crate::motion::damp;

/// Pixels per wheel "line" when the browser reports deltas in lines.
const LINE_HEIGHT: f64 = 100.0 / 6.0;

/// Distance under which the position snaps to the target.
const SETTLE_DISTANCE: f64 = 0.5;

pub fn wheel_delta_px(delta: f64, delta_mode: u32, viewport_height: f64) -> f64 {
    match delta_mode {
        WheelEvent::DOM_DELTA_LINE => delta * LINE_HEIGHT,
        WheelEvent::DOM_DELTA_PAGE => delta * viewport_height,
        _ => delta,
    }
}

/// Pinch-zoom (ctrl + wheel) and purely horizontal swipes stay native.
pub fn takes_over(ctrl_key: bool, delta_y: f64) -> bool {
    !ctrl_key && delta_y != 0.0
}

/// Position state of the driver, free of any DOM access.
#[derive(Clone, Debug, PartialEq)]
pub struct Scroller {
    options: SmoothScrollOptions,
    current: f64,
    target: f64,
    animating: bool,
}

impl Scroller {
    pub fn new(options: SmoothScrollOptions, position: f64) -> Self {
        Self {
            options,
            current: position,
            target: position,
            animating: false,
        }
    }

    pub fn position(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn on_wheel(&mut self, delta: f64, limit: f64) {
        self.target = (self.target + delta * self.options.wheel_multiplier).clamp(0.0, limit.max(0.0));
        self.animating = true;
    }

    /// Adopts a position reached by native scrolling (keyboard, scrollbar).
    /// Ignored while an eased scroll is in flight.
    pub fn sync(&mut self, native: f64) {
        if !self.animating {
            self.current = native;
            self.target = native;
        }
    }

    /// Moves toward the target. Returns the new position, or `None` when at
    /// rest.
    pub fn advance(&mut self, dt: f64) -> Option<f64> {
        if !self.animating {
            return None;
        }
        self.current = damp(self.current, self.target, self.options.lerp * 60.0, dt);
        if (self.target - self.current).abs() < SETTLE_DISTANCE {
            self.current = self.target;
            self.animating = false;
        }
        Some(self.current)
    }
}

struct Listeners {
    on_wheel: Closure<dyn FnMut(WheelEvent)>,
    on_scroll: Closure<dyn FnMut()>,
}

struct Driver {
    scroller: Scroller,
    listeners: Option<Listeners>,
}

thread_local! {
    static DRIVER: RefCell<Option<Driver>> = RefCell::new(None);
}

/// Keeps smooth scrolling active; tears it down when dropped.
pub struct SmoothScroll {
    _private: (),
}

impl Drop for SmoothScroll {
    fn drop(&mut self) {
        destroy();
    }
}

/// Claims the single driver slot.
fn install(scroller: Scroller, listeners: Option<Listeners>) -> Result<SmoothScroll> {
    DRIVER.with(|driver| {
        let mut driver = driver.borrow_mut();
        if driver.is_some() {
            return Err(Error::AlreadyActive);
        }
        *driver = Some(Driver { scroller, listeners });
        Ok(SmoothScroll { _private: () })
    })
}

/// Takes over wheel scrolling for the whole page. Only one driver may be
/// active at a time.
pub fn init(options: SmoothScrollOptions) -> Result<SmoothScroll> {
    if is_active() {
        return Err(Error::AlreadyActive);
    }
    let window = dom::window()?;
    let start = window.scroll_y()?;

    let on_wheel = Closure::wrap(Box::new(move |event: WheelEvent| {
        if !takes_over(event.ctrl_key(), event.delta_y()) {
            return;
        }
        event.prevent_default();
        let viewport_height = dom::viewport_height().unwrap_or_default();
        let delta = wheel_delta_px(event.delta_y(), event.delta_mode(), viewport_height);
        let limit = dom::scroll_limit().unwrap_or_default();
        DRIVER.with(|driver| {
            if let Some(driver) = driver.borrow_mut().as_mut() {
                driver.scroller.on_wheel(delta, limit);
            }
        });
        ticker::wake();
    }) as Box<dyn FnMut(WheelEvent)>);

    let on_scroll = Closure::wrap(Box::new(move || {
        if let Ok(native) = dom::scroll_y() {
            DRIVER.with(|driver| {
                if let Ok(mut driver) = driver.try_borrow_mut() {
                    if let Some(driver) = driver.as_mut() {
                        driver.scroller.sync(native);
                    }
                }
            });
        }
    }) as Box<dyn FnMut()>);

    let wheel_options = AddEventListenerOptions::new();
    wheel_options.set_passive(false);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        on_wheel.as_ref().unchecked_ref(),
        &wheel_options,
    )?;
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;

    let listeners = Listeners { on_wheel, on_scroll };
    let guard = install(Scroller::new(options, start), Some(listeners))?;
    ticker::wake();
    info!("Smooth scrolling enabled");
    Ok(guard)
}

fn destroy() {
    let Some(driver) = DRIVER.with(|driver| driver.borrow_mut().take()) else {
        return;
    };
    if let (Some(listeners), Ok(window)) = (driver.listeners, dom::window()) {
        let _ = window.remove_event_listener_with_callback("wheel", listeners.on_wheel.as_ref().unchecked_ref());
        let _ = window.remove_event_listener_with_callback("scroll", listeners.on_scroll.as_ref().unchecked_ref());
    }
    debug!("Smooth scrolling disabled");
}

pub fn is_active() -> bool {
    DRIVER.with(|driver| driver.borrow().is_some())
}

/// Current eased position, if the driver is active.
pub fn position() -> Option<f64> {
    DRIVER.with(|driver| driver.borrow().as_ref().map(|driver| driver.scroller.position()))
}

pub(crate) fn step(dt: f64) {
    let next = DRIVER.with(|driver| {
        driver
            .borrow_mut()
            .as_mut()
            .and_then(|driver| driver.scroller.advance(dt))
    });
    if let (Some(y), Ok(window)) = (next, dom::window()) {
        window.scroll_to_with_x_and_y(0.0, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn wheel_moves_target_within_limits() {
        let mut scroller = Scroller::new(SmoothScrollOptions::default(), 0.0);
        scroller.on_wheel(-400.0, 5000.0);
        assert_eq!(scroller.target(), 0.0);
        scroller.on_wheel(300.0, 5000.0);
        scroller.on_wheel(300.0, 5000.0);
        assert_eq!(scroller.target(), 600.0);
        scroller.on_wheel(10_000.0, 5000.0);
        assert_eq!(scroller.target(), 5000.0);
    }

    #[test]
    fn advance_eases_and_settles() {
        let mut scroller = Scroller::new(SmoothScrollOptions::default(), 0.0);
        scroller.on_wheel(1000.0, 5000.0);

        let first = scroller.advance(FRAME).unwrap();
        assert!(first > 80.0 && first < 110.0);

        let mut last = first;
        let mut frames = 1;
        while let Some(position) = scroller.advance(FRAME) {
            assert!(position >= last && position <= 1000.0);
            last = position;
            frames += 1;
            assert!(frames < 600);
        }
        assert_eq!(scroller.position(), 1000.0);
        assert!(!scroller.is_animating());
    }

    #[test]
    fn native_scroll_syncs_only_at_rest() {
        let mut scroller = Scroller::new(SmoothScrollOptions::default(), 0.0);
        scroller.sync(750.0);
        assert_eq!(scroller.position(), 750.0);
        assert_eq!(scroller.target(), 750.0);

        scroller.on_wheel(100.0, 5000.0);
        scroller.sync(10.0);
        assert_eq!(scroller.target(), 850.0);
    }

    #[test]
    fn wheel_modes_are_normalized() {
        assert_eq!(wheel_delta_px(3.0, WheelEvent::DOM_DELTA_PIXEL, 900.0), 3.0);
        assert!((wheel_delta_px(3.0, WheelEvent::DOM_DELTA_LINE, 900.0) - 50.0).abs() < 1e-9);
        assert_eq!(wheel_delta_px(1.0, WheelEvent::DOM_DELTA_PAGE, 900.0), 900.0);
    }

    #[test]
    fn horizontal_and_zoom_gestures_stay_native() {
        assert!(takes_over(false, 40.0));
        assert!(takes_over(false, -3.0));
        assert!(!takes_over(false, 0.0));
        assert!(!takes_over(true, 40.0));
    }

    #[test]
    fn only_one_driver_at_a_time() {
        let options = SmoothScrollOptions::default();
        let guard = install(Scroller::new(options, 120.0), None).unwrap();
        assert!(is_active());
        assert_eq!(position(), Some(120.0));

        assert!(matches!(init(options), Err(Error::AlreadyActive)));
        assert!(matches!(
            install(Scroller::new(options, 0.0), None),
            Err(Error::AlreadyActive)
        ));

        drop(guard);
        assert!(!is_active());
        assert_eq!(position(), None);
    }
}
