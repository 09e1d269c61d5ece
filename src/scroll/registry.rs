use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use web_sys::Element;

use super::boundary::{Boundary, End, Geometry, Range};
use super::ticker;
use crate::config;
use crate::dom;
use crate::error::Result;
use crate::motion::{damp, Animated, VisualPatch};

/// Something with a measurable position in the document.
pub trait Region {
    fn geometry(&self) -> Option<Geometry>;
}

impl Region for Element {
    fn geometry(&self) -> Option<Geometry> {
        let scroll = dom::scroll_y().ok()?;
        let rect = self.get_bounding_client_rect();
        Some(Geometry {
            top: rect.top() + scroll,
            height: rect.height(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scrub {
    Off,
    /// Progress follows the scroll position directly.
    Instant,
    /// Progress catches up with the scroll position over about this many
    /// seconds.
    Smooth(f64),
}

pub type Callback = Rc<dyn Fn()>;
pub type ProgressCallback = Rc<dyn Fn(f64)>;

pub struct TriggerSpec {
    start: Boundary,
    end: End,
    scrub: Scrub,
    once: bool,
    pin: Option<Rc<Animated>>,
    label: &'static str,
    on_enter: Option<Callback>,
    on_leave: Option<Callback>,
    on_enter_back: Option<Callback>,
    on_leave_back: Option<Callback>,
    on_update: Option<ProgressCallback>,
}

impl TriggerSpec {
    pub fn new(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
            scrub: Scrub::Off,
            once: false,
            pin: None,
            label: "trigger",
            on_enter: None,
            on_leave: None,
            on_enter_back: None,
            on_leave_back: None,
            on_update: None,
        })
    }

    /// Fires `on_enter` the first time `start` is crossed, then disposes
    /// itself.
    pub fn once_at(start: &str) -> Result<Self> {
        Ok(Self {
            once: true,
            ..Self::new(start, "bottom top")?
        })
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    /// Holds `target` in place while the range is active.
    pub fn pin(mut self, target: &Rc<Animated>) -> Self {
        self.pin = Some(target.clone());
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn on_enter(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_enter = Some(Rc::new(callback));
        self
    }

    pub fn on_leave(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_leave = Some(Rc::new(callback));
        self
    }

    pub fn on_enter_back(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_enter_back = Some(Rc::new(callback));
        self
    }

    pub fn on_leave_back(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_leave_back = Some(Rc::new(callback));
        self
    }

    pub fn on_update(mut self, callback: impl Fn(f64) + 'static) -> Self {
        self.on_update = Some(Rc::new(callback));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Active,
    After,
}

impl Zone {
    fn of(scroll: f64, range: Range) -> Self {
        if scroll < range.start {
            Zone::Before
        } else if scroll > range.end {
            Zone::After
        } else {
            Zone::Active
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

fn crossings(from: Zone, to: Zone) -> &'static [Crossing] {
    use Crossing::*;
    match (from, to) {
        (Zone::Before, Zone::Active) => &[Enter],
        (Zone::Before, Zone::After) => &[Enter, Leave],
        (Zone::Active, Zone::After) => &[Leave],
        (Zone::After, Zone::Active) => &[EnterBack],
        (Zone::After, Zone::Before) => &[EnterBack, LeaveBack],
        (Zone::Active, Zone::Before) => &[LeaveBack],
        _ => &[],
    }
}

/// A callback invocation collected during an update, run once the registry
/// is no longer borrowed.
pub enum Dispatch {
    Event(Callback),
    Progress(ProgressCallback, f64),
    Pin(Rc<Animated>, f64),
}

impl Dispatch {
    pub fn fire(self) {
        match self {
            Dispatch::Event(callback) => callback(),
            Dispatch::Progress(callback, progress) => callback(progress),
            Dispatch::Pin(target, offset) => target.set(VisualPatch::new().y(offset)),
        }
    }
}

struct Entry {
    id: u64,
    region: Box<dyn Region>,
    spec: TriggerSpec,
    range: Option<Range>,
    zone: Zone,
    smoothed: f64,
    reported: f64,
    pin_offset: Option<f64>,
    dead: bool,
}

impl Entry {
    fn measure(&mut self, viewport_height: f64) {
        self.range = self
            .region
            .geometry()
            .map(|geometry| Range::measure(&self.spec.start, &self.spec.end, geometry, viewport_height));
    }

    fn callback(&self, crossing: Crossing) -> Option<&Callback> {
        match crossing {
            Crossing::Enter => self.spec.on_enter.as_ref(),
            Crossing::Leave => self.spec.on_leave.as_ref(),
            Crossing::EnterBack => self.spec.on_enter_back.as_ref(),
            Crossing::LeaveBack => self.spec.on_leave_back.as_ref(),
        }
    }

    fn update(&mut self, scroll: f64, dt: f64, out: &mut Vec<Dispatch>) {
        let Some(range) = self.range else {
            return;
        };

        let zone = Zone::of(scroll, range);
        for &crossing in crossings(self.zone, zone) {
            if config::trace_triggers() {
                debug!("trigger {} ({}) {:?} at {:.0}", self.id, self.spec.label, crossing, scroll);
            }
            if let Some(callback) = self.callback(crossing) {
                out.push(Dispatch::Event(callback.clone()));
            }
            if self.spec.once && crossing == Crossing::Enter {
                self.dead = true;
                return;
            }
        }
        self.zone = zone;

        let target = range.progress(scroll);
        let progress = match self.spec.scrub {
            Scrub::Off => None,
            Scrub::Instant => Some(target),
            Scrub::Smooth(seconds) if seconds > 0.0 => {
                let next = damp(self.smoothed, target, 4.0 / seconds, dt);
                Some(if (next - target).abs() < 1e-4 { target } else { next })
            }
            Scrub::Smooth(_) => Some(target),
        };
        if let Some(progress) = progress {
            let progress = crate::motion::clamp01(progress);
            self.smoothed = progress;
            if (progress - self.reported).abs() > 1e-6 {
                self.reported = progress;
                if let Some(callback) = &self.spec.on_update {
                    out.push(Dispatch::Progress(callback.clone(), progress));
                }
            }
        }

        if let Some(target) = &self.spec.pin {
            let offset = (scroll - range.start).clamp(0.0, range.length());
            if self.pin_offset != Some(offset) {
                self.pin_offset = Some(offset);
                out.push(Dispatch::Pin(target.clone(), offset));
            }
        }
    }
}

/// All live triggers, updated in registration order.
#[derive(Default)]
pub struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    pub fn register(&mut self, region: Box<dyn Region>, spec: TriggerSpec, viewport_height: f64) -> u64 {
        self.next_id += 1;
        let mut entry = Entry {
            id: self.next_id,
            region,
            spec,
            range: None,
            zone: Zone::Before,
            smoothed: 0.0,
            reported: 0.0,
            pin_offset: None,
            dead: false,
        };
        entry.measure(viewport_height);
        self.entries.push(entry);
        self.next_id
    }

    pub fn kill(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn refresh(&mut self, viewport_height: f64) {
        for entry in &mut self.entries {
            entry.measure(viewport_height);
        }
    }

    /// Advances every trigger to `scroll`. `dt` is the frame time in seconds.
    pub fn update(&mut self, scroll: f64, dt: f64) -> Vec<Dispatch> {
        let mut out = Vec::new();
        for entry in &mut self.entries {
            entry.update(scroll, dt, &mut out);
        }
        self.entries.retain(|entry| !entry.dead);
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
    /// Kills that arrived while the registry was borrowed.
    static DEFERRED_KILLS: RefCell<Vec<u64>> = RefCell::new(Vec::new());
}

pub fn register(region: &Element, spec: TriggerSpec) -> TriggerHandle {
    let viewport_height = dom::viewport_height().unwrap_or_default();
    let handle = insert(Box::new(region.clone()), spec, viewport_height);
    ticker::wake();
    handle
}

fn insert(region: Box<dyn Region>, spec: TriggerSpec, viewport_height: f64) -> TriggerHandle {
    let id = REGISTRY.with(|registry| registry.borrow_mut().register(region, spec, viewport_height));
    TriggerHandle {
        id,
        live: Cell::new(true),
    }
}

fn apply_deferred_kills(registry: &mut Registry) {
    let ids = DEFERRED_KILLS.with(|deferred| std::mem::take(&mut *deferred.borrow_mut()));
    for id in ids {
        registry.kill(id);
    }
}

/// Re-measures every trigger range against the current layout.
pub fn refresh() {
    let viewport_height = dom::viewport_height().unwrap_or_default();
    let count = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        apply_deferred_kills(&mut registry);
        registry.refresh(viewport_height);
        registry.len()
    });
    debug!("Re-measured {} scroll triggers", count);
}

pub(crate) fn update(scroll: f64, dt: f64) {
    let dispatches = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        apply_deferred_kills(&mut registry);
        registry.update(scroll, dt)
    });
    for dispatch in dispatches {
        dispatch.fire();
    }
}

pub(crate) fn is_idle() -> bool {
    REGISTRY.with(|registry| registry.borrow().is_empty())
}

/// Disposes its trigger when killed or dropped. Killing twice is harmless.
pub struct TriggerHandle {
    id: u64,
    live: Cell<bool>,
}

impl TriggerHandle {
    pub fn kill(&self) {
        if !self.live.replace(false) {
            return;
        }
        let killed = REGISTRY
            .try_with(|registry| match registry.try_borrow_mut() {
                Ok(mut registry) => {
                    registry.kill(self.id);
                    true
                }
                Err(_) => false,
            })
            .unwrap_or(true);
        if !killed {
            let _ = DEFERRED_KILLS.try_with(|deferred| deferred.borrow_mut().push(self.id));
        }
    }
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::visual::testing::RecordingSink;

    #[derive(Clone)]
    struct FixedRegion(Rc<Cell<Option<Geometry>>>);

    impl FixedRegion {
        fn at(top: f64, height: f64) -> Self {
            FixedRegion(Rc::new(Cell::new(Some(Geometry { top, height }))))
        }
    }

    impl Region for FixedRegion {
        fn geometry(&self) -> Option<Geometry> {
            self.0.get()
        }
    }

    const VIEWPORT: f64 = 1000.0;
    const FRAME: f64 = 1.0 / 60.0;

    fn run(registry: &mut Registry, scroll: f64) {
        for dispatch in registry.update(scroll, FRAME) {
            dispatch.fire();
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn once_trigger_fires_enter_exactly_once() {
        let mut registry = Registry::default();
        let (entered, on_enter) = counter();
        let spec = TriggerSpec::once_at("top 80%").unwrap().on_enter(on_enter);
        // starts at scroll 1200, ends at 2600
        registry.register(Box::new(FixedRegion::at(2000.0, 600.0)), spec, VIEWPORT);

        for scroll in [0.0, 1500.0, 0.0, 1500.0, 5000.0, 1500.0, 0.0, 1500.0] {
            run(&mut registry, scroll);
        }
        assert_eq!(entered.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn crossings_follow_scroll_direction() {
        let mut registry = Registry::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let record = |name: &'static str| {
            let log = log.clone();
            move || log.borrow_mut().push(name)
        };
        let spec = TriggerSpec::new("top bottom", "bottom top")
            .unwrap()
            .on_enter(record("enter"))
            .on_leave(record("leave"))
            .on_enter_back(record("enter_back"))
            .on_leave_back(record("leave_back"));
        // starts at 1000, ends at 2500
        registry.register(Box::new(FixedRegion::at(2000.0, 500.0)), spec, VIEWPORT);

        for scroll in [0.0, 1200.0, 3000.0, 2000.0, 500.0, 4000.0, 0.0] {
            run(&mut registry, scroll);
        }
        assert_eq!(
            *log.borrow(),
            vec![
                "enter",
                "leave",
                "enter_back",
                "leave_back",
                "enter",
                "leave",
                "enter_back",
                "leave_back",
            ]
        );
    }

    #[test]
    fn scrub_progress_is_clamped() {
        let mut registry = Registry::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let spec = TriggerSpec::new("top top", "bottom top")
            .unwrap()
            .scrub(Scrub::Instant)
            .on_update({
                let seen = seen.clone();
                move |p| seen.borrow_mut().push(p)
            });
        registry.register(Box::new(FixedRegion::at(0.0, 1000.0)), spec, VIEWPORT);

        for scroll in [-300.0, 250.0, 999.0, 4000.0, -50.0] {
            run(&mut registry, scroll);
        }
        let seen = seen.borrow();
        assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
        assert_eq!(seen.first().copied(), Some(0.25));
        assert_eq!(seen[seen.len() - 2], 1.0);
        assert_eq!(seen.last().copied(), Some(0.0));
    }

    #[test]
    fn progress_at_rest_is_not_reported() {
        let mut registry = Registry::default();
        let (updates, _) = counter();
        let spec = TriggerSpec::new("top top", "bottom top")
            .unwrap()
            .scrub(Scrub::Instant)
            .on_update({
                let updates = updates.clone();
                move |_| updates.set(updates.get() + 1)
            });
        registry.register(Box::new(FixedRegion::at(0.0, 1000.0)), spec, VIEWPORT);

        run(&mut registry, 0.0);
        run(&mut registry, 0.0);
        assert_eq!(updates.get(), 0);
        run(&mut registry, 500.0);
        run(&mut registry, 500.0);
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn smoothed_scrub_lags_then_settles() {
        let mut registry = Registry::default();
        let last = Rc::new(Cell::new(0.0));
        let spec = TriggerSpec::new("top top", "bottom top")
            .unwrap()
            .scrub(Scrub::Smooth(1.0))
            .on_update({
                let last = last.clone();
                move |p| last.set(p)
            });
        registry.register(Box::new(FixedRegion::at(0.0, 1000.0)), spec, VIEWPORT);

        run(&mut registry, 5000.0);
        let first = last.get();
        assert!(first > 0.0 && first < 0.2);

        for _ in 0..180 {
            run(&mut registry, 5000.0);
            assert!(last.get() <= 1.0);
        }
        assert_eq!(last.get(), 1.0);
    }

    #[test]
    fn killed_trigger_stops_firing() {
        let mut registry = Registry::default();
        let (updates, _) = counter();
        let spec = TriggerSpec::new("top top", "bottom top")
            .unwrap()
            .scrub(Scrub::Instant)
            .on_update({
                let updates = updates.clone();
                move |_| updates.set(updates.get() + 1)
            });
        let id = registry.register(Box::new(FixedRegion::at(0.0, 1000.0)), spec, VIEWPORT);

        run(&mut registry, 100.0);
        assert_eq!(updates.get(), 1);
        assert!(registry.kill(id));
        assert!(!registry.kill(id));
        for scroll in [200.0, 300.0, 900.0] {
            run(&mut registry, scroll);
        }
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let mut registry = Registry::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let order = order.clone();
            let spec = TriggerSpec::once_at("top bottom")
                .unwrap()
                .on_enter(move || order.borrow_mut().push(name));
            registry.register(Box::new(FixedRegion::at(500.0, 100.0)), spec, VIEWPORT);
        }
        run(&mut registry, 0.0);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn pin_offset_tracks_scroll_inside_range() {
        let mut registry = Registry::default();
        let sink = RecordingSink::default();
        let wrapper = Animated::new(sink);
        let spec = TriggerSpec::new("top top", "+=300%").unwrap().pin(&wrapper);
        registry.register(Box::new(FixedRegion::at(1000.0, 4000.0)), spec, VIEWPORT);

        run(&mut registry, 500.0);
        assert_eq!(wrapper.state().y, 0.0);
        run(&mut registry, 2500.0);
        assert_eq!(wrapper.state().y, 1500.0);
        run(&mut registry, 9000.0);
        assert_eq!(wrapper.state().y, 3000.0);
    }

    #[test]
    fn refresh_picks_up_layout_shifts() {
        let mut registry = Registry::default();
        let (entered, on_enter) = counter();
        let region = FixedRegion(Rc::new(Cell::new(None)));
        let spec = TriggerSpec::once_at("top bottom").unwrap().on_enter(on_enter);
        registry.register(Box::new(region.clone()), spec, VIEWPORT);

        run(&mut registry, 5000.0);
        assert_eq!(entered.get(), 0);

        region.0.set(Some(Geometry { top: 5500.0, height: 200.0 }));
        registry.refresh(VIEWPORT);
        run(&mut registry, 5000.0);
        assert_eq!(entered.get(), 1);
    }

    #[test]
    fn refresh_rescales_viewport_relative_ranges() {
        let mut registry = Registry::default();
        let wrapper = Animated::new(RecordingSink::default());
        let spec = TriggerSpec::new("top top", "+=300%").unwrap().pin(&wrapper);
        registry.register(Box::new(FixedRegion::at(0.0, 4000.0)), spec, VIEWPORT);

        run(&mut registry, 9000.0);
        assert_eq!(wrapper.state().y, 3000.0);

        registry.refresh(600.0);
        run(&mut registry, 9000.0);
        assert_eq!(wrapper.state().y, 1800.0);
    }

    fn counting_scrub(updates: &Rc<Cell<u32>>) -> TriggerSpec {
        let updates = updates.clone();
        TriggerSpec::new("top top", "bottom top")
            .unwrap()
            .scrub(Scrub::Instant)
            .on_update(move |_| updates.set(updates.get() + 1))
    }

    #[test]
    fn dropped_bindings_stop_their_triggers() {
        let updates = Rc::new(Cell::new(0));
        let handle = insert(Box::new(FixedRegion::at(0.0, 1000.0)), counting_scrub(&updates), VIEWPORT);
        let bindings = crate::scroll::Bindings::new(vec![handle], crate::motion::Timeline::new());

        update(100.0, FRAME);
        assert_eq!(updates.get(), 1);

        drop(bindings);
        assert!(is_idle());
        update(600.0, FRAME);
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn kill_while_registry_is_busy_lands_on_next_update() {
        let updates = Rc::new(Cell::new(0));
        let handle = insert(Box::new(FixedRegion::at(0.0, 1000.0)), counting_scrub(&updates), VIEWPORT);

        REGISTRY.with(|registry| {
            let _busy = registry.borrow();
            drop(handle);
        });
        assert!(!is_idle());

        update(500.0, FRAME);
        assert_eq!(updates.get(), 0);
        assert!(is_idle());
    }
}
