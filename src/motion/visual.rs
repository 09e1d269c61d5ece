use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlElement;

use super::lerp;

/// Resolved visual properties of one animated element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub rotation: f64,
    pub border_radius: Option<f64>,
    pub z_index: Option<i32>,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            rotation: 0.0,
            border_radius: None,
            z_index: None,
        }
    }
}

impl VisualState {
    pub fn transform(&self) -> String {
        let mut transform = format!("translate3d({:.3}px, {:.3}px, 0px)", self.x, self.y);
        if self.y_percent != 0.0 {
            transform.push_str(&format!(" translateY({:.3}%)", self.y_percent));
        }
        transform.push_str(&format!(" rotate({:.3}deg) scale({:.4})", self.rotation, self.scale));
        transform
    }

    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("opacity", format!("{:.4}", self.opacity)),
            ("transform", self.transform()),
        ];
        if let Some(radius) = self.border_radius {
            out.push(("border-radius", format!("{:.3}px", radius)));
        }
        if let Some(z) = self.z_index {
            out.push(("z-index", z.to_string()));
        }
        out
    }
}

/// A partial update. Unset fields leave the current value alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualPatch {
    pub opacity: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub y_percent: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub border_radius: Option<f64>,
    pub z_index: Option<i32>,
}

impl VisualPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, value: f64) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn y_percent(mut self, value: f64) -> Self {
        self.y_percent = Some(value);
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotation(mut self, value: f64) -> Self {
        self.rotation = Some(value);
        self
    }

    pub fn border_radius(mut self, value: f64) -> Self {
        self.border_radius = Some(value);
        self
    }

    pub fn z_index(mut self, value: i32) -> Self {
        self.z_index = Some(value);
        self
    }

    pub fn apply(&self, state: &mut VisualState) {
        if let Some(v) = self.opacity {
            state.opacity = v;
        }
        if let Some(v) = self.x {
            state.x = v;
        }
        if let Some(v) = self.y {
            state.y = v;
        }
        if let Some(v) = self.y_percent {
            state.y_percent = v;
        }
        if let Some(v) = self.scale {
            state.scale = v;
        }
        if let Some(v) = self.rotation {
            state.rotation = v;
        }
        if let Some(v) = self.border_radius {
            state.border_radius = Some(v);
        }
        if let Some(v) = self.z_index {
            state.z_index = Some(v);
        }
    }

    /// Field-wise `self`, falling back to `other`.
    pub fn or(self, other: VisualPatch) -> VisualPatch {
        VisualPatch {
            opacity: self.opacity.or(other.opacity),
            x: self.x.or(other.x),
            y: self.y.or(other.y),
            y_percent: self.y_percent.or(other.y_percent),
            scale: self.scale.or(other.scale),
            rotation: self.rotation.or(other.rotation),
            border_radius: self.border_radius.or(other.border_radius),
            z_index: self.z_index.or(other.z_index),
        }
    }

    /// Values of `from` for every field this patch sets.
    pub fn capture(&self, from: &VisualState) -> VisualPatch {
        VisualPatch {
            opacity: self.opacity.map(|_| from.opacity),
            x: self.x.map(|_| from.x),
            y: self.y.map(|_| from.y),
            y_percent: self.y_percent.map(|_| from.y_percent),
            scale: self.scale.map(|_| from.scale),
            rotation: self.rotation.map(|_| from.rotation),
            border_radius: self.border_radius.map(|_| from.border_radius.unwrap_or(0.0)),
            z_index: self.z_index.map(|_| from.z_index.unwrap_or(0)),
        }
    }

    /// Interpolates field by field toward `self`. Fields missing from `from`
    /// jump straight to the target. `z_index` switches at the end.
    pub fn between(from: &VisualPatch, to: &VisualPatch, t: f64) -> VisualPatch {
        let mix = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => Some(lerp(a, b, t)),
            (_, b) => b,
        };
        VisualPatch {
            opacity: mix(from.opacity, to.opacity),
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            y_percent: mix(from.y_percent, to.y_percent),
            scale: mix(from.scale, to.scale),
            rotation: mix(from.rotation, to.rotation),
            border_radius: mix(from.border_radius, to.border_radius),
            z_index: if t >= 1.0 { to.z_index } else { from.z_index.or(to.z_index) },
        }
    }
}

/// Where resolved styles end up. The browser implementation writes inline
/// style properties.
pub trait StyleSink {
    fn write(&self, property: &str, value: &str);
}

impl StyleSink for HtmlElement {
    fn write(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }
}

/// An element plus the visual state last written to it, so scroll callbacks
/// and tweens can each update a subset of properties.
pub struct Animated {
    sink: Box<dyn StyleSink>,
    state: RefCell<VisualState>,
}

impl Animated {
    pub fn new(sink: impl StyleSink + 'static) -> Rc<Self> {
        Rc::new(Self {
            sink: Box::new(sink),
            state: RefCell::new(VisualState::default()),
        })
    }

    pub fn state(&self) -> VisualState {
        *self.state.borrow()
    }

    pub fn set(&self, patch: VisualPatch) {
        let state = {
            let mut state = self.state.borrow_mut();
            patch.apply(&mut state);
            *state
        };
        for (property, value) in state.declarations() {
            self.sink.write(property, &value);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::StyleSink;

    /// Records the last value written per property.
    #[derive(Clone, Default)]
    pub struct RecordingSink {
        pub written: Rc<RefCell<HashMap<String, String>>>,
    }

    impl RecordingSink {
        pub fn get(&self, property: &str) -> Option<String> {
            self.written.borrow().get(property).cloned()
        }
    }

    impl StyleSink for RecordingSink {
        fn write(&self, property: &str, value: &str) {
            self.written
                .borrow_mut()
                .insert(property.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn set_merges_partial_patches() {
        let sink = RecordingSink::default();
        let node = Animated::new(sink.clone());
        node.set(VisualPatch::new().opacity(0.0).y(30.0));
        node.set(VisualPatch::new().scale(1.1));

        let state = node.state();
        assert_eq!(state.opacity, 0.0);
        assert_eq!(state.y, 30.0);
        assert_eq!(state.scale, 1.1);
        assert_eq!(sink.get("opacity").as_deref(), Some("0.0000"));
        assert_eq!(
            sink.get("transform").as_deref(),
            Some("translate3d(0.000px, 30.000px, 0px) rotate(0.000deg) scale(1.1000)")
        );
        assert_eq!(sink.get("border-radius"), None);
    }

    #[test]
    fn optional_properties_are_written_once_set() {
        let sink = RecordingSink::default();
        let node = Animated::new(sink.clone());
        node.set(VisualPatch::new().border_radius(60.0).z_index(2).y_percent(-10.0));
        assert_eq!(sink.get("border-radius").as_deref(), Some("60.000px"));
        assert_eq!(sink.get("z-index").as_deref(), Some("2"));
        assert!(sink.get("transform").unwrap().contains("translateY(-10.000%)"));
    }

    #[test]
    fn between_interpolates_only_target_fields() {
        let state = VisualState {
            opacity: 0.0,
            y: 30.0,
            ..Default::default()
        };
        let to = VisualPatch::new().opacity(1.0).y(0.0);
        let from = to.capture(&state);
        let mid = VisualPatch::between(&from, &to, 0.5);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.y, Some(15.0));
        assert_eq!(mid.scale, None);
    }
}
