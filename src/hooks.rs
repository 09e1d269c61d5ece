use log::{debug, warn};
use web_sys::{Event, HtmlElement};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::{self, SmoothScrollOptions};
use crate::dom;
use crate::motion::{Animated, Timeline};
use crate::scroll::{self, reveal_on_enter, smooth, Reveal};

/// Reveals the referenced element the first time it scrolls into view. With
/// a stagger set, its children are revealed one after another instead.
#[hook]
pub fn use_reveal(reveal: Reveal) -> NodeRef {
    let node = use_node_ref();
    {
        let node = node.clone();
        use_effect_with_deps(
            move |reveal| {
                let timeline = Timeline::new();
                let trigger = node.cast::<HtmlElement>().and_then(|element| {
                    let targets = if reveal.stagger > 0.0 {
                        dom::animated_children(&element)
                    } else {
                        vec![Animated::new(element.clone())]
                    };
                    reveal_on_enter(&element, targets, *reveal, &timeline)
                        .map_err(|e| warn!("Reveal disabled: {}", e))
                        .ok()
                });
                move || {
                    drop(trigger);
                    timeline.kill();
                }
            },
            reveal,
        );
    }
    node
}

/// Smooth scrolling for as long as the calling component is mounted.
#[hook]
pub fn use_smooth_scroll(options: SmoothScrollOptions) {
    use_effect_with_deps(
        move |options| {
            let driver = smooth::init(*options)
                .map_err(|e| warn!("Smooth scrolling unavailable: {}", e))
                .ok();
            move || drop(driver)
        },
        options,
    );
}

/// Re-measures trigger ranges once everything has loaded, again after a
/// settling delay, and whenever the viewport changes size.
#[hook]
pub fn use_scroll_refresh() {
    use_event_with_window("load", |_: Event| {
        debug!("Window loaded");
        scroll::refresh();
    });
    use_event_with_window("resize", |_: Event| scroll::request_refresh());
    use_event_with_window("orientationchange", |_: Event| scroll::request_refresh());
    use_timeout(scroll::refresh, config::REFRESH_SETTLE_MS);
}
