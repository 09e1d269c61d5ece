use log::debug;
use yew::prelude::*;

use crate::components::icons::Icon;
use crate::content::NarrativeTextConfig;
use crate::dom;
use crate::error::Result;
use crate::hooks::use_reveal;
use crate::motion::{Ease, Timeline, Tween, VisualPatch};
use crate::scroll::{self, Bindings, Reveal, TriggerSpec};

/// Line reveals share a start line and duration; later lines wait a little
/// longer.
fn line_reveal(delay: f64) -> Reveal {
    Reveal::at("top 80%").duration(1.0).delay(delay)
}

fn bind_star(star: &NodeRef) -> Result<Bindings> {
    let element = dom::element(star, "narrative star")?;
    let spec = TriggerSpec::once_at("top 85%")?.label("narrative star");
    let animated = dom::animated(star, "narrative star")?;
    animated.set(VisualPatch::new().opacity(0.0).scale(0.5));

    let timeline = Timeline::new();
    let spec = {
        let timeline = timeline.clone();
        spec.on_enter(move || {
            timeline.add(
                Tween::to(&animated, VisualPatch::new().opacity(1.0).scale(1.0))
                    .duration(0.8)
                    .ease(Ease::BackOut { overshoot: 1.7 }),
            );
        })
    };
    Ok(Bindings::new(vec![scroll::register(&element, spec)], timeline))
}

#[derive(Properties, PartialEq)]
pub struct NarrativeTextProps {
    pub config: NarrativeTextConfig,
}

#[function_component(NarrativeText)]
pub fn narrative_text(props: &NarrativeTextProps) -> Html {
    let star_ref = use_node_ref();
    let line1_ref = use_reveal(line_reveal(0.0));
    let line2_ref = use_reveal(line_reveal(0.15));
    let line3_ref = use_reveal(line_reveal(0.3));

    {
        let star_ref = star_ref.clone();
        use_effect_with_deps(
            move |_| {
                let bindings = bind_star(&star_ref)
                    .map_err(|e| debug!("Narrative star inactive: {}", e))
                    .ok();
                move || drop(bindings)
            },
            (),
        );
    }

    let config = &props.config;
    if !config.has_content() {
        return html! {};
    }

    html! {
        <section class="narrative">
            <div class="narrative-inner">
                <div ref={star_ref} class="narrative-star">
                    { Icon::Star.render("spin-slow") }
                </div>
                <div class="narrative-lines">
                    <p ref={line1_ref} class="narrative-line1">{ &config.line1 }</p>
                    <p ref={line2_ref} class="narrative-line2">{ &config.line2 }</p>
                    <p ref={line3_ref} class="narrative-line3">{ &config.line3 }</p>
                </div>
                <div class="narrative-star narrative-star-small">
                    { Icon::Star.render("") }
                </div>
            </div>
            <style>
                {r#"
                    .narrative {
                        position: relative;
                        width: 100%;
                        padding: 12rem 0;
                        background: var(--kaleo-sand);
                    }
                    .narrative-inner {
                        max-width: 56rem;
                        margin: 0 auto;
                        padding: 0 1.5rem;
                        text-align: center;
                    }
                    .narrative-star {
                        display: flex;
                        justify-content: center;
                        margin-bottom: 4rem;
                        color: var(--kaleo-terracotta);
                        will-change: transform, opacity;
                    }
                    .narrative-star .icon { width: 2rem; height: 2rem; }
                    .narrative-star-small {
                        margin: 4rem 0 0;
                        opacity: 0.5;
                    }
                    .narrative-star-small .icon { width: 1rem; height: 1rem; }
                    .spin-slow { animation: spin 12s linear infinite; }
                    @keyframes spin { to { transform: rotate(360deg); } }
                    .narrative-lines > * + * { margin-top: 2.5rem; }
                    .narrative-lines p { will-change: transform, opacity; }
                    .narrative-line1 {
                        font-family: var(--font-display);
                        font-size: clamp(2rem, 5vw, 3.5rem);
                        color: var(--kaleo-earth);
                    }
                    .narrative-line2 {
                        font-family: var(--font-display);
                        font-style: italic;
                        font-size: clamp(1.5rem, 3vw, 2.25rem);
                        color: rgba(74, 59, 44, 0.8);
                        max-width: 42rem;
                        margin-left: auto;
                        margin-right: auto;
                    }
                    .narrative-line3 {
                        font-size: 0.95rem;
                        line-height: 1.7;
                        letter-spacing: 0.03em;
                        color: rgba(74, 59, 44, 0.6);
                        max-width: 32rem;
                        margin-left: auto;
                        margin-right: auto;
                    }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_reveal_in_sequence() {
        let delays: Vec<f64> = [0.0, 0.15, 0.3]
            .iter()
            .map(|delay| line_reveal(*delay).delays(1)[0])
            .collect();
        assert_eq!(delays, vec![0.0, 0.15, 0.3]);
        assert_eq!(line_reveal(0.0).start, "top 80%");
        assert_eq!(line_reveal(0.0).duration, 1.0);
    }
}
