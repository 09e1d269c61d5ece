use log::debug;
use yew::prelude::*;

use crate::content::BreathSectionConfig;
use crate::dom;
use crate::error::Result;
use crate::motion::{clamp01, lerp, phase, Timeline, VisualPatch};
use crate::scroll::{self, Bindings, Scrub, TriggerSpec};

pub struct BreathFrame {
    pub container: VisualPatch,
    pub title: VisualPatch,
    pub subtitle: VisualPatch,
}

/// The container opens up during the first half of the range and the
/// subtitle only follows in the second half. The title fades in across the
/// whole range.
pub fn breath_frame(progress: f64) -> BreathFrame {
    let p = clamp01(progress);
    let opening = phase(p, 0.0, 0.5);
    let settling = phase(p, 0.5, 1.0);
    BreathFrame {
        container: VisualPatch::new()
            .scale(lerp(0.92, 1.0, opening))
            .border_radius(lerp(60.0, 40.0, opening)),
        title: VisualPatch::new().opacity(p).scale(lerp(1.1, 1.0, p)),
        subtitle: VisualPatch::new()
            .opacity(settling)
            .y(lerp(20.0, 0.0, settling)),
    }
}

struct BreathNodes {
    section: NodeRef,
    container: NodeRef,
    title: NodeRef,
    subtitle: NodeRef,
}

fn bind(nodes: &BreathNodes) -> Result<Bindings> {
    let section = dom::element(&nodes.section, "breath section")?;
    let container = dom::animated(&nodes.container, "breath container")?;
    let title = dom::animated(&nodes.title, "breath title")?;
    let subtitle = dom::animated(&nodes.subtitle, "breath subtitle")?;

    let rest = breath_frame(0.0);
    container.set(rest.container);
    title.set(rest.title);
    subtitle.set(rest.subtitle);

    let spec = TriggerSpec::new("top 80%", "center center")?
        .scrub(Scrub::Smooth(1.0))
        .label("breath")
        .on_update(move |p| {
            let frame = breath_frame(p);
            container.set(frame.container);
            title.set(frame.title);
            subtitle.set(frame.subtitle);
        });

    Ok(Bindings::new(vec![scroll::register(&section, spec)], Timeline::new()))
}

#[derive(Properties, PartialEq)]
pub struct BreathSectionProps {
    pub config: BreathSectionConfig,
}

#[function_component(BreathSection)]
pub fn breath_section(props: &BreathSectionProps) -> Html {
    let section_ref = use_node_ref();
    let container_ref = use_node_ref();
    let title_ref = use_node_ref();
    let subtitle_ref = use_node_ref();

    {
        let nodes = BreathNodes {
            section: section_ref.clone(),
            container: container_ref.clone(),
            title: title_ref.clone(),
            subtitle: subtitle_ref.clone(),
        };
        use_effect_with_deps(
            move |_| {
                let bindings = bind(&nodes)
                    .map_err(|e| debug!("Breath section inactive: {}", e))
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
        <section ref={section_ref} class="breath">
            <div ref={container_ref} class="breath-frame">
                <img
                    src={config.background_image.clone()}
                    alt={config.background_alt.clone()}
                    onload={scroll::refresh_on_load()}
                />
                <div class="breath-shade"></div>
                <div class="breath-content">
                    <h2 ref={title_ref} class="breath-title">{ &config.title }</h2>
                    <p ref={subtitle_ref} class="breath-subtitle">{ &config.subtitle }</p>
                </div>
            </div>
            if !config.description.is_empty() {
                <div class="breath-description">
                    <p>{ &config.description }</p>
                </div>
            }
            <style>
                {r#"
                    .breath {
                        position: relative;
                        width: 100%;
                        padding: 6rem 1rem;
                        background: var(--kaleo-sand);
                    }
                    .breath-frame {
                        position: relative;
                        height: 80vh;
                        max-width: 80rem;
                        margin: 0 auto;
                        overflow: hidden;
                        border-radius: 60px;
                        will-change: transform, border-radius;
                    }
                    .breath-frame img {
                        position: absolute;
                        inset: 0;
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .breath-shade {
                        position: absolute;
                        inset: 0;
                        background: linear-gradient(to top, rgba(0, 0, 0, 0.5), rgba(0, 0, 0, 0.1), transparent);
                    }
                    .breath-content {
                        position: absolute;
                        inset: 0;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 0 1.5rem;
                    }
                    .breath-title {
                        font-family: var(--font-display);
                        font-size: clamp(3rem, 10vw, 8rem);
                        color: var(--kaleo-cream);
                        text-shadow: 0 4px 30px rgba(0, 0, 0, 0.3);
                        will-change: transform, opacity;
                    }
                    .breath-subtitle {
                        margin-top: 1.5rem;
                        font-size: 0.875rem;
                        text-transform: uppercase;
                        letter-spacing: 0.3em;
                        color: rgba(248, 244, 236, 0.8);
                        will-change: transform, opacity;
                    }
                    .breath-description {
                        max-width: 42rem;
                        margin: 4rem auto 0;
                        text-align: center;
                    }
                    .breath-description p {
                        font-size: 1rem;
                        line-height: 1.8;
                        color: rgba(74, 59, 44, 0.7);
                    }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::assert_close;

    #[test]
    fn subtitle_waits_for_the_midpoint() {
        for p in [0.0, 0.1, 0.25, 0.5] {
            assert_eq!(breath_frame(p).subtitle.opacity, Some(0.0));
            assert_close(breath_frame(p).subtitle.y.unwrap(), 20.0);
        }
        assert_close(breath_frame(0.75).subtitle.opacity.unwrap(), 0.5);
        assert_close(breath_frame(0.75).subtitle.y.unwrap(), 10.0);
        assert_close(breath_frame(1.0).subtitle.opacity.unwrap(), 1.0);
    }

    #[test]
    fn container_opens_in_first_half_then_holds() {
        let quarter = breath_frame(0.25).container;
        assert_close(quarter.scale.unwrap(), 0.96);
        assert_close(quarter.border_radius.unwrap(), 50.0);

        for p in [0.5, 0.8, 1.0] {
            let container = breath_frame(p).container;
            assert_close(container.scale.unwrap(), 1.0);
            assert_close(container.border_radius.unwrap(), 40.0);
        }
    }

    #[test]
    fn title_tracks_the_full_range() {
        let title = breath_frame(0.4).title;
        assert_close(title.opacity.unwrap(), 0.4);
        assert_close(title.scale.unwrap(), 1.06);
        assert_close(breath_frame(3.0).title.opacity.unwrap(), 1.0);
    }
}
