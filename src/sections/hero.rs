use log::debug;
use yew::prelude::*;

use crate::content::HeroConfig;
use crate::dom;
use crate::error::Result;
use crate::motion::{clamp01, lerp, Ease, Timeline, Tween, VisualPatch};
use crate::scroll::{self, Bindings, Scrub, TriggerSpec};

/// Background travel in pixels across the whole section.
const IMAGE_TRAVEL: f64 = 150.0;
const OVERLAY_MAX_OPACITY: f64 = 0.3;

pub fn image_frame(progress: f64) -> VisualPatch {
    VisualPatch::new().y(lerp(0.0, IMAGE_TRAVEL, clamp01(progress)))
}

pub fn overlay_frame(progress: f64) -> VisualPatch {
    VisualPatch::new().opacity(lerp(0.0, OVERLAY_MAX_OPACITY, clamp01(progress)))
}

/// Title and subtitle drift up and fade while the first half of the hero
/// scrolls away; the subtitle goes first.
pub fn heading_frame(progress: f64) -> (VisualPatch, VisualPatch) {
    let p = clamp01(progress);
    let title = VisualPatch::new()
        .opacity(clamp01(1.0 - p * 1.5))
        .y(p * -50.0);
    let subtitle = VisualPatch::new()
        .opacity(clamp01(1.0 - p * 2.0))
        .y(p * -30.0);
    (title, subtitle)
}

struct HeroNodes {
    section: NodeRef,
    image: NodeRef,
    overlay: NodeRef,
    title: NodeRef,
    subtitle: NodeRef,
}

fn bind(nodes: &HeroNodes) -> Result<Bindings> {
    let section = dom::element(&nodes.section, "hero section")?;
    let image = dom::animated(&nodes.image, "hero image")?;
    let overlay = dom::animated(&nodes.overlay, "hero overlay")?;
    let title = dom::animated(&nodes.title, "hero title")?;
    let subtitle = dom::animated(&nodes.subtitle, "hero subtitle")?;

    let image_spec = TriggerSpec::new("top top", "bottom top")?;
    let heading_spec = TriggerSpec::new("top top", "50% top")?;
    let overlay_spec = TriggerSpec::new("top top", "bottom top")?;

    overlay.set(VisualPatch::new().opacity(0.0));

    let timeline = Timeline::new();
    timeline.add(
        Tween::from_to(
            &image,
            VisualPatch::new().scale(1.2).opacity(0.0),
            VisualPatch::new().scale(1.0).opacity(1.0),
        )
        .duration(2.0)
        .ease(Ease::Power3Out),
    );
    timeline.add(
        Tween::from_to(
            &title,
            VisualPatch::new().scale(1.1).opacity(0.0),
            VisualPatch::new().scale(1.0).opacity(1.0),
        )
        .delay(0.5)
        .duration(1.5)
        .ease(Ease::Power3Out),
    );
    timeline.add(
        Tween::from_to(
            &subtitle,
            VisualPatch::new().y(30.0).opacity(0.0),
            VisualPatch::new().y(0.0).opacity(1.0),
        )
        .delay(1.2)
        .duration(1.0)
        .ease(Ease::Power3Out),
    );

    let triggers = vec![
        scroll::register(
            &section,
            image_spec
                .scrub(Scrub::Instant)
                .label("hero image")
                .on_update(move |p| image.set(image_frame(p))),
        ),
        scroll::register(
            &section,
            heading_spec
                .scrub(Scrub::Instant)
                .label("hero heading")
                .on_update(move |p| {
                    let (title_patch, subtitle_patch) = heading_frame(p);
                    title.set(title_patch);
                    subtitle.set(subtitle_patch);
                }),
        ),
        scroll::register(
            &section,
            overlay_spec
                .scrub(Scrub::Instant)
                .label("hero overlay")
                .on_update(move |p| overlay.set(overlay_frame(p))),
        ),
    ];

    Ok(Bindings::new(triggers, timeline))
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub config: HeroConfig,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let section_ref = use_node_ref();
    let image_ref = use_node_ref();
    let overlay_ref = use_node_ref();
    let title_ref = use_node_ref();
    let subtitle_ref = use_node_ref();

    {
        let nodes = HeroNodes {
            section: section_ref.clone(),
            image: image_ref.clone(),
            overlay: overlay_ref.clone(),
            title: title_ref.clone(),
            subtitle: subtitle_ref.clone(),
        };
        use_effect_with_deps(
            move |_| {
                let bindings = bind(&nodes)
                    .map_err(|e| debug!("Hero animations inactive: {}", e))
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
        <section ref={section_ref} class="hero">
            <div ref={image_ref} class="hero-image">
                <img
                    src={config.background_image.clone()}
                    alt={config.background_alt.clone()}
                    class="ken-burns"
                    onload={scroll::refresh_on_load()}
                />
            </div>
            <div ref={overlay_ref} class="hero-overlay"></div>
            <div class="hero-fog"></div>
            <div class="hero-content">
                <h1 ref={title_ref} class="hero-title">{ &config.title }</h1>
                <p ref={subtitle_ref} class="hero-subtitle">{ &config.subtitle }</p>
            </div>
            <div class="hero-fade"></div>
            <style>
                {r#"
                    .hero {
                        position: relative;
                        height: 100svh;
                        width: 100%;
                        overflow: hidden;
                    }
                    .hero-image, .hero-overlay, .hero-fog, .hero-content {
                        position: absolute;
                        inset: 0;
                    }
                    .hero-image { will-change: transform, opacity; }
                    .hero-image img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .ken-burns { animation: ken-burns 20s ease-in-out infinite alternate; }
                    @keyframes ken-burns {
                        from { transform: scale(1); }
                        to { transform: scale(1.08); }
                    }
                    .hero-overlay {
                        background: var(--kaleo-charcoal);
                        opacity: 0;
                        will-change: opacity;
                    }
                    .hero-fog {
                        background: linear-gradient(to bottom, transparent, transparent 60%, rgba(239, 232, 221, 0.2));
                    }
                    .hero-content {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        padding: 0 1rem;
                    }
                    .hero-title {
                        font-family: var(--font-display);
                        font-size: clamp(4rem, 14vw, 12rem);
                        color: var(--kaleo-cream);
                        letter-spacing: -0.02em;
                        text-shadow: 0 4px 30px rgba(0, 0, 0, 0.3);
                        user-select: none;
                        will-change: transform, opacity;
                    }
                    .hero-subtitle {
                        margin-top: 1.5rem;
                        color: rgba(248, 244, 236, 0.9);
                        font-size: 0.875rem;
                        text-transform: uppercase;
                        letter-spacing: 0.3em;
                        will-change: transform, opacity;
                    }
                    .hero-fade {
                        position: absolute;
                        left: 0;
                        right: 0;
                        bottom: 0;
                        height: 8rem;
                        background: linear-gradient(to top, var(--kaleo-sand), transparent);
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
    fn image_and_overlay_follow_progress() {
        assert_close(image_frame(0.0).y.unwrap(), 0.0);
        assert_close(image_frame(0.5).y.unwrap(), 75.0);
        assert_close(image_frame(1.0).y.unwrap(), 150.0);
        assert_close(image_frame(2.0).y.unwrap(), 150.0);
        assert_close(overlay_frame(1.0).opacity.unwrap(), 0.3);
        assert_close(overlay_frame(-1.0).opacity.unwrap(), 0.0);
    }

    #[test]
    fn subtitle_fades_before_title() {
        let (title, subtitle) = heading_frame(0.5);
        assert_close(title.opacity.unwrap(), 0.25);
        assert_close(subtitle.opacity.unwrap(), 0.0);
        assert_close(title.y.unwrap(), -25.0);
        assert_close(subtitle.y.unwrap(), -15.0);

        let (title, _) = heading_frame(1.0);
        assert_close(title.opacity.unwrap(), 0.0);
        assert_close(title.y.unwrap(), -50.0);
    }
}
