use log::debug;
use yew::prelude::*;

use crate::content::{CardStackConfig, CardStackItem};
use crate::dom;
use crate::error::Result;
use crate::motion::{clamp01, segment_progress, Timeline, VisualPatch};
use crate::scroll::{self, Bindings, Scrub, TriggerSpec};

/// Section height: one viewport for the pinned stage plus one per card.
pub fn min_height_vh(count: usize) -> usize {
    (count + 1) * 100
}

/// How far the stack stays pinned, one viewport per card.
pub fn end_boundary(count: usize) -> String {
    format!("+={}%", count * 100)
}

pub fn badge(index: usize) -> String {
    format!("{:02}", index + 1)
}

/// Resting state before any scroll: the first card is in place, the rest
/// wait half a viewport below, hidden.
pub fn card_initial(index: usize, rotation: f64, viewport_height: f64) -> VisualPatch {
    let patch = VisualPatch::new().rotation(rotation).z_index(index as i32);
    if index == 0 {
        patch.y(0.0).opacity(1.0)
    } else {
        patch.y(viewport_height * 0.5).opacity(0.0)
    }
}

/// Card `index` of `count` at pinned progress `progress`. The first card
/// recedes over the first segment; every later card rises into place over
/// the segment before its own.
pub fn card_frame(progress: f64, index: usize, count: usize, viewport_height: f64) -> VisualPatch {
    let p = clamp01(progress);
    if index == 0 {
        let local = segment_progress(p, 0, count);
        return VisualPatch::new()
            .opacity(1.0 - local * 0.3)
            .scale(1.0 - local * 0.05)
            .z_index(0);
    }
    let arriving = segment_progress(p, index - 1, count);
    VisualPatch::new()
        .y((1.0 - arriving) * viewport_height * 0.8)
        .opacity(arriving)
        .z_index(index as i32)
}

struct CardStackNodes {
    section: NodeRef,
    stage: NodeRef,
    cards: NodeRef,
}

fn bind(nodes: &CardStackNodes, items: &[CardStackItem]) -> Result<Bindings> {
    let section = dom::element(&nodes.section, "card stack section")?;
    let stage = dom::animated(&nodes.stage, "card stack stage")?;
    let container = dom::element(&nodes.cards, "card stack cards")?;
    let cards = dom::animated_children(&container);
    let count = cards.len();
    if count == 0 {
        return Ok(Bindings::new(Vec::new(), Timeline::new()));
    }

    let viewport_height = dom::viewport_height()?;
    for (index, card) in cards.iter().enumerate() {
        let rotation = items.get(index).map(|item| item.rotation).unwrap_or_default();
        card.set(card_initial(index, rotation, viewport_height));
    }

    let spec = TriggerSpec::new("top top", &end_boundary(count))?
        .scrub(Scrub::Smooth(1.0))
        .pin(&stage)
        .label("card stack")
        .on_update(move |p| {
            let viewport_height = dom::viewport_height().unwrap_or(viewport_height);
            for (index, card) in cards.iter().enumerate() {
                card.set(card_frame(p, index, count, viewport_height));
            }
        });

    Ok(Bindings::new(vec![scroll::register(&section, spec)], Timeline::new()))
}

#[derive(Properties, PartialEq)]
pub struct CardStackProps {
    pub config: CardStackConfig,
}

#[function_component(CardStack)]
pub fn card_stack(props: &CardStackProps) -> Html {
    let section_ref = use_node_ref();
    let stage_ref = use_node_ref();
    let cards_ref = use_node_ref();

    {
        let nodes = CardStackNodes {
            section: section_ref.clone(),
            stage: stage_ref.clone(),
            cards: cards_ref.clone(),
        };
        use_effect_with_deps(
            move |items: &Vec<CardStackItem>| {
                let bindings = bind(&nodes, items)
                    .map_err(|e| debug!("Card stack inactive: {}", e))
                    .ok();
                move || drop(bindings)
            },
            props.config.cards.clone(),
        );
    }

    let config = &props.config;
    if !config.has_content() {
        return html! {};
    }

    let height = format!("min-height: {}vh;", min_height_vh(config.cards.len()));

    html! {
        <section ref={section_ref} class="card-stack" style={height}>
            <div ref={stage_ref} class="card-stack-stage">
                <div class="card-stack-header">
                    <h2 class="card-stack-title">{ &config.section_title }</h2>
                    <p class="card-stack-subtitle">{ &config.section_subtitle }</p>
                </div>
                <div ref={cards_ref} class="card-stack-cards">
                    {
                        for config.cards.iter().enumerate().map(|(index, card)| html! {
                            <div key={card.id} class="stack-card">
                                <div class="stack-card-image">
                                    <img
                                        src={card.image.clone()}
                                        alt={card.title.clone()}
                                        onload={scroll::refresh_on_load()}
                                    />
                                    <div class="stack-card-shade"></div>
                                </div>
                                <div class="stack-card-text">
                                    <h3>{ &card.title }</h3>
                                    <p>{ &card.description }</p>
                                </div>
                                <span class="stack-card-badge">{ badge(index) }</span>
                            </div>
                        })
                    }
                </div>
            </div>
            <style>
                {r#"
                    .card-stack {
                        position: relative;
                        background: var(--kaleo-sand);
                    }
                    .card-stack-stage {
                        height: 100vh;
                        width: 100%;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        overflow: hidden;
                        will-change: transform;
                    }
                    .card-stack-header {
                        position: absolute;
                        top: 3rem;
                        left: 0;
                        right: 0;
                        text-align: center;
                        z-index: 10;
                        padding: 0 1.5rem;
                    }
                    .card-stack-title {
                        font-family: var(--font-display);
                        font-size: clamp(2rem, 4vw, 3rem);
                        color: var(--kaleo-earth);
                    }
                    .card-stack-subtitle {
                        margin-top: 0.5rem;
                        font-size: 0.8rem;
                        text-transform: uppercase;
                        letter-spacing: 0.2em;
                        color: rgba(74, 59, 44, 0.6);
                    }
                    .card-stack-cards {
                        position: relative;
                        width: min(85vw, 28rem);
                        aspect-ratio: 3 / 4;
                        margin-top: 4rem;
                    }
                    .stack-card {
                        position: absolute;
                        inset: 0;
                        border-radius: 1rem;
                        overflow: hidden;
                        background: var(--kaleo-cream);
                        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);
                        will-change: transform, opacity;
                    }
                    .stack-card-image {
                        position: relative;
                        height: 65%;
                        overflow: hidden;
                    }
                    .stack-card-image img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .stack-card-shade {
                        position: absolute;
                        inset: 0;
                        background: linear-gradient(to top, rgba(0, 0, 0, 0.2), transparent);
                    }
                    .stack-card-text { padding: 1.5rem; }
                    .stack-card-text h3 {
                        font-family: var(--font-display);
                        font-size: 1.5rem;
                        color: var(--kaleo-earth);
                    }
                    .stack-card-text p {
                        margin-top: 0.75rem;
                        font-size: 0.875rem;
                        line-height: 1.6;
                        color: rgba(74, 59, 44, 0.7);
                    }
                    .stack-card-badge {
                        position: absolute;
                        top: 1rem;
                        right: 1rem;
                        width: 2.5rem;
                        height: 2.5rem;
                        border-radius: 9999px;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: rgba(248, 244, 236, 0.9);
                        font-size: 0.75rem;
                        color: var(--kaleo-earth);
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

    const VH: f64 = 1000.0;

    #[test]
    fn three_cards_pin_for_three_viewports() {
        assert_eq!(min_height_vh(3), 400);
        assert_eq!(end_boundary(3), "+=300%");
        assert_eq!(badge(0), "01");
        assert_eq!(badge(11), "12");
    }

    #[test]
    fn only_the_first_card_starts_visible() {
        let first = card_initial(0, -2.0, VH);
        assert_eq!(first.opacity, Some(1.0));
        assert_eq!(first.y, Some(0.0));
        assert_eq!(first.rotation, Some(-2.0));

        let second = card_initial(1, 1.0, VH);
        assert_eq!(second.opacity, Some(0.0));
        assert_close(second.y.unwrap(), 500.0);
        assert_eq!(second.z_index, Some(1));
    }

    #[test]
    fn stack_at_start_and_end() {
        let start: Vec<_> = (0..3).map(|i| card_frame(0.0, i, 3, VH)).collect();
        assert_close(start[0].opacity.unwrap(), 1.0);
        assert_close(start[1].opacity.unwrap(), 0.0);
        assert_close(start[2].opacity.unwrap(), 0.0);
        assert_close(start[1].y.unwrap(), 800.0);

        let end: Vec<_> = (0..3).map(|i| card_frame(1.0, i, 3, VH)).collect();
        assert_close(end[0].opacity.unwrap(), 0.7);
        assert_close(end[0].scale.unwrap(), 0.95);
        assert_close(end[2].opacity.unwrap(), 1.0);
        assert_close(end[2].y.unwrap(), 0.0);
        assert_eq!(end[2].z_index, Some(2));
    }

    #[test]
    fn later_card_waits_for_its_segment() {
        let third = card_frame(1.0 / 3.0, 2, 3, VH);
        assert_close(third.opacity.unwrap(), 0.0);
        let third = card_frame(0.5, 2, 3, VH);
        assert_close(third.opacity.unwrap(), 0.5);
        assert_close(third.y.unwrap(), 400.0);
    }
}
