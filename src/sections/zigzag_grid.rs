use log::debug;
use yew::prelude::*;

use crate::content::{ZigZagGridConfig, ZigZagGridItem};
use crate::dom;
use crate::error::Result;
use crate::hooks::use_reveal;
use crate::motion::{clamp01, Timeline, VisualPatch};
use crate::scroll::{self, Bindings, Reveal, Scrub, TriggerSpec};

/// Images start slightly enlarged so the parallax drift never shows an edge.
const IMAGE_SCALE: f64 = 1.1;

/// Vertical drift in percent of the image's own height, centred on the
/// moment the item crosses the middle of the viewport.
pub fn image_parallax(progress: f64) -> VisualPatch {
    VisualPatch::new().y_percent((clamp01(progress) - 0.5) * 20.0)
}

fn bind_image(item: &NodeRef, image: &NodeRef) -> Result<Bindings> {
    let region = dom::element(item, "grid item")?;
    let image = dom::animated(image, "grid image")?;
    image.set(image_parallax(0.0).scale(IMAGE_SCALE));

    let spec = TriggerSpec::new("top bottom", "bottom top")?
        .scrub(Scrub::Instant)
        .label("grid parallax")
        .on_update(move |p| image.set(image_parallax(p)));
    Ok(Bindings::new(vec![scroll::register(&region, spec)], Timeline::new()))
}

#[derive(Properties, PartialEq)]
pub struct GridItemProps {
    pub item: ZigZagGridItem,
}

#[function_component(GridItem)]
pub fn grid_item(props: &GridItemProps) -> Html {
    let item_ref = use_node_ref();
    let image_ref = use_node_ref();
    let text_ref = use_reveal(Reveal::at("top 80%").stagger(0.1));

    {
        let item_ref = item_ref.clone();
        let image_ref = image_ref.clone();
        use_effect_with_deps(
            move |_| {
                let bindings = bind_image(&item_ref, &image_ref)
                    .map_err(|e| debug!("Grid parallax inactive: {}", e))
                    .ok();
                move || drop(bindings)
            },
            (),
        );
    }

    let item = &props.item;
    html! {
        <article ref={item_ref} class={classes!("grid-item", item.reverse.then(|| "reverse"))}>
            <div class="grid-image">
                <div ref={image_ref} class="grid-image-inner">
                    <img
                        src={item.image.clone()}
                        alt={item.image_alt.clone()}
                        onload={scroll::refresh_on_load()}
                    />
                </div>
            </div>
            <div ref={text_ref} class="grid-text">
                <span class="grid-subtitle">{ &item.subtitle }</span>
                <h3 class="grid-title">{ &item.title }</h3>
                <p class="grid-description">{ &item.description }</p>
                <div class="grid-rule"></div>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct ZigZagGridProps {
    pub config: ZigZagGridConfig,
}

#[function_component(ZigZagGrid)]
pub fn zigzag_grid(props: &ZigZagGridProps) -> Html {
    let header_ref = use_reveal(Reveal::at("top 80%").stagger(0.15));

    let config = &props.config;
    if !config.has_content() {
        return html! {};
    }

    html! {
        <section class="grid">
            <div class="grid-inner">
                <div ref={header_ref} class="grid-header">
                    <span class="grid-label">{ &config.section_label }</span>
                    <h2 class="grid-heading">{ &config.section_title }</h2>
                </div>
                <div class="grid-items">
                    {
                        for config.items.iter().map(|item| html! {
                            <GridItem key={item.id.clone()} item={item.clone()} />
                        })
                    }
                </div>
            </div>
            <style>
                {r#"
                    .grid {
                        position: relative;
                        width: 100%;
                        padding: 8rem 0;
                        background: var(--kaleo-sand);
                    }
                    .grid-inner {
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 0 1.5rem;
                    }
                    .grid-header {
                        text-align: center;
                        margin-bottom: 6rem;
                    }
                    .grid-label {
                        display: block;
                        margin-bottom: 1rem;
                        font-size: 0.75rem;
                        text-transform: uppercase;
                        letter-spacing: 0.3em;
                        color: var(--kaleo-terracotta);
                    }
                    .grid-heading {
                        font-family: var(--font-display);
                        font-size: clamp(2.25rem, 5vw, 3.75rem);
                        color: var(--kaleo-earth);
                    }
                    .grid-items > * + * { margin-top: 8rem; }
                    .grid-item {
                        display: grid;
                        grid-template-columns: 1fr;
                        gap: 3rem;
                        align-items: center;
                    }
                    @media (min-width: 1024px) {
                        .grid-item { grid-template-columns: 1fr 1fr; gap: 6rem; }
                        .grid-item.reverse .grid-image { order: 2; }
                        .grid-item.reverse .grid-text { order: 1; }
                    }
                    .grid-image {
                        position: relative;
                        aspect-ratio: 4 / 5;
                        border-radius: 1rem;
                        overflow: hidden;
                    }
                    .grid-image-inner {
                        position: absolute;
                        inset: 0;
                        will-change: transform;
                    }
                    .grid-image img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .grid-text > * { will-change: transform, opacity; }
                    .grid-subtitle {
                        display: block;
                        font-size: 0.75rem;
                        text-transform: uppercase;
                        letter-spacing: 0.2em;
                        color: var(--kaleo-terracotta);
                    }
                    .grid-title {
                        margin-top: 1rem;
                        font-family: var(--font-display);
                        font-size: clamp(1.875rem, 4vw, 3rem);
                        color: var(--kaleo-earth);
                    }
                    .grid-description {
                        margin-top: 1.5rem;
                        max-width: 28rem;
                        font-size: 1rem;
                        line-height: 1.8;
                        color: rgba(74, 59, 44, 0.7);
                    }
                    .grid-rule {
                        margin-top: 2rem;
                        width: 4rem;
                        height: 1px;
                        background: rgba(193, 127, 89, 0.4);
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
    fn parallax_is_centred_on_the_middle() {
        assert_close(image_parallax(0.0).y_percent.unwrap(), -10.0);
        assert_close(image_parallax(0.5).y_percent.unwrap(), 0.0);
        assert_close(image_parallax(1.0).y_percent.unwrap(), 10.0);
        assert_close(image_parallax(1.5).y_percent.unwrap(), 10.0);
    }
}
