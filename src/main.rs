use log::{info, warn};
use yew::prelude::*;

mod config;
mod content;
mod dom;
mod error;
mod hooks;
mod motion;
mod scroll;
mod components {
    pub mod icons;
    pub mod magnetic_button;
}
mod sections {
    pub mod breath;
    pub mod card_stack;
    pub mod footer;
    pub mod hero;
    pub mod narrative_text;
    pub mod zigzag_grid;
}

use config::SmoothScrollOptions;
use hooks::{use_scroll_refresh, use_smooth_scroll};
use sections::{
    breath::BreathSection,
    card_stack::CardStack,
    footer::Footer,
    hero::Hero,
    narrative_text::NarrativeText,
    zigzag_grid::ZigZagGrid,
};

#[function_component(App)]
fn app() -> Html {
    let content = use_state(content::load);

    use_smooth_scroll(SmoothScrollOptions::default());
    use_scroll_refresh();

    {
        let site = content.site.clone();
        use_effect_with_deps(
            move |site| {
                if let Err(e) = dom::apply_site_metadata(site) {
                    warn!("Could not apply site metadata: {}", e);
                }
                || ()
            },
            site,
        );
    }

    html! {
        <main class="site">
            <Hero config={content.hero.clone()} />
            <NarrativeText config={content.narrative_text.clone()} />
            <CardStack config={content.card_stack.clone()} />
            <BreathSection config={content.breath_section.clone()} />
            <ZigZagGrid config={content.zig_zag_grid.clone()} />
            <Footer config={content.footer.clone()} />
            <style>
                {r#"
                    :root {
                        --kaleo-sand: #efe8dd;
                        --kaleo-cream: #f8f4ec;
                        --kaleo-earth: #4a3b2c;
                        --kaleo-terracotta: #c17f59;
                        --kaleo-charcoal: #2a241f;
                        --font-display: 'Cormorant Garamond', Georgia, serif;
                        --font-body: 'Inter', system-ui, sans-serif;
                    }
                    * {
                        margin: 0;
                        padding: 0;
                        box-sizing: border-box;
                    }
                    html, body {
                        background: var(--kaleo-sand);
                        color: var(--kaleo-earth);
                        font-family: var(--font-body);
                        -webkit-font-smoothing: antialiased;
                    }
                    .site {
                        position: relative;
                        overflow-x: hidden;
                    }
                    img { display: block; }
                    .icon { width: 1.25rem; height: 1.25rem; }
                "#}
            </style>
        </main>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        web_sys::console::error_1(&format!("error initializing log: {}", e).into());
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
