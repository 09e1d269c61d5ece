use log::debug;
use yew::prelude::*;

use crate::components::icons::Icon;
use crate::components::magnetic_button::MagneticButton;
use crate::content::FooterConfig;
use crate::dom;
use crate::error::Result;
use crate::hooks::use_reveal;
use crate::motion::{clamp01, lerp, Timeline, VisualPatch};
use crate::scroll::{self, Bindings, Reveal, Scrub, TriggerSpec};

const BACKGROUND_TRAVEL: f64 = -50.0;

pub fn background_frame(progress: f64) -> VisualPatch {
    VisualPatch::new().y(lerp(0.0, BACKGROUND_TRAVEL, clamp01(progress)))
}

fn bind_background(section: &NodeRef, background: &NodeRef) -> Result<Bindings> {
    let region = dom::element(section, "footer")?;
    let background = dom::animated(background, "footer background")?;

    let spec = TriggerSpec::new("top bottom", "bottom bottom")?
        .scrub(Scrub::Instant)
        .label("footer parallax")
        .on_update(move |p| background.set(background_frame(p)));
    Ok(Bindings::new(vec![scroll::register(&region, spec)], Timeline::new()))
}

/// Each address line paired with whether a line break follows it; the last
/// line gets none.
pub fn address_breaks(lines: &[String]) -> Vec<(&str, bool)> {
    let count = lines.len();
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| (line.as_str(), index + 1 < count))
        .collect()
}

fn address_lines(lines: &[String]) -> Html {
    address_breaks(lines)
        .into_iter()
        .map(|(line, breaks)| {
            html! {
                <>
                    { line }
                    if breaks { <br /> }
                </>
            }
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    pub config: FooterConfig,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let section_ref = use_node_ref();
    let background_ref = use_node_ref();
    let content_ref = use_reveal(Reveal::at("top 80%").stagger(0.1));
    let logo_ref = use_reveal(Reveal::at("top 90%").offset(50.0).duration(1.0));

    {
        let section_ref = section_ref.clone();
        let background_ref = background_ref.clone();
        use_effect_with_deps(
            move |_| {
                let bindings = bind_background(&section_ref, &background_ref)
                    .map_err(|e| debug!("Footer parallax inactive: {}", e))
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
        <footer ref={section_ref} class="footer">
            <div class="footer-background">
                <div ref={background_ref} class="footer-background-image">
                    <img src={config.background_image.clone()} alt="" onload={scroll::refresh_on_load()} />
                </div>
                <div class="footer-background-shade"></div>
            </div>

            <div class="footer-inner">
                <div ref={content_ref} class="footer-content">
                    <div class="footer-cta">
                        <h2 class="footer-heading">{ &config.heading }</h2>
                        <p class="footer-description">{ &config.description }</p>
                        if !config.cta_text.is_empty() {
                            <MagneticButton class="footer-button">
                                { &config.cta_text }
                                { Icon::ArrowUpRight.render("footer-button-icon") }
                            </MagneticButton>
                        }
                    </div>

                    <div class="footer-column">
                        <h4 class="footer-column-label">{ "Contact" }</h4>
                        <div class="footer-contact">
                            {
                                for config.contact.iter().map(|item| html! {
                                    <a href={item.href.clone()} class="footer-link" aria-label={item.label.clone()}>
                                        { Icon::for_contact(item.kind).render("footer-icon") }
                                        <span>{ &item.value }</span>
                                    </a>
                                })
                            }
                        </div>
                    </div>

                    <div class="footer-column">
                        <h4 class="footer-column-label">{ &config.location_label }</h4>
                        <div class="footer-address">
                            { Icon::MapPin.render("footer-icon") }
                            <p>{ address_lines(&config.address) }</p>
                        </div>
                    </div>

                    <div class="footer-column">
                        <h4 class="footer-column-label">{ &config.social_label }</h4>
                        <div class="footer-socials">
                            {
                                for config.socials.iter().map(|social| html! {
                                    <a
                                        href={social.href.clone()}
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="footer-social"
                                        aria-label={social.platform.clone()}
                                    >
                                        { Icon::for_platform(&social.platform).render("footer-icon") }
                                    </a>
                                })
                            }
                        </div>
                    </div>
                </div>

                if !config.logo_text.is_empty() {
                    <div ref={logo_ref} class="footer-logo">
                        <h2>{ &config.logo_text }</h2>
                    </div>
                }

                <div class="footer-bottom">
                    <p>{ &config.copyright }</p>
                    <div class="footer-links">
                        {
                            for config.links.iter().map(|link| html! {
                                <a href={link.href.clone()} class="footer-link">{ &link.label }</a>
                            })
                        }
                    </div>
                </div>
            </div>
            <style>
                {r#"
                    .footer {
                        position: relative;
                        width: 100%;
                        overflow: hidden;
                        color: var(--kaleo-cream);
                    }
                    .footer-background {
                        position: absolute;
                        inset: 0;
                    }
                    .footer-background-image {
                        position: absolute;
                        inset: -10% 0 0 0;
                        will-change: transform;
                    }
                    .footer-background-image img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .footer-background-shade {
                        position: absolute;
                        inset: 0;
                        background: linear-gradient(to top, var(--kaleo-charcoal), rgba(42, 36, 31, 0.9), rgba(42, 36, 31, 0.7));
                    }
                    .footer-inner {
                        position: relative;
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 8rem 1.5rem 3rem;
                    }
                    .footer-content {
                        display: grid;
                        grid-template-columns: 1fr;
                        gap: 4rem;
                    }
                    @media (min-width: 1024px) {
                        .footer-content { grid-template-columns: 2fr 1fr 1fr 1fr; gap: 3rem; }
                    }
                    .footer-heading {
                        font-family: var(--font-display);
                        font-size: clamp(2.25rem, 5vw, 3.75rem);
                        line-height: 1.1;
                    }
                    .footer-description {
                        margin-top: 1.5rem;
                        max-width: 28rem;
                        line-height: 1.7;
                        color: rgba(248, 244, 236, 0.7);
                    }
                    .footer-column-label {
                        margin-bottom: 1.5rem;
                        font-size: 0.75rem;
                        text-transform: uppercase;
                        letter-spacing: 0.2em;
                        color: rgba(248, 244, 236, 0.5);
                    }
                    .footer-contact > * + * { margin-top: 1rem; }
                    .footer-link {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                        color: rgba(248, 244, 236, 0.8);
                        text-decoration: none;
                        transition: color 0.3s ease;
                    }
                    .footer-link:hover { color: var(--kaleo-cream); }
                    .footer-icon { width: 1rem; height: 1rem; flex-shrink: 0; }
                    .footer-address {
                        display: flex;
                        gap: 0.75rem;
                        color: rgba(248, 244, 236, 0.8);
                        line-height: 1.7;
                    }
                    .footer-socials { display: flex; gap: 1rem; }
                    .footer-social {
                        width: 2.75rem;
                        height: 2.75rem;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        border-radius: 9999px;
                        border: 1px solid rgba(248, 244, 236, 0.2);
                        color: var(--kaleo-cream);
                        transition: background 0.3s ease, border-color 0.3s ease;
                    }
                    .footer-social:hover {
                        background: rgba(248, 244, 236, 0.1);
                        border-color: rgba(248, 244, 236, 0.4);
                    }
                    .footer-logo {
                        margin-top: 6rem;
                        text-align: center;
                        will-change: transform, opacity;
                    }
                    .footer-logo h2 {
                        font-family: var(--font-display);
                        font-size: clamp(5rem, 18vw, 16rem);
                        line-height: 1;
                        color: rgba(248, 244, 236, 0.1);
                        user-select: none;
                    }
                    .footer-bottom {
                        margin-top: 4rem;
                        padding-top: 2rem;
                        border-top: 1px solid rgba(248, 244, 236, 0.1);
                        display: flex;
                        flex-wrap: wrap;
                        justify-content: space-between;
                        gap: 1rem;
                        font-size: 0.8rem;
                        color: rgba(248, 244, 236, 0.5);
                    }
                    .footer-links { display: flex; gap: 1.5rem; }
                    .magnetic-button {
                        position: relative;
                        margin-top: 2.5rem;
                        padding: 1rem 2rem;
                        border: 1px solid rgba(248, 244, 236, 0.3);
                        border-radius: 9999px;
                        background: transparent;
                        color: var(--kaleo-cream);
                        overflow: hidden;
                        cursor: pointer;
                        will-change: transform;
                    }
                    .magnetic-label {
                        position: relative;
                        z-index: 1;
                        display: inline-flex;
                        align-items: center;
                        gap: 0.5rem;
                        font-size: 0.8rem;
                        text-transform: uppercase;
                        letter-spacing: 0.15em;
                        transition: color 0.3s ease;
                    }
                    .magnetic-fill {
                        position: absolute;
                        inset: 0;
                        background: var(--kaleo-cream);
                        transform: scaleX(0);
                        transform-origin: left;
                        transition: transform 0.5s ease;
                    }
                    .magnetic-button.hovered .magnetic-fill { transform: scaleX(1); }
                    .magnetic-button.hovered .magnetic-label { color: var(--kaleo-charcoal); }
                    .footer-button-icon { width: 1rem; height: 1rem; }
                "#}
            </style>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::assert_close;

    #[test]
    fn background_drifts_up_while_footer_enters() {
        assert_close(background_frame(0.0).y.unwrap(), 0.0);
        assert_close(background_frame(0.5).y.unwrap(), -25.0);
        assert_close(background_frame(1.0).y.unwrap(), -50.0);
        assert_close(background_frame(-0.2).y.unwrap(), 0.0);
    }

    #[test]
    fn every_address_line_but_the_last_breaks() {
        assert!(address_breaks(&[]).is_empty());

        let single = vec!["Fjordveien 12".to_string()];
        assert_eq!(address_breaks(&single), vec![("Fjordveien 12", false)]);

        let lines: Vec<String> = ["Fjordveien 12", "6800 Førde", "Norway"]
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert_eq!(
            address_breaks(&lines),
            vec![("Fjordveien 12", true), ("6800 Førde", true), ("Norway", false)]
        );
    }
}
