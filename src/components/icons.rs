use yew::prelude::*;

use crate::content::ContactKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Mail,
    Phone,
    MapPin,
    ArrowUpRight,
    Instagram,
    Facebook,
    Star,
}

impl Icon {
    pub fn for_contact(kind: ContactKind) -> Self {
        match kind {
            ContactKind::Email => Icon::Mail,
            ContactKind::Phone | ContactKind::Other => Icon::Phone,
        }
    }

    /// Unknown platforms get the Instagram glyph.
    pub fn for_platform(platform: &str) -> Self {
        match platform.trim().to_lowercase().as_str() {
            "facebook" => Icon::Facebook,
            _ => Icon::Instagram,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::Mail => "mail",
            Icon::Phone => "phone",
            Icon::MapPin => "map-pin",
            Icon::ArrowUpRight => "arrow-up-right",
            Icon::Instagram => "instagram",
            Icon::Facebook => "facebook",
            Icon::Star => "star",
        }
    }

    fn paths(self) -> &'static [&'static str] {
        match self {
            Icon::Mail => &[
                "M4 4h16a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2z",
                "m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7",
            ],
            Icon::Phone => &[
                "M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z",
            ],
            Icon::MapPin => &[
                "M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z",
                "M12 7a3 3 0 1 0 0 6a3 3 0 1 0 0-6z",
            ],
            Icon::ArrowUpRight => &["M7 7h10v10", "M7 17 17 7"],
            Icon::Instagram => &[
                "M7 2h10a5 5 0 0 1 5 5v10a5 5 0 0 1-5 5H7a5 5 0 0 1-5-5V7a5 5 0 0 1 5-5z",
                "M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z",
                "M17.5 6.5h.01",
            ],
            Icon::Facebook => &[
                "M18 2h-3a5 5 0 0 0-5 5v3H7v4h3v8h4v-8h3l1-4h-4V7a1 1 0 0 1 1-1h3z",
            ],
            Icon::Star => &["M12 0L14.5 9.5L24 12L14.5 14.5L12 24L9.5 14.5L0 12L9.5 9.5L12 0Z"],
        }
    }

    pub fn render(self, class: &'static str) -> Html {
        let (fill, stroke) = match self {
            Icon::Star => ("currentColor", "none"),
            _ => ("none", "currentColor"),
        };
        html! {
            <svg
                class={classes!("icon", class)}
                data-icon={self.name()}
                viewBox="0 0 24 24"
                fill={fill}
                stroke={stroke}
                stroke-width="2"
                stroke-linecap="round"
                stroke-linejoin="round"
                aria-hidden="true"
            >
                { for self.paths().iter().map(|d| html! { <path d={*d} /> }) }
            </svg>
        }
    }
}
