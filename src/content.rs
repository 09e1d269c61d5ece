//! Page content. Every section reads exactly one of these records and renders
//! nothing when its primary fields are empty.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

const EMBEDDED_CONTENT: &str = include_str!("../content.json");

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiteContent {
    pub site: SiteConfig,
    pub hero: HeroConfig,
    pub narrative_text: NarrativeTextConfig,
    pub card_stack: CardStackConfig,
    pub breath_section: BreathSectionConfig,
    pub zig_zag_grid: ZigZagGridConfig,
    pub footer: FooterConfig,
}

impl SiteContent {
    /// Fails only when `raw` is not JSON at all. Each section is read on its
    /// own, so a malformed section falls back to empty without touching the
    /// others.
    pub fn from_json(raw: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(raw)?;
        Ok(Self {
            site: section(&root, "site"),
            hero: section(&root, "hero"),
            narrative_text: section(&root, "narrativeText"),
            card_stack: section(&root, "cardStack"),
            breath_section: section(&root, "breathSection"),
            zig_zag_grid: section(&root, "zigZagGrid"),
            footer: section(&root, "footer"),
        })
    }
}

fn section<T: DeserializeOwned + Default>(root: &Value, key: &str) -> T {
    let Some(value) = root.get(key) else {
        return T::default();
    };
    match T::deserialize(value) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring malformed \"{}\" content: {}", key, e);
            T::default()
        }
    }
}

/// Content bundled into the binary. Content that is not JSON at all degrades
/// to an empty page rather than a failed mount.
pub fn load() -> SiteContent {
    match SiteContent::from_json(EMBEDDED_CONTENT) {
        Ok(content) => content,
        Err(e) => {
            warn!("Falling back to empty content: {}", e);
            SiteContent::default()
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub language: String,
    pub site_name: String,
    pub site_description: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    pub background_image: String,
    pub background_alt: String,
    pub title: String,
    pub subtitle: String,
}

impl HeroConfig {
    pub fn has_content(&self) -> bool {
        !self.title.is_empty() || !self.background_image.is_empty()
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct NarrativeTextConfig {
    pub line1: String,
    pub line2: String,
    pub line3: String,
}

impl NarrativeTextConfig {
    pub fn has_content(&self) -> bool {
        !self.line1.is_empty() || !self.line2.is_empty() || !self.line3.is_empty()
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ZigZagGridItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: String,
    pub image_alt: String,
    pub reverse: bool,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ZigZagGridConfig {
    pub section_label: String,
    pub section_title: String,
    pub items: Vec<ZigZagGridItem>,
}

impl ZigZagGridConfig {
    pub fn has_content(&self) -> bool {
        !self.section_title.is_empty() || !self.items.is_empty()
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BreathSectionConfig {
    pub background_image: String,
    pub background_alt: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

impl BreathSectionConfig {
    pub fn has_content(&self) -> bool {
        !self.title.is_empty() || !self.background_image.is_empty()
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct CardStackItem {
    pub id: u32,
    pub image: String,
    pub title: String,
    pub description: String,
    /// Static tilt in degrees.
    pub rotation: f64,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CardStackConfig {
    pub section_title: String,
    pub section_subtitle: String,
    pub cards: Vec<CardStackItem>,
}

impl CardStackConfig {
    pub fn has_content(&self) -> bool {
        !self.section_title.is_empty() || !self.cards.is_empty()
    }
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    #[default]
    Email,
    Phone,
    /// Any other type; shown like a phone number.
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct FooterContactItem {
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub label: String,
    pub value: String,
    pub href: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct FooterSocialItem {
    pub platform: String,
    pub href: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

fn default_footer_background() -> String {
    "/footer-cabin.jpg".to_string()
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterConfig {
    pub heading: String,
    pub description: String,
    pub cta_text: String,
    pub contact: Vec<FooterContactItem>,
    pub location_label: String,
    pub address: Vec<String>,
    pub social_label: String,
    pub socials: Vec<FooterSocialItem>,
    pub logo_text: String,
    pub copyright: String,
    pub links: Vec<FooterLink>,
    pub background_image: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            heading: String::new(),
            description: String::new(),
            cta_text: String::new(),
            contact: Vec::new(),
            location_label: String::new(),
            address: Vec::new(),
            social_label: String::new(),
            socials: Vec::new(),
            logo_text: String::new(),
            copyright: String::new(),
            links: Vec::new(),
            background_image: default_footer_background(),
        }
    }
}

impl FooterConfig {
    pub fn has_content(&self) -> bool {
        !self.heading.is_empty() || !self.logo_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        SiteContent::from_json(EMBEDDED_CONTENT).unwrap();
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let content = SiteContent::from_json(r#"{"hero": {"title": "KALEO"}}"#).unwrap();
        assert_eq!(content.hero.title, "KALEO");
        assert!(content.hero.background_image.is_empty());
        assert!(!content.narrative_text.has_content());
        assert!(!content.footer.has_content());
        assert_eq!(content.footer.background_image, "/footer-cabin.jpg");
    }

    #[test]
    fn camel_case_keys_and_contact_type() {
        let raw = r#"{
            "zigZagGrid": {
                "sectionTitle": "Stay",
                "items": [{"id": "a", "imageAlt": "cabin", "reverse": true}]
            },
            "footer": {
                "logoText": "KALEO",
                "contact": [{"type": "phone", "label": "Call", "value": "+1", "href": "tel:+1"}]
            }
        }"#;
        let content = SiteContent::from_json(raw).unwrap();
        assert_eq!(content.zig_zag_grid.items[0].image_alt, "cabin");
        assert!(content.zig_zag_grid.items[0].reverse);
        assert_eq!(content.footer.contact[0].kind, ContactKind::Phone);
        assert!(content.footer.has_content());
    }

    #[test]
    fn only_unparseable_json_is_an_error() {
        assert!(SiteContent::from_json("{ not json").is_err());
        assert_eq!(SiteContent::from_json("[]").unwrap(), SiteContent::default());
    }

    #[test]
    fn unknown_contact_type_is_kept() {
        let raw = r#"{"footer": {"logoText": "KALEO", "contact": [{"type": "fax", "value": "+1"}]}}"#;
        let content = SiteContent::from_json(raw).unwrap();
        assert_eq!(content.footer.contact[0].kind, ContactKind::Other);
        assert_eq!(content.footer.contact[0].value, "+1");
    }

    #[test]
    fn malformed_section_leaves_the_rest_intact() {
        let raw = r#"{
            "hero": {"title": "KALEO", "backgroundImage": "/hero.jpg"},
            "narrativeText": {"line1": "Some places ask nothing of you."},
            "cardStack": {"sectionTitle": "Cabins", "cards": [{"id": 1, "rotation": "tilted"}]},
            "footer": {"logoText": "KALEO", "contact": "not a list"}
        }"#;
        let content = SiteContent::from_json(raw).unwrap();
        assert!(content.hero.has_content());
        assert_eq!(content.hero.title, "KALEO");
        assert!(content.narrative_text.has_content());
        assert!(!content.card_stack.has_content());
        assert!(!content.footer.has_content());
        assert_eq!(content.footer.background_image, "/footer-cabin.jpg");
    }

    #[test]
    fn hero_without_title_or_image_has_no_content() {
        let hero = HeroConfig {
            background_alt: "alt only".into(),
            subtitle: "subtitle only".into(),
            ..Default::default()
        };
        assert!(!hero.has_content());

        let hero = HeroConfig {
            background_image: "/hero.jpg".into(),
            ..Default::default()
        };
        assert!(hero.has_content());
    }

    #[test]
    fn section_guards() {
        let mut narrative = NarrativeTextConfig::default();
        assert!(!narrative.has_content());
        narrative.line3 = "quiet".into();
        assert!(narrative.has_content());

        let mut cards = CardStackConfig::default();
        assert!(!cards.has_content());
        cards.cards.push(CardStackItem::default());
        assert!(cards.has_content());

        let breath = BreathSectionConfig {
            description: "description alone is not enough".into(),
            ..Default::default()
        };
        assert!(!breath.has_content());

        let grid = ZigZagGridConfig {
            section_label: "label alone".into(),
            ..Default::default()
        };
        assert!(!grid.has_content());
    }
}
