//! Controller configuration. Every field has a default that reproduces the
//! storefront page, so an empty TOML document is a valid configuration.

use super::*;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub selectors: SelectorConfig,
    pub classes: ClassConfig,
    pub theme: ThemeConfig,
    pub cart: CartConfig,
    pub parallax: ParallaxConfig,
    pub fade_in: FadeInConfig,
    pub plans: PlanConfig,
    pub scroll: ScrollIntoViewOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub menu_toggle: String,
    pub menu_panel: String,
    pub nav_links: String,
    pub theme_toggle: String,
    pub theme_icon: String,
    pub theme_root: String,
    pub cart_button: String,
    pub cart_count: String,
    pub product_cards: String,
    pub card_link_exclusion: String,
    pub in_page_anchors: String,
    pub hero_collage: String,
    pub animated_cards: String,
    pub plan_buttons: String,
    pub pricing_card: String,
    pub plan_name: String,
    pub cta_button: String,
    pub catalog_section: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            menu_toggle: "#hamburger".into(),
            menu_panel: "#navMenu".into(),
            nav_links: ".nav-link".into(),
            theme_toggle: "#themeToggle".into(),
            theme_icon: ".theme-icon".into(),
            theme_root: "body".into(),
            cart_button: ".cart-btn".into(),
            cart_count: ".cart-count".into(),
            product_cards: ".comic-card, .merch-card".into(),
            card_link_exclusion: "a".into(),
            in_page_anchors: "a[href^=\"#\"]".into(),
            hero_collage: ".hero-collage".into(),
            animated_cards: ".comic-card, .merch-card, .pricing-card, .blog-card".into(),
            plan_buttons: ".plan-button".into(),
            pricing_card: ".pricing-card".into(),
            plan_name: ".plan-name".into(),
            cta_button: ".cta-button".into(),
            catalog_section: "#catalog".into(),
        }
    }
}

impl SelectorConfig {
    fn named(&self) -> [(&'static str, &str); 18] {
        [
            ("menu_toggle", self.menu_toggle.as_str()),
            ("menu_panel", self.menu_panel.as_str()),
            ("nav_links", self.nav_links.as_str()),
            ("theme_toggle", self.theme_toggle.as_str()),
            ("theme_icon", self.theme_icon.as_str()),
            ("theme_root", self.theme_root.as_str()),
            ("cart_button", self.cart_button.as_str()),
            ("cart_count", self.cart_count.as_str()),
            ("product_cards", self.product_cards.as_str()),
            ("card_link_exclusion", self.card_link_exclusion.as_str()),
            ("in_page_anchors", self.in_page_anchors.as_str()),
            ("hero_collage", self.hero_collage.as_str()),
            ("animated_cards", self.animated_cards.as_str()),
            ("plan_buttons", self.plan_buttons.as_str()),
            ("pricing_card", self.pricing_card.as_str()),
            ("plan_name", self.plan_name.as_str()),
            ("cta_button", self.cta_button.as_str()),
            ("catalog_section", self.catalog_section.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    pub menu_open: String,
    pub light_mode: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            menu_open: "active".into(),
            light_mode: "light-mode".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub starts_dark: bool,
    /// Glyph shown while the page is dark (offers the switch to light).
    pub dark_glyph: String,
    pub light_glyph: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            starts_dark: true,
            dark_glyph: "☀️".into(),
            light_glyph: "🌙".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub press_transform: String,
    pub press_revert_ms: i64,
    pub bounce_restart_ms: i64,
    pub bounce_animation: String,
    pub style_block_id: String,
    pub keyframes: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            press_transform: "scale(0.95)".into(),
            press_revert_ms: 200,
            bounce_restart_ms: 10,
            bounce_animation: "cartBounce 0.5s ease".into(),
            style_block_id: "cartAnimation".into(),
            keyframes: "@keyframes cartBounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-10px); } }".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { factor: 0.3 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub initial_offset_px: f64,
    pub transition: String,
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            initial_offset_px: 30.0,
            transition: "opacity 0.6s ease, transform 0.6s ease".into(),
            threshold: 0.1,
            root_margin: RootMargin {
                top: 0.0,
                right: 0.0,
                bottom: -100.0,
                left: 0.0,
            },
        }
    }
}

impl FadeInConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: self.root_margin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// `{plan}` is replaced by the trimmed plan name.
    pub notice_template: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            notice_template:
                "You selected the {plan} plan! In a real store, this would redirect to checkout."
                    .into(),
        }
    }
}

impl PlanConfig {
    pub fn notice(&self, plan: &str) -> String {
        self.notice_template.replace("{plan}", plan)
    }
}

impl ControllerConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(src).map_err(|err| Error::Config(format!("invalid TOML: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("failed to read {}: {err}", path.display())))?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded controller config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, selector) in self.selectors.named() {
            if selector.trim().is_empty() {
                return Err(Error::Config(format!("selectors.{name} must not be empty")));
            }
            parse_selector_groups(selector)
                .map_err(|err| Error::Config(format!("selectors.{name}: {err}")))?;
        }
        if self.classes.menu_open.trim().is_empty() || self.classes.light_mode.trim().is_empty() {
            return Err(Error::Config("class names must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.fade_in.threshold) {
            return Err(Error::Config(format!(
                "fade_in.threshold must be within [0, 1], got {}",
                self.fade_in.threshold
            )));
        }
        if !self.fade_in.initial_offset_px.is_finite() {
            return Err(Error::Config("fade_in.initial_offset_px must be finite".into()));
        }
        if !self.parallax.factor.is_finite() || self.parallax.factor < 0.0 {
            return Err(Error::Config(format!(
                "parallax.factor must be finite and non-negative, got {}",
                self.parallax.factor
            )));
        }
        if self.cart.press_revert_ms < 0 || self.cart.bounce_restart_ms < 0 {
            return Err(Error::Config("cart delays must not be negative".into()));
        }
        if self.cart.style_block_id.trim().is_empty() {
            return Err(Error::Config("cart.style_block_id must not be empty".into()));
        }
        Ok(())
    }
}
