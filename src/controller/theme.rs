use super::*;

impl PageInteractionController {
    pub(super) fn bind_theme<H: PageHost + ?Sized>(&self, host: &mut H) {
        if let Some(toggle) = find_first(host, &self.config.selectors.theme_toggle) {
            host.add_listener(EventTarget::Node(toggle), EventKind::Click, Binding::ThemeToggle);
        }
    }

    pub(super) fn toggle_theme<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        let is_dark = self.state.theme.toggle();
        let theme = &self.config.theme;
        let glyph = if is_dark {
            &theme.dark_glyph
        } else {
            &theme.light_glyph
        };
        if let Some(icon) = find_first(host, &self.config.selectors.theme_icon) {
            host.set_text(icon, glyph);
        }
        if let Some(root) = find_first(host, &self.config.selectors.theme_root) {
            host.toggle_class(root, &self.config.classes.light_mode);
        }
        tracing::debug!(is_dark, "theme toggled");
    }
}
