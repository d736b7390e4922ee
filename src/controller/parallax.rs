use super::*;

impl PageInteractionController {
    /// Shifts the hero collage by a fraction of the scroll offset. Past one
    /// viewport height the last written offset is left in place.
    pub(super) fn apply_parallax<H: PageHost + ?Sized>(&self, host: &mut H) {
        let scroll_y = host.scroll_y();
        if scroll_y >= host.viewport_height() {
            return;
        }
        let Some(hero) = find_first(host, &self.config.selectors.hero_collage) else {
            return;
        };
        let offset = format_css_number(scroll_y * self.config.parallax.factor);
        host.set_style(hero, "transform", &format!("translateY({offset}px)"));
    }
}
