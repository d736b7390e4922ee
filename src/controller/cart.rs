use super::*;

impl PageInteractionController {
    pub(super) fn bind_cart<H: PageHost + ?Sized>(&self, host: &mut H) {
        for card in find_all(host, &self.config.selectors.product_cards) {
            host.add_listener(EventTarget::Node(card), EventKind::Click, Binding::CartCard);
        }
    }

    /// Counts a click on a product card unless it landed on (or inside) a
    /// link, then plays the press and cart-bounce feedback.
    pub(super) fn register_cart_click<H: PageHost + ?Sized>(
        &mut self,
        event: &EventState,
        host: &mut H,
    ) {
        let Some(card) = event.current_node() else {
            return;
        };
        let selectors = &self.config.selectors;
        let target = event.target_node().unwrap_or(card);
        if find_closest(host, target, &selectors.card_link_exclusion).is_some() {
            return;
        }

        let count = self.state.cart.increment();
        if let Some(badge) = find_first(host, &selectors.cart_count) {
            host.set_text(badge, &count.to_string());
        }

        let cart = &self.config.cart;
        host.set_style(card, "transform", &cart.press_transform);
        host.schedule_style(
            TaskKey::new(card, TaskSlot::PressFeedback),
            cart.press_revert_ms,
            StyleWrite::new(card, "transform", ""),
        );

        if let Some(button) = find_first(host, &selectors.cart_button) {
            // Clearing the animation first lets the same keyframes play again.
            host.set_style(button, "animation", "none");
            host.schedule_style(
                TaskKey::new(button, TaskSlot::CartBounce),
                cart.bounce_restart_ms,
                StyleWrite::new(button, "animation", cart.bounce_animation.as_str()),
            );
        }
        tracing::debug!(count, card = card.index(), "cart item registered");
    }
}
