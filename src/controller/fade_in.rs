use super::*;

/// Cards prepared for the fade-in and the subset already revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimatedElementSet {
    prepared: HashSet<NodeId>,
    revealed: HashSet<NodeId>,
}

impl AnimatedElementSet {
    pub fn is_prepared(&self, node: NodeId) -> bool {
        self.prepared.contains(&node)
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    pub fn prepared_count(&self) -> usize {
        self.prepared.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

impl PageInteractionController {
    pub(super) fn prepare_fade_in<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        let fade_in = &self.config.fade_in;
        let observer = *self
            .fade_observer
            .get_or_insert_with(|| host.create_observer(fade_in.observer_options()));
        let hidden_transform = format!(
            "translateY({}px)",
            format_css_number(fade_in.initial_offset_px)
        );

        for node in find_all(host, &self.config.selectors.animated_cards) {
            if !self.animated.prepared.insert(node) {
                continue;
            }
            host.set_style(node, "opacity", "0");
            host.set_style(node, "transform", &hidden_transform);
            host.set_style(node, "transition", &fade_in.transition);
            host.observe(observer, node);
        }
    }

    /// Reveals prepared cards on their first intersection and stops watching
    /// them.
    pub fn on_intersection<H: PageHost + ?Sized>(
        &mut self,
        entries: &[IntersectionEntry],
        host: &mut H,
    ) {
        let Some(observer) = self.fade_observer else {
            return;
        };
        for entry in entries {
            if entry.observer != observer || !entry.is_intersecting {
                continue;
            }
            let node = entry.target;
            if !self.animated.prepared.contains(&node) || !self.animated.revealed.insert(node) {
                continue;
            }
            host.set_style(node, "opacity", "1");
            host.set_style(node, "transform", "translateY(0)");
            host.unobserve(observer, node);
            tracing::debug!(node = node.index(), ratio = entry.intersection_ratio, "card revealed");
        }
    }
}
