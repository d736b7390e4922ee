/// Theme mode of the page. Dark is the storefront default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    is_dark: bool,
}

impl ThemeState {
    pub fn new(is_dark: bool) -> Self {
        Self { is_dark }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Flips the mode and returns the new value of `is_dark`.
    pub fn toggle(&mut self) -> bool {
        self.is_dark = !self.is_dark;
        self.is_dark
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Demo cart counter. Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartCounter {
    count: u32,
}

impl CartCounter {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn increment(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub theme: ThemeState,
    pub cart: CartCounter,
}

impl InteractionState {
    pub fn new(starts_dark: bool) -> Self {
        Self {
            theme: ThemeState::new(starts_dark),
            cart: CartCounter::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_flips_on_each_toggle() {
        let mut theme = ThemeState::default();
        assert!(theme.is_dark());
        assert!(!theme.toggle());
        assert!(theme.toggle());
    }

    #[test]
    fn cart_counter_saturates() {
        let mut cart = CartCounter { count: u32::MAX - 1 };
        assert_eq!(cart.increment(), u32::MAX);
        assert_eq!(cart.increment(), u32::MAX);
    }

    #[test]
    fn interaction_state_honors_the_starting_theme() {
        let state = InteractionState::new(false);
        assert!(!state.theme.is_dark());
        assert_eq!(state.cart.count(), 0);
    }
}
