use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};
use storefront_interactions::{LayoutBox, Page};

const INTERACTION_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/interaction_property_test.txt";
const DEFAULT_INTERACTION_PROPTEST_CASES: u32 = 96;

const STOREFRONT_HTML: &str = include_str!("fixtures/storefront.html");

const NAV_HREFS: [&str; 4] = ["#catalog", "#merch", "#pricing", "#blog"];

// (selector, whether the click counts toward the cart)
const CARD_CLICKS: [(&str, bool); 6] = [
    ("#issue-1", true),
    ("#issue-2", true),
    ("#issue-2 .comic-preview", false),
    ("#issue-3 .comic-review", false),
    ("#tote", true),
    ("#pin h3", true),
];

#[derive(Clone, Debug)]
enum PageAction {
    ToggleMenu,
    ClickNavLink(usize),
    ToggleTheme,
    ClickCard(usize),
    Scroll(u32),
    Advance(u16),
}

fn interaction_proptest_cases() -> u32 {
    std::env::var("STOREFRONT_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_INTERACTION_PROPTEST_CASES)
}

fn page_action_strategy() -> BoxedStrategy<PageAction> {
    prop_oneof![
        2 => Just(PageAction::ToggleMenu),
        1 => (0usize..4).prop_map(PageAction::ClickNavLink),
        2 => Just(PageAction::ToggleTheme),
        4 => (0usize..CARD_CLICKS.len()).prop_map(PageAction::ClickCard),
        3 => (0u32..3200).prop_map(PageAction::Scroll),
        3 => (0u16..400).prop_map(PageAction::Advance),
    ]
    .boxed()
}

fn fail(err: storefront_interactions::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn assert_page_invariants(actions: &[PageAction]) -> TestCaseResult {
    let mut page = Page::from_html(STOREFRONT_HTML).map_err(fail)?;
    page.set_layout_all(".comic-card", LayoutBox::new(900.0, 300.0), 20.0)
        .map_err(fail)?;
    page.set_layout_all(".blog-card", LayoutBox::new(2800.0, 200.0), 20.0)
        .map_err(fail)?;

    let mut expected_count = 0u32;
    let mut expected_dark = true;
    let mut max_revealed = 0usize;
    let mut last_parallax = String::new();

    for (step, action) in actions.iter().enumerate() {
        match action {
            PageAction::ToggleMenu => page.click("#hamburger").map_err(fail)?,
            PageAction::ClickNavLink(index) => {
                let href = NAV_HREFS[*index];
                page.click(&format!("a.nav-link[href=\"{href}\"]"))
                    .map_err(fail)?;
                prop_assert!(!page.has_class("#navMenu", "active").map_err(fail)?);
            }
            PageAction::ToggleTheme => {
                page.click("#themeToggle").map_err(fail)?;
                expected_dark = !expected_dark;
            }
            PageAction::ClickCard(card) => {
                let (selector, counts) = CARD_CLICKS[*card];
                page.click(selector).map_err(fail)?;
                if counts {
                    expected_count += 1;
                }
            }
            PageAction::Scroll(y) => {
                page.scroll_to(f64::from(*y));
                let transform = page.style(".hero-collage", "transform").map_err(fail)?;
                if f64::from(*y) < page.viewport_height() {
                    last_parallax = transform.clone();
                }
                prop_assert_eq!(&transform, &last_parallax, "parallax at step {}", step);
            }
            PageAction::Advance(ms) => page.advance_time(i64::from(*ms)).map_err(fail)?,
        }

        let toggle_open = page.has_class("#hamburger", "active").map_err(fail)?;
        let panel_open = page.has_class("#navMenu", "active").map_err(fail)?;
        prop_assert_eq!(toggle_open, panel_open, "menu out of sync at step {}", step);

        prop_assert_eq!(page.controller().cart_count(), expected_count);
        let badge = page.text(".cart-count").map_err(fail)?;
        prop_assert_eq!(badge, expected_count.to_string());

        prop_assert_eq!(page.controller().is_dark(), expected_dark);
        let light = page.has_class("body", "light-mode").map_err(fail)?;
        prop_assert_eq!(light, !expected_dark);

        let revealed = page.controller().animated().revealed_count();
        prop_assert!(revealed >= max_revealed, "a revealed card was hidden again");
        max_revealed = revealed;
        prop_assert_eq!(page.observed_count() + revealed, 10);

        // One press revert per product card plus the cart bounce.
        prop_assert!(page.pending_timers().len() <= 6);
    }

    page.flush().map_err(fail)?;
    prop_assert!(page.pending_timers().is_empty());
    for card in ["#issue-1", "#issue-2", "#issue-3", "#tote", "#pin"] {
        let transform = page.style(card, "transform").map_err(fail)?;
        prop_assert_ne!(transform.as_str(), "scale(0.95)");
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: interaction_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(INTERACTION_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn storefront_interactions_keep_their_invariants(
        actions in vec(page_action_strategy(), 1..=32)
    ) {
        assert_page_invariants(&actions)?;
    }
}
