use std::sync::Once;

use storefront_interactions::{ControllerConfig, LayoutBox, Page, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const STOREFRONT_HTML: &str = include_str!("fixtures/storefront.html");

static INIT_LOGGING: Once = Once::new();

fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("storefront_interactions=warn"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(false)
                    .compact(),
            )
            .try_init();
    });
}

fn storefront_with_layout() -> Result<Page> {
    let mut page = Page::from_html(STOREFRONT_HTML)?;
    page.set_layout("#home", LayoutBox::new(0.0, 760.0))?;
    page.set_layout("#catalog", LayoutBox::new(760.0, 900.0))?;
    page.set_layout_all(".comic-card", LayoutBox::new(880.0, 320.0), 24.0)?;
    page.set_layout("#merch", LayoutBox::new(1660.0, 500.0))?;
    page.set_layout_all(".merch-card", LayoutBox::new(1760.0, 280.0), 24.0)?;
    page.set_layout("#pricing", LayoutBox::new(2160.0, 600.0))?;
    page.set_layout_all(".pricing-card", LayoutBox::new(2260.0, 420.0), 0.0)?;
    page.set_layout("#blog", LayoutBox::new(2760.0, 500.0))?;
    page.set_layout_all(".blog-card", LayoutBox::new(2860.0, 180.0), 20.0)?;
    Ok(page)
}

#[test]
fn shopper_session_end_to_end() -> Result<()> {
    init_test_logging();
    let mut page = storefront_with_layout()?;

    // Nothing below the fold is revealed yet.
    assert_eq!(page.controller().animated().revealed_count(), 0);

    page.click("#hamburger")?;
    page.click("a[href=\"#catalog\"]")?;
    page.assert_class("#navMenu", "active", false)?;
    assert_eq!(page.scroll_y(), 760.0);
    assert_eq!(page.style(".hero-collage", "transform")?, "translateY(228px)");
    assert_eq!(page.style("#issue-1", "opacity")?, "1");
    assert_eq!(page.style("#issue-3", "opacity")?, "0");

    page.click("#issue-1")?;
    page.click("#issue-2 .comic-preview")?;
    page.advance_time(200)?;
    page.assert_text(".cart-count", "1")?;
    assert_eq!(page.style("#issue-1", "transform")?, "");

    page.scroll_to(2500.0);
    // Past one viewport the hero keeps its last offset.
    assert_eq!(page.style(".hero-collage", "transform")?, "translateY(228px)");
    assert_eq!(page.count(".pricing-card[style*=\"opacity: 1\"]")?, 3);

    page.click("#plan-collector")?;
    assert_eq!(page.take_notices().len(), 1);

    page.click("#themeToggle")?;
    page.assert_class("body", "light-mode", true)?;
    Ok(())
}

#[test]
fn config_file_overrides_apply_to_the_page() -> Result<()> {
    init_test_logging();
    let dir = std::env::temp_dir().join(format!(
        "storefront-interactions-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).map_err(|err| {
        storefront_interactions::Error::Config(format!("temp dir: {err}"))
    })?;
    let path = dir.join("storefront.toml");
    std::fs::write(
        &path,
        r##"
        [classes]
        menu_open = "is-open"

        [selectors]
        cart_count = "#badge"

        [parallax]
        factor = 0.5
        "##,
    )
    .map_err(|err| storefront_interactions::Error::Config(format!("write config: {err}")))?;

    let config = ControllerConfig::load(&path)?;
    let _ = std::fs::remove_dir_all(&dir);

    let html = r#"
        <button id='hamburger'></button><nav id='navMenu'></nav>
        <span id='badge'>0</span><span class='cart-count'>0</span>
        <div class='comic-card' id='card'></div>
        <div class='hero-collage'></div>
        "#;
    let mut page = Page::from_html_with_config(html, config)?;
    page.click("#hamburger")?;
    page.assert_class("#navMenu", "is-open", true)?;
    page.click("#card")?;
    page.assert_text("#badge", "1")?;
    page.assert_text(".cart-count", "0")?;
    page.scroll_to(100.0);
    assert_eq!(page.style(".hero-collage", "transform")?, "translateY(50px)");
    Ok(())
}
