use super::*;

mod fade_in;
mod navigation;

const STOREFRONT_HTML: &str = include_str!("../tests/fixtures/storefront.html");

fn storefront() -> Result<Page> {
    Page::from_html(STOREFRONT_HTML)
}

#[test]
fn storefront_fixture_initializes_every_behavior() -> Result<()> {
    let page = storefront()?;
    // Menu toggle, 4 nav links, theme toggle, 5 product cards, 8 in-page
    // anchors, window scroll, 3 plan buttons and the CTA.
    assert_eq!(page.listener_count(), 24);
    assert_eq!(page.controller().animated().prepared_count(), 10);
    assert_eq!(page.controller().cart_count(), 0);
    assert!(page.controller().is_dark());
    page.assert_exists("head > style#cartAnimation")?;
    Ok(())
}

#[test]
fn reinitializing_binds_nothing_twice() -> Result<()> {
    let mut page = storefront()?;
    let listeners = page.listener_count();
    page.reinitialize();
    page.reinitialize();
    assert_eq!(page.listener_count(), listeners);
    assert_eq!(page.count("style#cartAnimation")?, 1);

    page.click("#issue-1")?;
    page.assert_text(".cart-count", "1")?;
    Ok(())
}

#[test]
fn minimal_page_without_optional_elements_is_quiet() -> Result<()> {
    let mut page = Page::from_html("<div class='comic-card' id='only'>solo</div>")?;
    page.click("#only")?;
    assert_eq!(page.controller().cart_count(), 1);
    page.scroll_to(120.0);
    page.flush()?;
    assert_eq!(page.style("#only", "transform")?, "");
    assert_eq!(page.style("#only", "opacity")?, "0");
    assert!(page.take_notices().is_empty());
    Ok(())
}

#[test]
fn invalid_config_is_rejected_before_parsing() {
    let mut config = ControllerConfig::default();
    config.fade_in.threshold = 2.0;
    let err = Page::from_html_with_config("<p></p>", config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
