use super::*;

#[test]
fn in_page_link_scrolls_smoothly_without_navigating() -> Result<()> {
    let mut page = storefront()?;
    page.set_layout("#catalog", LayoutBox::new(900.0, 1200.0))?;
    page.click("a[href=\"#catalog\"]")?;

    let requests = page.take_scroll_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].node, page.node("#catalog")?);
    assert_eq!(requests[0].options, ScrollIntoViewOptions::smooth_start());
    assert_eq!(page.scroll_y(), 900.0);
    assert_eq!(page.location_hash(), "");
    Ok(())
}

#[test]
fn unmatched_fragment_is_swallowed() -> Result<()> {
    let mut page = storefront()?;
    page.click(".broken-link")?;
    assert!(page.take_scroll_requests().is_empty());
    assert_eq!(page.location_hash(), "");
    assert_eq!(page.scroll_y(), 0.0);
    Ok(())
}

#[test]
fn bare_hash_link_does_nothing() -> Result<()> {
    let mut page = storefront()?;
    page.scroll_to(400.0);
    page.click(".back-to-top")?;
    assert!(page.take_scroll_requests().is_empty());
    assert_eq!(page.scroll_y(), 400.0);
    assert_eq!(page.location_hash(), "");
    Ok(())
}

#[test]
fn target_without_layout_records_the_request_only() -> Result<()> {
    let mut page = storefront()?;
    page.click(".logo")?;
    let requests = page.take_scroll_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].node, page.node("#home")?);
    assert_eq!(page.scroll_y(), 0.0);
    Ok(())
}

#[test]
fn uncaptured_fragment_links_navigate_by_default() -> Result<()> {
    let config = ControllerConfig::from_toml_str(
        "[selectors]\nin_page_anchors = \"a.smooth\"\n",
    )?;
    let mut page = Page::from_html_with_config(STOREFRONT_HTML, config)?;
    page.set_layout("#merch", LayoutBox::new(2400.0, 600.0))?;

    page.click("a[href=\"#merch\"]")?;
    assert_eq!(page.location_hash(), "#merch");
    assert_eq!(page.scroll_y(), 2400.0);
    assert!(page.take_scroll_requests().is_empty());

    page.click(".back-to-top")?;
    assert_eq!(page.location_hash(), "");
    assert_eq!(page.scroll_y(), 0.0);
    Ok(())
}

#[test]
fn link_scroll_fires_scroll_listeners() -> Result<()> {
    let mut page = storefront()?;
    page.set_layout("#merch", LayoutBox::new(500.0, 400.0))?;
    page.click("a[href=\"#merch\"]")?;
    assert_eq!(page.scroll_y(), 500.0);
    assert_eq!(page.style(".hero-collage", "transform")?, "translateY(150px)");
    Ok(())
}
