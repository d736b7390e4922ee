use super::*;

#[test]
fn cards_start_hidden_and_observed() -> Result<()> {
    let page = storefront()?;
    for selector in ["#issue-1", "#tote", ".pricing-card", ".blog-card"] {
        assert_eq!(page.style(selector, "opacity")?, "0");
        assert_eq!(page.style(selector, "transform")?, "translateY(30px)");
        assert_eq!(
            page.style(selector, "transition")?,
            "opacity 0.6s ease, transform 0.6s ease"
        );
    }
    assert_eq!(page.observed_count(), 10);
    assert_eq!(page.style(".hero-collage", "opacity")?, "");
    Ok(())
}

#[test]
fn card_in_view_is_revealed_and_unobserved() -> Result<()> {
    let mut page = storefront()?;
    page.set_layout("#issue-1", LayoutBox::new(100.0, 300.0))?;
    assert_eq!(page.style("#issue-1", "opacity")?, "1");
    assert_eq!(page.style("#issue-1", "transform")?, "translateY(0)");
    assert_eq!(page.observed_count(), 9);
    let issue = page.node("#issue-1")?;
    assert!(page.controller().animated().is_revealed(issue));
    Ok(())
}

#[test]
fn bottom_margin_delays_the_reveal() -> Result<()> {
    let mut page = storefront()?;
    // 20px of the card sits above the shrunken root bottom at 700px.
    page.set_layout("#tote", LayoutBox::new(680.0, 300.0))?;
    assert_eq!(page.style("#tote", "opacity")?, "0");

    page.scroll_to(100.0);
    assert_eq!(page.style("#tote", "opacity")?, "1");
    Ok(())
}

#[test]
fn revealed_cards_stay_revealed() -> Result<()> {
    let mut page = storefront()?;
    page.set_layout_all(".blog-card", LayoutBox::new(2000.0, 200.0), 40.0)?;
    assert_eq!(page.style(".blog-card", "opacity")?, "0");

    page.scroll_to(1500.0);
    assert_eq!(page.count(".blog-card[style*=\"opacity: 1\"]")?, 1);

    page.scroll_to(0.0);
    assert_eq!(page.style(".blog-card", "opacity")?, "1");
    assert_eq!(page.controller().animated().revealed_count(), 1);

    page.scroll_to(1800.0);
    assert_eq!(page.count(".blog-card[style*=\"opacity: 1\"]")?, 2);
    Ok(())
}

#[test]
fn reinitialize_does_not_hide_revealed_cards() -> Result<()> {
    let mut page = storefront()?;
    page.set_layout("#issue-1", LayoutBox::new(0.0, 300.0))?;
    page.reinitialize();
    assert_eq!(page.style("#issue-1", "opacity")?, "1");
    assert_eq!(page.observed_count(), 9);
    assert_eq!(page.controller().animated().prepared_count(), 10);
    Ok(())
}

#[test]
fn zero_threshold_reveals_on_touch() -> Result<()> {
    let config = ControllerConfig::from_toml_str(
        "[fade_in]\nthreshold = 0.0\nroot_margin = \"0px\"\n",
    )?;
    let mut page = Page::from_html_with_config("<div class='blog-card'>post</div>", config)?;
    page.set_layout(".blog-card", LayoutBox::new(800.0, 100.0))?;
    assert_eq!(page.style(".blog-card", "opacity")?, "1");
    Ok(())
}

#[test]
fn cards_without_layout_never_reveal() -> Result<()> {
    let mut page = storefront()?;
    page.scroll_to(300.0);
    page.scroll_to(3000.0);
    assert_eq!(page.controller().animated().revealed_count(), 0);
    assert_eq!(page.observed_count(), 10);
    Ok(())
}
