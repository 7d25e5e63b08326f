use std::rc::Rc;

use site_ui_core::{
    Config, KeyOutcome, MenuPhase, Page, Tweener, UiController, UiError,
};
use site_ui_test_fixtures::{
    site, AnimCall, FakeCarouselFactory, FakePage, RecordingAnimation, SiteNodes,
};

type Recorded = UiController<FakePage, RecordingAnimation, FakeCarouselFactory>;

fn controller_at(
    width: u32,
) -> (Rc<FakePage>, SiteNodes, Rc<RecordingAnimation>, FakeCarouselFactory, Recorded) {
    let (page, nodes) = site(width);
    let anim = Rc::new(RecordingAnimation::new());
    let factory = FakeCarouselFactory::new();
    let ui = UiController::new(
        Rc::clone(&page),
        Rc::clone(&anim),
        Some(factory.clone()),
        Config::default(),
    )
    .unwrap();
    (page, nodes, anim, factory, ui)
}

fn clear_props_count(anim: &RecordingAnimation) -> usize {
    anim.calls()
        .iter()
        .filter(|c| matches!(c, AnimCall::ClearProps(_)))
        .count()
}

#[test]
fn all_features_come_up_on_full_markup() {
    let (_page, _n, _anim, factory, ui) = controller_at(600);
    let f = ui.features();
    assert!(f.menu && f.service_table && f.testimonials && f.carousel);
    assert!(ui.is_carousel_mounted());
    assert_eq!(factory.log().borrow().mounts.len(), 1);
}

#[test]
fn carousel_stays_down_on_wide_startup() {
    let (_page, _n, _anim, factory, ui) = controller_at(900);
    assert!(ui.features().carousel);
    assert!(!ui.is_carousel_mounted());
    assert!(factory.log().borrow().mounts.is_empty());
}

#[test]
fn initial_layout_check_is_debounced() {
    let (page, n, anim, _factory, ui) = controller_at(600);
    assert!(ui.is_resize_pending());
    page.advance_ms(149);
    assert!(ui.is_resize_pending());
    page.advance_ms(1);
    assert!(!ui.is_resize_pending());
    // Parked once at construction and once more by the initial check.
    let sets = anim
        .calls()
        .iter()
        .filter(|c| matches!(c, AnimCall::Set(node, _) if *node == n.nav))
        .count();
    assert_eq!(sets, 2);
}

#[test]
fn resize_bursts_coalesce_for_menu_but_not_carousel() {
    let (page, _n, anim, factory, ui) = controller_at(600);
    page.advance_ms(150);

    page.set_viewport_width(1300);
    for _ in 0..5 {
        ui.on_resize();
        page.advance_ms(50);
    }
    // Carousel reacted on the first event and then stayed put.
    assert_eq!(factory.log().borrow().destroys, 1);
    assert_eq!(clear_props_count(&anim), 0);

    page.advance_ms(100);
    assert_eq!(clear_props_count(&anim), 1);
    assert!(ui.menu_state().unwrap().is_desktop);
}

#[test]
fn carousel_follows_breakpoint_crossings() {
    let (page, _n, _anim, factory, ui) = controller_at(600);
    let log = factory.log();

    ui.on_resize();
    ui.on_resize();
    assert_eq!(log.borrow().mounts.len(), 1);

    page.set_viewport_width(768);
    ui.on_resize();
    assert!(!ui.is_carousel_mounted());
    assert_eq!(log.borrow().destroys, 1);

    page.set_viewport_width(767);
    ui.on_resize();
    ui.on_resize();
    assert!(ui.is_carousel_mounted());
    assert_eq!(log.borrow().mounts.len(), 2);
    assert_eq!(log.borrow().live(), 1);
}

#[test]
fn menu_events_route_through_controller() {
    let (_page, n, anim, _factory, ui) = controller_at(600);

    ui.on_menu_toggle_click();
    anim.finish_all();
    assert_eq!(ui.menu_state().unwrap().phase(), MenuPhase::Open);

    // Clicking the toggle bubbles to the document: must not close.
    ui.on_document_click(&n.toggle_icon);
    assert_eq!(ui.menu_state().unwrap().phase(), MenuPhase::Open);

    ui.on_keydown("Escape");
    assert_eq!(ui.menu_state().unwrap().phase(), MenuPhase::Closing);
    anim.finish_all();

    ui.open_menu();
    anim.finish_all();
    ui.on_overlay_click();
    // The same click then reaches the document handler; the guard absorbs it.
    ui.on_document_click(&n.overlay);
    anim.finish_all();
    assert_eq!(ui.menu_state().unwrap().phase(), MenuPhase::Closed);
}

#[test]
fn disclosure_and_testimonials_route_through_controller() {
    let (page, n, _anim, _factory, ui) = controller_at(600);
    assert_eq!(ui.on_service_toggle_click(), Some(true));
    assert!(!page.is_hidden(&n.service_table));
    assert!(ui.on_service_toggle_keydown(" ").prevents_default());
    assert!(page.is_hidden(&n.service_table));
    assert_eq!(ui.on_service_toggle_keydown("x"), KeyOutcome::Ignored);

    assert_eq!(ui.on_load_more_click(), 3);
    assert_eq!(ui.on_load_more_click(), 0);
}

#[test]
fn missing_markup_only_disables_its_feature() {
    let page = Rc::new(FakePage::new(600));
    let body = page.body_node();
    // No menu, no carousel.
    let trigger = page.add(body, "button#service-table-toggle");
    page.add(body, "table.service-table");
    let container = page.add(body, "section.testimonials-container");
    let visible = page.add(container, "div.testimonials-visible");
    let hidden = page.add(container, "div.testimonials-hidden");
    page.add(hidden, "article");
    page.add(body, "button.load-more-testimonials");

    let factory = FakeCarouselFactory::new();
    let ui = UiController::new(
        Rc::clone(&page),
        Rc::new(RecordingAnimation::new()),
        Some(factory.clone()),
        Config::default(),
    )
    .unwrap();

    let f = ui.features();
    assert!(!f.menu && !f.carousel);
    assert!(f.service_table && f.testimonials);
    assert!(!ui.is_resize_pending());

    ui.on_menu_toggle_click();
    ui.on_keydown("Escape");
    ui.on_resize();
    assert_eq!(ui.menu_state(), None);
    assert!(factory.log().borrow().mounts.is_empty());

    ui.on_service_toggle_click();
    assert_eq!(page.attribute(&trigger, "aria-expanded").as_deref(), Some("true"));
    assert_eq!(ui.on_load_more_click(), 1);
    assert_eq!(page.children(&visible).len(), 1);
}

#[test]
fn missing_carousel_library_disables_carousel() {
    let (page, _n) = site(600);
    let ui: Recorded = UiController::new(
        page,
        Rc::new(RecordingAnimation::new()),
        None,
        Config::default(),
    )
    .unwrap();
    assert!(!ui.features().carousel);
    assert!(ui.features().menu);
}

#[test]
fn invalid_config_fails_construction() {
    let (page, _n) = site(600);
    let mut cfg = Config::default();
    cfg.menu.slide_duration = f32::NAN;
    let err = UiController::new(
        page,
        Rc::new(RecordingAnimation::new()),
        Some(FakeCarouselFactory::new()),
        cfg,
    )
    .err()
    .unwrap();
    assert!(matches!(err, UiError::InvalidConfig { .. }));
}

#[test]
fn destroy_tears_down_and_ignores_later_events() {
    let (page, _n, anim, factory, ui) = controller_at(600);
    ui.destroy();
    ui.destroy();
    assert!(ui.is_destroyed());
    assert_eq!(factory.log().borrow().destroys, 1);
    assert_eq!(page.pending_timers(), 0);

    anim.clear_calls();
    ui.on_menu_toggle_click();
    ui.on_resize();
    page.advance_ms(500);
    assert!(anim.calls().is_empty());
    assert_eq!(factory.log().borrow().mounts.len(), 1);
    assert_eq!(ui.on_load_more_click(), 0);
}

#[test]
fn end_to_end_with_builtin_tweener() {
    let (page, n) = site(600);
    let tweener = Rc::new(Tweener::new(Rc::clone(&page)));
    let ui = UiController::new(
        Rc::clone(&page),
        Rc::clone(&tweener),
        Some(FakeCarouselFactory::new()),
        Config::default(),
    )
    .unwrap();
    page.advance_ms(150);
    assert_eq!(page.style(&n.nav, "transform").as_deref(), Some("translateX(100%)"));

    ui.toggle_menu();
    tweener.update(0.15);
    assert!(page.has_class(&n.overlay, "show"));
    assert_eq!(ui.menu_state().unwrap().phase(), MenuPhase::Opening);
    tweener.update(0.15);
    assert_eq!(ui.menu_state().unwrap().phase(), MenuPhase::Open);
    assert_eq!(page.style(&n.nav, "transform").as_deref(), Some("translateX(0%)"));

    // Rotate to desktop mid-close: the reset wins over the in-flight slide.
    ui.toggle_menu();
    tweener.update(0.1);
    page.set_viewport_width(1440);
    ui.on_resize();
    page.advance_ms(150);
    assert_eq!(tweener.active_count(), 0);
    let s = ui.menu_state().unwrap();
    assert!(s.is_desktop && !s.is_open && !s.is_animating);
    assert_eq!(page.style(&n.nav, "transform"), None);
    assert_eq!(page.style(&n.nav, "visibility").as_deref(), Some("visible"));
}

#[test]
fn header_resolves_without_feature_wiring() {
    let (page, nodes) = site(800);
    let cfg = Config::default();
    let refs = site_ui_core::ElementRefs::resolve(page.as_ref(), &cfg.selectors);
    assert_eq!(refs.header, Some(nodes.header));

    page.remove(&nodes.header);
    let refs = site_ui_core::ElementRefs::resolve(page.as_ref(), &cfg.selectors);
    assert_eq!(refs.header, None);
    let ui = UiController::new(
        Rc::clone(&page),
        Rc::new(RecordingAnimation::new()),
        Some(FakeCarouselFactory::new()),
        cfg,
    )
    .unwrap();
    assert!(ui.features().service_table);
}
