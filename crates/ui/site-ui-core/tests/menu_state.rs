use std::rc::Rc;

use site_ui_core::{
    Config, ElementRefs, Ease, Menu, MenuPhase, Page, TweenProp, UiError, Visibility,
};
use site_ui_test_fixtures::{site, AnimCall, FakePage, RecordingAnimation, SiteNodes};

type TestMenu = Menu<FakePage, RecordingAnimation>;

fn menu_at(width: u32) -> (Rc<FakePage>, SiteNodes, Rc<RecordingAnimation>, TestMenu) {
    let (page, nodes) = site(width);
    let anim = Rc::new(RecordingAnimation::new());
    let cfg = Config::default();
    let refs = ElementRefs::resolve(page.as_ref(), &cfg.selectors);
    let menu = Menu::new(
        Rc::clone(&page),
        Rc::clone(&anim),
        &refs,
        &cfg.selectors,
        &cfg.classes,
        &cfg.menu,
    )
    .expect("menu markup present");
    (page, nodes, anim, menu)
}

fn parked() -> Vec<TweenProp> {
    vec![
        TweenProp::XPercent(100.0),
        TweenProp::Visibility(Visibility::Hidden),
    ]
}

#[test]
fn construction_parks_nav_off_screen() {
    let (_page, n, anim, menu) = menu_at(800);
    assert_eq!(anim.calls(), vec![AnimCall::Set(n.nav, parked())]);
    let s = menu.state();
    assert!(!s.is_desktop && !s.is_open && !s.is_animating);
    assert_eq!(menu.phase(), MenuPhase::Closed);
}

#[test]
fn open_reveals_before_sliding_and_applies_classes_on_start() {
    let (page, n, anim, menu) = menu_at(800);
    menu.toggle();

    assert_eq!(menu.phase(), MenuPhase::Opening);
    assert_eq!(page.style(&n.nav, "visibility").as_deref(), Some("visible"));
    assert_eq!(page.style(&n.overlay, "visibility").as_deref(), Some("visible"));
    assert_eq!(page.style(&n.nav, "will-change").as_deref(), Some("transform"));
    assert_eq!(page.attribute(&n.toggle, "aria-expanded").as_deref(), Some("false"));

    let tweens = anim.tweens();
    assert_eq!(tweens.len(), 1);
    let (target, tween) = &tweens[0];
    assert_eq!(*target, n.nav);
    assert_eq!(tween.props, vec![TweenProp::XPercent(0.0)]);
    assert_eq!(tween.duration, 0.3);
    assert_eq!(tween.ease, Ease::POWER2_OUT);

    anim.start_all();
    assert!(page.has_class(&n.toggle, "header__toggle--active"));
    assert!(page.has_class(&n.overlay, "show"));
    assert!(page.has_class(&page.body_node(), "overflow-hidden"));
    assert_eq!(page.attribute(&n.toggle, "aria-expanded").as_deref(), Some("true"));
    assert!(menu.state().is_animating);

    anim.finish_all();
    assert_eq!(menu.phase(), MenuPhase::Open);
}

#[test]
fn close_hides_panel_on_complete() {
    let (page, n, anim, menu) = menu_at(800);
    menu.open();
    anim.finish_all();
    menu.close();
    assert_eq!(menu.phase(), MenuPhase::Closing);

    let (_, tween) = anim.tweens().pop().unwrap();
    assert_eq!(tween.props, vec![TweenProp::XPercent(100.0)]);
    assert_eq!(tween.ease, Ease::POWER2_IN);

    anim.start_all();
    assert!(!page.has_class(&n.toggle, "header__toggle--active"));
    assert!(!page.has_class(&n.overlay, "show"));
    assert!(!page.has_class(&page.body_node(), "overflow-hidden"));
    assert_eq!(page.attribute(&n.toggle, "aria-expanded").as_deref(), Some("false"));
    // Still visible while sliding out.
    assert_eq!(page.style(&n.nav, "visibility").as_deref(), Some("visible"));

    anim.finish_all();
    assert_eq!(menu.phase(), MenuPhase::Closed);
    assert_eq!(page.style(&n.nav, "visibility").as_deref(), Some("hidden"));
    assert_eq!(page.style(&n.overlay, "visibility").as_deref(), Some("hidden"));
    assert_eq!(page.style(&n.nav, "will-change").as_deref(), Some("auto"));
}

#[test]
fn toggles_alternate_when_each_slide_finishes() {
    let (_page, _n, anim, menu) = menu_at(800);
    for i in 0..6 {
        menu.toggle();
        anim.finish_all();
        assert_eq!(menu.state().is_open, i % 2 == 0, "after toggle {i}");
    }
    assert_eq!(anim.tweens().len(), 6);
}

#[test]
fn toggle_while_animating_is_ignored() {
    let (_page, _n, anim, menu) = menu_at(800);
    menu.toggle();
    let before = menu.state();
    menu.toggle();
    menu.toggle();
    assert_eq!(menu.state(), before);
    assert_eq!(anim.tweens().len(), 1);

    anim.finish_all();
    menu.toggle();
    assert_eq!(menu.phase(), MenuPhase::Closing);
}

#[test]
fn open_when_open_and_close_when_closed_are_no_ops() {
    let (_page, _n, anim, menu) = menu_at(800);
    menu.close();
    assert_eq!(anim.tweens().len(), 0);

    menu.open();
    anim.finish_all();
    let before = menu.state();
    menu.open();
    assert_eq!(menu.state(), before);
    assert_eq!(anim.tweens().len(), 1);
}

#[test]
fn toggle_is_ignored_on_desktop() {
    let (_page, _n, anim, menu) = menu_at(1280);
    assert!(menu.state().is_desktop);
    menu.toggle();
    assert_eq!(menu.phase(), MenuPhase::Closed);
    assert!(anim.tweens().is_empty());
}

#[test]
fn initial_and_resize_breakpoints_differ() {
    // 1050 is desktop by the initial 1024 threshold but mobile by the 1110
    // threshold used on resize.
    let (_page, _n, anim, menu) = menu_at(1050);
    assert!(menu.state().is_desktop);
    menu.toggle();
    assert!(anim.tweens().is_empty());

    menu.handle_resize();
    assert!(!menu.state().is_desktop);
    menu.toggle();
    assert_eq!(menu.phase(), MenuPhase::Opening);
}

#[test]
fn resize_to_desktop_forces_reset_from_any_state() {
    let (page, n, anim, menu) = menu_at(800);
    menu.open();
    anim.start_all();
    assert_eq!(menu.phase(), MenuPhase::Opening);

    page.set_viewport_width(1400);
    anim.clear_calls();
    menu.handle_resize();

    let s = menu.state();
    assert!(s.is_desktop);
    assert!(!s.is_open);
    assert!(!s.is_animating);
    assert_eq!(anim.calls(), vec![AnimCall::Kill(n.nav), AnimCall::ClearProps(n.nav)]);
    assert_eq!(anim.in_flight(), 0);
    assert_eq!(page.style(&n.nav, "visibility").as_deref(), Some("visible"));
    assert!(!page.has_class(&n.overlay, "show"));
    assert!(!page.has_class(&n.toggle, "header__toggle--active"));
    assert!(!page.has_class(&page.body_node(), "overflow-hidden"));
    assert_eq!(page.attribute(&n.toggle, "aria-expanded").as_deref(), Some("false"));

    // The killed slide never completes, so the nav stays visible.
    anim.finish_all();
    assert_eq!(page.style(&n.nav, "visibility").as_deref(), Some("visible"));
}

#[test]
fn resize_to_desktop_mid_close_hides_overlay() {
    let (page, n, anim, menu) = menu_at(800);
    menu.open();
    anim.finish_all();
    menu.close();
    anim.start_all();
    assert_eq!(menu.phase(), MenuPhase::Closing);
    assert_eq!(page.style(&n.overlay, "visibility").as_deref(), Some("visible"));

    page.set_viewport_width(1400);
    menu.handle_resize();
    anim.finish_all();

    assert_eq!(menu.phase(), MenuPhase::Closed);
    assert_eq!(page.style(&n.overlay, "visibility").as_deref(), Some("hidden"));
    assert_eq!(page.style(&n.nav, "visibility").as_deref(), Some("visible"));
}

#[test]
fn resize_on_mobile_reparks_only_when_closed() {
    let (_page, n, anim, menu) = menu_at(800);
    anim.clear_calls();
    menu.handle_resize();
    assert_eq!(anim.calls(), vec![AnimCall::Set(n.nav, parked())]);

    menu.open();
    anim.finish_all();
    anim.clear_calls();
    menu.handle_resize();
    assert!(anim.calls().is_empty());
    assert!(menu.state().is_open);
}

#[test]
fn outside_click_closes_inside_click_does_not() {
    let (_page, n, anim, menu) = menu_at(800);
    menu.open();
    anim.finish_all();

    menu.handle_document_click(&n.nav_link);
    menu.handle_document_click(&n.nav);
    menu.handle_document_click(&n.toggle_icon);
    assert_eq!(menu.phase(), MenuPhase::Open);

    menu.handle_document_click(&n.main);
    assert_eq!(menu.phase(), MenuPhase::Closing);
}

#[test]
fn outside_click_while_closed_does_nothing() {
    let (_page, n, anim, menu) = menu_at(800);
    menu.handle_document_click(&n.main);
    assert!(anim.tweens().is_empty());
}

#[test]
fn overlay_click_closes() {
    let (_page, _n, anim, menu) = menu_at(800);
    menu.open();
    anim.finish_all();
    menu.handle_overlay_click();
    assert_eq!(menu.phase(), MenuPhase::Closing);
}

#[test]
fn escape_closes_only_when_open() {
    let (_page, _n, anim, menu) = menu_at(800);
    assert!(!menu.handle_keydown("Escape"));
    assert!(anim.tweens().is_empty());

    menu.open();
    anim.finish_all();
    assert!(!menu.handle_keydown("Enter"));
    assert!(menu.handle_keydown("Escape"));
    assert_eq!(menu.phase(), MenuPhase::Closing);
}

#[test]
fn missing_nav_disables_menu() {
    let page = Rc::new(FakePage::new(800));
    page.add(page.body_node(), "button.header__toggle");
    page.add(page.body_node(), "div.background");
    let anim = Rc::new(RecordingAnimation::new());
    let cfg = Config::default();
    let refs = ElementRefs::resolve(page.as_ref(), &cfg.selectors);

    let err = Menu::new(page, Rc::clone(&anim), &refs, &cfg.selectors, &cfg.classes, &cfg.menu)
        .err()
        .expect("nav is missing");
    assert_eq!(err, UiError::missing("menu", ".header__nav"));
    assert!(anim.calls().is_empty());
}
