use std::rc::Rc;

use site_ui_core::{Config, Disclosure, ElementRefs, KeyOutcome, Page, UiError};
use site_ui_test_fixtures::{site, FakePage};

fn disclosure() -> (Rc<FakePage>, site_ui_test_fixtures::SiteNodes, Disclosure<FakePage>) {
    let (page, nodes) = site(800);
    let cfg = Config::default();
    let refs = ElementRefs::resolve(page.as_ref(), &cfg.selectors);
    let d = Disclosure::new(Rc::clone(&page), &refs, &cfg.selectors).unwrap();
    (page, nodes, d)
}

#[test]
fn click_flips_attribute_and_table_visibility() {
    let (page, n, d) = disclosure();
    assert!(!d.is_expanded());
    assert!(page.is_hidden(&n.service_table));

    assert!(d.toggle());
    assert_eq!(page.attribute(&n.service_toggle, "aria-expanded").as_deref(), Some("true"));
    assert!(!page.is_hidden(&n.service_table));

    assert!(!d.toggle());
    assert_eq!(page.attribute(&n.service_toggle, "aria-expanded").as_deref(), Some("false"));
    assert!(page.is_hidden(&n.service_table));
}

#[test]
fn missing_attribute_counts_as_collapsed() {
    let page = Rc::new(FakePage::new(800));
    let trigger = page.add(page.body_node(), "button#service-table-toggle");
    let table = page.add(page.body_node(), "table.service-table");
    let cfg = Config::default();
    let refs = ElementRefs::resolve(page.as_ref(), &cfg.selectors);
    let d = Disclosure::new(Rc::clone(&page), &refs, &cfg.selectors).unwrap();

    assert!(d.toggle());
    assert_eq!(page.attribute(&trigger, "aria-expanded").as_deref(), Some("true"));
    assert!(!page.is_hidden(&table));
}

#[test]
fn enter_and_space_activate_and_suppress_default() {
    let (page, n, d) = disclosure();

    let out = d.handle_keydown("Enter");
    assert_eq!(out, KeyOutcome::Handled { prevent_default: true });
    assert!(d.is_expanded());

    let out = d.handle_keydown(" ");
    assert!(out.prevents_default());
    assert!(!d.is_expanded());
    assert!(page.is_hidden(&n.service_table));
}

#[test]
fn other_keys_are_ignored() {
    let (_page, _n, d) = disclosure();
    for key in ["Tab", "a", "Escape", "Spacebar"] {
        assert_eq!(d.handle_keydown(key), KeyOutcome::Ignored);
    }
    assert!(!d.is_expanded());
}

#[test]
fn requires_both_trigger_and_table() {
    let page = Rc::new(FakePage::new(800));
    page.add(page.body_node(), "button#service-table-toggle");
    let cfg = Config::default();
    let refs = ElementRefs::resolve(page.as_ref(), &cfg.selectors);
    let err = Disclosure::new(page, &refs, &cfg.selectors).err().unwrap();
    assert_eq!(err, UiError::missing("service-table", ".service-table"));
}
