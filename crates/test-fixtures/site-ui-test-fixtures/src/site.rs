use std::rc::Rc;

use site_ui_core::Page;

use crate::page::{FakePage, NodeId};

/// Handles into the page built by [`site`].
#[derive(Clone, Debug)]
pub struct SiteNodes {
    pub header: NodeId,
    pub toggle: NodeId,
    pub toggle_icon: NodeId,
    pub nav: NodeId,
    pub nav_link: NodeId,
    pub overlay: NodeId,
    pub main: NodeId,
    pub service_toggle: NodeId,
    pub service_table: NodeId,
    pub glide: NodeId,
    pub testimonials: NodeId,
    pub visible: NodeId,
    pub hidden: NodeId,
    pub visible_cards: Vec<NodeId>,
    pub hidden_cards: Vec<NodeId>,
    pub load_more: NodeId,
}

/// The marketing page with every feature's markup present, at the given
/// viewport width.
pub fn site(viewport_width: u32) -> (Rc<FakePage>, SiteNodes) {
    let page = FakePage::new(viewport_width);
    let body = page.body_node();

    let header = page.add(body, "header.header");
    let toggle = page.add(header, "button.header__toggle");
    page.set_attribute(&toggle, "aria-expanded", "false");
    let toggle_icon = page.add(toggle, "span.header__toggle-icon");
    let nav = page.add(header, "nav.header__nav");
    let nav_link = page.add(nav, "a.header__link");
    let overlay = page.add(body, "div.background");

    let main = page.add(body, "main");
    let service_toggle = page.add(main, "button#service-table-toggle");
    page.set_attribute(&service_toggle, "aria-expanded", "false");
    let service_table = page.add(main, "table.service-table");
    page.set_hidden(&service_table, true);

    let glide = page.add(main, "div.glide");

    let testimonials = page.add(main, "section.testimonials-container");
    let visible = page.add(testimonials, "div.testimonials-visible");
    let hidden = page.add(testimonials, "div.testimonials-hidden");
    let visible_cards = (0..2)
        .map(|_| page.add(visible, "article.testimonial"))
        .collect();
    let hidden_cards = (0..3)
        .map(|_| page.add(hidden, "article.testimonial"))
        .collect();
    let load_more = page.add(main, "button.load-more-testimonials");

    let nodes = SiteNodes {
        header,
        toggle,
        toggle_icon,
        nav,
        nav_link,
        overlay,
        main,
        service_toggle,
        service_table,
        glide,
        testimonials,
        visible,
        hidden,
        visible_cards,
        hidden_cards,
        load_more,
    };
    (Rc::new(page), nodes)
}
