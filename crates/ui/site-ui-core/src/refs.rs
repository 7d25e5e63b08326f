//! Element references resolved once at startup.

use crate::config::Selectors;
use crate::page::Page;

/// Logical name -> node handle. `None` means the selector matched nothing.
#[derive(Debug)]
pub struct ElementRefs<N> {
    pub menu_toggle: Option<N>,
    pub nav: Option<N>,
    pub overlay: Option<N>,
    /// Resolved with the rest of the page contract; no feature reads it.
    pub header: Option<N>,
    pub body: Option<N>,
    pub service_toggle: Option<N>,
    pub service_table: Option<N>,
    pub carousel: Option<N>,
    pub load_more: Option<N>,
    pub testimonials: Option<N>,
    pub testimonials_visible: Option<N>,
    pub testimonials_hidden: Option<N>,
}

impl<N: Clone + PartialEq + 'static> ElementRefs<N> {
    pub fn resolve<P: Page<Node = N>>(page: &P, sel: &Selectors) -> Self {
        let testimonials = page.query(&sel.testimonials);
        let within = |selector: &str| {
            testimonials
                .as_ref()
                .and_then(|scope| page.query_within(scope, selector))
        };
        let testimonials_visible = within(&sel.testimonials_visible);
        let testimonials_hidden = within(&sel.testimonials_hidden);
        Self {
            menu_toggle: page.query(&sel.menu_toggle),
            nav: page.query(&sel.nav),
            overlay: page.query(&sel.overlay),
            header: page.query(&sel.header),
            body: page.body(),
            service_toggle: page.query(&sel.service_toggle),
            service_table: page.query(&sel.service_table),
            carousel: page.query(&sel.carousel),
            load_more: page.query(&sel.load_more),
            testimonials,
            testimonials_visible,
            testimonials_hidden,
        }
    }
}
