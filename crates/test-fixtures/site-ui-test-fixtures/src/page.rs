use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::Duration;

use site_ui_core::{Page, Scheduler};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimerId(pub u64);

#[derive(Debug, Default)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    hidden: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

struct Timer {
    id: TimerId,
    due_ms: u64,
    task: Box<dyn FnOnce()>,
}

/// A tiny DOM: elements with classes, attributes and inline styles, simple
/// selectors (`tag`, `.class`, `#id`, compounds such as `div.a.b`), a
/// settable viewport width and a manual clock for timers.
pub struct FakePage {
    elements: RefCell<Vec<Element>>,
    root: NodeId,
    body: NodeId,
    width: Cell<u32>,
    now_ms: Cell<u64>,
    next_timer: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
}

impl FakePage {
    pub fn new(viewport_width: u32) -> Self {
        let page = Self {
            elements: RefCell::new(Vec::new()),
            root: NodeId(0),
            body: NodeId(1),
            width: Cell::new(viewport_width),
            now_ms: Cell::new(0),
            next_timer: Cell::new(0),
            timers: RefCell::new(Vec::new()),
        };
        let root = page.create("html");
        let body = page.create("body");
        page.append(root, body);
        page
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body_node(&self) -> NodeId {
        self.body
    }

    /// Create a detached element from a compound selector (`button.a#b`).
    pub fn create(&self, markup: &str) -> NodeId {
        let (tag, id, classes) = parse_compound(markup);
        let mut elements = self.elements.borrow_mut();
        elements.push(Element {
            tag: tag.unwrap_or_else(|| "div".into()),
            id,
            classes,
            ..Element::default()
        });
        NodeId(elements.len() - 1)
    }

    pub fn append(&self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let mut elements = self.elements.borrow_mut();
        elements[child.0].parent = Some(parent);
        elements[parent.0].children.push(child);
    }

    /// Create `markup` and append it under `parent`.
    pub fn add(&self, parent: NodeId, markup: &str) -> NodeId {
        let node = self.create(markup);
        self.append(parent, node);
        node
    }

    fn detach(&self, node: NodeId) {
        let mut elements = self.elements.borrow_mut();
        if let Some(parent) = elements[node.0].parent.take() {
            elements[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let elements = self.elements.borrow();
        let mut cur = node;
        loop {
            if cur == self.root {
                return true;
            }
            match elements[cur.0].parent {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements.borrow()[node.0].parent
    }

    pub fn set_viewport_width(&self, px: u32) {
        self.width.set(px);
    }

    pub fn viewport_width(&self) -> u32 {
        self.width.get()
    }

    // ---- clock ----------------------------------------------------------

    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.get())
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Advance the clock, running due timers in order. Tasks may schedule
    /// further timers; those run too if they fall inside the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now_ms.get() + by.as_millis() as u64;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let idx = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.id.0))
                    .map(|(i, _)| i);
                idx.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => {
                    self.now_ms.set(timer.due_ms.max(self.now_ms.get()));
                    (timer.task)();
                }
                None => break,
            }
        }
        self.now_ms.set(target);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    // ---- selectors --------------------------------------------------------

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let (tag, id, classes) = parse_compound(selector);
        let elements = self.elements.borrow();
        let el = &elements[node.0];
        tag.map_or(true, |t| el.tag == t)
            && id.map_or(true, |i| el.id.as_deref() == Some(i.as_str()))
            && classes.iter().all(|c| el.classes.contains(c))
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = {
            let elements = self.elements.borrow();
            elements[scope.0].children.iter().rev().copied().collect()
        };
        while let Some(n) = stack.pop() {
            out.push(n);
            let elements = self.elements.borrow();
            stack.extend(elements[n.0].children.iter().rev().copied());
        }
        out
    }
}

fn parse_compound(markup: &str) -> (Option<String>, Option<String>, Vec<String>) {
    let mut tag = String::new();
    let mut id = None;
    let mut classes = Vec::new();
    let mut cur = String::new();
    let mut kind = 't';
    let mut flush = |kind: char, cur: &mut String| {
        if cur.is_empty() {
            return;
        }
        match kind {
            '.' => classes.push(std::mem::take(cur)),
            '#' => id = Some(std::mem::take(cur)),
            _ => tag = std::mem::take(cur),
        }
    };
    for ch in markup.trim().chars() {
        if ch == '.' || ch == '#' {
            flush(kind, &mut cur);
            kind = ch;
        } else {
            cur.push(ch);
        }
    }
    flush(kind, &mut cur);
    ((!tag.is_empty()).then_some(tag), id, classes)
}

impl Page for FakePage {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_within(&self.root, selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.descendants(*scope)
            .into_iter()
            .find(|n| self.matches(*n, selector))
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut elements = self.elements.borrow_mut();
        let classes = &mut elements[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.elements.borrow_mut()[node.0]
            .classes
            .retain(|c| c != class);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.elements.borrow()[node.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.elements.borrow()[node.0].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.elements.borrow_mut()[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.elements.borrow()[node.0].styles.get(property).cloned()
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.elements.borrow_mut()[node.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn remove_style(&self, node: &NodeId, property: &str) {
        self.elements.borrow_mut()[node.0].styles.remove(property);
    }

    fn is_hidden(&self, node: &NodeId) -> bool {
        self.elements.borrow()[node.0].hidden
    }

    fn set_hidden(&self, node: &NodeId, hidden: bool) {
        self.elements.borrow_mut()[node.0].hidden = hidden;
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let elements = self.elements.borrow();
        let mut cur = Some(*node);
        while let Some(n) = cur {
            if n == *ancestor {
                return true;
            }
            cur = elements[n.0].parent;
        }
        false
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.elements.borrow()[node.0].children.clone()
    }

    fn append_children(&self, parent: &NodeId, children: &[NodeId]) {
        for child in children {
            self.append(*parent, *child);
        }
    }

    fn remove(&self, node: &NodeId) {
        self.detach(*node);
    }

    fn matches_min_width(&self, px: u32) -> bool {
        self.width.get() >= px
    }
}

impl Scheduler for FakePage {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_timer.get());
        self.next_timer.set(id.0 + 1);
        self.timers.borrow_mut().push(Timer {
            id,
            due_ms: self.now_ms.get() + delay.as_millis() as u64,
            task,
        });
        id
    }

    fn cancel(&self, handle: TimerId) {
        self.timers.borrow_mut().retain(|t| t.id != handle);
    }
}
