use std::cell::RefCell;

use site_ui_core::{AnimationEngine, Tween, TweenCallbacks, TweenProp};

use crate::page::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub enum AnimCall {
    Set(NodeId, Vec<TweenProp>),
    To(NodeId, Tween),
    ClearProps(NodeId),
    Kill(NodeId),
}

struct Pending {
    target: NodeId,
    callbacks: TweenCallbacks,
}

/// Records every engine call and holds tweens until the test decides to
/// start or finish them.
#[derive(Default)]
pub struct RecordingAnimation {
    calls: RefCell<Vec<AnimCall>>,
    pending: RefCell<Vec<Pending>>,
}

impl RecordingAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<AnimCall> {
        self.calls.borrow().clone()
    }

    pub fn tweens(&self) -> Vec<(NodeId, Tween)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                AnimCall::To(n, t) => Some((*n, t.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn in_flight(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fire `on_start` for every in-flight tween.
    pub fn start_all(&self) {
        let starts: Vec<_> = self
            .pending
            .borrow_mut()
            .iter_mut()
            .filter_map(|p| p.callbacks.on_start.take())
            .collect();
        for cb in starts {
            cb();
        }
    }

    /// Run every in-flight tween to the end (`on_start` first if it has not
    /// fired yet).
    pub fn finish_all(&self) {
        let done: Vec<Pending> = self.pending.borrow_mut().drain(..).collect();
        for mut p in done {
            if let Some(cb) = p.callbacks.on_start.take() {
                cb();
            }
            if let Some(cb) = p.callbacks.on_complete.take() {
                cb();
            }
        }
    }
}

impl AnimationEngine<NodeId> for RecordingAnimation {
    fn set(&self, target: &NodeId, props: &[TweenProp]) {
        self.calls
            .borrow_mut()
            .push(AnimCall::Set(*target, props.to_vec()));
    }

    fn to(&self, target: &NodeId, tween: Tween, callbacks: TweenCallbacks) {
        self.calls.borrow_mut().push(AnimCall::To(*target, tween));
        self.pending.borrow_mut().push(Pending {
            target: *target,
            callbacks,
        });
    }

    fn clear_props(&self, target: &NodeId) {
        self.calls.borrow_mut().push(AnimCall::ClearProps(*target));
    }

    fn kill(&self, target: &NodeId) {
        self.calls.borrow_mut().push(AnimCall::Kill(*target));
        let killed: Vec<Pending> = {
            let mut pending = self.pending.borrow_mut();
            let (killed, kept) = pending.drain(..).partition(|p| p.target == *target);
            *pending = kept;
            killed
        };
        drop(killed);
    }
}
