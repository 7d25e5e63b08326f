use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use site_ui_core::debounce;
use site_ui_test_fixtures::FakePage;

fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |v| sink.borrow_mut().push(v))
}

#[test]
fn burst_runs_once_with_last_arguments() {
    let page = Rc::new(FakePage::new(800));
    let (log, f) = recorder();
    let d = debounce(Rc::clone(&page), Duration::from_millis(150), f);

    for i in 0..5 {
        d.call(i);
        page.advance_ms(100);
    }
    assert!(log.borrow().is_empty(), "quiet period never elapsed");
    assert!(d.is_pending());

    page.advance_ms(50);
    assert_eq!(*log.borrow(), vec![4]);
    assert!(!d.is_pending());
}

#[test]
fn separate_bursts_each_fire() {
    let page = Rc::new(FakePage::new(800));
    let (log, f) = recorder();
    let d = debounce(Rc::clone(&page), Duration::from_millis(150), f);

    d.call(1);
    page.advance_ms(200);
    d.call(2);
    page.advance_ms(149);
    assert_eq!(*log.borrow(), vec![1]);
    page.advance_ms(1);
    assert_eq!(*log.borrow(), vec![1, 2]);
}

#[test]
fn reschedule_keeps_a_single_timer() {
    let page = Rc::new(FakePage::new(800));
    let (_log, f) = recorder();
    let d = debounce(Rc::clone(&page), Duration::from_millis(150), f);

    d.call(1);
    d.call(2);
    d.call(3);
    assert_eq!(page.pending_timers(), 1);
}

#[test]
fn cancel_drops_pending_call() {
    let page = Rc::new(FakePage::new(800));
    let (log, f) = recorder();
    let d = debounce(Rc::clone(&page), Duration::from_millis(150), f);

    d.call(7);
    d.cancel();
    assert!(!d.is_pending());
    page.advance_ms(500);
    assert!(log.borrow().is_empty());
    assert_eq!(d.delay(), Duration::from_millis(150));
}
