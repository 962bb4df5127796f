use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn emit_without_subscriber_is_dropped() {
    let port: Port<u32> = Port::new("storeModel");
    assert!(!port.is_subscribed());
    port.emit(&7).unwrap();
    assert_eq!(port.delivered(), 0);
}

#[test]
fn subscriber_sees_values_in_emit_order() {
    let port: Port<u32> = Port::new("storeModel");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    port.subscribe(move |v| {
        sink.borrow_mut().push(*v);
        Ok(())
    })
    .unwrap();

    for v in [3, 1, 2] {
        port.emit(&v).unwrap();
    }
    assert_eq!(*seen.borrow(), vec![3, 1, 2]);
    assert_eq!(port.delivered(), 3);
}

#[test]
fn second_subscriber_is_rejected() {
    let port: Port<u32> = Port::new("storeModel");
    port.subscribe(|_| Ok(())).unwrap();
    let err = port.subscribe(|_| Ok(())).unwrap_err();
    assert!(matches!(err, BridgeError::AlreadySubscribed));
}

#[test]
fn clones_share_the_listener() {
    let port: Port<u32> = Port::new("storeModel");
    let runtime_side = port.clone();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    port.subscribe(move |_| {
        *sink.borrow_mut() += 1;
        Ok(())
    })
    .unwrap();

    runtime_side.emit(&1).unwrap();
    assert_eq!(*count.borrow(), 1);
    assert!(runtime_side.is_subscribed());
    assert_eq!(runtime_side.name(), "storeModel");
}

#[test]
fn listener_error_is_returned_and_listener_stays() {
    let port: Port<u32> = Port::new("storeModel");
    port.subscribe(|v| if *v == 0 { Err(BridgeError::NotInitialized) } else { Ok(()) })
        .unwrap();

    assert!(matches!(port.emit(&0), Err(BridgeError::NotInitialized)));
    assert!(port.is_subscribed());
    port.emit(&1).unwrap();
    assert_eq!(port.delivered(), 2);
}

#[test]
fn nested_emit_fails_and_outer_emit_reports_it() {
    let port: Port<u32> = Port::new("storeModel");
    let inner = port.clone();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    port.subscribe(move |v| {
        sink.borrow_mut().push(*v);
        if *v == 1 {
            inner.emit(&99)?;
        }
        Ok(())
    })
    .unwrap();

    let err = port.emit(&1).unwrap_err();
    assert!(matches!(err, BridgeError::ReentrantEmit { ref port } if port == "storeModel"));
    port.emit(&2).unwrap();
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(port.delivered(), 2);
}

#[test]
fn nested_subscribe_is_rejected_and_listener_survives() {
    let port: Port<u32> = Port::new("storeModel");
    let inner = port.clone();
    let nested = Rc::new(RefCell::new(None));
    let nested_sink = Rc::clone(&nested);
    let calls = Rc::new(RefCell::new(0));
    let calls_sink = Rc::clone(&calls);
    port.subscribe(move |_| {
        *calls_sink.borrow_mut() += 1;
        if nested_sink.borrow().is_none() {
            let outcome = inner.subscribe(|_| Ok(()));
            *nested_sink.borrow_mut() = Some(outcome);
        }
        Ok(())
    })
    .unwrap();

    port.emit(&1).unwrap();
    assert!(matches!(*nested.borrow(), Some(Err(BridgeError::AlreadySubscribed))));
    port.emit(&2).unwrap();
    assert_eq!(*calls.borrow(), 2);
}
