//! End-to-end behaviour of the coordinator through the method-call protocol.

use std::sync::mpsc::Receiver;

use dcmaui_native::{
    BridgeConfig, BridgeError, BridgeResult, Coordinator, EventChannel, MethodCall, OutboundEvent,
    Props,
};
use serde_json::{Value, json};
use taffy::Dimension;

fn setup() -> (Coordinator, Receiver<OutboundEvent>) {
    let (events, rx) = EventChannel::new();
    (Coordinator::new(BridgeConfig::default(), events), rx)
}

fn call(coordinator: &mut Coordinator, method: &str, args: Value) -> BridgeResult<Value> {
    coordinator.handle(MethodCall::new(method, args))
}

fn create(coordinator: &mut Coordinator, id: &str, view_type: &str, props: Value) -> BridgeResult<Value> {
    call(
        coordinator,
        "createView",
        json!({ "viewId": id, "viewType": view_type, "props": props }),
    )
}

#[test]
fn registry_size_matches_successful_creates() {
    let (mut coordinator, _rx) = setup();
    let attempts = [
        ("a", "View", true),
        ("b", "Text", true),
        ("a", "View", false),
        ("c", "NoSuchType", false),
        ("d", "Button", true),
    ];

    for (id, view_type, ok) in attempts {
        assert_eq!(create(&mut coordinator, id, view_type, json!({})).is_ok(), ok, "{id}");
    }
    assert_eq!(coordinator.views().len(), 3);
}

#[test]
fn unknown_type_leaves_registry_unchanged() {
    let (mut coordinator, _rx) = setup();
    let err = create(&mut coordinator, "x", "Hologram", json!({})).unwrap_err();

    assert_eq!(err.code(), "VIEW_CREATION_FAILED");
    assert!(coordinator.views().is_empty());
    assert_eq!(err.to_wire()["code"], json!("VIEW_CREATION_FAILED"));
}

#[test]
fn delete_cascades_to_descendants() {
    let (mut coordinator, _rx) = setup();
    for id in ["p", "c1", "c2", "g"] {
        create(&mut coordinator, id, "View", json!({})).unwrap();
    }
    call(&mut coordinator, "setChildren", json!({ "parentId": "p", "childIds": ["c1", "c2"] })).unwrap();
    call(&mut coordinator, "attachView", json!({ "parentId": "c1", "childId": "g" })).unwrap();

    call(&mut coordinator, "deleteView", json!({ "viewId": "p" })).unwrap();

    assert!(coordinator.views().is_empty());
    for id in ["p", "c1", "c2", "g"] {
        let err = call(&mut coordinator, "getViewInfo", json!({ "viewId": id })).unwrap_err();
        assert_eq!(err, BridgeError::ViewNotFound(id.into()));
    }
}

#[test]
fn set_children_reorders_and_keeps_detached_views() {
    let (mut coordinator, _rx) = setup();
    for id in ["p", "a", "b", "c"] {
        create(&mut coordinator, id, "View", json!({})).unwrap();
    }

    call(&mut coordinator, "setChildren", json!({ "parentId": "p", "childIds": ["a", "b", "c"] })).unwrap();
    call(&mut coordinator, "setChildren", json!({ "parentId": "p", "childIds": ["c", "a"] })).unwrap();

    let views = coordinator.views();
    assert_eq!(views.children("p"), &["c".to_string(), "a".to_string()]);
    assert_eq!(views.get("p").unwrap().view.subviews(), &["c".to_string(), "a".to_string()]);
    assert!(views.contains("b"));
    assert_eq!(views.parent("b"), None);
    assert_eq!(views.get("b").unwrap().view.superview(), None);

    call(&mut coordinator, "setChildren", json!({ "parentId": "p", "childIds": ["a", "b", "c"] })).unwrap();

    let views = coordinator.views();
    let expected = ["a".to_string(), "b".to_string(), "c".to_string()];
    assert_eq!(views.children("p"), &expected);
    assert_eq!(views.get("p").unwrap().view.subviews(), &expected);
    assert_eq!(views.parent("b"), Some("p"));
}

#[test]
fn attach_twice_keeps_one_child() {
    let (mut coordinator, _rx) = setup();
    create(&mut coordinator, "p", "View", json!({})).unwrap();
    create(&mut coordinator, "c", "View", json!({})).unwrap();

    for _ in 0..2 {
        call(&mut coordinator, "attachView", json!({ "parentId": "p", "childId": "c" })).unwrap();
    }

    let views = coordinator.views();
    assert_eq!(views.children("p"), &["c".to_string()]);
    assert_eq!(views.get("p").unwrap().view.subviews(), &["c".to_string()]);
}

#[test]
fn height_update_keeps_width() {
    let (mut coordinator, _rx) = setup();
    create(
        &mut coordinator,
        "v",
        "View",
        json!({ "width": { "value": 50, "unit": "percent" } }),
    )
    .unwrap();
    call(
        &mut coordinator,
        "updateView",
        json!({ "viewId": "v", "props": { "height": { "value": 10, "unit": "point" } } }),
    )
    .unwrap();

    let style = coordinator.views().get("v").unwrap().view.style().clone();
    assert_eq!(style.size.width, Dimension::Percent(0.5));
    assert_eq!(style.size.height, Dimension::Length(10.0));
}

#[test]
fn simulate_event_emits_exactly_once() {
    let (mut coordinator, rx) = setup();
    create(&mut coordinator, "btn1", "Button", json!({ "title": "OK" })).unwrap();

    call(
        &mut coordinator,
        "simulateEvent",
        json!({ "viewId": "btn1", "eventName": "press", "params": {} }),
    )
    .unwrap();

    let events: Vec<OutboundEvent> = rx.try_iter().collect();
    assert_eq!(events, vec![OutboundEvent::new("btn1", "press", Props::new())]);
}

#[test]
fn bound_listener_forwards_native_press() {
    let (mut coordinator, rx) = setup();
    create(
        &mut coordinator,
        "btn",
        "Button",
        json!({ "title": "Go", "_eventListeners": ["press"] }),
    )
    .unwrap();

    assert!(coordinator.fire_native("btn", "press", &Props::new()));
    assert!(!coordinator.fire_native("btn", "longPress", &Props::new()));

    let event = rx.try_recv().unwrap();
    assert_eq!((event.view_id.as_str(), event.event_name.as_str()), ("btn", "press"));
    assert!(rx.try_recv().is_err());
}

#[test]
fn layout_runs_under_root_container() {
    let (mut coordinator, _rx) = setup();
    coordinator.host_ready();
    call(&mut coordinator, "initialize", Value::Null).unwrap();
    create(&mut coordinator, "view_0", "View", json!({ "flexDirection": "row" })).unwrap();
    create(&mut coordinator, "left", "View", json!({ "flex": 1 })).unwrap();
    create(&mut coordinator, "right", "View", json!({ "width": 90 })).unwrap();
    call(
        &mut coordinator,
        "setChildren",
        json!({ "parentId": "view_0", "childIds": ["left", "right"] }),
    )
    .unwrap();

    let views = coordinator.views();
    let left = views.get("left").unwrap().view.frame().unwrap();
    let right = views.get("right").unwrap().view.frame().unwrap();
    assert_eq!(left.x, 0.0);
    assert_eq!(left.width, 300.0);
    assert_eq!(right.x, 300.0);
    assert_eq!(right.width, 90.0);
}

#[test]
fn malformed_calls_change_nothing() {
    let (mut coordinator, _rx) = setup();
    let revision = coordinator.revision();

    let bad = [
        ("createView", json!({ "viewType": "View", "props": {} })),
        ("createView", json!({ "viewId": "a", "viewType": "View" })),
        ("attachView", json!({ "parentId": "a" })),
        ("setChildren", json!({ "parentId": "a", "childIds": "b" })),
        ("simulateEvent", json!({ "viewId": "a", "eventName": "x", "params": 3 })),
    ];
    for (method, args) in bad {
        let err = call(&mut coordinator, method, args).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENTS", "{method}");
    }

    let err = call(&mut coordinator, "teleportView", json!({})).unwrap_err();
    assert_eq!(err.code(), "NOT_IMPLEMENTED");

    assert!(coordinator.views().is_empty());
    assert_eq!(revision.get(), 0);
}
