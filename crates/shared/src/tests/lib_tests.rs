use serde_json::json;

use crate::{
    domain::{Point, PointerType, TargetId, Vocabulary},
    error::FakeTouchError,
    protocol::{
        Coordinates, EventDescriptor, EventPayload, LegacyPointerTypes, MousePayload,
        PointerPayload, TouchPayload, TouchPoint,
    },
};

#[test]
fn truncates_toward_zero() {
    assert_eq!(Point::new(100.7, 50.2).truncated(), (100, 50));
    assert_eq!(Point::new(-3.9, -0.5).truncated(), (-3, 0));
}

#[test]
fn mouse_like_vocabularies_are_single_contact() {
    let single: Vec<_> = Vocabulary::ALL
        .into_iter()
        .filter(|vocabulary| !vocabulary.is_multitouch())
        .collect();
    assert_eq!(
        single,
        vec![
            Vocabulary::PointerMouse,
            Vocabulary::PointerPen,
            Vocabulary::Mouse
        ]
    );
}

#[test]
fn vocabulary_parses_names_and_legacy_codes() {
    assert_eq!("touch-and-mouse".parse::<Vocabulary>(), Ok(Vocabulary::TouchAndMouse));
    assert_eq!("POINTER_PEN".parse::<Vocabulary>(), Ok(Vocabulary::PointerPen));
    assert_eq!("250".parse::<Vocabulary>(), Ok(Vocabulary::PointerPen));
    assert_eq!(Vocabulary::from_code(400), Some(Vocabulary::Mouse));
    assert_eq!(
        "keyboard".parse::<Vocabulary>(),
        Err(FakeTouchError::UnknownVocabulary("keyboard".into()))
    );
}

#[test]
fn pointer_type_round_trips_through_str() {
    for pointer_type in [PointerType::Mouse, PointerType::Touch, PointerType::Pen] {
        assert_eq!(pointer_type.as_str().parse::<PointerType>(), Ok(pointer_type));
    }
    assert!("stylus".parse::<PointerType>().is_err());
}

#[test]
fn touch_descriptor_uses_dom_field_names() {
    let point = TouchPoint {
        identifier: 0,
        position: Coordinates::at(10, 20),
        target: TargetId::new("canvas"),
    };
    let event = EventDescriptor::new(
        "touchstart",
        EventPayload::Touch(TouchPayload {
            touches: vec![point.clone()],
            changed_touches: vec![point],
        }),
    );

    let value = serde_json::to_value(&event).expect("serialize");
    assert_eq!(value["type"], "touchstart");
    assert_eq!(value["bubbles"], true);
    assert_eq!(value["cancelable"], true);
    assert_eq!(
        value["changedTouches"][0],
        json!({
            "identifier": 0,
            "pageX": 10,
            "pageY": 20,
            "clientX": 10,
            "clientY": 20,
            "target": "canvas"
        })
    );
}

#[test]
fn name_only_mouse_event_has_no_position_fields() {
    let event = EventDescriptor::new(
        "mouseup",
        EventPayload::Mouse(MousePayload {
            position: None,
            button: None,
        }),
    );
    let value = serde_json::to_value(&event).expect("serialize");
    assert_eq!(
        value,
        json!({ "type": "mouseup", "bubbles": true, "cancelable": true })
    );
}

#[test]
fn pointer_descriptor_carries_legacy_type_constants() {
    let event = EventDescriptor::new(
        "MSPointerDown",
        EventPayload::Pointer(PointerPayload {
            pointer_id: 1,
            pointer_type: PointerType::Pen,
            position: Coordinates::at(5, 6),
            buttons: 1,
            legacy_types: LegacyPointerTypes::default(),
        }),
    );
    let value = serde_json::to_value(&event).expect("serialize");
    assert_eq!(value["pointerId"], 1);
    assert_eq!(value["pointerType"], "pen");
    assert_eq!(value["MSPOINTER_TYPE_TOUCH"], "touch");
    assert_eq!(value["buttons"], 1);
    assert!(event.pointer().is_some());
    assert!(event.touch().is_none());
}
