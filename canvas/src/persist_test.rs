#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{ElementId, PencilElement, RectElement, TextElement};
use crate::transform::Point;

const KEY: &str = "canvas-elements";

fn sample() -> Vec<Element> {
    vec![
        Element::Rect(RectElement {
            id: ElementId(1),
            x: 100.0,
            y: 100.0,
            width: -50.0,
            height: 80.0,
            color: Some("blue".into()),
        }),
        Element::Pencil(PencilElement {
            id: ElementId(2),
            points: vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)],
            color: Some("black".into()),
            stroke_width: Some(3.0),
        }),
        Element::Text(TextElement {
            id: ElementId(3),
            x: 5.0,
            y: 6.0,
            text: "note".into(),
            color: Some("black".into()),
            font_size: None,
        }),
    ]
}

/// Storage whose writes always fail, like a full quota.
struct FullStorage;

impl Storage for FullStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Err(PersistError::Unavailable)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Backend("QuotaExceededError".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), PersistError> {
        Err(PersistError::Unavailable)
    }
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_get_set_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.load(KEY).unwrap(), None);
    storage.save(KEY, "[]").unwrap();
    assert_eq!(storage.load(KEY).unwrap().as_deref(), Some("[]"));
    storage.remove(KEY).unwrap();
    assert_eq!(storage.load(KEY).unwrap(), None);
}

#[test]
fn memory_storage_remove_absent_is_ok() {
    assert!(MemoryStorage::new().remove("nothing").is_ok());
}

// =============================================================
// load_elements / save_elements
// =============================================================

#[test]
fn save_then_load_preserves_order_and_fields() {
    let storage = MemoryStorage::new();
    save_elements(&storage, KEY, &sample()).unwrap();
    assert_eq!(load_elements(&storage, KEY), sample());
}

#[test]
fn absent_key_loads_empty() {
    assert!(load_elements(&MemoryStorage::new(), KEY).is_empty());
}

#[test]
fn non_json_loads_empty() {
    let storage = MemoryStorage::new();
    storage.save(KEY, "definitely not json {").unwrap();
    assert!(load_elements(&storage, KEY).is_empty());
}

#[test]
fn non_array_json_loads_empty() {
    assert!(decode_elements(r#"{"type":"rect"}"#).is_empty());
    assert!(decode_elements("null").is_empty());
    assert!(decode_elements("42").is_empty());
}

#[test]
fn malformed_records_are_skipped() {
    let raw = r#"[
        {"id":1,"type":"rect","x":0,"y":0,"width":5,"height":5},
        {"id":2,"type":"triangle"},
        {"id":3,"type":"text","x":1},
        "garbage",
        {"id":4,"type":"pencil","points":[{"x":1,"y":1}]}
    ]"#;
    let ids: Vec<u64> = decode_elements(raw).iter().map(|el| el.id().0).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn legacy_board_with_timestamp_ids_loads() {
    let raw = r#"[{"id":1718000000001,"type":"rect","x":10,"y":10,"width":40,"height":30,"color":"blue"},
                 {"id":1718000000002,"type":"text","x":3,"y":4,"text":"hi","color":"black"}]"#;
    let elements = decode_elements(raw);
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].id(), ElementId(1_718_000_000_001));
}

#[test]
fn duplicate_ids_keep_the_first_record() {
    let raw = r#"[{"id":7,"type":"rect","x":0,"y":0,"width":10,"height":10},
                 {"id":8,"type":"text","x":3,"y":4,"text":"hi"},
                 {"id":7,"type":"rect","x":50,"y":50,"width":10,"height":10}]"#;
    let elements = decode_elements(raw);
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[1].id(), ElementId(8));
    match &elements[0] {
        Element::Rect(r) => assert_eq!((r.id, r.x, r.y), (ElementId(7), 0.0, 0.0)),
        other => panic!("expected rect, got {other:?}"),
    }
}

#[test]
fn unreadable_backend_loads_empty() {
    assert!(load_elements(&FullStorage, KEY).is_empty());
}

#[test]
fn failed_save_reports_backend_error() {
    let err = save_elements(&FullStorage, KEY, &sample()).unwrap_err();
    assert!(matches!(err, PersistError::Backend(ref m) if m == "QuotaExceededError"));
}

#[test]
fn encode_empty_list() {
    assert_eq!(encode_elements(&[]).unwrap(), "[]");
}
