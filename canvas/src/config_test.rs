#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_config_is_valid() {
    assert!(CanvasConfig::default().validate().is_ok());
}

#[test]
fn defaults_match_stock_whiteboard() {
    let c = CanvasConfig::default();
    assert_eq!(c.storage_key, "canvas-elements");
    assert_eq!(c.zoom_intensity, 0.1);
    assert!(!c.wheel_pans);
    assert!(c.random_rect_colors);
    assert!(!c.sketchy);
    assert_eq!(c.grid.spacing, 50.0);
    assert_eq!(c.grid.extent, 2000.0);
    assert_eq!(c.style.pencil_width, 3.0);
    assert_eq!(c.style.selection_color, "#0088ff");
}

#[test]
fn font_uses_family() {
    assert_eq!(StyleConfig::default().font(24.0), "24px sans-serif");
}

// =============================================================
// from_json
// =============================================================

#[test]
fn empty_object_yields_defaults() {
    assert_eq!(CanvasConfig::from_json("{}").unwrap(), CanvasConfig::default());
}

#[test]
fn partial_document_overrides_only_named_fields() {
    let c = CanvasConfig::from_json(r#"{"zoom_intensity":0.2,"grid":{"spacing":25},"style":{"rect_color":"red"}}"#)
        .unwrap();
    assert_eq!(c.zoom_intensity, 0.2);
    assert_eq!(c.grid.spacing, 25.0);
    assert_eq!(c.grid.extent, 2000.0);
    assert_eq!(c.style.rect_color, "red");
    assert_eq!(c.style.pencil_color, "black");
}

#[test]
fn malformed_json_is_parse_error() {
    let err = CanvasConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn wrong_type_is_parse_error() {
    let err = CanvasConfig::from_json(r#"{"wheel_pans":"yes"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// =============================================================
// validate
// =============================================================

fn invalid_field(json: &str) -> &'static str {
    match CanvasConfig::from_json(json) {
        Err(ConfigError::Invalid { field, .. }) => field,
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn rejects_non_positive_zoom_intensity() {
    assert_eq!(invalid_field(r#"{"zoom_intensity":0}"#), "zoom_intensity");
    assert_eq!(invalid_field(r#"{"zoom_intensity":-0.1}"#), "zoom_intensity");
}

#[test]
fn rejects_bad_scale_range() {
    assert_eq!(invalid_field(r#"{"min_scale":0}"#), "min_scale");
    assert_eq!(invalid_field(r#"{"min_scale":2,"max_scale":1}"#), "max_scale");
}

#[test]
fn rejects_zero_grid_spacing() {
    assert_eq!(invalid_field(r#"{"grid":{"spacing":0}}"#), "grid.spacing");
}

#[test]
fn rejects_grid_with_too_many_lines() {
    assert_eq!(invalid_field(r#"{"grid":{"spacing":1e-300,"extent":1e300}}"#), "grid.spacing");
    assert_eq!(invalid_field(r#"{"grid":{"spacing":0.001,"extent":2000}}"#), "grid.spacing");
}

#[test]
fn accepts_grid_at_line_cap() {
    let extent = (consts::MAX_GRID_LINES - 1) as f64 / 2.0;
    let json = format!(r#"{{"grid":{{"spacing":1,"extent":{extent}}}}}"#);
    assert!(CanvasConfig::from_json(&json).is_ok());
}

#[test]
fn rejects_blank_storage_key() {
    assert_eq!(invalid_field(r#"{"storage_key":"  "}"#), "storage_key");
}

#[test]
fn rejects_inverted_stroke_range() {
    assert_eq!(invalid_field(r#"{"style":{"min_stroke_width":30}}"#), "style.min_stroke_width");
}

#[test]
fn invalid_error_message_names_field() {
    let err = CanvasConfig::from_json(r#"{"grid":{"spacing":-1}}"#).unwrap_err();
    assert!(err.to_string().contains("grid.spacing"));
}

// =============================================================
// log_level
// =============================================================

#[test]
fn log_level_parses_known_names() {
    let c = CanvasConfig { log_level: "debug".into(), ..Default::default() };
    assert_eq!(c.log_level(), log::Level::Debug);
}

#[test]
fn log_level_falls_back_to_info() {
    let c = CanvasConfig { log_level: "chatty".into(), ..Default::default() };
    assert_eq!(c.log_level(), log::Level::Info);
}
