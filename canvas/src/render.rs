//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the element store, the transform and the
//! config and produces pixels. It does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::CanvasConfig;
use crate::consts::SELECTION_DASH_PX;
use crate::element::{Element, PencilElement, RectElement, TextElement};
use crate::hit::{self, Bounds};
use crate::path::{self, PathCmd};
use crate::rough::RoughGenerator;
use crate::store::ElementStore;
use crate::transform::{Point, Transform};

/// Width of sketchy rectangle outlines in world units.
const ROUGH_STROKE_WIDTH: f64 = 1.5;

/// Draw the full scene: grid, elements and selection outline.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    store: &ElementStore,
    transform: &Transform,
    config: &CanvasConfig,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.save();
    ctx.translate(transform.offset.x, transform.offset.y)?;
    ctx.scale(transform.scale, transform.scale)?;

    // One screen pixel in world units, so chrome keeps its size at any zoom.
    let px = transform.screen_dist_to_world(1.0);

    // Layer 2: background grid.
    if config.grid.visible {
        draw_grid(ctx, config, px);
    }

    // Layer 3: elements in z-order (bottom first).
    for element in store.elements() {
        draw_element(ctx, element, config)?;
    }

    // Layer 4: selection outline.
    if let Some(element) = store.selected_element() {
        draw_selection(ctx, element, config, px)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, config: &CanvasConfig, px: f64) {
    ctx.begin_path();
    ctx.set_line_width(px);
    ctx.set_stroke_style_str(&config.grid.color);
    for line in path::grid_lines(config.grid.spacing, config.grid.extent) {
        ctx.move_to(line.from.x, line.from.y);
        ctx.line_to(line.to.x, line.to.y);
    }
    ctx.stroke();
}

// =============================================================
// Element dispatch
// =============================================================

fn draw_element(ctx: &CanvasRenderingContext2d, element: &Element, config: &CanvasConfig) -> Result<(), JsValue> {
    match element {
        Element::Rect(rect) => {
            draw_rect(ctx, rect, config);
            Ok(())
        }
        Element::Pencil(pencil) => draw_pencil(ctx, pencil, config),
        Element::Text(text) => draw_text(ctx, text, config),
    }
}

fn draw_rect(ctx: &CanvasRenderingContext2d, rect: &RectElement, config: &CanvasConfig) {
    let color = rect.color.as_deref().unwrap_or(&config.style.rect_color);
    ctx.set_fill_style_str(color);
    ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);

    if config.sketchy {
        let mut generator = RoughGenerator::for_element(rect.id);
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(ROUGH_STROKE_WIDTH);
        for line in generator.rough_rect(hit::rect_bounds(rect)) {
            stroke_polyline(ctx, &line);
        }
    }
}

fn stroke_polyline(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
}

fn draw_pencil(ctx: &CanvasRenderingContext2d, pencil: &PencilElement, config: &CanvasConfig) -> Result<(), JsValue> {
    let color = pencil.color.as_deref().unwrap_or(&config.style.pencil_color);
    let width = pencil.stroke_width.unwrap_or(config.style.pencil_width);

    ctx.set_stroke_style_str(color);
    ctx.set_fill_style_str(color);
    ctx.set_line_width(width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    let cmds = path::stroke_path(&pencil.points);
    if cmds.is_empty() {
        return Ok(());
    }

    ctx.begin_path();
    let mut stroked = false;
    for cmd in cmds {
        match cmd {
            PathCmd::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathCmd::LineTo(p) => {
                ctx.line_to(p.x, p.y);
                stroked = true;
            }
            PathCmd::QuadTo { ctrl, to } => {
                ctx.quadratic_curve_to(ctrl.x, ctrl.y, to.x, to.y);
                stroked = true;
            }
            PathCmd::Dot(p) => {
                ctx.arc(p.x, p.y, width / 2.0, 0.0, 2.0 * PI)?;
                ctx.fill();
            }
        }
    }
    if stroked {
        ctx.stroke();
    }
    Ok(())
}

fn draw_text(ctx: &CanvasRenderingContext2d, text: &TextElement, config: &CanvasConfig) -> Result<(), JsValue> {
    let size = text.font_size.unwrap_or(config.style.font_size);
    ctx.set_text_baseline("top");
    ctx.set_font(&config.style.font(size));
    ctx.set_fill_style_str(text.color.as_deref().unwrap_or(&config.style.text_color));
    ctx.fill_text(&text.text, text.x, text.y)
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(
    ctx: &CanvasRenderingContext2d,
    element: &Element,
    config: &CanvasConfig,
    px: f64,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(&config.style.selection_color);
    ctx.set_line_width(config.style.selection_width * px);

    match element {
        Element::Rect(rect) => ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height),
        Element::Pencil(pencil) => {
            let width = pencil.stroke_width.unwrap_or(config.style.pencil_width);
            if let Some(bounds) = hit::points_bounds(pencil) {
                stroke_dashed(ctx, bounds.inflate(width / 2.0), px)?;
            }
        }
        Element::Text(text) => {
            let size = text.font_size.unwrap_or(config.style.font_size);
            ctx.set_font(&config.style.font(size));
            let width = measured_text_width(ctx, &text.text);
            stroke_dashed(ctx, Bounds::from_signed(text.x, text.y, width, size), px)?;
        }
    }

    ctx.restore();
    Ok(())
}

fn stroke_dashed(ctx: &CanvasRenderingContext2d, bounds: Bounds, px: f64) -> Result<(), JsValue> {
    let dash = SELECTION_DASH_PX * px;
    ctx.set_line_dash(&js_sys::Array::of2(&dash.into(), &dash.into()))?;
    ctx.stroke_rect(bounds.min_x, bounds.min_y, bounds.width(), bounds.height());
    ctx.set_line_dash(&js_sys::Array::new())?;
    Ok(())
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => 0.0,
    }
}
