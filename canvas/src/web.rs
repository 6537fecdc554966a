//! JavaScript-facing surface, built only for `wasm32`.
//!
//! The host page creates one [`SketchBoard`] per `<canvas>`, forwards DOM
//! pointer and wheel events to it, and registers callbacks for the two things
//! the engine can't do itself: showing the text overlay and syncing the
//! toolbar after the engine changes tools.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::config::CanvasConfig;
use crate::engine::{Action, Engine};
use crate::input::{Button, Modifiers, Tool, WheelDelta};
use crate::persist::{LocalStorage, MemoryStorage, Storage};
use crate::transform::Point;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn init_logging(level: log::Level) {
    if console_log::init_with_level(level).is_err() {
        // Another board already installed the logger; just adopt the level.
        log::set_max_level(level.to_level_filter());
    }
}

#[wasm_bindgen]
pub struct SketchBoard {
    engine: Engine,
    on_text_entry: Option<js_sys::Function>,
    on_tool_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl SketchBoard {
    /// Bind a board to `canvas`. `config_json` is an optional JSON config document.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<SketchBoard, JsValue> {
        let config = match config_json.as_deref() {
            Some(raw) => CanvasConfig::from_json(raw).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => CanvasConfig::default(),
        };
        init_logging(config.log_level());

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                log::warn!("{err}; board will not persist");
                Box::new(MemoryStorage::new())
            }
        };
        let seed = js_sys::Date::now() as u64;
        let engine = Engine::new(canvas, storage, config, seed)?;
        Ok(Self { engine, on_text_entry: None, on_tool_change: None })
    }

    /// Register `callback(x, y)`, called when the text overlay should open at
    /// screen position `(x, y)`.
    pub fn on_text_entry(&mut self, callback: js_sys::Function) {
        self.on_text_entry = Some(callback);
    }

    /// Register `callback(toolName)`, called when the engine switches tools.
    pub fn on_tool_change(&mut self, callback: js_sys::Function) {
        self.on_tool_change = Some(callback);
    }

    pub fn pointer_down(&mut self, event: &MouseEvent) {
        let actions = self.engine.on_pointer_down(event_point(event), Button::from_dom(event.button()), modifiers(event));
        self.forward(actions);
    }

    pub fn pointer_move(&mut self, event: &MouseEvent) {
        let actions = self.engine.on_pointer_move(event_point(event), modifiers(event));
        self.forward(actions);
    }

    pub fn pointer_up(&mut self, event: &MouseEvent) {
        let actions = self.engine.on_pointer_up(event_point(event), Button::from_dom(event.button()), modifiers(event));
        self.forward(actions);
    }

    pub fn wheel(&mut self, event: &WheelEvent) {
        event.prevent_default();
        let delta = WheelDelta { dx: event.delta_x(), dy: event.delta_y() };
        let actions = self.engine.on_wheel(event_point(event), delta, modifiers(event));
        self.forward(actions);
    }

    /// Switch tools by toolbar name.
    ///
    /// # Errors
    ///
    /// Fails for names that aren't a known tool.
    pub fn set_tool(&mut self, name: &str) -> Result<(), JsValue> {
        let tool = name.parse::<Tool>().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let actions = self.engine.set_tool(tool);
        self.forward(actions);
        Ok(())
    }

    #[must_use]
    pub fn tool(&self) -> String {
        self.engine.core.tool().as_str().to_string()
    }

    #[must_use]
    pub fn mode(&self) -> String {
        self.engine.core.mode().as_str().to_string()
    }

    /// Call from the text overlay's blur handler with its current value.
    pub fn commit_text(&mut self, text: &str) {
        let actions = self.engine.commit_text(text);
        self.forward(actions);
    }

    pub fn clear(&mut self) {
        let actions = self.engine.clear();
        self.forward(actions);
    }

    pub fn set_selected_color(&mut self, color: &str) {
        let actions = self.engine.set_selected_color(color);
        self.forward(actions);
    }

    pub fn set_selected_stroke_width(&mut self, width: f64) {
        let actions = self.engine.set_selected_stroke_width(width);
        self.forward(actions);
    }

    /// Whether something is selected, for showing the properties panel.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.engine.core.selection().is_some()
    }

    pub fn resize(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        let actions = self.engine.set_viewport(width_css, height_css, dpr);
        self.forward(actions);
    }

    pub fn render(&self) {
        self.engine.render();
    }
}

impl SketchBoard {
    fn forward(&self, actions: Vec<Action>) {
        for action in actions {
            let result = match action {
                Action::BeginTextEntry { screen } => match &self.on_text_entry {
                    Some(cb) => cb.call2(&JsValue::NULL, &screen.x.into(), &screen.y.into()),
                    None => continue,
                },
                Action::ToolChanged(tool) => match &self.on_tool_change {
                    Some(cb) => cb.call1(&JsValue::NULL, &tool.as_str().into()),
                    None => continue,
                },
                _ => continue,
            };
            if let Err(err) = result {
                log::error!("host callback failed: {err:?}");
            }
        }
    }
}

fn event_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}
