use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::CanvasConfig;
use crate::element::{Element, ElementId, ElementPatch, PencilElement, RectElement, TextElement};
use crate::hit;
use crate::input::{Button, InteractionState, Mode, Modifiers, Tool, UiState, WheelDelta};
use crate::persist::{self, Storage};
use crate::render;
use crate::store::ElementStore;
use crate::transform::{Point, Transform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The element list changed and should be persisted.
    ElementsChanged,
    /// The board was cleared; drop the persisted copy.
    ElementsCleared,
    /// The canvas cursor should change.
    SetCursor(String),
    /// Show the text overlay at this screen position.
    BeginTextEntry { screen: Point },
    /// The engine switched tools on its own; the toolbar should follow.
    ToolChanged(Tool),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub store: ElementStore,
    pub transform: Transform,
    pub ui: UiState,
    pub input: InteractionState,
    pub config: CanvasConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default(), 0)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with `config`. `seed` drives random rectangle colors.
    #[must_use]
    pub fn with_config(config: CanvasConfig, seed: u64) -> Self {
        Self {
            store: ElementStore::new(),
            transform: Transform::default(),
            ui: UiState::default(),
            input: InteractionState::default(),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // --- Data inputs ---

    /// Replace the board with persisted elements.
    pub fn load_elements(&mut self, elements: Vec<Element>) -> Vec<Action> {
        log::info!("loaded {} elements", elements.len());
        self.store.replace_all(elements);
        vec![Action::RenderNeeded]
    }

    /// Startup: load the saved board, then draw it and set the tool cursor.
    pub fn hydrate(&mut self, elements: Vec<Element>) -> Vec<Action> {
        let mut actions = self.load_elements(elements);
        actions.push(self.cursor_action());
        actions
    }

    /// Remove every element and the selection.
    ///
    /// A gesture in progress is abandoned, except text entry: the overlay is
    /// still open and its blur will commit onto the empty board.
    pub fn clear(&mut self) -> Vec<Action> {
        self.store.clear();
        if !self.input.is_writing() {
            self.transition(InteractionState::Idle);
        }
        vec![Action::ElementsCleared, Action::RenderNeeded, self.cursor_action()]
    }

    // --- Tool / style ---

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.ui.tool != tool {
            log::debug!("tool {} -> {tool}", self.ui.tool);
        }
        self.ui.tool = tool;
        vec![self.cursor_action()]
    }

    /// Recolor the selected element.
    pub fn set_selected_color(&mut self, color: &str) -> Vec<Action> {
        let Some(id) = self.store.selected() else {
            return Vec::new();
        };
        if !self.store.patch(id, &ElementPatch::color(color)) {
            return Vec::new();
        }
        vec![Action::ElementsChanged, Action::RenderNeeded]
    }

    /// Set the stroke width of the selected freehand stroke, clamped to the
    /// configured range. Other element types are left alone.
    pub fn set_selected_stroke_width(&mut self, width: f64) -> Vec<Action> {
        if !width.is_finite() {
            return Vec::new();
        }
        let Some(Element::Pencil(pencil)) = self.store.selected_element() else {
            return Vec::new();
        };
        let id = pencil.id;
        let style = &self.config.style;
        let width = width.clamp(style.min_stroke_width, style.max_stroke_width);
        self.store.patch(id, &ElementPatch::stroke_width(width));
        vec![Action::ElementsChanged, Action::RenderNeeded]
    }

    /// Finish text entry with the overlay's content.
    ///
    /// Blank input adds nothing. Either way the engine goes idle and returns
    /// to the selection tool.
    pub fn commit_text(&mut self, text: &str) -> Vec<Action> {
        let InteractionState::Writing { world, .. } = self.input else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if text.trim().is_empty() {
            log::debug!("discarding blank text entry");
        } else {
            let id = self.store.next_id();
            self.store.append(Element::Text(TextElement {
                id,
                x: world.x,
                y: world.y,
                text: text.to_string(),
                color: Some(self.config.style.text_color.clone()),
                font_size: Some(self.config.style.font_size),
            }));
            actions.push(Action::ElementsChanged);
        }

        self.transition(InteractionState::Idle);
        self.ui.tool = Tool::Selection;
        actions.push(Action::ToolChanged(Tool::Selection));
        actions.push(self.cursor_action());
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_writing() {
            return Vec::new();
        }
        match button {
            Button::Secondary => Vec::new(),
            Button::Middle => self.start_pan(screen),
            Button::Primary => match self.ui.tool {
                Tool::Hand => self.start_pan(screen),
                Tool::Rect => self.start_rect(screen),
                Tool::Pencil => self.start_stroke(screen),
                Tool::Text => self.start_text(screen),
                Tool::Selection => self.start_select(screen),
            },
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input.clone() {
            InteractionState::Panning { anchor } => {
                self.transform.pan_to(screen, anchor);
                vec![Action::RenderNeeded]
            }
            InteractionState::Drawing { id } => self.continue_drawing(id, self.transform.to_world(screen)),
            InteractionState::Moving { id, drag_offset } => {
                let origin = self.transform.to_world(screen).sub(drag_offset);
                if self.store.patch(id, &ElementPatch::position(origin)) {
                    vec![Action::ElementsChanged, Action::RenderNeeded]
                } else {
                    log::debug!("moved element {id} is gone; abandoning drag");
                    self.transition(InteractionState::Idle);
                    Vec::new()
                }
            }
            InteractionState::Idle | InteractionState::Writing { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, _screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match self.input {
            InteractionState::Writing { .. } | InteractionState::Idle => Vec::new(),
            InteractionState::Panning { .. } => {
                self.transition(InteractionState::Idle);
                vec![self.cursor_action()]
            }
            InteractionState::Drawing { .. } | InteractionState::Moving { .. } => {
                self.transition(InteractionState::Idle);
                Vec::new()
            }
        }
    }

    /// Zoom at the cursor, or pan when wheel panning is enabled and no pinch
    /// modifier is held.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.is_pinch() || !self.config.wheel_pans {
            return self.zoom(screen, delta.dy);
        }

        let (dx, dy) = if modifiers.shift && delta.dx == 0.0 { (delta.dy, 0.0) } else { (delta.dx, delta.dy) };
        if dx == 0.0 && dy == 0.0 {
            return Vec::new();
        }
        self.transform.pan_by(-dx, -dy);
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// CSS cursor for the current tool and gesture.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self.ui.tool {
            Tool::Text => "text",
            Tool::Hand if matches!(self.input, InteractionState::Panning { .. }) => "grabbing",
            Tool::Hand => "grab",
            Tool::Selection => "default",
            Tool::Rect | Tool::Pencil => "crosshair",
        }
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.input.mode()
    }

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.store.selected()
    }

    /// Screen position of the pending text overlay while writing.
    #[must_use]
    pub fn text_entry_position(&self) -> Option<Point> {
        match self.input {
            InteractionState::Writing { screen, .. } => Some(screen),
            _ => None,
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    // --- Gesture helpers ---

    fn start_pan(&mut self, screen: Point) -> Vec<Action> {
        self.transition(InteractionState::Panning { anchor: screen.sub(self.transform.offset) });
        vec![self.cursor_action()]
    }

    fn start_rect(&mut self, screen: Point) -> Vec<Action> {
        let world = self.transform.to_world(screen);
        let color = self.next_rect_color();
        let id = self.store.next_id();
        self.store.deselect();
        self.store.append(Element::Rect(RectElement {
            id,
            x: world.x,
            y: world.y,
            width: 0.0,
            height: 0.0,
            color: Some(color),
        }));
        self.transition(InteractionState::Drawing { id });
        vec![Action::ElementsChanged, Action::RenderNeeded]
    }

    fn start_stroke(&mut self, screen: Point) -> Vec<Action> {
        let world = self.transform.to_world(screen);
        let id = self.store.next_id();
        self.store.deselect();
        self.store.append(Element::Pencil(PencilElement {
            id,
            points: vec![world],
            color: Some(self.config.style.pencil_color.clone()),
            stroke_width: Some(self.config.style.pencil_width),
        }));
        self.transition(InteractionState::Drawing { id });
        vec![Action::ElementsChanged, Action::RenderNeeded]
    }

    fn start_text(&mut self, screen: Point) -> Vec<Action> {
        let world = self.transform.to_world(screen);
        self.transition(InteractionState::Writing { screen, world });
        vec![Action::BeginTextEntry { screen }]
    }

    fn start_select(&mut self, screen: Point) -> Vec<Action> {
        let world = self.transform.to_world(screen);
        let hit = hit::hit_test(world, self.store.elements()).map(|el| (el.id(), el.origin()));
        match hit {
            Some((id, origin)) => {
                self.store.select(id);
                match origin {
                    Some(origin) => self.transition(InteractionState::Moving { id, drag_offset: world.sub(origin) }),
                    None => self.transition(InteractionState::Idle),
                }
            }
            None => {
                self.store.deselect();
                self.transition(InteractionState::Idle);
            }
        }
        vec![Action::RenderNeeded]
    }

    fn continue_drawing(&mut self, id: ElementId, world: Point) -> Vec<Action> {
        let next = match self.store.last() {
            Some(Element::Rect(rect)) if rect.id == id => Element::Rect(RectElement {
                width: world.x - rect.x,
                height: world.y - rect.y,
                ..rect.clone()
            }),
            Some(Element::Pencil(pencil)) if pencil.id == id => {
                let mut pencil = pencil.clone();
                pencil.points.push(world);
                Element::Pencil(pencil)
            }
            _ => {
                log::debug!("element {id} is no longer on top; abandoning draw");
                self.transition(InteractionState::Idle);
                return Vec::new();
            }
        };
        self.store.replace_last(next);
        vec![Action::ElementsChanged, Action::RenderNeeded]
    }

    fn zoom(&mut self, cursor: Point, dy: f64) -> Vec<Action> {
        if !dy.is_finite() {
            return Vec::new();
        }
        let direction = if dy < 0.0 { 1.0 } else { -1.0 };
        let c = &self.config;
        self.transform.zoom_at(cursor, direction, c.zoom_intensity, c.min_scale, c.max_scale);
        vec![Action::RenderNeeded]
    }

    fn next_rect_color(&mut self) -> String {
        if self.config.random_rect_colors {
            format!("hsl({}, 70%, 60%)", self.rng.random_range(0..360))
        } else {
            self.config.style.rect_color.clone()
        }
    }

    fn cursor_action(&self) -> Action {
        Action::SetCursor(self.cursor().to_string())
    }

    fn transition(&mut self, next: InteractionState) {
        let (from, to) = (self.input.mode(), next.mode());
        if from != to {
            log::debug!("gesture {} -> {}", from.as_str(), to.as_str());
        }
        self.input = next;
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element, its 2D context and the storage backend.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    storage: Box<dyn Storage>,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas` and hydrate it from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(
        canvas: HtmlCanvasElement,
        storage: Box<dyn Storage>,
        config: CanvasConfig,
        seed: u64,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let elements = persist::load_elements(storage.as_ref(), &config.storage_key);
        let mut core = EngineCore::with_config(config, seed);
        let actions = core.hydrate(elements);
        let mut engine = Self { canvas, ctx, storage, core };
        engine.dispatch(actions);
        Ok(engine)
    }

    /// Apply engine-side effects of `actions` and return the ones the host
    /// must handle (text overlay, toolbar sync).
    ///
    /// Persistence and rendering happen at most once per batch.
    pub fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut changed = false;
        let mut cleared = false;
        let mut render = false;
        let mut host = Vec::new();
        for action in actions {
            match action {
                Action::ElementsChanged => changed = true,
                Action::ElementsCleared => cleared = true,
                Action::RenderNeeded => render = true,
                Action::SetCursor(cursor) => self.apply_cursor(&cursor),
                Action::BeginTextEntry { .. } | Action::ToolChanged(_) => host.push(action),
            }
        }
        if cleared {
            self.forget();
        }
        if changed {
            self.persist();
        }
        if render {
            self.render();
        }
        host
    }

    fn persist(&self) {
        let key = &self.core.config.storage_key;
        if let Err(err) = persist::save_elements(self.storage.as_ref(), key, self.core.store.elements()) {
            log::warn!("failed to save board: {err}");
        }
    }

    fn forget(&self) {
        if let Err(err) = self.storage.remove(&self.core.config.storage_key) {
            log::warn!("failed to remove saved board: {err}");
        }
    }

    fn apply_cursor(&self, cursor: &str) {
        if let Err(err) = self.canvas.style().set_property("cursor", cursor) {
            log::warn!("failed to set cursor: {err:?}");
        }
    }

    // --- Delegated inputs ---

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let actions = self.core.set_tool(tool);
        self.dispatch(actions)
    }

    pub fn clear(&mut self) -> Vec<Action> {
        let actions = self.core.clear();
        self.dispatch(actions)
    }

    pub fn commit_text(&mut self, text: &str) -> Vec<Action> {
        let actions = self.core.commit_text(text);
        self.dispatch(actions)
    }

    pub fn set_selected_color(&mut self, color: &str) -> Vec<Action> {
        let actions = self.core.set_selected_color(color);
        self.dispatch(actions)
    }

    pub fn set_selected_stroke_width(&mut self, width: f64) -> Vec<Action> {
        let actions = self.core.set_selected_stroke_width(width);
        self.dispatch(actions)
    }

    // --- Viewport ---

    /// Resize the backing store to `width_css * dpr` by `height_css * dpr` and redraw.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((self.core.viewport_width * dpr).round() as u32);
        self.canvas.set_height((self.core.viewport_height * dpr).round() as u32);
        self.dispatch(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_pointer_down(screen, button, modifiers);
        self.dispatch(actions)
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen, modifiers);
        self.dispatch(actions)
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_pointer_up(screen, button, modifiers);
        self.dispatch(actions)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_wheel(screen, delta, modifiers);
        self.dispatch(actions)
    }

    // --- Render ---

    /// Draw the current state to the canvas. Failures are logged, not returned.
    pub fn render(&self) {
        let core = &self.core;
        if let Err(err) = render::draw(
            &self.ctx,
            &core.store,
            &core.transform,
            &core.config,
            core.viewport_width,
            core.viewport_height,
            core.dpr,
        ) {
            log::error!("render failed: {err:?}");
        }
    }
}
