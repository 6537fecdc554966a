//! Canvas engine for the sketch whiteboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the canvas: translating raw DOM input events into element
//! edits, maintaining the pan/zoom transform, hit-testing, rendering the scene
//! and persisting the board to `localStorage`. The host JavaScript layer only
//! wires DOM events to `web::SketchBoard` and provides the toolbar and the
//! text-input overlay.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`element`] | Element types and sparse patches |
//! | [`store`] | Ordered element collection, selection and id allocation |
//! | [`transform`] | Pan/zoom transform and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing and element bounds |
//! | [`path`] | Stroke smoothing and grid geometry |
//! | [`rough`] | Hand-drawn outline generator |
//! | [`render`] | Scene rendering to a 2D context |
//! | [`persist`] | Storage backends and board load/save |
//! | [`config`] | Host-supplied configuration |
//! | [`consts`] | Shared numeric and string defaults |
//! | `web` | `wasm-bindgen` entry points (`wasm32` only) |

pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod hit;
pub mod input;
pub mod path;
pub mod persist;
pub mod render;
pub mod rough;
pub mod store;
pub mod transform;

#[cfg(target_arch = "wasm32")]
pub mod web;
