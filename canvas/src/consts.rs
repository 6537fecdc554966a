//! Shared numeric and string defaults for the canvas crate.

// ── Persistence ─────────────────────────────────────────────────

/// Storage key holding the serialized element list.
pub const DEFAULT_STORAGE_KEY: &str = "canvas-elements";

// ── Camera ──────────────────────────────────────────────────────

/// Exponent applied per wheel notch: `scale *= exp(intensity * direction)`.
pub const DEFAULT_ZOOM_INTENSITY: f64 = 0.1;

/// Smallest scale a zoom gesture may reach.
pub const DEFAULT_MIN_SCALE: f64 = 0.01;

/// Largest scale a zoom gesture may reach.
pub const DEFAULT_MAX_SCALE: f64 = 100.0;

// ── Grid ────────────────────────────────────────────────────────

/// Distance between grid lines in world units.
pub const GRID_SPACING: f64 = 50.0;

/// Grid lines span `[-GRID_EXTENT, GRID_EXTENT]` on both axes.
pub const GRID_EXTENT: f64 = 2000.0;

/// Most grid lines drawn per axis. Configs asking for more are rejected.
pub const MAX_GRID_LINES: usize = 10_000;

pub const GRID_COLOR: &str = "#ddd";

// ── Element styles ──────────────────────────────────────────────

pub const RECT_COLOR: &str = "blue";
pub const PENCIL_COLOR: &str = "black";
pub const PENCIL_WIDTH: f64 = 3.0;
pub const TEXT_COLOR: &str = "black";
pub const FONT_SIZE: f64 = 24.0;
pub const FONT_FAMILY: &str = "sans-serif";

/// Stroke width bounds offered by the properties panel.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
pub const MAX_STROKE_WIDTH: f64 = 20.0;

// ── Selection ───────────────────────────────────────────────────

pub const SELECTION_COLOR: &str = "#0088ff";

/// Selection outline width in screen pixels (divided by scale when drawn).
pub const SELECTION_WIDTH_PX: f64 = 2.0;

/// Dash segment length for non-rect selection outlines, in screen pixels.
pub const SELECTION_DASH_PX: f64 = 4.0;

// ── Hand-drawn rendering ────────────────────────────────────────

/// Maximum jitter of a sketchy line endpoint, in world units.
pub const ROUGH_MAX_OFFSET: f64 = 2.0;

/// Number of samples along each sketchy bezier segment.
pub const ROUGH_CURVE_STEPS: u32 = 10;
