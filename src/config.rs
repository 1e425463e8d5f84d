/// Folding used by the fragment shader to tile the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tiling {
    /// Vertex-centred hexagonal cells.
    #[default]
    Hexagonal,
    /// Plain square cells, which turns the hexagons into a tetraskelion.
    Tetraskelion,
}

/// Options consumed by the initializer and the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// DOM id of the canvas the browser entry point draws into.
    pub canvas_id: String,
    pub tiling: Tiling,
    /// RGBA colour the frame is cleared to before drawing.
    pub clear_color: [f32; 4],
    /// Maximum level routed to the browser console.
    pub log_level: log::Level,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiling(mut self, tiling: Tiling) -> Self {
        self.tiling = tiling;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_owned(),
            tiling: Tiling::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            log_level: log::Level::Info,
        }
    }
}
