use std::collections::HashMap;

use tracing::debug;

use crate::chart::{BoundingBox, SurfaceHost, SymbolMap};
use crate::error::report_error;
use crate::geo::wrap_degrees;

/// Surface id of the map panel
pub const MAP_SURFACE: &str = "map";

/// Degrees per rotate key press
pub const NUDGE_DEGREES: f64 = 10.0;

/// Terminal panels the chart can draw onto, measured in Braille pixels
#[derive(Clone, Debug, Default)]
pub struct Surfaces {
    boxes: HashMap<String, BoundingBox>,
}

impl Surfaces {
    pub fn set(&mut self, id: &str, bbox: BoundingBox) {
        self.boxes.insert(id.to_string(), bbox);
    }
}

impl SurfaceHost for Surfaces {
    fn bounding_box(&self, id: &str) -> Option<BoundingBox> {
        self.boxes.get(id).copied()
    }
}

/// Application state
pub struct App {
    pub chart: SymbolMap,
    pub surfaces: Surfaces,
    pub should_quit: bool,
    /// Banner text of the last reported error
    pub error: Option<String>,
    /// Terminal size in cells
    size: (u16, u16),
}

impl App {
    pub fn new(chart: SymbolMap, width: u16, height: u16) -> Self {
        let mut app = Self {
            chart,
            surfaces: Surfaces::default(),
            should_quit: false,
            error: None,
            size: (width, height),
        };
        app.update_surface();
        app
    }

    /// Rows taken by the border, the status bar and the error banner
    fn chrome_rows(&self) -> u16 {
        3 + u16::from(self.error.is_some())
    }

    fn update_surface(&mut self) {
        // Braille gives 2x4 resolution per character
        let inner_width = self.size.0.saturating_sub(2);
        let inner_height = self.size.1.saturating_sub(self.chrome_rows());
        self.surfaces.set(
            MAP_SURFACE,
            BoundingBox::new(f64::from(inner_width) * 2.0, f64::from(inner_height) * 4.0),
        );
    }

    /// Full draw onto the map panel
    pub fn draw(&mut self) {
        self.chart.draw(&self.surfaces, MAP_SURFACE);
    }

    /// Terminal resized: new surface box and a full draw
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.size = (width, height);
        self.update_surface();
        self.draw();
    }

    /// Show an error in the banner line
    pub fn report(&mut self, error: &anyhow::Error) {
        self.error = Some(report_error(error));
        self.update_surface();
    }

    /// Terminal cell to Braille pixel at the cell center.
    /// The map panel starts one cell in from the border.
    pub fn pointer_position(column: u16, row: u16) -> (f64, f64) {
        let x = (f64::from(column) - 1.0) * 2.0 + 1.0;
        let y = (f64::from(row) - 1.0) * 4.0 + 2.0;
        (x, y)
    }

    pub fn mouse_down(&mut self, column: u16, row: u16) {
        let (x, _) = Self::pointer_position(column, row);
        self.chart.pointer_down(x);
    }

    /// Plain motion and drag motion alike; the chart knows which it is
    pub fn mouse_move(&mut self, column: u16, row: u16) {
        let (x, y) = Self::pointer_position(column, row);
        self.chart.pointer_move(x, y);
    }

    pub fn mouse_up(&mut self) {
        self.chart.pointer_up();
    }

    pub fn rotate_left(&mut self) {
        self.chart.nudge(-NUDGE_DEGREES);
    }

    pub fn rotate_right(&mut self) {
        self.chart.nudge(NUDGE_DEGREES);
    }

    /// Back to zero rotation
    pub fn reset(&mut self) {
        let angle = self.chart.angle();
        if angle != 0.0 {
            self.chart.nudge(-angle);
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Region name of the hovered quake, when its place ends in a known code
    pub fn hovered_region(&self) -> Option<&str> {
        let record = self.chart.hovered_record()?;
        self.chart.lookup().region_for_place(&record.place)
    }

    /// Rotation for display, wrapped into [-180, 180)
    pub fn status_angle(&self) -> String {
        format!("{:+.0}°", wrap_degrees(self.chart.angle()))
    }
}
