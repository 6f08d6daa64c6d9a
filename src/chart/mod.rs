//! The symbol map chart: configuration, drag rotation, marks and hover text.
//!
//! A caller configures the chart through the setters (each returns
//! `&mut Self` so calls chain), then calls [`SymbolMap::draw`] with a surface
//! id. After that, pointer events fed to the chart rotate the projection and
//! drive hover feedback. All state is owned by the chart and mutated from one
//! event at a time.

mod interaction;
mod lookup;
mod record;
mod render;
mod scene;
mod status;

pub use interaction::{DragController, DragPhase};
pub use lookup::{LookupTable, RegionRecord};
pub use record::{SymbolRecord, ValueAccessor};
pub use scene::{BoundingBox, LandmassMark, Scene, SurfaceHost, SymbolMark};
pub use status::{hover_message, StatusLine, DEFAULT_PROMPT};

use std::rc::Rc;

use tracing::{debug, info};

use crate::color::{ColorMap, ColorScale};
use crate::map::{Landmass, Projection};
use crate::scale::{Scale, SqrtScale};

pub struct SymbolMap {
    lookup: LookupTable,
    projection: Projection,
    radius: Box<dyn Scale>,
    color: Box<dyn ColorMap>,
    map: Option<Rc<Landmass>>,
    values: Option<Rc<[SymbolRecord]>>,
    value: ValueAccessor,
    status: StatusLine,
    drag: DragController,
    scene: Option<Scene>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self {
            lookup: LookupTable::new(),
            projection: Projection::natural_earth(),
            radius: Box::new(SqrtScale::default()),
            color: Box::new(ColorScale::default()),
            map: None,
            values: None,
            value: ValueAccessor::default(),
            status: StatusLine::default(),
            drag: DragController::new(),
            scene: None,
        }
    }

    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    /// Merge region records into the lookup table
    pub fn set_lookup(&mut self, records: impl IntoIterator<Item = RegionRecord>) -> &mut Self {
        self.lookup.extend(records);
        info!(regions = self.lookup.len(), "Updated lookup information.");
        self
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) -> &mut Self {
        self.projection = projection;
        self
    }

    pub fn radius(&self) -> &dyn Scale {
        self.radius.as_ref()
    }

    pub fn set_radius(&mut self, radius: impl Scale + 'static) -> &mut Self {
        self.radius = Box::new(radius);
        self
    }

    pub fn color(&self) -> &dyn ColorMap {
        self.color.as_ref()
    }

    /// Fill color as a function of depth
    pub fn set_color(&mut self, color: impl ColorMap + 'static) -> &mut Self {
        self.color = Box::new(color);
        self
    }

    pub fn map(&self) -> Option<&Rc<Landmass>> {
        self.map.as_ref()
    }

    /// Must be set before drawing
    pub fn set_map(&mut self, map: impl Into<Rc<Landmass>>) -> &mut Self {
        self.map = Some(map.into());
        self.status.set("Map data loaded.");
        self
    }

    pub fn values(&self) -> Option<&Rc<[SymbolRecord]>> {
        self.values.as_ref()
    }

    /// Must be set before drawing
    pub fn set_values(&mut self, values: impl Into<Rc<[SymbolRecord]>>) -> &mut Self {
        let values = values.into();
        debug!(records = values.len(), "symbol data set");
        self.values = Some(values);
        self.status.set("Symbol data loaded.");
        self
    }

    pub fn value(&self) -> &ValueAccessor {
        &self.value
    }

    pub fn set_value(&mut self, value: ValueAccessor) -> &mut Self {
        self.value = value;
        self
    }

    pub fn status(&self) -> &str {
        self.status.text()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Accumulated drag rotation in degrees
    pub fn angle(&self) -> f64 {
        self.drag.angle()
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Record under the pointer, if any
    pub fn hovered_record(&self) -> Option<&SymbolRecord> {
        let scene = self.scene.as_ref()?;
        scene.hovered.and_then(|i| scene.datum(i))
    }

    fn handlers_bound(&self) -> bool {
        self.scene.as_ref().is_some_and(|s| s.listening)
    }

    pub fn pointer_down(&mut self, x: f64) {
        if self.handlers_bound() {
            self.drag.pointer_down(x);
        }
    }

    pub fn pointer_up(&mut self) {
        if self.handlers_bound() {
            self.drag.pointer_up();
        }
    }

    /// Rotates while dragging, then updates hover state under the pointer
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(width) = self
            .scene
            .as_ref()
            .filter(|s| s.listening)
            .map(|s| s.bbox().width)
        else {
            return;
        };

        if let Some(angle) = self.drag.pointer_move(x, width) {
            self.rotate_to(angle);
        }
        self.update_hover(x, y);
    }

    /// Hover-out and hover-in transitions for the mark under the pointer
    fn update_hover(&mut self, x: f64, y: f64) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let hit = scene.hit_test(x, y);
        if hit == scene.hovered {
            return;
        }
        if scene.hovered.is_some() {
            self.hover_out();
        }
        if let Some(index) = hit {
            self.hover_in(index);
        }
    }

    /// Rotate by a fixed number of degrees
    pub fn nudge(&mut self, degrees: f64) {
        let angle = self.drag.nudge(degrees);
        self.rotate_to(angle);
    }

    fn rotate_to(&mut self, angle: f64) {
        self.projection.set_rotation([angle, 0.0, 0.0]);
        self.redraw();
    }

    /// Highlight a symbol and describe its record
    pub fn hover_in(&mut self, index: usize) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let Some(record) = scene.datum(index) else {
            return;
        };
        let message = hover_message(record);
        let previous = scene.hovered.replace(index);
        for mark in scene.dots.iter_mut() {
            if mark.index == index {
                mark.highlighted = true;
            } else if Some(mark.index) == previous {
                mark.highlighted = false;
            }
        }
        self.status.set(message);
    }

    /// Clear the highlight and restore the default prompt
    pub fn hover_out(&mut self) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if let Some(index) = scene.hovered.take() {
            for mark in scene.dots.iter_mut().filter(|m| m.index == index) {
                mark.highlighted = false;
            }
        }
        self.status.reset();
    }
}

impl Default for SymbolMap {
    fn default() -> Self {
        Self::new()
    }
}
