//! Full draw and drag redraw.

use std::f64::consts::TAU;

use tracing::{debug, info, warn};

use crate::chart::record::SymbolRecord;
use crate::chart::scene::{BoundingBox, LandmassMark, Scene, SurfaceHost, SymbolMark};
use crate::chart::SymbolMap;
use crate::map::GeoPath;
use crate::scale::extent;

impl SymbolMap {
    /// Full draw onto the surface `id`.
    ///
    /// Without map data, symbol data or a known surface this logs a warning
    /// and leaves everything untouched. Otherwise any previous scene is
    /// replaced: one landmass mark, one symbol mark per record.
    pub fn draw(&mut self, host: &impl SurfaceHost, id: &str) {
        let (Some(landmass), Some(data)) = (self.map.clone(), self.values.clone()) else {
            warn!("Unable to draw symbol map: missing data.");
            return;
        };
        let Some(bbox) = host.bounding_box(id) else {
            warn!(surface = id, "Unable to draw symbol map: unknown surface.");
            return;
        };

        self.status.set("Drawing map... please wait.");
        info!(
            surface = id,
            width = bbox.width,
            height = bbox.height,
            records = data.len(),
            "Drawing map... please wait."
        );

        self.setup_projection(bbox);

        let mut scene = Scene::new(id, bbox, landmass, data);
        self.register_handlers(&mut scene);
        self.update_domains();
        self.bind_marks(&mut scene);

        self.scene = Some(scene);
        self.status.reset();
    }

    /// Fit scale and translation to the surface
    pub(crate) fn setup_projection(&mut self, bbox: BoundingBox) {
        self.projection
            .set_scale(bbox.width / TAU)
            .set_translate((bbox.width / 2.0, bbox.height / 2.0));
    }

    /// Start routing pointer events to the drag controller and hover logic
    pub(crate) fn register_handlers(&self, scene: &mut Scene) {
        scene.listening = true;
    }

    /// Size domain = extent of the current accessor over the current dataset.
    /// Only a full draw calls this; drag redraws keep the cached domain.
    pub(crate) fn update_domains(&mut self) {
        let Some(values) = self.values.as_ref() else {
            return;
        };
        match extent(values.iter().map(|d| self.value.get(d))) {
            Some(domain) => {
                debug!(min = domain.0, max = domain.1, "radius domain");
                self.radius.set_domain(domain);
            }
            None => warn!("No numeric values in symbol data; keeping radius domain."),
        }
    }

    /// Create the landmass mark and one symbol mark per bound record
    pub(crate) fn bind_marks(&self, scene: &mut Scene) {
        let path = GeoPath::new(&self.projection).render(&scene.landmass);
        scene.country = vec![LandmassMark { path }];
        scene.dots = scene
            .data
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut mark = SymbolMark {
                    index,
                    cx: 0.0,
                    cy: 0.0,
                    r: 0.0,
                    fill: self.color.map(record.depth),
                    highlighted: false,
                    visible: false,
                };
                self.style_mark(&mut mark, record);
                mark
            })
            .collect();
        scene.hovered = None;
    }

    /// Drag redraw: re-project the landmass and restyle existing marks in
    /// place. No marks are created or removed and handlers stay as they are.
    pub fn redraw(&mut self) {
        let Some(mut scene) = self.scene.take() else {
            return;
        };
        if let Some(mark) = scene.country.first_mut() {
            mark.path = GeoPath::new(&self.projection).render(&scene.landmass);
        }
        let data = std::rc::Rc::clone(&scene.data);
        for mark in &mut scene.dots {
            if let Some(record) = data.get(mark.index) {
                self.style_mark(mark, record);
            }
        }
        self.scene = Some(scene);
    }

    fn style_mark(&self, mark: &mut SymbolMark, record: &SymbolRecord) {
        let position = self.projection.project(record.longitude, record.latitude);
        let radius = self
            .value
            .get(record)
            .map(|v| self.radius.map(v))
            .filter(|r| r.is_finite());

        mark.fill = self.color.map(record.depth);
        match (position, radius) {
            (Some((cx, cy)), Some(r)) => {
                mark.cx = cx;
                mark.cy = cy;
                mark.r = r;
                mark.visible = true;
            }
            _ => {
                mark.visible = false;
            }
        }
    }
}
