use std::collections::HashMap;
use std::rc::Rc;

use crate::chart::record::SymbolRecord;
use crate::color::Rgb;
use crate::map::{Landmass, PathShape};

/// Pixel size of a rendering surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Resolves a surface identifier to its current bounding box
pub trait SurfaceHost {
    fn bounding_box(&self, id: &str) -> Option<BoundingBox>;
}

impl SurfaceHost for HashMap<String, BoundingBox> {
    fn bounding_box(&self, id: &str) -> Option<BoundingBox> {
        self.get(id).copied()
    }
}

/// The single base-layer mark
#[derive(Clone, Debug, Default)]
pub struct LandmassMark {
    pub path: PathShape,
}

impl LandmassMark {
    pub const CLASS: &'static str = "country";
}

/// One symbol bound to one record by index
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolMark {
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Rgb,
    pub highlighted: bool,
    /// False when the point is clipped or its value is missing
    pub visible: bool,
}

impl SymbolMark {
    pub fn classes(&self) -> &'static [&'static str] {
        if self.highlighted {
            &["symbol", "highlight"]
        } else {
            &["symbol"]
        }
    }

    /// Hit test in surface pixels; tiny symbols still get a one-pixel target
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !self.visible {
            return false;
        }
        let r = self.r.max(1.0);
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= r * r
    }
}

/// Marks bound to one surface by a full draw.
///
/// The scene keeps the dataset and geometry it was bound with, so drag
/// redraws keep working on the same records even if the chart's dataset is
/// replaced in between.
#[derive(Clone, Debug)]
pub struct Scene {
    surface_id: String,
    bbox: BoundingBox,
    pub(crate) country: Vec<LandmassMark>,
    pub(crate) dots: Vec<SymbolMark>,
    pub(crate) landmass: Rc<Landmass>,
    pub(crate) data: Rc<[SymbolRecord]>,
    pub(crate) listening: bool,
    pub(crate) hovered: Option<usize>,
}

impl Scene {
    pub(crate) fn new(
        surface_id: &str,
        bbox: BoundingBox,
        landmass: Rc<Landmass>,
        data: Rc<[SymbolRecord]>,
    ) -> Self {
        Self {
            surface_id: surface_id.to_string(),
            bbox,
            country: Vec::new(),
            dots: Vec::new(),
            landmass,
            data,
            listening: false,
            hovered: None,
        }
    }

    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn country(&self) -> &[LandmassMark] {
        &self.country
    }

    pub fn dots(&self) -> &[SymbolMark] {
        &self.dots
    }

    /// Record a symbol mark is bound to
    pub fn datum(&self, index: usize) -> Option<&SymbolRecord> {
        self.data.get(index)
    }

    /// Whether pointer handlers are registered
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Topmost (last drawn) visible symbol under the point
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.dots
            .iter()
            .rev()
            .find(|mark| mark.contains(x, y))
            .map(|mark| mark.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(index: usize, cx: f64, r: f64) -> SymbolMark {
        SymbolMark {
            index,
            cx,
            cy: 0.0,
            r,
            fill: Rgb::new(0, 0, 0),
            highlighted: false,
            visible: true,
        }
    }

    #[test]
    fn test_classes() {
        let mut m = mark(0, 0.0, 5.0);
        assert_eq!(m.classes(), ["symbol"]);
        m.highlighted = true;
        assert_eq!(m.classes(), ["symbol", "highlight"]);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut scene = Scene::new(
            "map",
            BoundingBox::new(100.0, 50.0),
            Rc::new(Landmass::default()),
            Rc::from(Vec::new()),
        );
        scene.dots = vec![mark(0, 0.0, 5.0), mark(1, 4.0, 5.0)];
        assert_eq!(scene.hit_test(2.0, 0.0), Some(1));
        assert_eq!(scene.hit_test(-4.0, 0.0), Some(0));
        assert_eq!(scene.hit_test(40.0, 0.0), None);

        scene.dots[1].visible = false;
        assert_eq!(scene.hit_test(2.0, 0.0), Some(0));
    }

    #[test]
    fn test_host_lookup() {
        let mut host = HashMap::new();
        host.insert("map".to_string(), BoundingBox::new(10.0, 5.0));
        assert_eq!(host.bounding_box("map"), Some(BoundingBox::new(10.0, 5.0)));
        assert_eq!(host.bounding_box("other"), None);
    }
}
