use std::f64::consts::PI;

use rayon::prelude::*;

use crate::map::landmass::Landmass;
use crate::map::projection::Projection;

/// Screen-space polylines ready to rasterize
pub type PathShape = Vec<Vec<(f64, f64)>>;

/// Below this many vertices the landmass is projected on the calling thread
const PARALLEL_THRESHOLD: usize = 4096;

/// Path generator bound to a projection, so geometry lines up with
/// projected points.
pub struct GeoPath<'a> {
    projection: &'a Projection,
}

impl<'a> GeoPath<'a> {
    pub fn new(projection: &'a Projection) -> Self {
        Self { projection }
    }

    /// Project one line, breaking it where a vertex is clipped or where the
    /// segment jumps across the rotated antimeridian.
    pub fn line(&self, line: &[(f64, f64)]) -> PathShape {
        let mut parts = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::with_capacity(line.len());
        let mut prev_lambda: Option<f64> = None;

        for &(lon, lat) in line {
            let (lambda, phi) = self.projection.rotate_point(lon, lat);
            let Some(point) = self.projection.project_rotated(lambda, phi) else {
                flush(&mut parts, &mut current);
                prev_lambda = None;
                continue;
            };

            if let Some(prev) = prev_lambda {
                if (lambda - prev).abs() > PI {
                    flush(&mut parts, &mut current);
                }
            }

            current.push(point);
            prev_lambda = Some(lambda);
        }

        flush(&mut parts, &mut current);
        parts
    }

    /// Project the whole landmass
    pub fn render(&self, landmass: &Landmass) -> PathShape {
        if landmass.vertex_count() < PARALLEL_THRESHOLD {
            landmass.lines().iter().flat_map(|l| self.line(l)).collect()
        } else {
            landmass
                .lines()
                .par_iter()
                .flat_map_iter(|l| self.line(l))
                .collect()
        }
    }
}

fn flush(parts: &mut PathShape, current: &mut Vec<(f64, f64)>) {
    if current.len() >= 2 {
        parts.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::projection::ProjectionKind;

    fn equirect() -> Projection {
        let mut p = ProjectionKind::Equirectangular.build();
        p.set_scale(1.0).set_translate((0.0, 0.0));
        p
    }

    #[test]
    fn test_simple_line() {
        let p = equirect();
        let shape = GeoPath::new(&p).line(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        assert_eq!(shape.len(), 1);
        assert_eq!(shape[0].len(), 3);
    }

    #[test]
    fn test_splits_at_antimeridian() {
        let p = equirect();
        let shape = GeoPath::new(&p).line(&[(170.0, 0.0), (179.0, 0.0), (-179.0, 0.0), (-170.0, 0.0)]);
        assert_eq!(shape.len(), 2);
    }

    #[test]
    fn test_rotation_moves_the_seam() {
        let mut p = equirect();
        p.set_rotation([90.0, 0.0, 0.0]);
        // 85..95 crosses 180 after rotation
        let shape = GeoPath::new(&p).line(&[(80.0, 0.0), (89.0, 0.0), (91.0, 0.0), (100.0, 0.0)]);
        assert_eq!(shape.len(), 2);
        // The old seam is now continuous
        let shape = GeoPath::new(&p).line(&[(170.0, 0.0), (179.0, 0.0), (-179.0, 0.0), (-170.0, 0.0)]);
        assert_eq!(shape.len(), 1);
    }

    #[test]
    fn test_clipped_vertices_break_lines() {
        let p = ProjectionKind::Orthographic.build();
        let shape = GeoPath::new(&p).line(&[(0.0, 0.0), (30.0, 0.0), (150.0, 0.0), (-40.0, 0.0), (-20.0, 0.0)]);
        assert_eq!(shape.len(), 2);
    }

    #[test]
    fn test_render_landmass() {
        let p = equirect();
        let land = Landmass::new(vec![
            vec![(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            vec![(50.0, 0.0), (60.0, 0.0)],
        ]);
        assert_eq!(GeoPath::new(&p).render(&land).len(), 2);
    }
}
