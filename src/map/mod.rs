mod geometry;
mod landmass;
mod path;
mod projection;

pub use geometry::{draw_circle, draw_line, draw_path, draw_ring};
pub use landmass::{Landmass, LineString};
pub use path::{GeoPath, PathShape};
pub use projection::{
    Equirectangular, NaturalEarth, Orthographic, Projection, ProjectionKind, RawProjection,
};
