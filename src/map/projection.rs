use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use glam::{DMat3, DVec3};

use crate::error::ConfigError;
use crate::geo::{spherical_to_vec3, vec3_to_spherical, wrap_radians};

/// Unit-scale projection of rotated spherical coordinates onto the plane.
///
/// Input is (lambda, phi) in radians, output has y pointing north. Returning
/// `None` clips the point (e.g. the far side of a globe).
pub trait RawProjection: Send + Sync {
    fn name(&self) -> &'static str;
    fn raw(&self, lambda: f64, phi: f64) -> Option<(f64, f64)>;
}

/// Natural Earth I: compromise whole-world projection, the default.
pub struct NaturalEarth;

impl RawProjection for NaturalEarth {
    fn name(&self) -> &'static str {
        "natural-earth"
    }

    #[inline]
    fn raw(&self, lambda: f64, phi: f64) -> Option<(f64, f64)> {
        let phi2 = phi * phi;
        let phi4 = phi2 * phi2;
        let x = lambda
            * (0.8707 - 0.131979 * phi2
                + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
        let y = phi
            * (1.007226 + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
        Some((x, y))
    }
}

/// Plate carrée
pub struct Equirectangular;

impl RawProjection for Equirectangular {
    fn name(&self) -> &'static str {
        "equirectangular"
    }

    #[inline]
    fn raw(&self, lambda: f64, phi: f64) -> Option<(f64, f64)> {
        Some((lambda, phi))
    }
}

/// Globe seen from infinity; the back hemisphere is clipped.
pub struct Orthographic;

impl RawProjection for Orthographic {
    fn name(&self) -> &'static str {
        "orthographic"
    }

    #[inline]
    fn raw(&self, lambda: f64, phi: f64) -> Option<(f64, f64)> {
        if lambda.abs() > FRAC_PI_2 {
            return None;
        }
        Some((phi.cos() * lambda.sin(), phi.sin()))
    }
}

/// Built-in projections selectable by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    #[default]
    NaturalEarth,
    Equirectangular,
    Orthographic,
}

impl ProjectionKind {
    pub fn build(self) -> Projection {
        match self {
            Self::NaturalEarth => Projection::new(NaturalEarth),
            Self::Equirectangular => Projection::new(Equirectangular),
            Self::Orthographic => Projection::new(Orthographic),
        }
    }
}

impl FromStr for ProjectionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "natural-earth" | "naturalearth" => Ok(Self::NaturalEarth),
            "equirectangular" | "plate-carree" => Ok(Self::Equirectangular),
            "orthographic" | "globe" => Ok(Self::Orthographic),
            _ => Err(ConfigError::Projection(s.to_string())),
        }
    }
}

/// A raw projection with scale, translation and rotation applied.
///
/// Rotation is `[lambda, phi, gamma]` in degrees. Only the first axis is
/// driven by the chart; the other two are honored when a caller sets them.
#[derive(Clone)]
pub struct Projection {
    raw: Arc<dyn RawProjection>,
    scale: f64,
    translate: (f64, f64),
    rotate: [f64; 3],
    /// Tilt part of the rotation, identity when phi and gamma are zero
    tilt: Option<DMat3>,
}

impl Projection {
    pub fn new(raw: impl RawProjection + 'static) -> Self {
        Self {
            raw: Arc::new(raw),
            scale: 150.0,
            translate: (480.0, 250.0),
            rotate: [0.0; 3],
            tilt: None,
        }
    }

    pub fn natural_earth() -> Self {
        Self::new(NaturalEarth)
    }

    pub fn name(&self) -> &'static str {
        self.raw.name()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn translate(&self) -> (f64, f64) {
        self.translate
    }

    pub fn set_translate(&mut self, translate: (f64, f64)) -> &mut Self {
        self.translate = translate;
        self
    }

    pub fn rotation(&self) -> [f64; 3] {
        self.rotate
    }

    pub fn set_rotation(&mut self, rotate: [f64; 3]) -> &mut Self {
        self.rotate = rotate;
        let [_, phi, gamma] = rotate;
        self.tilt = if phi == 0.0 && gamma == 0.0 {
            None
        } else {
            Some(
                DMat3::from_rotation_x(gamma.to_radians())
                    * DMat3::from_rotation_y(-phi.to_radians()),
            )
        };
        self
    }

    /// Apply the rotation to a geographic point; returns radians.
    #[inline]
    pub fn rotate_point(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = wrap_radians((lon + self.rotate[0]).to_radians());
        let phi = lat.to_radians();
        match &self.tilt {
            None => (lambda, phi),
            Some(m) => {
                let p: DVec3 = *m * spherical_to_vec3(lambda, phi);
                vec3_to_spherical(p)
            }
        }
    }

    /// Project already-rotated (lambda, phi) radians to screen coordinates
    #[inline]
    pub fn project_rotated(&self, lambda: f64, phi: f64) -> Option<(f64, f64)> {
        let (x, y) = self.raw.raw(lambda, phi)?;
        Some((
            self.translate.0 + self.scale * x,
            self.translate.1 - self.scale * y,
        ))
    }

    /// Project a geographic coordinate (lon, lat) in degrees to screen coordinates
    #[inline]
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let (lambda, phi) = self.rotate_point(lon, lat);
        self.project_rotated(lambda, phi)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::natural_earth()
    }
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("raw", &self.raw.name())
            .field("scale", &self.scale)
            .field("translate", &self.translate)
            .field("rotate", &self.rotate)
            .finish()
    }
}
