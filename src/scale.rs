//! Numeric scales mapping a data domain onto a visual range.

/// A continuous, monotonic mapping from a numeric domain to a numeric range.
///
/// The chart stores its size scale as `Box<dyn Scale>`, so any monotonic
/// function with this shape can replace the default square-root scale.
pub trait Scale {
    fn map(&self, value: f64) -> f64;
    fn domain(&self) -> (f64, f64);
    fn set_domain(&mut self, domain: (f64, f64));
    fn range(&self) -> (f64, f64);
}

/// Normalize `x` into [0, 1] over `[a, b]`; a degenerate span maps to 0.5
#[inline(always)]
fn normalize(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.5
    } else {
        (x - a) / span
    }
}

#[inline(always)]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear scale, used for pointer distance to rotation angle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }
}

impl Scale for LinearScale {
    fn map(&self, value: f64) -> f64 {
        let t = normalize(self.domain.0, self.domain.1, value);
        lerp(self.range.0, self.range.1, t)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Square-root scale: area, not radius, grows linearly with the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    /// Symbol radius range in pixels
    pub const DEFAULT_RANGE: (f64, f64) = (5.0, 15.0);

    pub fn new(range: (f64, f64)) -> Self {
        Self {
            domain: (0.0, 1.0),
            range,
        }
    }

    #[inline(always)]
    fn transform(x: f64) -> f64 {
        x.signum() * x.abs().sqrt()
    }
}

impl Default for SqrtScale {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RANGE)
    }
}

impl Scale for SqrtScale {
    fn map(&self, value: f64) -> f64 {
        let t = normalize(
            Self::transform(self.domain.0),
            Self::transform(self.domain.1),
            Self::transform(value),
        );
        lerp(self.range.0, self.range.1, t)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// (min, max) of the finite values, or `None` if there are none
pub fn extent(values: impl IntoIterator<Item = Option<f64>>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
