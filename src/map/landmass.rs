/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// The base map outline: one geometry object made of rings and lines.
///
/// It is bound to the landmass layer as a single datum, never joined
/// feature-by-feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Landmass {
    lines: Vec<LineString>,
}

impl Landmass {
    pub fn new(lines: Vec<LineString>) -> Self {
        Self { lines }
    }

    /// Add a ring or line; anything shorter than two points is dropped
    pub fn push(&mut self, line: LineString) {
        if line.len() >= 2 {
            self.lines.push(line);
        }
    }

    pub fn lines(&self) -> &[LineString] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total vertex count
    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drops_degenerate() {
        let mut land = Landmass::default();
        land.push(vec![(0.0, 0.0)]);
        land.push(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(land.lines().len(), 1);
        assert_eq!(land.vertex_count(), 2);
    }
}
