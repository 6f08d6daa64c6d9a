use crate::color::Rgb;

/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots).
/// Unicode Braille patterns: U+2800 to U+28FF
///
/// Every cell also carries the color of the last pixel written into it, so
/// symbol layers can be tinted per mark.
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    pixels: Vec<u8>,
    colors: Vec<Option<Rgb>>,
}

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width * height],
            colors: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a pixel at the given coordinates.
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if let Some(idx) = self.set_bit(x, y) {
            self.colors[idx] = None;
        }
    }

    /// Set a pixel and tint its cell
    pub fn set_pixel_colored(&mut self, x: usize, y: usize, color: Rgb) {
        if let Some(idx) = self.set_bit(x, y) {
            self.colors[idx] = Some(color);
        }
    }

    fn set_bit(&mut self, x: usize, y: usize) -> Option<usize> {
        let cx = x / 2;
        let cy = y / 4;

        if cx >= self.width || cy >= self.height {
            return None;
        }

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => 0,
        };

        let idx = cy * self.width + cx;
        self.pixels[idx] |= bit;
        Some(idx)
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize);
        }
    }

    /// Signed variant of [`set_pixel_colored`](Self::set_pixel_colored)
    pub fn set_pixel_signed_colored(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 {
            self.set_pixel_colored(x as usize, y as usize, color);
        }
    }

    /// Braille glyph and tint of a cell; `None` when no dot is set
    pub fn cell(&self, col: usize, row: usize) -> Option<(char, Option<Rgb>)> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let idx = row * self.width + col;
        let bits = self.pixels[idx];
        if bits == 0 {
            return None;
        }
        let ch = char::from_u32(0x2800 + u32::from(bits)).unwrap_or(' ');
        Some((ch, self.colors[idx]))
    }

    /// Get a specific row as a string (for line-by-line rendering)
    pub fn row_to_string(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.pixels[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|&b| char::from_u32(0x2800 + u32::from(b)).unwrap_or(' '))
            .collect()
    }

    /// Convert the canvas to a string of Braille characters
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        (0..self.height)
            .map(|i| self.row_to_string(i))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
