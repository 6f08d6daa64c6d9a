use crate::braille::BrailleCanvas;
use crate::color::Rgb;
use crate::map::path::PathShape;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Rasterize a projected path, skipping segments entirely off the canvas
pub fn draw_path(canvas: &mut BrailleCanvas, shape: &PathShape) {
    let max_x = (canvas.width() * 2) as i32;
    let max_y = (canvas.height() * 4) as i32;

    for polyline in shape {
        for pair in polyline.windows(2) {
            let (x0, y0) = (pair[0].0.round() as i32, pair[0].1.round() as i32);
            let (x1, y1) = (pair[1].0.round() as i32, pair[1].1.round() as i32);
            let off_canvas = x0.max(x1) < 0
                || x0.min(x1) >= max_x
                || y0.max(y1) < 0
                || y0.min(y1) >= max_y;
            if !off_canvas {
                draw_line(canvas, x0, y0, x1, y1);
            }
        }
    }
}

/// Draw a filled circle tinted with `color`
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32, color: Rgb) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed_colored(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a one-pixel circle outline (highlight indicator)
pub fn draw_ring(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32, color: Rgb) {
    let inner = (radius - 1).max(0);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius && d2 > inner * inner {
                canvas.set_pixel_signed_colored(cx + dx, cy + dy, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        // Top dots of every cell: 0x01 | 0x08
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_draw_path_skips_offscreen() {
        let mut canvas = BrailleCanvas::new(2, 1);
        let shape = vec![vec![(-50.0, -50.0), (-10.0, -10.0)], vec![(0.0, 0.0), (3.0, 0.0)]];
        draw_path(&mut canvas, &shape);
        assert_eq!(canvas.to_string(), "⠉⠉");
    }

    #[test]
    fn test_circle_and_ring() {
        let color = Rgb::new(1, 2, 3);
        let mut filled = BrailleCanvas::new(4, 2);
        draw_circle(&mut filled, 3, 3, 2, color);
        let mut ring = BrailleCanvas::new(4, 2);
        draw_ring(&mut ring, 3, 3, 2, color);
        // Ring leaves the center empty
        assert_eq!(ring.cell(1, 0).map(|(_, c)| c), Some(Some(color)));
        assert_ne!(filled.to_string(), ring.to_string());
    }
}
