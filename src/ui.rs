use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::chart::Scene;
use crate::color::Rgb;
use crate::map::{draw_circle, draw_path, draw_ring};

/// Outline color of a hovered symbol
const HIGHLIGHT: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let banner = u16::from(app.error.is_some());

    // Split into map area, status bar and optional error banner
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),         // Map
            Constraint::Length(1),      // Status bar
            Constraint::Length(banner), // Error banner
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
    if let Some(error) = &app.error {
        let line = Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), chunks[2]);
    }
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Earthquakes ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(scene) = app.chart.scene() {
        let layers = SceneLayers::rasterize(scene, inner.width as usize, inner.height as usize);
        frame.render_widget(layers, inner);
    }
}

/// Scene marks rasterized onto Braille canvases, landmass behind symbols
pub struct SceneLayers {
    pub land: BrailleCanvas,
    pub symbols: BrailleCanvas,
}

impl SceneLayers {
    pub fn rasterize(scene: &Scene, width: usize, height: usize) -> Self {
        let mut land = BrailleCanvas::new(width, height);
        for mark in scene.country() {
            draw_path(&mut land, &mark.path);
        }

        // Draw order follows the data order, so later records sit on top
        let mut symbols = BrailleCanvas::new(width, height);
        for mark in scene.dots().iter().filter(|m| m.visible) {
            let (cx, cy) = (mark.cx.round() as i32, mark.cy.round() as i32);
            let r = mark.r.round().max(1.0) as i32;
            draw_circle(&mut symbols, cx, cy, r, mark.fill);
            if mark.highlighted {
                draw_ring(&mut symbols, cx, cy, r + 1, HIGHLIGHT);
            }
        }

        Self { land, symbols }
    }

    /// Render a braille canvas layer; cells without a tint use `color`
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        let rows = canvas.height().min(area.height as usize);
        let cols = canvas.width().min(area.width as usize);
        for row in 0..rows {
            for col in 0..cols {
                let Some((ch, tint)) = canvas.cell(col, row) else {
                    continue;
                };
                let fg = tint.map_or(color, |c| Color::Rgb(c.r, c.g, c.b));
                buf[(area.x + col as u16, area.y + row as u16)]
                    .set_char(ch)
                    .set_fg(fg);
            }
        }
    }
}

impl Widget for SceneLayers {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_layer(&self.land, Color::Cyan, area, buf);
        Self::render_layer(&self.symbols, Color::Magenta, area, buf);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" ", Style::default()),
        Span::styled(app.chart.status(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.status_angle(), Style::default().fg(Color::Cyan)),
        Span::styled(" ", Style::default()),
        Span::styled(app.chart.projection().name(), Style::default().fg(Color::Magenta)),
    ];
    if let Some(region) = app.hovered_region() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(region, Style::default().fg(Color::Green)));
    }
    spans.push(Span::styled(
        " | drag/h l:rotate r:reset q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
