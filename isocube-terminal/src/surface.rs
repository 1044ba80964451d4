/// Terminal drawing surface built on crossterm
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
    QueueableCommand,
};
use isocube_core::{DrawingSurface, EdgeColor, LineId, SurfaceError, Viewport};
use nalgebra::Point2;
use std::collections::BTreeMap;
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;
use tracing::{debug, info};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

#[derive(Debug, Clone, Copy)]
struct Line {
    from: Point2<f64>,
    to: Point2<f64>,
    color: EdgeColor,
}

/// Off-screen character grid that rasterizes world-space lines
pub struct Canvas {
    cols: usize,
    rows: usize,
    viewport: Viewport,
    lines: BTreeMap<usize, Line>,
    next_id: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Option<EdgeColor>>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        let size = cols * rows;
        Self {
            cols,
            rows,
            viewport: Viewport::new(-1.0, -1.0, 1.0, 1.0),
            lines: BTreeMap::new(),
            next_id: 0,
            char_buffer: vec![' '; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.char_buffer = vec![' '; cols * rows];
        self.color_buffer = vec![None; cols * rows];
    }

    pub fn add_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: EdgeColor) -> LineId {
        let id = self.next_id;
        self.next_id += 1;
        self.lines.insert(id, Line { from, to, color });
        LineId(id)
    }

    /// Remove a line; returns false if it was not live
    pub fn remove_line(&mut self, id: LineId) -> bool {
        self.lines.remove(&id.0).is_some()
    }

    pub fn live_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<(char, Option<EdgeColor>)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let idx = row * self.cols + col;
        Some((self.char_buffer[idx], self.color_buffer[idx]))
    }

    /// Map a world point to fractional (column, row) cell coordinates,
    /// keeping the aspect ratio. `None` for an empty viewport or grid.
    pub fn to_cell(&self, point: &Point2<f64>) -> Option<(f64, f64)> {
        let vp = &self.viewport;
        if !(vp.width() > 0.0 && vp.height() > 0.0) || self.cols == 0 || self.rows == 0 {
            return None;
        }
        let scale = (self.cols as f64 / vp.width()).min(self.rows as f64 * CELL_ASPECT / vp.height());
        let center_x = (vp.x_min + vp.x_max) / 2.0;
        let center_y = (vp.y_min + vp.y_max) / 2.0;

        let col = self.cols as f64 / 2.0 + (point.x - center_x) * scale;
        let row = self.rows as f64 / 2.0 - (point.y - center_y) * scale / CELL_ASPECT;
        (col.is_finite() && row.is_finite()).then_some((col, row))
    }

    /// Redraw every live line into the buffers
    pub fn rasterize(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(None);

        let lines: Vec<Line> = self.lines.values().copied().collect();
        for line in lines {
            if let (Some(start), Some(end)) = (self.to_cell(&line.from), self.to_cell(&line.to)) {
                self.rasterize_line(start, end, line.color);
            }
        }
    }

    /// Clip a segment in cell space to the grid (Liang-Barsky)
    fn clip_to_grid(
        &self,
        (x0, y0): (f64, f64),
        (x1, y1): (f64, f64),
    ) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        let edges = [
            (-dx, x0),
            (dx, self.cols as f64 - x0),
            (-dy, y0),
            (dy, self.rows as f64 - y0),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
                if t0 > t1 {
                    return None;
                }
            }
        }
        Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
    }

    /// Bresenham's line between two cell positions, clipped to the grid
    fn rasterize_line(&mut self, start: (f64, f64), end: (f64, f64), color: EdgeColor) {
        let glyph = glyph_for(end.0 - start.0, end.1 - start.1);
        let Some((from, to)) = self.clip_to_grid(start, end) else {
            return;
        };

        // Clipped endpoints lie on the grid, so these stay small
        let max_x = self.cols as i64 - 1;
        let max_y = self.rows as i64 - 1;
        let cell = |v: f64, max: i64| (v.floor() as i64).clamp(0, max);
        let (x0, y0) = (cell(from.0, max_x), cell(from.1, max_y));
        let (x1, y1) = (cell(to.0, max_x), cell(to.1, max_y));

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, glyph, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, glyph: char, color: EdgeColor) {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return;
        }
        let idx = y as usize * self.cols + x as usize;
        self.char_buffer[idx] = glyph;
        self.color_buffer[idx] = Some(color);
    }

    /// Write the grid with its first row at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> io::Result<()> {
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, top + row as u16))?;
            for col in 0..self.cols {
                let idx = row * self.cols + col;
                match self.color_buffer[idx] {
                    Some(color) => {
                        let (r, g, b) = color.rgb();
                        writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                    }
                    None => {
                        writer.queue(ResetColor)?;
                    }
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a glyph that follows the line's slope in screen space (y down)
fn glyph_for(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax < 0.5 && ay < 0.5 {
        '+'
    } else if ax > 2.0 * ay {
        '-'
    } else if ay > 2.0 * ax {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// A [`DrawingSurface`] on the controlling terminal.
///
/// Owns raw mode, the alternate screen and mouse capture until closed. A
/// mouse click, `q`, `Esc` or `Ctrl+C` is reported as cancellation.
pub struct TerminalSurface {
    title: String,
    canvas: Canvas,
    out: Stdout,
    closed: bool,
}

impl TerminalSurface {
    /// Take over the terminal. `width` and `height` are the logical window size.
    pub fn create(title: &str, width: u32, height: u32) -> Result<Self, SurfaceError> {
        let (cols, rows) = terminal::size()
            .map_err(|e| SurfaceError::Unavailable(format!("cannot query terminal size: {e}")))?;
        if cols == 0 || rows < 2 {
            return Err(SurfaceError::Unavailable(format!(
                "terminal too small ({cols}x{rows})"
            )));
        }

        terminal::enable_raw_mode()
            .map_err(|e| SurfaceError::Unavailable(format!("cannot enable raw mode: {e}")))?;
        let mut out = stdout();
        if let Err(e) = execute!(
            out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::SetTitle(title),
            terminal::Clear(ClearType::All)
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(SurfaceError::Unavailable(format!("cannot prepare terminal: {e}")));
        }

        info!(title, width, height, cols, rows, "terminal surface created");
        Ok(Self {
            title: title.to_string(),
            // top row is reserved for the status line
            canvas: Canvas::new(cols as usize, rows as usize - 1),
            out,
            closed: false,
        })
    }

    fn ensure_open(&self) -> Result<(), SurfaceError> {
        if self.closed {
            Err(SurfaceError::Closed)
        } else {
            Ok(())
        }
    }

    fn restore_terminal(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()
    }
}

impl DrawingSurface for TerminalSurface {
    fn set_coordinate_system(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        self.ensure_open()?;
        debug!(?viewport, "coordinate system set");
        self.canvas.set_viewport(viewport);
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point2<f64>,
        to: Point2<f64>,
        color: EdgeColor,
    ) -> Result<LineId, SurfaceError> {
        self.ensure_open()?;
        Ok(self.canvas.add_line(from, to, color))
    }

    fn erase(&mut self, line: LineId) -> Result<(), SurfaceError> {
        self.ensure_open()?;
        self.canvas.remove_line(line);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.ensure_open()?;
        self.canvas.rasterize();

        // Canvas rows start below the status line
        self.canvas.draw(&mut self.out, 1)?;

        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!("{} | click or press Q to quit", self.title)),
            ResetColor
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn poll_cancellation(&mut self) -> Result<bool, SurfaceError> {
        self.ensure_open()?;
        let mut cancelled = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    cancelled = true;
                }
                Event::Key(KeyEvent {
                    code, modifiers, ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => cancelled = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        cancelled = true
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    debug!(cols, rows, "terminal resized");
                    self.canvas
                        .resize(cols as usize, (rows as usize).saturating_sub(1));
                    execute!(self.out, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }
        Ok(cancelled)
    }

    fn close(&mut self) -> Result<(), SurfaceError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.restore_terminal()?;
        info!("terminal surface closed");
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.restore_terminal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new(40, 20);
        canvas.set_viewport(Viewport::new(-20.0, -20.0, 20.0, 20.0));
        canvas
    }

    #[test]
    fn test_origin_maps_to_center() {
        assert_eq!(canvas().to_cell(&Point2::origin()), Some((20.0, 10.0)));
    }

    #[test]
    fn test_y_axis_points_up() {
        let canvas = canvas();
        let (_, top) = canvas.to_cell(&Point2::new(0.0, 10.0)).unwrap();
        let (_, bottom) = canvas.to_cell(&Point2::new(0.0, -10.0)).unwrap();
        assert!(top < bottom);
    }

    #[test]
    fn test_horizontal_line_rasterizes() {
        let mut canvas = canvas();
        canvas.add_line(Point2::new(-10.0, 0.0), Point2::new(10.0, 0.0), EdgeColor::Red);
        canvas.rasterize();
        for col in 10..=30 {
            assert_eq!(canvas.cell(col, 10), Some(('-', Some(EdgeColor::Red))));
        }
        assert_eq!(canvas.cell(9, 10), Some((' ', None)));
    }

    #[test]
    fn test_erase_clears_cells() {
        let mut canvas = canvas();
        let id = canvas.add_line(Point2::new(0.0, -8.0), Point2::new(0.0, 8.0), EdgeColor::Blue);
        canvas.rasterize();
        assert_eq!(canvas.cell(20, 10), Some(('|', Some(EdgeColor::Blue))));

        assert!(canvas.remove_line(id));
        assert!(!canvas.remove_line(id));
        canvas.rasterize();
        assert_eq!(canvas.cell(20, 10), Some((' ', None)));
        assert_eq!(canvas.live_lines(), 0);
    }

    #[test]
    fn test_lines_outside_grid_are_clipped() {
        let mut canvas = canvas();
        canvas.add_line(Point2::new(-500.0, 0.0), Point2::new(500.0, 0.0), EdgeColor::Green);
        canvas.rasterize();
        assert_eq!(canvas.cell(0, 10), Some(('-', Some(EdgeColor::Green))));
        assert_eq!(canvas.cell(39, 10), Some(('-', Some(EdgeColor::Green))));
        assert_eq!(canvas.cell(40, 10), None);
    }

    #[test]
    fn test_glyph_follows_slope() {
        assert_eq!(glyph_for(5.0, 0.0), '-');
        assert_eq!(glyph_for(0.0, -5.0), '|');
        assert_eq!(glyph_for(4.0, 4.0), '\\');
        assert_eq!(glyph_for(4.0, -4.0), '/');
        assert_eq!(glyph_for(0.1, 0.2), '+');
    }

    fn blank(canvas: &Canvas) -> bool {
        (0..canvas.rows).all(|row| (0..canvas.cols).all(|col| canvas.cell(col, row) == Some((' ', None))))
    }

    #[test]
    fn test_zero_size_viewport_draws_nothing() {
        let mut canvas = Canvas::new(80, 23);
        canvas.set_viewport(Viewport::centered(1, 1));
        assert_eq!(canvas.to_cell(&Point2::origin()), None);

        canvas.add_line(Point2::new(-81.6, 115.5), Point2::new(81.6, 47.1), EdgeColor::Red);
        canvas.rasterize();
        assert!(blank(&canvas));
    }

    #[test]
    fn test_far_off_grid_segment_is_skipped() {
        let mut canvas = canvas();
        canvas.add_line(Point2::new(1e12, 1e12), Point2::new(2e12, -1e12), EdgeColor::Red);
        canvas.rasterize();
        assert!(blank(&canvas));
    }

    #[test]
    fn test_huge_segment_crossing_grid_is_clipped() {
        let mut canvas = canvas();
        canvas.add_line(Point2::new(-1e12, 0.0), Point2::new(1e12, 0.0), EdgeColor::Teal);
        canvas.add_line(Point2::new(0.0, 1e15), Point2::new(0.0, -1e15), EdgeColor::Cyan);
        canvas.rasterize();
        for col in (0..40).filter(|&col| col != 20) {
            assert_eq!(canvas.cell(col, 10), Some(('-', Some(EdgeColor::Teal))));
        }
        for row in (0..20).filter(|&row| row != 10) {
            assert_eq!(canvas.cell(20, row), Some(('|', Some(EdgeColor::Cyan))));
        }
    }
}
