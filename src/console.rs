use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, terminal,
};
use sparselife::{LifeEngine, LiveCells, Pos2};
use std::{io, time::Duration};

const ALIVE_GLYPH: &[u8] = "█".as_bytes();
const DEAD_GLYPH: &[u8] = b" ";

pub enum ConsoleCommand {
    Exit,
    /// Advance a single generation
    Step,
    /// Start or stop timed generations
    ToggleRun,
    Faster,
    Slower,
    /// Flip the cell under the mouse
    Toggle(Pos2),
    Handled,
}

/// Cells to clear and cells to paint to turn `drawn` into `next`
pub fn diff(drawn: &LiveCells, next: &LiveCells) -> (Vec<Pos2>, Vec<Pos2>) {
    let cleared = drawn.difference(next).copied().collect();
    let painted = next.difference(drawn).copied().collect();
    (cleared, painted)
}

/// Maps a terminal cell to a grid cell, [`None`] on the footer row
fn screen_to_cell(tl: Pos2, column: u16, row: u16, rows: u16) -> Option<Pos2> {
    (row < rows.saturating_sub(1)).then(|| {
        tl + Pos2 {
            x: i64::from(column),
            y: i64::from(row),
        }
    })
}

/// Interactive terminal view
///
/// Remembers which cells are on screen so a new generation only touches the
/// cells that changed. Scrolling or resizing falls back to a full redraw.
pub struct ConsoleRender {
    tl: Pos2,
    status: String,
    report: String,
    drawn: LiveCells,
    full_redraw: bool,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self {
            tl: Pos2::default(),
            status: String::new(),
            report: String::new(),
            drawn: LiveCells::default(),
            full_redraw: true,
        })
    }

    pub fn render(&mut self, game: &LifeEngine) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let view_rows = rows.saturating_sub(1);
        let br = self.tl
            + Pos2 {
                x: i64::from(cols),
                y: i64::from(view_rows),
            };
        let visible: LiveCells = game.window(self.tl, br).iter().copied().collect();

        let mut stdout = io::stdout();
        if self.full_redraw {
            queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
            self.drawn.clear();
            self.full_redraw = false;
        }

        let (cleared, painted) = diff(&self.drawn, &visible);
        for (cells, glyph) in [(cleared, DEAD_GLYPH), (painted, ALIVE_GLYPH)] {
            for cell in cells {
                let cell = cell - self.tl;
                queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
                io::Write::write_all(&mut stdout, glyph)?;
            }
        }
        self.drawn = visible;

        // write footer
        queue!(
            stdout,
            cursor::MoveTo(0, view_rows),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        let footer = format!("{} {}", self.status, self.report);
        let footer: String = footer.chars().take(usize::from(cols)).collect();
        io::Write::write_all(&mut stdout, footer.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    /// Waits up to `timeout` for one input event
    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let cmd = match event::read()? {
            event::Event::Key(key) if key.kind != KeyEventKind::Release => self.on_key(key),
            event::Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let (_, rows) = terminal::size()?;
                match screen_to_cell(self.tl, column, row, rows) {
                    Some(cell) => ConsoleCommand::Toggle(cell),
                    None => ConsoleCommand::Handled,
                }
            }
            event::Event::Resize(..) => {
                self.full_redraw = true;
                ConsoleCommand::Handled
            }
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    fn on_key(&mut self, key: KeyEvent) -> ConsoleCommand {
        match key {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => ConsoleCommand::Exit,
            KeyEvent { code, .. } => match code {
                KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
                KeyCode::Char(' ') => ConsoleCommand::ToggleRun,
                KeyCode::Char('n') => ConsoleCommand::Step,
                KeyCode::Char('+' | '=') => ConsoleCommand::Faster,
                KeyCode::Char('-') => ConsoleCommand::Slower,
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    match code {
                        KeyCode::Up => self.tl.y -= 1,
                        KeyCode::Down => self.tl.y += 1,
                        KeyCode::Left => self.tl.x -= 1,
                        _ => self.tl.x += 1,
                    }
                    self.full_redraw = true;
                    ConsoleCommand::Handled
                }
                _ => ConsoleCommand::Handled,
            },
        }
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // best effort, the process is usually exiting anyway
        if let Err(err) = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        ) {
            log::warn!("failed to restore terminal: {err}");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("failed to disable raw mode: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(i64, i64)]) -> LiveCells {
        cells.iter().copied().map(Pos2::from).collect()
    }

    fn sorted(mut cells: Vec<Pos2>) -> Vec<Pos2> {
        cells.sort();
        cells
    }

    #[test]
    fn diff_clears_left_and_paints_entered() {
        let horizontal = set(&[(0, 0), (1, 0), (2, 0)]);
        let vertical = set(&[(1, -1), (1, 0), (1, 1)]);

        let (cleared, painted) = diff(&horizontal, &vertical);

        assert_eq!(sorted(cleared), vec![Pos2::new(0, 0), Pos2::new(2, 0)]);
        assert_eq!(sorted(painted), vec![Pos2::new(1, -1), Pos2::new(1, 1)]);
    }

    #[test]
    fn diff_of_identical_sets_is_empty() {
        let block = set(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let (cleared, painted) = diff(&block, &block);

        assert!(cleared.is_empty() && painted.is_empty());
    }

    #[test]
    fn screen_maps_through_viewport() {
        let tl = Pos2::new(-10, 1_000_000);

        assert_eq!(screen_to_cell(tl, 3, 4, 24), Some(Pos2::new(-7, 1_000_004)));
        // footer row
        assert_eq!(screen_to_cell(tl, 3, 23, 24), None);
    }
}
