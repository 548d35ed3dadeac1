use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::error::{GameError, Result};
use crate::grid::Cell;
use crate::render::{Mark, RenderSurface};

type Coords = (u16, u16);

const SNAKE_BODY: [char; 2] = ['█', '█'];
// Terminal cells are about twice as tall as they are wide.
const CELL_WIDTH: u16 = 2;
const STATUS_LINES: u16 = 2;
const MIN_STATUS_WIDTH: u16 = 32;

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
    grid_size: u16,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

/// Terminal footprint of a grid of side `size`, borders and status included.
/// Computed wide so that no grid side can overflow it.
pub fn required_size(size: u16) -> (u32, u32) {
    let size = size as u32;
    let w = (size * CELL_WIDTH as u32 + 2).max(MIN_STATUS_WIDTH as u32);
    let h = size + 2 + STATUS_LINES as u32;
    (w, h)
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None, grid_size: 0 })
    }

    /// Fails early if a grid of side `size` would not fit.
    pub fn check_fits(&self, size: u16) -> Result<()> {
        fits((self.width, self.height), size)
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let (area_w, area_h) = if self.grid_size == 0 {
            (self.width, self.height)
        } else {
            (self.width.min(self.grid_size * CELL_WIDTH + 2), self.grid_size + 2)
        };
        let center = (area_w / 2, area_h / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.stdout.flush()?;
        Ok(())
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(&ch) = self.screen.get(self.width as usize * y as usize + x as usize) {
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }

        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        if let Some(slot) = self.screen.get_mut(self.width as usize * pos.1 as usize + pos.0 as usize) {
            *slot = ch;
        }
        Ok(())
    }

    fn print_str_at(&mut self, pos: Coords, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as u16, pos.1), ch)?;
        }
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Messages go straight to the terminal so the buffer can restore
        // what was underneath once they are hidden
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn print_cell(&mut self, cell: Cell, glyph: [char; 2]) -> Result<()> {
        let (x, y) = cell_origin(cell);
        self.print_at((x, y), glyph[0])?;
        self.print_at((x + 1, y), glyph[1])
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }

    fn draw_borders(&mut self, size: u16) -> Result<()> {
        let width = size * CELL_WIDTH + 2;
        let height = size + 2;
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn status_line(&self, n: u16) -> u16 {
        self.grid_size + 2 + n
    }

    fn print_status_line(&mut self, n: u16, text: &str) -> Result<()> {
        let y = self.status_line(n);
        let (w, _) = required_size(self.grid_size);
        let padded = format!("{text: <width$}", text = text, width = w.min(self.width as u32) as usize);
        self.print_str_at((0, y), &padded)
    }
}

impl RenderSurface for TermManager {
    fn build(&mut self, size: u16) -> Result<()> {
        self.check_fits(size)?;
        self.current_msg = None;
        self.clear()?;
        self.grid_size = size;
        self.draw_borders(size)?;
        self.flush()
    }

    fn mark(&mut self, cell: Cell, mark: Mark) -> Result<()> {
        let glyph = match mark {
            Mark::Head(heading) => [heading.glyph(); 2],
            Mark::Body => SNAKE_BODY,
        };
        self.print_cell(cell, glyph)
    }

    fn unmark(&mut self, cell: Cell) -> Result<()> {
        self.print_cell(cell, [' ', ' '])
    }

    fn show_fail_count(&mut self, fails: u32, max_fail: u32) -> Result<()> {
        self.print_status_line(0, &format!("fails: {}/{}", fails, max_fail))
    }

    fn show_status(&mut self, text: &str) -> Result<()> {
        self.print_status_line(1, text)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

fn fits(have: Coords, size: u16) -> Result<()> {
    let (need_w, need_h) = required_size(size);
    if (have.0 as u32) < need_w || (have.1 as u32) < need_h {
        return Err(GameError::TerminalTooSmall {
            have_w: have.0,
            have_h: have.1,
            need_w,
            need_h,
        });
    }
    Ok(())
}

/// Left half of the terminal slot for a 1-indexed grid cell.
fn cell_origin(cell: Cell) -> Coords {
    let x = 1 + (cell.col.max(1) as u16 - 1) * CELL_WIDTH;
    let y = cell.row.max(1) as u16;
    (x, y)
}
