/// Terminal gallery of the glsketch rendering demos
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod demos;
pub mod gallery;
pub mod renderer;

pub use gallery::{Demo, DrawCall, Gallery, Indices, Surface};
pub use renderer::AsciiRenderer;

/// Terminal rows kept for the title and description lines
const OVERLAY_ROWS: u16 = 2;

/// Main application struct for the terminal gallery
pub struct TerminalApp {
    gallery: Gallery,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mut gallery: Gallery) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let renderer = AsciiRenderer::new(width as usize, height.saturating_sub(OVERLAY_ROWS) as usize);
        gallery.resize(renderer.aspect());

        Ok(Self {
            gallery,
            renderer,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.gallery.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Tab | KeyCode::Right => {
                    self.gallery.next();
                }
                KeyCode::Backspace | KeyCode::Left => {
                    self.gallery.previous();
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.renderer
                    .resize(width as usize, height.saturating_sub(OVERLAY_ROWS) as usize);
                self.gallery.resize(self.renderer.aspect());
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.gallery.render(&mut self.renderer);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, OVERLAY_ROWS))?;
        self.renderer.draw(&mut stdout)?;

        // Title and description overlay
        let demo = self.gallery.current();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} ({}/{}) | FPS: {:.1} | Space/Enter=Next Backspace=Previous Q=Quit",
                demo.title(),
                self.gallery.index() + 1,
                self.gallery.len(),
                self.fps
            )),
            cursor::MoveTo(0, OVERLAY_ROWS - 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Grey),
            Print(demo.description()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
