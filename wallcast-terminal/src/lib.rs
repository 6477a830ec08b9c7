/// Terminal frontend for the wallcast renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wallcast_core::{Camera, FrameStats, Level, Renderer, RendererConfig};

pub mod canvas;
pub mod movement;

pub use canvas::TerminalCanvas;
pub use movement::Movement;

/// Interactive walk-through of a level in the terminal
pub struct TerminalApp {
    level: Level,
    camera: Camera,
    fov_degrees: f32,
    renderer: Renderer,
    canvas: TerminalCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(level: Level, config: RendererConfig, fov_degrees: f32) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let canvas = TerminalCanvas::for_terminal(columns, rows);
        let renderer = Renderer::with_config(config, canvas.width() as u32, canvas.height() as u32);
        let camera = level.spawn_camera(Camera::focal_length_for(canvas.width() as f32, fov_degrees));

        Ok(Self {
            level,
            camera,
            fov_degrees,
            renderer,
            canvas,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
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
                let event = event::read()?;
                self.handle_event(event);
            }

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
                tracing::trace!(fps = self.fps, "frame rate");
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(columns, rows) => self.resize(columns, rows),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            code => {
                if let Some(action) = Movement::from_key(code) {
                    movement::apply(&mut self.camera, &self.level, action);
                }
            }
        }
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        self.canvas.resize(columns as usize, rows as usize * 2);
        let (width, height) = (self.canvas.width(), self.canvas.height());
        self.renderer.resize(width as u32, height as u32);
        self.camera.fov = Camera::focal_length_for(width as f32, self.fov_degrees);
    }

    fn render(&mut self) -> io::Result<()> {
        self.stats = self
            .renderer
            .render(&self.level.meshes, &self.camera, &mut self.canvas);

        let mut stdout = stdout();
        self.canvas.draw_in_place(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wallcast | FPS: {:.1} | faces {}/{} clipped {} | W/S=Move A/D=Turn Z/C=Strafe Q=Quit",
                self.fps, self.stats.faces_drawn, self.stats.faces_total, self.stats.faces_clipped
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
