/// Terminal-based wireframe viewer driving the wire3d pipeline
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{
    Connectivity, PanDirection, Pipeline, Shape, ShapeSpec, ViewCommand, ViewState,
};

pub mod renderer;

pub use renderer::LineRenderer;

/// Rows reserved for the status and help lines
const OVERLAY_ROWS: u16 = 2;

const HELP: &str = "Drag: rotate | Arrows: move | +/-: zoom | r: reset | m: mesh mode | q/Esc: quit";

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    View(ViewCommand),
    ToggleConnectivity,
    Quit,
}

/// Map a key to its action, if it has one
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') => Action::View(ViewCommand::Reset),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::View(ViewCommand::ZoomIn),
        KeyCode::Char('-') | KeyCode::Char('_') => Action::View(ViewCommand::ZoomOut),
        KeyCode::Left => Action::View(ViewCommand::Pan(PanDirection::Left)),
        KeyCode::Right => Action::View(ViewCommand::Pan(PanDirection::Right)),
        KeyCode::Up => Action::View(ViewCommand::Pan(PanDirection::Up)),
        KeyCode::Down => Action::View(ViewCommand::Pan(PanDirection::Down)),
        KeyCode::Char('m') => Action::ToggleConnectivity,
        _ => return None,
    };
    Some(action)
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    pipeline: Pipeline,
    spec: ShapeSpec,
    shape: Shape,
    view: ViewState,
    connectivity: Connectivity,
    renderer: LineRenderer,
    /// Last cell seen while the left button is held
    drag_anchor: Option<(u16, u16)>,
    /// Why the current frame could not be drawn, if it couldn't
    frame_error: Option<String>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(pipeline: Pipeline, spec: ShapeSpec, connectivity: Connectivity) -> io::Result<Self> {
        let shape = spec
            .build()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let (width, height) = terminal::size()?;
        let config = pipeline.config();
        let renderer = LineRenderer::new(
            width as usize,
            height.saturating_sub(OVERLAY_ROWS) as usize,
            config.canvas_width,
            config.canvas_height,
        );

        Ok(Self {
            pipeline,
            spec,
            shape,
            view: ViewState::new(),
            connectivity,
            renderer,
            drag_anchor: None,
            frame_error: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        log::info!("viewing {}", self.spec);

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event so drags stay responsive
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
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
            }) => {
                if let Some(action) = action_for_key(code) {
                    self.perform(action);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.renderer
                    .resize(width as usize, height.saturating_sub(OVERLAY_ROWS) as usize);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let cell = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag_anchor = Some(cell),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((column, row)) = self.drag_anchor {
                    let (dx, dy) = self.renderer.cells_to_canvas(
                        f64::from(cell.0) - f64::from(column),
                        f64::from(cell.1) - f64::from(row),
                    );
                    self.perform(Action::View(ViewCommand::Drag { dx, dy }));
                }
                self.drag_anchor = Some(cell);
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_anchor = None,
            MouseEventKind::ScrollUp => self.perform(Action::View(ViewCommand::ZoomIn)),
            MouseEventKind::ScrollDown => self.perform(Action::View(ViewCommand::ZoomOut)),
            _ => {}
        }
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleConnectivity => {
                self.connectivity = self.connectivity.toggled();
                log::debug!("connectivity now {:?}", self.connectivity);
            }
            Action::View(command) => self.view.apply(command, self.pipeline.config()),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        match self.pipeline.frame(&self.shape, &self.view, self.connectivity) {
            Ok(frame) => {
                self.renderer.clear();
                self.renderer.draw_frame(&frame);
                self.frame_error = None;
            }
            Err(e) => {
                // Keep the last good frame on screen
                if self.frame_error.is_none() {
                    log::warn!("frame rejected: {e}");
                }
                self.frame_error = Some(e.to_string());
            }
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let status = match &self.frame_error {
            Some(message) => format!("{} | {message}", self.spec.kind()),
            None => format!(
                "{} | rot {:.1},{:.1} | zoom {:.2} | pan {:.0},{:.0} | {:?} | FPS {:.1}",
                self.spec.kind(),
                self.view.angle_x,
                self.view.angle_y,
                self.view.zoom,
                self.view.pan_x,
                self.view.pan_y,
                self.connectivity,
                self.fps
            ),
        };
        let (_, height) = terminal::size()?;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(if self.frame_error.is_some() {
                Color::Red
            } else {
                Color::Yellow
            }),
            Print(status),
            cursor::MoveTo(0, height.saturating_sub(1)),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(HELP),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(action_for_key(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyCode::Char('=')),
            Some(Action::View(ViewCommand::ZoomIn))
        );
        assert_eq!(
            action_for_key(KeyCode::Char('_')),
            Some(Action::View(ViewCommand::ZoomOut))
        );
        assert_eq!(
            action_for_key(KeyCode::Up),
            Some(Action::View(ViewCommand::Pan(PanDirection::Up)))
        );
        assert_eq!(
            action_for_key(KeyCode::Char('r')),
            Some(Action::View(ViewCommand::Reset))
        );
        assert_eq!(
            action_for_key(KeyCode::Char('m')),
            Some(Action::ToggleConnectivity)
        );
        assert_eq!(action_for_key(KeyCode::Char('x')), None);
    }
}
