// Windowed level: ties a session to a window, a renderer and the runner

use std::sync::Arc;

use log::{error, info, warn};
use winit::event::KeyEvent;
use winit::window::Window;

use crate::engine::game_loop::Runner;
use crate::engine::input::InputConfig;
use crate::engine::renderer::{Color, RenderError, Renderer};
use crate::game::level::LevelLayout;
use crate::game::session::{score_text, LevelSignal, Session};
use crate::game::tuning::LevelTuning;

const TITLE: &str = "Sky Run";

/// A level being played in a window
pub struct LevelApp {
    window: Arc<Window>,
    renderer: Option<Renderer>,
    runner: Runner,
    session: Session,
    score: i64,
    shown: Option<(i64, bool, bool)>,
    completed: bool,
}

impl LevelApp {
    /// Start level one in `window`
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let renderer = pollster::block_on(Renderer::new(window.clone(), Color::SKY))?;
        let session = Session::start(
            &LevelLayout::level_one(),
            LevelTuning::default(),
            InputConfig::default(),
        );
        let runner = Runner::new(session.tuning().timestep);
        let score = session.state().score();

        let mut app = Self {
            window,
            renderer: Some(renderer),
            runner,
            session,
            score,
            shown: None,
            completed: false,
        };
        app.update_title();
        Ok(app)
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        self.session.handle_key_event(event);
    }

    /// Hold the simulation while the window is in the background
    pub fn focus_changed(&mut self, focused: bool) {
        if focused {
            self.runner.resume();
        } else {
            self.runner.pause();
        }
        self.update_title();
    }

    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(size);
        }
    }

    /// Run this frame's fixed steps, then draw
    pub fn redraw(&mut self) {
        let steps = self.runner.begin_frame();
        for _ in 0..steps {
            let Some(report) = self.session.step() else {
                break;
            };
            self.score = report.score;
            if report.signals.contains(&LevelSignal::LevelComplete) {
                self.completed = true;
            }
        }
        self.update_title();

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match renderer.render(&self.session.quads(), self.session.camera()) {
            Ok(()) => {}
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("Surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(err) => error!("Render failed: {}", err),
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn update_title(&mut self) {
        let score = self.score;
        let paused = self.runner.is_paused();
        let shown = Some((score, self.completed, paused));
        if self.shown == shown {
            return;
        }
        self.shown = shown;

        let status = if self.completed {
            " - Level complete!"
        } else if paused {
            " (paused)"
        } else {
            ""
        };
        self.window
            .set_title(&format!("{} | {}{}", TITLE, score_text(score), status));
    }

    /// Stop stepping, release the renderer and tear down the session
    pub fn teardown(&mut self) {
        self.runner.stop();
        if self.renderer.take().is_some() {
            info!("Renderer released");
        }
        self.session.teardown();
    }
}

impl Drop for LevelApp {
    fn drop(&mut self) {
        self.teardown();
    }
}
