//! Scripted cover scenarios driven by a fixed frame clock.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use covermorph_core::{
    CoverCallbacks, CoverView, ImageTransform, ImageTransitionHost, SavedState, SavedStateEnvelope, Shape,
};
use covermorph_render::{CoverImage, RecordingRenderer, RenderContext, Renderer};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::AppResult;

/// Longest an `idle` step waits before giving up, in seconds of frame time.
const IDLE_LIMIT_SECS: u64 = 30;

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Morph,
    Start,
    Stop,
    /// Run frames for this many milliseconds.
    Wait(u64),
    /// Run frames until nothing is animating and no callback is pending.
    Idle,
}

/// The script used when the configuration has none.
pub fn default_script() -> Vec<Step> {
    vec![
        Step::Morph,
        Step::Idle,
        Step::Start,
        Step::Wait(1200),
        Step::Stop,
        Step::Idle,
        Step::Morph,
        Step::Idle,
    ]
}

/// A callback observed during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverEvent {
    MorphEnd { frame: u64, shape: Shape },
    RotateEnd { frame: u64, running: bool },
}

impl fmt::Display for CoverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverEvent::MorphEnd { frame, shape } => write!(f, "frame {:>4}: morph end, shape {:?}", frame, shape),
            CoverEvent::RotateEnd { frame, running } => {
                write!(f, "frame {:>4}: rotate end, running {}", frame, running)
            }
        }
    }
}

#[derive(Clone, Default)]
struct EventLog {
    frame: Rc<Cell<u64>>,
    events: Rc<RefCell<Vec<CoverEvent>>>,
}

impl CoverCallbacks for EventLog {
    fn on_morph_end(&mut self, view: &mut CoverView) {
        let event = CoverEvent::MorphEnd {
            frame: self.frame.get(),
            shape: view.shape(),
        };
        log::info!("{}", event);
        self.events.borrow_mut().push(event);
    }

    fn on_rotate_end(&mut self, view: &mut CoverView) {
        let event = CoverEvent::RotateEnd {
            frame: self.frame.get(),
            running: view.is_running(),
        };
        log::info!("{}", event);
        self.events.borrow_mut().push(event);
    }
}

/// Outcome of a scenario run.
#[derive(Debug, Clone)]
pub struct Report {
    pub frames: u64,
    pub events: Vec<CoverEvent>,
    pub saved: SavedState,
    /// Draw commands issued on the last frame.
    pub last_frame_commands: usize,
}

impl Report {
    /// Saved state wrapped with run metadata as the parent state.
    pub fn envelope(&self) -> SavedStateEnvelope {
        SavedStateEnvelope::new(self.saved).with_parent(serde_json::json!({ "frames": self.frames }))
    }
}

/// Drives a cover through a script, rendering every frame.
pub struct Runner {
    view: CoverView,
    image: Option<CoverImage>,
    image_transform: ImageTransform,
    renderer: RecordingRenderer,
    log: EventLog,
    frame_dt: Duration,
    fps: u64,
}

impl Runner {
    pub fn new(app: &AppConfig) -> AppResult<Self> {
        app.validate()?;
        let mut view = CoverView::from_style(app.config.clone(), &app.style)?;
        view.set_bounds(app.bounds());

        let host = ImageTransitionHost::new();
        let image_transform = host.transform();
        view.set_transition_host(host);

        let log = EventLog::default();
        view.set_callbacks(log.clone());

        let image = match &app.image {
            Some(path) => Some(CoverImage::open(path)?),
            None => None,
        };

        Ok(Self {
            view,
            image,
            image_transform,
            renderer: RecordingRenderer::new(),
            log,
            frame_dt: Duration::from_secs_f64(1.0 / app.fps as f64),
            fps: app.fps as u64,
        })
    }

    pub fn view(&self) -> &CoverView {
        &self.view
    }

    /// Run `script` and report what happened.
    pub fn run(&mut self, script: &[Step]) -> Report {
        for &step in script {
            log::debug!("Step {:?} at frame {}", step, self.log.frame.get());
            match step {
                Step::Morph => self.view.morph(),
                Step::Start => self.view.start(),
                Step::Stop => self.view.stop(),
                Step::Wait(ms) => {
                    let frames = (ms * self.fps).div_ceil(1000);
                    for _ in 0..frames {
                        self.tick();
                    }
                }
                Step::Idle => {
                    let limit = IDLE_LIMIT_SECS * self.fps;
                    let mut frames = 0;
                    while self.view.needs_frame() && frames < limit {
                        self.tick();
                        frames += 1;
                    }
                    if self.view.needs_frame() {
                        log::warn!("Cover still animating after {}s; moving on", IDLE_LIMIT_SECS);
                    }
                }
            }
        }

        Report {
            frames: self.log.frame.get(),
            events: self.log.events.borrow().clone(),
            saved: self.view.save_state(),
            last_frame_commands: self.renderer.commands().len(),
        }
    }

    fn tick(&mut self) {
        self.log.frame.set(self.log.frame.get() + 1);
        self.view.advance(self.frame_dt);

        let frame = self.view.frame();
        let mut ctx = RenderContext::new(&frame).with_image_transform(&self.image_transform);
        if let Some(image) = &self.image {
            ctx = ctx.with_image(image);
        }
        self.renderer.render_cover(&ctx);
        self.view.take_invalidated();
    }
}
