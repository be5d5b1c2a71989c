//! Main application module: wires the frame source, controller and
//! pointer target together and drives the render loop.

use crate::{
    config::Config,
    controller::GestureCursorController,
    cursor_control::X11PointerTarget,
    error::Result,
    frame_source::{open_input, FrameSource, SourcePoll},
    pointer::{LogPointerTarget, PointerTarget},
};
use log::{debug, info, warn};
use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Landmark stream path, stdin when unset
    pub input: Option<PathBuf>,
    /// Pointer output backend
    pub output: OutputMode,
    /// Stop after this long
    pub run_for: Option<Duration>,
    /// Stop once the landmark stream ends instead of idling
    pub exit_on_eof: bool,
    /// Tunables loaded from file or defaults
    pub settings: Config,
}

/// Where pointer events go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Real pointer via X11, falling back to logging if unavailable
    #[default]
    X11,
    /// Log only
    Headless,
}

/// Counters reported when the loop exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub frames_dropped: usize,
    pub ticks: usize,
    /// Smile clicks fired
    pub clicks: usize,
    /// Eyebrow-raise clicks fired
    pub context_menus: usize,
}

/// Main application struct
pub struct GestureCursorApp {
    config: AppConfig,
    controller: GestureCursorController<Box<dyn PointerTarget>>,
    source: Option<FrameSource>,
    refresh_period: Duration,
}

impl GestureCursorApp {
    /// Create a new face gesture cursor application
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing face gesture cursor");
        config.settings.validate()?;
        info!(
            "Expecting landmarks from a {}x{} camera feed",
            config.settings.camera.width, config.settings.camera.height
        );

        let (target, target_error): (Box<dyn PointerTarget>, _) = match config.output {
            OutputMode::Headless => (
                Box::new(LogPointerTarget::new(config.settings.headless_viewport())),
                None,
            ),
            OutputMode::X11 => match X11PointerTarget::new() {
                Ok(t) => (Box::new(t), None),
                Err(e) => (
                    Box::new(LogPointerTarget::new(config.settings.headless_viewport())),
                    Some(e),
                ),
            },
        };

        let filter = config.settings.create_filter()?;
        let mut controller =
            GestureCursorController::new(target, config.settings.controller_settings(), Instant::now())
                .with_filter(filter);

        if let Some(e) = target_error {
            controller.report_setup_failure("X11 pointer", &e);
        }

        let source = match open_input(config.input.as_deref()) {
            Ok((reader, delivery)) => Some(FrameSource::spawn_with(reader, delivery)),
            Err(e) => {
                controller.report_setup_failure("Landmark input", &e);
                None
            }
        };

        let refresh_period = config.settings.refresh_period();

        Ok(Self {
            config,
            controller,
            source,
            refresh_period,
        })
    }

    pub fn controller(&self) -> &GestureCursorController<Box<dyn PointerTarget>> {
        &self.controller
    }

    /// Run the render loop until the time limit, or end of input with `exit_on_eof`
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting render loop at {:?} per tick", self.refresh_period);
        self.controller.start_tracking();

        let started = Instant::now();
        let mut next_tick = started;
        let mut summary = RunSummary::default();
        let mut last_report = started;
        let mut frames_at_report = 0;

        loop {
            let now = Instant::now();
            if self.config.run_for.is_some_and(|limit| now.duration_since(started) >= limit) {
                info!("Run time limit reached");
                break;
            }

            if self.poll_frame(now, &mut summary) == SourceState::Ended && self.config.exit_on_eof {
                info!("Landmark stream finished, exiting");
                break;
            }

            self.controller.on_display_refresh(now);
            summary.ticks += 1;

            if now.duration_since(last_report) >= Duration::from_secs(1) {
                let fps = (summary.frames - frames_at_report) as f64 / now.duration_since(last_report).as_secs_f64();
                debug!("Detector frames/s: {:.1}, status: {}", fps, self.controller.status().text);
                last_report = now;
                frames_at_report = summary.frames;
            }

            next_tick += self.refresh_period;
            let after = Instant::now();
            if next_tick > after {
                thread::sleep(next_tick - after);
            } else {
                next_tick = after;
            }
        }

        if let Some(source) = &self.source {
            summary.frames_dropped = source.dropped();
        }
        (summary.clicks, summary.context_menus) = self.controller.click_counts();
        self.controller.stop_tracking();
        info!(
            "Application shutting down: {} frames, {} dropped, {} ticks",
            summary.frames, summary.frames_dropped, summary.ticks
        );
        Ok(summary)
    }

    fn poll_frame(&mut self, now: Instant, summary: &mut RunSummary) -> SourceState {
        let Some(source) = &mut self.source else {
            return SourceState::Ended;
        };

        match source.poll() {
            SourcePoll::Frame(Ok(landmarks)) => {
                summary.frames += 1;
                self.controller.on_landmarks(now, &landmarks);
                SourceState::Open
            }
            SourcePoll::Frame(Err(e)) => {
                summary.frames += 1;
                self.controller.on_frame_error(&e);
                SourceState::Open
            }
            SourcePoll::Empty => SourceState::Open,
            SourcePoll::Ended => {
                warn!("Landmark stream ended; cursor keeps its last velocity");
                summary.frames_dropped = source.dropped();
                self.source = None;
                SourceState::Ended
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceState {
    Open,
    Ended,
}
