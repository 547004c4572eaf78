use crate::config::SessionConfig;
use crate::foundation::error::ScanlineResult;
use crate::input::{InputFrame, Key};
use crate::layout::Layout;
use crate::recreate::params::RecreationParameters;
use crate::record::recorder::{CaptureStatus, FrameRecorder, RecordOutcome};
use crate::render::present::Presenter;
use crate::render::surface::Surface;
use crate::render::text::LabelFont;
use crate::render::texture::Texture;
use crate::source::channel::Channel;
use crate::source::decode::SourceImage;
use crate::view::{AnalyzerView, View, ViewKind};

/// Display textures of the four selectable channels, scaled to the analyzer layout.
#[derive(Clone, Debug)]
pub struct ChannelTextures {
    pub red: Texture,
    pub green: Texture,
    pub blue: Texture,
    pub original: Texture,
}

impl ChannelTextures {
    fn new(source: &SourceImage, width: u32, height: u32) -> Self {
        let channels = source.split_channels();
        let upload =
            |c: Channel| Texture::from_image_resized(channels.image_for(c, source), width, height);
        Self {
            red: upload(Channel::Red),
            green: upload(Channel::Green),
            blue: upload(Channel::Blue),
            original: upload(Channel::Original),
        }
    }

    /// Texture displayed for `channel`.
    pub fn for_channel(&self, channel: Channel) -> &Texture {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
            Channel::Original => &self.original,
        }
    }
}

/// State shared by every view for the lifetime of a session.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: SessionConfig,
    /// Source after auto-crop.
    pub source: SourceImage,
    pub textures: ChannelTextures,
    pub layout: Layout,
    /// Parameters carried from one recreation to the next.
    pub params: RecreationParameters,
}

impl AppState {
    /// Validate `config`, crop the source border and prepare the channel textures.
    #[tracing::instrument(skip_all, fields(width = source.width(), height = source.height()))]
    pub fn new(mut source: SourceImage, config: SessionConfig) -> ScanlineResult<Self> {
        config.validate()?;
        if let Some(bounds) = source.auto_crop(config.crop_threshold) {
            tracing::info!(width = bounds.width, height = bounds.height, "source cropped");
        }
        let layout = Layout::fit(source.width(), source.height(), &config);
        let textures = ChannelTextures::new(&source, layout.final_width, layout.final_height);
        let params = RecreationParameters::from_config(&config);
        Ok(Self {
            config,
            source,
            textures,
            layout,
            params,
        })
    }
}

/// The interactive session: owns the state, the active view, the draw surface and the recorder.
#[derive(Debug)]
pub struct App {
    state: AppState,
    view: View,
    surface: Surface,
    recorder: Option<FrameRecorder>,
    last_outcome: Option<RecordOutcome>,
    close_requested: bool,
    ticks: u64,
}

impl App {
    /// Prepare the session state and start in the analyzer.
    ///
    /// Labels are drawn only when `config.font_path` names a readable font.
    pub fn new(source: SourceImage, config: SessionConfig) -> ScanlineResult<Self> {
        let state = AppState::new(source, config)?;
        let view = View::Analyzer(AnalyzerView::new(&state.config));
        let mut surface = Surface::new(state.layout.screen_width, state.layout.screen_height);
        match &state.config.font_path {
            Some(path) => surface = surface.with_label_font(LabelFont::from_path(path)?),
            None => tracing::debug!("no label font configured; labels are not drawn"),
        }
        Ok(Self {
            state,
            view,
            surface,
            recorder: None,
            last_outcome: None,
            close_requested: false,
            ticks: 0,
        })
    }

    /// Enable recording; `R` toggles it.
    pub fn with_recorder(mut self, recorder: FrameRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Shared session state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Active view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Which view is active.
    pub fn view_kind(&self) -> ViewKind {
        self.view.kind()
    }

    /// Frame drawn by the last tick.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Configured recorder, if recording is enabled.
    pub fn recorder(&self) -> Option<&FrameRecorder> {
        self.recorder.as_ref()
    }

    /// Outcome of the most recently finished recording.
    pub fn last_record_outcome(&self) -> Option<&RecordOutcome> {
        self.last_outcome.as_ref()
    }

    /// Whether `Escape` was pressed.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Update the active view, draw it and feed the recorder.
    pub fn tick(&mut self, input: &InputFrame) -> ScanlineResult<&Surface> {
        if let Some(next) = self.view.update(&mut self.state, input)? {
            tracing::info!(from = ?self.view.kind(), to = ?next.kind(), "view switched");
            self.view = next;
        }
        self.view.draw(&self.state, &mut self.surface)?;

        if input.is_pressed(Key::R) {
            self.toggle_recording();
        }
        if input.is_pressed(Key::Escape) {
            self.close_requested = true;
        }
        self.record_frame();

        self.ticks += 1;
        Ok(&self.surface)
    }

    /// Drive the app with `frames`, presenting each tick, until input runs out or `Escape`.
    ///
    /// Returns the number of ticks run.
    pub fn run<I>(&mut self, frames: I, presenter: &mut dyn Presenter) -> ScanlineResult<u64>
    where
        I: IntoIterator<Item = InputFrame>,
    {
        let start = self.ticks;
        for input in frames {
            let surface = self.tick(&input)?;
            presenter.present(surface)?;
            if self.close_requested {
                tracing::debug!("close requested");
                break;
            }
        }
        Ok(self.ticks - start)
    }

    /// Stop an active recording and return its outcome.
    pub fn finish(&mut self) -> Option<RecordOutcome> {
        let rec = self.recorder.as_mut().filter(|r| r.is_recording())?;
        match rec.stop() {
            Ok(outcome) => {
                self.last_outcome = Some(outcome.clone());
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to stop recording");
                None
            }
        }
    }

    fn toggle_recording(&mut self) {
        let Some(rec) = self.recorder.as_mut() else {
            tracing::warn!("recording requested but no recorder is configured");
            return;
        };
        if rec.is_recording() {
            match rec.stop() {
                Ok(outcome) => self.last_outcome = Some(outcome),
                Err(e) => tracing::warn!(error = %e, "failed to stop recording"),
            }
        } else if let Err(e) = rec.start() {
            tracing::warn!(error = %e, "failed to start recording");
        }
    }

    fn record_frame(&mut self) {
        let Some(rec) = self.recorder.as_mut().filter(|r| r.is_recording()) else {
            return;
        };
        match rec.capture_frame(self.surface.pixels()) {
            Ok(CaptureStatus::Captured { .. }) => {}
            Ok(CaptureStatus::Finished(outcome)) => self.last_outcome = Some(outcome),
            Err(e) => tracing::warn!(error = %e, "frame not recorded"),
        }
    }
}
