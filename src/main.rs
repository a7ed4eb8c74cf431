//! SplitClip: pick a main video and a template, get a simulated split-screen short.

// Static templates, captions and phases
mod catalog;
// Caption/hashtag selection for the finished result
mod composer;
// Environment configuration
mod config;
// Session state and its transitions
mod controller;
// Error types
mod error;
// Gemini caption and Veo background client
mod genai;
// Link/file input handling
mod input;
// Data models
mod model;
// Split-screen playback state
mod playback;
// Fake processing timeline
mod progress;
// Thumbnail fetching
mod thumbnail;

use std::{
    collections::HashMap,
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use eframe::{App, Frame, egui};
use egui::{Align2, Color32, ColorImage, RichText, Stroke, TextureOptions, Visuals};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rfd::FileDialog;
use tokio::{
    runtime::Runtime,
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use catalog::{TEMPLATES, initial_phases};
use composer::RandomPicker;
use config::AppConfig;
use controller::Session;
use genai::GenAiClient;
use input::{InputCollector, InputTab, VIDEO_EXTENSIONS, media_from_drop};
use model::{CaptionMetadata, MediaFile, PhaseStatus, ProgressPhase, ViewState};
use playback::{PlaybackView, VideoSlot, open_in_system_player, override_button_label, template_file_name};
use progress::{TokioClock, simulate};

// Global Tokio runtime stored in a OnceCell for lazy init
static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

const ACCENT: Color32 = Color32::from_rgb(139, 92, 246);
const GREEN: Color32 = Color32::from_rgb(74, 222, 128);
const TEXT_DIM: Color32 = Color32::from_rgb(113, 113, 122);
const CARD_BG: Color32 = Color32::from_rgb(24, 24, 27);
const WARN_TEXT: Color32 = Color32::from_rgb(234, 179, 8);

const REJECTED_DROP_ALERT: &str = "Please upload a video file";

/// Program entry point: loads config, sets up logging and the runtime, launches the GUI
fn main() -> Result<(), eframe::Error> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    init_tracing(config.log_json);

    let rt = match Runtime::new() {
        Ok(rt) => Arc::new(rt),
        Err(e) => {
            error!("Failed to start tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    let _ = RUNTIME.set(rt);

    info!(ai_enabled = config.api_key.is_some(), "starting SplitClip");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SplitClip")
            .with_inner_size([1120.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "SplitClip",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(Visuals::dark());
            let app = SplitClipApp::new(&config);
            app.fetch_thumbnails(&cc.egui_ctx);
            Box::new(app)
        }),
    )
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("splitclip=info"));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(env_filter)
            .init();
    }
}

/// Runs `fut` on the global runtime.
fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match RUNTIME.get() {
        Some(rt) => {
            rt.spawn(fut);
        }
        None => error!("runtime not initialised; task dropped"),
    }
}

/// Messages from the running simulation
enum SimEvent {
    Phases(Vec<ProgressPhase>),
    Done,
}

/// Replies from the optional AI actions
enum AiEvent {
    Caption(CaptionMetadata),
    Background(Result<Option<String>, String>),
}

/// Deferred UI actions, applied after the frame's closures release their borrows
enum Action {
    SubmitUrl,
    PickSource,
    SelectTemplate(&'static model::TemplateEntry),
    Generate,
    TogglePlay,
    ToggleMute,
    Open(bool),
    OverrideTemplate,
    AiCaption,
    AiBackground,
    Reset,
}

/// Application state for the GUI
struct SplitClipApp {
    session: Session,
    input: InputCollector,
    /// Present only while the result screen is shown
    playback: Option<PlaybackView>,
    /// Blocking message box text
    alert: Option<String>,
    genai: Arc<GenAiClient>,
    /// Cached textures for template thumbnails
    thumbnails: HashMap<&'static str, egui::TextureHandle>,
    /// Incoming thumbnail fetch results (template id, image)
    thumbnail_results: Arc<Mutex<Vec<(&'static str, ColorImage)>>>,
    /// Phase updates from the running simulation
    sim_rx: Option<UnboundedReceiver<SimEvent>>,
    ai_tx: UnboundedSender<AiEvent>,
    ai_rx: UnboundedReceiver<AiEvent>,
    ai_busy: bool,
    ai_status: Option<String>,
    /// Prompt for the AI background; blank uses the default prompt
    bg_prompt: String,
}

impl SplitClipApp {
    fn new(config: &AppConfig) -> Self {
        let (ai_tx, ai_rx) = unbounded_channel();
        Self {
            session: Session::default(),
            input: InputCollector::default(),
            playback: None,
            alert: None,
            genai: Arc::new(GenAiClient::new(config)),
            thumbnails: HashMap::new(),
            thumbnail_results: Arc::new(Mutex::new(Vec::new())),
            sim_rx: None,
            ai_tx,
            ai_rx,
            ai_busy: false,
            ai_status: None,
            bg_prompt: String::new(),
        }
    }

    /// Fetch every template thumbnail on the blocking pool
    fn fetch_thumbnails(&self, ctx: &egui::Context) {
        let Some(rt) = RUNTIME.get() else { return };
        for template in TEMPLATES.iter() {
            let results = Arc::clone(&self.thumbnail_results);
            let ctx_c = ctx.clone();
            let (id, url) = (template.id, template.thumbnail_url);
            rt.spawn_blocking(move || {
                if let Some(img) = thumbnail::fetch_thumbnail(url) {
                    results.lock().push((id, img));
                    ctx_c.request_repaint();
                }
            });
        }
    }

    fn poll_channels(&mut self, ctx: &egui::Context) {
        self.drain_simulation();
        self.drain_ai_replies();

        for (id, img) in self.thumbnail_results.lock().drain(..) {
            let tex = ctx.load_texture(id, img, TextureOptions::default());
            self.thumbnails.insert(id, tex);
        }
    }

    fn drain_simulation(&mut self) {
        let mut finished = false;
        if let Some(rx) = self.sim_rx.as_mut() {
            while let Ok(event) = rx.try_recv() {
                match event {
                    SimEvent::Phases(phases) => self.session.apply_phases(phases),
                    SimEvent::Done => finished = true,
                }
            }
        }
        if finished {
            self.sim_rx = None;
            if self.session.complete(&mut RandomPicker) {
                self.playback = self.session.result.as_ref().map(PlaybackView::new);
            }
        }
    }

    fn drain_ai_replies(&mut self) {
        while let Ok(event) = self.ai_rx.try_recv() {
            self.ai_busy = false;
            match event {
                AiEvent::Caption(meta) => {
                    self.ai_status = Some("Caption updated".to_string());
                    self.session.apply_caption_metadata(meta);
                }
                AiEvent::Background(Ok(Some(uri))) => {
                    self.ai_status = Some("Background generated".to_string());
                    if let Some(playback) = self.playback.as_mut() {
                        playback.set_template_uri(uri);
                    }
                }
                AiEvent::Background(Ok(None)) => {
                    self.ai_status = Some("No video was returned".to_string());
                }
                AiEvent::Background(Err(msg)) => self.ai_status = Some(msg),
            }
        }
    }

    /// Window-level drag and drop, active on the upload tab of the input screen
    fn handle_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) =
            ctx.input(|i| (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone()));
        self.input.drag_active = self.accepts_drops() && hovering;

        if let Some(file) = dropped.first().and_then(media_from_drop) {
            self.on_drop(file);
        }
    }

    /// Drops count only on the upload tab of the input screen
    fn accepts_drops(&self) -> bool {
        self.session.view == ViewState::Input && self.input.tab == InputTab::Upload
    }

    /// Stores a dropped video as the source, or raises the rejection alert.
    /// Returns true when the alert was raised.
    fn on_drop(&mut self, file: MediaFile) -> bool {
        if !self.accepts_drops() {
            return false;
        }
        match self.input.drop_file(file) {
            Ok(source) => {
                self.session.submit_input(source);
                false
            }
            Err(_) => {
                self.alert = Some(REJECTED_DROP_ALERT.to_string());
                true
            }
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::SubmitUrl => {
                if let Some(source) = self.input.submit_url() {
                    self.session.submit_input(source);
                }
            }
            Action::PickSource => {
                if let Some(path) = FileDialog::new().add_filter("Video", VIDEO_EXTENSIONS).pick_file() {
                    let source = self.input.pick_file(MediaFile::from_path(path));
                    self.session.submit_input(source);
                }
            }
            Action::SelectTemplate(template) => self.session.select_template(template),
            Action::Generate => self.start_generation(),
            Action::TogglePlay => {
                if let Some(p) = self.playback.as_mut() {
                    p.toggle_play();
                }
            }
            Action::ToggleMute => {
                if let Some(p) = self.playback.as_mut() {
                    p.toggle_mute();
                }
            }
            Action::Open(top) => {
                if let Some(p) = self.playback.as_ref() {
                    let slot = if top { &p.top } else { &p.bottom };
                    if let Err(e) = open_in_system_player(slot.src.uri()) {
                        warn!("{}", e);
                    }
                }
            }
            Action::OverrideTemplate => {
                if let Some(path) = FileDialog::new().add_filter("Video", VIDEO_EXTENSIONS).pick_file() {
                    if let Some(p) = self.playback.as_mut() {
                        p.override_template(&MediaFile::from_path(path));
                    }
                }
            }
            Action::AiCaption => self.request_ai_caption(),
            Action::AiBackground => self.request_ai_background(),
            Action::Reset => {
                self.session.reset();
                self.input = InputCollector::default();
                self.playback = None;
                self.sim_rx = None;
                // replies still in flight land in the dropped receiver
                let (ai_tx, ai_rx) = unbounded_channel();
                self.ai_tx = ai_tx;
                self.ai_rx = ai_rx;
                self.ai_busy = false;
                self.ai_status = None;
            }
        }
    }

    fn start_generation(&mut self) {
        if !self.session.begin_generate() {
            return;
        }
        let (tx, rx) = unbounded_channel();
        self.sim_rx = Some(rx);
        spawn(async move {
            let mut phases = initial_phases();
            simulate(&TokioClock, &mut phases, |p| {
                let _ = tx.send(SimEvent::Phases(p.to_vec()));
            })
            .await;
            let _ = tx.send(SimEvent::Done);
        });
    }

    fn request_ai_caption(&mut self) {
        let Some(template) = self.session.template else { return };
        self.ai_busy = true;
        self.ai_status = Some("Writing caption…".to_string());
        let client = Arc::clone(&self.genai);
        let tx = self.ai_tx.clone();
        let topic = template.name.to_string();
        spawn(async move {
            let meta = client.generate_caption_metadata(&topic).await;
            let _ = tx.send(AiEvent::Caption(meta));
        });
    }

    fn request_ai_background(&mut self) {
        self.ai_busy = true;
        self.ai_status = Some("Generating background, this can take minutes…".to_string());
        let client = Arc::clone(&self.genai);
        let tx = self.ai_tx.clone();
        let prompt = self.bg_prompt.clone();
        spawn(async move {
            let reply = client
                .generate_background_video(&prompt, &TokioClock)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AiEvent::Background(reply));
        });
    }

    fn input_screen(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("SPLIT SCREEN GENERATOR").small().color(TEXT_DIM));
            ui.label(RichText::new("Viral SplitClip Maker").size(40.0).strong());
            ui.label(
                RichText::new("Select a Main Video (Top) and we will stitch it with a high-retention Template (Bottom).")
                    .color(TEXT_DIM),
            );
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.input.tab, InputTab::Link, "Paste YouTube Link");
                ui.selectable_value(&mut self.input.tab, InputTab::Upload, "Upload Video File");
            });
            ui.add_space(8.0);

            match self.input.tab {
                InputTab::Link => {
                    ui.horizontal(|ui| {
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.input.url)
                                .hint_text("Paste YouTube Shorts or Video URL...")
                                .desired_width(420.0),
                        );
                        let entered = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if ui.button("Import").clicked() || entered {
                            actions.push(Action::SubmitUrl);
                        }
                    });
                }
                InputTab::Upload => {
                    let stroke = if self.input.drag_active {
                        Stroke::new(2.0, ACCENT)
                    } else {
                        Stroke::new(1.0, TEXT_DIM)
                    };
                    egui::Frame::none()
                        .stroke(stroke)
                        .rounding(12.0)
                        .inner_margin(24.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new("Upload Main Video").strong().size(18.0));
                            ui.label(RichText::new("Drag & Drop MP4 file here").color(TEXT_DIM));
                            if ui.button("Browse…").clicked() {
                                actions.push(Action::PickSource);
                            }
                        });
                }
            }

            if let Some(source) = &self.session.source {
                ui.add_space(6.0);
                ui.label(RichText::new(format!("Main video: {}", source.describe())).color(GREEN));
            }
        });

        ui.add_space(24.0);
        ui.separator();

        let has_source = self.session.source.is_some();
        let heading = ui.heading("Choose Bottom Video");
        if self.session.take_due_scroll(Instant::now()) {
            heading.scroll_to_me(Some(egui::Align::Min));
        }

        ui.add_enabled_ui(has_source, |ui| {
            ui.horizontal_wrapped(|ui| {
                for template in TEMPLATES.iter() {
                    let selected = self.session.template.is_some_and(|t| t.id == template.id);
                    let stroke = if selected {
                        Stroke::new(3.0, ACCENT)
                    } else {
                        Stroke::new(1.0, CARD_BG)
                    };
                    let card = egui::Frame::none()
                        .fill(CARD_BG)
                        .stroke(stroke)
                        .rounding(10.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.set_width(200.0);
                            match self.thumbnails.get(template.id) {
                                Some(tex) => {
                                    ui.add(egui::Image::new(tex).fit_to_exact_size(egui::vec2(200.0, 112.0)));
                                }
                                None => {
                                    ui.add_sized([200.0, 112.0], egui::Spinner::new());
                                }
                            }
                            ui.label(RichText::new(template.name).strong());
                            ui.label(RichText::new(template.description).small().color(TEXT_DIM));
                            if selected {
                                ui.label(RichText::new("✔ Selected").color(ACCENT));
                            }
                        });
                    if card.response.interact(egui::Sense::click()).clicked() {
                        actions.push(Action::SelectTemplate(template));
                    }
                }
            });
        });

        ui.add_space(16.0);
        if self.session.can_generate() {
            ui.vertical_centered(|ui| {
                let button = egui::Button::new(RichText::new("Create Split Screen").size(18.0).strong())
                    .fill(ACCENT)
                    .min_size(egui::vec2(320.0, 44.0));
                if ui.add(button).clicked() {
                    actions.push(Action::Generate);
                }
            });
        }
    }

    fn processing_screen(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(RichText::new("Cloud Processing...").size(26.0).strong().color(ACCENT));
            ui.add_space(20.0);
        });
        egui::Frame::none()
            .fill(CARD_BG)
            .rounding(14.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                for phase in &self.session.phases {
                    ui.horizontal(|ui| {
                        match phase.status {
                            PhaseStatus::Completed => {
                                ui.label(RichText::new("✅").size(18.0));
                            }
                            PhaseStatus::Active => {
                                ui.add(egui::Spinner::new().size(18.0));
                            }
                            PhaseStatus::Waiting => {
                                ui.label(RichText::new("○").size(18.0).color(TEXT_DIM));
                            }
                        }
                        let color = match phase.status {
                            PhaseStatus::Active => Color32::WHITE,
                            PhaseStatus::Completed => GREEN,
                            PhaseStatus::Waiting => TEXT_DIM,
                        };
                        ui.label(RichText::new(phase.label).color(color));
                    });
                    if phase.status == PhaseStatus::Active {
                        ui.add(egui::ProgressBar::new(0.6).animate(true).desired_width(280.0));
                    }
                    ui.add_space(10.0);
                }
            });
    }

    fn result_screen(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let (Some(result), Some(playback)) = (self.session.result.as_ref(), self.playback.as_ref()) else {
            return;
        };
        let template = self.session.template;

        ui.columns(2, |cols| {
            // Phone preview
            let ui = &mut cols[0];
            egui::Frame::none()
                .stroke(Stroke::new(6.0, Color32::from_rgb(39, 39, 42)))
                .rounding(28.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    video_half(ui, &playback.top, Some(playback.badge.label()), None);

                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(&result.caption)
                                .size(20.0)
                                .strong()
                                .color(Color32::BLACK)
                                .background_color(Color32::WHITE),
                        );
                    });

                    let preview = template
                        .filter(|t| playback.bottom.src.uri() == t.video_url)
                        .and_then(|t| self.thumbnails.get(t.id));
                    video_half(ui, &playback.bottom, None, preview);

                    ui.horizontal(|ui| {
                        let play = if playback.top.playing { "⏸ Pause" } else { "▶ Play" };
                        if ui.button(play).clicked() {
                            actions.push(Action::TogglePlay);
                        }
                        let mute = if playback.top.muted { "🔇" } else { "🔊" };
                        if ui.button(mute).clicked() {
                            actions.push(Action::ToggleMute);
                        }
                        if ui.button("Open top").clicked() {
                            actions.push(Action::Open(true));
                        }
                        if ui.button("Open bottom").clicked() {
                            actions.push(Action::Open(false));
                        }
                    });
                    if ui.button(override_button_label(&result.caption)).clicked() {
                        actions.push(Action::OverrideTemplate);
                    }

                    ui.label(RichText::new(&result.caption).strong());
                    ui.label(result.hashtags.iter().take(3).cloned().collect::<Vec<_>>().join(" "));
                });

            // Side panel
            let ui = &mut cols[1];
            egui::Frame::none()
                .fill(CARD_BG)
                .rounding(18.0)
                .inner_margin(20.0)
                .show(ui, |ui| {
                    ui.label(RichText::new("● Generation Complete").size(20.0).strong().color(GREEN));
                    ui.add_space(10.0);
                    egui::Grid::new("result_stats").num_columns(2).show(ui, |ui| {
                        ui.label(RichText::new("Cloud Status").color(TEXT_DIM));
                        ui.label(RichText::new("Source Deleted").color(GREEN).strong());
                        ui.end_row();
                        ui.label(RichText::new("Resolution").color(TEXT_DIM));
                        ui.label(RichText::new("1080x1920 (9:16)").monospace());
                        ui.end_row();
                        ui.label(RichText::new("Hashtags").color(TEXT_DIM));
                        ui.label(result.hashtags.join(" "));
                        ui.end_row();
                    });
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(format!(
                            "Demo Note: The bottom video is a placeholder. In the real app, your backend would download the specific YouTube ID ({}) to an MP4 file.\n\nUse the upload button under the preview if you have the real clip.",
                            template_file_name(&result.template_video_url)
                        ))
                        .small()
                        .color(WARN_TEXT),
                    );
                    ui.add_space(14.0);

                    ui.label(RichText::new("AI extras").strong());
                    ui.add_enabled_ui(!self.ai_busy, |ui| {
                        if ui.button("✨ AI caption").clicked() {
                            actions.push(Action::AiCaption);
                        }
                        ui.add(
                            egui::TextEdit::singleline(&mut self.bg_prompt)
                                .hint_text("Background prompt (optional)"),
                        );
                        if ui.button("🎬 AI background").clicked() {
                            actions.push(Action::AiBackground);
                        }
                    });
                    if !self.genai.has_api_key() {
                        ui.label(RichText::new("No API_KEY set: captions use fallback text").small().color(TEXT_DIM));
                    }
                    if let Some(status) = &self.ai_status {
                        ui.label(RichText::new(status).small());
                    }
                    ui.add_space(14.0);

                    if ui
                        .add(egui::Button::new(RichText::new("Download Final MP4").strong()).fill(ACCENT))
                        .clicked()
                    {
                        info!("download requested; export is simulated");
                    }
                    if ui.button("Start New Project").clicked() {
                        actions.push(Action::Reset);
                    }
                });
        });
    }
}

/// One half of the phone preview
fn video_half(ui: &mut egui::Ui, slot: &VideoSlot, badge: Option<&str>, preview: Option<&egui::TextureHandle>) {
    egui::Frame::none()
        .fill(Color32::from_rgb(9, 9, 11))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(300.0, 250.0));
            if let Some(badge) = badge {
                ui.label(RichText::new(badge).monospace().small().background_color(Color32::from_black_alpha(150)));
            }
            if let Some(tex) = preview {
                ui.add(egui::Image::new(tex).fit_to_exact_size(egui::vec2(300.0, 168.0)));
            }
            let state = match (slot.playing, slot.muted) {
                (true, false) => "▶ playing",
                (true, true) => "▶ playing (muted)",
                (false, _) => "⏸ paused",
            };
            ui.label(RichText::new(state).small().color(TEXT_DIM));
            let origin = if slot.src.is_local() { "local file" } else { "remote" };
            ui.label(RichText::new(format!("{origin}: {}", slot.src.uri())).small().monospace().color(TEXT_DIM));
        });
}

/// GUI update loop: called each frame to redraw and handle interactions
impl App for SplitClipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_channels(ctx);
        self.handle_drops(ctx);

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("SC").strong().color(Color32::BLACK).background_color(Color32::WHITE));
                ui.label(RichText::new("SplitClip").size(20.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new("v2.4.0 (Cloud)").monospace().small().color(TEXT_DIM));
                });
            });
        });

        let mut actions = Vec::new();
        let blocked = self.alert.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                    match self.session.view {
                        ViewState::Input => self.input_screen(ui, &mut actions),
                        ViewState::Downloading | ViewState::Processing => self.processing_screen(ui),
                        ViewState::Result => self.result_screen(ui, &mut actions),
                    }
                });
            });
        });

        if let Some(msg) = self.alert.clone() {
            egui::Window::new("Upload rejected")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(msg);
                    if ui.button("OK").clicked() {
                        self.alert = None;
                    }
                });
        }

        for action in actions {
            self.apply(action);
        }

        // Request periodic repaint for progress updates and the delayed scroll
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composer::tests::FixedPicker;
    use model::UserSource;

    fn app() -> SplitClipApp {
        SplitClipApp::new(&AppConfig::default())
    }

    /// Drives the session to the result screen with `template`.
    fn finish_run(app: &mut SplitClipApp, template: &'static model::TemplateEntry, caption: usize) {
        app.session.submit_input(UserSource::Url("https://youtu.be/abc".into()));
        app.session.select_template(template);
        assert!(app.session.begin_generate());
        assert!(app.session.complete(&mut FixedPicker(caption)));
        app.playback = app.session.result.as_ref().map(PlaybackView::new);
    }

    fn upload_tab(app: &mut SplitClipApp) {
        app.input.tab = InputTab::Upload;
    }

    fn dropped(name: &str, mime: &str) -> MediaFile {
        MediaFile {
            name: name.into(),
            path: std::path::PathBuf::from("/tmp").join(name),
            mime: mime.into(),
        }
    }

    #[test]
    fn reply_from_before_reset_is_discarded() {
        let mut app = app();
        finish_run(&mut app, &TEMPLATES[0], 0);

        let stale_tx = app.ai_tx.clone();
        app.ai_busy = true;
        app.apply(Action::Reset);
        assert!(!app.ai_busy);
        assert!(app.ai_status.is_none());

        finish_run(&mut app, &TEMPLATES[1], 2);
        let _ = stale_tx.send(AiEvent::Caption(CaptionMetadata {
            caption: "Old template caption".into(),
            hashtags: vec!["#old".into()],
        }));
        let _ = stale_tx.send(AiEvent::Background(Ok(Some("https://old.example/bg.mp4".into()))));
        app.drain_ai_replies();

        let result = app.session.result.as_ref().expect("result");
        assert_eq!(result.caption, "YOU WON'T BELIEVE THIS 🔥");
        assert_eq!(result.hashtags.last().map(String::as_str), Some("#gameplay"));
        let playback = app.playback.as_ref().expect("playback");
        assert_eq!(playback.bottom.src.uri(), TEMPLATES[1].video_url);
        assert!(app.ai_status.is_none());
    }

    #[test]
    fn reply_for_current_session_is_applied() {
        let mut app = app();
        finish_run(&mut app, &TEMPLATES[0], 0);
        app.ai_busy = true;

        let _ = app.ai_tx.send(AiEvent::Caption(CaptionMetadata {
            caption: "Fresh".into(),
            hashtags: vec!["#new".into()],
        }));
        app.drain_ai_replies();

        assert!(!app.ai_busy);
        assert_eq!(app.session.result.as_ref().map(|r| r.caption.as_str()), Some("Fresh"));
    }

    #[test]
    fn rejected_drop_raises_one_alert_and_keeps_source() {
        let mut app = app();
        upload_tab(&mut app);
        let kept = UserSource::Url("https://youtu.be/keep".into());
        app.session.submit_input(kept.clone());

        assert!(app.on_drop(dropped("photo.png", "image/png")));
        assert_eq!(app.alert.as_deref(), Some(REJECTED_DROP_ALERT));
        assert_eq!(app.session.source, Some(kept));
    }

    #[test]
    fn video_drop_sets_source_without_alert() {
        let mut app = app();
        upload_tab(&mut app);
        let file = dropped("clip.mov", "video/quicktime");

        assert!(!app.on_drop(file.clone()));
        assert!(app.alert.is_none());
        assert_eq!(app.session.source, Some(UserSource::File(file)));
    }

    #[test]
    fn drops_ignored_on_link_tab() {
        let mut app = app();
        assert_eq!(app.input.tab, InputTab::Link);

        assert!(!app.on_drop(dropped("photo.png", "image/png")));
        assert!(!app.on_drop(dropped("clip.mp4", "video/mp4")));
        assert!(app.alert.is_none());
        assert!(app.session.source.is_none());
    }

    #[test]
    fn drops_ignored_outside_input_screen() {
        let mut app = app();
        upload_tab(&mut app);
        finish_run(&mut app, &TEMPLATES[2], 0);
        let before = app.session.source.clone();

        assert!(!app.on_drop(dropped("notes.txt", "text/plain")));
        assert!(!app.on_drop(dropped("other.mp4", "video/mp4")));
        assert!(app.alert.is_none());
        assert_eq!(app.session.source, before);
    }
}
