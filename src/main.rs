//! Kino Mania - movie shop mini-game
//! Click for coins, buy short movies and fix their playback glitches.

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use eframe::egui;
use std::process::Child;
use std::time::{Duration, Instant};

mod challenge;
mod config;
mod error;
mod faults;
mod ledger;
mod models;
mod notify;
mod session;
mod video;

use challenge::ChallengePhase;
use config::AppConfig;
use ledger::MAX_AVATAR_CHARS;
use models::*;
use notify::{Notifier, Toasts};
use session::{CodeDraft, Session, UploadForm};

/// Console keeps this many lines
const CONSOLE_MAX_LINES: usize = 500;

/// Size of one movie card in the grids
const CARD_SIZE: egui::Vec2 = egui::vec2(200.0, 190.0);

/// Size of the screening surface
const SCREEN_SIZE: egui::Vec2 = egui::vec2(480.0, 270.0);

/// Get current local time as HH:MM:SS
fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Application icon: a gold coin on the purple gradient
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;

            // Normalize coordinates to 0.0-1.0
            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Rounded rectangle check (background)
            let corner_radius = 0.125;
            let in_rounded_rect = {
                let dx = if nx < corner_radius { corner_radius - nx }
                         else if nx > 1.0 - corner_radius { nx - (1.0 - corner_radius) }
                         else { 0.0 };
                let dy = if ny < corner_radius { corner_radius - ny }
                         else if ny > 1.0 - corner_radius { ny - (1.0 - corner_radius) }
                         else { 0.0 };
                dx * dx + dy * dy <= corner_radius * corner_radius
            };

            if !in_rounded_rect {
                continue;
            }

            // Coin: outer rim, inner face and a film-frame slot in the middle
            let cx = nx - 0.5;
            let cy = ny - 0.5;
            let dist = (cx * cx + cy * cy).sqrt();
            let in_slot = cx.abs() < 0.12 && cy.abs() < 0.09;

            let (r, g, b) = if dist < 0.33 && in_slot {
                (26, 26, 46)
            } else if dist < 0.30 {
                (250, 204, 21)
            } else if dist < 0.36 {
                (202, 138, 4)
            } else {
                // Purple gradient background (#667eea to #764ba2)
                let t = nx * 0.5 + ny * 0.5;
                (
                    (102.0 + (118.0 - 102.0) * t) as u8,
                    (126.0 + (75.0 - 126.0) * t) as u8,
                    (234.0 + (162.0 - 234.0) * t) as u8,
                )
            };

            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

/// Add a system emoji font so movie avatars render
fn install_emoji_font(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    #[cfg(target_os = "windows")]
    let emoji_paths: &[&str] = &["C:\\Windows\\Fonts\\seguiemj.ttf"];

    #[cfg(target_os = "linux")]
    let emoji_paths: &[&str] = &[
        "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
        "/usr/share/fonts/noto-emoji/NotoColorEmoji.ttf",
        "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    #[cfg(target_os = "macos")]
    let emoji_paths: &[&str] = &["/System/Library/Fonts/Apple Color Emoji.ttc"];

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    let emoji_paths: &[&str] = &[];

    for path in emoji_paths {
        if let Ok(font_data) = std::fs::read(path) {
            fonts.font_data.insert(
                "emoji".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );
            fonts.families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .push("emoji".to_owned());
            break;
        }
    }

    ctx.set_fonts(fonts);
}

fn apply_font_size(ctx: &egui::Context, size: u32) {
    let size = size.clamp(10, 24) as f32;
    ctx.style_mut(|style| {
        style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(size));
        style.text_styles.insert(egui::TextStyle::Button, egui::FontId::proportional(size));
        style.text_styles.insert(egui::TextStyle::Monospace, egui::FontId::monospace(size - 1.0));
        style.text_styles.insert(egui::TextStyle::Heading, egui::FontId::proportional(size + 6.0));
    });
}

fn main() -> Result<(), eframe::Error> {
    let icon = load_icon();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 520.0])
            .with_icon(icon),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "Kino Mania",
        options,
        Box::new(|cc| {
            install_emoji_font(&cc.egui_ctx);
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(KinoManiaApp::new()))
        }),
    )
}

/// Button pressed on a movie card
enum CardAction {
    Buy(u64),
    Play(u64),
    Edit(u64),
    Delete(u64),
}

/// Which grid a card is drawn in
#[derive(Clone, Copy, PartialEq)]
enum CardKind {
    Shop,
    Library,
    Upload,
}

struct KinoManiaApp {
    config: AppConfig,
    session: Session,
    current_tab: Tab,
    status_message: String,

    toasts: Toasts,
    console_log: Vec<String>,

    // Dialogs
    code_draft: Option<CodeDraft>,
    upload_form: UploadForm,
    show_upload: bool,
    show_settings: bool,
    show_reset_confirm: bool,

    // External player process
    current_player: Option<Child>,
}

impl KinoManiaApp {
    fn new() -> Self {
        let config = AppConfig::load();
        let mut toasts = Toasts::new(config.toast_lifetime());
        let session = Session::new(&config, &mut toasts);

        Self {
            status_message: format!("{} coins in the wallet", session.ledger.coins()),
            session,
            current_tab: Tab::Shop,
            toasts,
            console_log: vec![format!("[{}] [INFO] Kino Mania started", timestamp_now())],
            code_draft: None,
            upload_form: UploadForm::default(),
            show_upload: false,
            show_settings: false,
            show_reset_confirm: false,
            current_player: None,
            config,
        }
    }

    fn log(&mut self, message: &str) {
        let timestamp = timestamp_now();
        self.console_log.push(format!("[{}] {}", timestamp, message));
        if self.console_log.len() > CONSOLE_MAX_LINES {
            let excess = self.console_log.len() - CONSOLE_MAX_LINES;
            self.console_log.drain(..excess);
        }
    }

    /// Copy freshly raised notices into the console
    fn flush_notices(&mut self) {
        for line in self.toasts.drain_log_lines() {
            self.log(&line);
        }
    }

    fn save_settings(&mut self) {
        match self.config.save() {
            Ok(()) => {
                self.status_message = "Settings saved".to_string();
                self.log("[INFO] Settings saved");
            }
            Err(e) => {
                self.status_message = format!("Could not save settings: {}", e);
                self.log(&format!("[ERROR] Could not save settings: {}", e));
            }
        }
    }

    fn apply_card_action(&mut self, action: CardAction) {
        match action {
            CardAction::Buy(id) => {
                if self.session.purchase(id, &mut self.toasts).is_ok() {
                    self.status_message = format!("{} coins left", self.session.ledger.coins());
                }
            }
            CardAction::Play(id) => self.play(id),
            CardAction::Edit(id) => self.code_draft = self.session.open_editor(id),
            CardAction::Delete(id) => {
                self.session.delete(id, &mut self.toasts);
                if self.code_draft.as_ref().is_some_and(|d| d.movie_id == id) {
                    self.code_draft = None;
                }
            }
        }
    }

    fn play(&mut self, id: u64) {
        let Ok(outcome) = self.session.play(id, Instant::now(), &mut self.toasts) else {
            return;
        };
        let title = self.session.screening_movie().map(|m| m.title.clone()).unwrap_or_default();
        self.log(&format!("[PLAY] {}", title));
        if outcome.superseded {
            self.log("[WARN] Previous interruption challenge replaced");
        }
        self.status_message = if outcome.report.is_clean() {
            format!("Watching {}", title)
        } else {
            format!("Watching {} - glitches detected", title)
        };
    }

    /// Open a user upload in the external player
    fn open_in_player(&mut self, id: u64) {
        let Some(movie) = self.session.ledger.movie(id) else {
            return;
        };
        let Some(path) = movie.video_path.clone() else {
            return;
        };
        let title = movie.title.clone();

        // Kill existing player if in single window mode
        if self.config.single_window_mode {
            if let Some(mut child) = self.current_player.take() {
                let _ = child.kill();
                let _ = child.wait(); // Reap the process
                self.log("[PLAY] Single window mode - closing previous player");
            }
        }

        let player = video::resolve_player(&self.config.external_player);
        self.log(&format!("[PLAY] {} | Player: {}", title, player));
        self.log(&format!("[PLAY] File: {}", path.display()));

        match video::launch_player(&player, &path, &title) {
            Ok(child) => self.current_player = Some(child),
            Err(e) => {
                let detail = format!("Could not start '{}': {}", player, e);
                self.toasts.error("❌ Player error", &detail);
            }
        }
    }

    /// Reap the player once it exits
    fn poll_player(&mut self) {
        let exited = match self.current_player.as_mut().map(|c| c.try_wait()) {
            Some(Ok(Some(status))) => Some(status.code()),
            Some(Err(_)) => Some(None),
            _ => None,
        };
        if let Some(code) = exited {
            self.current_player = None;
            self.log(&format!("[PLAY] Player exited (code {:?})", code));
        }
    }
}

impl eframe::App for KinoManiaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Fire the challenge deadline even when nothing is clicked
        self.session.tick(now, &mut self.toasts);
        if let Some(deadline) = self.session.challenge.deadline() {
            let left = deadline.saturating_duration_since(now);
            ctx.request_repaint_after(left.min(Duration::from_millis(100)));
        } else if self.session.screening().is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
        self.poll_player();

        // Apply theme
        if self.config.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
        apply_font_size(ctx, self.config.font_size);

        // Top panel - title and wallet
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.heading(egui::RichText::new("Kino Mania 🎬").strong().color(egui::Color32::from_rgb(167, 139, 250)));
                    ui.label(egui::RichText::new("Mini-movie game platform").weak());
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.show_settings = true;
                    }
                    ui.separator();

                    let ledger = &self.session.ledger;
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(format!("{}", ledger.coins()))
                            .size(22.0)
                            .strong()
                            .color(egui::Color32::GOLD));
                        ui.label(egui::RichText::new(format!("Clicks: {}/{}", ledger.click_count(), ledger.clicks_per_coin())).small());
                        ui.add(egui::ProgressBar::new(ledger.click_progress()).desired_width(120.0).desired_height(4.0));
                    });

                    let coin = egui::Button::new(egui::RichText::new("🪙").size(30.0))
                        .min_size(egui::vec2(56.0, 56.0))
                        .corner_radius(egui::CornerRadius::same(28));
                    if ui.add(coin).on_hover_text("Click 50 times for a coin").clicked() {
                        self.session.click_coin(&mut self.toasts);
                    }
                });
            });
            ui.add_space(6.0);
        });

        // Bottom panel - Status
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.current_player.is_some() {
                    ui.spinner();
                }
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(format!("🎬 {} movies", self.session.ledger.movies().len())).weak());
                });
            });
        });

        // Main content
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            // Tab bar
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Shop, "🏪 SHOP");
                ui.selectable_value(&mut self.current_tab, Tab::Library, "📚 LIBRARY");
                ui.selectable_value(&mut self.current_tab, Tab::MyVideos, "📤 MY VIDEOS");

                // Push Console to the right
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.selectable_value(&mut self.current_tab, Tab::Console, "🖥 CONSOLE");
                });
            });

            ui.separator();

            match self.current_tab {
                Tab::Shop => action = self.show_shop_tab(ui),
                Tab::Library => action = self.show_library_tab(ui),
                Tab::MyVideos => action = self.show_my_videos_tab(ui),
                Tab::Console => self.show_console_tab(ui),
            }
        });
        if let Some(action) = action {
            self.apply_card_action(action);
        }

        self.show_screening_window(ctx, now);
        self.show_editor_window(ctx);
        self.show_upload_window(ctx);
        self.show_settings_window(ctx);

        self.toasts.show(ctx);
        self.flush_notices();
    }
}

impl KinoManiaApp {
    fn show_shop_tab(&mut self, ui: &mut egui::Ui) -> Option<CardAction> {
        if self.session.ledger.shop().next().is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label("Everything is sold out - upload your own video in My Videos");
            });
            return None;
        }
        let movies: Vec<&Movie> = self.session.ledger.shop().collect();
        Self::movie_grid(ui, &movies, CardKind::Shop)
    }

    fn show_library_tab(&mut self, ui: &mut egui::Ui) -> Option<CardAction> {
        if self.session.ledger.library().next().is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label(egui::RichText::new("🎞").size(64.0));
                ui.label("Your library is empty");
                ui.label(egui::RichText::new("Buy movies in the shop").weak());
            });
            return None;
        }
        let movies: Vec<&Movie> = self.session.ledger.library().collect();
        Self::movie_grid(ui, &movies, CardKind::Library)
    }

    fn show_my_videos_tab(&mut self, ui: &mut egui::Ui) -> Option<CardAction> {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            if ui.button(egui::RichText::new("➕ Upload video").size(18.0)).clicked() {
                self.show_upload = true;
            }
            ui.add_space(8.0);
        });
        ui.separator();

        let movies: Vec<&Movie> = self.session.ledger.uploads().collect();
        if movies.is_empty() {
            ui.label(egui::RichText::new("No uploads yet").weak());
            return None;
        }
        Self::movie_grid(ui, &movies, CardKind::Upload)
    }

    fn movie_grid(ui: &mut egui::Ui, movies: &[&Movie], kind: CardKind) -> Option<CardAction> {
        let mut action = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for movie in movies {
                        if let Some(a) = Self::movie_card(ui, movie, kind) {
                            action = Some(a);
                        }
                    }
                });
            });
        action
    }

    fn movie_card(ui: &mut egui::Ui, movie: &Movie, kind: CardKind) -> Option<CardAction> {
        let mut action = None;
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_min_size(CARD_SIZE);
                ui.set_max_width(CARD_SIZE.x);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&movie.avatar).size(44.0));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                            let badge = match kind {
                                CardKind::Shop => egui::RichText::new(format!("{} 🪙", movie.price)).color(egui::Color32::GOLD),
                                CardKind::Library => egui::RichText::new("✔ Owned").color(egui::Color32::GREEN),
                                CardKind::Upload => egui::RichText::new("👤 Mine").color(egui::Color32::LIGHT_BLUE),
                            };
                            ui.label(badge);
                        });
                    });
                    ui.label(egui::RichText::new(&movie.title).strong().size(16.0));
                    ui.add_space(6.0);

                    match kind {
                        CardKind::Shop => {
                            if ui.button("🛒 Buy").clicked() {
                                action = Some(CardAction::Buy(movie.id));
                            }
                        }
                        CardKind::Library => {
                            if ui.button("▶ Watch").clicked() {
                                action = Some(CardAction::Play(movie.id));
                            }
                            if ui.button("</> Code editor").clicked() {
                                action = Some(CardAction::Edit(movie.id));
                            }
                        }
                        CardKind::Upload => {
                            ui.horizontal(|ui| {
                                ui.label(format!("Price: {} 🪙", movie.price));
                                ui.label(egui::RichText::new(if movie.is_purchased { "Sold" } else { "On sale" }).weak());
                            });
                            if movie.video_path.is_some() && ui.button("▶ Preview").clicked() {
                                action = Some(CardAction::Play(movie.id));
                            }
                            if ui.button(egui::RichText::new("🗑 Delete").color(egui::Color32::RED)).clicked() {
                                action = Some(CardAction::Delete(movie.id));
                            }
                        }
                    }
                });
            });
        action
    }

    fn show_console_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Console Log");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑 Clear").clicked() {
                    self.console_log.clear();
                    self.console_log.push(format!("[{}] Console cleared", timestamp_now()));
                }
            });
        });
        ui.separator();

        // Display log entries with monospace font
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.console_log {
                    let color = if line.contains("[ERROR]") {
                        egui::Color32::RED
                    } else if line.contains("[WARN]") {
                        egui::Color32::YELLOW
                    } else if line.contains("[INFO]") {
                        egui::Color32::LIGHT_BLUE
                    } else if line.contains("[PLAY]") {
                        egui::Color32::GREEN
                    } else {
                        egui::Color32::GRAY
                    };

                    ui.label(egui::RichText::new(line).monospace().color(color));
                }
            });
    }

    /// The screen with its glitches painted on top
    fn paint_screen(ui: &mut egui::Ui, movie: &Movie, screening: &session::Screening, now: Instant) {
        let (rect, _) = ui.allocate_exact_size(SCREEN_SIZE, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let rounding = egui::CornerRadius::same(8);

        painter.rect_filled(rect, rounding, egui::Color32::from_rgb(26, 26, 46));
        match &movie.video_path {
            Some(path) => {
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                painter.text(rect.center(), egui::Align2::CENTER_CENTER, format!("🎞 {}", name),
                    egui::FontId::proportional(18.0), egui::Color32::WHITE);
            }
            None => {
                painter.text(rect.center(), egui::Align2::CENTER_CENTER, &movie.avatar,
                    egui::FontId::proportional(96.0), egui::Color32::WHITE);
            }
        }

        let report = &screening.report;
        if report.has(FaultChannel::HalfGray) {
            let half = egui::Rect::from_min_max(rect.center_top(), rect.max);
            painter.rect_filled(half, egui::CornerRadius::ZERO, egui::Color32::from_gray(128));
        }
        if report.has(FaultChannel::GrayFrame)
            && faults::gray_frame_visible(&movie.codes, screening.elapsed(now))
        {
            painter.rect_filled(rect, rounding, egui::Color32::from_gray(128));
        }
        if report.has(FaultChannel::BlackScreen) {
            painter.rect_filled(rect, rounding, egui::Color32::BLACK);
        }
    }

    fn show_screening_window(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(screening) = self.session.screening().cloned() else {
            return;
        };
        let Some(movie) = self.session.ledger.movie(screening.movie_id).cloned() else {
            self.session.close_screening();
            return;
        };

        let mut open = true;
        let mut close_clicked = false;
        let mut open_editor = false;
        let mut open_player = false;
        let mut challenge_clicked = false;

        let challenge = &self.session.challenge;
        egui::Window::new(format!("▶ {}", movie.title))
            .id(egui::Id::new("screening"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                Self::paint_screen(ui, &movie, &screening, now);

                if movie.video_path.is_some() {
                    ui.add_space(6.0);
                    if ui.button("🎬 Open in player").clicked() {
                        open_player = true;
                    }
                }

                ui.add_space(8.0);
                match challenge.phase() {
                    ChallengePhase::Active => {
                        let text = format!("⚡ CLICK! {}/{}", challenge.clicks(), challenge.rules().target_clicks);
                        let button = egui::Button::new(egui::RichText::new(text).size(22.0).strong())
                            .fill(egui::Color32::from_rgb(202, 138, 4))
                            .min_size(egui::vec2(SCREEN_SIZE.x, 48.0));
                        if ui.add(button).clicked() {
                            challenge_clicked = true;
                        }
                        ui.label(format!("⏱ {:.1}s left", challenge.remaining(now).as_secs_f32()));
                    }
                    ChallengePhase::Won if screening.report.interruption => {
                        ui.colored_label(egui::Color32::GREEN, "✅ Interruption fixed");
                    }
                    ChallengePhase::Lost if screening.report.interruption => {
                        ui.colored_label(egui::Color32::RED, "❌ The picture dropped out");
                    }
                    _ => {}
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Close").clicked() {
                        close_clicked = true;
                    }
                    if ui.button("</> Editor").clicked() {
                        open_editor = true;
                    }
                });
            });

        if challenge_clicked {
            self.session.challenge_click(Instant::now(), &mut self.toasts);
        }
        if open_player {
            self.open_in_player(movie.id);
        }
        if open_editor {
            self.code_draft = self.session.open_editor(movie.id);
        }
        if !open || close_clicked {
            self.session.close_screening();
            self.status_message = format!("Stopped {}", movie.title);
        }
    }

    fn show_editor_window(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.code_draft.as_mut() else {
            return;
        };
        let title = self.session.ledger.movie(draft.movie_id)
            .map(|m| format!("</> Code editor - {}", m.title))
            .unwrap_or_else(|| "</> Code editor".to_string());

        let mut open = true;
        let mut save = false;
        egui::Window::new(title)
            .id(egui::Id::new("code_editor"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Change every 2 into 1 to fix the problems").weak());
                ui.add_space(6.0);

                for channel in FaultChannel::ALL {
                    let active = draft.codes.is_active(channel);
                    let label = egui::RichText::new(channel.editor_label());
                    ui.label(if active { label.color(egui::Color32::YELLOW) } else { label });
                    ui.add(egui::TextEdit::multiline(draft.codes.get_mut(channel))
                        .font(egui::TextStyle::Monospace)
                        .desired_rows(2)
                        .desired_width(360.0));
                }

                if !draft.codes.is_digits_only() {
                    ui.colored_label(egui::Color32::YELLOW, "⚠ Codes are made of digits");
                }

                ui.add_space(6.0);
                if ui.button("💾 Save").clicked() {
                    save = true;
                }
            });

        if save {
            if let Some(draft) = self.code_draft.take() {
                if self.session.save_codes(&draft, &mut self.toasts).is_err() {
                    self.code_draft = Some(draft);
                }
            }
        } else if !open {
            self.code_draft = None;
        }
    }

    fn show_upload_window(&mut self, ctx: &egui::Context) {
        if !self.show_upload {
            return;
        }

        let mut open = true;
        let mut pick = false;
        let mut submit = false;
        let form = &mut self.upload_form;
        egui::Window::new("📤 Upload video")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("upload_grid")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Movie title:");
                        ui.add(egui::TextEdit::singleline(&mut form.title)
                            .hint_text("Enter a title...")
                            .desired_width(220.0));
                        ui.end_row();

                        ui.label("Avatar (emoji):");
                        ui.add(egui::TextEdit::singleline(&mut form.avatar)
                            .char_limit(MAX_AVATAR_CHARS)
                            .desired_width(60.0));
                        ui.end_row();

                        ui.label("Price (coins):");
                        ui.add(egui::DragValue::new(&mut form.price).range(1..=9999));
                        ui.end_row();

                        ui.label("Video file:");
                        let text = match &form.video {
                            Some(v) => format!("📁 {}", v.file_name),
                            None => "📁 Choose video".to_string(),
                        };
                        if ui.button(text).clicked() {
                            pick = true;
                        }
                        ui.end_row();
                    });

                ui.add_space(8.0);
                if ui.button("💾 Add to shop").clicked() {
                    submit = true;
                }
            });

        if pick {
            if let Some(picked) = video::pick_video() {
                self.upload_form.choose_video(picked, &mut self.toasts);
            }
        }
        if submit {
            if let Ok(id) = self.session.upload(&mut self.upload_form, &mut self.toasts) {
                self.show_upload = false;
                self.log(&format!("[INFO] Uploaded movie #{}", id));
            }
        }
        if !open {
            self.show_upload = false;
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut open = true;
        let mut save = false;
        let config = &mut self.config;
        let show_reset_confirm = &mut self.show_reset_confirm;
        egui::Window::new("⚙ Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("🎬 Player:");
                    ui.add(egui::TextEdit::singleline(&mut config.external_player)
                        .hint_text("ffplay, mpv, vlc...")
                        .desired_width(220.0))
                        .on_hover_text("Media player command or path for your own videos\n\nLeave empty for ffplay (default)");
                    if ui.button("📁").on_hover_text("Browse for player executable").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .set_title("Select Media Player")
                            .pick_file()
                        {
                            config.external_player = path.display().to_string();
                        }
                    }
                });
                ui.checkbox(&mut config.single_window_mode, "Single Window")
                    .on_hover_text("Close previous player when opening a new video");
                ui.checkbox(&mut config.dark_mode, "🌙 Dark");
                ui.add(egui::Slider::new(&mut config.font_size, 10..=24).text("Font size"));

                ui.separator();
                ui.label(egui::RichText::new("Game").strong());
                ui.label(egui::RichText::new("Coins and clicks per coin apply on next start").weak());
                egui::Grid::new("game_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Starting coins:");
                    ui.add(egui::DragValue::new(&mut config.starting_coins).range(0..=1000));
                    ui.end_row();
                    ui.label("Clicks per coin:");
                    ui.add(egui::DragValue::new(&mut config.clicks_per_coin).range(1..=1000));
                    ui.end_row();
                    ui.label("Challenge clicks:");
                    ui.add(egui::DragValue::new(&mut config.challenge_clicks).range(1..=100));
                    ui.end_row();
                    ui.label("Challenge seconds:");
                    ui.add(egui::DragValue::new(&mut config.challenge_seconds).range(1..=60));
                    ui.end_row();
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("💾 Save").clicked() {
                        save = true;
                    }
                    if ui.button("↺ Reset to defaults").clicked() {
                        *show_reset_confirm = true;
                    }
                });
            });

        if *show_reset_confirm {
            egui::Window::new("⚠ Reset All Settings")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Restore every setting to its default?");
                    ui.horizontal(|ui| {
                        if ui.button("Reset").clicked() {
                            *config = AppConfig::default();
                            *show_reset_confirm = false;
                            save = true;
                        }
                        if ui.button("Cancel").clicked() {
                            *show_reset_confirm = false;
                        }
                    });
                });
        }

        if save {
            self.toasts.set_lifetime(self.config.toast_lifetime());
            self.session.challenge.set_rules(self.config.challenge_rules());
            self.save_settings();
        }
        if !open {
            self.show_settings = false;
        }
    }
}
