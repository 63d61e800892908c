//! Notification boundary: the core reports outcomes here and never
//! looks at how they are shown.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::models::NoticeKind;

/// A single user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Fire-and-forget sink for notices
pub trait Notifier {
    fn notify(&mut self, notice: Notice);

    fn info(&mut self, title: &str, detail: &str) {
        self.notify(Notice::new(NoticeKind::Info, title, detail));
    }

    fn success(&mut self, title: &str, detail: &str) {
        self.notify(Notice::new(NoticeKind::Success, title, detail));
    }

    fn warning(&mut self, title: &str, detail: &str) {
        self.notify(Notice::new(NoticeKind::Warning, title, detail));
    }

    fn error(&mut self, title: &str, detail: &str) {
        self.notify(Notice::new(NoticeKind::Error, title, detail));
    }
}

/// Collects notices in call order
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

struct Toast {
    notice: Notice,
    shown_at: Instant,
}

/// On-screen toast stack, newest at the bottom
pub struct Toasts {
    active: Vec<Toast>,
    lifetime: Duration,
    // Lines not yet copied into the console log
    unlogged: Vec<String>,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            active: Vec::new(),
            lifetime,
            unlogged: Vec::new(),
        }
    }

    pub fn set_lifetime(&mut self, lifetime: Duration) {
        self.lifetime = lifetime;
    }

    /// Log lines for every notice raised since the last call
    pub fn drain_log_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.unlogged)
    }

    /// Drop toasts older than their lifetime
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.active
            .retain(|t| now.saturating_duration_since(t.shown_at) < lifetime);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.expire(Instant::now());
        if self.active.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(320.0);
                for (i, toast) in self.active.iter().enumerate() {
                    let (fill, stroke) = match toast.notice.kind {
                        NoticeKind::Error => (egui::Color32::from_rgb(90, 24, 30), egui::Color32::RED),
                        NoticeKind::Warning => (egui::Color32::from_rgb(80, 64, 16), egui::Color32::YELLOW),
                        NoticeKind::Success => (egui::Color32::from_rgb(22, 64, 36), egui::Color32::GREEN),
                        NoticeKind::Info => (egui::Color32::from_rgb(30, 34, 64), egui::Color32::LIGHT_BLUE),
                    };
                    let response = egui::Frame::popup(ui.style())
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(&toast.notice.title).strong());
                            if !toast.notice.detail.is_empty() {
                                ui.label(&toast.notice.detail);
                            }
                        })
                        .response;
                    if response.interact(egui::Sense::click()).clicked() {
                        dismissed = Some(i);
                    }
                    ui.add_space(4.0);
                }
            });

        if let Some(i) = dismissed {
            self.active.remove(i);
        }
        // Wake up again when the oldest toast should disappear
        if let Some(oldest) = self.active.first() {
            let left = self.lifetime.saturating_sub(oldest.shown_at.elapsed());
            ctx.request_repaint_after(left);
        }
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notice: Notice) {
        let line = if notice.detail.is_empty() {
            format!("{} {}", notice.kind.log_tag(), notice.title)
        } else {
            format!("{} {} - {}", notice.kind.log_tag(), notice.title, notice.detail)
        };
        self.unlogged.push(line);
        self.active.push(Toast {
            notice,
            shown_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_notifier_keeps_call_order() {
        let mut notices: Vec<Notice> = Vec::new();
        notices.info("first", "");
        notices.error("second", "detail");
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].title, "first");
        assert_eq!(notices[1].kind, NoticeKind::Error);
        assert_eq!(notices[1].detail, "detail");
    }

    #[test]
    fn test_toasts_mirror_into_log_once() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.warning("⚠️ Black screen!", "Fix the code in the editor");
        toasts.success("Saved", "");

        let lines = toasts.drain_log_lines();
        assert_eq!(lines, vec![
            "[WARN] ⚠️ Black screen! - Fix the code in the editor".to_string(),
            "[INFO] Saved".to_string(),
        ]);
        assert!(toasts.drain_log_lines().is_empty());
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn test_toasts_expire_after_lifetime() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.info("hello", "");
        let now = Instant::now();
        toasts.expire(now);
        assert_eq!(toasts.len(), 1);
        toasts.expire(now + Duration::from_secs(5));
        assert_eq!(toasts.len(), 0);
    }
}
