//! Short-lived status messages ("Selected color: Red", "Saved to ...").

/// How long a message stays on screen
pub const DISPLAY_SECONDS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
struct Notification {
    message: String,
    expires_at: f64,
}

/// Queue of messages, each expiring [`DISPLAY_SECONDS`] after it was pushed.
/// Times are seconds on the UI clock.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, now: f64) {
        let message = message.into();
        log::info!("{}", message);
        self.items.push(Notification {
            message,
            expires_at: now + DISPLAY_SECONDS,
        });
    }

    /// Drop expired messages and return the ones still visible, oldest first
    pub fn active(&mut self, now: f64) -> Vec<&str> {
        self.items.retain(|n| n.expires_at > now);
        self.items.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Show the visible messages in a bottom-centered overlay
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let messages = self.active(now);
        if messages.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    for message in messages {
                        ui.label(message);
                    }
                });
            });

        // Keep repainting until the last message expires
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
