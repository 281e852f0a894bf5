use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use eframe::egui;
use tunedeck_channel::{ChannelConfig, ChannelHandle, ReconnectPolicy};
use tunedeck_core::{update, AppState, Msg, Theme};

use crate::effects::EffectRunner;
use crate::persistence::Preferences;
use crate::timers::Timers;
use crate::ui;

/// Polling cadence for inbound channel messages when no timer is armed.
const IDLE_REPAINT: Duration = Duration::from_millis(100);

pub struct DeckApp {
    state: AppState,
    timers: Timers,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    prefs: Preferences,
    applied_theme: Option<Theme>,
}

impl DeckApp {
    pub fn new(prefs: Preferences, prefs_dir: PathBuf) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let channel = ChannelHandle::connect(ChannelConfig {
            server_url: prefs.server_url.clone(),
            user: prefs.user.clone(),
            reconnect: ReconnectPolicy::default(),
        });
        let effects = EffectRunner::new(channel, msg_tx, prefs_dir);

        Self {
            state: AppState::with_theme(prefs.theme),
            timers: Timers::new(),
            effects,
            msg_rx,
            prefs,
            applied_theme: None,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects, &mut self.timers, &mut self.prefs);
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Inbound channel traffic, then elapsed one-shot timers, then the
        // interactions gathered while rendering. All mutation funnels
        // through dispatch on this thread.
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        inbox.extend(self.timers.due(Instant::now()));
        for msg in inbox {
            self.dispatch(msg);
        }

        let view = self.state.view();
        if self.applied_theme != Some(view.theme) {
            ctx.set_visuals(match view.theme {
                Theme::Dark => egui::Visuals::dark(),
                Theme::Light => egui::Visuals::light(),
            });
            self.applied_theme = Some(view.theme);
        }

        let mut pending = Vec::new();
        ui::render(ctx, &view, &mut pending);
        for msg in pending {
            self.dispatch(msg);
        }

        // Repaint immediately when something changed this frame, otherwise
        // wake up for the next timer deadline or the idle poll.
        if self.state.consume_dirty() {
            ctx.request_repaint();
        }
        let wakeup = self
            .timers
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_REPAINT)
            .min(IDLE_REPAINT);
        ctx.request_repaint_after(wakeup);
    }
}
