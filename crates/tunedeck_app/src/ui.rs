use eframe::egui;
use tunedeck_core::{AppViewModel, Msg, ProgressStyle, Theme};

/// Renders one frame from the view model, pushing any user-triggered
/// messages into `out`. All interactions funnel through [`Msg`]; the button
/// click and the Enter key push the identical `SubmitPressed`.
pub fn render(ctx: &egui::Context, view: &AppViewModel, out: &mut Vec<Msg>) {
    header(ctx, view, out);
    progress_footer(ctx, view);
    central(ctx, view, out);
    settings_window(ctx, view, out);
}

fn header(ctx: &egui::Context, view: &AppViewModel, out: &mut Vec<Msg>) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Tunedeck");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut dark = view.theme == Theme::Dark;
                if ui.toggle_value(&mut dark, "🌙").changed() {
                    out.push(Msg::ThemeToggled);
                }
                if ui.button("Settings").clicked() {
                    out.push(Msg::SettingsOpened);
                }
                let (dot, label) = if view.connected {
                    (egui::Color32::from_rgb(34, 197, 94), "Connected")
                } else {
                    (egui::Color32::from_rgb(220, 38, 38), "Offline")
                };
                ui.colored_label(dot, "●");
                ui.label(label);
            });
        });
    });
}

fn progress_footer(ctx: &egui::Context, view: &AppViewModel) {
    egui::TopBottomPanel::bottom("progress").show(ctx, |ui| {
        let bar = egui::ProgressBar::new(f32::from(view.progress.width_pct) / 100.0)
            .fill(style_color(view.progress.style))
            .animate(view.progress.style == ProgressStyle::Active);
        ui.add(bar);
    });
}

fn central(ctx: &egui::Context, view: &AppViewModel, out: &mut Vec<Msg>) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            let label = if view.total > 0 {
                format!("Download {}/{}", view.completed, view.total)
            } else {
                "Download".to_string()
            };
            if ui
                .add_enabled(view.can_submit, egui::Button::new(label))
                .clicked()
            {
                out.push(Msg::SubmitPressed);
            }
            if view.busy {
                ui.add(egui::Spinner::new());
            }

            let mut input = view.input_value.clone();
            let response = ui.add_enabled(
                !view.busy,
                egui::TextEdit::singleline(&mut input)
                    .hint_text("Enter link")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                out.push(Msg::InputChanged(input));
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                out.push(Msg::SubmitPressed);
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading("Import List");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear Queue").clicked() {
                    out.push(Msg::ClearQueuePressed);
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                egui::Grid::new("queue")
                    .num_columns(3)
                    .striped(true)
                    .min_col_width(120.0)
                    .show(ui, |ui| {
                        ui.strong("Artist");
                        ui.strong("Title");
                        ui.strong("Status");
                        ui.end_row();
                        for row in &view.rows {
                            ui.label(&row.artist);
                            ui.label(&row.title);
                            ui.label(row.status.label());
                            ui.end_row();
                        }
                    });
            });
    });
}

fn settings_window(ctx: &egui::Context, view: &AppViewModel, out: &mut Vec<Msg>) {
    let Some(form) = &view.settings else {
        return;
    };

    let mut open = true;
    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            let mut draft = form.draft.clone();
            let mut changed = false;

            egui::Grid::new("settings_fields")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Client ID");
                    changed |= ui.text_edit_singleline(&mut draft.client_id).changed();
                    ui.end_row();

                    ui.label("Client Secret");
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut draft.client_secret).password(true))
                        .changed();
                    ui.end_row();

                    ui.label("Sleep Interval (s)");
                    changed |= ui
                        .add(egui::DragValue::new(&mut draft.sleep_interval_seconds))
                        .changed();
                    ui.end_row();
                });
            if changed {
                out.push(Msg::SettingsEdited(draft));
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    out.push(Msg::SettingsSavePressed);
                }
                if form.save_notice {
                    ui.colored_label(egui::Color32::from_rgb(34, 197, 94), "Saved");
                }
            });
        });
    if !open {
        out.push(Msg::SettingsClosed);
    }
}

fn style_color(style: ProgressStyle) -> egui::Color32 {
    match style {
        ProgressStyle::Info => egui::Color32::from_rgb(59, 130, 246),
        ProgressStyle::Active => egui::Color32::from_rgb(124, 58, 237),
        ProgressStyle::Attention => egui::Color32::from_rgb(220, 38, 38),
        ProgressStyle::Settled => egui::Color32::from_rgb(55, 65, 81),
    }
}
