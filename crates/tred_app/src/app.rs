use egui::text::TextFormat;
use egui::{FontId, RichText, ScrollArea, TextEdit, TopBottomPanel};
use tracing::warn;
use tred_core::appearance::{CommentSettings, Rgb};
use tred_core::formats::po::PoUnit;
use tred_core::formats::xliff::XliffUnit;
use tred_core::highlight::HighlightStyle;
use tred_core::search::SearchScope;

use crate::actions::HostAction;
use crate::driver::EditorDriver;
use crate::egui_render::{comment_layout_job, emphasis_format, highlighted_job};
use crate::prefs::save_comment_prefs;
use crate::state::Catalog;

pub fn launch(catalog: Catalog, settings: CommentSettings) -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "tred",
        options,
        Box::new(
            move |_cc: &eframe::CreationContext<'_>| -> Box<dyn eframe::App> {
                Box::new(TredApp::new(catalog, &settings))
            },
        ),
    )
}

/// A small catalog so the shell has something to show.
pub fn demo_catalog() -> Catalog {
    Catalog::new(vec![
        PoUnit::from_comment_lines(
            "Open file",
            "Ouvrir un fichier",
            &["# shown in the File menu", "#: src/menu.c:42"],
        )
        .into(),
        PoUnit::new("Save", "Enregistrer").into(),
        XliffUnit::new("Quit", "Quitter")
            .with_note(Some("developer"), "keep it short")
            .into(),
    ])
}

pub struct TredApp {
    driver: EditorDriver,
    query: String,
}

impl TredApp {
    pub fn new(catalog: Catalog, settings: &CommentSettings) -> Self {
        Self {
            driver: EditorDriver::new(catalog, settings),
            query: String::new(),
        }
    }

    fn run_action(&mut self, action: HostAction) {
        if let Err(err) = self.driver.dispatch(action) {
            warn!(%err, "action failed");
        }
    }

    fn apply_settings(&mut self, settings: CommentSettings) {
        if let Err(err) = save_comment_prefs(&settings) {
            warn!(%err, "comment prefs not saved");
        }
        self.run_action(HostAction::ApplySettings(settings));
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.driver.snapshot();
        let mut find = false;
        let mut show_comment = snapshot.comment_dock_shown;
        ui.horizontal(|ui| {
            ui.label("Find");
            let response = ui.text_edit_singleline(&mut self.query);
            let submitted =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
            find = ui.button("Next").clicked() || submitted;
            ui.checkbox(&mut show_comment, "Show comment");
            if snapshot.dirty {
                ui.label(RichText::new("modified").weak());
            }
            ui.label(snapshot.status.as_str());
        });
        if find {
            let query = self.query.clone();
            self.run_action(HostAction::FindNext {
                query,
                scope: SearchScope::All,
            });
        }
        if show_comment != snapshot.comment_dock_shown {
            self.run_action(if show_comment {
                HostAction::ShowCommentPanel
            } else {
                HostAction::CloseCommentPanel
            });
        }
    }

    fn draw_units(&mut self, ui: &mut egui::Ui) {
        let selected = self.driver.snapshot().selected;
        let mut clicked = None;
        for (index, label) in self.driver.unit_labels().into_iter().enumerate() {
            if ui.selectable_label(selected == Some(index), label).clicked() {
                clicked = Some(index);
            }
        }
        if let Some(index) = clicked {
            self.run_action(HostAction::SelectUnit(Some(index)));
        }
    }

    fn draw_text_fields(&mut self, ui: &mut egui::Ui) {
        let fallback = ui.visuals().text_color();
        let state = self.driver.state();
        for (title, panel) in [("Source", &state.source), ("Target", &state.target)] {
            ui.label(RichText::new(title).strong());
            let panel = panel.borrow();
            let base = TextFormat {
                font_id: FontId::proportional(14.0),
                color: fallback,
                ..Default::default()
            };
            let emphasis = emphasis_format(&HighlightStyle::default(), &base);
            ui.label(highlighted_job(panel.text(), panel.highlight_run(), base, emphasis));
            ui.separator();
        }
    }

    fn draw_comment(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.driver.snapshot();
        let appearance = self.driver.state().comment.borrow().appearance().clone();
        let fallback = ui.visuals().text_color();
        let mut rgb = appearance
            .text_color
            .map_or([fallback.r(), fallback.g(), fallback.b()], |c| [c.r, c.g, c.b]);
        let mut close = false;
        let mut recolor = false;
        ui.horizontal(|ui| {
            ui.heading("Comment");
            recolor = ui.color_edit_button_srgb(&mut rgb).changed();
            close = ui.small_button("x").clicked();
        });
        if recolor {
            self.apply_settings(CommentSettings {
                text_color: Some(Rgb::new(rgb[0], rgb[1], rgb[2])),
                font: appearance.font,
            });
        }
        if snapshot.location_visible {
            ui.label(RichText::new(snapshot.location_text.as_str()).italics().weak());
        }

        let panel = self.driver.state().comment.clone();
        let mut buffer = snapshot.comment_text.clone();
        let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
            let job = comment_layout_job(&panel.borrow(), text, wrap_width, fallback);
            ui.fonts(|fonts| fonts.layout_job(job))
        };
        let response = ui.add_enabled(
            snapshot.comment_enabled,
            TextEdit::multiline(&mut buffer)
                .desired_rows(4)
                .desired_width(f32::INFINITY)
                .layouter(&mut layouter),
        );

        if response.changed() {
            self.run_action(HostAction::SetCommentText(buffer));
        }
        if response.lost_focus() {
            self.run_action(HostAction::CommitComment);
        }
        if close {
            self.run_action(HostAction::CloseCommentPanel);
        }
    }
}

impl eframe::App for TredApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("toolbar").show(ctx, |ui| self.draw_toolbar(ui));
        egui::SidePanel::left("units")
            .resizable(true)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| self.draw_units(ui));
            });
        if self.driver.snapshot().comment_dock_shown {
            TopBottomPanel::bottom("comment")
                .resizable(true)
                .show(ctx, |ui| self.draw_comment(ui));
        }
        egui::CentralPanel::default().show(ctx, |ui| self.draw_text_fields(ui));
        if self.driver.end_frame() {
            ctx.request_repaint();
        }
    }
}
