//! Maps comment-panel state onto egui text layout.
//!
//! egui fonts have no weight axis, so the bold part of a highlight style is
//! drawn as an underline in the foreground colour.

use std::ops::Range;

use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, Stroke};
use tred_core::appearance::{CommentSettings, Rgb};
use tred_core::comment_view::CommentPanel;
use tred_core::highlight::HighlightStyle;

pub const DEFAULT_POINT_SIZE: f32 = 13.0;

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

pub fn comment_font_id(settings: &CommentSettings) -> FontId {
    match &settings.font {
        Some(font) if font.family.to_ascii_lowercase().contains("mono") => {
            FontId::monospace(font.point_size)
        }
        Some(font) => FontId::proportional(font.point_size),
        None => FontId::proportional(DEFAULT_POINT_SIZE),
    }
}

pub fn base_format(settings: &CommentSettings, fallback_color: Color32) -> TextFormat {
    TextFormat {
        font_id: comment_font_id(settings),
        color: settings.text_color.map_or(fallback_color, color32),
        ..Default::default()
    }
}

pub fn emphasis_format(style: &HighlightStyle, base: &TextFormat) -> TextFormat {
    let foreground = color32(style.foreground);
    TextFormat {
        color: foreground,
        background: color32(style.background),
        underline: if style.bold {
            Stroke::new(1.0, foreground)
        } else {
            Stroke::NONE
        },
        ..base.clone()
    }
}

/// Lays out `text` with `run` (a char range) in `emphasis`.
pub fn highlighted_job(
    text: &str,
    run: Option<Range<usize>>,
    base: TextFormat,
    emphasis: TextFormat,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    let Some(run) = run.filter(|run| !run.is_empty()) else {
        job.append(text, 0.0, base);
        return job;
    };
    let start = byte_at(text, run.start);
    let end = byte_at(text, run.end);
    for (range, format) in [
        (0..start, &base),
        (start..end, &emphasis),
        (end..text.len(), &base),
    ] {
        if !range.is_empty() {
            job.append(&text[range], 0.0, format.clone());
        }
    }
    job
}

/// Layout for the comment editor. The highlight is only drawn while the
/// widget text still matches the panel's document.
pub fn comment_layout_job(
    panel: &CommentPanel,
    text: &str,
    wrap_width: f32,
    fallback_color: Color32,
) -> LayoutJob {
    let base = base_format(panel.appearance(), fallback_color);
    let emphasis = emphasis_format(panel.highlight_style(), &base);
    let run = if text == panel.text() {
        panel.highlight_run()
    } else {
        None
    };
    let mut job = highlighted_job(text, run, base, emphasis);
    job.wrap.max_width = wrap_width;
    job
}

fn byte_at(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tred_core::appearance::FontSpec;
    use tred_core::field::FieldId;
    use tred_core::formats::xliff::XliffUnit;
    use tred_core::model::UnitRef;
    use tred_core::panel::SearchTarget;

    #[test]
    fn t_render_001_highlight_splits_sections() {
        let base = TextFormat::default();
        let emphasis = emphasis_format(&HighlightStyle::default(), &base);
        let job = highlighted_job("héllo world", Some(1..4), base, emphasis);
        assert_eq!(job.text, "héllo world");
        assert_eq!(job.sections.len(), 3);
        assert_eq!(job.sections[1].byte_range, 1..5);
        assert_eq!(
            job.sections[1].format.background,
            color32(Rgb::DARK_MAGENTA)
        );
        assert_eq!(job.sections[1].format.color, Color32::WHITE);
    }

    #[test]
    fn t_render_002_settings_drive_base_format() {
        let settings = CommentSettings {
            text_color: Some(Rgb::new(10, 20, 30)),
            font: Some(FontSpec {
                family: "JetBrains Mono".to_string(),
                point_size: 11.0,
                bold: false,
            }),
        };
        let format = base_format(&settings, Color32::BLACK);
        assert_eq!(format.color, Color32::from_rgb(10, 20, 30));
        assert_eq!(format.font_id, FontId::monospace(11.0));
        let fallback = base_format(&CommentSettings::default(), Color32::BLACK);
        assert_eq!(fallback.color, Color32::BLACK);
    }

    #[test]
    fn t_render_003_stale_widget_text_drops_highlight() {
        let unit: UnitRef = Rc::new(XliffUnit::new("s", "t").with_note(None, "abc def"));
        let mut panel = CommentPanel::default();
        panel.on_unit_selected(Some(unit));
        panel
            .highlight_search_match(FieldId::Comment, Some(4), 3)
            .expect("highlight");

        let job = comment_layout_job(&panel, "abc def", 200.0, Color32::BLACK);
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.wrap.max_width, 200.0);

        let edited = comment_layout_job(&panel, "abc defg", 200.0, Color32::BLACK);
        assert_eq!(edited.sections.len(), 1);
    }
}
