use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, pos2, vec2};

use paradiddle_notation::{Notehead, notation_for_note};

use crate::model::SheetModel;

/// Staff layout values, in points.
pub struct SheetWidget {
    /// Width reserved for row labels at the left edge.
    pub label_margin: f32,
    /// Playhead position as a fraction of the widget width.
    pub playhead_fraction: f32,
    /// Minimum widget height.
    pub min_height: f32,
}

impl Default for SheetWidget {
    fn default() -> Self {
        Self {
            label_margin: 60.0,
            playhead_fraction: 0.8,
            min_height: 220.0,
        }
    }
}

/// Horizontal position for a hit of the given age fraction: the playhead
/// at 0, the left edge of the note band at 1.
pub fn note_x(age_fraction: f32, band_left: f32, playhead_x: f32) -> f32 {
    playhead_x - age_fraction * (playhead_x - band_left)
}

impl SheetWidget {
    /// Paint staff lines, labels, playhead, and visible hits.
    pub fn ui(&self, ui: &mut egui::Ui, model: &SheetModel) -> egui::Response {
        let size = vec2(
            ui.available_width(),
            ui.available_height().max(self.min_height),
        );
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let num_rows = model.rows().len().max(1);
        let row_height = rect.height() / num_rows as f32;
        let staff_stroke = Stroke::new(1.0, Color32::BLACK);
        let label_font = FontId::proportional(12.0);

        for (idx, row) in model.rows().iter().enumerate() {
            let y = rect.top() + (idx as f32 + 0.5) * row_height;
            painter.line_segment(
                [
                    pos2(rect.left() + self.label_margin, y),
                    pos2(rect.right(), y),
                ],
                staff_stroke,
            );
            painter.text(
                pos2(rect.left() + 5.0, y),
                Align2::LEFT_CENTER,
                &row.label,
                label_font.clone(),
                Color32::BLACK,
            );
        }

        let playhead_x = rect.left() + rect.width() * self.playhead_fraction;
        painter.line_segment(
            [
                pos2(playhead_x, rect.top()),
                pos2(playhead_x, rect.bottom()),
            ],
            Stroke::new(2.0, Color32::RED),
        );

        let band_left = rect.left() + self.label_margin + 10.0;
        for record in model.events() {
            let Some(fraction) = model.age_fraction(record) else {
                continue;
            };
            let Some(row_idx) = model.row_of(record.note) else {
                continue;
            };
            let x = note_x(fraction, band_left, playhead_x);
            let y = rect.top() + (row_idx as f32 + 0.5) * row_height;
            let radius = (row_height * 0.3).min(10.0) * intensity_scale(record.velocity);
            draw_notehead(&painter, record.note, pos2(x, y), radius);
        }

        response
    }
}

/// Notehead radius scale by hit intensity, in [0.6, 1.0].
fn intensity_scale(velocity: u8) -> f32 {
    0.6 + 0.4 * (velocity as f32 / 127.0)
}

fn draw_notehead(painter: &egui::Painter, note: u8, center: Pos2, radius: f32) {
    let color = Color32::BLUE;
    match notation_for_note(note).map(|(notehead, _)| notehead) {
        Some(Notehead::Cross | Notehead::Plus) => {
            let stroke = Stroke::new(2.0, color);
            painter.line_segment(
                [
                    pos2(center.x - radius, center.y - radius),
                    pos2(center.x + radius, center.y + radius),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    pos2(center.x - radius, center.y + radius),
                    pos2(center.x + radius, center.y - radius),
                ],
                stroke,
            );
        }
        _ => {
            painter.circle_filled(center, radius, color);
        }
    }
}
