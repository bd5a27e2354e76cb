// ui.rs - egui front end: board, controls, statistics and the cell history window

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2};
use std::time::Instant;
use toroidal_life::history::CellHistoryView;
use toroidal_life::patterns;

use crate::LifeApp;

const CHART_SIZE: Vec2 = Vec2::new(520.0, 180.0);

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.driver.is_due(now) {
            self.engine.step();
            self.driver.mark_ticked(now);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Toroidal Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.driver.is_running() { "⏸ Stop" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    if self.driver.is_running() {
                        self.driver.stop();
                    } else {
                        self.driver.start();
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }

                if ui.selectable_label(self.is_drawing, "✏ Draw").clicked() {
                    self.is_drawing = !self.is_drawing;
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = self.driver.ticks_per_second() as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.driver.set_ticks_per_second(f64::from(speed));
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            if self.is_drawing {
                ui.label("Drag over the board to bring cells to life. Drawing pauses the simulation.");
            } else {
                ui.label("Click a cell to open its history.");
            }

            ui.separator();

            self.show_board(ui);

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", self.engine.generation_count()));
                ui.label(format!("Live cells: {}", self.engine.live_count()));
            });
        });

        self.show_history_window(ctx);

        if self.driver.is_running() {
            ctx.request_repaint();
        }
    }
}

impl LifeApp {
    fn show_board(&mut self, ui: &mut egui::Ui) {
        let cols = self.engine.cols();
        let rows = self.engine.rows();
        let size = self.cell_size;
        let total_size = Vec2::new(cols as f32 * size, rows as f32 * size);

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, Color32::BLACK);

        for ((x, y), cell) in self.engine.board().iter() {
            let rect = Rect::from_min_size(
                origin + Vec2::new(x as f32 * size, y as f32 * size),
                Vec2::splat(size),
            );
            let color = if cell.is_alive() { self.live_color } else { self.dead_color };
            painter.rect_filled(rect.shrink(0.5), 1.0, color);

            let stroke = if self.engine.board().is_border(x, y) {
                Stroke::new(0.5, Color32::from_gray(90))
            } else {
                Stroke::new(0.2, Color32::from_gray(60))
            };
            painter.rect_stroke(rect.shrink(0.5), 1.0, stroke);
        }

        let cell_at = |pos: Pos2| -> Option<(usize, usize)> {
            let local = pos - origin;
            if local.x < 0.0 || local.y < 0.0 {
                return None;
            }
            let (x, y) = ((local.x / size) as usize, (local.y / size) as usize);
            (x < cols && y < rows).then_some((x, y))
        };

        if self.is_drawing {
            if response.is_pointer_button_down_on() {
                if let Some((x, y)) = response.interact_pointer_pos().and_then(cell_at) {
                    self.draw_at(x, y);
                }
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos().and_then(cell_at) {
                self.viewed_cell = Some(pos);
            }
        }
    }

    fn show_history_window(&mut self, ctx: &egui::Context) {
        let Some((x, y)) = self.viewed_cell else {
            return;
        };
        let Some(view) = CellHistoryView::capture(&self.engine, x, y) else {
            self.viewed_cell = None;
            return;
        };

        let mut open = true;
        egui::Window::new("Cell History")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Position: ({x}, {y})"));
                ui.label(format!("Current State: {}", view.state_label()));
                ui.label(format!("Alive Percentage: {}", view.alive_percentage()));
                ui.separator();
                history_chart(ui, &view, self.live_color);
            });

        if !open {
            self.viewed_cell = None;
        }
    }
}

/// Line chart of the cell's states, oldest generation on the left.
fn history_chart(ui: &mut egui::Ui, view: &CellHistoryView, color: Color32) {
    let (response, painter) = ui.allocate_painter(CHART_SIZE, egui::Sense::hover());
    let plot = response.rect.shrink2(Vec2::new(40.0, 20.0));
    let axis = Stroke::new(1.0, Color32::from_gray(120));
    let font = FontId::proportional(11.0);

    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
    painter.line_segment([plot.left_top(), plot.left_bottom()], axis);
    painter.text(plot.left_top(), Align2::RIGHT_CENTER, "Alive ", font.clone(), Color32::GRAY);
    painter.text(plot.left_bottom(), Align2::RIGHT_CENTER, "Dead ", font.clone(), Color32::GRAY);

    let last = view.series.len().saturating_sub(1).max(1) as f32;
    let points: Vec<Pos2> = view
        .series
        .iter()
        .enumerate()
        .map(|(i, &(_, state))| {
            let px = plot.left() + plot.width() * i as f32 / last;
            let py = plot.bottom() - plot.height() * f32::from(state);
            Pos2::new(px, py)
        })
        .collect();

    if points.len() > 1 {
        painter.add(Shape::line(points.clone(), Stroke::new(2.0, color)));
    }
    for point in &points {
        painter.circle_filled(*point, 3.0, color);
    }

    if let (Some(first), Some(newest)) = (view.series.first(), view.series.last()) {
        painter.text(
            plot.left_bottom() + Vec2::new(0.0, 10.0),
            Align2::CENTER_CENTER,
            first.0.to_string(),
            font.clone(),
            Color32::GRAY,
        );
        painter.text(
            plot.right_bottom() + Vec2::new(0.0, 10.0),
            Align2::CENTER_CENTER,
            newest.0.to_string(),
            font,
            Color32::GRAY,
        );
    }
}
