// src/ui.rs
use egui;

use crate::rendering_lib::frame::{RenderFrame, LABEL_COLOR};
use crate::view_lib::{Command, DisplayMode, Selection, Session};

const BUTTON_COMMANDS: [Command; 8] = [
    Command::SeedTriangle,
    Command::AddRandomVertex,
    Command::BeginVertexSelection,
    Command::CancelSelection,
    Command::ToggleDisplayMode,
    Command::ResetView,
    Command::ZoomIn,
    Command::ZoomOut,
];

/// Panel state that outlives a single frame.
#[derive(Debug, Default)]
pub struct UiState {
    pub go_to_index: usize,
}

/// Draws the control panel and vertex labels. Returns the commands clicked this frame.
pub fn build_ui(ctx: &egui::Context, state: &mut UiState, session: &Session, frame: &RenderFrame) -> Vec<Command> {
    let mut commands = Vec::new();
    let graph = session.graph();

    egui::Window::new("Controls & Info")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.label("Planar Triangulated Graph");
                ui.separator();

                for command in BUTTON_COMMANDS {
                    if ui.button(command.label()).clicked() {
                        commands.push(command);
                    }
                }
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label(Command::ShowUpTo(None).label());
                    let max = graph.vertices().len().max(1);
                    ui.add(egui::DragValue::new(&mut state.go_to_index).clamp_range(1..=max));
                    if ui.button("Go").clicked() {
                        commands.push(Command::ShowUpTo(Some(state.go_to_index)));
                    }
                    if ui.button("Show all").clicked() {
                        commands.push(Command::ShowUpTo(None));
                    }
                });
                ui.separator();

                let mode = match session.selection() {
                    Selection::Idle => "Idle".to_string(),
                    Selection::AwaitingFirst => "Select first periphery vertex".to_string(),
                    Selection::AwaitingSecond(id) => format!("First: {}, select second", id),
                };
                ui.label(format!("Mode: {}", mode));
                let display = match session.display_mode() {
                    DisplayMode::Index => "Index",
                    DisplayMode::Color => "Color",
                };
                ui.label(format!("Display: {}", display));
                ui.label(format!(
                    "V: {}  E: {}  F: {}  Periphery: {}",
                    graph.vertices().len(),
                    graph.edges().len(),
                    graph.faces().len(),
                    graph.current_periphery().len(),
                ));
                if let Some(limit) = session.visible_limit() {
                    ui.label(format!("Showing up to #{}", limit));
                }

                if !session.notices().is_empty() {
                    ui.separator();
                    for notice in session.notices().iter() {
                        ui.colored_label(egui::Color32::from_rgb(200, 60, 60), &notice.text);
                    }
                }
            });
        });

    paint_labels(ctx, frame);
    commands
}

fn paint_labels(ctx: &egui::Context, frame: &RenderFrame) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let pixels_per_point = ctx.pixels_per_point();
    let [r, g, b] = LABEL_COLOR;
    for sprite in &frame.vertices {
        let Some(label) = &sprite.label else { continue };
        let center = egui::pos2(sprite.center.x / pixels_per_point, sprite.center.y / pixels_per_point);
        let size = (sprite.radius / pixels_per_point).clamp(6.0, 32.0);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(size),
            egui::Color32::from_rgb(r, g, b),
        );
    }
}
