use crate::PaintApp;
use crate::command::Command;
use crate::components::ColorSwatch;
use crate::style::{BrushStyle, PALETTE};
use crate::tools::Tool;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let now = ctx.input(|i| i.time);

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            // Commands are collected and run after the panel so the UI only
            // borrows the document immutably while drawing
            let mut commands = Vec::new();
            let tools = *app.document().tool_state();

            ui.heading("Tools");
            for tool in Tool::ALL {
                if ui.selectable_label(tools.active == tool, tool.name()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    commands.push(Command::SetTool(tool));
                }
            }
            ui.separator();

            ui.heading("Brush");
            for brush in BrushStyle::ALL {
                if ui.selectable_label(tools.paint.brush == brush, brush.name()).clicked() {
                    commands.push(Command::SetBrushStyle(brush));
                }
            }

            let (min_width, max_width) = (app.config().min_width, app.config().max_width);
            let mut width = tools.paint.width;
            let slider = egui::Slider::new(&mut width, min_width..=max_width).text("Width");
            if ui.add(slider).drag_stopped() {
                commands.push(Command::SetBrushWidth(app.config().clamp_width(width)));
            } else if width != tools.paint.width {
                // Live update while dragging, without a notification per frame
                app.document_mut().set_brush_width(width);
            }
            ui.separator();

            ui.heading("Color");
            ui.horizontal_wrapped(|ui| {
                for (color, name) in PALETTE {
                    let selected = !tools.is_erasing() && tools.paint.color == color;
                    if ColorSwatch::new(color, name, selected).show(ui).clicked() {
                        commands.push(Command::SetColor(color));
                    }
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                let document = app.document();
                if ui.add_enabled(document.can_undo(), egui::Button::new("Undo")).clicked() {
                    commands.push(Command::Undo);
                }
                if ui.add_enabled(document.can_redo(), egui::Button::new("Redo")).clicked() {
                    commands.push(Command::Redo);
                }
                if ui.button("Clear").clicked() {
                    commands.push(Command::Clear);
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Save PNG").clicked() {
                    if let Err(err) = app.export(now) {
                        log::error!("Save PNG failed: {}", err);
                    }
                }
                if ui.button("Load image…").clicked() {
                    app.pick_background(now);
                }
            });
            if app.document().background().is_some() && ui.button("Remove background").clicked() {
                commands.push(Command::SetBackground(None));
            }
            ui.separator();

            let history = app.document().history();
            ui.label(format!("Strokes: {}", app.document().strokes().len()));
            ui.label(format!("History: {} / {}", history.index() + 1, history.len()));

            for command in commands {
                app.execute_command(command, now);
            }
        });
}
