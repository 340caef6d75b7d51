use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use eframe::egui::{
    self, Align, Color32, InputState, Key, Layout, Modifiers, PointerButton, RichText, Vec2,
};
use eframe::Frame;
use lib_art::constants::MAX_GRID_DIMENSION;
use lib_art::{Cell, Channel, EditorConfig, Mode, Position, Session, SessionError};
use log::{error, info, warn};

use crate::canvas::{self, CanvasLayout};
use crate::filemanager::{self, FileDialogError};
use crate::viewport::Viewport;

const SIDE_PANEL_WIDTH: f32 = 300.0;
const SLOT_SIZE: f32 = 22.0;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SizeAction {
    New,
    Resize,
}

impl SizeAction {
    fn title(self) -> &'static str {
        match self {
            SizeAction::New => "New texture",
            SizeAction::Resize => "Resize",
        }
    }
}

struct SizeDialog {
    action: SizeAction,
    width: usize,
    height: usize,
}

pub struct ArtEditor {
    session: Session,
    config: EditorConfig,
    viewport: Viewport,
    show_grid_lines: bool,

    char_input: String,
    size_dialog: Option<SizeDialog>,
    current_file: Option<PathBuf>,
    status: String,

    hovered: Option<Position>,
    // Last cell sent to the session per held button
    strokes: HashMap<Channel, Position>,

    modified: Rc<RefCell<bool>>,
    brush_update: Rc<RefCell<Option<Cell>>>,
}

impl ArtEditor {
    pub fn new(config: EditorConfig) -> Result<Self, SessionError> {
        let mut session = Session::new(&config)?;

        let modified = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&modified);
        session.subscribe_grid_changed(move |_| *flag.borrow_mut() = true);

        let brush_update = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&brush_update);
        session
            .toolbar_mut()
            .subscribe_brush_changed(move |event| *sink.borrow_mut() = Some(event.0));

        info!("Editor started with a {}x{} texture", config.width, config.height);
        Ok(Self {
            session,
            config,
            viewport: Viewport::new(),
            show_grid_lines: true,
            char_input: String::new(),
            size_dialog: None,
            current_file: None,
            status: "Ready".to_string(),
            hovered: None,
            strokes: HashMap::new(),
            modified,
            brush_update,
        })
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    fn report_dialog_error(&mut self, action: &str, err: FileDialogError) {
        match err {
            FileDialogError::DialogCanceled => {}
            err => {
                error!("{} failed: {}", action, err);
                self.set_status(format!("{} failed: {}", action, err));
            }
        }
    }

    fn sync_notifications(&mut self) {
        if let Some(brush) = self.brush_update.borrow_mut().take() {
            self.char_input = brush.character.map(String::from).unwrap_or_default();
        }
    }

    fn undo(&mut self) {
        if self.session.undo() {
            self.set_status("Undo");
        }
    }

    fn redo(&mut self) {
        if self.session.redo() {
            self.set_status("Redo");
        }
    }

    fn open_texture(&mut self) {
        match filemanager::open_texture(&mut self.session) {
            Ok(path) => {
                let (width, height) = self.session.grid().dimensions();
                self.set_status(format!("Opened {} ({}x{})", path.display(), width, height));
                self.current_file = Some(path);
                *self.modified.borrow_mut() = false;
            }
            Err(err) => self.report_dialog_error("Open", err),
        }
    }

    fn save_texture(&mut self) {
        match filemanager::save_texture(&self.session) {
            Ok(path) => {
                self.set_status(format!("Saved {}", path.display()));
                self.current_file = Some(path);
                *self.modified.borrow_mut() = false;
            }
            Err(err) => self.report_dialog_error("Save", err),
        }
    }

    fn open_presets(&mut self) {
        match filemanager::open_presets() {
            Ok((path, presets)) => {
                *self.session.toolbar_mut().palette_mut() = presets;
                self.set_status(format!("Loaded presets from {}", path.display()));
            }
            Err(err) => self.report_dialog_error("Loading presets", err),
        }
    }

    fn save_presets(&mut self) {
        match filemanager::save_presets(self.session.toolbar().palette()) {
            Ok(path) => self.set_status(format!("Saved presets to {}", path.display())),
            Err(err) => self.report_dialog_error("Saving presets", err),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (redo, undo) = ctx.input_mut(|i| {
            let redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            (redo, undo)
        });

        if redo {
            self.redo();
        }
        if undo {
            self.undo();
        }
    }

    /// Routes the mouse buttons to the session: left paints, right erases.
    fn handle_pointer(&mut self, input: &InputState, hovered: bool, layout: &CanvasLayout) {
        let pos = input.pointer.interact_pos().map(|p| layout.to_position(p));

        for (button, channel) in [
            (PointerButton::Primary, Channel::Paint),
            (PointerButton::Secondary, Channel::Erase),
        ] {
            match self.strokes.get(&channel).copied() {
                None => {
                    let pressed = hovered && input.pointer.button_pressed(button);
                    let (true, Some(pos)) = (pressed, pos) else {
                        continue;
                    };
                    match self.session.press(channel, pos) {
                        Ok(()) => {
                            self.strokes.insert(channel, pos);
                        }
                        Err(err) => warn!("{}", err),
                    }
                }
                Some(last) if input.pointer.button_down(button) => {
                    if let Some(pos) = pos.filter(|pos| *pos != last) {
                        self.session.drag(channel, pos);
                        self.strokes.insert(channel, pos);
                    }
                }
                Some(_) => {
                    self.session.release(channel);
                    self.strokes.remove(&channel);
                }
            }
        }
    }

    fn draw_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New...").clicked() {
                        self.size_dialog = Some(SizeDialog {
                            action: SizeAction::New,
                            width: self.config.width,
                            height: self.config.height,
                        });
                        ui.close_menu();
                    }
                    if ui.button("Open...").clicked() {
                        ui.close_menu();
                        self.open_texture();
                    }
                    if ui.button("Save As...").clicked() {
                        ui.close_menu();
                        self.save_texture();
                    }
                    ui.separator();
                    if ui.button("Load Presets...").clicked() {
                        ui.close_menu();
                        self.open_presets();
                    }
                    if ui.button("Save Presets...").clicked() {
                        ui.close_menu();
                        self.save_presets();
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let history = self.session.history();
                    let (can_undo, can_redo) = (history.can_undo(), history.can_redo());

                    if ui.add_enabled(can_undo, egui::Button::new("Undo").shortcut_text("Ctrl+Z")).clicked() {
                        ui.close_menu();
                        self.undo();
                    }
                    if ui.add_enabled(can_redo, egui::Button::new("Redo").shortcut_text("Ctrl+Y")).clicked() {
                        ui.close_menu();
                        self.redo();
                    }
                    ui.separator();
                    if ui.button("Resize...").clicked() {
                        let (width, height) = self.session.grid().dimensions();
                        self.size_dialog = Some(SizeDialog {
                            action: SizeAction::Resize,
                            width,
                            height,
                        });
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_grid_lines, "Grid lines");
                    if ui.button("Reset view").clicked() {
                        self.viewport.reset();
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn draw_size_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.size_dialog.take() else {
            return;
        };

        let mut open = true;
        let mut apply = false;
        let title = dialog.action.title();
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("size_dialog").show(ui, |ui| {
                    ui.label("Width");
                    ui.add(egui::DragValue::new(&mut dialog.width).range(1..=MAX_GRID_DIMENSION));
                    ui.end_row();
                    ui.label("Height");
                    ui.add(egui::DragValue::new(&mut dialog.height).range(1..=MAX_GRID_DIMENSION));
                    ui.end_row();
                });
                apply = ui.button("Apply").clicked();
            });

        if !apply {
            if open {
                self.size_dialog = Some(dialog);
            }
            return;
        }

        let result = match dialog.action {
            SizeAction::Resize => self.session.resize(dialog.width, dialog.height),
            SizeAction::New => self.session.new_texture(dialog.width, dialog.height).map(|()| {
                self.current_file = None;
                self.viewport.reset();
            }),
        };

        match result {
            Ok(()) => self.set_status(format!("{} {}x{}", title, dialog.width, dialog.height)),
            Err(err) => {
                error!("{} failed: {}", title, err);
                self.set_status(err.to_string());
            }
        }
    }

    fn draw_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let (width, height) = self.session.grid().dimensions();
                    ui.label(format!("{}x{}", width, height));
                    if let Some(pos) = self.hovered {
                        ui.label(format!("({}, {})", pos.x, pos.y));
                    }
                    if *self.modified.borrow() {
                        ui.label("modified");
                    }
                    if let Some(path) = &self.current_file {
                        ui.label(path.display().to_string());
                    }
                });
            });
        });
    }

    fn draw_brush_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Brush");
        ui.add_space(4.0);

        let brush = self.session.toolbar().brush();

        ui.horizontal(|ui| {
            ui.label("Character:");
            let response = ui.add(egui::TextEdit::singleline(&mut self.char_input).desired_width(80.0));
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                match self.session.toolbar_mut().set_character_input(&self.char_input) {
                    Ok(character) => self.status = format!("Character {:?} (U+{:04X})", character, character as u32),
                    Err(err) => self.status = err.to_string(),
                }
            }
            if ui.button("x").on_hover_text("Unset character").clicked() {
                self.session.toolbar_mut().set_character(None);
            }
        });

        for (label, current, is_foreground) in [
            ("Foreground:", brush.foreground, true),
            ("Background:", brush.background, false),
        ] {
            ui.horizontal(|ui| {
                let mut enabled = current.is_some();
                let mut color = current.map_or(Color32::WHITE, canvas::to_color32);

                let toggled = ui.checkbox(&mut enabled, label).changed();
                let picked = ui
                    .add_enabled_ui(enabled, |ui| ui.color_edit_button_srgba(&mut color))
                    .inner
                    .changed();

                if toggled || picked {
                    let value = enabled.then(|| canvas::from_color32(color));
                    let toolbar = self.session.toolbar_mut();
                    if is_foreground {
                        toolbar.set_foreground(value);
                    } else {
                        toolbar.set_background(value);
                    }
                }
            });
        }

        ui.horizontal(|ui| {
            ui.label("Mode:");
            let mut mode = self.session.mode();
            ui.selectable_value(&mut mode, Mode::Pen, "Pen");
            ui.selectable_value(&mut mode, Mode::Box, "Box");
            self.session.set_mode(mode);
        });
    }

    fn draw_palette(&mut self, ui: &mut egui::Ui) {
        ui.heading("Palette");
        ui.add_space(4.0);

        let palette = self.session.toolbar().palette();
        let selected = palette.selected_position();
        let mut clicked = None;

        for row in 0..palette.rows() {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = Vec2::splat(2.0);
                for column in 0..palette.columns() {
                    let slot = palette.slot(column, row).unwrap_or_default();

                    let text = RichText::new(slot.display_char().to_string())
                        .monospace()
                        .color(slot.foreground.map_or(Color32::LIGHT_GRAY, canvas::to_color32));
                    let stroke = if (column, row) == selected {
                        egui::Stroke::new(2.0, Color32::WHITE)
                    } else {
                        egui::Stroke::new(1.0, Color32::DARK_GRAY)
                    };
                    let button = egui::Button::new(text)
                        .fill(slot.background.map_or(Color32::from_gray(32), canvas::to_color32))
                        .stroke(stroke)
                        .min_size(Vec2::splat(SLOT_SIZE));

                    if ui.add(button).clicked() {
                        clicked = Some((column, row));
                    }
                }
            });
        }

        if let Some((column, row)) = clicked {
            if let Err(err) = self.session.toolbar_mut().palette_mut().select(column, row) {
                warn!("{}", err);
            }
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let palette = self.session.toolbar_mut().palette_mut();
            if ui.button("<").clicked() {
                palette.previous();
            }
            ui.label(palette.label());
            if ui.button(">").clicked() {
                palette.next();
            }
            ui.separator();
            if ui.button("+").on_hover_text("Add preset").clicked() {
                palette.extend();
            }
            if ui.button("-").on_hover_text("Remove preset").clicked() {
                palette.shrink();
            }
            if ui.button("cl").on_hover_text("Clear preset").clicked() {
                palette.clear();
            }
        });

        ui.horizontal(|ui| {
            let toolbar = self.session.toolbar_mut();
            if ui.button("bg ↑").on_hover_text("Store background").clicked() {
                toolbar.store_background();
            }
            if ui.button("fg ↑").on_hover_text("Store foreground").clicked() {
                toolbar.store_foreground();
            }
            if ui.button("ch ↑").on_hover_text("Store character").clicked() {
                toolbar.store_character();
            }
            if ui.button("↑").on_hover_text("Store brush").clicked() {
                toolbar.store_all();
            }
            if ui.button("↓").on_hover_text("Load into brush").clicked() {
                toolbar.load_selected();
            }
        });
    }

    fn draw_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("toolbar")
            .resizable(false)
            .min_width(SIDE_PANEL_WIDTH)
            .max_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                self.draw_brush_controls(ui);
                ui.separator();
                self.draw_palette(ui);

                ui.add_space(16.0);
                ui.label("Controls:");
                ui.label("• Left click to paint");
                ui.label("• Right click to erase");
                ui.label("• Middle click to pan");
                ui.label("• Ctrl + Scroll to zoom");
            });
    }

    fn draw_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let area = response.rect;
            let input = ui.input(|i| i.clone());

            if response.hovered() || input.pointer.middle_down() {
                self.viewport.update(&input, area);
            }

            let layout = CanvasLayout::new(
                area,
                self.session.grid().dimensions(),
                self.config.zoom,
                &self.viewport,
            );

            self.hovered = input
                .pointer
                .hover_pos()
                .filter(|pos| area.contains(*pos))
                .map(|pos| layout.to_position(pos));

            self.handle_pointer(&input, response.hovered(), &layout);

            canvas::draw_grid(&painter, &layout, self.session.grid(), area, self.show_grid_lines);
            if let Some(pos) = self.hovered {
                canvas::draw_hover(&painter, &layout, pos);
            }

            if self.viewport.is_animating() {
                ctx.request_repaint();
            }
        });
    }
}

impl eframe::App for ArtEditor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.sync_notifications();
        self.handle_shortcuts(ctx);

        self.draw_menu(ctx);
        self.draw_status_bar(ctx);
        self.draw_side_panel(ctx);
        self.draw_central_panel(ctx);
        self.draw_size_dialog(ctx);
    }
}
