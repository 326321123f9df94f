use std::collections::HashMap;

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, TextureHandle, TextureOptions, Vec2};
use futures::executor::block_on;
use log::{debug, info};
use uuid::Uuid;

use crate::capability::desktop::{BadgeCompositor, FolderGallery, StillCamera};
use crate::capability::{Camera, Compositor, Gallery, PhotoRef};
use crate::config::AppConfig;
use crate::state::AppState;
use crate::sticker::StickerId;

const STICKER_HIT_SIZE: f32 = 48.0;
const STICKER_FONT_SIZE: f32 = 36.0;
const CAMERA_PREVIEW_SIZE: Vec2 = Vec2::new(320.0, 240.0);

/// Something the user did this frame, applied once the UI pass is over
#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    Tap,
    SetName(String),
    PickPicture,
    OpenCamera,
    Shutter,
    CancelCamera,
    PlaceSticker(usize),
    Press(StickerId, Pos2),
    Move(StickerId, Pos2),
    ReleaseAll(Option<Pos2>),
    Save,
    Done,
    DismissNotice,
}

impl UiAction {
    /// Actions still honoured while a notice blocks the screen
    fn allowed_while_blocked(&self) -> bool {
        matches!(self, Self::DismissNotice | Self::ReleaseAll(_))
    }
}

/// Decoded photos, keyed by photo id. `None` marks a photo that failed to decode.
#[derive(Default)]
struct TextureCache {
    textures: HashMap<Uuid, Option<TextureHandle>>,
}

impl TextureCache {
    fn get_or_load(&mut self, ctx: &egui::Context, photo: &PhotoRef) -> Option<TextureHandle> {
        self.textures
            .entry(photo.id())
            .or_insert_with(|| Self::load(ctx, photo))
            .clone()
    }

    fn load(ctx: &egui::Context, photo: &PhotoRef) -> Option<TextureHandle> {
        let decoded = match image::load_from_memory(photo.encoded()) {
            Ok(decoded) => decoded,
            Err(err) => {
                log::error!("Failed to decode photo {}: {}", photo.id(), err);
                return None;
            }
        };
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        Some(ctx.load_texture(format!("photo_{}", photo.id()), color_image, TextureOptions::LINEAR))
    }

    fn retain(&mut self, keep: &[Uuid]) {
        self.textures.retain(|id, _| keep.contains(id));
    }
}

/// The single-screen sticker booth
pub struct SelfieApp {
    state: AppState,
    camera: Box<dyn Camera>,
    gallery: Box<dyn Gallery>,
    compositor: Box<dyn Compositor>,
    name_buffer: String,
    status: Option<String>,
    textures: TextureCache,
}

impl SelfieApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let camera = StillCamera::new(config.camera_source.clone(), config.camera_permission);
        let gallery = FolderGallery::new(config.gallery_dir.clone(), config.gallery_permission);
        Self::with_capabilities(
            config,
            Box::new(camera),
            Box::new(gallery),
            Box::new(BadgeCompositor::default()),
        )
    }

    pub fn with_capabilities(
        config: AppConfig,
        camera: Box<dyn Camera>,
        gallery: Box<dyn Gallery>,
        compositor: Box<dyn Compositor>,
    ) -> Self {
        Self {
            state: AppState::new(config),
            camera,
            gallery,
            compositor,
            name_buffer: String::new(),
            status: None,
            textures: TextureCache::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn idle_ui(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading(format!("🦷 {} 🦷", self.state.profile().greeting()));
            ui.label("Welcome to your selfie sticker booth!");
            ui.add_space(12.0);

            if let Some(picture) = self.state.profile().picture().cloned() {
                if let Some(texture) = self.textures.get_or_load(ui.ctx(), &picture) {
                    ui.add(
                        egui::Image::new(&texture)
                            .fit_to_exact_size(Vec2::splat(96.0))
                            .rounding(48.0),
                    );
                }
            }
            if ui.button("Choose profile picture").clicked() {
                actions.push(UiAction::PickPicture);
            }

            ui.horizontal(|ui| {
                ui.label("Your name:");
                let response = ui.text_edit_singleline(&mut self.name_buffer);
                if response.changed() {
                    actions.push(UiAction::SetName(self.name_buffer.clone()));
                }
            });

            ui.add_space(12.0);
            if ui.button("Tap Me!").clicked() {
                actions.push(UiAction::Tap);
            }
            if let Some(message) = self.state.profile().tap_message() {
                ui.label(message);
            }

            ui.separator();
            if ui.button("📷 Take a selfie").clicked() {
                actions.push(UiAction::OpenCamera);
            }
        });
    }

    fn camera_ui(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.vertical_centered(|ui| {
            ui.heading("Smile!");
            let (rect, _) = ui.allocate_exact_size(CAMERA_PREVIEW_SIZE, Sense::hover());
            ui.painter().rect_filled(rect, 8.0, Color32::from_gray(30));
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Camera preview",
                FontId::proportional(18.0),
                Color32::WHITE,
            );
            ui.horizontal(|ui| {
                if ui.button("📸 Snap").clicked() {
                    actions.push(UiAction::Shutter);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::CancelCamera);
                }
            });
        });
    }

    fn editing_ui(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let Some(editing) = self.state.editing() else {
            return;
        };
        let photo = editing.photo().clone();
        let any_touch = editing.has_active_gestures();
        let stickers: Vec<(StickerId, String, Pos2, bool)> = editing
            .stickers()
            .iter()
            .map(|s| {
                let position = editing.displayed_position(s.id()).unwrap_or(s.position());
                (s.id(), s.glyph().to_owned(), position, editing.is_touching(s.id()))
            })
            .collect();
        let palette: Vec<String> = self.state.palette().iter().map(str::to_owned).collect();

        ui.horizontal_wrapped(|ui| {
            for (index, glyph) in palette.iter().enumerate() {
                if ui.button(egui::RichText::new(glyph).size(24.0)).clicked() {
                    actions.push(UiAction::PlaceSticker(index));
                }
            }
        });

        let [width, height] = photo.size();
        let scale = (ui.available_width() / width.max(1) as f32).clamp(0.1, 1.0);
        let display_size = Vec2::new(width as f32, height as f32) * scale;
        let (rect, _) = ui.allocate_exact_size(display_size, Sense::hover());
        match self.textures.get_or_load(ui.ctx(), &photo) {
            Some(texture) => {
                ui.painter().image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                ui.painter().rect_filled(rect, 0.0, Color32::from_gray(200));
            }
        }

        // Sticker positions live in photo pixels; the pointer lives in screen points.
        let to_photo = |screen: Pos2| Pos2::ZERO + (screen - rect.min) / scale;
        let (pressed, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });

        let count = stickers.len();
        let mut pressed_on = None;
        for (id, glyph, position, touching) in stickers {
            let center = rect.min + position.to_vec2() * scale;
            let hit = Rect::from_center_size(center, Vec2::splat(STICKER_HIT_SIZE));
            let response = ui.interact(hit, ui.id().with(id), Sense::click_and_drag());
            ui.painter().text(
                center,
                Align2::CENTER_CENTER,
                &glyph,
                FontId::proportional(STICKER_FONT_SIZE),
                Color32::WHITE,
            );

            let Some(pointer) = pointer else {
                continue;
            };
            if touching {
                if !released {
                    actions.push(UiAction::Move(id, to_photo(pointer)));
                }
            } else if pressed && response.hovered() {
                // Later stickers are drawn on top, so they win the press
                pressed_on = Some((id, to_photo(pointer)));
            }
        }
        if let Some((id, pointer)) = pressed_on {
            actions.push(UiAction::Press(id, pointer));
        }
        // The pointer can lift off a sticker that no longer exists, or off-screen
        if released && any_touch {
            actions.push(UiAction::ReleaseAll(pointer.map(to_photo)));
        }

        ui.horizontal(|ui| {
            if ui.button("💾 Save").clicked() {
                actions.push(UiAction::Save);
            }
            if ui.button("Done").clicked() {
                actions.push(UiAction::Done);
            }
            ui.label(format!("{count} stickers, long-press one to remove it"));
        });
        if let Some(status) = &self.status {
            ui.label(status);
        }
    }

    fn apply(&mut self, action: UiAction, now: f64) {
        match action {
            UiAction::Tap => {
                self.state.profile_mut().tap();
            }
            UiAction::SetName(name) => self.state.profile_mut().set_user_name(&name),
            UiAction::PickPicture => {
                if let Err(err) = block_on(self.state.pick_profile_picture(self.gallery.as_mut())) {
                    debug!("Profile picture unchanged: {}", err);
                }
            }
            UiAction::OpenCamera => {
                if let Err(err) = block_on(self.state.open_camera(self.camera.as_mut())) {
                    debug!("Camera not opened: {}", err);
                }
            }
            UiAction::Shutter => {
                self.status = None;
                if let Err(err) = block_on(self.state.take_photo(self.camera.as_mut())) {
                    debug!("No photo taken: {}", err);
                }
            }
            UiAction::CancelCamera => {
                if let Err(err) = self.state.cancel_camera() {
                    debug!("{}", err);
                }
            }
            UiAction::PlaceSticker(index) => match self.state.place_sticker(index) {
                Ok(Some(_)) => {}
                Ok(None) => debug!("No palette entry at {}", index),
                Err(err) => debug!("{}", err),
            },
            UiAction::Press(id, pointer) => {
                if let Some(editing) = self.state.editing_mut() {
                    editing.press(id, pointer, now);
                }
            }
            UiAction::Move(id, pointer) => {
                if let Some(editing) = self.state.editing_mut() {
                    editing.pointer_moved(id, pointer, now);
                }
            }
            UiAction::ReleaseAll(pointer) => {
                if let Some(editing) = self.state.editing_mut() {
                    for (id, outcome) in editing.release_all(pointer, now) {
                        debug!("Released sticker {}: {:?}", id, outcome);
                    }
                }
            }
            UiAction::Save => {
                match block_on(self.state.save_photo(self.gallery.as_mut(), self.compositor.as_ref())) {
                    Ok(encoded) => {
                        info!("Saved composite ({} bytes)", encoded.len());
                        self.status = Some("Saved to your photos!".to_owned());
                    }
                    Err(err) => debug!("Save failed: {}", err),
                }
            }
            UiAction::Done => {
                if let Err(err) = self.state.finish_editing() {
                    debug!("{}", err);
                }
                self.status = None;
            }
            UiAction::DismissNotice => {
                self.state.dismiss_notice();
            }
        }
    }
}

impl eframe::App for SelfieApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        let mut actions = Vec::new();

        if let Some(editing) = self.state.editing_mut() {
            for id in editing.poll_gestures(now) {
                debug!("Sticker {} removed by long press", id);
            }
            // Keep frames coming so a stationary hold still times out
            if editing.has_active_gestures() {
                ctx.request_repaint();
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session().is_idle() {
                self.idle_ui(ui, &mut actions);
            } else if self.state.session().is_camera_active() {
                self.camera_ui(ui, &mut actions);
            } else {
                self.editing_ui(ui, &mut actions);
            }
        });

        let blocked = match self.state.notices().front() {
            Some(notice) => {
                let message = notice.message.clone();
                egui::Window::new("Notice")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                    .show(ctx, |ui| {
                        ui.label(message);
                        if ui.button("OK").clicked() {
                            actions.push(UiAction::DismissNotice);
                        }
                    });
                true
            }
            None => false,
        };

        for action in actions {
            if blocked && !action.allowed_while_blocked() {
                continue;
            }
            self.apply(action, now);
        }

        let mut in_use = Vec::new();
        if let Some(editing) = self.state.editing() {
            in_use.push(editing.photo().id());
        }
        if let Some(picture) = self.state.profile().picture() {
            in_use.push(picture.id());
        }
        self.textures.retain(&in_use);
    }
}
