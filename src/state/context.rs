//! The single application-state value of the screen.
//!
//! `AppState` owns the session, the landing-screen profile and the pending
//! notices. Every user action is one method here, so each transition can be
//! followed in one place.
//!
//! # Failures
//!
//! A failing action leaves the session exactly as it was and queues a
//! [`Notice`] for the user. The returned error is for callers that want to log
//! or assert on it; nothing else needs to be cleaned up.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::executor::block_on;
//! use selfie_stickers::AppState;
//! use selfie_stickers::capability::desktop::StillCamera;
//! use selfie_stickers::config::Permission;
//!
//! let mut state = AppState::default();
//! let mut camera = StillCamera::new(None, Permission::Granted);
//!
//! block_on(state.open_camera(&mut camera)).unwrap();
//! block_on(state.take_photo(&mut camera)).unwrap();
//! state.add_sticker("⭐").unwrap();
//! state.finish_editing().unwrap();
//! ```
use log::info;

use super::session::{EditingSession, Session};
use crate::capability::{Camera, Capability, Compositor, Gallery, GalleryAccess};
use crate::config::AppConfig;
use crate::error::{Error, ExportError, TransitionError};
use crate::export;
use crate::notice::{Notice, Notices};
use crate::profile::Profile;
use crate::sticker::{Palette, Sticker};

#[derive(Debug, Default)]
pub struct AppState {
    session: Session,
    profile: Profile,
    notices: Notices,
    config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn editing(&self) -> Option<&EditingSession> {
        self.session.editing()
    }

    /// Access for gesture handling while editing
    pub fn editing_mut(&mut self) -> Option<&mut EditingSession> {
        self.session.editing_mut()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.dismiss()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    fn not_allowed(&self, action: &'static str) -> TransitionError {
        TransitionError {
            action,
            state: self.session.name(),
        }
    }

    fn fail(&mut self, error: Error) -> Error {
        self.notices.push(Notice::from(&error));
        error
    }

    /// Idle -> CameraActive, once camera access is granted
    pub async fn open_camera(&mut self, camera: &mut dyn Camera) -> Result<(), Error> {
        if !self.session.is_idle() {
            let error = self.not_allowed("open the camera").into();
            return Err(self.fail(error));
        }
        if !camera.request_authorization().await.is_granted() {
            return Err(self.fail(Error::AuthorizationDenied(Capability::Camera)));
        }
        self.session = Session::CameraActive;
        info!("Camera opened");
        Ok(())
    }

    /// CameraActive -> Editing with an empty sticker collection
    pub async fn take_photo(&mut self, camera: &mut dyn Camera) -> Result<(), Error> {
        if !self.session.is_camera_active() {
            let error = self.not_allowed("take a photo").into();
            return Err(self.fail(error));
        }
        let photo = match camera.capture().await {
            Ok(photo) => photo,
            Err(err) => return Err(self.fail(err.into())),
        };
        info!("Captured photo {} ({:?})", photo.id(), photo.size());
        self.session = Session::Editing(EditingSession::new(
            photo,
            self.config.default_sticker_position,
            self.config.gesture(),
        ));
        Ok(())
    }

    /// CameraActive -> Idle
    pub fn cancel_camera(&mut self) -> Result<(), TransitionError> {
        if !self.session.is_camera_active() {
            return Err(self.not_allowed("cancel the camera"));
        }
        self.session = Session::Idle;
        info!("Camera cancelled");
        Ok(())
    }

    /// Editing -> Idle, dropping the photo and its stickers
    pub fn finish_editing(&mut self) -> Result<(), TransitionError> {
        let Session::Editing(editing) = &self.session else {
            return Err(self.not_allowed("finish editing"));
        };
        info!(
            "Finished editing photo {}, discarding {} stickers",
            editing.photo().id(),
            editing.stickers().len()
        );
        self.session = Session::Idle;
        Ok(())
    }

    pub fn add_sticker(&mut self, glyph: &str) -> Result<Sticker, TransitionError> {
        let error = self.not_allowed("place a sticker");
        self.session
            .editing_mut()
            .map(|editing| editing.add_sticker(glyph))
            .ok_or(error)
    }

    /// Places the palette glyph at `index`; `Ok(None)` when the index is out of range
    pub fn place_sticker(&mut self, index: usize) -> Result<Option<Sticker>, TransitionError> {
        let Some(glyph) = self.config.palette.get(index).map(str::to_owned) else {
            return if self.session.is_editing() {
                Ok(None)
            } else {
                Err(self.not_allowed("place a sticker"))
            };
        };
        self.add_sticker(&glyph).map(Some)
    }

    /// Saves the composite to the gallery. The session is unchanged either way.
    pub async fn save_photo(
        &mut self,
        gallery: &mut dyn Gallery,
        compositor: &dyn Compositor,
    ) -> Result<Vec<u8>, ExportError> {
        let not_editing = self.not_allowed("save a photo");
        let result = match self.session.editing_mut() {
            Some(editing) => export::export(editing, gallery, compositor).await,
            None => Err(not_editing.into()),
        };
        if let Err(err) = &result {
            self.notices.push(Notice::from(err));
        }
        result
    }

    /// Lets the user choose a profile picture from the gallery.
    ///
    /// Returns false when the picker was dismissed without a choice.
    pub async fn pick_profile_picture(&mut self, gallery: &mut dyn Gallery) -> Result<bool, Error> {
        if !gallery
            .request_authorization(GalleryAccess::Read)
            .await
            .is_granted()
        {
            return Err(self.fail(Error::AuthorizationDenied(Capability::Gallery)));
        }
        match gallery.pick().await {
            Ok(Some(picture)) => {
                info!("Profile picture set to {}", picture.id());
                self.profile.set_picture(picture);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => Err(self.fail(err.into())),
        }
    }
}
