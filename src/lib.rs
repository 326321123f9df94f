#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod capability;
pub mod config;
pub mod error;
pub mod export;
pub mod gesture;
pub mod notice;
pub mod profile;
pub mod state;
pub mod sticker;

pub use app::SelfieApp;
pub use capability::{Authorization, Camera, Compositor, Gallery, PhotoRef};
pub use config::AppConfig;
pub use error::{Error, ExportError};
pub use gesture::{DragSession, GestureOutcome, GestureTracker};
pub use notice::{Notice, NoticeKind};
pub use state::{AppState, EditingSession, Session};
pub use sticker::{Sticker, StickerCollection, StickerId};
