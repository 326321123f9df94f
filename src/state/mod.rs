mod context;
mod session;

pub use context::AppState;
pub use session::{EditingSession, Session};
