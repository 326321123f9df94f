use std::collections::VecDeque;

use crate::capability::Capability;
use crate::error::{Error, ExportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    CameraDenied,
    CaptureFailed,
    RenderFailed,
    WriteFailed,
    PickFailed,
    InvalidAction,
}

/// A blocking message shown to the user after a failed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&Error> for Notice {
    fn from(error: &Error) -> Self {
        match error {
            Error::AuthorizationDenied(Capability::Camera) => Self::new(
                NoticeKind::CameraDenied,
                "Camera permission is required to take a selfie.",
            ),
            Error::AuthorizationDenied(Capability::Gallery) => Self::new(
                NoticeKind::PickFailed,
                "Photo library permission is required to choose a picture.",
            ),
            Error::CaptureFailed(err) => Self::new(
                NoticeKind::CaptureFailed,
                format!("Failed to take the photo: {err}"),
            ),
            Error::PickFailed(err) => Self::new(
                NoticeKind::PickFailed,
                format!("Failed to load the picture: {err}"),
            ),
            Error::InvalidTransition(err) => Self::new(NoticeKind::InvalidAction, err.to_string()),
        }
    }
}

impl From<&ExportError> for Notice {
    fn from(error: &ExportError) -> Self {
        match error {
            ExportError::PermissionDenied => Self::new(
                NoticeKind::WriteFailed,
                "Permission to save photos was denied.",
            ),
            ExportError::Write(err) => Self::new(
                NoticeKind::WriteFailed,
                format!("Failed to save the photo: {err}"),
            ),
            ExportError::Render(err) => Self::new(
                NoticeKind::RenderFailed,
                format!("Failed to prepare the photo: {err}"),
            ),
            ExportError::Transition(err) => Self::new(NoticeKind::InvalidAction, err.to_string()),
        }
    }
}

/// Pending notices, oldest first
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        log::warn!("{:?}: {}", notice.kind, notice.message);
        self.queue.push_back(notice);
    }

    /// The notice currently on screen
    pub fn front(&self) -> Option<&Notice> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) -> Option<Notice> {
        self.queue.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_export_reads_as_write_failure() {
        let notice = Notice::from(&ExportError::PermissionDenied);
        assert_eq!(notice.kind, NoticeKind::WriteFailed);
    }

    #[test]
    fn test_notices_are_dismissed_in_order() {
        let mut notices = Notices::default();
        notices.push(Notice::new(NoticeKind::CaptureFailed, "first"));
        notices.push(Notice::new(NoticeKind::WriteFailed, "second"));

        assert_eq!(notices.front().map(|n| n.message.as_str()), Some("first"));
        notices.dismiss();
        assert_eq!(notices.front().map(|n| n.kind), Some(NoticeKind::WriteFailed));
        notices.dismiss();
        assert!(notices.is_empty());
    }
}
