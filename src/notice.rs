//! Notices (toasts)

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "toast toast-success",
            NoticeKind::Error => "toast toast-error",
            NoticeKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub message: String,
    pub kind: NoticeKind,
}

/// Visible notices, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u32,
}

impl NoticeBoard {
    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.notices.push(Notice { id, message: message.into(), kind });
        id
    }

    /// No-op when the notice was already dismissed.
    pub fn dismiss(&mut self, id: u32) {
        self.notices.retain(|notice| notice.id != id);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}
