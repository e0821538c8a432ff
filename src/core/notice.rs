/// Severity for operator-facing notices. Notices are rendered in the banner
/// and never become part of the conversation sent to the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Startup condition that disables generation (missing credentials).
    Blocking,

    /// Recoverable failure of a single request.
    Error,

    /// Informational status, e.g. after a reset.
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn blocking(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Blocking, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }

    pub fn is_blocking(&self) -> bool {
        self.kind == NoticeKind::Blocking
    }
}
