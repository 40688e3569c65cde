//! Confirmation gate for destructive actions.

/// Holds the item awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog<T> {
    pub title: String,
    pub message: String,
    pending: Option<T>,
}

impl<T> ConfirmDialog<T> {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            pending: None,
        }
    }

    /// Open the dialog for `item`, replacing any earlier request
    pub fn request(&mut self, item: T) {
        self.pending = Some(item);
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Close without acting
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Close and hand back the item to act on
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }
}
