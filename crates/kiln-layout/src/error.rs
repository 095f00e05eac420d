use core::fmt;

use crate::arena::ArenaError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The arena handed to the context is smaller than the element tables need.
    ArenaCapacityExceeded,
    /// More elements were declared in one frame than the context can hold.
    ElementsCapacityExceeded,
    /// A text element was declared before a measurement function was set.
    TextMeasurementNotProvided,
    /// Two elements used the same id in one frame.
    DuplicateId,
    /// A percentage sizing was outside `0.0..=1.0`.
    PercentageOverOne,
    /// `close` without a matching `open`, or elements left open at `end_layout`.
    UnbalancedOpenClose,
    /// A floating element was attached to an id that was not declared.
    FloatingParentNotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ArenaCapacityExceeded => "arena capacity exceeded",
            Self::ElementsCapacityExceeded => "element capacity exceeded",
            Self::TextMeasurementNotProvided => "text measurement not provided",
            Self::DuplicateId => "duplicate element id",
            Self::PercentageOverOne => "percentage over one",
            Self::UnbalancedOpenClose => "unbalanced open/close",
            Self::FloatingParentNotFound => "floating parent not found",
        };
        f.write_str(s)
    }
}

/// Error reported by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    pub kind: ErrorKind,
    pub message: String,
}

impl LayoutError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for LayoutError {}

impl From<ArenaError> for LayoutError {
    fn from(err: ArenaError) -> Self {
        LayoutError::new(ErrorKind::ArenaCapacityExceeded, err.to_string())
    }
}

/// Callback invoked for every error the engine reports.
///
/// Layout errors never abort a frame; the engine reports and carries on with
/// whatever it can still lay out.
pub struct ErrorHandler(Box<dyn FnMut(&LayoutError)>);

impl ErrorHandler {
    pub fn new(handler: impl FnMut(&LayoutError) + 'static) -> Self {
        Self(Box::new(handler))
    }

    pub(crate) fn report(&mut self, err: LayoutError) {
        (self.0)(&err);
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new(|err| log::error!("layout error: {err}"))
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler(..)")
    }
}
