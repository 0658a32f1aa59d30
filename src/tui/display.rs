//! Display sink that keeps the last rendered frame for drawing.

use crate::features::focus::{DisplaySink, SessionType};

/// One frame pushed by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rendered {
    pub remaining_seconds: u32,
    pub progress: f64,
    pub session_type: SessionType,
}

/// Holds whatever the engine rendered last; the UI draws from it.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    last: Option<Rendered>,
}

impl TerminalDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last frame, if any has been rendered.
    #[must_use]
    pub const fn last(&self) -> Option<Rendered> {
        self.last
    }
}

impl DisplaySink for TerminalDisplay {
    fn render(&mut self, remaining_seconds: u32, progress: f64, session_type: SessionType) {
        self.last = Some(Rendered {
            remaining_seconds,
            progress,
            session_type,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_frame() {
        let mut display = TerminalDisplay::new();
        assert!(display.last().is_none());

        display.render(10, 0.5, SessionType::Work);
        display.render(9, 0.55, SessionType::Work);

        let last = display.last().unwrap();
        assert_eq!(last.remaining_seconds, 9);
        assert_eq!(last.progress, 0.55);
    }
}
