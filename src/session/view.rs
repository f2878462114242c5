use std::time::{Duration, Instant};

/// How long a "copied" confirmation stays visible
pub const COPIED_RESET: Duration = Duration::from_secs(2);

/// Which extractor is in front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Json,
    Url,
}

/// Presentation-only flags, kept apart from extraction state
///
/// Copy confirmations store when they were raised and are read against a
/// caller-supplied instant, so expiry needs no timer.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub mode: Mode,
    pub file_type_menu_open: bool,
    pub regex_help_visible: bool,
    json_copied_at: Option<Instant>,
    urls_copied_at: Option<Instant>,
}

impl ViewState {
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.file_type_menu_open = false;
    }

    pub fn toggle_file_type_menu(&mut self) {
        self.file_type_menu_open = !self.file_type_menu_open;
    }

    pub fn toggle_regex_help(&mut self) {
        self.regex_help_visible = !self.regex_help_visible;
    }

    pub fn mark_copied(&mut self, mode: Mode, now: Instant) {
        match mode {
            Mode::Json => self.json_copied_at = Some(now),
            Mode::Url => self.urls_copied_at = Some(now),
        }
    }

    /// Whether the copy confirmation for `mode` is still showing at `now`
    pub fn is_copied(&self, mode: Mode, now: Instant) -> bool {
        let copied_at = match mode {
            Mode::Json => self.json_copied_at,
            Mode::Url => self.urls_copied_at,
        };
        copied_at.is_some_and(|at| now.saturating_duration_since(at) < COPIED_RESET)
    }
}
