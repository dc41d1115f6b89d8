// Tab navigation

use crate::events::ShellNavigatedPayload;
use crate::models::AppTab;
use crate::utils::lock_mutex_recover;
use serde::Serialize;
use std::sync::Mutex;

/// Which of the four screens is showing
pub struct ShellState {
    active: Mutex<AppTab>,
}

/// Serializable shell state for the browser
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellView {
    pub active_tab: AppTab,
    pub tabs: Vec<AppTab>,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(AppTab::default()),
        }
    }

    pub fn active(&self) -> AppTab {
        *lock_mutex_recover(&self.active)
    }

    /// Switch screens. Pure state transition; mounting and unmounting the
    /// affected controllers is the caller's job.
    pub fn navigate(&self, to: AppTab) -> ShellNavigatedPayload {
        let mut active = lock_mutex_recover(&self.active);
        let from = std::mem::replace(&mut *active, to);
        ShellNavigatedPayload { from, to }
    }

    pub fn view(&self) -> ShellView {
        ShellView {
            active_tab: self.active(),
            tabs: vec![AppTab::Home, AppTab::Design, AppTab::Estimate, AppTab::FindPros],
        }
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_home() {
        assert_eq!(ShellState::new().active(), AppTab::Home);
    }

    #[test]
    fn test_navigate_reports_transition() {
        let shell = ShellState::new();
        let transition = shell.navigate(AppTab::Estimate);
        assert_eq!(transition.from, AppTab::Home);
        assert_eq!(transition.to, AppTab::Estimate);

        let transition = shell.navigate(AppTab::Estimate);
        assert_eq!(transition.from, AppTab::Estimate);
        assert_eq!(shell.view().active_tab, AppTab::Estimate);
    }
}
