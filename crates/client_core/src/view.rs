use shared::domain::{AnalysisResult, InputMode};

use crate::{
    controller::UiState,
    input::TabIndicator,
    render::{present, RenderedResults},
};

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub input_visible: bool,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub file_region_visible: bool,
    pub text_region_visible: bool,
    pub file_tab: TabIndicator,
    pub text_tab: TabIndicator,
    pub error: Option<String>,
    pub results: Option<RenderedResults>,
}

pub fn view(
    state: UiState,
    result: Option<&AnalysisResult>,
    mode: InputMode,
    error: Option<&str>,
) -> ViewModel {
    let tab = |candidate: InputMode| {
        if candidate == mode {
            TabIndicator::Active
        } else {
            TabIndicator::Inactive
        }
    };
    let results = match (state, result) {
        (UiState::ResultsShown, Some(result)) => Some(present(result)),
        _ => None,
    };

    ViewModel {
        input_visible: matches!(state, UiState::Idle | UiState::ErrorShown),
        loading_visible: state == UiState::Loading,
        results_visible: results.is_some(),
        file_region_visible: mode == InputMode::File,
        text_region_visible: mode == InputMode::Text,
        file_tab: tab(InputMode::File),
        text_tab: tab(InputMode::Text),
        error: error.map(str::to_string),
        results,
    }
}
