//! Submission state machine. Commands go in, effects come out; the caller
//! performs network and render work and feeds outcomes back as commands.

use std::path::PathBuf;

use shared::domain::{AnalysisMeta, AnalysisResult, InputMode};
use tracing::{info, warn};

use crate::{
    error::ServiceError,
    input::{AnalysisRequest, InputForm},
    service::AnalysisOutcome,
    view::{view, ViewModel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    ResultsShown,
    ErrorShown,
}

/// Holds the most recent successful analysis. Overwritten on each success,
/// never cleared.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<AnalysisResult>,
    meta: Option<AnalysisMeta>,
}

impl Session {
    pub fn current_analysis(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn meta(&self) -> Option<&AnalysisMeta> {
        self.meta.as_ref()
    }

    fn store(&mut self, outcome: AnalysisOutcome) {
        self.current = Some(outcome.result);
        self.meta = outcome.meta;
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    SetMode(InputMode),
    Submit,
    AnalysisSettled(Result<AnalysisOutcome, ServiceError>),
    Export,
    ExportSettled(Result<Option<PathBuf>, ServiceError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CallAnalyze(AnalysisRequest),
    Render(AnalysisResult),
    /// Export whatever the session holds when the effect runs.
    Export,
    ShowError(String),
    Notice(String),
}

#[derive(Debug, Default)]
pub struct Controller {
    state: UiState,
    form: InputForm,
    session: Session,
    error: Option<String>,
    export_pending: bool,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut InputForm {
        &mut self.form
    }

    pub fn is_export_pending(&self) -> bool {
        self.export_pending
    }

    pub fn view_model(&self) -> ViewModel {
        view(
            self.state,
            self.session.current_analysis(),
            self.form.mode(),
            self.error.as_deref(),
        )
    }

    pub fn update(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::SetMode(mode) => {
                self.form.set_mode(mode);
                Vec::new()
            }
            Command::Submit => self.submit(),
            Command::AnalysisSettled(outcome) => self.analysis_settled(outcome),
            Command::Export => self.export(),
            Command::ExportSettled(saved) => self.export_settled(saved),
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.state == UiState::Loading {
            warn!("submit ignored: an analysis is already in flight");
            return Vec::new();
        }
        match self.form.eligible_request() {
            Ok(request) => {
                info!(mode = request.mode().label(), "submitting analysis");
                self.state = UiState::Loading;
                self.error = None;
                vec![Effect::CallAnalyze(request)]
            }
            Err(err) => {
                let message = err.to_string();
                self.error = Some(message.clone());
                vec![Effect::ShowError(message)]
            }
        }
    }

    fn analysis_settled(
        &mut self,
        outcome: Result<AnalysisOutcome, ServiceError>,
    ) -> Vec<Effect> {
        if self.state != UiState::Loading {
            warn!(state = ?self.state, "dropping analysis outcome with no submission in flight");
            return Vec::new();
        }
        match outcome {
            Ok(outcome) => {
                let result = outcome.result.clone();
                self.session.store(outcome);
                self.state = UiState::ResultsShown;
                vec![Effect::Render(result)]
            }
            Err(err) => {
                warn!(error = %err, "analysis failed");
                let message = err.user_message();
                self.state = UiState::ErrorShown;
                self.error = Some(message.clone());
                vec![Effect::ShowError(message)]
            }
        }
    }

    fn export(&mut self) -> Vec<Effect> {
        if self.session.current_analysis().is_none() {
            return Vec::new();
        }
        if self.export_pending {
            warn!("export ignored: a report download is already in flight");
            return Vec::new();
        }
        self.export_pending = true;
        vec![Effect::Export]
    }

    fn export_settled(&mut self, saved: Result<Option<PathBuf>, ServiceError>) -> Vec<Effect> {
        self.export_pending = false;
        match saved {
            Ok(None) => Vec::new(),
            Ok(Some(path)) => {
                self.error = None;
                vec![Effect::Notice(format!("Report saved to {}", path.display()))]
            }
            Err(err) => {
                warn!(error = %err, "report export failed");
                let message = err.user_message();
                self.error = Some(message.clone());
                vec![Effect::ShowError(message)]
            }
        }
    }
}
