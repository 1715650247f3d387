//! Runs controller effects against the service, renderer and exporter.

use std::{collections::VecDeque, sync::Arc};

use crate::{
    controller::{Command, Controller, Effect, UiState},
    export::{ReportExporter, ReportSink},
    render::{ChartBackend, RenderedResults, ResultsRenderer},
    service::AnalysisService,
    view::ViewModel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
    Info(String),
}

pub struct AnalysisDriver {
    controller: Controller,
    service: Arc<dyn AnalysisService>,
    renderer: ResultsRenderer,
    exporter: ReportExporter,
    notifications: Vec<Notification>,
}

impl AnalysisDriver {
    pub fn new(
        service: Arc<dyn AnalysisService>,
        chart: Box<dyn ChartBackend>,
        sink: Box<dyn ReportSink>,
    ) -> Self {
        Self {
            controller: Controller::new(),
            exporter: ReportExporter::new(service.clone(), sink),
            service,
            renderer: ResultsRenderer::new(chart),
            notifications: Vec::new(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn state(&self) -> UiState {
        self.controller.state()
    }

    pub fn view_model(&self) -> ViewModel {
        self.controller.view_model()
    }

    pub fn rendered(&self) -> Option<&RenderedResults> {
        self.renderer.last()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Applies a command and runs every effect it produces, including the
    /// follow-up commands fed back when network calls settle.
    pub async fn dispatch(&mut self, command: Command) {
        let mut pending: VecDeque<Effect> = self.controller.update(command).into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::CallAnalyze(request) => {
                    let outcome = self.service.analyze(request).await;
                    pending.extend(self.controller.update(Command::AnalysisSettled(outcome)));
                }
                Effect::Render(result) => {
                    self.renderer.render(&result);
                }
                Effect::Export => {
                    let saved = self.exporter.export(self.controller.session()).await;
                    pending.extend(self.controller.update(Command::ExportSettled(saved)));
                }
                Effect::ShowError(message) => {
                    self.notifications.push(Notification::Error(message));
                }
                Effect::Notice(message) => {
                    self.notifications.push(Notification::Info(message));
                }
            }
        }
    }
}
