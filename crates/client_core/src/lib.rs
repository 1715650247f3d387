pub mod controller;
mod driver;
pub mod error;
pub mod export;
pub mod input;
pub mod render;
pub mod service;
pub mod view;

pub use controller::{Command, Controller, Effect, Session, UiState};
pub use driver::{AnalysisDriver, Notification};
pub use error::ServiceError;
pub use export::{DirectorySink, ReportExporter, ReportSink};
pub use input::{AnalysisRequest, FileInput, InputError, InputForm, TabIndicator};
pub use render::{
    present, ChartBackend, ChartHandle, ProportionChart, RenderedResults, ResultsRenderer,
};
pub use service::{AnalysisOutcome, AnalysisService, HttpAnalysisService};
pub use view::{view, ViewModel};

#[cfg(test)]
#[path = "tests/support.rs"]
mod support;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod render_tests;

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod service_tests;

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
