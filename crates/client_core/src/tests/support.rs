use std::{
    collections::{BTreeSet, VecDeque},
    path::PathBuf,
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use shared::domain::AnalysisResult;
use tokio::sync::Mutex;

use crate::{
    error::ServiceError,
    export::ReportSink,
    input::AnalysisRequest,
    render::{ChartBackend, ChartHandle, ProportionChart},
    service::{AnalysisOutcome, AnalysisService},
};

pub fn result(score: u8, verdict: &str, reasons: &[&str]) -> AnalysisResult {
    AnalysisResult {
        score,
        verdict: verdict.to_string(),
        summary: format!("summary for {verdict}"),
        reasons: reasons.iter().map(|r| r.to_string()).collect(),
    }
}

pub enum Scripted {
    Analysis(Result<AnalysisOutcome, ServiceError>),
    NeverSettles,
}

#[derive(Clone, Default)]
pub struct FakeService {
    pub analyses: Arc<Mutex<VecDeque<Scripted>>>,
    pub requests: Arc<Mutex<Vec<AnalysisRequest>>>,
    pub report_bodies: Arc<Mutex<Vec<AnalysisResult>>>,
    pub report_failure: Arc<Mutex<Option<ServiceError>>>,
}

impl FakeService {
    pub async fn push_ok(&self, result: AnalysisResult) {
        self.analyses
            .lock()
            .await
            .push_back(Scripted::Analysis(Ok(result.into())));
    }

    pub async fn push_err(&self, err: ServiceError) {
        self.analyses
            .lock()
            .await
            .push_back(Scripted::Analysis(Err(err)));
    }

    pub async fn push_never(&self) {
        self.analyses.lock().await.push_back(Scripted::NeverSettles);
    }

    pub async fn fail_reports_with(&self, err: ServiceError) {
        *self.report_failure.lock().await = Some(err);
    }
}

#[async_trait]
impl AnalysisService for FakeService {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, ServiceError> {
        self.requests.lock().await.push(request);
        let next = self.analyses.lock().await.pop_front();
        match next {
            Some(Scripted::Analysis(outcome)) => outcome,
            Some(Scripted::NeverSettles) => std::future::pending().await,
            None => Err(ServiceError::Connectivity("no scripted response".into())),
        }
    }

    async fn download_report(&self, result: &AnalysisResult) -> Result<Vec<u8>, ServiceError> {
        self.report_bodies.lock().await.push(result.clone());
        if let Some(err) = self.report_failure.lock().await.clone() {
            return Err(err);
        }
        Ok(format!("%PDF report score={}", result.score).into_bytes())
    }
}

#[derive(Debug, Default)]
pub struct ChartLog {
    pub created: Vec<(ChartHandle, ProportionChart)>,
    pub destroyed: Vec<ChartHandle>,
    pub live: BTreeSet<ChartHandle>,
}

#[derive(Clone, Default)]
pub struct RecordingChart {
    pub log: Arc<StdMutex<ChartLog>>,
}

impl ChartBackend for RecordingChart {
    fn create(&mut self, chart: &ProportionChart) -> ChartHandle {
        let mut log = self.log.lock().expect("chart log");
        let handle = ChartHandle(log.created.len() as u64 + 1);
        log.created.push((handle, chart.clone()));
        log.live.insert(handle);
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        let mut log = self.log.lock().expect("chart log");
        log.destroyed.push(handle);
        log.live.remove(&handle);
    }
}

#[derive(Clone, Default)]
pub struct MemorySink {
    pub saved: Arc<StdMutex<Vec<(String, Vec<u8>)>>>,
}

impl ReportSink for MemorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ServiceError> {
        self.saved
            .lock()
            .expect("sink")
            .push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("reports").join(filename))
    }
}
