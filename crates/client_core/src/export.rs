use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use shared::protocol::REPORT_FILENAME;
use tracing::info;

use crate::{controller::Session, error::ServiceError, service::AnalysisService};

/// Local destination for a downloaded report.
pub trait ReportSink: Send + Sync {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ServiceError>;
}

pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ServiceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

pub struct ReportExporter {
    service: Arc<dyn AnalysisService>,
    sink: Box<dyn ReportSink>,
}

impl ReportExporter {
    pub fn new(service: Arc<dyn AnalysisService>, sink: Box<dyn ReportSink>) -> Self {
        Self { service, sink }
    }

    /// Downloads a report for the session's current analysis and saves it as
    /// `NetSereno_Reporte.pdf`. Returns `Ok(None)` without any request when
    /// the session holds no analysis yet.
    pub async fn export(&self, session: &Session) -> Result<Option<PathBuf>, ServiceError> {
        let Some(result) = session.current_analysis() else {
            return Ok(None);
        };
        let bytes = self.service.download_report(result).await?;
        let path = self.sink.save(REPORT_FILENAME, &bytes)?;
        info!(path = %path.display(), size_bytes = bytes.len(), "report saved");
        Ok(Some(path))
    }
}
