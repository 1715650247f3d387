use serde::{Deserialize, Serialize};

use crate::{
    domain::{AnalysisMeta, AnalysisResult, MAX_SCORE},
    error::InvalidAnalysis,
};

pub const ANALYZE_PATH: &str = "/analyze";
pub const DOWNLOAD_REPORT_PATH: &str = "/download_report";
pub const FILE_FIELD: &str = "file";
pub const TEXT_FIELD: &str = "text_content";
pub const REPORT_FILENAME: &str = "NetSereno_Reporte.pdf";

/// Success body of `POST /analyze`.
///
/// The score is read as a wide integer so that out-of-range values are
/// rejected by [`AnalyzeResponse::into_parts`] instead of failing inside serde
/// with an unhelpful message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: RawAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<AnalysisMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAnalysis {
    pub score: i64,
    pub verdict: String,
    pub summary: String,
    pub reasons: Vec<String>,
}

impl TryFrom<RawAnalysis> for AnalysisResult {
    type Error = InvalidAnalysis;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        let score = u8::try_from(raw.score)
            .ok()
            .filter(|score| *score <= MAX_SCORE)
            .ok_or_else(|| {
                InvalidAnalysis::new(format!("score {} outside 0..={MAX_SCORE}", raw.score))
            })?;
        Ok(Self {
            score,
            verdict: raw.verdict,
            summary: raw.summary,
            reasons: raw.reasons,
        })
    }
}

impl AnalyzeResponse {
    pub fn into_parts(self) -> Result<(AnalysisResult, Option<AnalysisMeta>), InvalidAnalysis> {
        Ok((AnalysisResult::try_from(self.analysis)?, self.meta))
    }
}
