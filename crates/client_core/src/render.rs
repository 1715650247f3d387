//! Result presentation and the proportion chart lifecycle.

use shared::domain::{AnalysisResult, SeverityTier, MAX_SCORE};
use tracing::debug;

pub const NEUTRAL_COLOR: &str = "#374151";
pub const SEGMENT_LABELS: [&str; 2] = ["Phishing", "Safe"];

/// Two-segment breakdown `[score, 100 - score]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionChart {
    pub values: [u8; 2],
    pub colors: [&'static str; 2],
    pub labels: [&'static str; 2],
}

impl ProportionChart {
    pub fn for_score(score: u8) -> Self {
        let score = score.min(MAX_SCORE);
        Self {
            values: [score, MAX_SCORE - score],
            colors: [SeverityTier::from_score(score).color(), NEUTRAL_COLOR],
            labels: SEGMENT_LABELS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResults {
    pub score_text: String,
    pub verdict: String,
    pub severity: SeverityTier,
    pub verdict_color: &'static str,
    pub summary: String,
    pub reasons: Vec<String>,
    pub chart: ProportionChart,
}

pub fn present(result: &AnalysisResult) -> RenderedResults {
    let severity = result.severity();
    RenderedResults {
        score_text: format!("{}%", result.score),
        verdict: result.verdict.clone(),
        severity,
        verdict_color: severity.color(),
        summary: result.summary.clone(),
        reasons: result.reasons.clone(),
        chart: ProportionChart::for_score(result.score),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(pub u64);

/// Visualization backend: draws a proportion chart and disposes old ones.
pub trait ChartBackend: Send {
    fn create(&mut self, chart: &ProportionChart) -> ChartHandle;
    fn destroy(&mut self, handle: ChartHandle);
}

pub struct ResultsRenderer {
    backend: Box<dyn ChartBackend>,
    active_chart: Option<ChartHandle>,
    last: Option<RenderedResults>,
}

impl ResultsRenderer {
    pub fn new(backend: Box<dyn ChartBackend>) -> Self {
        Self {
            backend,
            active_chart: None,
            last: None,
        }
    }

    pub fn render(&mut self, result: &AnalysisResult) -> &RenderedResults {
        let rendered = present(result);
        if let Some(previous) = self.active_chart.take() {
            self.backend.destroy(previous);
        }
        let handle = self.backend.create(&rendered.chart);
        debug!(
            chart = handle.0,
            score = result.score,
            reasons = rendered.reasons.len(),
            "results rendered"
        );
        self.active_chart = Some(handle);
        self.last.insert(rendered)
    }

    pub fn active_chart(&self) -> Option<ChartHandle> {
        self.active_chart
    }

    pub fn last(&self) -> Option<&RenderedResults> {
        self.last.as_ref()
    }
}
