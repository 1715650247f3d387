//! Terminal presentation of the view model.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

use client_core::{
    ChartBackend, ChartHandle, Notification, ProportionChart, TabIndicator, ViewModel,
};
use console::{style, Style};
use shared::domain::{AnalysisMeta, SeverityTier};

const BAR_WIDTH: usize = 40;

/// Draws the proportion chart as a text bar. The latest drawing is kept on a
/// shared canvas so the view printer can show it.
#[derive(Clone, Default)]
pub struct TerminalChart {
    canvas: Arc<Mutex<Canvas>>,
}

#[derive(Default)]
struct Canvas {
    next_id: u64,
    live: BTreeSet<ChartHandle>,
    drawing: Option<String>,
}

impl TerminalChart {
    pub fn drawing(&self) -> Option<String> {
        self.canvas
            .lock()
            .ok()
            .and_then(|canvas| canvas.drawing.clone())
    }
}

impl ChartBackend for TerminalChart {
    fn create(&mut self, chart: &ProportionChart) -> ChartHandle {
        let Ok(mut canvas) = self.canvas.lock() else {
            return ChartHandle(0);
        };
        canvas.next_id += 1;
        let handle = ChartHandle(canvas.next_id);
        canvas.live.insert(handle);
        canvas.drawing = Some(draw_bar(chart));
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if let Ok(mut canvas) = self.canvas.lock() {
            canvas.live.remove(&handle);
            if canvas.live.is_empty() {
                canvas.drawing = None;
            }
        }
    }
}

fn severity_style(severity: SeverityTier) -> Style {
    match severity {
        SeverityTier::High => Style::new().red().bold(),
        SeverityTier::Medium => Style::new().yellow().bold(),
        SeverityTier::Low => Style::new().green().bold(),
    }
}

fn draw_bar(chart: &ProportionChart) -> String {
    let [phishing, safe] = chart.values;
    let filled = usize::from(phishing) * BAR_WIDTH / 100;
    let segment_style = severity_style(SeverityTier::from_score(phishing));
    format!(
        "[{}{}] {} {phishing}% / {} {safe}%",
        segment_style.apply_to("█".repeat(filled)),
        style("░".repeat(BAR_WIDTH - filled)).dim(),
        chart.labels[0],
        chart.labels[1],
    )
}

fn tab(label: &str, indicator: TabIndicator) -> String {
    match indicator {
        TabIndicator::Active => style(format!("[{label}]")).cyan().bold().to_string(),
        TabIndicator::Inactive => style(format!(" {label} ")).dim().to_string(),
    }
}

pub fn print_view(view: &ViewModel, meta: Option<&AnalysisMeta>, chart: &TerminalChart) {
    println!("{} {}", tab("file", view.file_tab), tab("text", view.text_tab));
    if view.loading_visible {
        println!("{}", style("Analyzing...").italic());
    }
    if let Some(error) = &view.error {
        println!("{} {error}", style("Error:").red().bold());
    }
    if view.input_visible {
        let region = if view.file_region_visible {
            "file"
        } else {
            "text"
        };
        println!("Input: {region} mode");
    }
    let Some(results) = view.results.as_ref().filter(|_| view.results_visible) else {
        return;
    };
    let verdict_style = severity_style(results.severity);
    println!();
    println!(
        "{}  {}",
        style(&results.score_text).bold(),
        verdict_style.apply_to(&results.verdict)
    );
    if let Some(meta) = meta {
        println!("{} {}", style("From:").dim(), meta.sender);
        println!("{} {}", style("Subject:").dim(), meta.subject);
    }
    println!("{}", results.summary);
    for reason in &results.reasons {
        println!("  - {reason}");
    }
    if let Some(drawing) = chart.drawing() {
        println!("{drawing}");
    }
}

pub fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        match notification {
            Notification::Error(message) => {
                eprintln!("{} {message}", style("Error:").red().bold())
            }
            Notification::Info(message) => println!("{message}"),
        }
    }
}
