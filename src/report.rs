/// One-shot poll for scripts and quick checks
///
/// Runs a single cycle against a page hosting every target and prints what the
/// dashboard would show.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Map, Value};
use std::process::ExitCode;
use std::sync::Arc;

use crate::core::{HttpMetricsSource, MetricsPoller, MetricsSource, Page, PollOutcome, TargetName};
use crate::utils::app_config::Settings;

/// Poll the configured endpoint once
pub async fn poll_once(settings: &Settings) -> Result<(PollOutcome, Page)> {
    let source = HttpMetricsSource::new(&settings.endpoint, settings.timeout)
        .context("Failed to create HTTP client")?;
    poll_once_with(Arc::new(source)).await
}

pub async fn poll_once_with(source: Arc<dyn MetricsSource>) -> Result<(PollOutcome, Page)> {
    let page = Page::with_elements(TargetName::ALL.map(|name| name.as_str()));
    let poller = MetricsPoller::init(&page, source)
        .context("Display targets missing from the report page")?;
    let outcome = poller.poll().await;
    Ok((outcome, page))
}

/// Process exit status for a `once` run: failure when the display degraded
pub fn exit_code(outcome: PollOutcome) -> ExitCode {
    match outcome {
        PollOutcome::Rendered => ExitCode::SUCCESS,
        PollOutcome::Degraded => ExitCode::FAILURE,
    }
}

fn outcome_label(outcome: PollOutcome) -> &'static str {
    match outcome {
        PollOutcome::Rendered => "rendered",
        PollOutcome::Degraded => "degraded",
    }
}

/// The value a target shows: the bar's width, everything else's text
fn shown_value(page: &Page, name: TargetName) -> String {
    page.element(name.as_str())
        .map(|e| if name == TargetName::HeapBar { e.width } else { e.text })
        .unwrap_or_default()
}

pub fn to_json(outcome: PollOutcome, page: &Page) -> Value {
    let elements: Map<String, Value> = TargetName::ALL
        .into_iter()
        .map(|name| (name.as_str().to_string(), Value::String(shown_value(page, name))))
        .collect();

    json!({
        "outcome": outcome_label(outcome),
        "elements": elements,
    })
}

pub fn to_text(outcome: PollOutcome, page: &Page) -> String {
    let status = match outcome {
        PollOutcome::Rendered => outcome_label(outcome).green().bold(),
        PollOutcome::Degraded => outcome_label(outcome).red().bold(),
    };

    let mut lines = vec![format!("{:<14} {}", "outcome", status)];
    for name in TargetName::ALL {
        lines.push(format!("{:<14} {}", name.as_str(), shown_value(page, name)));
    }
    lines.join("\n")
}
