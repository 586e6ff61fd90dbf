/// Display targets of the metrics widget
///
/// The widget writes into five named elements of its host page. The heap-used
/// text and the heap bar are required; without them the widget stays inert.
/// The other three are written when present and skipped otherwise.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::page::{ElementHandle, Page};
use crate::core::snapshot::MetricsSnapshot;
use crate::utils::{compute_usage_percent, format_bytes, percent_width, EMPTY_BAR, UNAVAILABLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetName {
    HeapUsed,
    HeapBar,
    HeapMax,
    ThreadCount,
    ThreadSpark,
}

impl TargetName {
    pub const ALL: [TargetName; 5] = [
        TargetName::HeapUsed,
        TargetName::HeapBar,
        TargetName::HeapMax,
        TargetName::ThreadCount,
        TargetName::ThreadSpark,
    ];

    /// Element id in the host page
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetName::HeapUsed => "heap-used",
            TargetName::HeapBar => "heap-bar",
            TargetName::HeapMax => "heap-max",
            TargetName::ThreadCount => "thread-count",
            TargetName::ThreadSpark => "thread-spark",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, TargetName::HeapUsed | TargetName::HeapBar)
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown display target '{0}'")]
pub struct UnknownTarget(pub String);

impl FromStr for TargetName {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownTarget(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("required display target '{0}' is not on the page")]
    MissingTarget(TargetName),
}

/// Handles to the widget's elements, resolved once at startup
#[derive(Debug, Clone)]
pub struct DisplayTargets {
    heap_used: ElementHandle,
    heap_bar: ElementHandle,
    heap_max: Option<ElementHandle>,
    thread_count: Option<ElementHandle>,
    thread_spark: Option<ElementHandle>,
}

impl DisplayTargets {
    /// Resolve all targets by name
    pub fn bind(page: &Page) -> Result<Self, BindError> {
        let required = |name: TargetName| {
            page.get_element_by_id(name.as_str())
                .ok_or(BindError::MissingTarget(name))
        };
        let optional = |name: TargetName| page.get_element_by_id(name.as_str());

        Ok(Self {
            heap_used: required(TargetName::HeapUsed)?,
            heap_bar: required(TargetName::HeapBar)?,
            heap_max: optional(TargetName::HeapMax),
            thread_count: optional(TargetName::ThreadCount),
            thread_spark: optional(TargetName::ThreadSpark),
        })
    }

    /// Write a snapshot's derived values
    pub fn render(&self, snapshot: &MetricsSnapshot) {
        let pct = compute_usage_percent(snapshot.heap_used, snapshot.heap_max);

        self.heap_used.set_text(format_bytes(snapshot.heap_used));
        if let Some(heap_max) = &self.heap_max {
            heap_max.set_text(format_bytes(snapshot.heap_max));
        }
        self.heap_bar.set_width(percent_width(pct));

        let threads = snapshot
            .thread_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string());
        self.set_thread_text(&threads);
    }

    /// Reset every target to the unavailable state
    pub fn degrade(&self) {
        self.heap_used.set_text(UNAVAILABLE);
        if let Some(heap_max) = &self.heap_max {
            heap_max.set_text(UNAVAILABLE);
        }
        self.heap_bar.set_width(EMPTY_BAR);
        self.set_thread_text(UNAVAILABLE);
    }

    fn set_thread_text(&self, text: &str) {
        for target in [&self.thread_count, &self.thread_spark].into_iter().flatten() {
            target.set_text(text);
        }
    }
}
