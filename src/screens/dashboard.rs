/// Main dashboard screen
///
/// Draws whatever the metrics widget last wrote into the page. Panels the page
/// doesn't host are left out of the layout.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::core::{Page, TargetName};
use crate::utils::{width_ratio, UNAVAILABLE};

pub struct Dashboard {
    title: String,
    endpoint: String,
    // Whether the metrics widget bound to the page and is polling
    active: bool,
}

impl Dashboard {
    pub fn new(endpoint: String, active: bool) -> Self {
        Self {
            title: "JVM Live Metrics".to_string(),
            endpoint,
            active,
        }
    }

    pub fn render(&self, frame: &mut Frame, page: &Page) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(6), // Heap
                Constraint::Length(4), // Threads
                Constraint::Min(0),
                Constraint::Length(3), // Footer
            ])
            .split(frame.size());

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                &self.title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(&self.endpoint, Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        if self.active {
            self.render_heap(frame, chunks[1], page);
            self.render_threads(frame, chunks[2], page);
        } else {
            let notice = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Metrics widget inactive",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "The heap-used and heap-bar panels are both required",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(notice, chunks[1]);
        }

        let footer = Paragraph::new("[q]uit")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[4]);
    }

    fn render_heap(&self, frame: &mut Frame, area: Rect, page: &Page) {
        let block = Block::default().title(" Heap ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let mut spans = vec![
            Span::styled("Used: ", Style::default().fg(Color::Gray)),
            Span::styled(
                element_text(page, TargetName::HeapUsed),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];
        if page.contains(TargetName::HeapMax.as_str()) {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("Max: ", Style::default().fg(Color::Gray)));
            spans.push(Span::styled(
                element_text(page, TargetName::HeapMax),
                Style::default().fg(Color::White),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

        let width = page
            .element(TargetName::HeapBar.as_str())
            .map(|e| e.width)
            .unwrap_or_default();
        let ratio = width_ratio(&width);

        // Same thresholds as the resource alerts: >80% red, >60% yellow
        let color = if ratio > 0.8 {
            Color::Red
        } else if ratio > 0.6 {
            Color::Yellow
        } else {
            Color::Green
        };
        let label = if width.is_empty() { UNAVAILABLE.to_string() } else { width };

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, rows[1]);
    }

    fn render_threads(&self, frame: &mut Frame, area: Rect, page: &Page) {
        let mut lines = Vec::new();

        if page.contains(TargetName::ThreadCount.as_str()) {
            lines.push(Line::from(vec![
                Span::styled("Live threads: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    element_text(page, TargetName::ThreadCount),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        if page.contains(TargetName::ThreadSpark.as_str()) {
            lines.push(Line::from(vec![
                Span::styled("Now: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    element_text(page, TargetName::ThreadSpark),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
        if lines.is_empty() {
            return;
        }

        let threads = Paragraph::new(lines)
            .block(Block::default().title(" Threads ").borders(Borders::ALL));
        frame.render_widget(threads, area);
    }
}

/// Text of an element, or the unavailable marker before the first poll lands
fn element_text(page: &Page, name: TargetName) -> String {
    page.element(name.as_str())
        .map(|e| e.text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}
