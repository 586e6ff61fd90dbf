/// Main TUI application

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::core::{HttpMetricsSource, MetricsPoller, Page};
use crate::screens::Dashboard;
use crate::utils::app_config::Settings;

// How long to wait for a key press before redrawing
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    page: Page,
    dashboard: Dashboard,
    poller: Option<MetricsPoller>,
    interval: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let page = Page::with_elements(settings.panels.iter().map(|name| name.as_str()));
        let source = HttpMetricsSource::new(&settings.endpoint, settings.timeout)
            .context("Failed to create HTTP client")?;

        let poller = MetricsPoller::init(&page, Arc::new(source));
        let dashboard = Dashboard::new(settings.endpoint.clone(), poller.is_some());

        Ok(Self {
            page,
            dashboard,
            poller,
            interval: settings.interval,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let poll_task = self.poller.take().map(|poller| {
            info!("Polling metrics every {:?}", self.interval);
            poller.spawn(self.interval)
        });

        let result = self.run_loop(&mut terminal).await;

        if let Some(task) = poll_task {
            task.abort();
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.dashboard.render(f, &self.page))?;

            if event::poll(FRAME_INTERVAL)? {
                if let Event::Key(key_event) = event::read()? {
                    self.handle_key(key_event);
                }
            }

            if self.should_quit {
                break;
            }

            // Let the poll tasks make progress between frames
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            _ => {}
        }
    }
}
