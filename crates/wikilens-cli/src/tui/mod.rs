use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use wikilens_client::{SearchResult, WikidataClient};
use wikilens_core::NormalizedEntity;

use crate::sections::{section_rows, Section};

pub mod entity_detail;
pub mod results;

/// Rows the result list scrolls by before render knows the real height.
const VIEWPORT_HEIGHT: usize = 20;

/// Lines moved by PageUp / PageDown in the detail view.
const PAGE: u16 = 10;

/// Which view the TUI is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Results,
    Entity,
}

/// Application state for the explorer.
#[derive(Debug)]
pub struct App {
    pub view: View,
    pub query: String,
    pub language: String,
    pub results: Vec<SearchResult>,
    pub selected: usize,
    pub list_offset: usize, // First visible result in the list
    pub entity: Option<NormalizedEntity>,
    pub tab: Section,
    pub scroll: u16,
    /// One-line message shown under the current view (loading, errors).
    pub status: Option<String>,
    pending_fetch: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(query: &str, language: &str, results: Vec<SearchResult>) -> Self {
        Self {
            view: View::Results,
            query: query.to_string(),
            language: language.to_string(),
            results,
            selected: 0,
            list_offset: 0,
            entity: None,
            tab: Section::Properties,
            scroll: 0,
            status: None,
            pending_fetch: None,
            should_quit: false,
        }
    }

    /// The entity ID the user asked to open, if any. Clears the request.
    pub fn take_pending_fetch(&mut self) -> Option<String> {
        self.pending_fetch.take()
    }

    /// Switch to the detail view for a freshly fetched entity.
    pub fn show_entity(&mut self, entity: NormalizedEntity) {
        self.entity = Some(entity);
        self.view = View::Entity;
        self.tab = Section::Properties;
        self.scroll = 0;
        self.status = None;
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.view {
            View::Results => self.handle_results_key(key),
            View::Entity => self.handle_entity_key(key),
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                    // Scroll down if selection goes below visible area
                    if self.selected >= self.list_offset + VIEWPORT_HEIGHT {
                        self.list_offset = self.selected - VIEWPORT_HEIGHT + 1;
                    }
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    if self.selected < self.list_offset {
                        self.list_offset = self.selected;
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(result) = self.results.get(self.selected) {
                    self.status = Some(format!("Loading {}...", result.id));
                    self.pending_fetch = Some(result.id.clone());
                }
            }
            _ => {}
        }
    }

    fn handle_entity_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => {
                self.view = View::Results;
                self.status = None;
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.select_tab(self.tab.next()),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.select_tab(self.tab.prev());
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.select_tab(Section::ALL[index]);
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll_by(PAGE),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
    }

    fn select_tab(&mut self, tab: Section) {
        self.tab = tab;
        self.scroll = 0;
    }

    /// Scroll down, stopping at the last line of the current tab.
    fn scroll_by(&mut self, lines: u16) {
        let max = self
            .entity
            .as_ref()
            .map_or(0, |entity| section_rows(entity, self.tab).len().saturating_sub(1));
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }
}

/// Run the explorer.
///
/// Searches for `query`, then sets up the terminal, runs the main event
/// loop, and restores the terminal on exit (including on error).
pub async fn run_tui(client: WikidataClient, query: &str) -> Result<()> {
    let results = client.search(query).await?;

    if results.is_empty() {
        println!("No results for {query:?}.");
        return Ok(());
    }

    let app = App::new(query, client.language(), results);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, &client, app).await;

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &WikidataClient,
    mut app: App,
) -> Result<()> {
    loop {
        draw(terminal, &app)?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if let Some(id) = app.take_pending_fetch() {
            // Show the loading status while the request is in flight.
            draw(terminal, &app)?;
            match client.fetch_entity(&id).await {
                Ok(entity) => app.show_entity(entity),
                Err(err) => {
                    log::warn!("Failed to fetch {id}: {err}");
                    app.status = Some(format!("Failed to fetch entity data: {err}"));
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &App) -> Result<()> {
    terminal.draw(|frame| match app.view {
        View::Results => results::render(frame, app),
        View::Entity => entity_detail::render(frame, app),
    })?;
    Ok(())
}
