//! Interactive dashboard.
//!
//! Six pages over the same fetch-and-render shape: Overview, Compute,
//! Network, Storage, Activity, Settings. The event loop stays single
//! threaded; fetches run on spawned threads holding a clone of the
//! client and report back over an mpsc channel, so an in-flight request
//! never blocks input. There is no cancellation — a hung request simply
//! leaves its page loading.

mod pages;

use std::io::stdout;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyModifiers},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use thecloud_api_client::{
    credentials_file_path, load_api_key, save_api_key, ApiClient, DashboardStats, Event, Instance,
    StorageObject, Vpc,
};

use crate::exit_codes::EXIT_ERROR;
use crate::format::{format_percent, format_storage_gb, Indicator};
use crate::util;
use crate::CliError;

use pages::{
    events_table, instances_table, objects_table, vpcs_table, FetchOutcome, PageState, TableSpec,
};

const DEFAULT_BUCKET: &str = "test-bucket";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Overview,
    Compute,
    Network,
    Storage,
    Activity,
    Settings,
}

const PAGE_TABS: [(Page, &str); 6] = [
    (Page::Overview, "Overview"),
    (Page::Compute, "Compute"),
    (Page::Network, "Network"),
    (Page::Storage, "Storage"),
    (Page::Activity, "Activity"),
    (Page::Settings, "Settings"),
];

enum InputMode {
    Normal,
    /// Editing the API key on the Settings page
    EditKey(String),
    /// Editing the bucket name on the Storage page
    EditBucket(String),
}

struct DashApp {
    client: ApiClient,
    tx: mpsc::Sender<FetchOutcome>,
    rx: mpsc::Receiver<FetchOutcome>,
    page: Page,
    stats: PageState<DashboardStats>,
    instances: PageState<Vec<Instance>>,
    vpcs: PageState<Vec<Vpc>>,
    objects: PageState<Vec<StorageObject>>,
    events: PageState<Vec<Event>>,
    bucket: String,
    stored_key: String,
    input: InputMode,
    notice: Option<String>,
    scroll: usize,
    show_help: bool,
    should_quit: bool,
}

impl DashApp {
    fn new(client: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            tx,
            rx,
            page: Page::Overview,
            stats: PageState::new(),
            instances: PageState::new(),
            vpcs: PageState::new(),
            objects: PageState::new(),
            events: PageState::new(),
            bucket: DEFAULT_BUCKET.to_string(),
            stored_key: load_api_key(),
            input: InputMode::Normal,
            notice: None,
            scroll: 0,
            show_help: false,
            should_quit: false,
        }
    }

    // ── Fetching ────────────────────────────────────────────────────

    fn enter_page(&mut self, page: Page) {
        self.page = page;
        self.scroll = 0;
        let untouched = match page {
            Page::Overview => self.stats.untouched(),
            Page::Compute => self.instances.untouched(),
            Page::Network => self.vpcs.untouched(),
            Page::Storage => self.objects.untouched(),
            Page::Activity => self.events.untouched(),
            Page::Settings => false,
        };
        if untouched {
            self.refresh_current();
        }
    }

    fn refresh_current(&mut self) {
        match self.page {
            Page::Overview => self.fetch_stats(),
            Page::Compute => self.fetch_instances(),
            Page::Network => self.fetch_vpcs(),
            Page::Storage => self.fetch_objects(),
            Page::Activity => self.fetch_events(),
            Page::Settings => {}
        }
    }

    fn fetch_stats(&mut self) {
        let seq = self.stats.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(FetchOutcome::Stats(seq, client.dashboard_stats()));
        });
    }

    fn fetch_instances(&mut self) {
        let seq = self.instances.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(FetchOutcome::Instances(seq, client.list_instances()));
        });
    }

    fn fetch_vpcs(&mut self) {
        let seq = self.vpcs.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(FetchOutcome::Vpcs(seq, client.list_vpcs()));
        });
    }

    fn fetch_objects(&mut self) {
        let bucket = self.bucket.trim().to_string();
        if bucket.is_empty() {
            self.objects.error = Some("Bucket name is required".into());
            return;
        }
        let seq = self.objects.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(FetchOutcome::Objects(seq, client.list_objects(&bucket)));
        });
    }

    fn fetch_events(&mut self) {
        let seq = self.events.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(FetchOutcome::Events(seq, client.list_events()));
        });
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Stats(seq, result) => self.stats.finish(seq, result),
            FetchOutcome::Instances(seq, result) => self.instances.finish(seq, result),
            FetchOutcome::Vpcs(seq, result) => self.vpcs.finish(seq, result),
            FetchOutcome::Objects(seq, result) => self.objects.finish(seq, result),
            FetchOutcome::Events(seq, result) => self.events.finish(seq, result),
        }
    }

    // ── Input ───────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if !matches!(self.input, InputMode::Normal) {
            match key.code {
                KeyCode::Esc => self.input = InputMode::Normal,
                KeyCode::Enter => self.commit_edit(),
                KeyCode::Backspace => {
                    if let InputMode::EditKey(buf) | InputMode::EditBucket(buf) = &mut self.input {
                        buf.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let InputMode::EditKey(buf) | InputMode::EditBucket(buf) = &mut self.input {
                        buf.push(c);
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.refresh_current(),
            KeyCode::Tab | KeyCode::Right => self.cycle_page(1),
            KeyCode::BackTab | KeyCode::Left => self.cycle_page(-1),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = (c as usize) - ('1' as usize);
                self.enter_page(PAGE_TABS[idx].0);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.current_row_count().saturating_sub(1);
                self.scroll = (self.scroll + 1).min(max);
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(20),
            KeyCode::PageDown => {
                let max = self.current_row_count().saturating_sub(1);
                self.scroll = (self.scroll + 20).min(max);
            }
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::Char('b') if self.page == Page::Storage => {
                self.input = InputMode::EditBucket(self.bucket.clone());
            }
            KeyCode::Char('e') if self.page == Page::Settings => {
                self.notice = None;
                self.input = InputMode::EditKey(self.stored_key.clone());
            }
            _ => {}
        }
    }

    fn cycle_page(&mut self, step: i32) {
        let idx = PAGE_TABS
            .iter()
            .position(|(p, _)| *p == self.page)
            .unwrap_or(0);
        let len = PAGE_TABS.len() as i32;
        let next = (idx as i32 + step).rem_euclid(len) as usize;
        self.enter_page(PAGE_TABS[next].0);
    }

    fn commit_edit(&mut self) {
        match std::mem::replace(&mut self.input, InputMode::Normal) {
            InputMode::EditKey(buf) => {
                let trimmed = buf.trim().to_string();
                match save_api_key(&trimmed) {
                    Ok(()) => {
                        self.notice = Some(if trimmed.is_empty() {
                            "API key cleared".into()
                        } else {
                            "API key saved".into()
                        });
                        self.stored_key = trimmed.clone();
                        self.client = ApiClient::new(self.client.api_base().to_string(), trimmed);
                    }
                    Err(e) => self.notice = Some(e),
                }
            }
            InputMode::EditBucket(buf) => {
                let trimmed = buf.trim().to_string();
                if trimmed.is_empty() {
                    self.objects.error = Some("Bucket name is required".into());
                    return;
                }
                self.bucket = trimmed;
                self.scroll = 0;
                self.fetch_objects();
            }
            InputMode::Normal => {}
        }
    }

    fn current_row_count(&self) -> usize {
        match self.page {
            Page::Overview => self.stats.data.recent_events.len(),
            Page::Compute => self.instances.data.len(),
            Page::Network => self.vpcs.data.len(),
            Page::Storage => self.objects.data.len(),
            Page::Activity => self.events.data.len(),
            Page::Settings => 0,
        }
    }

    fn current_loading(&self) -> bool {
        match self.page {
            Page::Overview => self.stats.loading,
            Page::Compute => self.instances.loading,
            Page::Network => self.vpcs.loading,
            Page::Storage => self.objects.loading,
            Page::Activity => self.events.loading,
            Page::Settings => false,
        }
    }

    fn current_error(&self) -> Option<&str> {
        match self.page {
            Page::Overview => self.stats.error.as_deref(),
            Page::Compute => self.instances.error.as_deref(),
            Page::Network => self.vpcs.error.as_deref(),
            Page::Storage => self.objects.error.as_deref(),
            Page::Activity => self.events.error.as_deref(),
            Page::Settings => None,
        }
    }

    // ── Drawing ─────────────────────────────────────────────────────

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_title(frame, chunks[0]);
        self.draw_tab_bar(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_status(frame, chunks[3]);

        if self.show_help {
            self.draw_help(frame, area);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" thecloud | {} ", self.client.api_base());
        let para = Paragraph::new(Line::from(vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .style(Style::default().bg(Color::Cyan));
        frame.render_widget(para, area);
    }

    fn draw_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, (page, name)) in PAGE_TABS.iter().enumerate() {
            let label = format!(" {}:{} ", i + 1, name);
            if *page == self.page {
                spans.push(Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    label,
                    Style::default().fg(Color::Gray).bg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(" ", Style::default().bg(Color::Black)));
        }
        let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
        frame.render_widget(para, area);
    }

    fn draw_body(&self, frame: &mut Frame, area: Rect) {
        // Inline error above the page content; stale rows stay visible below.
        let content = if let Some(err) = self.current_error() {
            let chunks =
                Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);
            let para = Paragraph::new(Line::from(Span::styled(
                format!(" {} ", err),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            frame.render_widget(para, chunks[0]);
            chunks[1]
        } else {
            area
        };

        match self.page {
            Page::Overview => self.draw_overview(frame, content),
            Page::Compute => {
                self.draw_table(frame, content, &instances_table(&self.instances.data))
            }
            Page::Network => self.draw_table(frame, content, &vpcs_table(&self.vpcs.data)),
            Page::Storage => self.draw_storage(frame, content),
            Page::Activity => self.draw_table(frame, content, &events_table(&self.events.data)),
            Page::Settings => self.draw_settings(frame, content),
        }
    }

    fn draw_overview(&self, frame: &mut Frame, area: Rect) {
        let chunks =
            Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).split(area);

        let summary = &self.stats.data.summary;
        let cards: [(String, &str); 4] = [
            (
                summary.running_instances.to_string(),
                "Active Instances",
            ),
            (
                format!("{}%", format_percent(summary.running_instances, summary.total_instances)),
                "Running vs Total",
            ),
            (
                format!("{} GB", format_storage_gb(summary.total_storage_mb)),
                "Storage Provisioned",
            ),
            (summary.total_vpcs.to_string(), "VPCs"),
        ];

        let card_areas = Layout::horizontal([Constraint::Percentage(25); 4]).split(chunks[0]);
        for (i, (value, label)) in cards.iter().enumerate() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            let lines = vec![
                Line::from(Span::styled(
                    value.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*label, Style::default().fg(Color::Gray))),
            ];
            frame.render_widget(Paragraph::new(lines).block(block), card_areas[i]);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Recent Activity ")
            .title_style(Style::default().fg(Color::Cyan));

        let events = &self.stats.data.recent_events;
        let lines: Vec<Line> = if events.is_empty() {
            let text = if self.stats.loading {
                "loading…"
            } else {
                "No recent events."
            };
            vec![Line::from(Span::styled(
                text,
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            let spec = events_table(events);
            let widths = util::column_widths(spec.headers, &spec.rows);
            spec.rows
                .iter()
                .skip(self.scroll)
                .map(|row| {
                    let mut spans = Vec::new();
                    for (c, cell) in row.iter().enumerate() {
                        let style = if c == 0 {
                            Style::default().fg(Color::White)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        spans.push(Span::styled(
                            format!("{} ", util::pad_right(cell, widths[c])),
                            style,
                        ));
                    }
                    Line::from(spans)
                })
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
    }

    fn draw_storage(&self, frame: &mut Frame, area: Rect) {
        let chunks =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);

        let line = match &self.input {
            InputMode::EditBucket(buf) => Line::from(vec![
                Span::styled(" Bucket: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}█", buf),
                    Style::default().fg(Color::Black).bg(Color::White),
                ),
                Span::styled(
                    "  Enter: load  Esc: cancel",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            _ => Line::from(vec![
                Span::styled(" Bucket: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    self.bucket.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (b: change)", Style::default().fg(Color::DarkGray)),
            ]),
        };
        frame.render_widget(Paragraph::new(line), chunks[0]);

        self.draw_table(frame, chunks[1], &objects_table(&self.objects.data));
    }

    fn draw_settings(&self, frame: &mut Frame, area: Rect) {
        let creds_path = credentials_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unavailable)".into());

        let key_line = match &self.input {
            InputMode::EditKey(buf) => Line::from(vec![
                Span::styled(" API key:      ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}█", buf),
                    Style::default().fg(Color::Black).bg(Color::White),
                ),
                Span::styled(
                    "  Enter: save  Esc: cancel",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            _ => {
                let shown = if self.stored_key.is_empty() {
                    "No API key saved".to_string()
                } else {
                    self.stored_key.clone()
                };
                Line::from(vec![
                    Span::styled(" API key:      ", Style::default().fg(Color::Gray)),
                    Span::styled(shown, Style::default().fg(Color::White)),
                ])
            }
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" API URL:      ", Style::default().fg(Color::Gray)),
                Span::styled(
                    self.client.api_base().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Credentials:  ", Style::default().fg(Color::Gray)),
                Span::styled(creds_path, Style::default().fg(Color::White)),
            ]),
            key_line,
            Line::from(""),
            Line::from(Span::styled(
                " e: edit key (saving an empty value clears it)",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        if let Some(notice) = &self.notice {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {}", notice),
                Style::default().fg(Color::Green),
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect, spec: &TableSpec) {
        if spec.rows.is_empty() {
            let text = if self.current_loading() {
                "loading…"
            } else {
                "(none)"
            };
            let para = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)));
            frame.render_widget(para, area);
            return;
        }

        let widths = util::column_widths(spec.headers, &spec.rows);

        let mut header_spans = Vec::new();
        for (c, header) in spec.headers.iter().enumerate() {
            header_spans.push(Span::styled(
                format!("{} ", util::pad_right(header, widths[c])),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        // Rows can shrink across refreshes; re-clamp before slicing.
        let visible = (area.height as usize).saturating_sub(1);
        let start = self.scroll.min(spec.rows.len().saturating_sub(1));
        let end = (start + visible).min(spec.rows.len());

        let mut lines: Vec<Line> = Vec::with_capacity(visible + 1);
        lines.push(Line::from(header_spans));

        for (r, row) in spec.rows[start..end].iter().enumerate() {
            let accent = spec.accents.get(start + r).copied();
            let mut spans = Vec::new();
            for (c, cell) in row.iter().enumerate() {
                let style = match (spec.accent_col, accent) {
                    (Some(col), Some(ind)) if col == c => {
                        Style::default().fg(indicator_color(ind))
                    }
                    _ if c == 0 => Style::default().fg(Color::White),
                    _ => Style::default().fg(Color::Gray),
                };
                spans.push(Span::styled(
                    format!("{} ", util::pad_right(cell, widths[c])),
                    style,
                ));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let hint = match self.page {
            Page::Storage => "b: bucket  r: refresh",
            Page::Settings => "e: edit key",
            _ => "r: refresh",
        };
        let left = format!(" {}", hint);
        let right = if self.current_loading() {
            "loading…  ?: help  q: quit ".to_string()
        } else {
            "?: help  q: quit ".to_string()
        };

        let padding = (area.width as usize)
            .saturating_sub(left.chars().count() + right.chars().count());
        let status = format!("{}{:pad$}{}", left, "", right, pad = padding);

        let para = Paragraph::new(Line::from(vec![Span::styled(
            status,
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        )]))
        .style(Style::default().bg(Color::DarkGray));
        frame.render_widget(para, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help_lines = [
            "",
            "  Navigation",
            "  ----------",
            "  Tab / Shift+Tab   Next/prev page",
            "  1..6              Jump to page",
            "  arrows / jk       Scroll rows",
            "  PgUp / PgDn       Scroll faster",
            "",
            "  Actions",
            "  -------",
            "  r                 Refresh page",
            "  b                 Change bucket (Storage)",
            "  e                 Edit API key (Settings)",
            "",
            "  General",
            "  -------",
            "  q / Esc           Quit",
            "  ?                 Toggle this help",
            "",
        ];
        let help_width: u16 = 44;
        let help_height: u16 = help_lines.len() as u16;

        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let popup = Rect::new(
            area.x + x,
            area.y + y,
            help_width.min(area.width),
            help_height.min(area.height),
        );

        let lines: Vec<Line> = help_lines
            .iter()
            .map(|s| Line::from(Span::styled(*s, Style::default().fg(Color::White))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keybindings ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(Color::Black));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn indicator_color(indicator: Indicator) -> Color {
    match indicator {
        Indicator::Running => Color::Green,
        Indicator::Stopped => Color::DarkGray,
        Indicator::Error => Color::Red,
        Indicator::Pending => Color::Yellow,
    }
}

/// Run the interactive dashboard until the user quits.
pub fn run() -> Result<(), CliError> {
    let client = ApiClient::from_stored();
    run_app(DashApp::new(client)).map_err(|message| CliError {
        code: EXIT_ERROR,
        message,
        hint: None,
    })
}

fn run_app(mut app: DashApp) -> Result<(), String> {
    terminal::enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    // First page fetch kicks off before the first frame.
    app.enter_page(Page::Overview);

    loop {
        while let Ok(outcome) = app.rx.try_recv() {
            app.apply(outcome);
        }

        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("event poll error: {}", e))?
        {
            if let TermEvent::Key(key) =
                event::read().map_err(|e| format!("event read error: {}", e))?
            {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
