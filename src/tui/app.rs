// src/tui/app.rs — TUI application state, event loop, and rendering.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

use crate::engine::registry::EngineRegistry;
use crate::engine::{AuthMenuAction, CredentialState, Engine};
use crate::infra::config::Config;

use super::theme::Theme;

/// One engine's probed state, snapshotted per refresh tick.
struct EngineRow {
    name: String,
    binary: String,
    state: CredentialState,
    action: AuthMenuAction,
    data_dir: String,
}

struct App {
    rows: Vec<EngineRow>,
    table_state: TableState,
    last_refresh: Instant,
}

impl App {
    fn new(rows: Vec<EngineRow>) -> Self {
        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            rows,
            table_state,
            last_refresh: Instant::now(),
        }
    }

    fn refresh(&mut self, registry: &EngineRegistry) {
        self.rows = fetch_rows(registry);
        self.last_refresh = Instant::now();
    }

    fn select_next(&mut self) {
        let i = self.table_state.selected().unwrap_or(0);
        let max = self.rows.len().saturating_sub(1);
        self.table_state.select(Some((i + 1).min(max)));
    }

    fn select_prev(&mut self) {
        let i = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(i.saturating_sub(1)));
    }
}

/// Probe every engine fresh. Installs and logins happening in other
/// terminals show up on the next tick.
fn fetch_rows(registry: &EngineRegistry) -> Vec<EngineRow> {
    registry
        .all()
        .map(|engine| EngineRow {
            name: engine.name().to_string(),
            binary: engine.cli_binary().to_string(),
            state: engine.credential_state(),
            action: engine.next_auth_menu_action(),
            data_dir: engine.data_dir().display().to_string(),
        })
        .collect()
}

// ── Public entry point ───────────────────────────────────────────

/// Launch the dashboard. Blocks until the user quits (q / Esc / Ctrl-C).
pub fn run_dashboard(
    registry: &EngineRegistry,
    root: &Path,
    config: &Config,
) -> anyhow::Result<()> {
    let mut app = App::new(fetch_rows(registry));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, registry, root, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    registry: &EngineRegistry,
    root: &Path,
    config: &Config,
) -> anyhow::Result<()> {
    let refresh_interval = Duration::from_secs(config.ui.refresh_secs.max(1));

    loop {
        terminal.draw(|f| render(f, app, root))?;

        if app.last_refresh.elapsed() >= refresh_interval {
            app.refresh(registry);
        }

        // Poll with a short timeout so refresh stays responsive
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q')
                    || key.code == KeyCode::Esc
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL))
                {
                    return Ok(());
                }

                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                    KeyCode::Char('r') => app.refresh(registry),
                    _ => {}
                }
            }
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────

fn render(f: &mut Frame, app: &mut App, root: &Path) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Engine table
            Constraint::Length(1), // Footer / key hints
        ])
        .split(size);

    render_header(f, chunks[0], root);
    render_engine_table(f, chunks[1], app);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, root: &Path) {
    let line = Line::from(vec![
        Span::styled("  workspace ", Theme::text_dim()),
        Span::styled(root.display().to_string(), Theme::text()),
    ]);
    let p = Paragraph::new(line).block(
        Block::default()
            .title(Span::styled(" outboard ", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(p, area);
}

fn render_engine_table(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .title(format!(" Engines ({}) ", app.rows.len()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if app.rows.is_empty() {
        let p = Paragraph::new(Line::from(Span::styled(
            "  No engines enabled.",
            Theme::text_dim(),
        )))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Engine").style(Theme::table_header()),
        Cell::from("Binary").style(Theme::table_header()),
        Cell::from("State").style(Theme::table_header()),
        Cell::from("Next").style(Theme::table_header()),
        Cell::from("Data dir").style(Theme::table_header()),
    ]);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.name.clone()).style(Theme::text()),
                Cell::from(r.binary.clone()).style(Theme::text_dim()),
                Cell::from(r.state.to_string()).style(Theme::state(r.state)),
                Cell::from(r.action.to_string()).style(Theme::text()),
                Cell::from(r.data_dir.clone()).style(Theme::text_dim()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Theme::table_selected())
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" q", Theme::key_hint()),
        Span::styled(" quit  ", Theme::key_desc()),
        Span::styled("j/k/\u{2191}\u{2193}", Theme::key_hint()),
        Span::styled(" move  ", Theme::key_desc()),
        Span::styled("r", Theme::key_hint()),
        Span::styled(" refresh  ", Theme::key_desc()),
        Span::styled("outboard auth", Theme::key_hint()),
        Span::styled(" to log in", Theme::key_desc()),
    ]);

    f.render_widget(Paragraph::new(hints), area);
}
