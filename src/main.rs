//! CareTrack TUI - Actor-based children registry dashboard
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async backend calls

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use caretrack::app::{AppActor, AppState, DataSource};
use caretrack::config::{default_config_path, BackendConfig};
use caretrack::constants::LOG_FILE_NAME;
use caretrack::messages::render::RowView;
use caretrack::models::Child;
use caretrack::messages::ui_events::key_to_ui_event;
use caretrack::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use caretrack::network::{BackendClient, NetworkActor};
use caretrack::storage::{FileStore, MemoryStore, SessionStore};
use caretrack::ui::{badge_span, centered_rect, render_button};

/// Terminal dashboard for the children registry.
#[derive(Parser)]
#[command(name = "caretrack", version, about = "Children registry dashboard")]
struct Args {
    /// Read records from a local JSON file instead of the backend
    #[arg(short, long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Backend endpoint (overrides config file and environment)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Public anon key (overrides config file and environment)
    #[arg(long, value_name = "KEY")]
    anon_key: Option<String>,

    /// Config file path (default: ~/.caretrack/config.yaml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    no_persist_session: bool,
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Backend client: built once, shared by reference count
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = BackendConfig::load(&config_path)?;
    if let Some(url) = args.url {
        config.url = url;
    }
    if let Some(key) = args.anon_key {
        config.anon_key = key;
    }
    if args.no_persist_session {
        config.auth.persist_session = false;
    }
    let store: Arc<dyn SessionStore> = if config.auth.persist_session {
        Arc::new(FileStore::new().context("opening session store")?)
    } else {
        Arc::new(MemoryStore::new())
    };
    let client = BackendClient::new(config, store).context("configuring backend client")?;

    let source = match args.data {
        Some(path) => DataSource::File(path),
        None => DataSource::Backend,
    };
    let mut state = AppState::new(source);
    state.table.set_view_handler(Box::new(|child: &Child| {
        tracing::info!(id = %child.id, name = %child.name, "Viewing child");
    }));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.dialog.is_some(), current_state.show_help)
                {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),     // Registry
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_registry(f, state, chunks[0]);
    draw_status_bar(f, state, chunks[1]);

    if state.dialog.is_some() {
        draw_dialog(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_registry(f: &mut Frame, state: &RenderState, area: Rect) {
    let loading = if state.is_loading { " [...]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" ♥ {}{} ", state.title, loading))
        .title_bottom(Line::from(format!(" {} ", state.source)).right_aligned());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(if state.disclosure.is_some() { 1 } else { 0 }),
        ])
        .split(inner);

    if state.rows.is_empty() {
        let empty = Paragraph::new("No children to show. Press 'r' to reload.")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, chunks[0]);
    } else {
        draw_table(f, state, chunks[0]);
    }

    if let Some(label) = state.disclosure {
        f.render_widget(render_button(label), chunks[1]);
    }
}

fn table_row(row: &RowView) -> Row<'static> {
    let name = Text::from(vec![
        Line::from(Span::styled(row.name.clone(), Style::default().bold())),
        Line::from(Span::styled(row.details.clone(), Style::default().fg(Color::DarkGray))),
    ]);
    let location = Text::from(vec![
        Line::from(row.district.clone()),
        Line::from(Span::styled(row.location.clone(), Style::default().fg(Color::DarkGray))),
    ]);

    Row::new(vec![
        Cell::from(name),
        Cell::from(location),
        Cell::from(Line::from(badge_span(&row.education))),
        Cell::from(Line::from(badge_span(&row.health))),
        Cell::from(Line::from(badge_span(&row.verification))),
        Cell::from("[View]"),
    ])
    .height(2)
}

fn draw_table(f: &mut Frame, state: &RenderState, area: Rect) {
    let header = Row::new(vec![
        "Name & Details",
        "Location",
        "Education",
        "Health",
        "Status",
        "Actions",
    ])
    .style(Style::default().fg(Color::Yellow).bold());

    let rows: Vec<Row> = state.rows.iter().map(table_row).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(24),
            Constraint::Percentage(20),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
    .highlight_symbol("> ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.cursor));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_dialog(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(dialog) = &state.dialog else {
        return;
    };
    let popup_area = centered_rect(50, 60, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Child Details (Esc to close) ")
        .style(Style::default().bg(Color::Black));

    let mut lines: Vec<Line> = dialog
        .fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().bold()),
                Span::raw(value.clone()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[ c: Contribute ]",
        Style::default().fg(Color::Black).bg(Color::Magenta).bold(),
    )).centered());

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(content, popup_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.dialog.is_some() {
        "Esc:close | c:contribute | q:quit"
    } else {
        "↑/↓:move | Enter:view | m:more/less | r:reload | ?:help | q:quit"
    };
    let text = match &state.status {
        Some(status) => format!(" {} | {} ", status, hints),
        None => format!(" {} ", hints),
    };

    let bar = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 CARETRACK - Keyboard Shortcuts

 REGISTRY
   ↑ / ↓  (k / j)     Move between rows
   Enter / v          View child details
   m                  Show More / Show Less
   r                  Reload records

 DETAILS
   c                  Contribute
   Esc / x            Close

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
