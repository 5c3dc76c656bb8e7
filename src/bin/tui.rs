mod tui_app;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tui_app::{AppState, ConnectionStatus, Focus};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:8050".to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(io::Error::other)?;

    let mut app = AppState::new(base_url);
    app.load_form(&client).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &client).await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    client: &reqwest::Client,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Any edit or click re-runs the prediction callback, like the web page.
        let changed = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Tab | KeyCode::Down => {
                app.focus = app.focus.next();
                false
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus = app.focus.prev();
                false
            }
            KeyCode::Left => app.cycle_owner(-1),
            KeyCode::Right => app.cycle_owner(1),
            KeyCode::Backspace | KeyCode::Delete => app.backspace(),
            KeyCode::Enter => {
                app.click();
                true
            }
            KeyCode::Char(c) => app.input_char(c),
            _ => false,
        };

        if changed {
            app.evaluate(client).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(4), // instructions
            Constraint::Length(3), // year
            Constraint::Length(3), // mileage
            Constraint::Length(3), // km_driven
            Constraint::Length(3), // owner
            Constraint::Length(3), // predict button
            Constraint::Min(3),    // result
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_instructions(f, app, chunks[1]);
    render_field(f, app, Focus::Year, &app.labels[0], &app.year, chunks[2]);
    render_field(f, app, Focus::Mileage, &app.labels[1], &app.mileage, chunks[3]);
    render_field(f, app, Focus::KmDriven, &app.labels[2], &app.km_driven, chunks[4]);
    let owner = app
        .owner_label()
        .map(|l| format!("◀ {l} ▶"))
        .unwrap_or_default();
    render_field(f, app, Focus::Owner, &app.labels[3], &owner, chunks[5]);
    render_button(f, app, chunks[6]);
    render_result(f, app, chunks[7]);
    render_footer(f, chunks[8]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = match &app.status {
        ConnectionStatus::Connected => ("● connected".to_string(), Color::Green),
        ConnectionStatus::Connecting => ("○ connecting".to_string(), Color::Yellow),
        ConnectionStatus::Error(e) => (format!("✕ {e}"), Color::Red),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", app.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("clicks: {}", app.n_clicks),
            Style::default().fg(Color::White),
        ),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, app: &AppState, area: Rect) {
    let lines: Vec<Line> = app
        .instructions
        .iter()
        .map(|s| Line::from(Span::styled(s.as_str(), Style::default().fg(Color::Gray))))
        .collect();
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Instruction "));
    f.render_widget(paragraph, area);
}

fn render_field(f: &mut Frame, app: &AppState, field: Focus, label: &str, value: &str, area: Rect) {
    let focused = app.focus == field;
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let cursor = if focused && field != Focus::Owner { "▏" } else { "" };

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
        Span::styled(cursor, Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(format!(" {label} "), Style::default().fg(Color::Cyan))),
    );
    f.render_widget(paragraph, area);
}

fn render_button(f: &mut Frame, app: &AppState, area: Rect) {
    let style = if app.focus == Focus::Predict {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", app.button_label),
        style,
    )))
    .centered()
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    f.render_widget(paragraph, area);
}

fn render_result(f: &mut Frame, app: &AppState, area: Rect) {
    let color = if app.result.starts_with("An error occurred") {
        Color::Red
    } else if app.result.starts_with("The predicted car price") {
        Color::Green
    } else {
        Color::White
    };
    let paragraph = Paragraph::new(Span::styled(
        app.result.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " RESULT ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" [Tab/↑↓] ", Style::default().fg(Color::Yellow)),
        Span::raw("field  "),
        Span::styled("[←→] ", Style::default().fg(Color::Yellow)),
        Span::raw("owner  "),
        Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
        Span::raw("predict  "),
        Span::styled("[Esc/q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit"),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
