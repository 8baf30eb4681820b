use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use payment_register::app::{AppState, Focus, NoticeLevel};
use payment_register::listing::{build_listing, current_month};
use payment_register::store::RecordStore;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

pub struct App {
    pub store: RecordStore,
    pub state: AppState,
    table_state: TableState,
    should_quit: bool,
}

impl App {
    pub fn new(store: RecordStore, state: AppState) -> Self {
        Self {
            store,
            state,
            table_state: TableState::default(),
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Dialogs are modal
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_notice();
            }
            return;
        }
        if self.state.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.state.confirm_delete(&mut self.store),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.state.cancel_delete(),
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('l') {
                self.state.clear_form();
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.state.focus_next(),
            KeyCode::BackTab => self.state.focus_previous(),
            KeyCode::Enter if self.state.focus.is_form_field() => self.state.submit(&mut self.store),
            KeyCode::Enter => self.state.edit_selected(&self.store),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Esc if self.state.focus == Focus::Table => self.state.select(None, &self.store),
            KeyCode::Down if self.state.focus == Focus::Table => self.state.select_next(&self.store),
            KeyCode::Up if self.state.focus == Focus::Table => self.state.select_previous(&self.store),
            KeyCode::Char(ch) if self.state.focus == Focus::Table => match ch {
                'q' => self.should_quit = true,
                'j' => self.state.select_next(&self.store),
                'k' => self.state.select_previous(&self.store),
                'e' => self.state.edit_selected(&self.store),
                'd' => self.state.request_delete(&self.store),
                _ => {}
            },
            KeyCode::Char(ch) => self.state.type_char(ch),
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("event=ui_loop status=error error=\"{}\"", err);
        println!("Error: {:?}", err);
    }

    info!("event=app_stop records={}", app.store.len());
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(7), // Form
            Constraint::Min(0),    // Listing
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_form(f, chunks[1], app);
    render_table(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);

    if app.state.pending_delete.is_some() {
        render_dialog(
            f,
            "Confirmation",
            "Do you really want to delete the selected record?",
            "  y Delete | n Cancel",
            Color::Yellow,
        );
    } else if let Some(notice) = &app.state.notice {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        render_dialog(f, &notice.title, &notice.message, "  Press Enter to close", color);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let month = current_month();
    let birthdays = build_listing(app.store.records(), month)
        .iter()
        .filter(|row| row.birthday_this_month)
        .count();
    let paid = app.store.records().iter().filter(|r| r.paid).count();

    let spans = vec![
        Span::styled(
            "Payment Register",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(format!("Records: {}", app.store.len()), Style::default().fg(Color::White)),
        Span::raw("  |  "),
        Span::styled(format!("Paid: {}", paid), Style::default().fg(Color::Green)),
        Span::raw("  |  "),
        Span::styled(
            format!("🎉 Birthdays this month: {}", birthdays),
            Style::default().fg(Color::Magenta),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(vec![Span::styled(label, label_style), Span::raw(value)])
}

const NAME_LABEL: &str = "  Full name: ";
const BIRTH_LABEL: &str = "  Birth date (DD/MM/YYYY): ";
const PAYMENT_LABEL: &str = "  Payment date (DD/MM/YYYY): ";

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let focus = app.state.focus;
    let paid_box = if form.paid { "[x] Paid?" } else { "[ ] Paid?" };

    let content = vec![
        field_line(NAME_LABEL, &form.name, focus == Focus::Name),
        field_line(BIRTH_LABEL, form.birth_date.text(), focus == Focus::BirthDate),
        field_line(PAYMENT_LABEL, form.payment_date.text(), focus == Focus::PaymentDate),
        field_line("  ", paid_box, focus == Focus::Paid),
    ];

    let title = format!(" {} (Enter) ", app.state.submit_label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focus.is_form_field() {
            Color::Yellow
        } else {
            Color::White
        }))
        .title(title);

    f.render_widget(Paragraph::new(content).block(block), area);

    // Inner area starts one cell in from the border
    let (label, row, cursor) = match focus {
        Focus::Name => (NAME_LABEL, 0, form.name.chars().count()),
        Focus::BirthDate => (BIRTH_LABEL, 1, form.birth_date.cursor()),
        Focus::PaymentDate => (PAYMENT_LABEL, 2, form.payment_date.cursor()),
        Focus::Paid | Focus::Table => return,
    };
    let x = area.x + 1 + (label.chars().count() + cursor) as u16;
    f.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1 + row);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Full name", "Birth date", "Payment date", "Paid?", "🎉 Birthday"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let listing = build_listing(app.store.records(), current_month());
    let rows = listing.iter().map(|row| {
        let paid_color = if row.paid_label == "Yes" { Color::Green } else { Color::Red };
        let cells = vec![
            Cell::from(truncate(&row.name, 30)),
            Cell::from(row.birth_date.clone()),
            Cell::from(row.payment_date.clone()),
            Cell::from(row.paid_label).style(Style::default().fg(paid_color)),
            Cell::from(if row.birthday_this_month { "🎉" } else { "" }),
        ];
        let style = if row.birthday_this_month {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default()
        };
        Row::new(cells).style(style).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(32),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if app.state.focus == Focus::Table {
                Color::Yellow
            } else {
                Color::White
            }))
            .title(" Collaborators "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    app.table_state.select(app.state.selected);
    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let enabled = app.state.selection_actions_enabled(&app.store);
    let selection_style = if enabled {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let spans = vec![
        key(" Tab"),
        Span::raw(" Focus | "),
        key("Enter"),
        Span::raw(format!(" {} | ", app.state.submit_label())),
        key("Ctrl+L"),
        Span::raw(" Clear | "),
        Span::styled("e", selection_style),
        Span::raw(" Edit | "),
        Span::styled("d", selection_style),
        Span::raw(" Delete | "),
        key("Space"),
        Span::raw(" Paid | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)));

    f.render_widget(status_bar, area);
}

fn render_dialog(f: &mut Frame, title: &str, message: &str, hint: &str, color: Color) {
    let area = centered_rect(60, 7, f.size());
    let content = vec![
        Line::from(""),
        Line::from(Span::raw(format!("  {}", message))),
        Line::from(""),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let dialog = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", title)),
    );

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(width)) / 2,
        y: r.y + (r.height.saturating_sub(height)) / 2,
        width,
        height: height.min(r.height),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
