use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use rusqlite::Connection;
use std::cmp::{max, min};
use std::io;

use crate::display;
use crate::error::AppError;
use crate::ledger::Ledger;
use crate::models::transaction::Transaction;
use crate::operations::remove::remove_entry;
use crate::operations::summary::{self, Statistics};
use crate::operations::view::{self, TypeFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Search,
    ConfirmDelete,
}

struct BrowseState {
    mode: Mode,

    type_filter: TypeFilter,
    search: String,

    // Current projection, newest first, plus whole-ledger statistics.
    rows: Vec<Transaction>,
    stats: Statistics,

    table_state: TableState,

    // Search modal
    search_buffer: String,

    // Delete modal
    pending_delete: Option<Transaction>,

    // Cached per-draw
    last_page_size: usize,
}

impl BrowseState {
    fn new(ledger: &Ledger) -> Self {
        let mut state = Self {
            mode: Mode::List,
            type_filter: TypeFilter::All,
            search: String::new(),
            rows: Vec::new(),
            stats: summary::summarize(ledger.transactions()),
            table_state: TableState::default(),
            search_buffer: String::new(),
            pending_delete: None,
            last_page_size: 10,
        };
        state.recompute(ledger);
        state
    }

    /// Rebuilds the projection and statistics from the ledger. Statistics
    /// always cover the whole ledger, not the filtered rows.
    fn recompute(&mut self, ledger: &Ledger) {
        self.stats = summary::summarize(ledger.transactions());
        self.rows = view::filter(ledger.transactions(), self.type_filter, &self.search)
            .into_iter()
            .cloned()
            .collect();

        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            let selected = match self.table_state.selected() {
                Some(selected) => min(selected, self.rows.len() - 1),
                None => 0,
            };
            self.table_state.select(Some(selected));
        }
    }

    fn selected_transaction(&self) -> Option<&Transaction> {
        self.rows.get(self.table_state.selected()?)
    }

    fn move_selection(&mut self, delta: i32) {
        if self.rows.is_empty() {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i32;
        let max_index = self.rows.len().saturating_sub(1) as i32;
        let next = (current + delta).clamp(0, max_index) as usize;
        self.table_state.select(Some(next));
    }

    fn page_up(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(-page);
    }

    fn page_down(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(page);
    }

    fn cycle_type_filter(&mut self, ledger: &Ledger) {
        self.type_filter = self.type_filter.cycle();
        self.recompute(ledger);
    }

    fn reset_view(&mut self, ledger: &Ledger) {
        self.type_filter = TypeFilter::All;
        self.search.clear();
        self.recompute(ledger);
    }

    fn start_search(&mut self) {
        self.search_buffer = self.search.clone();
        self.mode = Mode::Search;
    }

    fn cancel_search(&mut self) {
        self.mode = Mode::List;
    }

    fn commit_search(&mut self, ledger: &Ledger) {
        self.search = self.search_buffer.trim().to_string();
        self.mode = Mode::List;
        self.recompute(ledger);
    }

    fn request_delete(&mut self) {
        self.pending_delete = self.selected_transaction().cloned();
        if self.pending_delete.is_some() {
            self.mode = Mode::ConfirmDelete;
        }
    }

    fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::List;
    }
}

pub fn run_browse(ledger: &mut Ledger, conn: &Connection) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        let mut state = BrowseState::new(ledger);

        loop {
            terminal.draw(|frame| {
                let size = frame.area();
                let layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(4),
                        Constraint::Min(5),
                        Constraint::Length(2),
                    ])
                    .split(size);

                render_header(frame, layout[0], &state);
                render_table(frame, layout[1], &mut state);
                render_footer(frame, layout[2], &state);

                if state.mode == Mode::Search {
                    render_search_modal(frame, size, &state);
                }
                if state.mode == Mode::ConfirmDelete {
                    render_delete_modal(frame, size, &state);
                }
            })?;

            if event::poll(std::time::Duration::from_millis(200))? {
                match event::read()? {
                    Event::Key(key) => {
                        if handle_key(ledger, conn, &mut state, key)? {
                            break;
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

fn handle_key(
    ledger: &mut Ledger,
    conn: &Connection,
    state: &mut BrowseState,
    key: KeyEvent,
) -> Result<bool, AppError> {
    // Many terminals emit both a Press and a Release event. Only act on
    // Press/Repeat.
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    match state.mode {
        Mode::List => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => state.move_selection(-1),
            KeyCode::Down => state.move_selection(1),
            KeyCode::PageUp => state.page_up(),
            KeyCode::PageDown => state.page_down(),
            KeyCode::Home => {
                if !state.rows.is_empty() {
                    state.table_state.select(Some(0));
                }
            }
            KeyCode::End => {
                if !state.rows.is_empty() {
                    state.table_state.select(Some(state.rows.len().saturating_sub(1)));
                }
            }
            KeyCode::Char('/') => state.start_search(),
            KeyCode::Char('t') => state.cycle_type_filter(ledger),
            KeyCode::Char('x') => state.reset_view(ledger),
            KeyCode::Char('d') => state.request_delete(),
            _ => {}
        },
        Mode::Search => {
            // Allow Ctrl+C / Ctrl+Q to cancel
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                state.cancel_search();
                return Ok(false);
            }

            match key.code {
                KeyCode::Esc => state.cancel_search(),
                KeyCode::Enter => state.commit_search(ledger),
                KeyCode::Backspace => {
                    state.search_buffer.pop();
                }
                KeyCode::Char(ch) => {
                    state.search_buffer.push(ch);
                }
                _ => {}
            }
        }
        Mode::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(pending) = state.pending_delete.take() {
                    remove_entry(ledger, conn, pending.id)?;
                }
                state.mode = Mode::List;
                state.recompute(ledger);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                state.cancel_delete();
            }
            _ => {}
        },
    }

    Ok(false)
}

fn render_header(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let stats = &state.stats;
    let balance_color = if stats.total >= rust_decimal::Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };

    let totals = Line::from(vec![
        Span::styled("Ledger", Style::default().fg(Color::Cyan).bold()),
        Span::raw("  Balance: "),
        Span::styled(display::format_currency(stats.total), Style::default().fg(balance_color)),
        Span::raw("  |  Income: "),
        Span::styled(
            display::format_currency(stats.income_total),
            Style::default().fg(Color::Green),
        ),
        Span::raw(format!(" ({})", stats.income_count)),
        Span::raw("  |  Expenses: "),
        Span::styled(
            display::format_currency(stats.expense_total),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!(" ({})", stats.expense_count)),
        Span::raw("  |  Ratio: "),
        Span::raw(format!("{}%", stats.expense_ratio)),
    ]);

    let search = if state.search.is_empty() {
        "(none)".to_string()
    } else {
        format!("\"{}\"", state.search)
    };
    let filters = Line::from(vec![
        Span::raw(format!("Type: {}", state.type_filter.label())),
        Span::raw("  |  "),
        Span::raw(format!("Search: {}", search)),
        Span::raw("  |  "),
        Span::raw(format!("Rows: {}", state.rows.len())),
    ]);

    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(vec![totals, filters])
        .block(block)
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let hint = match state.mode {
        Mode::List => {
            "↑/↓ move  PgUp/PgDn page  / search  t type  x reset  d delete  q/Esc exit"
        }
        Mode::Search => "Type, Enter apply, Esc cancel",
        Mode::ConfirmDelete => "y delete  n/Esc keep",
    };

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(hint)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_table(frame: &mut ratatui::Frame, area: Rect, state: &mut BrowseState) {
    let block = Block::default().title("Transactions").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new([
        Cell::from("Date").style(Style::default().bold()),
        Cell::from("").style(Style::default().bold()),
        Cell::from("Description").style(Style::default().bold()),
        Cell::from("Category").style(Style::default().bold()),
        Cell::from("Amount").style(Style::default().bold()),
        Cell::from("Id").style(Style::default().bold()),
    ])
    .style(Style::default().fg(Color::White));

    let rows = state.rows.iter().map(|transaction| {
        let amount_color = if transaction.is_income() {
            Color::Green
        } else {
            Color::Red
        };
        Row::new([
            Cell::from(transaction.date.format("%Y-%m-%d %H:%M").to_string()),
            Cell::from(display::type_marker(transaction)),
            Cell::from(display::shorten(&transaction.description, 42)),
            Cell::from(transaction.category.label()),
            Cell::from(display::signed_currency(transaction))
                .style(Style::default().fg(amount_color)),
            Cell::from(transaction.id.to_string()),
        ])
    });

    // Estimate a page size based on the table height.
    // Leave room for the header row.
    state.last_page_size = inner.height.saturating_sub(2) as usize;
    if state.last_page_size == 0 {
        state.last_page_size = 1;
    }

    let widths = [
        Constraint::Length(16),
        Constraint::Length(2),
        Constraint::Percentage(40),
        Constraint::Length(15),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("➤ ")
        .column_spacing(1);

    frame.render_stateful_widget(table, inner, &mut state.table_state);

    if state.rows.is_empty() {
        let empty = Paragraph::new("No transactions match the current view")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
    }
}

fn render_search_modal(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let popup_area = centered_rect(80, 30, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(vec![Span::styled("Search descriptions", Style::default().bold())]),
        Line::from("Case-insensitive substring (empty clears)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("> {}", state.search_buffer),
            Style::default().fg(Color::Yellow),
        )]),
    ];

    let block = Block::default().borders(Borders::ALL).title("Search");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

fn render_delete_modal(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let popup_area = centered_rect(80, 30, area);
    frame.render_widget(Clear, popup_area);

    let lines = match state.pending_delete.as_ref() {
        Some(pending) => vec![
            Line::from(vec![Span::styled("Delete this entry?", Style::default().bold())]),
            Line::from(""),
            Line::from(format!(
                "{}  {}  {}",
                display::shorten(&pending.description, 40),
                pending.category.label(),
                display::signed_currency(pending),
            )),
            Line::from(""),
            Line::from(vec![Span::styled(
                "y to delete, n to keep",
                Style::default().fg(Color::DarkGray),
            )]),
        ],
        None => vec![Line::from("No selection")],
    };

    let block = Block::default().borders(Borders::ALL).title("Confirm");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
