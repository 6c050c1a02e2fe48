use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fiscal_panorama::{answer, format, FiscalData};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
        TableState, Wrap,
    },
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Budget,
    Revenue,
    Debt,
    Indicators,
    Assistant,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Budget => Page::Revenue,
            Page::Revenue => Page::Debt,
            Page::Debt => Page::Indicators,
            Page::Indicators => Page::Assistant,
            Page::Assistant => Page::Budget,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Budget => Page::Assistant,
            Page::Revenue => Page::Budget,
            Page::Debt => Page::Revenue,
            Page::Indicators => Page::Debt,
            Page::Assistant => Page::Indicators,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Budget => "Execução Orçamentária",
            Page::Revenue => "Receitas Fiscais",
            Page::Debt => "Dívida Pública",
            Page::Indicators => "Indicadores",
            Page::Assistant => "Assistente IA",
        }
    }
}

pub struct App {
    pub data: FiscalData,
    pub current_page: Page,
    pub budget_state: TableState,
    pub revenue_state: TableState,
    pub debt_state: TableState,
    pub indicator_state: TableState,
    pub question_input: String,
    pub response: Option<String>,
}

impl App {
    pub fn new(data: FiscalData) -> Self {
        let mut budget_state = TableState::default();
        if !data.budget.is_empty() {
            budget_state.select(Some(0));
        }
        let mut revenue_state = TableState::default();
        if !data.revenue.is_empty() {
            revenue_state.select(Some(0));
        }
        let mut debt_state = TableState::default();
        if !data.debt.is_empty() {
            debt_state.select(Some(0));
        }
        let mut indicator_state = TableState::default();
        if !data.indicators.is_empty() {
            indicator_state.select(Some(0));
        }

        Self {
            data,
            current_page: Page::Budget,
            budget_state,
            revenue_state,
            debt_state,
            indicator_state,
            question_input: String::new(),
            response: None,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    /// Table state and row count for the page being displayed
    fn current_table(&mut self) -> Option<(&mut TableState, usize)> {
        match self.current_page {
            Page::Budget => Some((&mut self.budget_state, self.data.budget.len())),
            Page::Revenue => Some((&mut self.revenue_state, self.data.revenue.len())),
            Page::Debt => Some((&mut self.debt_state, self.data.debt.len())),
            Page::Indicators => Some((&mut self.indicator_state, self.data.indicators.len())),
            Page::Assistant => None,
        }
    }

    pub fn next(&mut self) {
        if let Some((state, len)) = self.current_table() {
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(i) if i >= len - 1 => 0,
                Some(i) => i + 1,
                None => 0,
            };
            state.select(Some(i));
        }
    }

    pub fn previous(&mut self) {
        if let Some((state, len)) = self.current_table() {
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            state.select(Some(i));
        }
    }

    pub fn page_down(&mut self) {
        if let Some((state, len)) = self.current_table() {
            if len == 0 {
                return;
            }
            let i = state.selected().map_or(0, |i| (i + 20).min(len - 1));
            state.select(Some(i));
        }
    }

    pub fn page_up(&mut self) {
        if let Some((state, _)) = self.current_table() {
            let i = state.selected().map_or(0, |i| i.saturating_sub(20));
            state.select(Some(i));
        }
    }

    pub fn select_first(&mut self) {
        if let Some((state, len)) = self.current_table() {
            if len > 0 {
                state.select(Some(0));
            }
        }
    }

    pub fn select_last(&mut self) {
        if let Some((state, len)) = self.current_table() {
            if len > 0 {
                state.select(Some(len - 1));
            }
        }
    }

    /// Run the assistant on the typed question. Empty input is ignored
    /// (the engine is never called with nothing to match).
    pub fn submit_question(&mut self) {
        let question = self.question_input.trim();
        if question.is_empty() {
            return;
        }
        self.response = Some(answer(question, &self.data));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // The assistant page owns most keys while typing
            if app.current_page == Page::Assistant {
                match key.code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.question_input.push(c);
                        continue;
                    }
                    KeyCode::Backspace => {
                        app.question_input.pop();
                        continue;
                    }
                    KeyCode::Enter => {
                        app.submit_question();
                        continue;
                    }
                    KeyCode::Esc => {
                        if app.question_input.is_empty() && app.response.is_none() {
                            return Ok(());
                        }
                        app.question_input.clear();
                        app.response = None;
                        continue;
                    }
                    _ => {}
                }
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.select_first(),
                KeyCode::End => app.select_last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Budget => render_budget(f, chunks[1], app),
        Page::Revenue => render_revenue(f, chunks[1], app),
        Page::Debt => render_debt(f, chunks[1], app),
        Page::Indicators => render_indicators(f, chunks[1], app),
        Page::Assistant => render_assistant(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [
        Page::Budget,
        Page::Revenue,
        Page::Debt,
        Page::Indicators,
        Page::Assistant,
    ];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!(
            "Receita: {} {}",
            format::amount(app.data.revenue.total_value()),
            format::CURRENCY
        ),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 🇦🇴 Fiscal Panorama "),
    );

    f.render_widget(header, area);
}

// ============================================================================
// BUDGET PAGE - bar chart by sector + detail table
// ============================================================================

fn render_budget(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(area);

    // Realized budget by sector, in millions so bars fit u64 nicely
    let totals = app.data.budget.realized_by_sector();
    let bars: Vec<(String, u64)> = totals
        .iter()
        .map(|(sector, total)| (truncate(sector, 6), (total / 1_000_000.0) as u64))
        .collect();
    let bar_data: Vec<(&str, u64)> = bars.iter().map(|(s, v)| (s.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Orçamento Realizado por Setor (milhões AOA) "),
        )
        .data(&bar_data)
        .bar_width(8)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    f.render_widget(chart, chunks[0]);

    let rows = app.data.budget.records.iter().map(|r| {
        let color = if r.execution_rate >= 100.0 {
            Color::Green
        } else {
            Color::Red
        };
        Row::new(vec![
            Cell::from(r.date.to_string()),
            Cell::from(r.sector.clone()),
            Cell::from(format::amount(r.planned)),
            Cell::from(format::amount(r.realized)),
            Cell::from(format!("{}%", format::percent(r.execution_rate)))
                .style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(10),
        ],
    )
    .header(table_header(&[
        "Data",
        "Setor",
        "Planejado",
        "Realizado",
        "Taxa",
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Execução Orçamentária "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.budget_state);
}

// ============================================================================
// REVENUE PAGE - regional shares + detail table
// ============================================================================

fn render_revenue(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let totals = app.data.revenue.value_by_region();
    let grand_total: f64 = totals.values().sum();

    let summary_rows = totals.iter().map(|(region, total)| {
        let share = if grand_total > 0.0 {
            total / grand_total * 100.0
        } else {
            0.0
        };
        Row::new(vec![
            Cell::from(region.clone()),
            Cell::from(format::amount(*total)),
            Cell::from(format!("{}%", format::percent(share)))
                .style(Style::default().fg(Color::Green)),
        ])
        .height(1)
    });

    let summary = Table::new(
        summary_rows,
        [
            Constraint::Length(14),
            Constraint::Length(20),
            Constraint::Length(10),
        ],
    )
    .header(table_header(&["Região", "Total", "Quota"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Distribuição de Receitas por Região "),
    );

    f.render_widget(summary, chunks[0]);

    let rows = app.data.revenue.records.iter().map(|r| {
        let hit = r.value >= r.monthly_target;
        Row::new(vec![
            Cell::from(r.date.to_string()),
            Cell::from(truncate(&r.revenue_type, 22)),
            Cell::from(r.region.clone()),
            Cell::from(format::amount(r.value))
                .style(Style::default().fg(if hit { Color::Green } else { Color::Red })),
            Cell::from(format::amount(r.monthly_target)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(16),
        ],
    )
    .header(table_header(&[
        "Data",
        "Tipo de Receita",
        "Região",
        "Valor",
        "Meta Mensal",
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Receitas Fiscais "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.revenue_state);
}

// ============================================================================
// DEBT PAGE - composition + detail table
// ============================================================================

fn render_debt(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    let total = app.data.debt.total_value();
    let composition_rows = app.data.debt.composition().into_iter().map(
        |(debt_type, category, subtotal)| {
            let share = if total > 0.0 {
                subtotal / total * 100.0
            } else {
                0.0
            };
            Row::new(vec![
                Cell::from(debt_type.clone()).style(Style::default().fg(
                    if debt_type == "Externa" {
                        Color::Red
                    } else {
                        Color::Cyan
                    },
                )),
                Cell::from(category),
                Cell::from(format::amount(subtotal)),
                Cell::from(format!("{}%", format::percent(share))),
            ])
            .height(1)
        },
    );

    let composition = Table::new(
        composition_rows,
        [
            Constraint::Length(10),
            Constraint::Length(28),
            Constraint::Length(20),
            Constraint::Length(10),
        ],
    )
    .header(table_header(&["Tipo", "Categoria", "Total", "Quota"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Composição da Dívida Pública "),
    );

    f.render_widget(composition, chunks[0]);

    let rows = app.data.debt.records.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.date.to_string()),
            Cell::from(r.debt_type.clone()),
            Cell::from(truncate(&r.category, 26)),
            Cell::from(format::amount(r.value)),
            Cell::from(format!("{}%", format::percent(r.interest_rate * 100.0))),
            Cell::from(format!("{} anos", r.term_years)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(28),
            Constraint::Length(18),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(table_header(&[
        "Data", "Tipo", "Categoria", "Valor", "Juros", "Prazo",
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Dívida Pública "))
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.debt_state);
}

// ============================================================================
// INDICATORS PAGE - line chart + detail table
// ============================================================================

fn render_indicators(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(area);

    let inflation: Vec<(f64, f64)> = app
        .data
        .indicators
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.inflation))
        .collect();
    let gdp: Vec<(f64, f64)> = app
        .data
        .indicators
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.gdp_variation))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Inflação (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&inflation),
        Dataset::default()
            .name("Variação PIB (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&gdp),
    ];

    let months = app.data.indicators.len().saturating_sub(1).max(1) as f64;
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Evolução dos Indicadores Econômicos "),
        )
        .x_axis(
            Axis::default()
                .title("Mês")
                .bounds([0.0, months])
                .labels(vec![
                    Span::raw("1"),
                    Span::raw(format!("{}", app.data.indicators.len())),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("%")
                .bounds([-1.0, 13.0])
                .labels(vec![Span::raw("-1"), Span::raw("6"), Span::raw("13")]),
        );

    f.render_widget(chart, chunks[0]);

    let rows = app.data.indicators.records.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.date.to_string()),
            Cell::from(format!("{}%", format::percent(r.gdp_variation))),
            Cell::from(format!("{}%", format::percent(r.inflation)))
                .style(Style::default().fg(Color::Red)),
            Cell::from(format!("{:.2}", r.exchange_rate_usd)),
            Cell::from(format::amount(r.international_reserves)),
            Cell::from(format!("{:.2}", r.oil_price)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(10),
        ],
    )
    .header(table_header(&[
        "Data",
        "PIB",
        "Inflação",
        "Câmbio USD",
        "Reservas",
        "Petróleo",
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Indicadores Econômicos "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.indicator_state);
}

// ============================================================================
// ASSISTANT PAGE - question input + response
// ============================================================================

fn render_assistant(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("❯ ", Style::default().fg(Color::Yellow)),
        Span::raw(app.question_input.as_str()),
        Span::styled("▌", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Faça uma pergunta sobre os dados (Enter envia) "),
    );

    f.render_widget(input, chunks[0]);

    let body = match &app.response {
        Some(response) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "  Resposta:",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            for line in response.lines() {
                lines.push(Line::from(format!("  {}", line)));
            }
            lines
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Ex: Como está a execução orçamentária?",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                "  Ex: Qual a receita por região?",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                "  Ex: Qual a tendência da inflação?",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        ],
    };

    let response_panel = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 💡 Assistente IA Financeiro "),
    );

    f.render_widget(response_panel, chunks[1]);
}

// ============================================================================
// SHARED WIDGET HELPERS
// ============================================================================

fn table_header(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if app.current_page == Page::Assistant {
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Enviar | "));
        status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Limpar/Sair | "));
    } else {
        let (selected, total) = match app.current_page {
            Page::Budget => (app.budget_state.selected(), app.data.budget.len()),
            Page::Revenue => (app.revenue_state.selected(), app.data.revenue.len()),
            Page::Debt => (app.debt_state.selected(), app.data.debt.len()),
            Page::Indicators => (app.indicator_state.selected(), app.data.indicators.len()),
            Page::Assistant => (None, 0),
        };
        status_spans.push(Span::styled(
            format!(" Linha: {}/{} | ", selected.map(|i| i + 1).unwrap_or(0), total),
            Style::default().fg(Color::Cyan),
        ));
        status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Nav | "));
        status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Rápido | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Sair | "));
    }

    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Página"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
