//! Dashboard application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, and renders the playbook dashboard: completion
//! gauges, the grouped task table with search and filters, the add-task
//! form, and the task detail and resource guide views.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame, Terminal,
};

use crate::catalog::{
    add_custom_task, format_frequency, format_frequency_filter, format_recommendation,
    format_sort_key, format_status, format_status_filter, format_time, toggle_complete,
    toggle_skip, truncate, Playbook,
};
use crate::chart::{donut_segments, Percentages, SegmentKind};
use crate::fields::{Frequency, FrequencyFilter, SortKey, StatusFilter};
use crate::guide::resource_guide;
use crate::playbook::{self, Generation};
use crate::query::{aggregate_counts, query, Criteria};
use crate::task::{TaskDraft, TaskTime};
use crate::tui::colors::{ACCENT_BLUE, COMPLETED_GREEN, PENDING_BLUE, SKIPPED_AMBER};
use crate::tui::enums::{AppState, InputMode};
use crate::tui::input::InputField;
use crate::tui::utils::centered_rect;

const TIME_PRESETS: [(u8, u8); 5] = [(0, 15), (0, 30), (1, 0), (1, 30), (2, 0)];
const COST_PRESETS: [&str; 6] = ["$0", "$5", "$10", "$15", "$20", "$25+"];
const FREQUENCIES: [Frequency; 5] = [
    Frequency::OneTime,
    Frequency::Daily,
    Frequency::Weekly,
    Frequency::Monthly,
    Frequency::Yearly,
];

/// One visible row of the task table.
#[derive(Clone)]
enum RowKind {
    /// Category heading with its matching task count.
    Category(String, usize),
    Task(u64),
}

/// Form state for the add-task dialog.
struct AddTaskForm {
    title: InputField,
    frequency_idx: usize,
    time_idx: usize,
    cost_idx: usize,
    /// 0 = title, 1 = frequency, 2 = time, 3 = cost.
    field: usize,
}

impl AddTaskForm {
    fn new() -> Self {
        AddTaskForm {
            title: InputField::new(),
            frequency_idx: 0,
            time_idx: 1,
            cost_idx: 0,
            field: 0,
        }
    }

    fn draft(&self) -> TaskDraft {
        let (hours, minutes) = TIME_PRESETS[self.time_idx];
        TaskDraft {
            title: self.title.value.clone(),
            category: None,
            frequency: FREQUENCIES[self.frequency_idx],
            frequency_detail: None,
            cost: COST_PRESETS[self.cost_idx].to_string(),
            time: TaskTime::new(hours, minutes),
            description: None,
        }
    }
}

/// Main application state for the dashboard TUI.
pub struct App {
    state: AppState,
    playbook: Playbook,
    db_path: PathBuf,
    table_state: TableState,
    rows: Vec<RowKind>,
    search: InputField,
    input_mode: InputMode,
    frequency_filter: FrequencyFilter,
    status_filter: StatusFilter,
    sort_key: SortKey,
    add_form: AddTaskForm,
    generation: Option<Generation>,
    status_message: String,
    should_exit: bool,
}

impl App {
    /// Create a new App instance, loading the playbook from the given path.
    pub fn new(db_path: &Path) -> Self {
        let playbook = Playbook::load(db_path);
        let mut app = App {
            state: AppState::Dashboard,
            playbook,
            db_path: db_path.to_path_buf(),
            table_state: TableState::default(),
            rows: Vec::new(),
            search: InputField::new(),
            input_mode: InputMode::None,
            frequency_filter: FrequencyFilter::All,
            status_filter: StatusFilter::All,
            sort_key: SortKey::Catalog,
            add_form: AddTaskForm::new(),
            generation: None,
            status_message: String::new(),
            should_exit: false,
        };
        app.refresh_rows();
        app
    }

    /// Main event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            self.handle_input()?;
            self.tick();

            if self.should_exit {
                break;
            }
        }
        Ok(())
    }

    /// Complete a finished generation, if one is running.
    fn tick(&mut self) {
        if let Some(generation) = self.generation {
            if generation.is_done() {
                self.generation = None;
                playbook::generate(&mut self.playbook);
                self.save();
                self.status_message =
                    format!("{} playbook ready - all tasks reset to pending", self.playbook.month);
                self.refresh_rows();
            }
        }
    }

    fn criteria(&self) -> Criteria {
        Criteria {
            search: self.search.value.clone(),
            frequency: self.frequency_filter,
            status: self.status_filter,
            sort: self.sort_key,
        }
    }

    /// Rebuild the visible rows from the current filters, keeping the
    /// selection on the same task where possible.
    fn refresh_rows(&mut self) {
        let old_selected_id = self.selected_task_id();

        let result = query(&self.playbook.tasks, &self.criteria());
        self.rows = Vec::new();
        for group in &result.groups {
            self.rows
                .push(RowKind::Category(group.category.to_string(), group.tasks.len()));
            for task in &group.tasks {
                self.rows.push(RowKind::Task(task.id));
            }
        }

        let restored = old_selected_id.and_then(|id| {
            self.rows.iter().position(|r| matches!(r, RowKind::Task(t) if *t == id))
        });
        let first_task = self
            .rows
            .iter()
            .position(|r| matches!(r, RowKind::Task(_)));
        self.table_state.select(restored.or(first_task));
    }

    fn selected_task_id(&self) -> Option<u64> {
        match self.rows.get(self.table_state.selected()?) {
            Some(RowKind::Task(id)) => Some(*id),
            _ => None,
        }
    }

    /// Move the selection up or down, skipping category headings.
    fn move_selection(&mut self, down: bool) {
        if self.rows.is_empty() {
            return;
        }
        let mut idx = self.table_state.selected().unwrap_or(0);
        loop {
            if down {
                if idx + 1 >= self.rows.len() {
                    break;
                }
                idx += 1;
            } else {
                if idx == 0 {
                    break;
                }
                idx -= 1;
            }
            if matches!(self.rows[idx], RowKind::Task(_)) {
                self.table_state.select(Some(idx));
                break;
            }
        }
    }

    fn save(&mut self) {
        if let Err(e) = self.playbook.save(&self.db_path) {
            self.status_message = format!("Failed to save playbook: {e}");
        }
    }

    /// Toggle the selected task's completed or skipped flag.
    fn toggle_selected(&mut self, skip: bool) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.playbook.get(id) {
            let updated = if skip { toggle_skip(task) } else { toggle_complete(task) };
            let status = format_status(&updated);
            *self.playbook.get_mut(id).unwrap() = updated;
            self.save();
            self.status_message = format!("Task {} is now {}", id, status);
            self.refresh_rows();
        }
    }

    /// Handle keyboard input based on current state.
    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // A running generation only accepts quit.
                if self.generation.is_some() {
                    if key.code == KeyCode::Char('q') {
                        self.should_exit = true;
                    }
                    return Ok(());
                }

                match self.state {
                    AppState::Dashboard => self.handle_dashboard_input(key.code),
                    AppState::TaskDetail | AppState::ResourceGuide | AppState::Help => {
                        self.handle_overlay_input(key.code)
                    }
                    AppState::AddTask => self.handle_add_task_input(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_dashboard_input(&mut self, key: KeyCode) {
        if self.input_mode == InputMode::Text {
            match key {
                KeyCode::Esc | KeyCode::Enter => {
                    self.input_mode = InputMode::None;
                }
                KeyCode::Backspace => {
                    self.search.handle_backspace();
                    self.refresh_rows();
                }
                KeyCode::Left => self.search.move_cursor_left(),
                KeyCode::Right => self.search.move_cursor_right(),
                KeyCode::Char(c) => {
                    self.search.handle_char(c);
                    self.refresh_rows();
                }
                _ => {}
            }
            return;
        }

        self.status_message.clear();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_exit = true;
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('f') => {
                self.frequency_filter = self.frequency_filter.next();
                self.refresh_rows();
            }
            KeyCode::Char('s') => {
                self.status_filter = self.status_filter.next();
                self.refresh_rows();
            }
            KeyCode::Char('o') => {
                self.sort_key = self.sort_key.next();
                self.refresh_rows();
            }
            KeyCode::Char('c') => {
                self.search.clear();
                self.frequency_filter = FrequencyFilter::All;
                self.status_filter = StatusFilter::All;
                self.sort_key = SortKey::Catalog;
                self.refresh_rows();
            }
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Char(' ') => self.toggle_selected(false),
            KeyCode::Char('x') => self.toggle_selected(true),
            KeyCode::Enter => {
                if self.selected_task_id().is_some() {
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('r') => {
                if self.selected_task_id().is_some() {
                    self.state = AppState::ResourceGuide;
                }
            }
            KeyCode::Char('a') => {
                self.add_form = AddTaskForm::new();
                self.state = AppState::AddTask;
            }
            KeyCode::Char('g') => {
                self.generation = Some(Generation::start());
            }
            KeyCode::Char('?') => {
                self.state = AppState::Help;
            }
            _ => {}
        }
    }

    fn handle_overlay_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('r') if self.state == AppState::TaskDetail => {
                self.state = AppState::ResourceGuide;
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.state = AppState::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_add_task_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::Dashboard;
            }
            KeyCode::Enter => match add_custom_task(&mut self.playbook, self.add_form.draft()) {
                Ok(id) => {
                    self.save();
                    self.status_message = format!("Added task {}", id);
                    self.state = AppState::Dashboard;
                    self.refresh_rows();
                }
                Err(e) => {
                    self.status_message = format!("Rejected: {}", e);
                }
            },
            KeyCode::Up => {
                if self.add_form.field > 0 {
                    self.add_form.field -= 1;
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.add_form.field < 3 {
                    self.add_form.field += 1;
                }
            }
            KeyCode::Left => self.cycle_form_field(false),
            KeyCode::Right => self.cycle_form_field(true),
            KeyCode::Backspace => {
                if self.add_form.field == 0 {
                    self.add_form.title.handle_backspace();
                }
            }
            KeyCode::Char(c) => {
                if self.add_form.field == 0 {
                    self.add_form.title.handle_char(c);
                }
            }
            _ => {}
        }
    }

    fn cycle_form_field(&mut self, forward: bool) {
        let step = |idx: usize, len: usize| {
            if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            }
        };
        match self.add_form.field {
            1 => self.add_form.frequency_idx = step(self.add_form.frequency_idx, FREQUENCIES.len()),
            2 => self.add_form.time_idx = step(self.add_form.time_idx, TIME_PRESETS.len()),
            3 => self.add_form.cost_idx = step(self.add_form.cost_idx, COST_PRESETS.len()),
            _ => {}
        }
    }

    /// Main render function that dispatches to state-specific renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Completion gauges
                Constraint::Length(3), // Search + filters
                Constraint::Min(0),    // Task table
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_gauges(f, chunks[1]);
        self.render_filters(f, chunks[2]);
        if self.generation.is_some() {
            self.render_generation(f, chunks[3]);
        } else {
            let main = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(30)])
                .split(chunks[3]);
            self.render_task_table(f, main[0]);
            self.render_donut(f, main[1]);
        }
        self.render_status_bar(f, chunks[4]);

        match self.state {
            AppState::Dashboard => {}
            AppState::TaskDetail => self.render_task_detail(f),
            AppState::ResourceGuide => self.render_resource_guide(f),
            AppState::AddTask => self.render_add_task(f),
            AppState::Help => self.render_help(f),
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header_text = vec![Line::from(vec![
            Span::styled(
                "MARKETING PLAYBOOK",
                Style::default().add_modifier(Modifier::BOLD).fg(ACCENT_BLUE),
            ),
            Span::raw(format!("  {}", self.playbook.month)),
            Span::raw(format!(
                "    Streak: {} months    Generations: {}/{}",
                self.playbook.streak,
                self.playbook.generations_used,
                self.playbook.generation_limit
            )),
        ])];

        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_gauges(&self, f: &mut Frame, area: Rect) {
        let counts = aggregate_counts(&self.playbook.tasks);
        let percentages = Percentages::from_counts(&counts);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        let gauge = |title: String, pct: f64, count: usize, color: Color| {
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(title))
                .gauge_style(Style::default().fg(color))
                .ratio((pct / 100.0).clamp(0.0, 1.0))
                .label(format!("{} ({:.0}%)", count, pct))
        };

        f.render_widget(
            gauge(
                "Completed".to_string(),
                percentages.completed,
                counts.completed,
                COMPLETED_GREEN,
            ),
            chunks[0],
        );
        f.render_widget(
            gauge(
                "Skipped".to_string(),
                percentages.skipped,
                counts.skipped,
                SKIPPED_AMBER,
            ),
            chunks[1],
        );
        f.render_widget(
            gauge(
                "Pending".to_string(),
                percentages.pending,
                counts.pending,
                PENDING_BLUE,
            ),
            chunks[2],
        );
    }

    /// Draw the completion donut from the catalog-wide counts.
    fn render_donut(&self, f: &mut Frame, area: Rect) {
        let counts = aggregate_counts(&self.playbook.tasks);
        let percentages = Percentages::from_counts(&counts);
        let segments = donut_segments(&percentages);
        let label = format!("{:.0}%", percentages.completed);

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .x_bounds([-1.3, 1.3])
            .y_bounds([-1.3, 1.3])
            .paint(move |ctx| {
                for segment in &segments {
                    let color = match segment.kind {
                        SegmentKind::Completed => COMPLETED_GREEN,
                        SegmentKind::Skipped => SKIPPED_AMBER,
                        SegmentKind::Pending => PENDING_BLUE,
                    };
                    let mut coords = Vec::new();
                    let mut angle = segment.start_angle;
                    while angle < segment.end_angle {
                        coords.push((angle.cos(), angle.sin()));
                        angle += 0.01;
                    }
                    ctx.draw(&Points { coords: &coords, color });
                }
                ctx.print(-0.2, 0.0, label.clone());
            });
        f.render_widget(canvas, area);
    }

    fn render_filters(&self, f: &mut Frame, area: Rect) {
        let search_style = if self.input_mode == InputMode::Text {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let search_text = if self.search.is_empty() && self.input_mode == InputMode::None {
            "Search: -".to_string()
        } else {
            format!("Search: {}", self.search.value)
        };
        let line = Line::from(vec![
            Span::styled(search_text, search_style),
            Span::raw(format!(
                "  |  Frequency: {}  |  Status: {}  |  Sort: {}",
                format_frequency_filter(self.frequency_filter),
                format_status_filter(self.status_filter),
                format_sort_key(self.sort_key)
            )),
        ]);
        let filters = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Filters"));
        f.render_widget(filters, area);

        if self.input_mode == InputMode::Text {
            f.set_cursor_position((
                area.x + 9 + self.search.cursor as u16,
                area.y + 1,
            ));
        }
    }

    fn render_task_table(&mut self, f: &mut Frame, area: Rect) {
        let mut table_rows: Vec<Row> = Vec::new();
        for row in &self.rows {
            match row {
                RowKind::Category(name, count) => {
                    table_rows.push(
                        Row::new(vec![
                            String::new(),
                            format!("{} - {} tasks", name, count),
                            String::new(),
                            String::new(),
                            String::new(),
                        ])
                        .style(
                            Style::default()
                                .fg(ACCENT_BLUE)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
                RowKind::Task(id) => {
                    if let Some(task) = self.playbook.get(*id) {
                        let marker = if task.completed {
                            Span::styled("[done]", Style::default().fg(COMPLETED_GREEN))
                        } else if task.skipped {
                            Span::styled("[skip]", Style::default().fg(SKIPPED_AMBER))
                        } else {
                            Span::styled("[    ]", Style::default().fg(PENDING_BLUE))
                        };
                        table_rows.push(Row::new(vec![
                            Line::from(marker),
                            Line::from(format!("  {}", truncate(&task.title, 44))),
                            Line::from(format!(
                                "{} ({})",
                                format_frequency(task.frequency),
                                task.frequency_detail
                            )),
                            Line::from(format_time(task.time)),
                            Line::from(task.cost.clone()),
                        ]));
                    }
                }
            }
        }

        let empty = table_rows.is_empty();
        let table = Table::new(
            table_rows,
            [
                Constraint::Length(6),
                Constraint::Min(30),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(6),
            ],
        )
        .block(Block::default().borders(Borders::ALL).title("Marketing Tasks"))
        .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black));

        f.render_stateful_widget(table, area, &mut self.table_state);

        if empty {
            let msg = Paragraph::new("No tasks match the current filters.")
                .alignment(Alignment::Center);
            f.render_widget(msg, centered_rect(60, 20, area));
        }
    }

    fn render_generation(&self, f: &mut Frame, area: Rect) {
        let progress = self.generation.map(|g| g.progress()).unwrap_or(0.0);
        let area = centered_rect(70, 30, area);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Creating Your Next Month's Playbook"),
            )
            .gauge_style(Style::default().fg(ACCENT_BLUE))
            .ratio(progress)
            .label(format!("{:.0}%", progress * 100.0));
        f.render_widget(gauge, area);
    }

    fn render_task_detail(&self, f: &mut Frame) {
        let Some(task) = self.selected_task_id().and_then(|id| self.playbook.get(id)) else {
            return;
        };
        let area = centered_rect(70, 60, f.area());
        f.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(Span::styled(
                task.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Category:       {}", task.category)),
            Line::from(format!("Status:         {}", format_status(task))),
            Line::from(format!(
                "Frequency:      {} ({})",
                format_frequency(task.frequency),
                task.frequency_detail
            )),
            Line::from(format!("Time:           {}", format_time(task.time))),
            Line::from(format!("Cost:           {}", task.cost)),
            Line::from(format!(
                "Recommendation: {}",
                format_recommendation(task.recommendation)
            )),
            Line::from(""),
            Line::from(task.description.clone()),
        ];
        if !task.resources.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Resources: {}", task.resources.join(", "))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("Press Esc to close, r for the resource guide"));

        let detail = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Task Detail"))
            .wrap(Wrap { trim: true });
        f.render_widget(detail, area);
    }

    fn render_resource_guide(&self, f: &mut Frame) {
        let Some(task) = self.selected_task_id().and_then(|id| self.playbook.get(id)) else {
            return;
        };
        let area = centered_rect(80, 70, f.area());
        f.render_widget(Clear, area);

        let mut lines = Vec::new();
        for section in resource_guide(task) {
            let style = if section.highlighted {
                Style::default().fg(COMPLETED_GREEN).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let title = if section.highlighted {
                format!("► {} (recommended)", section.title)
            } else {
                format!("  {}", section.title)
            };
            lines.push(Line::from(Span::styled(title, style)));
            for link in section.links {
                lines.push(Line::from(format!("    {} - {}", link.name, link.url)));
            }
            for row in section.pricing {
                lines.push(Line::from(format!("    {:<24} {}", row.item, row.price)));
            }
            for tip in section.tips {
                lines.push(Line::from(format!("    - {}", tip)));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from("Press Esc to close"));

        let guide = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Resource Guide: {}", truncate(&task.title, 40))),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(guide, area);
    }

    fn render_add_task(&self, f: &mut Frame) {
        let area = centered_rect(60, 50, f.area());
        f.render_widget(Clear, area);

        let marker = |field: usize| if self.add_form.field == field { "► " } else { "  " };
        let (hours, minutes) = TIME_PRESETS[self.add_form.time_idx];
        let lines = vec![
            Line::from("Looking for a task we didn't recommend? Create it here."),
            Line::from(""),
            Line::from(format!("{}Title:     {}", marker(0), self.add_form.title.value)),
            Line::from(format!(
                "{}Frequency: {}",
                marker(1),
                format_frequency(FREQUENCIES[self.add_form.frequency_idx])
            )),
            Line::from(format!("{}Time:      {:02}:{:02}", marker(2), hours, minutes)),
            Line::from(format!(
                "{}Cost:      {}",
                marker(3),
                COST_PRESETS[self.add_form.cost_idx]
            )),
            Line::from(""),
            Line::from("Up/Down select field, Left/Right change value"),
            Line::from("Enter to add, Esc to cancel"),
        ];

        let form = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Add Your Own Task"))
            .wrap(Wrap { trim: true });
        f.render_widget(form, area);

        if self.add_form.field == 0 {
            f.set_cursor_position((
                area.x + 14 + self.add_form.title.cursor as u16,
                area.y + 3,
            ));
        }
    }

    fn render_help(&self, f: &mut Frame) {
        let area = centered_rect(60, 60, f.area());
        f.render_widget(Clear, area);

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Dashboard Keys",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("  /        search tasks by title"),
            Line::from("  f        cycle frequency filter"),
            Line::from("  s        cycle status filter"),
            Line::from("  o        cycle sort order"),
            Line::from("  c        clear search, filters and sort"),
            Line::from("  Space    toggle completed"),
            Line::from("  x        toggle skipped"),
            Line::from("  Enter    task detail"),
            Line::from("  r        resource guide"),
            Line::from("  a        add your own task"),
            Line::from("  g        generate next month's playbook"),
            Line::from("  q        quit"),
            Line::from(""),
            Line::from("Press any key to return"),
        ];

        let help = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .alignment(Alignment::Left);
        f.render_widget(help, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.generation.is_some() {
            "Generating next month's playbook...".to_string()
        } else if self.input_mode == InputMode::Text {
            "Type to search, Enter or Esc to finish".to_string()
        } else {
            "Space done | x skip | / search | f/s/o filters | a add | g generate | ? help | q quit"
                .to_string()
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(PENDING_BLUE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        // Path that never exists, so the app starts from the seeded playbook.
        App::new(Path::new("/nonexistent/mpb-dashboard-test.json"))
    }

    #[test]
    fn test_detail_overlay_opens_resource_guide() {
        let mut app = app();
        app.state = AppState::TaskDetail;
        app.handle_overlay_input(KeyCode::Char('r'));
        assert_eq!(app.state, AppState::ResourceGuide);
        app.handle_overlay_input(KeyCode::Esc);
        assert_eq!(app.state, AppState::Dashboard);
    }

    #[test]
    fn test_guide_overlay_ignores_r() {
        let mut app = app();
        app.state = AppState::ResourceGuide;
        app.handle_overlay_input(KeyCode::Char('r'));
        assert_eq!(app.state, AppState::ResourceGuide);
        app.handle_overlay_input(KeyCode::Char('q'));
        assert_eq!(app.state, AppState::Dashboard);
    }
}
