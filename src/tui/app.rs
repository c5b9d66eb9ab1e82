//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which wraps a `TaskBoard` in an
//! interactive window: a list selector, search box, checklist, new-task
//! input, progress gauge and a one-line notification bar. Every key press
//! maps onto a single board operation.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use crate::assets::FileAssets;
use crate::board::TaskBoard;
use crate::catalog::{discover_task_lists, TaskListAsset};
use crate::tui::{
    colors::{DONE, FOCUS, HIGHLIGHT, HIGHLIGHT_TEXT, PROGRESS},
    enums::Focus,
    input::InputField,
};

/// Main application state for the board window.
pub struct App {
    board: TaskBoard<FileAssets>,
    focus: Focus,
    list_state: ListState,
    new_task: InputField,
    search: InputField,
    /// Task list chosen in the picker, loaded on demand.
    selected: Option<String>,
    picker_items: Vec<TaskListAsset>,
    picker_state: ListState,
}

impl App {
    pub fn new(assets: FileAssets) -> Self {
        App {
            board: TaskBoard::new(assets),
            focus: Focus::Tasks,
            list_state: ListState::default(),
            new_task: InputField::new(),
            search: InputField::new(),
            selected: None,
            picker_items: Vec::new(),
            picker_state: ListState::default(),
        }
    }

    pub fn board(&self) -> &TaskBoard<FileAssets> {
        &self.board
    }

    /// Choose a task list and load it.
    pub fn select_and_load(&mut self, name: &str) {
        self.selected = Some(name.to_string());
        self.load_selected();
    }

    /// Load whatever is currently selected. The board reports failures itself.
    fn load_selected(&mut self) {
        if let Err(e) = self.board.load(self.selected.as_deref()) {
            log::debug!("load failed: {e}");
        }
        self.search.clear();
        self.reset_selection();
    }

    /// Keep the cursor on a valid row after the item list changed.
    fn reset_selection(&mut self) {
        let len = self.board.items().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    fn open_picker(&mut self) {
        self.picker_items = match discover_task_lists(self.board.assets().dir()) {
            Ok(items) => items,
            Err(e) => {
                self.board.notify(&format!("Failed to read task lists: {e}"));
                return;
            }
        };
        if self.picker_items.is_empty() {
            self.board
                .notify("No task lists found. Create one with `tl new <name>`.");
            return;
        }

        let current = self
            .selected
            .as_ref()
            .and_then(|name| self.picker_items.iter().position(|a| &a.name == name))
            .unwrap_or(0);
        self.picker_state.select(Some(current));
        self.focus = Focus::Picker;
    }

    fn toggle_selected(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.board.toggle_complete(i);
        }
    }

    fn save_progress(&mut self) {
        if let Err(e) = self.board.save_progress() {
            log::debug!("save failed: {e}");
        }
        self.search.clear();
        self.reset_selection();
    }

    fn submit_new_task(&mut self) {
        match self.board.add_task(&self.new_task.value) {
            Ok(true) => {
                self.new_task.clear();
                let last = self.board.items().len().saturating_sub(1);
                self.list_state.select(Some(last));
            }
            Ok(false) => {}
            Err(e) => log::debug!("add failed: {e}"),
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let len = self.board.items().len();
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0);
        let next = if forward { (i + 1).min(len - 1) } else { i.saturating_sub(1) };
        self.list_state.select(Some(next));
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.focus {
            Focus::Tasks => return self.handle_tasks_key(key),
            Focus::NewTask => self.handle_new_task_key(key),
            Focus::Search => self.handle_search_key(key, modifiers),
            Focus::Picker => self.handle_picker_key(key),
        }
        false
    }

    fn handle_tasks_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('s') => self.save_progress(),
            KeyCode::Char('l') => self.open_picker(),
            KeyCode::Char('r') => self.load_selected(),
            KeyCode::Char('a') | KeyCode::Char('i') => self.focus = Focus::NewTask,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Tab => self.focus = self.focus.next(),
            _ => {}
        }
        false
    }

    fn handle_new_task_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.focus = Focus::Tasks,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Enter => self.submit_new_task(),
            KeyCode::Char(c) => self.new_task.handle_char(c),
            KeyCode::Backspace => self.new_task.handle_backspace(),
            KeyCode::Delete => self.new_task.handle_delete(),
            KeyCode::Left => self.new_task.move_cursor_left(),
            KeyCode::Right => self.new_task.move_cursor_right(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::Tasks,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear();
                self.board.search("");
            }
            KeyCode::Char(c) => {
                self.search.handle_char(c);
                self.board.search(&self.search.value);
            }
            KeyCode::Backspace => {
                self.search.handle_backspace();
                self.board.search(&self.search.value);
            }
            KeyCode::Delete => {
                self.search.handle_delete();
                self.board.search(&self.search.value);
            }
            KeyCode::Left => self.search.move_cursor_left(),
            KeyCode::Right => self.search.move_cursor_right(),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyCode) {
        let len = self.picker_items.len();
        match key {
            KeyCode::Esc => self.focus = Focus::Tasks,
            KeyCode::Up => {
                if let Some(i) = self.picker_state.selected() {
                    self.picker_state.select(Some(i.saturating_sub(1)));
                }
            }
            KeyCode::Down => {
                if let Some(i) = self.picker_state.selected() {
                    self.picker_state.select(Some((i + 1).min(len.saturating_sub(1))));
                }
            }
            KeyCode::Enter => {
                let chosen = self
                    .picker_state
                    .selected()
                    .and_then(|i| self.picker_items.get(i))
                    .map(|a| a.name.clone());
                self.focus = Focus::Tasks;
                if let Some(name) = chosen {
                    self.select_and_load(&name);
                }
            }
            _ => {}
        }
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn pane_block(&self, title: String, pane: Focus) -> Block<'static> {
        let border = if self.focus == pane { FOCUS } else { Color::Gray };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let selected = match &self.selected {
            Some(name) => Span::styled(name.clone(), Style::default().fg(Color::Cyan)),
            None => Span::styled("None", Style::default().fg(Color::DarkGray)),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASK LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  List: "),
            selected,
            Span::raw("  (l: choose, r: load)"),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_tasks(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .board
            .items()
            .iter()
            .map(|item| {
                let check = if item.completed { "[x] " } else { "[ ] " };
                let mut style = Style::default();
                if item.completed {
                    style = style.fg(DONE).add_modifier(Modifier::CROSSED_OUT);
                }
                if item.highlighted {
                    style = style.bg(HIGHLIGHT).fg(HIGHLIGHT_TEXT);
                }
                ListItem::new(Line::from(vec![
                    Span::raw(check),
                    Span::styled(item.text.clone(), style),
                ]))
            })
            .collect();

        let done = self.board.items().iter().filter(|i| i.completed).count();
        let title = match self.board.current() {
            Some(list) => format!(
                "Tasks: {} ({}/{} done)",
                list.name,
                done,
                self.board.items().len()
            ),
            None => "Tasks".to_string(),
        };

        let list = List::new(items)
            .block(self.pane_block(title, Focus::Tasks))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_input(
        &self,
        f: &mut Frame,
        area: Rect,
        field: &InputField,
        title: &str,
        pane: Focus,
    ) {
        let input = Paragraph::new(field.value.as_str())
            .block(self.pane_block(title.to_string(), pane));
        f.render_widget(input, area);

        if self.focus == pane {
            let offset = u16::try_from(field.cursor).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(1).saturating_add(offset);
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_progress(&self, f: &mut Frame, area: Rect) {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress (s: save)"))
            .gauge_style(Style::default().fg(PROGRESS))
            .ratio(self.board.compute_progress())
            .label(self.board.progress_label());
        f.render_widget(gauge, area);
    }

    fn render_picker(&mut self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 50, area);
        let items: Vec<ListItem> = self
            .picker_items
            .iter()
            .map(|a| ListItem::new(a.display_name.clone()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(FOCUS))
                    .title("Choose a task list (Enter to load, Esc to cancel)"),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_widget(Clear, popup);
        f.render_stateful_widget(list, popup, &mut self.picker_state);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(self.board.notification())
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole window.
    fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(3), // search
                Constraint::Min(3),    // tasks
                Constraint::Length(3), // new task
                Constraint::Length(3), // progress
                Constraint::Length(1), // notification
            ])
            .split(area);

        self.render_header(f, chunks[0]);
        self.render_input(f, chunks[1], &self.search, "Search (/)", Focus::Search);
        self.render_tasks(f, chunks[2]);
        self.render_input(
            f,
            chunks[3],
            &self.new_task,
            "New task (a, Enter to add)",
            Focus::NewTask,
        );
        self.render_progress(f, chunks[4]);
        self.render_status_bar(f, chunks[5]);

        if self.focus == Focus::Picker {
            self.render_picker(f, area);
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Rectangle centered in `r`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_task_list;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn app_with(tasks: &[&str]) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        create_task_list("chores", dir.path()).unwrap();
        let mut app = App::new(FileAssets::new(dir.path()));
        app.select_and_load("chores");
        for task in tasks {
            app.board.add_task(task).unwrap();
        }
        app.reset_selection();
        (dir, app)
    }

    fn press(app: &mut App, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_starts_unloaded() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileAssets::new(dir.path()));
        let text = screen(&mut app);
        assert!(text.contains("Please load a task list to continue."));
        assert!(text.contains("100%"));
        assert!(text.contains("List: None"));
    }

    #[test]
    fn test_load_without_selection_reports() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileAssets::new(dir.path()));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.board().notification(), "Failed to load task list.");
    }

    #[test]
    fn test_add_toggle_and_save_via_keys() {
        let (_dir, mut app) = app_with(&[]);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "buy milk");
        press(&mut app, KeyCode::Enter);
        assert!(app.new_task.value.is_empty());
        type_text(&mut app, "walk dog");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.board().items().len(), 2);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.board().progress_label(), "50%");
        let text = screen(&mut app);
        assert!(text.contains("[x] buy milk"));
        assert!(text.contains("50%"));

        press(&mut app, KeyCode::Char('s'));
        let remaining: Vec<&str> = app.board().items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(remaining, ["walk dog"]);
        assert_eq!(app.board().notification(), "Progress saved successfully.");
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_blank_task_keeps_input() {
        let (_dir, mut app) = app_with(&["walk dog"]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "  ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.new_task.value, "  ");
        assert_eq!(app.board().items().len(), 1);
    }

    #[test]
    fn test_search_updates_on_every_edit() {
        let (_dir, mut app) = app_with(&["buy milk", "walk dog"]);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "DO");
        let lit: Vec<bool> = app.board().items().iter().map(|i| i.highlighted).collect();
        assert_eq!(lit, [false, true]);

        // Esc keeps the query
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.board().query(), "DO");

        press(&mut app, KeyCode::Char('/'));
        app.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(app.board().items().iter().all(|i| !i.highlighted));
        assert!(app.search.value.is_empty());
    }

    #[test]
    fn test_picker_loads_chosen_list() {
        let (dir, mut app) = app_with(&["walk dog"]);
        create_task_list("errands", dir.path()).unwrap();

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.focus, Focus::Picker);
        assert!(screen(&mut app).contains("Choose a task list"));

        // chores is preselected; errands sorts after it
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Tasks);
        assert_eq!(app.selected.as_deref(), Some("errands"));
        assert_eq!(app.board().notification(), "errands successfully loaded (0 tasks).");
        assert!(app.board().items().is_empty());
    }

    #[test]
    fn test_long_input_keeps_cursor_inside_pane() {
        let (_dir, mut app) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        app.new_task = InputField::with_value(&"x".repeat(70_000));
        assert!(screen(&mut app).contains("New task"));
    }

    #[test]
    fn test_picker_with_no_lists() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileAssets::new(dir.path()));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.focus, Focus::Tasks);
        assert!(app.board().notification().starts_with("No task lists found"));
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, mut app) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        // q is text while typing
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
    }
}
