//! Main application logic for the terminal user interface.
//!
//! `App` owns the task list, the store, and the input mode. Every key event is
//! handled to completion, including the synchronous save that follows any
//! change to the list, before the next event is read.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Padding, Paragraph},
    Frame, Terminal,
};

use crate::db::Store;
use crate::error::{Result, StoreError};
use crate::list::TaskList;
use crate::task::Task;
use crate::tui::{
    colors::{ACCENT_PEACH, MUTED_GRAY, TITLE_BLUE},
    enums::{Flow, Mode},
    input::InputField,
    utils::truncate,
};

/// Number of rows the list shows at once, also the page size for paging keys.
pub const LIST_HEIGHT: usize = 14;
/// Viewport width until the terminal reports its size.
pub const DEFAULT_WIDTH: u16 = 80;

const TITLE: &str = "ToGo - Tasks";
const PLACEHOLDER: &str = "buy some milk";
const INPUT_PROMPT: &str = "> ";
const SELECTED_SYMBOL: &str = "> ";
/// Left padding of the title and the list rows.
const ROW_INDENT: u16 = 2;

/// Task list application state.
pub struct App<S: Store> {
    mode: Mode,
    list: TaskList,
    store: S,
    list_state: ListState,
    input: InputField,
    width: u16,
}

impl<S: Store> App<S> {
    /// Load the task list from `store` and start in browsing mode.
    pub fn new(store: S) -> Result<Self, StoreError> {
        let list = store.load()?;
        Ok(Self::with_list(store, list))
    }

    /// Start from an already loaded list.
    pub fn with_list(store: S, list: TaskList) -> Self {
        let mut app = App {
            mode: Mode::Browsing,
            list,
            store,
            list_state: ListState::default(),
            input: InputField::new(),
            width: DEFAULT_WIDTH,
        };
        app.clamp_selection();
        app
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tasks(&self) -> &TaskList {
        &self.list
    }

    /// Index of the selected task; `None` exactly when the list is empty.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// What the renderer draws: each task in order and whether it is selected.
    pub fn rows(&self) -> impl Iterator<Item = (&Task, bool)> + '_ {
        let selected = self.selected();
        self.list
            .iter()
            .enumerate()
            .map(move |(i, task)| (task, Some(i) == selected))
    }

    /// Dispatch a terminal event.
    pub fn handle_event(&mut self, event: Event) -> Result<Flow, StoreError> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, _) => {
                self.handle_resize(width);
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    /// Only the width is tracked; the list height is fixed.
    pub fn handle_resize(&mut self, width: u16) {
        self.width = width;
    }

    /// Handle one key press. A returned error means a save failed and the
    /// application must stop.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Flow, StoreError> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Flow::Quit);
        }
        if self.mode.is_typing() {
            self.handle_typing_key(key)?;
            Ok(Flow::Continue)
        } else {
            self.handle_browsing_key(key)
        }
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) -> Result<Flow, StoreError> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('i') => self.start_composing(),
            KeyCode::Char('d') => self.delete_selected()?,
            KeyCode::Char('c') => self.start_editing(),

            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
                self.move_selection(-(LIST_HEIGHT as isize))
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
                self.move_selection(LIST_HEIGHT as isize)
            }
            KeyCode::Home | KeyCode::Char('g') => self.select_index(0),
            KeyCode::End | KeyCode::Char('G') => {
                self.select_index(self.list.len().saturating_sub(1))
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn handle_typing_key(&mut self, key: KeyEvent) -> Result<(), StoreError> {
        if key.code == KeyCode::Enter {
            self.submit()
        } else {
            self.input.handle_key(key);
            Ok(())
        }
    }

    fn start_composing(&mut self) {
        self.input.clear();
        self.mode = Mode::Composing;
    }

    fn start_editing(&mut self) {
        let Some(task) = self.selected().and_then(|i| self.list.get(i)) else {
            return;
        };
        self.input.set_value(&task.description);
        self.mode = Mode::Editing;
    }

    /// Finish composing or editing with the current buffer.
    fn submit(&mut self) -> Result<(), StoreError> {
        let text = self.input.take();
        let mode = std::mem::replace(&mut self.mode, Mode::Browsing);
        match mode {
            Mode::Composing => {
                debug!("Adding task {text:?}");
                self.list.insert(0, Task::new(text));
                self.clamp_selection();
                self.persist()
            }
            Mode::Editing => match self.selected() {
                Some(index) => {
                    debug!("Renaming task {index} to {text:?}");
                    self.list.replace(index, text);
                    self.persist()
                }
                None => Ok(()),
            },
            Mode::Browsing => Ok(()),
        }
    }

    /// Toggle the selected task; the cursor stays on the same row so the next
    /// task slides under it.
    fn toggle_selected(&mut self) -> Result<(), StoreError> {
        let Some(index) = self.selected() else {
            return Ok(());
        };
        let moved_to = self.list.toggle_done(index);
        debug!("Toggled task {index}, now at {moved_to}");
        self.persist()
    }

    fn delete_selected(&mut self) -> Result<(), StoreError> {
        let Some(index) = self.selected() else {
            return Ok(());
        };
        let removed = self.list.remove(index);
        debug!("Deleted task {index} {:?}", removed.description);
        self.clamp_selection();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.list)
    }

    /// Keep the selection on a valid row: `None` for an empty list, otherwise
    /// the current index limited to the last row.
    fn clamp_selection(&mut self) {
        let selected = match (self.list.len(), self.list_state.selected()) {
            (0, _) => None,
            (len, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.list_state.select(selected);
    }

    fn select_index(&mut self, index: usize) {
        if !self.list.is_empty() {
            self.list_state.select(Some(index.min(self.list.len() - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if let Some(current) = self.selected() {
            self.select_index(current.saturating_add_signed(delta));
        }
    }

    /// Render the list screen or the text entry screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // spacer
                Constraint::Min(0),
                Constraint::Length(1), // key hints
            ])
            .split(f.area());

        if self.mode.is_typing() {
            self.render_input(f, chunks[1]);
        } else {
            self.render_list(f, chunks[1]);
        }
        self.render_help_bar(f, chunks[2]);
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title and a blank line
                Constraint::Max(LIST_HEIGHT as u16),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().fg(TITLE_BLUE).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().padding(Padding::left(ROW_INDENT)));
        f.render_widget(title, chunks[0]);

        if self.list.is_empty() {
            let empty = Paragraph::new(Span::styled("No items.", Style::default().fg(MUTED_GRAY)))
                .block(Block::default().padding(Padding::left(ROW_INDENT + 2)));
            f.render_widget(empty, chunks[1]);
            return;
        }

        let text_width = usize::from(self.width)
            .saturating_sub(usize::from(ROW_INDENT) + SELECTED_SYMBOL.len() + 4);
        let items: Vec<ListItem> = self
            .rows()
            .map(|(task, _)| {
                let label = format!("{} {}", task.marker(), truncate(&task.description, text_width));
                let style = if task.done {
                    Style::default().fg(MUTED_GRAY)
                } else {
                    Style::default()
                };
                ListItem::new(label).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().padding(Padding::left(ROW_INDENT)))
            .highlight_style(Style::default().fg(ACCENT_PEACH))
            .highlight_symbol(SELECTED_SYMBOL);

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let prompt = Line::from(Span::styled(
            self.mode.prompt(),
            Style::default().fg(ACCENT_PEACH),
        ));
        let value = self.input.value();
        let entry = if value.is_empty() {
            Line::from(vec![
                Span::raw(INPUT_PROMPT),
                Span::styled(PLACEHOLDER, Style::default().fg(MUTED_GRAY)),
            ])
        } else {
            Line::from(vec![Span::raw(INPUT_PROMPT), Span::raw(value)])
        };
        f.render_widget(Paragraph::new(vec![prompt, entry]), area);

        if area.height > 1 {
            let before: String = value.chars().take(self.input.cursor()).collect();
            let offset = Line::from(vec![Span::raw(INPUT_PROMPT), Span::raw(before)]).width();
            let x = area.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
            f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y + 1));
        }
    }

    fn render_help_bar(&self, f: &mut Frame, area: Rect) {
        let hints = if self.mode.is_typing() {
            "enter submit • ctrl+c quit"
        } else {
            "↑/k up • ↓/j down • enter toggle • i new • c edit • d delete • q quit"
        };
        let bar = Paragraph::new(Span::styled(hints, Style::default().fg(MUTED_GRAY)))
            .block(Block::default().padding(Padding::left(ROW_INDENT + 2)));
        f.render_widget(bar, area);
    }

    /// Main event loop: draw, then block for the next event.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_event(event::read()?)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }
}
