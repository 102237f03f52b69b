use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use todo_sync::application::view_model::{TodoViewModel, ViewState};
use todo_sync::config::Config;
use todo_sync::infrastructure::memory_store::{MemoryStore, SEED_TITLES};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    let store = MemoryStore::seeded(SEED_TITLES)
        .with_latency(config.latency)
        .with_faults(config.faults);
    let vm = TodoViewModel::new(store);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, vm).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Browse,
    Input,
}

struct App {
    vm: TodoViewModel<MemoryStore>,
    selected: usize,
    list_state: ListState,
    focus: Focus,
}

impl App {
    fn clamp_selection(&mut self) {
        let len = self.vm.todos().len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.list_state.select(Some(self.selected));
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    vm: TodoViewModel<MemoryStore>,
) -> Result<()> {
    let mut app = App { vm, selected: 0, list_state: ListState::default(), focus: Focus::Browse };
    app.vm.refresh().await;
    app.clamp_selection();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new(
                "Todos (n: new, e: edit, d: remove, r: refresh, q: quit)  |  Input: type title, Enter to save, Esc to cancel",
            )
            .block(Block::default().borders(Borders::ALL).title("todo-sync"));
            f.render_widget(header, chunks[0]);

            match app.vm.state() {
                ViewState::Loading => {
                    let loading = Paragraph::new("Loading...")
                        .block(Block::default().borders(Borders::ALL).title("todos"));
                    f.render_widget(loading, chunks[1]);
                }
                ViewState::Error(message) => {
                    let error = Paragraph::new(format!("Error: {message}\n\nPress r to retry."))
                        .style(Style::default().fg(Color::Red))
                        .block(Block::default().borders(Borders::ALL).title("error"));
                    f.render_widget(error, chunks[1]);
                }
                ViewState::Idle | ViewState::Editing(_) => {
                    let items: Vec<ListItem> = app
                        .vm
                        .todos()
                        .iter()
                        .map(|t| ListItem::new(format!("{} - {}", t.id, t.title)))
                        .collect();
                    if app.vm.todos().is_empty() {
                        app.list_state.select(None);
                    } else {
                        app.list_state.select(Some(app.selected));
                    }
                    let list = List::new(items)
                        .block(Block::default().borders(Borders::ALL).title("todos"))
                        .highlight_style(
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                        )
                        .highlight_symbol(">> ");
                    f.render_stateful_widget(list, chunks[1], &mut app.list_state);
                }
            }

            let caption = if app.vm.is_editing() { "Update" } else { "Create" };
            let disabled = if app.vm.can_submit() { "" } else { "  [disabled: empty title]" };
            let footer_text = match app.focus {
                Focus::Browse => format!("[{caption}] {}", app.vm.input()),
                Focus::Input => format!("[{caption}] {}_{disabled}", app.vm.input()),
            };
            let footer = Paragraph::new(footer_text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(if app.vm.is_editing() { "edit" } else { "input" }),
            );
            f.render_widget(footer, chunks[2]);
        })?;

        if let Event::Key(key) = event::read()? {
            // Only act on key presses; ignore repeats and releases to prevent duplicate input
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.focus {
                Focus::Browse => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Up => {
                        if app.selected > 0 {
                            app.selected -= 1;
                        }
                    }
                    KeyCode::Down => {
                        if app.selected + 1 < app.vm.todos().len() {
                            app.selected += 1;
                        }
                    }
                    KeyCode::Char('n') => {
                        if app.vm.state() == ViewState::Idle {
                            app.focus = Focus::Input;
                        }
                    }
                    KeyCode::Char('e') => {
                        if let Some(todo) = app.vm.todos().get(app.selected) {
                            let id = todo.id;
                            app.vm.begin_edit(id);
                            if app.vm.is_editing() {
                                app.focus = Focus::Input;
                            }
                        }
                    }
                    KeyCode::Char('d') => {
                        if let Some(todo) = app.vm.todos().get(app.selected) {
                            let id = todo.id;
                            app.vm.remove(id).await;
                            if app.selected > 0 {
                                app.selected -= 1;
                            }
                            app.clamp_selection();
                        }
                    }
                    KeyCode::Char('r') => {
                        app.vm.refresh().await;
                        app.clamp_selection();
                    }
                    _ => {}
                },
                Focus::Input => match key.code {
                    KeyCode::Esc => {
                        app.vm.cancel_edit();
                        app.focus = Focus::Browse;
                    }
                    KeyCode::Enter => {
                        app.vm.submit().await;
                        app.clamp_selection();
                        app.focus = Focus::Browse;
                    }
                    KeyCode::Backspace => app.vm.pop_input(),
                    KeyCode::Char(c) => app.vm.push_input(c),
                    _ => {}
                },
            }
        }
    }
    Ok(())
}
