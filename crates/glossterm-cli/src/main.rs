use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use glossterm_config::Config;
use glossterm_engine::{EditorSession, TermCatalog, TermSource, io};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use relative_path::RelativePathBuf;
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

enum Mode {
    Normal,
    /// Typing the text to select
    Search(String),
}

struct App {
    content_path: PathBuf,
    file: RelativePathBuf,
    catalog: TermCatalog,
    session: EditorSession,
    mode: Mode,
    status: Option<String>,
    dirty: bool,
}

impl App {
    fn new(config: Config, file: RelativePathBuf) -> Result<Self> {
        let stored = io::read_file(&file, &config.content_path)?;
        let catalog = io::load_catalog(&config.terms_path)?;
        log::info!(
            "loaded {} with {} glossary term(s) available",
            file,
            catalog.len()
        );

        Ok(Self {
            content_path: config.content_path,
            file,
            catalog,
            session: EditorSession::from_stored(&stored),
            mode: Mode::Normal,
            status: None,
            dirty: false,
        })
    }

    fn select_text(&mut self, needle: &str) {
        if !self.session.select_text(needle) {
            self.status = Some(format!("\"{needle}\" not found"));
        }
    }

    fn open_picker(&mut self) {
        let ticket = self.session.begin_term_fetch();
        let terms = self.catalog.list_terms();
        self.session.complete_term_fetch(ticket, terms);
        if let Some(alert) = self.session.take_alert() {
            self.status = Some(alert);
        }
    }

    fn confirm_picker(&mut self) {
        if self.session.confirm_picker() {
            self.dirty = true;
            self.status = Some("Glossary term inserted".to_string());
        }
    }

    fn save(&mut self) -> Result<()> {
        let stored = self.session.to_stored()?;
        io::write_file(&self.file, &self.content_path, &stored)?;
        self.dirty = false;
        self.status = Some(format!("Saved {}", self.file));
        Ok(())
    }
}

fn init_logging() {
    // The terminal belongs to the UI, so log lines go to a file
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(file) = File::create(env::temp_dir().join("glossterm.log")) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or(env!("CARGO_BIN_NAME"), String::as_str);
    let config_path = Config::config_path();

    let (file, selection) = match parse_args(&args) {
        Some(Command::Init {
            content_path,
            terms_path,
        }) => {
            init_config(&config_path, Config::new(content_path, terms_path))?;
            println!("Wrote {}", config_path.display());
            return Ok(());
        }
        Some(Command::Edit { file, selection }) => (file, selection),
        None => {
            eprintln!("Usage: {program} <content-file> [text-to-select]");
            eprintln!("       {program} init <content-path> <terms-path>");
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: No config file found at {}", config_path.display());
            eprintln!("Create one with: {program} init <content-path> <terms-path>");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_content_dir(&config.content_path) {
        eprintln!(
            "Error: Content path '{}' from config file '{}' is invalid: {e}",
            config.content_path.display(),
            config_path.display()
        );
        process::exit(1);
    }

    let mut app = App::new(config, RelativePathBuf::from(file))?;
    if let Some(selection) = selection {
        app.select_text(&selection);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Edit {
        file: String,
        selection: Option<String>,
    },
    Init {
        content_path: String,
        terms_path: String,
    },
}

/// Reads the command line. `args` includes the program name, when the OS
/// supplied one.
fn parse_args(args: &[String]) -> Option<Command> {
    match args.get(1..)? {
        [command, content_path, terms_path] if command == "init" => Some(Command::Init {
            content_path: content_path.clone(),
            terms_path: terms_path.clone(),
        }),
        [file] => Some(Command::Edit {
            file: file.clone(),
            selection: None,
        }),
        [file, selection] => Some(Command::Edit {
            file: file.clone(),
            selection: Some(selection.clone()),
        }),
        _ => None,
    }
}

/// Writes `config` to `config_path`, once its content directory checks out.
fn init_config(config_path: &Path, config: Config) -> Result<()> {
    io::validate_content_dir(&config.content_path)?;
    config.save_to_path(config_path)?;
    log::info!("wrote config to {}", config_path.display());
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.session.picker().is_some() {
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    if let Some(picker) = app.session.picker_mut() {
                        picker.next();
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if let Some(picker) = app.session.picker_mut() {
                        picker.previous();
                    }
                }
                KeyCode::Enter => app.confirm_picker(),
                KeyCode::Esc => app.session.cancel_picker(),
                _ => {}
            }
            continue;
        }

        if let Mode::Search(query) = &mut app.mode {
            match key.code {
                KeyCode::Enter => {
                    let query = std::mem::take(query);
                    app.mode = Mode::Normal;
                    app.select_text(&query);
                }
                KeyCode::Esc => app.mode = Mode::Normal,
                KeyCode::Backspace => {
                    query.pop();
                }
                KeyCode::Char(c) => query.push(c),
                _ => {}
            }
            continue;
        }

        app.status = None;
        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('/') => app.mode = Mode::Search(String::new()),
            KeyCode::Char('g') => app.open_picker(),
            KeyCode::Char('s') => {
                if let Err(e) = app.save() {
                    log::error!("save failed: {e}");
                    app.status = Some(format!("Save failed: {e}"));
                }
            }
            KeyCode::Esc => app.session.clear_selection(),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let title = if app.dirty {
        format!("{} [modified]", app.file)
    } else {
        app.file.to_string()
    };
    let content = Paragraph::new(content_lines(&app.session))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(content, chunks[0]);

    let status_line = match (&app.mode, &app.status) {
        (Mode::Search(query), _) => Line::from(format!("Select: {query}")),
        (Mode::Normal, Some(status)) => {
            Line::from(Span::styled(status.clone(), Style::default().fg(Color::Yellow)))
        }
        (Mode::Normal, None) => Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("/: Select text | "),
            Span::raw("g: Glossary term | "),
            Span::raw("s: Save | "),
            Span::raw("Esc: Clear selection"),
        ]),
    };
    f.render_widget(
        Paragraph::new(vec![status_line]).block(Block::default()),
        chunks[1],
    );

    if let Some(picker) = app.session.picker() {
        let area = centered(f.area(), 60, 50);
        let items: Vec<ListItem> = picker
            .options()
            .iter()
            .map(|option| ListItem::new(Line::from(option.text.clone())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Insert glossary term"),
            )
            .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
        let mut state = ListState::default();
        state.select(picker.selected_index());

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }
}

/// Editable content split into lines, with the selection highlighted.
fn content_lines(session: &EditorSession) -> Vec<Line<'_>> {
    let content = session.content();
    let highlight = Style::default().add_modifier(Modifier::REVERSED);
    let selection = session.selection().filter(|s| !s.is_empty());

    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in content.split('\n') {
        let start = offset;
        let end = start + raw.len();
        offset = end + 1;

        let line = match selection {
            Some(span) if span.start < end && span.end > start => {
                let from = span.start.max(start) - start;
                let to = span.end.min(end) - start;
                Line::from(vec![
                    Span::raw(&raw[..from]),
                    Span::styled(&raw[from..to], highlight),
                    Span::raw(&raw[to..]),
                ])
            }
            _ => Line::from(raw),
        };
        lines.push(line);
    }
    lines
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
