mod app;
mod output;

use anyhow::{Context, Result, bail};
use app::{App, InputMode};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::{
    io::{Stdout, stdout},
    path::{Path, PathBuf},
};
use taxonomy_tree_config::Config;
use taxonomy_tree_engine::{IndentWidth, ParseOptions, TreeItem, io, search};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Browse an indented taxonomy dump as a collapsible, searchable tree
#[derive(Debug, Parser)]
#[command(name = "taxonomy-tree", version, about)]
struct Args {
    /// Taxonomy dump to open (defaults to `source_path` from the config file)
    file: Option<PathBuf>,

    /// Characters per tree level in the dump
    #[arg(long, conflicts_with = "detect_indent")]
    indent_width: Option<usize>,

    /// Infer the indent width from the dump
    #[arg(long)]
    detect_indent: bool,

    /// Print the tree to stdout instead of opening the viewer
    #[arg(long)]
    print: bool,

    /// Initial search query
    #[arg(short, long)]
    query: Option<String>,

    /// Output format for --print
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the file and indent options back to the config file
    #[arg(long)]
    save_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(file) = &self.file {
            config.source_path = Some(file.clone());
        }
        if let Some(width) = self.indent_width {
            config.indent_width = width;
            config.detect_indent = false;
        }
        if self.detect_indent {
            config.detect_indent = true;
        }
        config
    }
}

fn parse_options(config: &Config) -> ParseOptions {
    let indent = if config.detect_indent {
        IndentWidth::Detect
    } else {
        IndentWidth::Fixed(config.indent_width)
    };

    ParseOptions {
        indent,
        default_x_coord: config.default_x_coord,
        header_prefixes: config.header_prefixes.clone(),
    }
}

/// Persist `config` with its source path made absolute
fn save_config(config: &Config, config_path: &Path) -> Result<()> {
    let source_path = config
        .source_path
        .as_deref()
        .map(std::path::absolute)
        .transpose()?;
    let saved = Config {
        source_path,
        ..config.clone()
    };
    saved.save_to_path(config_path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    let loaded = Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config file '{}'", config_path.display()))?
        .unwrap_or_default();
    let config = args.merge_into(loaded);
    log::debug!("using config {config:?}");

    if args.save_config {
        save_config(&config, &config_path)
            .with_context(|| format!("Failed to save config file '{}'", config_path.display()))?;
        log::info!("saved config to {}", config_path.display());
    }

    let Some(source_path) = config.source_path.clone() else {
        bail!(
            "No taxonomy file given and no source_path in {}",
            config_path.display()
        );
    };

    let options = parse_options(&config);
    let report = io::load_taxonomy_report(&source_path, &options)
        .with_context(|| format!("Failed to load taxonomy from '{}'", source_path.display()))?;
    log::info!(
        "loaded {} nodes from {} ({} skipped, {} orphaned lines)",
        report.root.node_count(),
        source_path.display(),
        report.skipped_lines.len(),
        report.orphaned_lines.len()
    );

    let query = args.query.as_deref().unwrap_or("");

    if args.print {
        let outcome = search(&report.root, query);
        let rendered = match args.format {
            OutputFormat::Text => output::render_text(&report.root, &outcome),
            OutputFormat::Json => output::render_json(&report.root, &outcome)?,
        };
        print!("{rendered}");
        if args.format == OutputFormat::Json {
            println!();
        }
        return Ok(());
    }

    let mut app = App::new(report);
    if !query.is_empty() {
        app.set_query(query);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

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

        match app.mode {
            InputMode::Browse => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
                KeyCode::Right => app.expand_selected(),
                KeyCode::Left => app.collapse_selected(),
                KeyCode::Char('/') => app.mode = InputMode::Search,
                _ => {}
            },
            InputMode::Search => match key.code {
                KeyCode::Esc | KeyCode::Enter => app.mode = InputMode::Browse,
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.clear_query()
                }
                KeyCode::Char(c) => app.push_query_char(c),
                KeyCode::Backspace => app.pop_query_char(),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.previous(),
                _ => {}
            },
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    // Search bar
    let status = match app.outcome.match_count() {
        0 if app.query.is_empty() => String::new(),
        0 => " (no matches)".to_string(),
        n => format!(" ({n} matches)"),
    };
    let search_style = match app.mode {
        InputMode::Search => Style::default().fg(Color::Yellow),
        InputMode::Browse => Style::default(),
    };
    let search_bar = Paragraph::new(Line::from(vec![
        Span::raw(app.query.clone()),
        Span::styled(status, Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(search_style),
    );
    f.render_widget(search_bar, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    // Tree panel
    let tree_rows: Vec<ListItem> = app.items().iter().map(tree_row).collect();
    let title = format!("Taxonomy ({} nodes)", app.root.node_count());
    let tree = List::new(tree_rows)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(tree, columns[0], &mut app.list_state);

    // Details panel
    let mut details = match app.selected_node() {
        Some(node) => {
            let label = node.label();
            let mut lines = vec![
                Line::from(Span::styled(
                    label.display_name,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("id: {}", label.id)),
            ];
            if let Some(rank) = label.rank {
                lines.push(Line::from(format!("rank: {rank}")));
            }
            if let Some(group) = label.group_name {
                lines.push(Line::from(format!("group: {group}")));
            }
            lines.push(Line::from(format!("children: {}", node.children().len())));
            lines.push(Line::from(format!("x: {}px", node.x_coord())));
            lines
        }
        None => vec![Line::from("Nothing selected")],
    };
    if app.skipped_lines + app.orphaned_lines > 0 {
        details.push(Line::default());
        details.push(Line::from(Span::styled(
            format!(
                "{} skipped, {} orphaned source lines",
                app.skipped_lines, app.orphaned_lines
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let details = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });
    f.render_widget(details, columns[1]);

    // Instructions
    let help_text = match app.mode {
        InputMode::Browse => Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("↑/k ↓/j: Move | "),
            Span::raw("Enter/Space: Toggle | →: Expand | ←: Collapse | "),
            Span::raw("/: Search"),
        ]),
        InputMode::Search => Line::from(vec![
            Span::raw("Type to search | "),
            Span::raw("Ctrl-u: Clear | "),
            Span::raw("Esc/Enter: Back to tree"),
        ]),
    };
    f.render_widget(Paragraph::new(help_text), rows[2]);
}

fn tree_row(item: &TreeItem<'_>) -> ListItem<'static> {
    let indent = "  ".repeat(item.depth);
    let marker = match (item.has_children, item.is_expanded) {
        (false, _) => "  ",
        (true, true) => "▾ ",
        (true, false) => "▸ ",
    };
    let label = item.node.label();

    let name_style = if item.is_match {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::raw(format!("{indent}{marker}")),
        Span::styled(format!("{} ({})", label.display_name, label.id), name_style),
    ];
    if let Some(rank) = label.rank {
        spans.push(Span::styled(
            format!(" [{rank}]"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(group) = label.group_name {
        spans.push(Span::styled(
            format!(" [Group name: {group}]"),
            Style::default().fg(Color::Yellow),
        ));
    }

    ListItem::new(Line::from(spans))
}
