use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use rust_i18n::t;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use factordrill::app::{App, AppScreen};
use factordrill::config::{Config, SUPPORTED_LANGUAGES};
use factordrill::event::{AppEvent, EventHandler};
use factordrill::generator::DifficultyLevel;
use factordrill::ui::components::celebration::CelebrationBanner;
use factordrill::ui::components::drill_panel::DrillPanel;
use factordrill::ui::components::stats_sidebar::StatsSidebar;
use factordrill::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use factordrill::ui::theme::Theme;

// `t!` resolves translations through the calling crate.
rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "factordrill", version, about = "Drill trainer for factoring quadratics")]
struct Cli {
    #[arg(short, long, help = "Difficulty (easy, normal, hard, custom)")]
    difficulty: Option<DifficultyLevel>,

    #[arg(long, help = "Seed for a repeatable problem sequence")]
    seed: Option<u64>,

    #[arg(long, help = "UI language (en, ja)")]
    lang: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More log output (-v, -vv, -vvv)")]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    // The terminal belongs to the UI, so logs go to a file.
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("factordrill");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::never(&log_dir, "factordrill.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose)?;

    let config_path = Config::config_path();
    let mut config = Config::load_from(&config_path)?;
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(lang) = cli.lang {
        if SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
            config.language = lang;
        } else {
            warn!(%lang, "unsupported language, keeping {}", config.language);
        }
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    rust_i18n::set_locale(&config.language);

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!(theme = %config.theme, "theme not found, using default");
        Theme::default()
    });

    info!(difficulty = %config.difficulty, seed = ?cli.seed, "starting factordrill");
    let mut app = App::new(config, theme, cli.seed, Some(config_path))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        score = app.session.score(),
        attempts = app.session.history().attempts(),
        "session finished"
    );

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Drill => handle_drill_key(app, key, ctrl),
        AppScreen::ConfirmReset => handle_confirm_key(app, key),
    }
}

fn handle_drill_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    use factordrill::ui::line_input::InputResult;

    match key.code {
        KeyCode::Char('n') if ctrl => app.new_problem(),
        KeyCode::Char('r') if ctrl => app.request_reset(),
        KeyCode::Char('d') if ctrl => app.cycle_difficulty(),
        _ => match app.input.handle(key) {
            InputResult::Submit => app.submit(),
            InputResult::Cancel => app.should_quit = true,
            InputResult::Continue => {}
        },
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_reset(false),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let footer_hints = [
        t!("footer.submit").to_string(),
        t!("footer.new_problem").to_string(),
        t!("footer.difficulty").to_string(),
        t!("footer.reset").to_string(),
        t!("footer.recall").to_string(),
        t!("footer.quit").to_string(),
    ];
    let hint_refs: Vec<&str> = footer_hints.iter().map(String::as_str).collect();
    let footer_lines = pack_hint_lines(&hint_refs, area.width as usize);
    let app_layout = AppLayout::new(area, footer_lines.len() as u16);

    let session = &app.session;
    let header_info = format!(
        " | {} | {} | {}",
        t!("header.score", score = session.score()),
        t!("header.combo", combo = session.combo()),
        t!("header.difficulty", level = app.config.difficulty),
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let panel = DrillPanel::new(
        app.question_text(),
        &app.input,
        app.feedback.as_ref(),
        &app.theme,
    );
    frame.render_widget(panel, app_layout.main);

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = StatsSidebar::new(session, app.config.history_len, &app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }
    if let Some(strip_area) = app_layout.strip {
        let strip = StatsSidebar::new(session, app.config.history_len, &app.theme).compact();
        frame.render_widget(strip, strip_area);
    }

    let footer = Paragraph::new(
        footer_lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, app_layout.footer);

    if let Some(celebration) = &app.celebration {
        let banner = CelebrationBanner::new(celebration, Instant::now(), &app.theme);
        frame.render_widget(banner, app_layout.main);
    }

    if app.screen == AppScreen::ConfirmReset {
        let popup = centered_rect(50, 5, area);
        frame.render_widget(Clear, popup);
        let confirm = Paragraph::new(t!("confirm.reset").to_string())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(colors.warning()).bg(colors.bg()))
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.accent()))
                    .style(Style::default().bg(colors.bg())),
            );
        frame.render_widget(confirm, popup);
    }
}
