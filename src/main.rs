use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;

use textquill::app::state::{AppState, View};
use textquill::config::Config;
use textquill::file::loader::{load_stdin, load_text};
use textquill::input::InputHandler;
use textquill::theme::get_builtin_theme;
use textquill::ui::UI;

/// textquill - terminal JSON formatter and URL inspector
#[derive(Parser)]
#[command(name = "textquill")]
#[command(version)]
#[command(about = "A terminal JSON formatter/validator and URL inspector", long_about = None)]
struct Cli {
    /// JSON file to view (omit to read from stdin if piped, or start empty)
    file: Option<String>,

    /// Theme name (overrides the configured theme)
    #[arg(short, long)]
    theme: Option<String>,

    /// Open the URL inspector with this URL
    #[arg(short, long)]
    url: Option<String>,
}

/// Set up a panic hook that restores the terminal before displaying panic
/// information.
///
/// Without this, panic messages would be hidden or garbled by the raw-mode
/// alternate screen.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();
    let config = Config::load();

    // Read document input BEFORE terminal setup (stdin may carry the
    // document, so it must be drained before the terminal takes over)
    let mut stdin_was_piped = false;
    let loaded: Option<(String, Option<String>)> = if let Some(path) = &cli.file {
        let text = load_text(path).with_context(|| format!("Failed to load {}", path))?;
        Some((text, Some(path.clone())))
    } else if !io::stdin().is_terminal() {
        stdin_was_piped = true;
        let text = load_stdin().context("Failed to read document from stdin")?;
        Some((text, None))
    } else {
        None
    };

    // Terminal setup
    let stdout = io::stdout()
        .into_raw_mode()
        .context("Failed to enable raw mode")?;
    let stdout = MouseTerminal::from(stdout);
    let stdout = stdout
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // CLI theme overrides config theme
    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = get_builtin_theme(theme_name).unwrap_or_else(|| {
        eprintln!("Warning: Theme '{}' not found, using default-dark", theme_name);
        get_builtin_theme("default-dark").expect("default theme exists")
    });

    let mut ui = UI::new(theme);
    let mut input_handler = if stdin_was_piped {
        InputHandler::new_with_tty()
            .context("Failed to open /dev/tty for keyboard input when stdin was piped")?
    } else {
        InputHandler::new()
    };

    let mut state = AppState::new(config.indent_spec());
    state.set_show_line_numbers(config.show_line_numbers);
    state.set_enable_mouse(config.enable_mouse);

    if let Some((text, filename)) = loaded {
        state.open_document(&text, filename);
    }
    if let Some(url) = cli.url {
        state.set_view(View::Url);
        state.enter_input(textquill::app::state::InputTarget::UrlLine);
        for c in url.chars() {
            state.insert_char(c);
        }
        state.submit_input();
    }

    let result = run_event_loop(&mut terminal, &mut ui, &mut input_handler, &mut state);

    // Show the cursor again before exiting; termion restores the rest
    // through its Drop guards
    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    result
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui: &mut UI,
    input_handler: &mut InputHandler,
    state: &mut AppState,
) -> Result<()> {
    loop {
        if let Some(theme_name) = state.take_pending_theme() {
            ui.set_theme(&theme_name);
        }

        // Expire transient messages
        state.tick(Instant::now());

        ui.render(terminal, state)?;

        if let Some(event) = input_handler.poll_event(Duration::from_millis(100))? {
            let should_quit = input_handler.handle_event(event, state)?;
            if should_quit {
                break;
            }
        }
    }

    Ok(())
}
