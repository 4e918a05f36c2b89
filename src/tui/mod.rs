// terminal ui

mod app;
mod event;
mod theme;
mod ui;

pub use app::{App, LogLevel, Mode, Panel, Popup};
pub use event::{Action, handle_key};
pub use theme::ThemeKind;

use crossterm::{
    cursor::SetCursorStyle,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::{Console, ControlResponse, DecisionService, Error};
use event::{handle_event, poll_event};

// outcome of the in-flight request, sent back to the event loop
struct Settled {
    outcome: Result<ControlResponse, Error>,
    elapsed: Duration,
}

fn copy_to_clipboard(text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    // pbcopy (macOS), then xclip and xsel (Linux)
    let candidates: [(&str, &[&str]); 3] = [
        ("pbcopy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];

    for (program, args) in candidates {
        if let Ok(mut child) = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            && let Some(stdin) = child.stdin.as_mut()
            && stdin.write_all(text.as_bytes()).is_ok()
        {
            return child.wait().map(|s| s.success()).unwrap_or(false);
        }
    }

    false
}

fn terminal_err(e: io::Error) -> Error {
    Error::Terminal(e.to_string())
}

pub async fn run(
    console: Console,
    service: Arc<dyn DecisionService>,
    service_url: String,
    theme: Option<ThemeKind>,
) -> Result<(), Error> {
    // setup terminal
    enable_raw_mode().map_err(terminal_err)?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(terminal_err)?;

    let app = App::new(console, service_url, theme);
    let result = run_app(&mut terminal, app, service).await;

    // restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    service: Arc<dyn DecisionService>,
) -> Result<(), Error> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Settled>();
    let mut last_mode = None;

    tracing::info!("console started");

    loop {
        // update cursor style before render
        if last_mode != Some(app.mode) {
            let cursor_style = match app.mode {
                Mode::Insert => SetCursorStyle::BlinkingBar,
                Mode::Normal => SetCursorStyle::BlinkingBlock,
            };
            execute!(terminal.backend_mut(), cursor_style).ok();
            last_mode = Some(app.mode);
        }

        terminal
            .draw(|frame| ui::render(frame, &app))
            .map_err(terminal_err)?;

        // a finished request lands here; the loop never waits on the network
        while let Ok(settled) = rx.try_recv() {
            app.settle(settled.outcome, settled.elapsed);
        }

        if let Some(event) = poll_event(Duration::from_millis(100)).map_err(terminal_err)? {
            match handle_event(&mut app, event) {
                Action::Quit => break,
                Action::Submit(request) => {
                    let service = Arc::clone(&service);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let started = Instant::now();
                        let outcome = service.evaluate(&request).await;
                        // receiver is gone once the console quits
                        let _ = tx.send(Settled {
                            outcome,
                            elapsed: started.elapsed(),
                        });
                    });
                }
                Action::CopyTrace => match app.trace_text() {
                    Some(text) if copy_to_clipboard(&text) => {
                        app.log(LogLevel::Ok, "trace copied to clipboard".to_string())
                    }
                    Some(_) => app.log(LogLevel::Warn, "clipboard not available".to_string()),
                    None => app.log(LogLevel::Warn, "no trace to copy".to_string()),
                },
                Action::None => {}
            }
        }
    }

    tracing::info!("console closed");
    Ok(())
}
