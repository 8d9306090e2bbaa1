mod app;
mod file_manager;
mod keys;
mod status_manager;
mod terminal;
mod ui;

use std::{env, io, path::PathBuf, time::Duration};

use anyhow::Result;
use crossterm::event::Event;
use log::LevelFilter;

use crate::app::App;
use crate::terminal::TerminalSession;

/// How long one read blocks before the loop comes back around. The lazy
/// status-message expiry depends on the loop ticking even without input.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // Logging goes to stderr; redirect it when tracing a session.
    let mut logger = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Warn);
        logger.filter_module("stilus", LevelFilter::Info);
    }
    logger.init();

    // Restore the terminal before the default hook prints its report, so a
    // panic never leaves the user in raw mode.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        terminal::restore(&mut io::stdout());
        original_hook(panic_info);
    }));

    let mut session = TerminalSession::new()?;
    let (cols, rows) = TerminalSession::size()?;
    let mut app = App::new(cols, rows);

    if let Some(arg) = env::args().nth(1) {
        app.open(PathBuf::from(arg))?;
    }
    app.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit");

    let result = run_app(&mut session, &mut app);

    // Leave raw mode before the error (if any) is reported to stderr.
    drop(session);
    if let Err(ref err) = result {
        log::error!("editor loop failed: {:#}", err);
    }
    result
}

fn run_app(session: &mut TerminalSession, app: &mut App) -> Result<()> {
    let mut frame = Vec::new();
    loop {
        app.scroll();
        frame.clear();
        ui::render(&mut frame, app)?;
        session.write_frame(&frame)?;

        app.update_status();

        if app.should_quit() {
            log::info!("shutdown requested");
            break;
        }

        if let Some(event) = session.poll_event(POLL_TIMEOUT)? {
            match event {
                Event::Key(key) => {
                    if let Some(key) = keys::decode(key) {
                        app.handle_key(key);
                    }
                }
                Event::Resize(cols, rows) => {
                    app.set_frame_size(cols as usize, rows as usize);
                }
                _ => {}
            }
        }
    }
    Ok(())
}
