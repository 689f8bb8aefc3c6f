mod renderer;

use std::{
    io::{Stdout, Write},
    sync::mpsc::{Receiver, channel},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue, terminal,
};

use crate::{
    animator::{AnimationEvent, AnimationSink, AnimationSummary, Callbacks, Speed},
    app::renderer::Renderer,
    config::Config,
    error::AppError,
    maze::Grid,
    session::Session,
    solvers::Algorithm,
};

/// How long to wait for input when nothing is scheduled
const IDLE_POLL_TIMEOUT: Duration = Duration::from_millis(100);
/// Rooms added or removed per resize key press
const RESIZE_STEP: u16 = 5;

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserAction {
    Solve(Algorithm),
    Regenerate,
    Clear,
    Grow,
    Shrink,
    SetSpeed(Speed),
    Cancel,
    Exit,
}

impl UserAction {
    fn from_key(code: KeyCode) -> Option<Self> {
        let action = match code {
            KeyCode::Esc | KeyCode::Char('q') => UserAction::Exit,
            KeyCode::Char('b') => UserAction::Solve(Algorithm::Bfs),
            KeyCode::Char('d') => UserAction::Solve(Algorithm::Dfs),
            KeyCode::Char('g') => UserAction::Regenerate,
            KeyCode::Char('c') => UserAction::Clear,
            KeyCode::Char('+') | KeyCode::Char('=') => UserAction::Grow,
            KeyCode::Char('-') => UserAction::Shrink,
            KeyCode::Char('1') => UserAction::SetSpeed(Speed::Slow),
            KeyCode::Char('2') => UserAction::SetSpeed(Speed::Normal),
            KeyCode::Char('3') => UserAction::SetSpeed(Speed::Fast),
            KeyCode::Char('x') => UserAction::Cancel,
            _ => return None,
        };
        Some(action)
    }
}

fn status_line(session: &Session, summary: Option<&AnimationSummary>) -> String {
    let (rows, cols) = session.dimensions();
    let outcome = match summary {
        Some(AnimationSummary {
            algorithm,
            path_length: Some(len),
            visited_count,
        }) => format!(
            "{}: path of {} cells, {} visited",
            algorithm.short_name().to_uppercase(),
            len,
            visited_count
        ),
        Some(AnimationSummary {
            algorithm,
            path_length: None,
            visited_count,
        }) => format!(
            "{}: no path found, {} visited",
            algorithm.short_name().to_uppercase(),
            visited_count
        ),
        None if session.is_animating() => "solving...".to_string(),
        None => "ready".to_string(),
    };
    format!("{} | {}x{} | speed {}", outcome, rows, cols, session.speed())
}

/// Interactive terminal loop: draws snapshots as the animator produces them and maps keys to
/// session actions. Runs until Esc or q.
pub fn run(config: &Config, stdout: &mut Stdout) -> Result<(), AppError> {
    let (event_tx, event_rx) = channel::<AnimationEvent>();
    let mut session = Session::new(config, event_tx);
    let mut renderer = Renderer::new();
    let mut summary: Option<AnimationSummary> = None;

    renderer.draw(stdout, session.grid())?;
    session.solve(config.algorithm)?;

    let clock = Instant::now();
    let elapsed = || clock.elapsed().as_millis() as u64;

    tracing::info!("[app loop] started");
    loop {
        session.tick(elapsed());
        drain_events(&event_rx, &mut renderer, stdout, &mut summary)?;
        renderer.status(stdout, &status_line(&session, summary.as_ref()))?;

        let now = elapsed();
        let timeout = session
            .next_deadline()
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(now)))
            .unwrap_or(IDLE_POLL_TIMEOUT)
            .min(IDLE_POLL_TIMEOUT);
        if !event::poll(timeout)? {
            continue;
        }

        let action = match event::read()? {
            event::Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                UserAction::from_key(key.code)
            }
            event::Event::Resize(_, _) => {
                renderer.invalidate();
                renderer.draw(stdout, session.grid())?;
                None
            }
            _ => None,
        };
        let Some(action) = action else {
            continue;
        };
        tracing::debug!("[app loop] {:?}", action);

        // Bring the clock up to date so a new animation starts now, not at the last tick
        session.tick(elapsed());
        let redraw = match action {
            UserAction::Exit => break,
            UserAction::Solve(algorithm) => {
                let started = session.solve(algorithm)?;
                if started {
                    summary = None;
                }
                started
            }
            UserAction::Regenerate => session.regenerate(),
            UserAction::Clear => session.clear(),
            UserAction::Grow | UserAction::Shrink => {
                let (rows, cols) = session.dimensions();
                let resized = if action == UserAction::Grow {
                    (rows.saturating_add(RESIZE_STEP), cols.saturating_add(RESIZE_STEP))
                } else {
                    (rows.saturating_sub(RESIZE_STEP), cols.saturating_sub(RESIZE_STEP))
                };
                session.resize(resized.0, resized.1)
            }
            UserAction::SetSpeed(speed) => {
                session.set_speed(speed);
                false
            }
            UserAction::Cancel => {
                session.cancel();
                false
            }
        };
        if redraw {
            if matches!(action, UserAction::Regenerate | UserAction::Grow | UserAction::Shrink) {
                summary = None;
            }
            renderer.draw(stdout, session.grid())?;
        }
    }
    tracing::info!("[app loop] exiting");
    Ok(())
}

/// Render every snapshot the animator has produced since the last call.
fn drain_events(
    event_rx: &Receiver<AnimationEvent>,
    renderer: &mut Renderer,
    stdout: &mut Stdout,
    summary: &mut Option<AnimationSummary>,
) -> std::io::Result<()> {
    // Only the newest snapshot matters when several steps fired in one tick
    let mut latest = None;
    for event in event_rx.try_iter() {
        match event {
            AnimationEvent::Snapshot(grid) => latest = Some(grid),
            AnimationEvent::Completed(done) => *summary = Some(done),
        }
    }
    if let Some(grid) = latest {
        renderer.draw(stdout, &grid)?;
    }
    Ok(())
}

/// Generate, solve and play back without a terminal, then print the final grid and summary.
pub fn run_headless(config: &Config, stdout: &mut Stdout) -> Result<(), AppError> {
    let frames = std::rc::Rc::new(std::cell::Cell::new(0usize));
    let done = std::rc::Rc::new(std::cell::Cell::new(None));
    let sink = headless_sink(frames.clone(), done.clone());

    let mut session = Session::new(config, sink);
    session.solve(config.algorithm)?;
    while let Some(deadline) = session.next_deadline() {
        session.tick(deadline);
    }

    for row in session.grid().rows() {
        for kind in row {
            write!(stdout, "{}", kind)?;
        }
        writeln!(stdout)?;
    }
    writeln!(stdout, "{}", status_line(&session, done.get().as_ref()))?;
    writeln!(stdout, "{} frames", frames.get())?;
    stdout.flush()?;
    Ok(())
}

fn headless_sink(
    frames: std::rc::Rc<std::cell::Cell<usize>>,
    done: std::rc::Rc<std::cell::Cell<Option<AnimationSummary>>>,
) -> impl AnimationSink {
    Callbacks {
        on_mutation: move |_: &Grid| frames.set(frames.get() + 1),
        on_complete: move |summary: AnimationSummary| done.set(Some(summary)),
    }
}
