//! Terminal Blockfall runner (default binary).
//!
//! Gravity comes from a tokio-backed repeating timer; keyboard input is read
//! with crossterm and drawn through the framebuffer renderer.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, is_repeatable, should_quit};
use blockfall::runtime::{RunConfig, TickRuntime, TokioTimer};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    let (mut ticks, timer) = TickRuntime::start()?;
    let mut game = GameState::with_config(timer, config.seed, config.session());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &mut ticks);

    // Always try to restore terminal state.
    let _ = term.exit();

    println!(
        "[Blockfall] seed={} score={} level={} lines={}",
        config.seed,
        game.score(),
        game.level(),
        game.lines()
    );
    result
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState<TokioTimer>,
    ticks: &mut TickRuntime,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if should_quit(key) {
                        return Ok(());
                    }
                    let Some(action) = handle_key_event(key) else {
                        continue;
                    };
                    if key.kind == KeyEventKind::Repeat && !is_repeatable(action) {
                        continue;
                    }
                    game.apply_action(action);
                    if matches!(
                        action,
                        GameAction::Pause | GameAction::TogglePause | GameAction::Start
                    ) {
                        // Intervals queued under the previous state are stale.
                        ticks.drain();
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        while ticks.try_recv().is_some() {
            game.tick();
        }
    }
}
