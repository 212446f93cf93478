use log::{info, warn};
use std::env;
use std::thread;
use std::time::Duration;

use autosnake::bot::{Bot, PlanError};
use autosnake::config::Config;
use autosnake::game::{Game, TickOutcome};
use autosnake::trace::{TraceLogger, TraceRecord};

fn main() -> anyhow::Result<()> {
    // We default to 'info' level logging. But if the `RUST_LOG` environment
    // variable is set, we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting autosnake...");

    // Load configuration once at startup
    let config = Config::load_or_default();

    let mut game = Game::new(
        config.board.width,
        config.board.height,
        config.board.food_count,
        config.board.grow_factor,
    );
    let mut bot = Bot::new(config.clone());
    let mut trace = TraceLogger::new(config.trace.enabled, &config.trace.log_file_path);

    let mut turn: u64 = 0;
    loop {
        if config.run.max_turns > 0 && turn >= config.run.max_turns {
            info!("Reached turn limit ({}), stopping", config.run.max_turns);
            break;
        }

        let decision = match bot.next_move(&game) {
            Ok(decision) => decision,
            Err(PlanError::NoPath) => {
                warn!("Turn {}: no path available, ending run", turn);
                break;
            }
            Err(e) => return Err(e.into()),
        };

        trace.log_tick(&TraceRecord::from_decision(
            turn,
            game.snake().head(),
            game.snake().len(),
            &decision,
        ));

        match game.step(decision.direction) {
            TickOutcome::Died => {
                info!(
                    "Turn {}: snake died (length {}, score {})",
                    turn,
                    game.snake().len(),
                    game.score()
                );
                break;
            }
            TickOutcome::Ate => {
                info!(
                    "Turn {}: ate food, length {} score {}",
                    turn,
                    game.snake().len(),
                    game.score()
                );
            }
            TickOutcome::Moved => {}
        }

        turn += 1;
        if config.run.tick_ms > 0 {
            thread::sleep(Duration::from_millis(config.run.tick_ms));
        }
    }

    info!(
        "Game over: {} turns, final length {}, score {}",
        turn,
        game.snake().len(),
        game.score()
    );
    Ok(())
}
