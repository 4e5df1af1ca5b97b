//! Headless demo: run a seeded session on the game loop thread until
//! game over, logging progress. Stops the session after two simulated
//! minutes if the game has not ended on its own.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use defender_app::game_loop::spawn_game_loop;
use defender_app::state::{GameLoopCommand, SnapshotCell};
use defender_core::commands::PlayerCommand;
use defender_core::enums::GameMode;
use defender_sim::engine::SimConfig;

const DEMO_LIMIT_SECS: f64 = 120.0;

fn main() {
    env_logger::init();

    let latest: SnapshotCell = Arc::new(Mutex::new(None));
    let (commands, handle) = spawn_game_loop(SimConfig::default(), Arc::clone(&latest));

    if commands
        .send(GameLoopCommand::Player(PlayerCommand::StartGame))
        .is_err()
    {
        log::error!("game loop thread is gone");
        return;
    }

    let mut limit_sent = false;
    let mut last_wave = 0;
    loop {
        thread::sleep(Duration::from_millis(100));

        let snapshot = match latest.lock() {
            Ok(lock) => lock.clone(),
            Err(_) => break,
        };
        let snapshot = match snapshot {
            Some(s) => s,
            None => continue,
        };

        if snapshot.session.wave_number != last_wave {
            last_wave = snapshot.session.wave_number;
            log::info!(
                "wave {} — base {} score {}",
                snapshot.session.wave_number,
                snapshot.session.base_health,
                snapshot.session.score
            );
        }

        if snapshot.mode == GameMode::GameOver {
            log::info!(
                "game over after {:.1}s: score {} on wave {}",
                snapshot.time.elapsed_secs,
                snapshot.session.score,
                snapshot.session.wave_number
            );
            break;
        }

        if !limit_sent && snapshot.time.elapsed_secs >= DEMO_LIMIT_SECS {
            limit_sent = true;
            log::info!("demo limit reached, ending session");
            if commands
                .send(GameLoopCommand::Player(PlayerCommand::EndGame))
                .is_err()
            {
                break;
            }
        }
    }

    let _ = commands.send(GameLoopCommand::Shutdown);
    let _ = handle.join();
}
