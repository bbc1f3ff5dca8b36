//! Paper Route entry point
//!
//! The browser build starts from `web::wasm_start`. Natively this runs a
//! headless round with a simple autopilot, which is handy for checking that
//! a tuning file still produces a playable route.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Paper Route (native) starting...");

    let seed = std::env::var("PAPER_ROUTE_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = match std::env::var("PAPER_ROUTE_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => paper_route::Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Can't read tuning file {}: {}", path, e);
                paper_route::Tuning::default()
            }
        },
        Err(_) => paper_route::Tuning::default(),
    };

    let summary = autopilot::play(seed, tuning);
    println!(
        "{:?}: base {} + bonus {} ({} deliveries) = {}",
        summary.outcome,
        summary.base_score,
        summary.delivery_bonus,
        summary.deliveries,
        summary.final_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use paper_route::Game;
    use paper_route::consts::*;
    use paper_route::sim::{Direction, RoundOutcome, RoundSummary, TickOutcome};
    use paper_route::tuning::Tuning;

    /// Hard stop in case a tuning never reaches the finish
    const MAX_TICKS: u32 = 60 * 60 * 10;

    /// Play one round: line up with the next mailbox, throw when it's close,
    /// sidestep anything coming at us.
    pub fn play(seed: u64, tuning: Tuning) -> RoundSummary {
        let mut game = Game::with_tuning(seed, tuning);
        game.start();

        for _ in 0..MAX_TICKS {
            steer(&mut game);
            if let TickOutcome::Ended(summary) = game.tick() {
                return summary;
            }
            for event in game.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        log::warn!("Autopilot gave up after {} ticks", MAX_TICKS);
        game.summary().unwrap_or(RoundSummary {
            outcome: RoundOutcome::Failed,
            base_score: game.score(),
            deliveries: game.state().delivered_count(),
            delivery_bonus: 0,
            final_score: game.score(),
        })
    }

    fn steer(game: &mut Game) {
        game.clear_all_intents();

        let state = game.state();
        let offset = state.world_offset;
        let player = state.player.rect();

        // Next unfilled mailbox ahead of us
        let target = state
            .mailboxes
            .iter()
            .filter(|m| !m.has_newspaper)
            .map(|m| m.rect().to_screen(offset))
            .find(|r| r.pos.x > player.right());

        let danger = state.obstacles.iter().any(|o| {
            let r = o.rect().to_screen(offset);
            r.pos.x - player.right() < 40.0
                && r.right() > player.pos.x
                && r.pos.y < player.bottom() + 10.0
                && r.bottom() > player.pos.y - 10.0
        });

        let mut throw = false;
        if danger {
            let up = player.center().y > CANVAS_HEIGHT / 2.0;
            game.apply_movement_intent(if up { Direction::Up } else { Direction::Down });
        } else if let Some(mailbox) = target {
            // Packages spawn 10 below our top edge and rise a little first
            let aim_y = mailbox.pos.y + 4.0;
            let package_y = player.pos.y + PACKAGE_SPAWN_OFFSET_Y;
            if package_y < aim_y - 4.0 {
                game.apply_movement_intent(Direction::Down);
            } else if package_y > aim_y + 4.0 {
                game.apply_movement_intent(Direction::Up);
            }
            let dx = mailbox.pos.x - player.right();
            throw = dx < 20.0 && (package_y - aim_y).abs() <= 8.0;
        }

        if throw {
            game.request_throw();
        }
    }
}
