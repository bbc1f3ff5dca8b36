//! Fixed timestep simulation tick
//!
//! Core game loop that advances a round by one frame. Sub-phases run in a
//! fixed order because later phases read what earlier ones wrote.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Package, ParticleKind};
use super::state::{
    ActionResult, GameEvent, GamePhase, IgnoreReason, RoundOutcome, RoundState, RoundSummary,
};
use crate::consts::*;

/// Movement directions a host can hold down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "arrowup" | "keyw" => Some(Direction::Up),
            "down" | "arrowdown" | "keys" => Some(Direction::Down),
            "left" | "arrowleft" | "keya" => Some(Direction::Left),
            "right" | "arrowright" | "keyd" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Input commands for a single tick (held directions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn with(mut self, dir: Direction) -> Self {
        self.set(dir, true);
        self
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing changed
    Idle,
    /// Advanced one frame, round continues
    Running,
    /// This tick ended the round
    Ended(RoundSummary),
}

/// Begin play from the `Start` phase
pub fn start_round(state: &mut RoundState) -> ActionResult {
    match state.phase {
        GamePhase::Start => {
            state.phase = GamePhase::Playing;
            log::info!("Round started (seed {})", state.seed);
            ActionResult::Applied
        }
        GamePhase::Playing => ActionResult::Ignored(IgnoreReason::AlreadyPlaying),
        GamePhase::GameOver => ActionResult::Ignored(IgnoreReason::RoundOver),
    }
}

/// Throw a newspaper in the direction the player faces.
///
/// Applied immediately rather than on the next tick, so it carries its own
/// phase and inventory guards.
pub fn throw_package(state: &mut RoundState) -> ActionResult {
    if !state.is_playing() {
        return ActionResult::Ignored(IgnoreReason::NotPlaying);
    }
    if state.packages == 0 {
        return ActionResult::Ignored(IgnoreReason::OutOfPackages);
    }

    state.packages -= 1;
    let spawn = state.player.pos + Vec2::new(PACKAGE_SPAWN_OFFSET_X, PACKAGE_SPAWN_OFFSET_Y);
    let tuning = &state.tuning;
    let package = Package::new(
        spawn,
        state.player.facing,
        tuning.package_speed,
        tuning.package_lift,
        tuning.package_gravity,
    );
    state.thrown_packages.push(package);
    state.emit(GameEvent::PackageThrown {
        remaining: state.packages,
    });
    ActionResult::Applied
}

/// Advance the round by one fixed timestep
pub fn tick(state: &mut RoundState, input: &TickInput) -> TickOutcome {
    // Don't tick unless playing
    if state.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }

    state.time_ticks += 1;

    apply_input(state, input);

    // World scroll
    state.world_offset += state.tuning.world_speed;

    // Packages in flight
    for package in &mut state.thrown_packages {
        package.update();
    }
    state.thrown_packages.retain(|p| p.in_play());

    // Obstacles
    for obstacle in &mut state.obstacles {
        obstacle.update(&mut state.rng);
    }

    // Particles
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0);

    let hit = resolve_hazards(state);
    resolve_deliveries(state);

    // The tick that set the timer doesn't count toward it
    if !hit && state.invulnerable_ticks > 0 {
        state.invulnerable_ticks -= 1;
    }

    if state.lives == 0 {
        return TickOutcome::Ended(state.finish(RoundOutcome::Failed));
    }
    if state.player_world_x() >= state.finish_line.x {
        return TickOutcome::Ended(state.finish(RoundOutcome::RouteComplete));
    }

    TickOutcome::Running
}

fn apply_input(state: &mut RoundState, input: &TickInput) {
    let speed = state.tuning.player_speed;
    let player = &mut state.player;
    if input.left {
        player.move_left(speed);
    }
    if input.right {
        player.move_right(speed);
    }
    if input.up {
        player.move_up(speed);
    }
    if input.down {
        player.move_down(speed);
    }
}

/// Player vs obstacles. At most one life per tick, and none while shielded.
fn resolve_hazards(state: &mut RoundState) -> bool {
    if state.is_invulnerable() {
        return false;
    }

    let player_rect = state.player.rect();
    let offset = state.world_offset;
    let hit = state
        .obstacles
        .iter()
        .any(|o| o.rect().to_screen(offset).overlaps(&player_rect));
    if !hit {
        return false;
    }

    state.lives = state.lives.saturating_sub(1);
    state.invulnerable_ticks = state.tuning.invulnerability_ticks;
    state.burst(state.player.pos, ParticleKind::Hit);
    state.emit(GameEvent::PlayerHit { lives: state.lives });
    log::debug!("Player hit, {} lives left", state.lives);
    true
}

/// Packages vs mailboxes. Each package scores at most once, each mailbox once.
fn resolve_deliveries(state: &mut RoundState) {
    if state.thrown_packages.is_empty() || state.mailboxes.is_empty() {
        return;
    }

    let offset = state.world_offset;
    let packages = std::mem::take(&mut state.thrown_packages);
    let mut kept = Vec::with_capacity(packages.len());

    for package in packages {
        let package_rect = package.rect();
        let target = state.mailboxes.iter().position(|m| {
            !m.has_newspaper && m.rect().to_screen(offset).overlaps(&package_rect)
        });

        let Some(index) = target else {
            kept.push(package);
            continue;
        };

        let mailbox = &mut state.mailboxes[index];
        mailbox.has_newspaper = true;
        let house = mailbox.house;
        let screen_rect = mailbox.rect().to_screen(offset);
        let burst_at = Vec2::new(screen_rect.center().x, screen_rect.pos.y);

        state.score += state.tuning.delivery_points;
        if let Some(h) = state.houses.get_mut(house) {
            h.mark_delivered();
        }
        state.burst(burst_at, ParticleKind::Delivery);
        state.emit(GameEvent::Delivered {
            mailbox: index,
            house,
        });
        log::debug!("Delivered to house {} (score {})", house, state.score);
    }

    state.thrown_packages = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Facing, Mailbox, Obstacle, ObstacleKind, Side};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// A playing round with nothing on the road
    fn empty_round() -> RoundState {
        let tuning = Tuning {
            obstacle_count: 0,
            ..Tuning::default()
        };
        let mut state = RoundState::with_tuning(12345, tuning);
        start_round(&mut state);
        state
    }

    /// A parked car sitting on top of the player, scrolling with the world
    fn car_on_player(state: &RoundState) -> Obstacle {
        Obstacle {
            x: state.player.pos.x + state.world_offset,
            y: state.player.pos.y,
            kind: ObstacleKind::Car,
        }
    }

    /// Keep the car under the player as the world scrolls
    fn pin_obstacles(state: &mut RoundState) {
        let x = state.player.pos.x + state.world_offset + state.tuning.world_speed;
        for o in &mut state.obstacles {
            o.x = x;
        }
    }

    #[test]
    fn test_no_tick_outside_playing() {
        let mut state = RoundState::new(1);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Idle);
        assert_eq!(state.world_offset, 0.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_start_only_from_start() {
        let mut state = RoundState::new(1);
        assert_eq!(start_round(&mut state), ActionResult::Applied);
        assert_eq!(
            start_round(&mut state),
            ActionResult::Ignored(IgnoreReason::AlreadyPlaying)
        );
        state.phase = GamePhase::GameOver;
        assert_eq!(
            start_round(&mut state),
            ActionResult::Ignored(IgnoreReason::RoundOver)
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_world_scrolls_by_world_speed() {
        let mut state = empty_round();
        for i in 1..=50 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.world_offset, i as f32 * 2.0);
        }
    }

    #[test]
    fn test_throw_inherits_facing() {
        let mut state = empty_round();
        assert!(throw_package(&mut state).is_applied());
        assert_eq!(state.thrown_packages[0].vel, Vec2::new(8.0, -2.0));
        assert_eq!(
            state.thrown_packages[0].pos,
            state.player.pos + Vec2::new(20.0, 10.0)
        );

        tick(&mut state, &TickInput::default().with(Direction::Left));
        assert_eq!(state.player.facing, Facing::Left);
        throw_package(&mut state);
        assert_eq!(state.thrown_packages.last().unwrap().vel.x, -8.0);
        assert_eq!(state.packages, 8);
    }

    #[test]
    fn test_throw_with_empty_inventory_is_ignored() {
        let mut state = empty_round();
        state.packages = 0;
        assert_eq!(
            throw_package(&mut state),
            ActionResult::Ignored(IgnoreReason::OutOfPackages)
        );
        assert_eq!(state.packages, 0);
        assert!(state.thrown_packages.is_empty());
    }

    #[test]
    fn test_throw_outside_playing_is_ignored() {
        let mut state = RoundState::new(3);
        assert_eq!(
            throw_package(&mut state),
            ActionResult::Ignored(IgnoreReason::NotPlaying)
        );
        assert_eq!(state.packages, 10);
    }

    #[test]
    fn test_inventory_runs_out() {
        let mut state = empty_round();
        let applied = (0..15).filter(|_| throw_package(&mut state).is_applied()).count();
        assert_eq!(applied, 10);
        assert_eq!(state.packages, 0);
    }

    #[test]
    fn test_left_then_right_ends_facing_right() {
        let mut state = empty_round();
        let input = TickInput::default()
            .with(Direction::Left)
            .with(Direction::Right);
        let x = state.player.pos.x;
        tick(&mut state, &input);
        assert_eq!(state.player.pos.x, x);
        assert_eq!(state.player.facing, Facing::Right);
    }

    #[test]
    fn test_packages_leave_screen() {
        let mut state = empty_round();
        state.mailboxes.clear();
        throw_package(&mut state);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.thrown_packages.is_empty());
    }

    #[test]
    fn test_particles_pruned_after_lifetime() {
        let mut state = empty_round();
        state.burst(Vec2::new(400.0, 300.0), ParticleKind::Hit);
        assert_eq!(state.particles.len(), 10);
        for _ in 0..PARTICLE_LIFE - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.particles.len(), 10);
        tick(&mut state, &TickInput::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_overlapping_obstacles_cost_one_life() {
        let mut state = empty_round();
        let car = car_on_player(&state);
        state.obstacles = vec![car.clone(), car.clone(), car];
        pin_obstacles(&mut state);

        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::Running);
        assert_eq!(state.lives, 2);
        assert_eq!(state.invulnerable_ticks, 120);
        assert_eq!(state.particles.len(), 10);
    }

    #[test]
    fn test_invulnerability_window_is_exactly_120_ticks() {
        let mut state = empty_round();
        state.obstacles = vec![car_on_player(&state)];
        pin_obstacles(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);

        for _ in 0..120 {
            pin_obstacles(&mut state);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.lives, 2);
        }

        pin_obstacles(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_three_hits_end_the_round() {
        let mut state = empty_round();
        state.obstacles = vec![car_on_player(&state)];

        let mut ended = None;
        for _ in 0..(3 * 121) {
            pin_obstacles(&mut state);
            if let TickOutcome::Ended(summary) = tick(&mut state, &TickInput::default()) {
                ended = Some(summary);
                break;
            }
        }

        let summary = ended.expect("round should end");
        assert_eq!(summary.outcome, RoundOutcome::Failed);
        assert_eq!(summary.final_score, state.score);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);

        let (score, lives, offset) = (state.score, state.lives, state.world_offset);
        for _ in 0..10 {
            assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Idle);
        }
        assert_eq!((state.score, state.lives, state.world_offset), (score, lives, offset));
    }

    #[test]
    fn test_delivery_scores_once_per_mailbox() {
        let mut state = empty_round();
        // Mailbox right where the package will be after one tick
        let house = 0;
        state.houses[house].needs_delivery = true;
        state.mailboxes = vec![Mailbox {
            x: state.player.pos.x + 28.0 + state.tuning.world_speed,
            side: Side::Top,
            house,
            has_newspaper: false,
        }];
        state.player.pos.y = state.mailboxes[0].y() - 10.0 + 2.0;

        throw_package(&mut state);
        throw_package(&mut state);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 100);
        assert!(state.mailboxes[0].has_newspaper);
        assert!(state.houses[house].delivered);
        assert!(!state.houses[house].needs_delivery);
        // The second package flew through the filled mailbox
        assert_eq!(state.thrown_packages.len(), 1);
        assert_eq!(state.particles.len(), 10);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Delivered { mailbox: 0, house: 0 }))
        );

        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_package_fills_only_one_of_two_overlapping_mailboxes() {
        let mut state = empty_round();
        let x = state.player.pos.x + 28.0 + state.tuning.world_speed;
        // Side by side, both under the package after one tick
        state.mailboxes = vec![
            Mailbox {
                x,
                side: Side::Top,
                house: 0,
                has_newspaper: false,
            },
            Mailbox {
                x: x + 5.0,
                side: Side::Top,
                house: 1,
                has_newspaper: false,
            },
        ];
        state.player.pos.y = state.mailboxes[0].y() - 10.0 + 2.0;

        throw_package(&mut state);
        state.events.clear();
        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 100);
        assert_eq!(
            state.mailboxes.iter().filter(|m| m.has_newspaper).count(),
            1
        );
        assert!(state.mailboxes[0].has_newspaper);
        assert!(state.thrown_packages.is_empty());
        let delivered: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Delivered { .. }))
            .collect();
        assert_eq!(
            delivered,
            vec![&GameEvent::Delivered {
                mailbox: 0,
                house: 0
            }]
        );
    }

    #[test]
    fn test_route_complete_adds_bonus() {
        let mut state = empty_round();
        for house in state.houses.iter_mut().take(3) {
            house.needs_delivery = false;
            house.delivered = true;
        }
        for house in state.houses.iter_mut().skip(3) {
            house.delivered = false;
        }
        state.score = 300;
        state.world_offset = state.finish_line.x - state.player.pos.x - 2.0;

        let outcome = tick(&mut state, &TickInput::default());
        let TickOutcome::Ended(summary) = outcome else {
            panic!("expected round to end, got {:?}", outcome);
        };
        assert_eq!(summary.outcome, RoundOutcome::RouteComplete);
        assert_eq!(summary.deliveries, 3);
        assert_eq!(summary.delivery_bonus, 150);
        assert_eq!(summary.final_score, 450);
        assert_eq!(state.summary, Some(summary));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_route_without_deliveries_is_completable() {
        let tuning = Tuning {
            delivery_chance: 0.0,
            obstacle_count: 0,
            ..Tuning::default()
        };
        let mut state = RoundState::with_tuning(8, tuning);
        start_round(&mut state);

        let mut ticks = 0;
        let summary = loop {
            if let TickOutcome::Ended(s) = tick(&mut state, &TickInput::default()) {
                break s;
            }
            ticks += 1;
            assert!(ticks < 10_000);
        };
        assert_eq!(summary.outcome, RoundOutcome::RouteComplete);
        assert_eq!(summary.final_score, 0);
    }

    proptest! {
        #[test]
        fn prop_world_offset_monotonic(
            seed in any::<u64>(),
            moves in prop::collection::vec(0u8..16, 1..200),
        ) {
            let mut state = RoundState::new(seed);
            start_round(&mut state);
            let mut last = state.world_offset;
            for bits in moves {
                let input = TickInput {
                    up: bits & 1 != 0,
                    down: bits & 2 != 0,
                    left: bits & 4 != 0,
                    right: bits & 8 != 0,
                };
                let playing = state.is_playing();
                tick(&mut state, &input);
                if playing {
                    prop_assert_eq!(state.world_offset, last + 2.0);
                } else {
                    prop_assert_eq!(state.world_offset, last);
                }
                last = state.world_offset;
            }
        }

        #[test]
        fn prop_inventory_never_negative(seed in any::<u64>(), throws in 0usize..30) {
            let mut state = RoundState::new(seed);
            start_round(&mut state);
            for _ in 0..throws {
                throw_package(&mut state);
            }
            prop_assert_eq!(state.packages as usize, 10usize.saturating_sub(throws));
            prop_assert_eq!(state.thrown_packages.len(), throws.min(10));
        }
    }
}
