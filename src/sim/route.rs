//! Route generation
//!
//! Fixed layout, random details: houses at regular spacing, each one picking a
//! side and whether it wants a paper; jittered obstacles; a finish line just
//! past the last house.

use rand::Rng;

use super::entities::{FinishLine, House, HouseLook, Mailbox, Obstacle, Side};
use crate::tuning::Tuning;

/// Everything placed along the route at round start
#[derive(Debug, Clone)]
pub struct Route {
    pub houses: Vec<House>,
    pub mailboxes: Vec<Mailbox>,
    pub obstacles: Vec<Obstacle>,
    pub finish_line: FinishLine,
}

/// Lay out a new route
pub fn generate_route(rng: &mut impl Rng, tuning: &Tuning) -> Route {
    let house_count = tuning.house_count as usize;
    let mut houses = Vec::with_capacity(house_count);
    let mut mailboxes = Vec::new();

    for i in 0..house_count {
        let x = tuning.first_house_x + i as f32 * tuning.house_spacing;
        let side = Side::random(rng);
        let needs_delivery = rng.random_bool(tuning.delivery_chance);

        // Each mailbox remembers its house so delivery never re-matches by distance
        if needs_delivery {
            mailboxes.push(Mailbox {
                x: x + tuning.mailbox_offset,
                side,
                house: i,
                has_newspaper: false,
            });
        }

        houses.push(House {
            x,
            side,
            needs_delivery,
            delivered: false,
            look: HouseLook::random(rng),
        });
    }

    let mut obstacles = Vec::with_capacity(tuning.obstacle_count as usize);
    for i in 0..tuning.obstacle_count {
        let jitter = if tuning.obstacle_jitter > 0.0 {
            rng.random_range(0.0..tuning.obstacle_jitter)
        } else {
            0.0
        };
        let x = tuning.first_obstacle_x + i as f32 * tuning.obstacle_spacing + jitter;
        let obstacle = if rng.random_bool(tuning.car_chance) {
            Obstacle::car(x, rng)
        } else {
            Obstacle::dog(x, rng)
        };
        obstacles.push(obstacle);
    }

    let last_house_x = houses.last().map_or(tuning.first_house_x, |h| h.x);
    let finish_line = FinishLine {
        x: last_house_x + tuning.finish_margin,
    };

    Route {
        houses,
        mailboxes,
        obstacles,
        finish_line,
    }
}
