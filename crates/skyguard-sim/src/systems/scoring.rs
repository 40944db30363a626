//! End-of-wave scoring: survivor bonuses and bonus-city revival.

use hecs::World;

use skyguard_core::components::{City, LaunchSite};
use skyguard_core::constants::*;

/// Points for every standing city plus every unspent round at a standing
/// launch site.
pub fn wave_end_bonus(world: &World) -> u64 {
    let city_bonus: u64 = world
        .query::<&City>()
        .iter()
        .filter(|(_, c)| c.is_alive())
        .map(|_| SCORE_CITY_BONUS)
        .sum();
    let ammo_bonus: u64 = world
        .query::<&LaunchSite>()
        .iter()
        .filter(|(_, s)| s.is_alive())
        .map(|(_, s)| u64::from(s.ammo()) * SCORE_AMMO_BONUS)
        .sum();
    city_bonus + ammo_bonus
}

/// Revive one destroyed city (lowest id first) for each `BONUS_CITY_SCORE`
/// multiple crossed since `last_threshold`. Thresholds are consumed even when
/// no city is down. Returns the revived city ids.
pub fn award_bonus_cities(world: &mut World, score: u64, last_threshold: &mut u64) -> Vec<u32> {
    let threshold = score / BONUS_CITY_SCORE * BONUS_CITY_SCORE;
    let mut revived = Vec::new();

    while *last_threshold < threshold {
        *last_threshold += BONUS_CITY_SCORE;

        let mut dead: Vec<(u32, &mut City)> = world
            .query_mut::<&mut City>()
            .into_iter()
            .filter(|(_, c)| !c.is_alive())
            .map(|(_, c)| (c.id(), c))
            .collect();
        dead.sort_by_key(|(id, _)| *id);

        if let Some((id, city)) = dead.into_iter().next() {
            city.reset();
            revived.push(id);
        }
    }

    revived
}
