//! Win/lose evaluation.
//!
//! Runs only while the match is Playing; a triggered transition is terminal.
//! Win is checked first: a ping fired within the echo window with the quarry
//! inside the intercept radius. Past the time limit, the quarry escapes on
//! any tick it stands inside the escape zone.

use hecs::World;

use darkwater_core::components::{PlayerShip, QuarryShip, ScanState, ShipIdent};
use darkwater_core::constants::{ACTIVE_ECHO_WINDOW_SECS, INTERCEPT_RADIUS};
use darkwater_core::enums::MatchPhase;
use darkwater_core::events::SimEvent;
use darkwater_core::state::MatchState;
use darkwater_core::types::Position;

pub fn run(
    world: &mut World,
    match_state: &mut MatchState,
    now_secs: f64,
    events: &mut Vec<SimEvent>,
) {
    if match_state.status != MatchPhase::Playing {
        return;
    }

    let player = {
        let mut query = world.query::<(&PlayerShip, &Position, &ScanState)>();
        match query.iter().next() {
            Some((_, (_p, pos, scan))) => (*pos, scan.last_ping_at),
            None => return,
        }
    };
    let quarry = {
        let mut query = world.query::<(&QuarryShip, &Position, &ShipIdent)>();
        match query.iter().next() {
            Some((_, (_q, pos, ident))) => (*pos, ident.id),
            None => return,
        }
    };

    let (player_pos, last_ping_at) = player;
    let (quarry_pos, quarry_id) = quarry;

    let ping_fresh = last_ping_at.map_or(false, |t| now_secs - t <= ACTIVE_ECHO_WINDOW_SECS);
    if ping_fresh && player_pos.range_to(&quarry_pos) <= INTERCEPT_RADIUS {
        match_state.status = MatchPhase::Won;
        events.push(SimEvent::QuarryIntercepted { ship_id: quarry_id });
        return;
    }

    let elapsed = now_secs - match_state.started_at_secs;
    if elapsed >= match_state.time_limit_secs && match_state.escape_zone.contains(&quarry_pos) {
        match_state.status = MatchPhase::Lost;
        events.push(SimEvent::QuarryEscaped { ship_id: quarry_id });
    }
}
