//! Aim trainer entry point
//!
//! There is no native renderer; this runs a deterministic headless
//! demo of level 1 with an auto-aiming player and prints the result.

use aim_trainer::consts::SIM_DT;
use aim_trainer::sim::{GameEvent, Session, SessionCommand, SessionState, TickInput};

fn main() {
    env_logger::init();
    log::info!("aim-trainer session core (headless demo)");

    let mut session = Session::new(20260827);
    let _ = session.apply(SessionCommand::Start);
    if let Err(e) = session.apply(SessionCommand::SelectLevel(1)) {
        log::error!("could not start level 1: {e}");
        return;
    }

    // Auto-aim: shoot whatever is under the crosshair, every tick the
    // cooldown allows. Two minutes of sim time is a generous bound.
    let mut ticks: u64 = 0;
    while matches!(session.state(), SessionState::Playing { .. }) && ticks < 120 * 60 {
        let aimed = session.active_target().map(|t| t.id);
        let input = TickInput {
            shoot: aimed.is_some(),
            aimed,
        };
        session.tick(&input, SIM_DT);
        ticks += 1;

        for event in session.drain_events() {
            match event {
                GameEvent::Hit { position, .. } => {
                    log::info!("hit at {:.1},{:.1},{:.1}", position.x, position.y, position.z);
                }
                GameEvent::Miss => log::info!("miss"),
                GameEvent::TargetEscaped { id } => log::info!("target {id} escaped"),
                GameEvent::LevelEnd {
                    level,
                    accuracy_percent,
                    success,
                } => {
                    log::info!("level {level} finished: {accuracy_percent}% (success: {success})");
                }
                _ => {}
            }
        }
    }

    let stats = session.stats();
    println!(
        "demo finished after {ticks} ticks: {}/{} hits, {} shots, {} points, unlocked level {}",
        stats.hits,
        stats.targets_total,
        stats.shots_fired,
        stats.points,
        session.progression().unlocked_level()
    );
}
