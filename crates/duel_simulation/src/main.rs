//! Headless демо-матч
//!
//! Запускает симуляцию без рендера: monster атакует по расписанию,
//! за игрока скриптом уходит punch каждые ~2 секунды. Cues и HUD-трафик
//! пишутся в консольный logger.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use duel_simulation::*;

fn main() {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        // Детерминированный тик: один update == один fixed tick
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));
    app.add_systems(Update, (log_cues, log_hud));

    spawn_default_duel(app.world_mut());
    app.world_mut().resource_mut::<MatchState>().started = true;
    log_info("Starting headless duel");

    let tps = SIMULATION_HZ as u64; // ticks per second
    let mut tick: u64 = 0;
    loop {
        // Скриптованный игрок: punch стрелкой вверх каждые 2 секунды
        if tick % (2 * tps) == tps {
            app.world_mut().send_event(RawInput::Key(ArrowKey::Up));
        }

        app.update();
        tick += 1;

        if !app.world().resource::<MatchState>().is_active() || tick > 120 * tps {
            break;
        }
    }

    // Доигрываем смертную анимацию и победный dance
    for _ in 0..(3 * tps) {
        app.update();
    }

    let state = app.world().resource::<MatchState>();
    println!(
        "Final after {} ticks: hero {} — monster {}",
        tick, state.hero_lives, state.monster_lives
    );
}

fn log_cues(mut cues: EventReader<AnimationCue>) {
    for cue in cues.read() {
        log(&format!("🎬 {:?}", cue));
    }
}

fn log_hud(mut updates: EventReader<HudUpdate>, mut countdown: EventReader<CountdownTick>) {
    for update in updates.read() {
        log_info(&format!(
            "HUD: \"{}\" (hero {}, monster {})",
            update.message.text(),
            update.hero_lives,
            update.monster_lives
        ));
    }
    for tick in countdown.read() {
        log(&format!("⏳ Next attack in {}", tick.seconds_remaining));
    }
}
