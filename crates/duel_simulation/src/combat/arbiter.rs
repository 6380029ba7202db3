//! CombatArbiter — резолюция исхода атаки в mid-точке
//!
//! # Outcome table (монстр атакует / hero атакует)
//!
//! | Защитник            | monster → hero      | hero → monster |
//! |---------------------|---------------------|----------------|
//! | Idle                | -1 жизнь + react    | -1 жизнь       |
//! | mid-punch           | "Both Hurt", -1 оба | no effect      |
//! | mid-dodge           | "Dodged", без урона | n/a            |
//! | mid-react / другое  | -1 жизнь, без react | no effect      |
//! | Dead                | no-op               | no-op          |
//!
//! Асимметрия сохранена намеренно: hero-атака проверяет только Idle
//! монстра и никогда не даёт "Both Hurt"/"Dodged" — у монстра нет
//! dodge-клипа, встречный punch монстра резолвится его собственным mid.
//!
//! Арбитр — единственный writer жизней в MatchState.

use bevy::prelude::*;

use crate::actions::{ActionCatalog, ActionKind};
use crate::combat::controller::{AttackLanded, CombatController};
use crate::combat::match_state::MatchState;
use crate::components::{ActionClock, Fighter};
use crate::cues::AnimationCue;
use crate::hud::{HudMessage, HudUpdate};

/// Задержка победного dance после смерти проигравшего (секунды)
pub const VICTORY_DANCE_DELAY: f32 = 1.2;

/// Задержка dance обоих бойцов после секретного комбо (секунды)
pub const SECRET_DANCE_DELAY: f32 = 0.8;

/// Отложенный dance. Re-validated on fire: ждёт возврата бойца в Idle,
/// снимается если боец мёртв.
#[derive(Component, Debug, Clone)]
pub struct FlourishTimer {
    pub remaining: f32,
}

impl FlourishTimer {
    pub fn new(delay: f32) -> Self {
        Self { remaining: delay }
    }
}

/// Исход одной атаки
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Hurt,
    BothHurt,
    Dodged,
    NoEffect,
}

/// System: резолвить AttackLanded события.
///
/// Читает фазы обоих контроллеров плюс MatchState, применяет life-дельты,
/// триггерит react/die и планирует победный dance. Событие, пришедшее
/// после конца матча (или по мёртвому защитнику), — no-op по re-check,
/// не ошибка.
pub fn resolve_attacks(
    mut landed: EventReader<AttackLanded>,
    mut fighters: Query<(
        Entity,
        &Fighter,
        &mut CombatController,
        &mut ActionClock,
        &ActionCatalog,
    )>,
    mut match_state: ResMut<MatchState>,
    mut commands: Commands,
    mut hud: EventWriter<HudUpdate>,
    mut cues: EventWriter<AnimationCue>,
) {
    for hit in landed.read() {
        // Матч уже завершён — затухающие mid-callbacks игнорируются
        if !match_state.is_active() {
            continue;
        }

        let attacker_kind = hit.attacker;
        let defender_kind = attacker_kind.opponent();

        let mut attacker_item = None;
        let mut defender_item = None;
        for item in fighters.iter_mut() {
            if *item.1 == attacker_kind {
                attacker_item = Some(item);
            } else if *item.1 == defender_kind {
                defender_item = Some(item);
            }
        }
        let (Some(mut attacker), Some(mut defender)) = (attacker_item, defender_item) else {
            continue;
        };

        // Защитник уже мёртв — no-op по re-check фазы
        if defender.2.is_dead() {
            continue;
        }

        let outcome = match attacker_kind {
            Fighter::Monster => {
                if defender.2.is_acting(ActionKind::Dodge) {
                    Outcome::Dodged
                } else if defender.2.is_acting(ActionKind::Punch) {
                    // Оба mid-attack одновременно — обоюдный урон
                    Outcome::BothHurt
                } else {
                    // Idle либо mid-react: жизнь снимается; повторный
                    // react поверх играющего — естественный no-op
                    Outcome::Hurt
                }
            }
            // Hero-атака проверяет только Idle монстра
            Fighter::Hero => {
                if defender.2.is_idle() {
                    Outcome::Hurt
                } else {
                    Outcome::NoEffect
                }
            }
        };

        let message = match outcome {
            Outcome::NoEffect => None,
            Outcome::Dodged => Some(HudMessage::Dodged),
            Outcome::Hurt => {
                match_state.lose_life(defender_kind);

                // React играет только hero (у монстра нет react-клипа)
                if defender_kind == Fighter::Hero {
                    if let Some(react) = defender.4.spec(ActionKind::React) {
                        if let Some(cue) = defender.2.try_start(defender_kind, react, &mut defender.3) {
                            cues.write(cue);
                        }
                    }
                }

                Some(match defender_kind {
                    Fighter::Hero => HudMessage::HeroHurt,
                    Fighter::Monster => HudMessage::MonsterHurt,
                })
            }
            Outcome::BothHurt => {
                match_state.lose_life(Fighter::Hero);
                match_state.lose_life(Fighter::Monster);
                Some(HudMessage::BothHurt)
            }
        };

        let Some(message) = message else {
            crate::log(&format!(
                "🌀 {} attack had no effect ({} not idle)",
                attacker_kind.name(),
                defender_kind.name()
            ));
            continue;
        };

        hud.write(HudUpdate {
            hero_lives: match_state.hero_lives,
            monster_lives: match_state.monster_lives,
            message,
        });
        crate::log(&format!(
            "💥 {} (hero: {}, monster: {})",
            message.text(),
            match_state.hero_lives,
            match_state.monster_lives
        ));

        // Смерти и завершение матча
        let hero_dead = match_state.hero_lives == 0;
        let monster_dead = match_state.monster_lives == 0;
        if !hero_dead && !monster_dead {
            continue;
        }

        match_state.finish();

        for item in [&mut attacker, &mut defender] {
            let (entity, fighter, controller, clock, catalog) = item;
            if match_state.lives(**fighter) == 0 {
                let Some(die) = catalog.spec(ActionKind::Die) else {
                    continue;
                };
                if let Some(cue) = controller.kill(**fighter, die, clock) {
                    cues.write(cue);
                    cues.write(AnimationCue::Clamp {
                        fighter: **fighter,
                        action: ActionKind::Die,
                    });
                    cues.write(AnimationCue::Sink { fighter: **fighter });
                    crate::log(&format!("💀 {} dies", fighter.name()));
                }
            } else {
                // Единственный выживший танцует после фиксированной задержки.
                // При одновременной смерти (ничья) сюда не попадает никто.
                commands.entity(*entity).insert(FlourishTimer::new(VICTORY_DANCE_DELAY));
            }
        }

        let verdict = match (hero_dead, monster_dead) {
            (true, true) => HudMessage::Draw,
            (true, false) => HudMessage::MonsterWins,
            (false, true) => HudMessage::HeroWins,
            (false, false) => unreachable!(),
        };
        hud.write(HudUpdate {
            hero_lives: match_state.hero_lives,
            monster_lives: match_state.monster_lives,
            message: verdict,
        });
        crate::log(&format!("🏁 Match over: {}", verdict.text()));
    }
}

/// System: отложенные dance (победа или секретное комбо).
///
/// Таймер истёк → ждём Idle (in-flight действие доигрывается) → dance.
/// Мёртвый боец таймер теряет без эффекта.
pub fn tick_flourish_timers(
    mut query: Query<(
        Entity,
        &Fighter,
        &mut CombatController,
        &mut ActionClock,
        &ActionCatalog,
        &mut FlourishTimer,
    )>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut cues: EventWriter<AnimationCue>,
) {
    let delta = time.delta_secs();

    for (entity, fighter, mut controller, mut clock, catalog, mut timer) in query.iter_mut() {
        timer.remaining -= delta;
        if timer.remaining > 0.0 {
            continue;
        }

        if controller.is_dead() {
            commands.entity(entity).remove::<FlourishTimer>();
            continue;
        }

        let Some(dance) = catalog.spec(ActionKind::Dance) else {
            commands.entity(entity).remove::<FlourishTimer>();
            continue;
        };

        if let Some(cue) = controller.try_start(*fighter, dance, &mut clock) {
            cues.write(cue);
            commands.entity(entity).remove::<FlourishTimer>();
            crate::log(&format!("🕺 {} plays victory dance", fighter.name()));
        }
        // Иначе боец ещё доигрывает действие — повторим на следующем тике
    }
}
