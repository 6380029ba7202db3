//! AttackScheduler — автономный таймер атак монстра
//!
//! Пока матч идёт (started && Active): punch монстра каждые
//! ATTACK_PERIOD секунд. После каждой атаки — секундный countdown
//! (3, 2, 1) для HUD; новый выстрел сбрасывает предыдущий countdown,
//! доиграл тот или нет. В момент Over оба таймера снимаются навсегда.

use bevy::prelude::*;

use crate::actions::ActionKind;
use crate::combat::controller::ActionTrigger;
use crate::combat::match_state::MatchState;
use crate::components::Fighter;
use crate::hud::CountdownTick;

/// Период атак монстра (секунды)
pub const ATTACK_PERIOD: f32 = 3.0;

/// Период countdown-тиков (секунды)
pub const COUNTDOWN_PERIOD: f32 = 1.0;

#[derive(Resource, Debug, Clone)]
pub struct AttackScheduler {
    /// До следующего punch монстра
    pub attack_timer: f32,
    /// До следующего countdown-тика
    pub countdown_timer: f32,
    /// Текущее публикуемое значение countdown (0 = не идёт)
    pub countdown_remaining: u8,
    /// Перманентный teardown после конца матча
    pub stopped: bool,
}

impl Default for AttackScheduler {
    fn default() -> Self {
        Self {
            attack_timer: ATTACK_PERIOD,
            countdown_timer: COUNTDOWN_PERIOD,
            countdown_remaining: 0,
            stopped: false,
        }
    }
}

/// System: вести таймер атак и countdown.
///
/// Не тикает, пока HUD не поднял флаг старта. Punch уходит как обычный
/// ActionTrigger — если монстр ещё доигрывает прошлую атаку, контроллер
/// отбросит команду (ожидаемый no-op).
pub fn drive_monster_attacks(
    mut scheduler: ResMut<AttackScheduler>,
    match_state: Res<MatchState>,
    time: Res<Time<Fixed>>,
    mut triggers: EventWriter<ActionTrigger>,
    mut countdown: EventWriter<CountdownTick>,
) {
    if scheduler.stopped {
        return;
    }
    if !match_state.is_active() {
        // Teardown в момент Over — таймеры больше не возобновляются
        scheduler.stopped = true;
        crate::log("⏹️ Attack scheduler stopped (match over)");
        return;
    }
    if !match_state.started {
        return;
    }

    let delta = time.delta_secs();

    scheduler.attack_timer -= delta;
    if scheduler.attack_timer <= 0.0 {
        scheduler.attack_timer += ATTACK_PERIOD;

        triggers.write(ActionTrigger {
            fighter: Fighter::Monster,
            action: ActionKind::Punch,
        });

        // Новый countdown, предыдущий сбрасывается
        scheduler.countdown_remaining = 3;
        scheduler.countdown_timer = COUNTDOWN_PERIOD;
        countdown.write(CountdownTick {
            seconds_remaining: 3,
        });
        crate::log("👹 Monster attacks");
        return;
    }

    if scheduler.countdown_remaining > 1 {
        scheduler.countdown_timer -= delta;
        if scheduler.countdown_timer <= 0.0 {
            scheduler.countdown_timer += COUNTDOWN_PERIOD;
            scheduler.countdown_remaining -= 1;
            countdown.write(CountdownTick {
                seconds_remaining: scheduler.countdown_remaining,
            });
        }
    }
}
