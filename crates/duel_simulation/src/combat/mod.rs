//! Combat system module
//!
//! ECS ответственность:
//! - Game state: MatchState (жизни, фаза), фазы контроллеров
//! - Combat rules: резолюция атак, message tags, death/dance
//! - Timers: attack cadence монстра, countdown, отложенный dance
//!
//! Renderer ответственность:
//! - Animation mixing по AnimationCue событиям
//! - HUD rendering по HudUpdate/CountdownTick/SecretUnlocked

use bevy::prelude::*;

pub mod arbiter;
pub mod controller;
pub mod match_state;
pub mod scheduler;

// Re-export основных типов
pub use arbiter::{
    resolve_attacks, tick_flourish_timers, FlourishTimer, SECRET_DANCE_DELAY,
    VICTORY_DANCE_DELAY,
};
pub use controller::{
    ActionTrigger, ActorPhase, AttackLanded, CombatController, TickOutcome,
};
pub use match_state::{MatchPhase, MatchState, DEFAULT_HERO_LIVES, DEFAULT_MONSTER_LIVES};
pub use scheduler::{AttackScheduler, ATTACK_PERIOD, COUNTDOWN_PERIOD};

use crate::cues::AnimationCue;
use crate::hud::{CountdownTick, HudUpdate};
use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (60Hz).
///
/// Порядок выполнения:
/// 1. drive_monster_attacks — cadence атак монстра + countdown
/// 2. apply_action_triggers — запросы действий → контроллеры
/// 3. advance_actions — продвижение фаз, mid/end callbacks
/// 4. resolve_attacks — арбитраж исходов, жизни, смерти
/// 5. tick_flourish_timers — отложенные dance
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ActionTrigger>()
            .add_event::<AttackLanded>()
            .add_event::<AnimationCue>()
            .add_event::<HudUpdate>()
            .add_event::<CountdownTick>();

        // Общие ресурсы матча
        app.init_resource::<MatchState>()
            .init_resource::<AttackScheduler>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                scheduler::drive_monster_attacks,
                controller::apply_action_triggers,
                controller::advance_actions,
                arbiter::resolve_attacks,
                arbiter::tick_flourish_timers,
            )
                .chain() // Последовательное выполнение
                .in_set(SimulationSet::Combat),
        );
    }
}
