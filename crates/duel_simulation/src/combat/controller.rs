//! ActorCombatController — per-fighter state machine
//!
//! # Architecture
//!
//! **Phases:** `Idle → Acting(action) → Idle` (повторяемые действия),
//! `* → Dead` (terminal, после die).
//!
//! **Timing:** mid-action и end-of-action "callbacks" не планируются как
//! отложенные таймеры — они выводятся из ActionClock на каждом тике и
//! re-validated по текущей фазе. Callback, чья фаза уехала (смерть в
//! середине действия), становится no-op по построению, без cancellation
//! примитивов.
//!
//! # Invariants
//!
//! - Новое действие стартует только из Idle; trigger в Acting/Dead —
//!   silent no-op (команда не ставится в очередь).
//! - Ровно один mid и один end на каждую Acting-фазу, оба от одной
//!   ActionSpec.duration; mid всегда хронологически раньше end.

use bevy::prelude::*;

use crate::actions::{ActionCatalog, ActionKind, ActionSpec, LoopPolicy};
use crate::components::{ActionClock, Fighter};
use crate::cues::AnimationCue;

// ============================================================================
// Components
// ============================================================================

/// Фаза бойца — single source of truth вместо loose booleans
/// (`heroIdle`, `monsterIdle`) и опросов "какая анимация играет".
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ActorPhase {
    /// Ничего не играет кроме idle-цикла
    Idle,

    /// Действие проигрывается. `mid_fired` гарантирует one-shot
    /// mid-callback.
    Acting { action: ActionKind, mid_fired: bool },

    /// Locked(Dead): trigger — перманентный no-op
    Dead,
}

/// Контроллер боевого автомата бойца
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CombatController {
    pub phase: ActorPhase,
}

impl Default for CombatController {
    fn default() -> Self {
        Self {
            phase: ActorPhase::Idle,
        }
    }
}

/// Результат одного тика Acting-фазы
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// Attack-действие пересекло mid-точку на этом тике
    pub attack_landed: bool,
    /// Действие доиграло и боец вернулся в Idle
    pub finished: Option<ActionFinished>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionFinished {
    pub action: ActionKind,
    pub fade_out: f32,
}

impl CombatController {
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, ActorPhase::Idle)
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.phase, ActorPhase::Dead)
    }

    /// Текущее проигрываемое действие (None для Idle/Dead)
    pub fn current_action(&self) -> Option<ActionKind> {
        match self.phase {
            ActorPhase::Acting { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Играет ли сейчас конкретное действие (арбитр различает
    /// mid-punch и mid-dodge защитника)
    pub fn is_acting(&self, kind: ActionKind) -> bool {
        self.current_action() == Some(kind)
    }

    /// Начать действие. Только из Idle — иначе silent no-op (None).
    ///
    /// Возвращает cross-fade cue для рендера: из idle-цикла в действие
    /// за spec.fade_in.
    pub fn try_start(
        &mut self,
        fighter: Fighter,
        spec: &ActionSpec,
        clock: &mut ActionClock,
    ) -> Option<AnimationCue> {
        if !self.is_idle() {
            return None;
        }

        self.phase = ActorPhase::Acting {
            action: spec.kind,
            mid_fired: false,
        };
        clock.reset();

        Some(AnimationCue::CrossFade {
            fighter,
            from: ActionKind::Idle,
            to: spec.kind,
            fade_secs: spec.fade_in,
        })
    }

    /// Немедленная смерть: фаза перманентно Dead, cross-fade из того,
    /// что играло (idle или react), в предсмертную позу. Возврат в Idle
    /// не планируется — клип зажимается на последнем кадре.
    pub fn kill(
        &mut self,
        fighter: Fighter,
        die_spec: &ActionSpec,
        clock: &mut ActionClock,
    ) -> Option<AnimationCue> {
        if self.is_dead() {
            return None;
        }

        let from = self.current_action().unwrap_or(ActionKind::Idle);
        self.phase = ActorPhase::Dead;
        clock.reset();

        Some(AnimationCue::CrossFade {
            fighter,
            from,
            to: ActionKind::Die,
            fade_secs: die_spec.fade_in,
        })
    }

    /// Продвинуть Acting-фазу на delta.
    ///
    /// Precondition: `spec` — спецификация текущего действия.
    /// Mid-отметка (`mid_fraction × duration`) срабатывает ровно один раз;
    /// для attack-действий она превращается в AttackLanded. Once-действия
    /// по истечении duration возвращают бойца в Idle; Repeat (dance)
    /// не завершаются никогда.
    pub fn advance(
        &mut self,
        spec: &ActionSpec,
        clock: &mut ActionClock,
        delta: f32,
    ) -> TickOutcome {
        let ActorPhase::Acting { action, mid_fired } = self.phase else {
            return TickOutcome::default();
        };
        debug_assert_eq!(action, spec.kind);

        let prev = clock.advance(delta);
        let mut outcome = TickOutcome::default();

        if !mid_fired {
            if let Some(fraction) = spec.mid_fraction {
                if clock.crossed(prev, spec.duration, fraction) {
                    self.phase = ActorPhase::Acting {
                        action,
                        mid_fired: true,
                    };
                    outcome.attack_landed = action.is_attack();
                }
            }
        }

        if spec.looping == LoopPolicy::Once && clock.finished(spec.duration) {
            // die сюда не попадает: kill() переводит в Dead минуя Acting
            self.phase = ActorPhase::Idle;
            outcome.finished = Some(ActionFinished {
                action,
                fade_out: spec.fade_out,
            });
        }

        outcome
    }
}

// ============================================================================
// Events
// ============================================================================

/// Запрос действия (input router / attack scheduler → контроллер).
/// Отклонённый запрос (боец не Idle) — ожидаемый no-op, не ошибка.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActionTrigger {
    pub fighter: Fighter,
    pub action: ActionKind,
}

/// Атака достигла точки удара — арбитр резолвит исход
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackLanded {
    pub attacker: Fighter,
}

// ============================================================================
// Systems
// ============================================================================

/// System: применить ActionTrigger события к контроллерам.
///
/// Неизвестное для бойца действие (dodge у monster) — benign no-op,
/// как и trigger пока боец не Idle.
pub fn apply_action_triggers(
    mut triggers: EventReader<ActionTrigger>,
    mut fighters: Query<(&Fighter, &mut CombatController, &mut ActionClock, &ActionCatalog)>,
    mut cues: EventWriter<AnimationCue>,
) {
    for trigger in triggers.read() {
        for (fighter, mut controller, mut clock, catalog) in fighters.iter_mut() {
            if *fighter != trigger.fighter {
                continue;
            }

            let Some(spec) = catalog.spec(trigger.action) else {
                continue;
            };

            if let Some(cue) = controller.try_start(*fighter, spec, &mut clock) {
                cues.write(cue);
                crate::log(&format!(
                    "▶️ {} starts {:?} ({:.2}s)",
                    fighter.name(),
                    trigger.action,
                    spec.duration
                ));
            }
        }
    }
}

/// System: продвинуть все Acting-фазы на тик.
///
/// Генерирует AttackLanded в mid-точках и cross-fade cues при
/// возврате в Idle.
pub fn advance_actions(
    mut fighters: Query<(&Fighter, &mut CombatController, &mut ActionClock, &ActionCatalog)>,
    time: Res<Time<Fixed>>,
    mut landed: EventWriter<AttackLanded>,
    mut cues: EventWriter<AnimationCue>,
) {
    let delta = time.delta_secs();

    for (fighter, mut controller, mut clock, catalog) in fighters.iter_mut() {
        let Some(action) = controller.current_action() else {
            continue;
        };
        let Some(spec) = catalog.spec(action) else {
            continue;
        };

        let outcome = controller.advance(spec, &mut clock, delta);

        if outcome.attack_landed {
            landed.write(AttackLanded { attacker: *fighter });
            crate::log(&format!("⚔️ {} punch reached impact point", fighter.name()));
        }

        if let Some(finished) = outcome.finished {
            cues.write(AnimationCue::CrossFade {
                fighter: *fighter,
                from: finished.action,
                to: ActionKind::Idle,
                fade_secs: finished.fade_out,
            });
        }
    }
}
