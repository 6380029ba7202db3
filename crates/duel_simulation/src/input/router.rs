//! InputRouter — нормализация сырого ввода в команды игрока
//!
//! Пять сырых каналов → две логические команды:
//! - одиночный клик → Punch после 300ms (debounce-окно двойного клика)
//! - двойной клик в окне → отмена ожидающего Punch, вместо него Dodge
//! - стрелки: Up → Punch(U), Down → Dodge(D), Left → Dodge(L),
//!   Right → Punch(R)
//! - swipe: доминирующая ось; горизонталь влево → Dodge(L), вправо →
//!   Punch(R); вертикаль вверх → Punch(U), вниз → Dodge(D)
//!
//! Команды форвардятся только пока матч идёт. Каждая направленная
//! команда перед форвардом кормит ComboBuffer; полное совпадение
//! подавляет команду и запускает секретный путь.

use bevy::prelude::*;

use crate::actions::ActionKind;
use crate::combat::controller::{ActionTrigger, CombatController};
use crate::combat::match_state::MatchState;
use crate::combat::{FlourishTimer, SECRET_DANCE_DELAY};
use crate::components::Fighter;
use crate::hud::{HudMessage, HudUpdate, SecretUnlocked};
use crate::input::combo::{ComboBuffer, DirectionTag};

/// Debounce-окно одиночного клика (секунды)
pub const CLICK_WINDOW: f32 = 0.3;

// ============================================================================
// Events
// ============================================================================

/// Сырое событие ввода от платформенного слоя (browser/window bridge).
///
/// Swipe — в экранных координатах: dx > 0 вправо, dy > 0 вниз.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    Click,
    Key(ArrowKey),
    Swipe { dx: f32, dy: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// Логическая команда игрока
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerCommand {
    pub kind: CommandKind,
    pub direction: Option<DirectionTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Punch,
    Dodge,
}

impl PlayerCommand {
    pub fn punch(direction: Option<DirectionTag>) -> Self {
        Self {
            kind: CommandKind::Punch,
            direction,
        }
    }

    pub fn dodge(direction: Option<DirectionTag>) -> Self {
        Self {
            kind: CommandKind::Dodge,
            direction,
        }
    }
}

/// Ожидающий одиночный клик (debounce двойного клика)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ClickState {
    /// Оставшееся время окна; None — окно не открыто
    pub pending: Option<f32>,
}

// ============================================================================
// Systems
// ============================================================================

fn key_command(key: ArrowKey) -> PlayerCommand {
    match key {
        ArrowKey::Up => PlayerCommand::punch(Some(DirectionTag::Up)),
        ArrowKey::Down => PlayerCommand::dodge(Some(DirectionTag::Down)),
        ArrowKey::Left => PlayerCommand::dodge(Some(DirectionTag::Left)),
        ArrowKey::Right => PlayerCommand::punch(Some(DirectionTag::Right)),
    }
}

/// Доминирующая ось swipe → команда. Нулевой жест игнорируется.
fn swipe_command(dx: f32, dy: f32) -> Option<PlayerCommand> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    if dx.abs() >= dy.abs() {
        if dx < 0.0 {
            Some(PlayerCommand::dodge(Some(DirectionTag::Left)))
        } else {
            Some(PlayerCommand::punch(Some(DirectionTag::Right)))
        }
    } else if dy < 0.0 {
        Some(PlayerCommand::punch(Some(DirectionTag::Up)))
    } else {
        Some(PlayerCommand::dodge(Some(DirectionTag::Down)))
    }
}

/// System: сырые события → PlayerCommand.
///
/// Клик не уходит сразу: открывается 300ms окно; второй клик в окне
/// отменяет ожидающий Punch и выдаёт ровно один Dodge.
pub fn route_raw_inputs(
    mut raw: EventReader<RawInput>,
    mut clicks: ResMut<ClickState>,
    match_state: Res<MatchState>,
    mut out: EventWriter<PlayerCommand>,
) {
    if !match_state.is_running() {
        // Ввод вне матча сбрасывается, не копится
        clicks.pending = None;
        raw.clear();
        return;
    }

    for event in raw.read() {
        match *event {
            RawInput::Click => {
                if clicks.pending.is_some() {
                    // Двойной клик: ожидающий Punch отменён
                    clicks.pending = None;
                    out.write(PlayerCommand::dodge(None));
                    crate::log("🖱️ Double click → dodge");
                } else {
                    clicks.pending = Some(CLICK_WINDOW);
                }
            }
            RawInput::Key(key) => {
                out.write(key_command(key));
            }
            RawInput::Swipe { dx, dy } => {
                if let Some(command) = swipe_command(dx, dy) {
                    out.write(command);
                }
            }
        }
    }
}

/// System: тикнуть debounce-окно; по истечении — подтверждённый
/// одиночный клик уходит как Punch.
pub fn tick_click_state(
    mut clicks: ResMut<ClickState>,
    time: Res<Time<Fixed>>,
    mut out: EventWriter<PlayerCommand>,
) {
    let Some(remaining) = clicks.pending.as_mut() else {
        return;
    };

    *remaining -= time.delta_secs();
    if *remaining <= 0.0 {
        clicks.pending = None;
        out.write(PlayerCommand::punch(None));
        crate::log("🖱️ Single click → punch");
    }
}

/// System: PlayerCommand → ComboBuffer → контроллер hero.
///
/// Комбо кормится только направленными командами и только пока hero
/// Idle (символ поверх играющего действия игнорируется, не сбрасывает).
/// Завершённое комбо подавляет команду и выполняет единственный
/// санкционированный override фазы матча.
pub fn dispatch_player_commands(
    mut player_commands: EventReader<PlayerCommand>,
    mut combo: ResMut<ComboBuffer>,
    mut match_state: ResMut<MatchState>,
    fighters: Query<(Entity, &Fighter, &CombatController)>,
    mut triggers: EventWriter<ActionTrigger>,
    mut secret: EventWriter<SecretUnlocked>,
    mut hud: EventWriter<HudUpdate>,
    mut commands: Commands,
) {
    for command in player_commands.read() {
        if !match_state.is_running() {
            continue;
        }

        let hero_idle = fighters
            .iter()
            .any(|(_, fighter, controller)| *fighter == Fighter::Hero && controller.is_idle());

        if let Some(direction) = command.direction {
            if hero_idle && combo.push(direction) {
                // Easter egg: матч завершается без изменения жизней,
                // оба бойца танцуют после фиксированной задержки
                match_state.finish();
                secret.write(SecretUnlocked);
                hud.write(HudUpdate {
                    hero_lives: match_state.hero_lives,
                    monster_lives: match_state.monster_lives,
                    message: HudMessage::SecretUnlocked,
                });

                for (entity, _, controller) in fighters.iter() {
                    if !controller.is_dead() {
                        commands
                            .entity(entity)
                            .insert(FlourishTimer::new(SECRET_DANCE_DELAY));
                    }
                }

                crate::log("🎉 Secret combo unlocked!");
                continue; // нормальное действие подавлено
            }
        }

        let action = match command.kind {
            CommandKind::Punch => ActionKind::Punch,
            CommandKind::Dodge => ActionKind::Dodge,
        };
        triggers.write(ActionTrigger {
            fighter: Fighter::Hero,
            action,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            key_command(ArrowKey::Up),
            PlayerCommand::punch(Some(DirectionTag::Up))
        );
        assert_eq!(
            key_command(ArrowKey::Down),
            PlayerCommand::dodge(Some(DirectionTag::Down))
        );
        assert_eq!(
            key_command(ArrowKey::Left),
            PlayerCommand::dodge(Some(DirectionTag::Left))
        );
        assert_eq!(
            key_command(ArrowKey::Right),
            PlayerCommand::punch(Some(DirectionTag::Right))
        );
    }

    #[test]
    fn test_swipe_dominant_axis() {
        // Горизонталь доминирует
        assert_eq!(
            swipe_command(-10.0, 3.0),
            Some(PlayerCommand::dodge(Some(DirectionTag::Left)))
        );
        assert_eq!(
            swipe_command(10.0, -3.0),
            Some(PlayerCommand::punch(Some(DirectionTag::Right)))
        );

        // Вертикаль доминирует (экранные координаты: dy < 0 — вверх)
        assert_eq!(
            swipe_command(2.0, -9.0),
            Some(PlayerCommand::punch(Some(DirectionTag::Up)))
        );
        assert_eq!(
            swipe_command(-2.0, 9.0),
            Some(PlayerCommand::dodge(Some(DirectionTag::Down)))
        );

        // Нулевой жест игнорируется
        assert_eq!(swipe_command(0.0, 0.0), None);
    }
}
