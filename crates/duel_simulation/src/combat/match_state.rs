//! MatchState — жизни и фаза матча
//!
//! Явный resource вместо module-level счётчиков и loose booleans.
//! Single-writer discipline: жизни мутирует только арбитр
//! (resolve_attacks); секретный путь выполняет единственный
//! санкционированный override фазы без изменения жизней.

use bevy::prelude::*;

use crate::components::Fighter;

pub const DEFAULT_HERO_LIVES: u32 = 5;
pub const DEFAULT_MONSTER_LIVES: u32 = 8;

/// Фаза матча. Over — terminal: жизни после него не мутируются,
/// доигрываются только in-flight эффекты (death animation, dance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum MatchPhase {
    Active,
    Over,
}

/// Общее состояние матча, читают все подсистемы
#[derive(Resource, Debug, Clone, Reflect)]
pub struct MatchState {
    pub hero_lives: u32,
    pub monster_lives: u32,
    pub phase: MatchPhase,
    /// Флаг "матч начался" от HUD collaborator'а.
    /// Scheduler и input router не работают, пока он не поднят.
    pub started: bool,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(DEFAULT_HERO_LIVES, DEFAULT_MONSTER_LIVES)
    }
}

impl MatchState {
    pub fn new(hero_lives: u32, monster_lives: u32) -> Self {
        Self {
            hero_lives,
            monster_lives,
            phase: MatchPhase::Active,
            started: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == MatchPhase::Active
    }

    /// Матч идёт: стартовый флаг поднят и фаза Active
    pub fn is_running(&self) -> bool {
        self.started && self.is_active()
    }

    pub fn lives(&self, fighter: Fighter) -> u32 {
        match fighter {
            Fighter::Hero => self.hero_lives,
            Fighter::Monster => self.monster_lives,
        }
    }

    /// Снять одну жизнь (saturating). Возвращает остаток.
    /// Вызывается только арбитром и только пока фаза Active.
    pub fn lose_life(&mut self, fighter: Fighter) -> u32 {
        let lives = match fighter {
            Fighter::Hero => &mut self.hero_lives,
            Fighter::Monster => &mut self.monster_lives,
        };
        *lives = lives.saturating_sub(1);
        *lives
    }

    /// Перевести матч в Over (terminal, повторный вызов — no-op)
    pub fn finish(&mut self) {
        self.phase = MatchPhase::Over;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lose_life_saturates() {
        let mut state = MatchState::new(1, 1);
        assert_eq!(state.lose_life(Fighter::Hero), 0);
        assert_eq!(state.lose_life(Fighter::Hero), 0); // не уходит ниже нуля
        assert_eq!(state.hero_lives, 0);
        assert_eq!(state.monster_lives, 1);
    }

    #[test]
    fn test_running_requires_started_and_active() {
        let mut state = MatchState::default();
        assert!(!state.is_running()); // не стартовал

        state.started = true;
        assert!(state.is_running());

        state.finish();
        assert!(!state.is_running());
        assert!(!state.is_active());
    }
}
