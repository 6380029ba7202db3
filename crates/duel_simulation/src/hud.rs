//! HUD-facing события — контракт с DOM HUD collaborator'ом
//!
//! Core публикует жизни/сообщения/countdown, HUD их отображает.
//! Обратно HUD поднимает только флаг старта матча (MatchState.started).
//! События Serialize — bridge гонит их в DOM слой как есть.

use bevy::prelude::*;
use serde::Serialize;

/// Сообщение HUD при изменении исхода боя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HudMessage {
    HeroHurt,
    MonsterHurt,
    BothHurt,
    Dodged,
    HeroWins,
    MonsterWins,
    Draw,
    SecretUnlocked,
}

impl HudMessage {
    /// Текст для life-counter строки (message tags фиксированы дизайном)
    pub fn text(self) -> &'static str {
        match self {
            HudMessage::HeroHurt => "You're Hurt",
            HudMessage::MonsterHurt => "Monster Hurt",
            HudMessage::BothHurt => "Both Hurt",
            HudMessage::Dodged => "Dodged",
            HudMessage::HeroWins => "You Win!",
            HudMessage::MonsterWins => "Monster Wins!",
            HudMessage::Draw => "Draw!",
            HudMessage::SecretUnlocked => "Secret Unlocked!",
        }
    }
}

/// Обновление life-counters + сообщение
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudUpdate {
    pub hero_lives: u32,
    pub monster_lives: u32,
    pub message: HudMessage,
}

/// Countdown до следующей атаки монстра (3, 2, 1)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownTick {
    pub seconds_remaining: u8,
}

/// One-shot: easter egg найден. HUD скрывает life display
/// и показывает спец-сообщение.
#[derive(Event, Debug, Clone, Copy, Serialize)]
pub struct SecretUnlocked;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_tag_mapping() {
        // Точный маппинг message tags
        assert_eq!(HudMessage::HeroHurt.text(), "You're Hurt");
        assert_eq!(HudMessage::MonsterHurt.text(), "Monster Hurt");
        assert_eq!(HudMessage::BothHurt.text(), "Both Hurt");
        assert_eq!(HudMessage::Dodged.text(), "Dodged");
    }
}
