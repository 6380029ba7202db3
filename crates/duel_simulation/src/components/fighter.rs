//! Идентичность бойца
//!
//! Ровно два entity на матч: Hero и Monster. Spawn один раз после загрузки
//! ассетов, despawn только при завершении процесса.

use bevy::prelude::*;

/// Боец — identity component (hero или monster)
///
/// Определяет набор действий (hero имеет dodge/react, monster — нет)
/// и маппинг HUD-сообщений при потере жизни.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum Fighter {
    Hero,
    Monster,
}

impl Fighter {
    /// Противник в дуэли (ровно два участника)
    pub fn opponent(self) -> Self {
        match self {
            Fighter::Hero => Fighter::Monster,
            Fighter::Monster => Fighter::Hero,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Fighter::Hero => "hero",
            Fighter::Monster => "monster",
        }
    }
}
