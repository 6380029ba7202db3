//! Animation cues — контракт с render collaborator'ом
//!
//! ECS (strategic layer) решает ЧТО играть, renderer (tactical layer)
//! владеет mixer'ами и КАК это смешивать. Core никогда не опрашивает
//! renderer обратно: single source of truth для фаз — CombatController,
//! а не "is this animation running" запросы.

use bevy::prelude::*;

use crate::actions::ActionKind;
use crate::components::Fighter;

/// Команда рендеру. Генерируется контроллерами/арбитром,
/// потребляется render bridge'ем раз в кадр.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AnimationCue {
    /// Blended переход между двумя клипами за fade_secs (warp включён)
    CrossFade {
        fighter: Fighter,
        from: ActionKind,
        to: ActionKind,
        fade_secs: f32,
    },

    /// Зажать клип на последнем кадре (мёртвая поза после die)
    Clamp { fighter: Fighter, action: ActionKind },

    /// Опустить труп под землю (position принадлежит рендеру,
    /// core лишь сигнализирует момент)
    Sink { fighter: Fighter },
}
