//! Action catalog: клипы, длительности, fade тайминги
//!
//! ECS ответственность:
//! - ActionSpec: duration (authoritative для всех таймеров), loop policy,
//!   fade-in/fade-out, mid-impact fraction
//! - ActionCatalog: per-fighter набор действий, validated at load
//!
//! Renderer ответственность:
//! - Animation mixing, cross-fades, clamping по AnimationCue событиям
//!
//! Duration приходит из clip metadata asset-loading collaborator'а
//! (GLTF clip length). Fade/fraction таблица фиксирована дизайном.
//! Отсутствие обязательного клипа — fatal на старте (fail fast),
//! не в момент проигрывания.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Fighter;

/// Виды действий бойца.
///
/// Не каждый боец имеет все действия: dodge/react есть только у hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ActionKind {
    Idle,
    Punch,
    Dodge,
    React,
    Die,
    Dance,
}

impl ActionKind {
    /// Имя клипа в ассете (GLTF animation name)
    pub fn clip_name(self) -> &'static str {
        match self {
            ActionKind::Idle => "idle",
            ActionKind::Punch => "punch",
            ActionKind::Dodge => "dodge",
            ActionKind::React => "react",
            ActionKind::Die => "die",
            ActionKind::Dance => "dance",
        }
    }

    /// Attack-действия резолвятся арбитром в mid-точке
    pub fn is_attack(self) -> bool {
        matches!(self, ActionKind::Punch)
    }
}

/// Loop policy клипа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LoopPolicy {
    /// Проигрывается один раз, затем возврат в idle (или clamp для die)
    Once,
    /// Зацикленный (idle, dance)
    Repeat,
}

/// Спецификация действия. Immutable после загрузки каталога.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct ActionSpec {
    pub kind: ActionKind,
    /// Длительность клипа (секунды) — authoritative для всех таймеров
    pub duration: f32,
    pub looping: LoopPolicy,
    /// Cross-fade при входе в действие
    pub fade_in: f32,
    /// Cross-fade при возврате в idle (0.0 для clamped действий)
    pub fade_out: f32,
    /// Точка удара как доля duration. Some только для attack-действий —
    /// у dodge/react mid-эффекта нет.
    pub mid_fraction: Option<f32>,
}

/// Метаданные клипа от asset-loading collaborator'а
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipMeta {
    pub name: String,
    /// Длительность клипа в секундах
    pub duration: f32,
}

impl ClipMeta {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Ошибки валидации каталога — fatal на старте, retry не предусмотрен
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{fighter:?}: missing required clip `{clip}`")]
    MissingClip { fighter: Fighter, clip: &'static str },

    #[error("{fighter:?}: clip `{clip}` has non-positive duration {duration}")]
    BadDuration {
        fighter: Fighter,
        clip: &'static str,
        duration: f32,
    },
}

/// Per-fighter каталог действий.
///
/// Explicit tagged enum вместо duck-typed lookup по строке: состав действий
/// проверяется при построении каталога, не в момент `trigger`.
#[derive(Component, Debug, Clone)]
pub struct ActionCatalog {
    fighter: Fighter,
    specs: HashMap<ActionKind, ActionSpec>,
}

impl ActionCatalog {
    /// Обязательные действия для каждого бойца.
    ///
    /// У monster нет dodge и react — он не уклоняется и не играет
    /// реакцию на удар (но жизни теряет).
    pub fn required(fighter: Fighter) -> &'static [ActionKind] {
        match fighter {
            Fighter::Hero => &[
                ActionKind::Idle,
                ActionKind::Punch,
                ActionKind::Dodge,
                ActionKind::React,
                ActionKind::Die,
                ActionKind::Dance,
            ],
            Fighter::Monster => &[
                ActionKind::Idle,
                ActionKind::Punch,
                ActionKind::Die,
                ActionKind::Dance,
            ],
        }
    }

    /// Построить каталог из clip metadata. Fail fast: отсутствующий клип
    /// или нулевая длительность отклоняют инициализацию.
    pub fn from_clips(fighter: Fighter, clips: &[ClipMeta]) -> Result<Self, CatalogError> {
        let mut specs = HashMap::new();

        for &kind in Self::required(fighter) {
            let clip_name = kind.clip_name();
            let clip = clips
                .iter()
                .find(|c| c.name == clip_name)
                .ok_or(CatalogError::MissingClip {
                    fighter,
                    clip: clip_name,
                })?;

            if clip.duration <= 0.0 {
                return Err(CatalogError::BadDuration {
                    fighter,
                    clip: clip_name,
                    duration: clip.duration,
                });
            }

            specs.insert(kind, build_spec(fighter, kind, clip.duration));
        }

        Ok(Self { fighter, specs })
    }

    /// Дефолтный каталог для headless запусков (длительности — stand-in
    /// значения вместо реальных GLTF клипов). Infallible: состав статичен.
    pub fn defaults(fighter: Fighter) -> Self {
        let specs = Self::required(fighter)
            .iter()
            .map(|&kind| {
                (
                    kind,
                    build_spec(fighter, kind, default_duration(fighter, kind)),
                )
            })
            .collect();

        Self { fighter, specs }
    }

    pub fn fighter(&self) -> Fighter {
        self.fighter
    }

    pub fn spec(&self, kind: ActionKind) -> Option<&ActionSpec> {
        self.specs.get(&kind)
    }

    pub fn has(&self, kind: ActionKind) -> bool {
        self.specs.contains_key(&kind)
    }
}

/// Фиксированная fade/fraction таблица (дизайн, не ассет):
///
/// | Действие      | Mid | Fade-in | Fade-out |
/// |---------------|-----|---------|----------|
/// | hero punch    | 0.5 | 0.25    | 0.15     |
/// | hero dodge    | —   | 0.5     | 0.25     |
/// | hero react    | —   | 0.25    | 0.1      |
/// | hero die      | —   | 1.0     | clamped  |
/// | monster punch | 0.5 | 0.5     | 0.25     |
/// | monster die   | —   | 0.5     | clamped  |
/// | dance (оба)   | —   | 0.5     | —        |
fn build_spec(fighter: Fighter, kind: ActionKind, duration: f32) -> ActionSpec {
    let (fade_in, fade_out, mid_fraction, looping) = match (fighter, kind) {
        (_, ActionKind::Idle) => (0.0, 0.0, None, LoopPolicy::Repeat),
        (Fighter::Hero, ActionKind::Punch) => (0.25, 0.15, Some(0.5), LoopPolicy::Once),
        (Fighter::Hero, ActionKind::Dodge) => (0.5, 0.25, None, LoopPolicy::Once),
        (Fighter::Hero, ActionKind::React) => (0.25, 0.1, None, LoopPolicy::Once),
        (Fighter::Hero, ActionKind::Die) => (1.0, 0.0, None, LoopPolicy::Once),
        (Fighter::Monster, ActionKind::Punch) => (0.5, 0.25, Some(0.5), LoopPolicy::Once),
        (Fighter::Monster, ActionKind::Die) => (0.5, 0.0, None, LoopPolicy::Once),
        (_, ActionKind::Dance) => (0.5, 0.0, None, LoopPolicy::Repeat),
        // Monster dodge/react в каталог не попадают (required их не содержит)
        (Fighter::Monster, ActionKind::Dodge) => (0.5, 0.25, None, LoopPolicy::Once),
        (Fighter::Monster, ActionKind::React) => (0.25, 0.1, None, LoopPolicy::Once),
    };

    ActionSpec {
        kind,
        duration,
        looping,
        fade_in,
        fade_out,
        mid_fraction,
    }
}

/// Stand-in длительности для headless режима (секунды)
fn default_duration(fighter: Fighter, kind: ActionKind) -> f32 {
    match (fighter, kind) {
        (Fighter::Hero, ActionKind::Idle) => 2.0,
        (Fighter::Hero, ActionKind::Punch) => 0.8,
        (Fighter::Hero, ActionKind::Dodge) => 0.7,
        (Fighter::Hero, ActionKind::React) => 0.6,
        (Fighter::Hero, ActionKind::Die) => 1.2,
        (Fighter::Monster, ActionKind::Idle) => 2.2,
        (Fighter::Monster, ActionKind::Punch) => 1.0,
        (Fighter::Monster, ActionKind::Die) => 1.5,
        (_, ActionKind::Dance) => 2.4,
        // unreachable для валидных каталогов
        _ => 1.0,
    }
}
