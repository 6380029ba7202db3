//! DUEL Simulation Core
//!
//! Headless ECS-симуляция дуэли hero vs monster (strategic layer):
//! боевые state machines, тайминг-координация, арбитраж исходов.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (фазы бойцов, жизни, таймеры, правила)
//! - Renderer = tactical layer (animation mixing, HUD, DOM) — общается
//!   с core только через события (AnimationCue, HudUpdate, RawInput)

use bevy::prelude::*;

// Публичные модули
pub mod actions;
pub mod combat;
pub mod components;
pub mod cues;
pub mod hud;
pub mod input;

// Re-export базовых типов для удобства
pub use actions::{ActionCatalog, ActionKind, ActionSpec, CatalogError, ClipMeta, LoopPolicy};
pub use combat::{
    ActionTrigger, ActorPhase, AttackLanded, AttackScheduler, CombatController, CombatPlugin,
    FlourishTimer, MatchPhase, MatchState, ATTACK_PERIOD, DEFAULT_HERO_LIVES,
    DEFAULT_MONSTER_LIVES, SECRET_DANCE_DELAY, VICTORY_DANCE_DELAY,
};
pub use components::{ActionClock, Fighter};
pub use cues::AnimationCue;
pub use hud::{CountdownTick, HudMessage, HudUpdate, SecretUnlocked};
pub use input::{
    ArrowKey, ClickState, ComboBuffer, CommandKind, DirectionTag, InputPlugin, PlayerCommand,
    RawInput, CLICK_WINDOW, SECRET_SEQUENCE,
};

/// Частота fixed timestep симуляции (Hz)
pub const SIMULATION_HZ: f64 = 60.0;

/// Порядок подсистем внутри FixedUpdate: ввод до боевой логики,
/// чтобы команда игрока попадала в контроллер на том же тике.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Combat,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Input, SimulationSet::Combat).chain(),
            )
            // Подсистемы (ECS strategic layer)
            .add_plugins((InputPlugin, CombatPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

    app
}

/// Spawn бойца с каталогом из clip metadata asset-loading collaborator'а.
///
/// Отсутствующий обязательный клип отклоняет инициализацию (fail fast).
pub fn spawn_fighter(
    world: &mut World,
    fighter: Fighter,
    clips: &[ClipMeta],
) -> Result<Entity, CatalogError> {
    let catalog = ActionCatalog::from_clips(fighter, clips)?;
    Ok(world
        .spawn((
            fighter,
            CombatController::default(),
            ActionClock::default(),
            catalog,
        ))
        .id())
}

/// Spawn стандартной пары hero/monster (headless запуски и тесты:
/// stand-in длительности клипов вместо реальных ассетов)
pub fn spawn_default_duel(world: &mut World) -> (Entity, Entity) {
    let hero = world
        .spawn((
            Fighter::Hero,
            CombatController::default(),
            ActionClock::default(),
            ActionCatalog::defaults(Fighter::Hero),
        ))
        .id();
    let monster = world
        .spawn((
            Fighter::Monster,
            CombatController::default(),
            ActionClock::default(),
            ActionCatalog::defaults(Fighter::Monster),
        ))
        .id();

    (hero, monster)
}

// ============================================================================
// Logger (pluggable: host решает, куда писать)
// ============================================================================

use once_cell::sync::Lazy;
use std::sync::Mutex;

// Потокобезопасный глобальный logger
static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *LOGGER.lock().unwrap() = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    *LOGGER_LEVEL.lock().unwrap() = level;
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    if LOGGER.lock().unwrap().is_none() {
        set_logger(logger);
    }
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    // Timestamp добавляем здесь, не в printer'е
    if *LOGGER_LEVEL.lock().unwrap() > level {
        return;
    }
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
