//! Input module: нормализация ввода + секретное комбо
//!
//! Сырые события (клики, стрелки, свайпы) приходят от платформенного
//! слоя как RawInput; на выходе — ActionTrigger для hero контроллера.

use bevy::prelude::*;

pub mod combo;
pub mod router;

pub use combo::{ComboBuffer, DirectionTag, SECRET_SEQUENCE};
pub use router::{
    ArrowKey, ClickState, CommandKind, PlayerCommand, RawInput, CLICK_WINDOW,
};

use crate::hud::SecretUnlocked;
use crate::SimulationSet;

/// Input Plugin
///
/// Порядок выполнения (до combat-систем):
/// 1. route_raw_inputs — RawInput → PlayerCommand, debounce кликов
/// 2. tick_click_state — истечение окна → подтверждённый Punch
/// 3. dispatch_player_commands — комбо + форвард в контроллер hero
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RawInput>()
            .add_event::<PlayerCommand>()
            .add_event::<SecretUnlocked>();

        app.init_resource::<ClickState>()
            .init_resource::<ComboBuffer>();

        app.add_systems(
            FixedUpdate,
            (
                router::route_raw_inputs,
                router::tick_click_state,
                router::dispatch_player_commands,
            )
                .chain()
                .in_set(SimulationSet::Input),
        );
    }
}
