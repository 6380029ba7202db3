//! ActionClock — per-fighter таймер текущего действия
//!
//! Конвертирует fixed-tick дельты в elapsed/normalized время анимации.
//! Все mid-action и end-of-action "callbacks" контроллера выводятся из
//! этого clock (re-validated on fire, без cancellation примитивов).

use bevy::prelude::*;

/// Elapsed time текущего действия бойца (секунды).
///
/// Сбрасывается в 0 при старте каждого действия. Пока боец Idle или Dead,
/// clock не продвигается.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ActionClock {
    pub elapsed: f32,
}

impl ActionClock {
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Продвинуть clock на delta. Возвращает elapsed до продвижения
    /// (нужен для crossing-проверок).
    pub fn advance(&mut self, delta: f32) -> f32 {
        let prev = self.elapsed;
        self.elapsed += delta;
        prev
    }

    /// Normalized время действия: elapsed / duration, clamped в [0, 1]
    pub fn normalized(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / duration).clamp(0.0, 1.0)
    }

    /// Пересекли ли мы отметку `fraction × duration` на этом тике?
    ///
    /// `prev` — elapsed до продвижения. Строго "<" слева и ">=" справа,
    /// чтобы отметка сработала ровно один раз.
    pub fn crossed(&self, prev: f32, duration: f32, fraction: f32) -> bool {
        let mark = duration * fraction;
        prev < mark && self.elapsed >= mark
    }

    /// Действие доиграло полную длительность?
    pub fn finished(&self, duration: f32) -> bool {
        self.elapsed >= duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossed_fires_once() {
        let mut clock = ActionClock::default();

        // duration 1.0, mid at 0.5
        let prev = clock.advance(0.4);
        assert!(!clock.crossed(prev, 1.0, 0.5));

        let prev = clock.advance(0.2); // 0.4 → 0.6, пересекли 0.5
        assert!(clock.crossed(prev, 1.0, 0.5));

        let prev = clock.advance(0.2); // 0.6 → 0.8, уже за отметкой
        assert!(!clock.crossed(prev, 1.0, 0.5));
    }

    #[test]
    fn test_crossed_exact_hit() {
        let mut clock = ActionClock::default();
        let prev = clock.advance(0.5); // ровно на отметку
        assert!(clock.crossed(prev, 1.0, 0.5));
    }

    #[test]
    fn test_finished_and_normalized() {
        let mut clock = ActionClock::default();
        clock.advance(0.75);
        assert!(!clock.finished(1.0));
        assert_eq!(clock.normalized(1.0), 0.75);

        clock.advance(0.5);
        assert!(clock.finished(1.0));
        assert_eq!(clock.normalized(1.0), 1.0); // clamped

        clock.reset();
        assert_eq!(clock.elapsed, 0.0);
    }

    #[test]
    fn test_mid_and_end_same_tick() {
        // Крупная delta: mid и конец действия в одном тике,
        // mid всё равно регистрируется (хронологический порядок сохранён)
        let mut clock = ActionClock::default();
        let prev = clock.advance(2.0);
        assert!(clock.crossed(prev, 1.0, 0.5));
        assert!(clock.finished(1.0));
    }
}
