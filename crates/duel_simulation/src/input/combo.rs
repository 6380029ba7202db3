//! ComboBuffer — скрытый матчер направленной последовательности
//!
//! Секретная последовательность: U, U, D, D, L, R, L.
//! Incremental matcher: храним длину совпавшего префикса. Символ, не
//! продолжающий префикс, сбрасывает буфер (и сразу начинает новый
//! префикс, если совпадает с головой последовательности — KMP-фолбэк
//! тут избыточен). Полное совпадение — one-shot, буфер немедленно
//! очищается.

use bevy::prelude::*;

/// Направленный символ команды игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DirectionTag {
    Up,
    Down,
    Left,
    Right,
}

/// Секретная последовательность (U,U,D,D,L,R,L)
pub const SECRET_SEQUENCE: [DirectionTag; 7] = [
    DirectionTag::Up,
    DirectionTag::Up,
    DirectionTag::Down,
    DirectionTag::Down,
    DirectionTag::Left,
    DirectionTag::Right,
    DirectionTag::Left,
];

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ComboBuffer {
    matched: usize,
}

impl ComboBuffer {
    /// Скормить символ. true — последовательность завершена
    /// (one-shot: буфер уже очищен).
    pub fn push(&mut self, symbol: DirectionTag) -> bool {
        if symbol == SECRET_SEQUENCE[self.matched] {
            self.matched += 1;
        } else if symbol == SECRET_SEQUENCE[0] {
            self.matched = 1;
        } else {
            self.matched = 0;
        }

        if self.matched == SECRET_SEQUENCE.len() {
            self.matched = 0;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.matched = 0;
    }

    pub fn matched_len(&self) -> usize {
        self.matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DirectionTag::*;

    fn feed(buffer: &mut ComboBuffer, symbols: &[DirectionTag]) -> bool {
        let mut unlocked = false;
        for &symbol in symbols {
            unlocked = buffer.push(symbol);
        }
        unlocked
    }

    #[test]
    fn test_full_sequence_unlocks() {
        let mut buffer = ComboBuffer::default();
        assert!(feed(&mut buffer, &SECRET_SEQUENCE));
        // one-shot: буфер очищен
        assert_eq!(buffer.matched_len(), 0);
    }

    #[test]
    fn test_wrong_symbol_resets() {
        let mut buffer = ComboBuffer::default();
        feed(&mut buffer, &[Up, Up, Down]);
        assert_eq!(buffer.matched_len(), 3);

        // R не продолжает U,U,D — сброс в пустой буфер
        buffer.push(Right);
        assert_eq!(buffer.matched_len(), 0);
    }

    #[test]
    fn test_reset_restarts_at_head() {
        let mut buffer = ComboBuffer::default();
        feed(&mut buffer, &[Up, Up, Down, Down, Left, Right]);
        assert_eq!(buffer.matched_len(), 6);

        // U вместо финального L: сброс, но U — голова новой попытки
        buffer.push(Up);
        assert_eq!(buffer.matched_len(), 1);

        // и с этой попытки последовательность достижима
        assert!(feed(&mut buffer, &[Up, Down, Down, Left, Right, Left]));
    }

    #[test]
    fn test_prefix_noise_before_sequence() {
        let mut buffer = ComboBuffer::default();
        assert!(!feed(&mut buffer, &[Left, Down, Right]));
        assert_eq!(buffer.matched_len(), 0);

        assert!(feed(&mut buffer, &SECRET_SEQUENCE));
    }

    #[test]
    fn test_clear() {
        let mut buffer = ComboBuffer::default();
        feed(&mut buffer, &[Up, Up]);
        buffer.clear();
        assert_eq!(buffer.matched_len(), 0);
    }
}
