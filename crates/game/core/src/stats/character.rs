//! Character stat record.
//!
//! A `CharacterStat` is an additive value object: layers (level base, weapon,
//! scrolls) are summed field by field and the result is clamped against the
//! global maximum record.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

/// The combat-relevant attributes of a character.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterStat {
    pub max_hp: f32,
    pub attack: f32,
    pub attack_range: f32,
    pub attack_speed: f32,
    pub movement_speed: f32,
}

impl CharacterStat {
    pub const ZERO: Self = Self {
        max_hp: 0.0,
        attack: 0.0,
        attack_range: 0.0,
        attack_speed: 0.0,
        movement_speed: 0.0,
    };

    pub const fn new(
        max_hp: f32,
        attack: f32,
        attack_range: f32,
        attack_speed: f32,
        movement_speed: f32,
    ) -> Self {
        Self {
            max_hp,
            attack,
            attack_range,
            attack_speed,
            movement_speed,
        }
    }

    /// Record with only `max_hp` set.
    pub const fn with_max_hp(max_hp: f32) -> Self {
        Self {
            max_hp,
            ..Self::ZERO
        }
    }

    /// Caps every field at the matching field of `max`.
    ///
    /// Only the upper bound is enforced; negative layers are kept as-is.
    #[must_use]
    pub fn clamp_to(self, max: &Self) -> Self {
        Self {
            max_hp: self.max_hp.min(max.max_hp),
            attack: self.attack.min(max.attack),
            attack_range: self.attack_range.min(max.attack_range),
            attack_speed: self.attack_speed.min(max.attack_speed),
            movement_speed: self.movement_speed.min(max.movement_speed),
        }
    }

    /// Returns true if no field exceeds the matching field of `max`.
    pub fn within(&self, max: &Self) -> bool {
        self.max_hp <= max.max_hp
            && self.attack <= max.attack
            && self.attack_range <= max.attack_range
            && self.attack_speed <= max.attack_speed
            && self.movement_speed <= max.movement_speed
    }
}

impl Add for CharacterStat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            max_hp: self.max_hp + rhs.max_hp,
            attack: self.attack + rhs.attack,
            attack_range: self.attack_range + rhs.attack_range,
            attack_speed: self.attack_speed + rhs.attack_speed,
            movement_speed: self.movement_speed + rhs.movement_speed,
        }
    }
}

impl AddAssign for CharacterStat {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<'a> Sum<&'a CharacterStat> for CharacterStat {
    fn sum<I: Iterator<Item = &'a CharacterStat>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, stat| acc + *stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_is_field_wise() {
        let a = CharacterStat::new(100.0, 10.0, 40.0, 1.0, 500.0);
        let b = CharacterStat::new(20.0, 5.0, 0.0, 0.5, 0.0);
        assert_eq!(a + b, CharacterStat::new(120.0, 15.0, 40.0, 1.5, 500.0));
    }

    #[test]
    fn clamp_caps_each_field_independently() {
        let max = CharacterStat::new(500.0, 50.0, 100.0, 3.0, 800.0);
        let over = CharacterStat::new(900.0, 10.0, 150.0, 2.0, 1000.0);

        let clamped = over.clamp_to(&max);

        assert_eq!(clamped, CharacterStat::new(500.0, 10.0, 100.0, 2.0, 800.0));
        assert!(clamped.within(&max));
        assert!(!over.within(&max));
    }

    #[test]
    fn sum_of_layers() {
        let layers = [
            CharacterStat::with_max_hp(10.0),
            CharacterStat::with_max_hp(15.0),
        ];
        let total: CharacterStat = layers.iter().sum();
        assert_eq!(total.max_hp, 25.0);
    }
}
