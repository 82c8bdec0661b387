//! Per-character stat aggregation.
//!
//! ```text
//! [ base (level table) ] + [ weapon ] + Σ[ scrolls ]
//!                      ↓
//!            clamp field-wise to caps
//!                      ↓
//!                  total stat  →  current HP ∈ [0, total.max_hp]
//! ```
//!
//! Every mutation recomputes the total and notifies subscribers
//! synchronously.

use crate::env::{StatCapsOracle, StatTables};
use crate::error::GameError;
use crate::observer::{Observers, SubscriptionId};
use crate::stats::CharacterStat;

/// HP below this value counts as dead.
pub const HP_EPSILON: f32 = 1.0e-4;

/// Payload of the HP-changed notification.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpChange {
    pub max_hp: f32,
    pub current_hp: f32,
}

/// Layered stats, current HP and level of one character.
#[derive(Debug)]
pub struct StatSheet {
    level: u32,
    base: CharacterStat,
    weapon: CharacterStat,
    scrolls: Vec<CharacterStat>,
    total: CharacterStat,
    current_hp: f32,
    on_stat_changed: Observers<CharacterStat>,
    on_hp_changed: Observers<HpChange>,
    on_hp_zero: Observers<()>,
}

impl StatSheet {
    /// Creates a sheet at `level` (clamped) with full HP.
    pub fn new(level: u32, tables: StatTables<'_>) -> Self {
        let mut sheet = Self {
            level: 1,
            base: CharacterStat::ZERO,
            weapon: CharacterStat::ZERO,
            scrolls: Vec::new(),
            total: CharacterStat::ZERO,
            current_hp: 0.0,
            on_stat_changed: Observers::new(),
            on_hp_changed: Observers::new(),
            on_hp_zero: Observers::new(),
        };
        sheet.set_level(level, tables);
        sheet.set_hp(sheet.total.max_hp);
        sheet
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base_stat(&self) -> CharacterStat {
        self.base
    }

    pub fn weapon_stat(&self) -> CharacterStat {
        self.weapon
    }

    pub fn scroll_stats(&self) -> &[CharacterStat] {
        &self.scrolls
    }

    pub fn total_stat(&self) -> CharacterStat {
        self.total
    }

    pub fn current_hp(&self) -> f32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> f32 {
        self.total.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp < HP_EPSILON
    }

    // ===== subscriptions =====

    pub fn subscribe_stat_changed(
        &mut self,
        callback: impl FnMut(&CharacterStat) + Send + 'static,
    ) -> SubscriptionId {
        self.on_stat_changed.subscribe(callback)
    }

    pub fn subscribe_hp_changed(
        &mut self,
        callback: impl FnMut(&HpChange) + Send + 'static,
    ) -> SubscriptionId {
        self.on_hp_changed.subscribe(callback)
    }

    /// Subscribes to death: fires once each time HP drops from alive to zero.
    pub fn subscribe_hp_zero(&mut self, mut callback: impl FnMut() + Send + 'static) -> SubscriptionId {
        self.on_hp_zero.subscribe(move |_| callback())
    }

    pub fn unsubscribe_stat_changed(&mut self, id: SubscriptionId) -> bool {
        self.on_stat_changed.unsubscribe(id)
    }

    pub fn unsubscribe_hp_changed(&mut self, id: SubscriptionId) -> bool {
        self.on_hp_changed.unsubscribe(id)
    }

    pub fn unsubscribe_hp_zero(&mut self, id: SubscriptionId) -> bool {
        self.on_hp_zero.unsubscribe(id)
    }

    // ===== layer mutation =====

    /// Clamps `level` to `[1, max_level]` and reloads the base layer from the
    /// level table.
    ///
    /// A missing table row falls back to a zero base layer.
    pub fn set_level(&mut self, level: u32, tables: StatTables<'_>) {
        let max_level = tables.caps.max_level().max(1);
        self.level = level.clamp(1, max_level);

        let base = match tables.levels.stat_for_level(self.level) {
            Ok(stat) => stat,
            Err(error) => {
                tracing::warn!(
                    level = self.level,
                    code = error.error_code(),
                    severity = %error.severity(),
                    "{error}; using zero base stats"
                );
                CharacterStat::ZERO
            }
        };

        tracing::debug!(requested = level, level = self.level, "stat level set");
        self.set_base_stat(base, tables.caps);
    }

    pub fn set_base_stat(&mut self, base: CharacterStat, caps: &dyn StatCapsOracle) {
        self.base = base;
        self.calculate_total_stat(caps);
    }

    pub fn set_weapon_stat(&mut self, weapon: CharacterStat, caps: &dyn StatCapsOracle) {
        self.weapon = weapon;
        self.calculate_total_stat(caps);
    }

    /// Appends a permanent bonus layer, then heals half of its `max_hp`
    /// contribution (rounded down) when that contribution is positive.
    pub fn add_scroll_stat(&mut self, scroll: CharacterStat, caps: &dyn StatCapsOracle) {
        self.scrolls.push(scroll);
        self.calculate_total_stat(caps);

        if scroll.max_hp > 0.0 {
            let heal = (scroll.max_hp * 0.5).floor();
            self.heal_hp_value(heal);
        }
    }

    fn calculate_total_stat(&mut self, caps: &dyn StatCapsOracle) {
        let composed = self.base + self.weapon + self.scrolls.iter().sum::<CharacterStat>();
        self.total = composed.clamp_to(&caps.max_stat());

        tracing::trace!(total = ?self.total, scrolls = self.scrolls.len(), "total stat recomputed");
        self.on_stat_changed.notify(&self.total);

        if self.current_hp > self.total.max_hp {
            self.set_hp(self.total.max_hp);
        } else {
            self.on_hp_changed.notify(&HpChange {
                max_hp: self.total.max_hp,
                current_hp: self.current_hp,
            });
        }
    }

    // ===== HP =====

    /// Applies non-negative damage and returns the resulting HP.
    ///
    /// Negative amounts are treated as zero. The death notification fires
    /// only on the call that takes HP from alive to zero.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let was_alive = !self.is_dead();
        let actual = if amount.is_nan() { 0.0 } else { amount.max(0.0) };

        self.set_hp(self.current_hp - actual);

        if was_alive && self.is_dead() {
            tracing::debug!(damage = actual, "hp reached zero");
            self.on_hp_zero.notify(&());
        }

        self.current_hp
    }

    /// Heals `percent` of max HP, truncated to whole points.
    pub fn heal_hp_ratio(&mut self, percent: f32) {
        let amount = (self.total.max_hp.trunc() * percent * 0.01).trunc();
        self.heal_hp_value(amount);
    }

    /// Heals a flat amount. Negative amounts are ignored.
    pub fn heal_hp_value(&mut self, amount: f32) {
        if amount.is_nan() || amount < 0.0 {
            return;
        }
        self.set_hp(self.current_hp + amount);
    }

    fn set_hp(&mut self, hp: f32) {
        let max_hp = self.total.max_hp.max(0.0);
        if !hp.is_nan() {
            self.current_hp = hp.clamp(0.0, max_hp);
        }
        self.on_hp_changed.notify(&HpChange {
            max_hp: self.total.max_hp,
            current_hp: self.current_hp,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::env::StatTable;

    fn table() -> StatTable {
        StatTable::new(
            vec![
                CharacterStat::new(100.0, 10.0, 40.0, 1.0, 500.0),
                CharacterStat::new(150.0, 15.0, 40.0, 1.0, 500.0),
                CharacterStat::new(200.0, 20.0, 40.0, 1.0, 500.0),
            ],
            CharacterStat::new(300.0, 50.0, 100.0, 2.0, 800.0),
        )
        .unwrap()
    }

    #[test]
    fn starts_at_full_hp() {
        let table = table();
        let sheet = StatSheet::new(2, table.as_tables());

        assert_eq!(sheet.level(), 2);
        assert_eq!(sheet.max_hp(), 150.0);
        assert_eq!(sheet.current_hp(), 150.0);
    }

    #[test]
    fn set_level_clamps_to_table_range() {
        let table = table();
        let mut sheet = StatSheet::new(1, table.as_tables());

        sheet.set_level(0, table.as_tables());
        assert_eq!(sheet.level(), 1);
        assert_eq!(sheet.base_stat().max_hp, 100.0);

        sheet.set_level(3 + 5, table.as_tables());
        assert_eq!(sheet.level(), 3);
        assert_eq!(sheet.base_stat().max_hp, 200.0);
    }

    #[test]
    fn scroll_raises_max_hp_and_heals_half() {
        let table = table();
        let mut sheet = StatSheet::new(1, table.as_tables());
        sheet.apply_damage(50.0);

        sheet.add_scroll_stat(CharacterStat::with_max_hp(20.0), &table);

        assert_eq!(sheet.max_hp(), 120.0);
        assert_eq!(sheet.current_hp(), 60.0);
    }

    #[test]
    fn scroll_heal_is_clamped_to_new_max() {
        let table = table();
        let mut sheet = StatSheet::new(1, table.as_tables());

        sheet.add_scroll_stat(CharacterStat::with_max_hp(21.0), &table);

        assert_eq!(sheet.max_hp(), 121.0);
        // 100 + floor(10.5) = 110, below the new max
        assert_eq!(sheet.current_hp(), 110.0);
    }

    #[test]
    fn totals_never_exceed_caps() {
        let table = table();
        let caps = table.max_stat();
        let mut sheet = StatSheet::new(3, table.as_tables());
        sheet.set_weapon_stat(CharacterStat::new(50.0, 40.0, 10.0, 0.5, 100.0), &table);

        for _ in 0..10 {
            sheet.add_scroll_stat(CharacterStat::new(40.0, 5.0, 20.0, 0.25, 50.0), &table);
            assert!(sheet.total_stat().within(&caps));
            assert!(sheet.current_hp() <= sheet.max_hp());
        }
        assert_eq!(sheet.total_stat(), caps);
    }

    #[test]
    fn negative_damage_is_ignored() {
        let table = table();
        let mut sheet = StatSheet::new(1, table.as_tables());

        assert_eq!(sheet.apply_damage(-30.0), 100.0);
        assert_eq!(sheet.apply_damage(30.0), 70.0);
        assert_eq!(sheet.apply_damage(500.0), 0.0);
    }

    #[test]
    fn death_fires_once_per_crossing() {
        let table = table();
        let mut sheet = StatSheet::new(1, table.as_tables());
        let deaths = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&deaths);
        sheet.subscribe_hp_zero(move || *counter.lock().unwrap() += 1);

        sheet.apply_damage(60.0);
        assert_eq!(*deaths.lock().unwrap(), 0);
        sheet.apply_damage(60.0);
        sheet.apply_damage(10.0);
        sheet.apply_damage(0.0);
        assert_eq!(*deaths.lock().unwrap(), 1);

        sheet.heal_hp_value(5.0);
        sheet.apply_damage(5.0);
        assert_eq!(*deaths.lock().unwrap(), 2);
    }

    #[test]
    fn heal_ratio_truncates() {
        let table = table();
        let mut sheet = StatSheet::new(2, table.as_tables());
        sheet.apply_damage(100.0);

        sheet.heal_hp_ratio(33.0);
        // floor(150 * 0.33) = 49
        assert_eq!(sheet.current_hp(), 99.0);

        sheet.heal_hp_ratio(100.0);
        assert_eq!(sheet.current_hp(), 150.0);
    }

    #[test]
    fn lowering_max_hp_clamps_current_hp() {
        let table = table();
        let mut sheet = StatSheet::new(3, table.as_tables());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&changes);
        sheet.subscribe_hp_changed(move |change| log.lock().unwrap().push(*change));

        sheet.set_level(1, table.as_tables());

        assert_eq!(sheet.current_hp(), 100.0);
        assert_eq!(
            changes.lock().unwrap().last().copied(),
            Some(HpChange {
                max_hp: 100.0,
                current_hp: 100.0
            })
        );
    }

    #[test]
    fn raising_max_hp_re_emits_unchanged_hp() {
        let table = table();
        let mut sheet = StatSheet::new(1, table.as_tables());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&changes);
        sheet.subscribe_hp_changed(move |change| log.lock().unwrap().push(*change));

        sheet.set_weapon_stat(CharacterStat::with_max_hp(50.0), &table);

        assert_eq!(
            *changes.lock().unwrap(),
            vec![HpChange {
                max_hp: 150.0,
                current_hp: 100.0
            }]
        );
    }

    #[test]
    fn stat_changed_reports_clamped_total() {
        let table = table();
        let mut sheet = StatSheet::new(1, table.as_tables());
        let totals = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&totals);
        sheet.subscribe_stat_changed(move |total| log.lock().unwrap().push(*total));

        sheet.set_weapon_stat(CharacterStat::new(0.0, 100.0, 0.0, 0.0, 0.0), &table);

        assert_eq!(totals.lock().unwrap()[0].attack, 50.0);
    }

    #[test]
    fn missing_level_row_falls_back_to_zero() {
        struct Sparse;
        impl crate::env::LevelTableOracle for Sparse {
            fn stat_for_level(&self, level: u32) -> Result<CharacterStat, crate::env::OracleError> {
                Err(crate::env::OracleError::LevelNotFound(level))
            }
        }
        let caps = table();
        let sheet = StatSheet::new(1, StatTables::new(&Sparse, &caps));

        assert_eq!(sheet.total_stat(), CharacterStat::ZERO);
        assert!(sheet.is_dead());
    }
}
