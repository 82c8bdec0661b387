/// Game-mode collaborator receiving stage progress reports.
///
/// Calls may arrive several times per frame. Implementations only record or
/// display; they never get access back into the reporting stage.
pub trait GameMode {
    /// A new stage round begins at `level` (stage level plus wave growth).
    fn on_stage_advance(&mut self, level: u32);

    /// The round preceding `level` has been cleared.
    fn on_stage_clear(&mut self, level: u32);

    fn on_enemy_count_changed(&mut self, killed: u32, target: u32);

    fn on_objective_visibility_changed(&mut self, visible: bool);

    /// Reward accumulated during the session, returned at game over.
    fn on_reward_returned(&mut self, amount: u64);

    fn on_new_game_count(&mut self);

    fn on_stage_level_uploaded(&mut self);

    fn on_enemy_killed(&mut self, count: u32);

    fn on_splendor_achievements_cleared(&mut self, level: u32);
}
