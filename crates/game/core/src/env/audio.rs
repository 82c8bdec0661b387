/// Sound cues a stage can request.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AudioCue {
    /// Looping stage background music.
    StageBgm,
    /// Played once the game-over delay has elapsed.
    GameOver,
}

/// Audio collaborator owned by the stage's host.
pub trait Audio {
    fn play_loop(&mut self, cue: AudioCue);

    fn fade_out(&mut self, seconds: f32);

    fn stop(&mut self);

    fn play_once(&mut self, cue: AudioCue);
}
