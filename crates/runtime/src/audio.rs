//! Audio collaborator that records what the stage asked for.

use game_core::{Audio, AudioCue};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AudioCommand {
    PlayLoop { cue: AudioCue },
    FadeOut { seconds: f32 },
    Stop,
    PlayOnce { cue: AudioCue },
}

#[derive(Clone, Debug, Default)]
pub struct AudioRecorder {
    looping: Option<AudioCue>,
    fading: bool,
    last_one_shot: Option<AudioCue>,
    history: Vec<AudioCommand>,
}

impl AudioRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loop currently playing, if any.
    pub fn looping(&self) -> Option<AudioCue> {
        self.looping
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    pub fn last_one_shot(&self) -> Option<AudioCue> {
        self.last_one_shot
    }

    pub fn history(&self) -> &[AudioCommand] {
        &self.history
    }
}

impl Audio for AudioRecorder {
    fn play_loop(&mut self, cue: AudioCue) {
        tracing::debug!(%cue, "audio loop");
        self.looping = Some(cue);
        self.fading = false;
        self.history.push(AudioCommand::PlayLoop { cue });
    }

    fn fade_out(&mut self, seconds: f32) {
        tracing::debug!(seconds, "audio fade out");
        self.fading = self.looping.is_some();
        self.history.push(AudioCommand::FadeOut { seconds });
    }

    fn stop(&mut self) {
        self.looping = None;
        self.fading = false;
        self.history.push(AudioCommand::Stop);
    }

    fn play_once(&mut self, cue: AudioCue) {
        tracing::debug!(%cue, "audio one-shot");
        self.last_one_shot = Some(cue);
        self.history.push(AudioCommand::PlayOnce { cue });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_sequence_ends_in_silence_plus_cue() {
        let mut audio = AudioRecorder::new();
        audio.play_loop(AudioCue::StageBgm);
        audio.fade_out(2.0);
        assert!(audio.is_fading());

        audio.stop();
        audio.play_once(AudioCue::GameOver);

        assert_eq!(audio.looping(), None);
        assert!(!audio.is_fading());
        assert_eq!(audio.last_one_shot(), Some(AudioCue::GameOver));
        assert_eq!(audio.history().len(), 4);
    }
}
