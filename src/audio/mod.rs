//! Audio plugin - fire-and-forget sound cues for eating and for game over.

use bevy::audio::AudioSource;
use bevy::prelude::*;

use crate::game::{FoodEatenEvent, GameOverEvent, GameSet, SoundSettings};

/// Plugin for sound cues.
pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sound_cues).add_systems(
            Update,
            (play_eat_cue, play_game_over_cue).in_set(GameSet::Presentation),
        );
    }
}

#[derive(Resource)]
struct SoundCues {
    eat: Handle<AudioSource>,
    game_over: Handle<AudioSource>,
}

const SAMPLE_RATE: u32 = 44_100;

/// Mono 16-bit PCM sine beep, as a complete in-memory WAV file.
fn sine_beep_wav(frequency_hz: f32, seconds: f32, volume: f32) -> Vec<u8> {
    let sample_count = (seconds * SAMPLE_RATE as f32) as u32;
    let data_len = sample_count * 2;
    let amplitude = volume.clamp(0.0, 1.0) * 0.7 * f32::from(i16::MAX);

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    // fmt chunk: size 16, PCM, mono, rate, byte rate, block align, bits
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&[1, 0, 1, 0]);
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    let step = std::f32::consts::TAU * frequency_hz / SAMPLE_RATE as f32;
    wav.extend((0..sample_count).flat_map(|n| {
        let sample = (amplitude * (step * n as f32).sin()) as i16;
        sample.to_le_bytes()
    }));
    wav
}

fn load_sound_cues(mut commands: Commands, mut sources: ResMut<Assets<AudioSource>>) {
    let eat = sources.add(AudioSource {
        bytes: sine_beep_wav(880.0, 0.08, 0.6).into(),
    });
    let game_over = sources.add(AudioSource {
        bytes: sine_beep_wav(110.0, 0.25, 0.7).into(),
    });
    commands.insert_resource(SoundCues { eat, game_over });
}

fn play(commands: &mut Commands, cue: &Handle<AudioSource>) {
    commands.spawn((AudioPlayer::new(cue.clone()), PlaybackSettings::DESPAWN));
}

/// System to play the eat cue once per tick that ate something.
fn play_eat_cue(
    mut commands: Commands,
    mut food_eaten_reader: MessageReader<FoodEatenEvent>,
    sound: Res<SoundSettings>,
    cues: Option<Res<SoundCues>>,
) {
    let ate = food_eaten_reader.read().count() > 0;
    if let Some(cues) = cues
        && ate
        && sound.enabled
    {
        play(&mut commands, &cues.eat);
    }
}

/// System to play the game over cue.
fn play_game_over_cue(
    mut commands: Commands,
    mut game_over_reader: MessageReader<GameOverEvent>,
    sound: Res<SoundSettings>,
    cues: Option<Res<SoundCues>>,
) {
    let ended = game_over_reader.read().count() > 0;
    if let Some(cues) = cues
        && ended
        && sound.enabled
    {
        play(&mut commands, &cues.game_over);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header_and_length() {
        let bytes = sine_beep_wav(440.0, 0.5, 0.5);
        let samples = 22050;

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[20..24], &[1, 0, 1, 0]);
        assert_eq!(u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]), 44_100);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(bytes.len(), 44 + samples * 2);

        let data_size = u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]);
        assert_eq!(data_size as usize, samples * 2);
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let bytes = sine_beep_wav(440.0, 0.01, 0.0);
        assert!(bytes[44..].iter().all(|&b| b == 0));
    }
}
