//! Synthesized sound cues played on a throwaway thread.

use std::time::Duration;

use rodio::{source::SineWave, OutputStream, Sink, Source};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Evolution,
    Impact { critical: bool },
    Cry,
    BossDefeated,
}

struct Tone {
    freq: f32,
    millis: u64,
    amp: f32,
}

const fn tone(freq: f32, millis: u64, amp: f32) -> Tone {
    Tone { freq, millis, amp }
}

fn tones(cue: SoundCue) -> Vec<Tone> {
    match cue {
        SoundCue::Evolution => vec![
            tone(392.0, 130, 0.16),
            tone(392.0, 130, 0.16),
            tone(392.0, 130, 0.16),
            tone(523.25, 420, 0.18),
        ],
        SoundCue::Impact { critical: false } => vec![tone(110.0, 120, 0.22)],
        SoundCue::Impact { critical: true } => vec![
            tone(98.0, 90, 0.24),
            tone(82.0, 90, 0.24),
            tone(73.0, 220, 0.22),
        ],
        SoundCue::Cry => vec![tone(640.0, 90, 0.14), tone(720.0, 120, 0.14)],
        SoundCue::BossDefeated => vec![tone(146.8, 260, 0.2), tone(110.0, 600, 0.2)],
    }
}

pub fn play(cue: SoundCue) {
    std::thread::spawn(move || {
        let Ok((stream, handle)) = OutputStream::try_default() else {
            tracing::debug!(?cue, "no audio device");
            return;
        };
        let Ok(sink) = Sink::try_new(&handle) else {
            return;
        };
        for Tone { freq, millis, amp } in tones(cue) {
            sink.append(
                SineWave::new(freq)
                    .take_duration(Duration::from_millis(millis))
                    .amplify(amp),
            );
        }
        sink.sleep_until_end();
        drop(stream);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evolution_jingle_ends_on_c() {
        let freqs: Vec<f32> = tones(SoundCue::Evolution).iter().map(|t| t.freq).collect();
        assert_eq!(freqs, vec![392.0, 392.0, 392.0, 523.25]);
    }

    #[test]
    fn critical_impact_rolls_longer() {
        let total = |cue| tones(cue).iter().map(|t| t.millis).sum::<u64>();
        assert!(total(SoundCue::Impact { critical: true }) > total(SoundCue::Impact { critical: false }));
    }
}
