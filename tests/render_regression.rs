use plectra_dsp::graph::extensions::NodeExt;
use plectra_dsp::graph::node::SignalNode;
use plectra_dsp::graph::sequence::NoteSequence;
use plectra_dsp::render::render;
use plectra_dsp::voices::{harmonics, plucked_string};
use plectra_dsp::SAMPLE_RATE;

#[test]
fn renders_a_plucked_line_end_to_end() {
    let note = |freq: f32| {
        plucked_string(freq)
            .envelope(0.06)
            .with_duration(0.4)
            .with_size(0.4)
    };

    let song = NoteSequence::new()
        .then(note(220.0))
        .then(note(330.0))
        .then(note(440.0));
    let expected = (song.duration() * SAMPLE_RATE as f64) as usize;

    let mut master = song.normalize().scale(0.25);
    let samples = render(&mut master).unwrap();

    assert_eq!(samples.len(), expected);
    // Three 0.4s notes back to back.
    assert!((52_000..=54_000).contains(&samples.len()), "{}", samples.len());

    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().all(|s| s.abs() <= 1.0));
    assert!(
        samples.iter().any(|s| s.abs() > 0.001),
        "rendered composition is silent"
    );
}

#[test]
fn bell_notes_decay_into_their_successors() {
    let bell = |freq: f64| {
        harmonics(freq, &[(1.0, 1.0), (2.0, 0.2)])
            .envelope(0.05)
            .exponential_decay(0.001)
            .with_duration(0.4)
    };

    // Each bell has duration 0.4 but size 0.2, so four bells span 1.0s:
    // three size-steps plus the final bell's full duration.
    let mut line = NoteSequence::new()
        .then(bell(220.0))
        .then(bell(275.0))
        .then(bell(330.0))
        .then(bell(440.0));
    assert!((line.duration() - 1.0).abs() < 1e-9);

    let samples = render(&mut line).unwrap();
    assert_eq!(samples.len(), SAMPLE_RATE as usize);
    assert!(samples.iter().all(|s| s.is_finite()));

    // The final bell's tail must actually fade: the last 5% of the buffer
    // should be much quieter than the loudest point.
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    let tail_start = samples.len() - samples.len() / 20;
    let tail_peak = samples[tail_start..]
        .iter()
        .fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!(
        tail_peak < peak * 0.2,
        "tail failed to decay: peak {peak}, tail {tail_peak}"
    );
}

#[test]
fn sequenced_notes_keep_their_slots() {
    use plectra_dsp::graph::value::Value;

    // Constant notes make slot boundaries exactly checkable after render.
    let song = NoteSequence::new()
        .then(Value::new(0.1).with_duration(0.25))
        .then(Value::new(0.2).with_duration(0.25))
        .then(Value::new(0.3).with_duration(0.25));

    let mut root = song;
    let samples = render(&mut root).unwrap();

    let quarter = (0.25 * SAMPLE_RATE as f64) as usize;
    assert_eq!(samples[quarter / 2], 0.1);
    assert_eq!(samples[quarter + quarter / 2], 0.2);
    assert_eq!(samples[2 * quarter + quarter / 2], 0.3);
}
