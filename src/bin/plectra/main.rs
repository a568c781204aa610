//! plectra - renders the demo composition to a WAV file.
//!
//! Run with: cargo run [-- <output.wav>] [--play]

use plectra_dsp::graph::extensions::NodeExt;
use plectra_dsp::graph::sequence::NoteSequence;
use plectra_dsp::graph::SignalNode;
use plectra_dsp::voices::{harmonics, plucked_string};
use plectra_dsp::{io, render};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let mut out_path = String::from("plectra.wav");
    let mut play_after_render = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--play" => play_after_render = true,
            other => out_path = other.to_string(),
        }
    }

    // Just-intonation scale rooted on A3.
    let freq_a = 220.0;
    let freq_b = 220.0 * 9.0 / 8.0;
    let freq_c = 220.0 * 4.0 / 3.0;
    let freq_d = 220.0 * 3.0 / 2.0;
    let freq_e = 220.0 * 2.0;

    // Guitar note: fresh strings every call, so each note gets its own
    // random pluck.
    let note = |freq: f32| {
        plucked_string(freq)
            .envelope(0.06)
            .with_duration(0.65)
            .with_size(0.65)
    };

    // Bell note: harmonic stack with a fast exponential fade.
    let bell = |freq: f64| {
        harmonics(freq, &[(1.0, 1.0), (2.0, 0.2), (4.0, 0.05)])
            .envelope(0.1)
            .exponential_decay(0.0001)
            .with_duration(0.5)
    };

    let intro = NoteSequence::new()
        .then(note(freq_e))
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_c))
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_e))
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_a))
        .then(note(freq_b))
        .then(note(freq_c))
        .then(note(freq_d))
        .then(note(freq_e));

    let chorus = NoteSequence::new()
        .then(bell(freq_a as f64))
        .then(bell(freq_b as f64))
        .then(bell(freq_c as f64))
        .then(bell(freq_e as f64))
        .then(bell(freq_d as f64))
        .then(bell(freq_c as f64))
        .then(bell(freq_b as f64))
        .then(bell(freq_a as f64));

    // Slapback echo: the chorus plus a copy of itself 0.4s late at 10%.
    let echoed = chorus.clone().plus(chorus.shift(0.4).scale(0.1));

    // Closing run that trails off: five repeated notes under a linear fade.
    let trail = NoteSequence::new()
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_b))
        .then(note(freq_b))
        .linear_decay();

    let ending = NoteSequence::new()
        .then(note(freq_e))
        .then(note(freq_d))
        .then(note(freq_c))
        .then(note(freq_b))
        .then(note(freq_a))
        .then(trail);

    let song = NoteSequence::new().then(intro).then(echoed).then(ending);
    tracing::info!(duration = song.duration(), "composition assembled");

    let mut master = song.normalize().scale(0.25);
    let samples = render::render(&mut master)?;

    io::wav::write_wav(&out_path, &samples, 1)?;
    println!("Wrote {} samples to {}", samples.len(), out_path);

    if play_after_render {
        #[cfg(feature = "rtrb")]
        {
            println!("Playing...");
            io::playback::play(&samples)?;
        }
        #[cfg(not(feature = "rtrb"))]
        eprintln!("Build with --features rtrb to enable playback.");
    }

    Ok(())
}
