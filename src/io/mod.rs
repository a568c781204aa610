// Purpose - external interfaces over flat sample buffers. Nothing in here
// knows about the signal graph; both sides speak Vec<f32>.

/// Blocking playback on the default output device.
#[cfg(feature = "rtrb")]
pub mod playback;
/// WAV file reading and writing.
pub mod wav;
