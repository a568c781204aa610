pub mod dsp;
pub mod graph; // Composable signal graph nodes
pub mod io;
pub mod render;
pub mod voices; // Instrument factories built from graph nodes

/// Samples per second, shared by the whole graph, the renderer, and I/O.
pub const SAMPLE_RATE: u32 = 44_100;

/// Renderer sanity ceiling in seconds; a longer duration is treated as a
/// runaway graph rather than a legitimate composition.
pub const MAX_RENDER_SECONDS: f64 = 3_600.0;
