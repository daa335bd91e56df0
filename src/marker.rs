//! Datastream marker scanning
//!
//! A marker is the first run of `window` distinct characters in a stream.
//! Receivers lock onto a signal at the position just past that run.

/// Window length of a start-of-packet marker.
pub const PACKET_WINDOW: usize = 4;

/// Window length of a start-of-message marker.
pub const MESSAGE_WINDOW: usize = 14;

/// Number of characters consumed when the first run of `window` distinct
/// characters completes, or `None` if the stream contains no such run
/// (including streams shorter than the window).
///
/// The scan is byte-wise; `window` is expected to be small (4 or 14 in
/// practice), so the quadratic uniqueness check inside each window beats
/// maintaining occupancy counts.
pub fn find_marker(stream: &str, window: usize) -> Option<usize> {
    if window == 0 {
        return None;
    }

    stream
        .as_bytes()
        .windows(window)
        .position(all_distinct)
        .map(|start| start + window)
}

fn all_distinct(bytes: &[u8]) -> bool {
    for (i, byte) in bytes.iter().enumerate() {
        if bytes[i + 1..].contains(byte) {
            return false;
        }
    }
    true
}
