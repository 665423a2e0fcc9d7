//! Local filename derivation from a resolved download link.

use std::time::{SystemTime, UNIX_EPOCH};

/// Container extension forced onto every saved file.
const VIDEO_EXT: &str = "mp4";
/// Minimum usable identifier length before the timestamp fallback kicks in.
const MIN_ID_LEN: usize = 5;

/// Derives a safe local filename from a download link.
///
/// The identifier is the link's last path segment with everything from the
/// first `?` stripped, filtered to `[A-Za-z0-9_-]`. Identifiers shorter than
/// 5 characters are replaced with `video_<unix-timestamp>`. The `.mp4`
/// extension is always appended.
///
/// Total: any input, including the empty string, yields a non-empty name
/// ending in `.mp4`.
pub fn filename_for_link(link: &str) -> String {
    let segment = link.rsplit('/').next().unwrap_or(link);
    let identifier = segment.split('?').next().unwrap_or(segment);

    let cleaned: String = identifier
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    let stem = if cleaned.len() < MIN_ID_LEN {
        format!("video_{}", unix_timestamp())
    } else {
        cleaned
    };

    let filename = format!("{stem}.{VIDEO_EXT}");
    tracing::debug!("derived local filename: {}", filename);
    filename
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
