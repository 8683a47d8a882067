//! YouTube URL parsing for the playlist scheduler.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `youtube.com/watch?v=`, `youtube.com/embed/`, `youtube.com/v/`,
/// `youtube.com/<a>/<b>/`, and `youtu.be/` forms and captures the 11-character id.
static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("video id pattern is a valid regex")
});

/// Extract the video id from a YouTube URL.
///
/// Returns `None` for anything that does not contain one of the supported
/// URL shapes followed by an 11-character id.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

#[cfg(test)]
mod tests {
    use super::extract_video_id;
    use rstest::rstest;

    #[rstest]
    #[case("https://youtu.be/dQw4w9WgXcQ")]
    #[case("https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    #[case("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ")]
    #[case("https://www.youtube.com/embed/dQw4w9WgXcQ")]
    #[case("https://youtube.com/v/dQw4w9WgXcQ")]
    #[case("youtu.be/dQw4w9WgXcQ?t=42")]
    fn extracts_id(#[case] url: &str) {
        assert_eq!(extract_video_id(url), Some("dQw4w9WgXcQ"));
    }

    #[rstest]
    #[case("https://example.com/video")]
    #[case("https://vimeo.com/76979871")]
    #[case("https://youtu.be/short")]
    #[case("")]
    fn rejects_non_youtube(#[case] url: &str) {
        assert_eq!(extract_video_id(url), None);
    }
}
