//! YouTube URL normalization
//!
//! Lecture entries store whatever URL the admin pasted; rendering needs the
//! canonical embed form. Two shapes are recognized: the watch shape
//! (`youtube.com/watch?v=ID`) and the short-link shape (`youtu.be/ID`).

const WATCH_PREFIX: &str = "youtube.com/watch?v=";
const SHORT_PREFIX: &str = "youtu.be/";

/// Extract the video id from a watch or short-link URL
///
/// The id runs greedily up to the next `&`, `?`, `#`, or newline. Returns
/// `None` when neither shape matches.
pub fn video_id(url: &str) -> Option<&str> {
    let (_, rest) = url
        .split_once(WATCH_PREFIX)
        .or_else(|| url.split_once(SHORT_PREFIX))?;

    match rest.split(|c: char| matches!(c, '&' | '?' | '#' | '\n')).next() {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

/// Canonical embed URL, or the input unchanged when no shape matches
///
/// Idempotent: an embed URL matches neither shape and passes through, so an
/// unrecognized URL fails at render time rather than at save time.
pub fn embed_url(url: &str) -> String {
    match video_id(url) {
        Some(id) => format!("https://www.youtube.com/embed/{}", id),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_shape() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=ABC123"),
            Some("ABC123")
        );
    }

    #[test]
    fn test_watch_shape_with_extra_params() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=ABC123&t=30"),
            Some("ABC123")
        );
    }

    #[test]
    fn test_short_link_shape() {
        assert_eq!(video_id("https://youtu.be/ABC123"), Some("ABC123"));
        assert_eq!(video_id("https://youtu.be/ABC123?si=xyz"), Some("ABC123"));
    }

    #[test]
    fn test_id_stops_at_fragment() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=ABC123#t=1m"),
            Some("ABC123")
        );
    }

    #[test]
    fn test_unrecognized_url() {
        assert_eq!(video_id("https://vimeo.com/12345"), None);
        assert_eq!(video_id("not a url"), None);
        assert_eq!(video_id("https://youtu.be/"), None);
    }

    #[test]
    fn test_embed_url_both_shapes() {
        assert_eq!(
            embed_url("https://youtu.be/ABC123"),
            "https://www.youtube.com/embed/ABC123"
        );
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=ABC123&t=30"),
            "https://www.youtube.com/embed/ABC123"
        );
    }

    #[test]
    fn test_embed_url_passthrough() {
        assert_eq!(embed_url("https://vimeo.com/12345"), "https://vimeo.com/12345");
    }

    #[test]
    fn test_embed_url_idempotent() {
        let inputs = [
            "https://youtu.be/ABC123",
            "https://www.youtube.com/watch?v=ABC123&t=30",
            "https://vimeo.com/12345",
            "",
        ];
        for input in inputs {
            let once = embed_url(input);
            assert_eq!(embed_url(&once), once, "not idempotent for {:?}", input);
        }
    }
}
