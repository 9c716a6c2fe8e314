//! Reference parser: user-supplied URL string -> [`VideoId`].
//!
//! Recognised shapes:
//! - `https://www.youtube.com/watch?v=<id>` (any `*.youtube.com` host, extra params allowed)
//! - `https://youtu.be/<id>`
//! - `https://www.youtube.com/embed/<id>`, `/shorts/<id>`, `/live/<id>`
//!
//! Scheme-less input (`youtu.be/<id>`) is accepted. No side effects.

use crate::domain::{DomainError, VideoId};
use url::Url;

/// Path prefixes whose second segment is the identifier.
const ID_PATH_PREFIXES: &[&str] = &["embed", "shorts", "live", "v"];

pub fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com" || h == "youtu.be" || h.ends_with(".youtube.com")
}

/// Extract the canonical video identifier from `input`.
///
/// # Errors
/// * `EmptyInput` - blank input
/// * `MalformedUrl` - not a URL, not a YouTube host, no identifier segment,
///   or the identifier contains characters outside `[A-Za-z0-9_-]`
/// * `InvalidIdentifierLength` - identifier is not exactly 11 characters
pub fn parse(input: &str) -> Result<VideoId, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyInput);
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| DomainError::MalformedUrl(format!("{trimmed}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::MalformedUrl(trimmed.to_string()));
    }

    let candidate = extract_candidate(&url)
        .ok_or_else(|| DomainError::MalformedUrl(trimmed.to_string()))?;

    if !candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(DomainError::MalformedUrl(trimmed.to_string()));
    }

    let len = candidate.chars().count();
    if len != VideoId::LEN {
        return Err(DomainError::InvalidIdentifierLength(len));
    }

    Ok(VideoId::new_unchecked(candidate))
}

fn extract_candidate(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if !is_youtube_host(host) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    if host.eq_ignore_ascii_case("youtu.be") {
        return segments.next().map(str::to_string);
    }

    let first = segments.next()?;
    if first == "watch" {
        return url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty());
    }

    if ID_PATH_PREFIXES.contains(&first) {
        return segments.next().map(str::to_string);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn ok(input: &str) -> String {
        parse(input)
            .unwrap_or_else(|e| panic!("{input} should parse: {e}"))
            .to_string()
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(ok("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), ID);
        assert_eq!(ok("http://youtube.com/watch?v=dQw4w9WgXcQ"), ID);
        assert_eq!(ok("https://m.youtube.com/watch?v=dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            ok("https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ&t=42s"),
            ID
        );
        assert_eq!(ok("https://www.youtube.com/watch?v=dQw4w9WgXcQ#comments"), ID);
    }

    #[test]
    fn test_short_link() {
        assert_eq!(ok("https://youtu.be/dQw4w9WgXcQ"), ID);
        assert_eq!(ok("https://youtu.be/dQw4w9WgXcQ?si=abcdef"), ID);
        assert_eq!(ok("youtu.be/dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_embed_and_shorts() {
        assert_eq!(ok("https://www.youtube.com/embed/dQw4w9WgXcQ"), ID);
        assert_eq!(ok("https://www.youtube.com/shorts/dQw4w9WgXcQ"), ID);
        assert_eq!(ok("https://www.youtube.com/live/dQw4w9WgXcQ?feature=share"), ID);
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(ok("  https://youtu.be/dQw4w9WgXcQ \n"), ID);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(DomainError::EmptyInput));
        assert_eq!(parse("   "), Err(DomainError::EmptyInput));
    }

    #[test]
    fn test_foreign_host() {
        assert!(matches!(
            parse("https://example.com/not-youtube"),
            Err(DomainError::MalformedUrl(_))
        ));
        assert!(matches!(
            parse("https://notyoutube.com/watch?v=dQw4w9WgXcQ"),
            Err(DomainError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_unrecognised_shapes() {
        for input in [
            "https://www.youtube.com/",
            "https://www.youtube.com/watch",
            "https://www.youtube.com/watch?list=PL123",
            "https://www.youtube.com/channel/UC123",
            "https://youtu.be/",
            "ftp://youtube.com/watch?v=dQw4w9WgXcQ",
            "not a url at all",
            "https://www.youtube.com/watch?v=dQw4w9W%2FcQ",
        ] {
            assert!(
                matches!(parse(input), Err(DomainError::MalformedUrl(_))),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn test_wrong_identifier_length() {
        assert_eq!(
            parse("https://www.youtube.com/watch?v=short"),
            Err(DomainError::InvalidIdentifierLength(5))
        );
        assert_eq!(
            parse("https://youtu.be/dQw4w9WgXcQX"),
            Err(DomainError::InvalidIdentifierLength(12))
        );
    }

    #[test]
    fn test_every_recognised_shape_round_trips_identifier() {
        let ids = ["aaaaaaaaaaa", "A-b_C1d2E3f", "___________", "09876543210"];
        for id in ids {
            for url in [
                format!("https://www.youtube.com/watch?v={id}"),
                format!("https://youtu.be/{id}"),
                format!("https://www.youtube.com/embed/{id}"),
            ] {
                assert_eq!(ok(&url), id);
            }
        }
    }
}
