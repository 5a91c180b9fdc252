//! Splitting a hit name into plain and emphasized segments.
//!
//! The backend's highlight snippet (with `<mark>` tags) wins when present;
//! otherwise the query is matched locally against the name, case
//! insensitively. Pure functions only.

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Segment {
            text: text.to_string(),
            emphasized: false,
        }
    }

    fn emphasized(text: &str) -> Self {
        Segment {
            text: text.to_string(),
            emphasized: true,
        }
    }
}

/// Segment `name` for display, preferring the backend snippet.
pub fn segments(name: &str, query: &str, snippet: Option<&str>) -> Vec<Segment> {
    snippet
        .and_then(snippet_segments)
        .unwrap_or_else(|| local_segments(name, query))
}

/// Parse a `<mark>`-tagged snippet. Returns None when the snippet carries
/// no usable emphasis, so the caller falls back to the local match.
fn snippet_segments(snippet: &str) -> Option<Vec<Segment>> {
    let mut out = Vec::new();
    let mut rest = snippet;

    while !rest.is_empty() {
        match rest.find(MARK_OPEN) {
            Some(start) => {
                if start > 0 {
                    out.push(Segment::plain(&rest[..start]));
                }
                rest = &rest[start + MARK_OPEN.len()..];
                let end = rest.find(MARK_CLOSE)?;
                if end > 0 {
                    out.push(Segment::emphasized(&rest[..end]));
                }
                rest = &rest[end + MARK_CLOSE.len()..];
            }
            None => {
                out.push(Segment::plain(rest));
                break;
            }
        }
    }

    out.iter().any(|segment| segment.emphasized).then_some(out)
}

/// Case-insensitive substring match of the query against the name.
fn local_segments(name: &str, query: &str) -> Vec<Segment> {
    let query = query.trim();
    if name.is_empty() || query.is_empty() {
        return vec![Segment::plain(name)];
    }

    let lower_name = name.to_lowercase();
    let lower_query = query.to_lowercase();

    // Byte offsets from the lowercased form only apply when lowercasing
    // preserved lengths and boundaries; otherwise skip the emphasis.
    match lower_name.find(&lower_query) {
        Some(start)
            if lower_name.len() == name.len()
                && name.is_char_boundary(start)
                && name.is_char_boundary(start + lower_query.len()) =>
        {
            let end = start + lower_query.len();
            let mut out = Vec::new();
            if start > 0 {
                out.push(Segment::plain(&name[..start]));
            }
            out.push(Segment::emphasized(&name[start..end]));
            if end < name.len() {
                out.push(Segment::plain(&name[end..]));
            }
            out
        }
        _ => vec![Segment::plain(name)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_snippet_wins_over_local_match() {
        let segments = segments("SushiSwap", "sushi", Some("Sushi<mark>Swap</mark>"));
        assert_eq!(
            segments,
            vec![Segment::plain("Sushi"), Segment::emphasized("Swap")]
        );
    }

    #[test]
    fn snippet_without_marks_falls_back_to_local() {
        let segments = segments("SushiSwap", "swap", Some("SushiSwap"));
        assert_eq!(
            segments,
            vec![Segment::plain("Sushi"), Segment::emphasized("Swap")]
        );
    }

    #[test]
    fn malformed_snippet_falls_back_to_local() {
        let segments = segments("SushiSwap", "sushi", Some("<mark>Sushi"));
        assert_eq!(
            segments,
            vec![Segment::emphasized("Sushi"), Segment::plain("Swap")]
        );
    }

    #[test]
    fn local_match_is_case_insensitive() {
        let segments = segments("UniSwap", "SWAP", None);
        assert_eq!(
            segments,
            vec![Segment::plain("Uni"), Segment::emphasized("Swap")]
        );
    }

    #[test]
    fn no_match_renders_one_plain_segment() {
        let segments = segments("Aragon", "zzz", None);
        assert_eq!(segments, vec![Segment::plain("Aragon")]);
    }

    #[test]
    fn blank_query_renders_one_plain_segment() {
        let segments = segments("Aragon", "   ", None);
        assert_eq!(segments, vec![Segment::plain("Aragon")]);
    }

    #[test]
    fn match_at_both_ends_has_no_empty_segments() {
        let full = segments("swap", "swap", None);
        assert_eq!(full, vec![Segment::emphasized("swap")]);

        let prefix = segments("Swapper", "swap", None);
        assert_eq!(
            prefix,
            vec![Segment::emphasized("Swap"), Segment::plain("per")]
        );
    }

    #[test]
    fn segmentation_is_idempotent() {
        let once = segments("SushiSwap", "swap", Some("Sushi<mark>Swap</mark>"));
        let twice = segments("SushiSwap", "swap", Some("Sushi<mark>Swap</mark>"));
        assert_eq!(once, twice);
    }
}
