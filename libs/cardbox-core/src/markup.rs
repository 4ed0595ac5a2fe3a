//! Card text rendering.
//!
//! Expands emphasis spans and line-break markers into a render-target-neutral
//! form. A span delimited by the dataset's emphasis marker (`*text*` by
//! default) becomes a strong segment; a literal `<br>` or HTML-encoded
//! `&lt;br&gt;` becomes a line break. What a strong segment or a line break
//! looks like is up to the presentation layer.

use serde::{Deserialize, Serialize};

/// One styled run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub strong: bool,
}

impl Segment {
    fn plain(text: String) -> Self {
        Self {
            text,
            strong: false,
        }
    }

    fn strong(text: String) -> Self {
        Self { text, strong: true }
    }
}

/// Rendered card text: lines of styled segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedText {
    pub lines: Vec<Vec<Segment>>,
}

impl RenderedText {
    /// Plain-text form with styling dropped, for logs and summaries.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const BREAK_MARKERS: [&str; 2] = ["&lt;br&gt;", "<br>"];

/// Render raw card text.
///
/// Emphasis is non-greedy and non-nesting: scanning left to right, the first
/// pair of markers with at least one character between them wins. An unpaired
/// marker is literal text.
pub fn render(text: &str, marker: char) -> RenderedText {
    let mut lines: Vec<Vec<Segment>> = Vec::new();
    let mut current: Vec<Segment> = Vec::new();

    for (run, strong) in emphasis_runs(text, marker) {
        for (i, piece) in split_breaks(&run).into_iter().enumerate() {
            if i > 0 {
                lines.push(std::mem::take(&mut current));
            }
            if !piece.is_empty() {
                current.push(if strong {
                    Segment::strong(piece)
                } else {
                    Segment::plain(piece)
                });
            }
        }
    }

    lines.push(current);
    RenderedText { lines }
}

/// Split text into (run, strong) pairs on emphasis markers.
fn emphasis_runs(text: &str, marker: char) -> Vec<(String, bool)> {
    let width = marker.len_utf8();
    let mut runs: Vec<(String, bool)> = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(open) = rest.find(marker) {
        let after = &rest[open + width..];
        // Closing marker must leave at least one character of content.
        let close = match after.find(marker) {
            Some(0) => after[width..].find(marker).map(|i| i + width),
            found => found,
        };
        let Some(close) = close else { break };

        plain.push_str(&rest[..open]);
        if !plain.is_empty() {
            runs.push((std::mem::take(&mut plain), false));
        }
        runs.push((after[..close].to_string(), true));
        rest = &after[close + width..];
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        runs.push((plain, false));
    }
    runs
}

/// Split a run on both line-break marker forms.
fn split_breaks(text: &str) -> Vec<String> {
    let mut pieces = vec![text.to_string()];
    for marker in BREAK_MARKERS {
        pieces = pieces
            .iter()
            .flat_map(|piece| piece.split(marker).map(str::to_string))
            .collect();
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seg(text: &str, strong: bool) -> Segment {
        Segment {
            text: text.to_string(),
            strong,
        }
    }

    #[test]
    fn plain_text_renders_lossless() {
        let rendered = render("no markup here", '*');
        assert_eq!(rendered.lines, vec![vec![seg("no markup here", false)]]);
        assert_eq!(rendered.plain(), "no markup here");
    }

    #[test]
    fn single_emphasis_span() {
        let rendered = render("a *b* c", '*');
        assert_eq!(
            rendered.lines,
            vec![vec![seg("a ", false), seg("b", true), seg(" c", false)]]
        );
    }

    #[test]
    fn emphasis_is_non_greedy() {
        let rendered = render("*a* mid *b*", '*');
        assert_eq!(
            rendered.lines,
            vec![vec![
                seg("a", true),
                seg(" mid ", false),
                seg("b", true),
            ]]
        );
    }

    #[test]
    fn unpaired_marker_is_literal() {
        let rendered = render("3 * 4 = 12", '*');
        assert_eq!(rendered.lines, vec![vec![seg("3 * 4 = 12", false)]]);
    }

    #[test]
    fn adjacent_markers_are_literal() {
        let rendered = render("a**b", '*');
        assert_eq!(rendered.lines, vec![vec![seg("a**b", false)]]);
    }

    #[test]
    fn first_pair_wins_left_to_right() {
        // The second marker cannot close on empty content, so the span
        // extends to the third marker; the trailing marker stays literal.
        let rendered = render("a**b*c*", '*');
        assert_eq!(
            rendered.lines,
            vec![vec![seg("a", false), seg("*b", true), seg("c*", false)]]
        );
    }

    #[test]
    fn literal_break_splits_lines() {
        let rendered = render("top<br>bottom", '*');
        assert_eq!(
            rendered.lines,
            vec![vec![seg("top", false)], vec![seg("bottom", false)]]
        );
    }

    #[test]
    fn encoded_break_splits_lines() {
        let rendered = render("top&lt;br&gt;bottom", '*');
        assert_eq!(
            rendered.lines,
            vec![vec![seg("top", false)], vec![seg("bottom", false)]]
        );
    }

    #[test]
    fn consecutive_breaks_keep_empty_line() {
        let rendered = render("a<br><br>b", '*');
        assert_eq!(
            rendered.lines,
            vec![vec![seg("a", false)], vec![], vec![seg("b", false)]]
        );
    }

    #[test]
    fn break_inside_emphasis_keeps_styling() {
        let rendered = render("*a<br>b*", '*');
        assert_eq!(
            rendered.lines,
            vec![vec![seg("a", true)], vec![seg("b", true)]]
        );
    }

    #[test]
    fn custom_marker() {
        let rendered = render("x 'y' z", '\'');
        assert_eq!(
            rendered.lines,
            vec![vec![seg("x ", false), seg("y", true), seg(" z", false)]]
        );
    }

    #[test]
    fn plain_joins_lines_with_newline() {
        let rendered = render("a<br>*b*", '*');
        assert_eq!(rendered.plain(), "a\nb");
    }
}
