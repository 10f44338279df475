//! Text shaping helpers: greedy word wrap, bullet splitting, date ranges.

use crate::layout::font_metrics::FontMetricTable;

/// Greedy word wrap at `max_width_pt`.
///
/// Whitespace runs collapse to single spaces. A word wider than the line is
/// placed alone on its own line (no hyphenation). An empty string yields no
/// lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let max_width = max_width_pt / size_pt;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + metrics.space_width + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += metrics.space_width + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits a description into bullet texts.
///
/// One bullet per non-blank line; a single leading `•` or `-` is stripped,
/// the glyph is drawn by the renderer.
pub fn bullet_lines(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.strip_prefix('•')
                .or_else(|| line.strip_prefix('-'))
                .unwrap_or(line)
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Formats `start - end`, with `Present` when `current` is set.
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let start = start.trim();
    let end = if current { "Present" } else { end.trim() };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} - {end}"),
    }
}

/// Joins the non-blank parts with `sep`.
pub fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFamily, Weight};

    fn sans() -> &'static FontMetricTable {
        get_metrics(FontFamily::Sans, Weight::Regular)
    }

    #[test]
    fn test_wrap_empty_yields_no_lines() {
        assert!(wrap_text("   ", sans(), 10.0, 200.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap_text("Hello   world", sans(), 10.0, 200.0), vec!["Hello world"]);
    }

    #[test]
    fn test_wrap_lines_fit_width() {
        let text = "Architected a distributed caching layer using Redis and consistent hashing, \
                    reducing p99 latency by 40% under 50k RPS peak load";
        let lines = wrap_text(text, sans(), 9.0, 180.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            if line.contains(' ') {
                assert!(sans().width_pt(line, 9.0) <= 180.0 + 1e-3, "{line}");
            }
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let lines = wrap_text("a Pneumonoultramicroscopicsilicovolcanoconiosis b", sans(), 10.0, 60.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Pneumonoultramicroscopicsilicovolcanoconiosis");
    }

    #[test]
    fn test_bullet_lines_strip_markers_and_blanks() {
        let desc = "• Shipped v2\n\n- Cut costs 20%\n   \nMentored 4 engineers\n-\n";
        assert_eq!(
            bullet_lines(desc),
            vec!["Shipped v2", "Cut costs 20%", "Mentored 4 engineers"]
        );
    }

    #[test]
    fn test_bullet_lines_strip_only_one_marker() {
        assert_eq!(bullet_lines("- -5% churn"), vec!["-5% churn"]);
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range("2020", "2023", false), "2020 - 2023");
        assert_eq!(date_range("2020", "", true), "2020 - Present");
        assert_eq!(date_range("2020", "2021", true), "2020 - Present");
        assert_eq!(date_range("", "", false), "");
        assert_eq!(date_range("2019", " ", false), "2019");
    }

    #[test]
    fn test_join_present_skips_blank() {
        assert_eq!(join_present(&["Acme", " ", "Berlin"], " | "), "Acme | Berlin");
    }
}
