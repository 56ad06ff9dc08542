//! Page layout for paged exports.
//!
//! Letters are laid out on A4 with 20 mm margins and a 7 mm line pitch.
//! Lines are wrapped at whitespace using an average glyph width, and a page
//! holds as many lines as fit between the top and bottom margins. Wrapping
//! only inserts line breaks: indentation, repeated spaces and every
//! character of the text are kept.

const MM_TO_PT: f64 = 72.0 / 25.4;

/// Average DejaVu Sans glyph width as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f64 = 0.55;

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    pub line_height_mm: f64,
    pub font_size_pt: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageLayout {
    /// A4 portrait with the letter defaults.
    pub fn a4() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
            line_height_mm: 7.0,
            font_size_pt: 11.0,
        }
    }

    /// Baseline of a line, measured up from the bottom edge.
    pub fn baseline_mm(&self, row: usize) -> f64 {
        self.page_height_mm - self.margin_mm - row as f64 * self.line_height_mm
    }

    /// Characters that fit on one line.
    pub fn max_columns(&self) -> usize {
        let text_width = (self.page_width_mm - 2.0 * self.margin_mm) * MM_TO_PT;
        let glyph = self.font_size_pt * AVERAGE_GLYPH_WIDTH;
        ((text_width / glyph).floor() as usize).max(1)
    }

    /// Lines that fit between the margins.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - 2.0 * self.margin_mm;
        ((usable / self.line_height_mm).floor() as usize).max(1)
    }

    /// Wrap text into display lines. Blank lines are kept.
    ///
    /// Whitespace at a break point is dropped; all other text is unchanged.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let width = self.max_columns();
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            wrap_paragraph(paragraph.trim_end_matches('\r'), width, &mut lines);
        }
        lines
    }

    /// Wrap text and split it into pages.
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        self.wrap(text)
            .chunks(self.lines_per_page())
            .map(<[String]>::to_vec)
            .collect()
    }
}

fn wrap_paragraph(paragraph: &str, width: usize, out: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_len = 0;
    // Whitespace seen since the last word; dropped if the line breaks there
    let mut gap = "";

    for segment in segments(paragraph) {
        if segment.starts_with(char::is_whitespace) {
            gap = segment;
            continue;
        }

        let gap_len = gap.chars().count();
        let word_len = segment.chars().count();
        if line_len > 0 && line_len + gap_len + word_len > width && !line.trim().is_empty() {
            out.push(std::mem::take(&mut line));
            line_len = 0;
        } else {
            line.push_str(gap);
            line_len += gap_len;
        }
        gap = "";

        // Hard-split words longer than the room left
        let mut rest = segment;
        while line_len + rest.chars().count() > width {
            let room = width.saturating_sub(line_len);
            if room == 0 {
                out.push(std::mem::take(&mut line));
                line_len = 0;
                continue;
            }
            let split = rest.char_indices().nth(room).map_or(rest.len(), |(i, _)| i);
            line.push_str(&rest[..split]);
            out.push(std::mem::take(&mut line));
            line_len = 0;
            rest = &rest[split..];
        }
        line.push_str(rest);
        line_len += rest.chars().count();
    }

    line.push_str(gap);
    out.push(line);
}

/// Split text into alternating runs of whitespace and non-whitespace.
fn segments(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            runs.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        runs.push(&text[start..]);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow(columns: usize, lines: usize) -> PageLayout {
        // Solve the geometry backwards so tests can reason in characters
        let glyph_mm = 11.0 * AVERAGE_GLYPH_WIDTH / MM_TO_PT;
        PageLayout {
            page_width_mm: columns as f64 * glyph_mm + 2.0 + 0.01,
            page_height_mm: lines as f64 * 7.0 + 2.0,
            margin_mm: 1.0,
            line_height_mm: 7.0,
            font_size_pt: 11.0,
        }
    }

    #[test]
    fn test_a4_geometry() {
        let layout = PageLayout::a4();
        assert_eq!(layout.lines_per_page(), 36);
        assert_eq!(layout.max_columns(), 79);
        assert_eq!(layout.baseline_mm(0), 277.0);
        assert_eq!(layout.baseline_mm(2), 263.0);
    }

    #[test]
    fn test_wrap_on_word_boundaries() {
        let layout = narrow(10, 36);
        assert_eq!(layout.max_columns(), 10);
        assert_eq!(
            layout.wrap("one two three four"),
            vec!["one two", "three four"]
        );
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        let layout = narrow(10, 36);
        assert_eq!(layout.wrap("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(layout.wrap(""), vec![""]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let layout = narrow(4, 36);
        assert_eq!(layout.wrap("abcdefghij x"), vec!["abcd", "efgh", "ij x"]);
    }

    #[test]
    fn test_wrap_keeps_indentation_and_spacing() {
        let layout = narrow(40, 36);
        assert_eq!(
            layout.wrap("Re: Łódź office, Ελλάδα team\n    indented  double  space\n\ttab "),
            vec![
                "Re: Łódź office, Ελλάδα team",
                "    indented  double  space",
                "\ttab ",
            ]
        );
    }

    #[test]
    fn test_wrap_only_drops_whitespace_at_breaks() {
        let layout = narrow(10, 36);
        let text = "  alpha  beta gamma   delta";
        let lines = layout.wrap(text);
        assert_eq!(lines, vec!["  alpha", "beta gamma", "delta"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));

        let kept: String = lines.concat().split_whitespace().collect();
        let original: String = text.split_whitespace().collect();
        assert_eq!(kept, original);
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        let layout = narrow(4, 36);
        assert_eq!(layout.wrap("ŁÓDŹŁÓDŹ"), vec!["ŁÓDŹ", "ŁÓDŹ"]);
    }

    #[test]
    fn test_paginate() {
        let layout = narrow(10, 3);
        assert_eq!(layout.lines_per_page(), 3);
        let pages = layout.paginate("1\n2\n3\n4\n5");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], vec!["1", "2", "3"]);
        assert_eq!(pages[1], vec!["4", "5"]);
    }
}
