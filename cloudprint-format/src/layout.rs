//! Width-aware wrapping and multi-column row layout
//!
//! Provides the two layout primitives the receipt composer drives:
//! [`wrap`] for a single fixed-width column and [`FormatSpec::render`]
//! for joining several independently wrapped columns into full lines.

use tracing::instrument;

use crate::encoding::glyph_width;
use crate::error::{FormatError, FormatResult};

/// Printable cells per physical line (58 mm paper)
pub const LINE_WIDTH: usize = 32;

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Wrap `content` into lines of exactly `width` cells
///
/// A line break never splits a double-width glyph: when a glyph would
/// straddle the cut, it is deferred whole to the next line and the vacated
/// cell is filled with a single space. Intermediate lines are always full;
/// the final segment is padded out to `width` according to `align`
/// (center puts the extra cell on the right for odd remainders).
///
/// Empty content yields a single all-space line.
pub fn wrap(content: &str, width: usize, align: Align) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = 0usize;

    for c in content.chars() {
        let w = glyph_width(c);
        if used + w > width && !line.is_empty() {
            if used < width {
                // a double-width glyph would straddle the cut
                line.push(' ');
            }
            lines.push(line);
            line = String::new();
            used = 0;
        }
        line.push(c);
        used += w;
    }

    lines.push(pad(&line, used, width, align));
    lines
}

/// Pad a segment of known cell width out to `width` per `align`
fn pad(segment: &str, used: usize, width: usize, align: Align) -> String {
    if used >= width {
        return segment.to_string();
    }
    let spaces = width - used;
    match align {
        Align::Left => format!("{}{}", segment, " ".repeat(spaces)),
        Align::Right => format!("{}{}", " ".repeat(spaces), segment),
        Align::Center => {
            let left = spaces / 2;
            format!("{}{}{}", " ".repeat(left), segment, " ".repeat(spaces - left))
        }
    }
}

/// Separator rules spanning the full line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `-` across the line
    Single,
    /// `=` across the line
    Double,
    /// `*` across the line
    Star,
}

impl Rule {
    /// Render the rule as one `LINE_WIDTH`-cell line
    pub fn render(self) -> String {
        let ch = match self {
            Rule::Single => '-',
            Rule::Double => '=',
            Rule::Star => '*',
        };
        ch.to_string().repeat(LINE_WIDTH)
    }
}

/// A validated multi-column row layout
///
/// Holds ordered column widths, alignments and optional per-column markup
/// labels, plus the inter-column gap computed from the leftover width.
/// Validation happens at construction; a spec that exists always renders.
#[derive(Debug, Clone)]
pub struct FormatSpec {
    widths: Vec<usize>,
    aligns: Vec<Align>,
    labels: Vec<Option<String>>,
    gap: usize,
}

impl FormatSpec {
    /// Two columns; the single gap absorbs all leftover width
    pub fn two_part(widths: [usize; 2], aligns: [Align; 2]) -> FormatResult<Self> {
        Self::validated(widths.to_vec(), aligns.to_vec())
    }

    /// Two columns with the stock widths `[15, 15]`, both centered
    pub fn two_part_default() -> FormatResult<Self> {
        Self::two_part([15, 15], [Align::Center, Align::Center])
    }

    /// Three columns; leftover width must split evenly across 2 gaps
    pub fn three_part(widths: [usize; 3], aligns: [Align; 3]) -> FormatResult<Self> {
        Self::validated(widths.to_vec(), aligns.to_vec())
    }

    /// Three columns with the stock widths `[18, 8, 2]`
    pub fn three_part_default() -> FormatResult<Self> {
        Self::three_part([18, 8, 2], [Align::Left, Align::Right, Align::Right])
    }

    /// Four columns; leftover width must split evenly across 3 gaps
    pub fn four_part(widths: [usize; 4], aligns: [Align; 4]) -> FormatResult<Self> {
        Self::validated(widths.to_vec(), aligns.to_vec())
    }

    /// Four columns with the stock widths `[14, 6, 3, 6]`
    pub fn four_part_default() -> FormatResult<Self> {
        Self::four_part(
            [14, 6, 3, 6],
            [Align::Left, Align::Right, Align::Right, Align::Right],
        )
    }

    fn validated(widths: Vec<usize>, aligns: Vec<Align>) -> FormatResult<Self> {
        let total: usize = widths.iter().sum();
        if total > LINE_WIDTH {
            return Err(FormatError::WidthOverflow {
                total,
                limit: LINE_WIDTH,
            });
        }

        let gaps = widths.len() - 1;
        let leftover = LINE_WIDTH - total;
        if leftover % gaps != 0 {
            return Err(FormatError::UnevenGap { leftover, gaps });
        }

        let labels = vec![None; widths.len()];
        Ok(Self {
            widths,
            aligns,
            labels,
            gap: leftover / gaps,
        })
    }

    /// Attach per-column markup labels, e.g. `Some("BOLD")` for `<BOLD>…</BOLD>`
    ///
    /// One entry per column; `None` leaves the column unwrapped.
    pub fn with_labels(mut self, labels: &[Option<&str>]) -> FormatResult<Self> {
        if labels.len() != self.widths.len() {
            return Err(FormatError::PartCount {
                expected: self.widths.len(),
                got: labels.len(),
            });
        }
        self.labels = labels.iter().map(|l| l.map(str::to_string)).collect();
        Ok(self)
    }

    /// Column count of this spec
    pub fn parts(&self) -> usize {
        self.widths.len()
    }

    /// Render one row: wrap every column, equalize line counts with blank
    /// cells, then join with the inter-column gap
    ///
    /// Returns `max(wrapped-line-counts)` lines, each `LINE_WIDTH` cells
    /// wide before markup labels are applied.
    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, parts: &[&str]) -> FormatResult<Vec<String>> {
        if parts.len() != self.widths.len() {
            return Err(FormatError::PartCount {
                expected: self.widths.len(),
                got: parts.len(),
            });
        }

        let columns: Vec<Vec<String>> = parts
            .iter()
            .zip(self.widths.iter().zip(self.aligns.iter()))
            .map(|(content, (&width, &align))| wrap(content, width, align))
            .collect();

        let rows = columns.iter().map(Vec::len).max().unwrap_or(1);
        let gap = " ".repeat(self.gap);

        let mut out = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut line = String::new();
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    line.push_str(&gap);
                }
                let cell = match column.get(row) {
                    Some(cell) => cell.clone(),
                    None => " ".repeat(self.widths[i]),
                };
                match &self.labels[i] {
                    Some(label) => {
                        line.push_str(&format!("<{label}>{cell}</{label}>"));
                    }
                    None => line.push_str(&cell),
                }
            }
            out.push(line);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::gbk_width;

    #[test]
    fn test_wrap_fits_single_line() {
        let lines = wrap("hello", 10, Align::Left);
        assert_eq!(lines, vec!["hello     "]);
        assert_eq!(gbk_width(&lines[0]), 10);
    }

    #[test]
    fn test_wrap_alignment() {
        assert_eq!(wrap("hi", 5, Align::Left), vec!["hi   "]);
        assert_eq!(wrap("hi", 5, Align::Right), vec!["   hi"]);
        // odd remainder: extra cell goes right
        assert_eq!(wrap("ab", 5, Align::Center), vec![" ab  "]);
    }

    #[test]
    fn test_wrap_empty_content() {
        assert_eq!(wrap("", 4, Align::Left), vec!["    "]);
    }

    #[test]
    fn test_wrap_multi_line_exact_widths() {
        let lines = wrap("abcdefghij", 4, Align::Left);
        assert_eq!(lines, vec!["abcd", "efgh", "ij  "]);
        for line in &lines {
            assert_eq!(gbk_width(line), 4);
        }
    }

    #[test]
    fn test_wrap_never_splits_double_glyph() {
        // each glyph is 2 cells; width 5 leaves one dangling cell per line
        let lines = wrap("一二三四五", 5, Align::Left);
        assert_eq!(lines, vec!["一二 ", "三四 ", "五   "]);
        for line in &lines {
            assert_eq!(gbk_width(line), 5);
        }
    }

    #[test]
    fn test_wrap_reconstructs_content() {
        let content = "菜品名称超过列宽需要换行处理ABC";
        let lines = wrap(content, 10, Align::Left);
        assert!(lines.len() >= 2);
        let rebuilt: String = lines.iter().map(|l| l.trim_end()).collect();
        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_wrap_mixed_ascii_cjk_boundary() {
        // "a" + "中" (1+2) then cut at width 2 must defer the glyph
        let lines = wrap("a中b", 2, Align::Left);
        assert_eq!(lines, vec!["a ", "中", "b "]);
    }

    #[test]
    fn test_rule_render() {
        assert_eq!(Rule::Single.render(), "-".repeat(32));
        assert_eq!(Rule::Double.render(), "=".repeat(32));
        assert_eq!(Rule::Star.render(), "*".repeat(32));
    }

    #[test]
    fn test_two_part_reference_row() {
        // reference layout: widths [10, 20], 2-cell gap, 32 cells total
        let spec = FormatSpec::two_part([10, 20], [Align::Left, Align::Right]).unwrap();
        let lines = spec.render(&["餐厅名称:", "XX食堂"]).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(gbk_width(&lines[0]), 32);
        assert!(lines[0].starts_with("餐厅名称:"));
        assert!(lines[0].ends_with("XX食堂"));
    }

    #[test]
    fn test_render_pads_short_columns() {
        let spec = FormatSpec::four_part(
            [14, 5, 4, 6],
            [Align::Left, Align::Right, Align::Right, Align::Right],
        )
        .unwrap();
        // name is 24 cells wide, wraps into 2 lines; numbers stay 1 line
        let lines = spec
            .render(&["超长商品名称一二三四五六", "10.00", "2", "20.00"])
            .unwrap();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(gbk_width(line), 32);
        }
        // second row: numeric columns are blank-filled
        assert!(lines[1].ends_with("      "));
    }

    #[test]
    fn test_render_labels_wrap_cells() {
        let spec = FormatSpec::two_part([10, 20], [Align::Left, Align::Right])
            .unwrap()
            .with_labels(&[None, Some("BOLD")])
            .unwrap();
        let lines = spec.render(&["合计:", "12.50元"]).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("<BOLD>"));
        assert!(lines[0].ends_with("</BOLD>"));
        // width invariant holds once labels are stripped
        let stripped = lines[0].replace("<BOLD>", "").replace("</BOLD>", "");
        assert_eq!(gbk_width(&stripped), 32);
    }

    #[test]
    fn test_width_overflow_rejected() {
        let err = FormatSpec::two_part([20, 20], [Align::Left, Align::Right]).unwrap_err();
        assert_eq!(
            err,
            FormatError::WidthOverflow {
                total: 40,
                limit: LINE_WIDTH
            }
        );
    }

    #[test]
    fn test_uneven_gap_rejected() {
        // leftover 3 cannot split across 2 gaps
        let err =
            FormatSpec::three_part([18, 8, 3], [Align::Left, Align::Right, Align::Right])
                .unwrap_err();
        assert_eq!(err, FormatError::UnevenGap { leftover: 3, gaps: 2 });

        // leftover 4 cannot split across 3 gaps
        let err = FormatSpec::four_part(
            [14, 6, 3, 5],
            [Align::Left, Align::Right, Align::Right, Align::Right],
        )
        .unwrap_err();
        assert_eq!(err, FormatError::UnevenGap { leftover: 4, gaps: 3 });
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(FormatSpec::two_part_default().is_ok());
        assert!(FormatSpec::three_part_default().is_ok());
        assert!(FormatSpec::four_part_default().is_ok());
    }

    #[test]
    fn test_render_part_count_mismatch() {
        let spec = FormatSpec::two_part_default().unwrap();
        let err = spec.render(&["only one"]).unwrap_err();
        assert_eq!(err, FormatError::PartCount { expected: 2, got: 1 });
    }
}
