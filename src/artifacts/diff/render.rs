use crate::artifacts::diff::segment::{Diff, DiffMode, DiffSegment, SegmentTag, diff};
use colored::Colorize;

const ELISION: &str = "......";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffFormatOptions {
    /// Line count above which unchanged lines far from any change are elided.
    pub large_file_threshold: usize,
    /// Unchanged lines kept on each side of a change in a large file.
    pub large_file_ambient_lines: usize,
    /// Hard cap on rendered lines, legend included.
    pub diff_display_threshold: usize,
    /// Use ANSI colors instead of plain-text change markers.
    pub colorize: bool,
}

impl Default for DiffFormatOptions {
    fn default() -> Self {
        Self {
            large_file_threshold: 100,
            large_file_ambient_lines: 5,
            diff_display_threshold: 150,
            colorize: false,
        }
    }
}

impl DiffFormatOptions {
    fn removed(&self, text: String) -> String {
        if self.colorize {
            text.red().to_string()
        } else {
            text
        }
    }

    fn added(&self, text: String) -> String {
        if self.colorize {
            text.green().to_string()
        } else {
            text
        }
    }

    fn elision(&self, text: String) -> String {
        if self.colorize {
            text.cyan().to_string()
        } else {
            text
        }
    }
}

/// Diffs and formats in one step.
pub fn render(expected: &str, actual: &str, options: &DiffFormatOptions) -> String {
    format_diff(&diff(expected, actual), options)
}

pub fn format_diff(diff: &Diff, options: &DiffFormatOptions) -> String {
    let lines: Vec<String> = match diff.mode {
        DiffMode::Words => format_words(&diff.segments, options)
            .split('\n')
            .map(str::to_string)
            .collect(),
        DiffMode::Lines => format_lines(&diff.segments, options),
    };

    cap_lines(lines, options.diff_display_threshold).join("\n")
}

fn format_words(segments: &[DiffSegment], options: &DiffFormatOptions) -> String {
    segments
        .iter()
        .map(|segment| match segment.tag {
            SegmentTag::Kept => segment.value.clone(),
            SegmentTag::Added if options.colorize => options.added(segment.value.clone()),
            SegmentTag::Removed if options.colorize => options.removed(segment.value.clone()),
            SegmentTag::Added => format!("{{+{}+}}", segment.value),
            SegmentTag::Removed => format!("[-{}-]", segment.value),
        })
        .collect()
}

fn format_lines(segments: &[DiffSegment], options: &DiffFormatOptions) -> Vec<String> {
    // lines of the result side, the length a reader navigates by
    let kept_line_count: usize = segments
        .iter()
        .filter(|s| !s.is_removed())
        .map(|s| s.count)
        .sum();

    let mut lines = vec![
        options.removed("- baseline".to_string()),
        options.added("+ result".to_string()),
    ];

    if kept_line_count > options.large_file_threshold {
        lines.extend(format_windowed(segments, kept_line_count, options));
    } else {
        lines.extend(format_contiguous(segments, options));
    }

    lines
}

fn format_contiguous(segments: &[DiffSegment], options: &DiffFormatOptions) -> Vec<String> {
    segments
        .iter()
        .flat_map(|segment| {
            segment.lines().map(move |line| match segment.tag {
                SegmentTag::Kept => format!("  {line}"),
                SegmentTag::Added => options.added(format!("+ {line}")),
                SegmentTag::Removed => options.removed(format!("- {line}")),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowLine<'s> {
    Kept { number: usize, text: &'s str },
    Removed { number: usize, text: &'s str },
    Added { text: &'s str },
}

impl WindowLine<'_> {
    fn number(&self) -> Option<usize> {
        match self {
            WindowLine::Kept { number, .. } | WindowLine::Removed { number, .. } => Some(*number),
            WindowLine::Added { .. } => None,
        }
    }
}

/// Numbers every baseline line and records the anchors around each change.
///
/// Added lines have no baseline position and take no number. An added run
/// anchors at the line before it; a removed run anchors at the line before
/// its first line and at its own last line.
fn number_lines(segments: &[DiffSegment]) -> (Vec<WindowLine<'_>>, Vec<usize>, usize) {
    let mut number = 0;
    let mut lines = Vec::new();
    let mut anchors = Vec::new();

    for segment in segments {
        match segment.tag {
            SegmentTag::Added => {
                anchors.push(number);
                lines.extend(segment.lines().map(|text| WindowLine::Added { text }));
            }
            SegmentTag::Removed => {
                anchors.push(number);
                for text in segment.lines() {
                    number += 1;
                    lines.push(WindowLine::Removed { number, text });
                }
                anchors.push(number);
            }
            SegmentTag::Kept => {
                for text in segment.lines() {
                    number += 1;
                    lines.push(WindowLine::Kept { number, text });
                }
            }
        }
    }

    (lines, anchors, number)
}

fn format_windowed(
    segments: &[DiffSegment],
    kept_line_count: usize,
    options: &DiffFormatOptions,
) -> Vec<String> {
    let width = kept_line_count.to_string().len();
    let range = options.large_file_ambient_lines;
    let (lines, anchors, last_number) = number_lines(segments);

    // anchor - range < n <= anchor + range
    let near_anchor = |n: usize| anchors.iter().any(|&a| a < n + range && n <= a + range);
    let elision = || options.elision(format!("{:width$}  {ELISION}", ""));

    let mut output = Vec::new();
    let mut previous = 0;

    for line in lines {
        if let WindowLine::Kept { number, .. } = line
            && !near_anchor(number)
        {
            continue;
        }

        if let Some(number) = line.number() {
            if number != previous + 1 {
                output.push(elision());
            }
            previous = number;
        }

        output.push(match line {
            WindowLine::Kept { number, text } => format!("{number:>width$}:   {text}"),
            WindowLine::Removed { number, text } => {
                options.removed(format!("{number:>width$}: - {text}"))
            }
            WindowLine::Added { text } => options.added(format!("{:width$}  + {text}", "")),
        });
    }

    if previous < last_number {
        output.push(elision());
    }

    output
}

fn cap_lines(mut lines: Vec<String>, threshold: usize) -> Vec<String> {
    if lines.len() <= threshold {
        return lines;
    }

    let total = lines.len();
    let omitted = total - threshold;
    lines.truncate(threshold);
    lines.push(format!(
        "... {omitted} more lines omitted, raise diff_display_threshold to at least {total} to see them all"
    ));

    lines
}
