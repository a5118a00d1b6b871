use crate::artifacts::diff::myers::{DiffAlgorithm, Edit, MyersDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentTag {
    Kept,
    Added,
    Removed,
}

impl<T> From<&Edit<T>> for SegmentTag {
    fn from(edit: &Edit<T>) -> Self {
        match edit {
            Edit::Equal { .. } => SegmentTag::Kept,
            Edit::Insert { .. } => SegmentTag::Added,
            Edit::Delete { .. } => SegmentTag::Removed,
        }
    }
}

/// Granularity a pair of strings was diffed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    Words,
    Lines,
}

/// A run of consecutive tokens sharing one tag.
///
/// `count` is the number of lines in line mode and the number of tokens
/// (words and whitespace runs) in word mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub value: String,
    pub tag: SegmentTag,
    pub count: usize,
}

impl DiffSegment {
    pub fn is_added(&self) -> bool {
        self.tag == SegmentTag::Added
    }

    pub fn is_removed(&self) -> bool {
        self.tag == SegmentTag::Removed
    }

    /// Lines of the segment without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.value
            .split_inclusive('\n')
            .map(|line| line.strip_suffix('\n').unwrap_or(line))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub mode: DiffMode,
    pub segments: Vec<DiffSegment>,
}

impl Diff {
    pub fn is_identical(&self) -> bool {
        self.segments.iter().all(|s| s.tag == SegmentTag::Kept)
    }

    /// Rebuilds the baseline side (kept + removed segments).
    pub fn expected_text(&self) -> String {
        self.concat(SegmentTag::Added)
    }

    /// Rebuilds the result side (kept + added segments).
    pub fn actual_text(&self) -> String {
        self.concat(SegmentTag::Removed)
    }

    fn concat(&self, skip: SegmentTag) -> String {
        self.segments
            .iter()
            .filter(|s| s.tag != skip)
            .map(|s| s.value.as_str())
            .collect()
    }
}

/// Diffs `expected` (baseline) against `actual` (result).
///
/// When neither side contains a line break the comparison runs over words,
/// otherwise over lines. In line mode both non-empty inputs get a trailing
/// `\n` if they lack one, so a missing final newline never shows up as a change.
pub fn diff(expected: &str, actual: &str) -> Diff {
    if !expected.contains('\n') && !actual.contains('\n') {
        let a = tokenize_words(expected);
        let b = tokenize_words(actual);

        return Diff {
            mode: DiffMode::Words,
            segments: group_edits(&MyersDiff::new(&a, &b).diff()),
        };
    }

    let expected = terminate_line(expected);
    let actual = terminate_line(actual);
    let a = expected.split_inclusive('\n').collect::<Vec<_>>();
    let b = actual.split_inclusive('\n').collect::<Vec<_>>();

    Diff {
        mode: DiffMode::Lines,
        segments: group_edits(&MyersDiff::new(&a, &b).diff()),
    }
}

fn terminate_line(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

/// Splits text into alternating runs of whitespace and non-whitespace.
fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

fn group_edits(edits: &[Edit<&str>]) -> Vec<DiffSegment> {
    let mut segments: Vec<DiffSegment> = Vec::new();

    for edit in edits {
        let tag = SegmentTag::from(edit);
        let token = *edit.value();

        match segments.last_mut() {
            Some(last) if last.tag == tag => {
                last.value.push_str(token);
                last.count += 1;
            }
            _ => segments.push(DiffSegment {
                value: token.to_string(),
                tag,
                count: 1,
            }),
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn segment(value: &str, tag: SegmentTag, count: usize) -> DiffSegment {
        DiffSegment {
            value: value.to_string(),
            tag,
            count,
        }
    }

    #[test]
    fn single_line_inputs_are_diffed_by_word() {
        let diff = diff("a b", "a c");

        assert_eq!(diff.mode, DiffMode::Words);
        assert_eq!(
            diff.segments,
            vec![
                segment("a ", SegmentTag::Kept, 2),
                segment("b", SegmentTag::Removed, 1),
                segment("c", SegmentTag::Added, 1),
            ]
        );
    }

    #[test]
    fn multi_line_inputs_are_diffed_by_line() {
        let diff = diff("a\nb", "a\nc");

        assert_eq!(diff.mode, DiffMode::Lines);
        assert_eq!(
            diff.segments,
            vec![
                segment("a\n", SegmentTag::Kept, 1),
                segment("b\n", SegmentTag::Removed, 1),
                segment("c\n", SegmentTag::Added, 1),
            ]
        );
    }

    #[rstest]
    #[case("one\ntwo", "one\ntwo\n")]
    #[case("one\ntwo\n", "one\ntwo")]
    fn missing_final_newline_is_not_a_change(#[case] expected: &str, #[case] actual: &str) {
        let diff = diff(expected, actual);

        assert!(diff.is_identical());
        assert_eq!(diff.segments, vec![segment("one\ntwo\n", SegmentTag::Kept, 2)]);
    }

    #[test]
    fn a_line_break_on_either_side_selects_line_mode() {
        assert_eq!(diff("", "x\n").mode, DiffMode::Lines);
        assert_eq!(diff("x\ny", "").mode, DiffMode::Lines);
        assert_eq!(diff("", "x").mode, DiffMode::Words);
    }

    #[test]
    fn segment_lines_strip_terminators() {
        let segment = segment("x\ny\n", SegmentTag::Kept, 2);

        assert_eq!(segment.lines().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn words_keep_whitespace_runs_as_tokens() {
        assert_eq!(tokenize_words("  ab\tc  d"), vec!["  ", "ab", "\t", "c", "  ", "d"]);
        assert!(tokenize_words("").is_empty());
    }

    proptest! {
        #[test]
        fn segments_rebuild_both_sides(
            expected in "[ab \n]{0,40}",
            actual in "[ab \n]{0,40}",
        ) {
            let diff = diff(&expected, &actual);

            let (expected, actual) = match diff.mode {
                DiffMode::Words => (expected, actual),
                DiffMode::Lines => (terminate_line(&expected), terminate_line(&actual)),
            };

            prop_assert_eq!(diff.expected_text(), expected);
            prop_assert_eq!(diff.actual_text(), actual);
        }
    }
}
