//! Change payload resolution.
//!
//! A proposal carries `{original?, proposed, diff?}`. The diff is a
//! line-level edit script derived from a longest-common-subsequence walk:
//! deterministic for a given input pair, and revertible — the proposed and
//! original texts are both exactly reconstructible from the script alone.

use serde::{Deserialize, Serialize};

/// One line of a diff script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "line", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffOp {
    /// Line present in both texts.
    Keep(String),
    /// Line present only in the original.
    Delete(String),
    /// Line present only in the proposal.
    Insert(String),
}

/// The change payload attached to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Target content at submission time; absent for new chapters.
    pub original: Option<String>,
    /// The content the proposal wants in place.
    pub proposed: String,
    /// Edit script from original to proposed; absent for new chapters.
    pub diff: Option<Vec<DiffOp>>,
}

/// The three kinds of proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrType {
    /// Add a chapter under an existing parent.
    NewChapter,
    /// Rewrite an existing chapter's content.
    EditChapter,
    /// Tombstone an existing chapter.
    DeleteChapter,
}

/// Splits into lines such that `join("\n")` reproduces the input exactly.
/// The empty text has no lines.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Computes the line-level edit script from `original` to `proposed`.
///
/// Classic LCS dynamic program; on ties the walk emits deletions before
/// insertions, so a replaced line always reads delete-then-insert.
#[must_use]
pub fn line_diff(original: &str, proposed: &str) -> Vec<DiffOp> {
    let old = split_lines(original);
    let new = split_lines(proposed);

    // lcs[i][j] = LCS length of old[i..] and new[j..].
    let mut lcs = vec![vec![0_usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(old.len().max(new.len()));
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            ops.push(DiffOp::Keep(old[i].to_owned()));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(DiffOp::Delete(old[i].to_owned()));
            i += 1;
        } else {
            ops.push(DiffOp::Insert(new[j].to_owned()));
            j += 1;
        }
    }
    while i < old.len() {
        ops.push(DiffOp::Delete(old[i].to_owned()));
        i += 1;
    }
    while j < new.len() {
        ops.push(DiffOp::Insert(new[j].to_owned()));
        j += 1;
    }
    ops
}

/// Reconstructs the proposed text from an edit script.
#[must_use]
pub fn apply(ops: &[DiffOp]) -> String {
    let lines: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            DiffOp::Keep(line) | DiffOp::Insert(line) => Some(line.as_str()),
            DiffOp::Delete(_) => None,
        })
        .collect();
    lines.join("\n")
}

/// Reconstructs the original text from an edit script.
#[must_use]
pub fn revert(ops: &[DiffOp]) -> String {
    let lines: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            DiffOp::Keep(line) | DiffOp::Delete(line) => Some(line.as_str()),
            DiffOp::Insert(_) => None,
        })
        .collect();
    lines.join("\n")
}

/// Resolves the change payload for a proposal.
///
/// `current` is the target chapter's content at submission time; callers
/// pass `None` only for `NewChapter`, where there is nothing to compare
/// against.
#[must_use]
pub fn resolve_changes(pr_type: PrType, current: Option<&str>, proposed: String) -> ChangeSet {
    match pr_type {
        PrType::NewChapter => ChangeSet {
            original: None,
            proposed,
            diff: None,
        },
        PrType::EditChapter => {
            let original = current.unwrap_or_default().to_owned();
            let diff = line_diff(&original, &proposed);
            ChangeSet {
                original: Some(original),
                proposed,
                diff: Some(diff),
            }
        }
        PrType::DeleteChapter => {
            let original = current.unwrap_or_default().to_owned();
            let diff = line_diff(&original, "");
            ChangeSet {
                original: Some(original),
                proposed: String::new(),
                diff: Some(diff),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_diff_to_all_keeps() {
        let ops = line_diff("one\ntwo", "one\ntwo");

        assert_eq!(
            ops,
            vec![
                DiffOp::Keep("one".to_owned()),
                DiffOp::Keep("two".to_owned()),
            ]
        );
    }

    #[test]
    fn test_replaced_line_reads_delete_then_insert() {
        let ops = line_diff("one\ntwo\nthree", "one\n2\nthree");

        assert_eq!(
            ops,
            vec![
                DiffOp::Keep("one".to_owned()),
                DiffOp::Delete("two".to_owned()),
                DiffOp::Insert("2".to_owned()),
                DiffOp::Keep("three".to_owned()),
            ]
        );
    }

    #[test]
    fn test_diff_round_trips_both_directions() {
        let cases = [
            ("", "fresh text"),
            ("doomed text", ""),
            ("a\nb\nc", "a\nc\nd"),
            ("keeps\ntrailing\n", "keeps\ntrailing\nmore\n"),
            ("one line", "one line"),
        ];

        for (original, proposed) in cases {
            let ops = line_diff(original, proposed);
            assert_eq!(apply(&ops), proposed, "apply failed for {original:?}");
            assert_eq!(revert(&ops), original, "revert failed for {original:?}");
        }
    }

    #[test]
    fn test_diff_is_deterministic() {
        let a = line_diff("the\nquick\nbrown\nfox", "the\nslow\nbrown\nbear");
        let b = line_diff("the\nquick\nbrown\nfox", "the\nslow\nbrown\nbear");

        assert_eq!(a, b);
    }

    #[test]
    fn test_new_chapter_changes_have_no_original_and_no_diff() {
        let changes = resolve_changes(PrType::NewChapter, None, "A new branch.".to_owned());

        assert_eq!(changes.original, None);
        assert_eq!(changes.proposed, "A new branch.");
        assert_eq!(changes.diff, None);
    }

    #[test]
    fn test_edit_chapter_changes_snapshot_the_current_content() {
        let changes = resolve_changes(
            PrType::EditChapter,
            Some("old line"),
            "new line".to_owned(),
        );

        assert_eq!(changes.original.as_deref(), Some("old line"));
        assert_eq!(changes.proposed, "new line");
        let diff = changes.diff.unwrap();
        assert_eq!(
            diff,
            vec![
                DiffOp::Delete("old line".to_owned()),
                DiffOp::Insert("new line".to_owned()),
            ]
        );
    }

    #[test]
    fn test_delete_chapter_changes_tombstone_everything() {
        let changes = resolve_changes(
            PrType::DeleteChapter,
            Some("first\nsecond"),
            "ignored".to_owned(),
        );

        assert_eq!(changes.original.as_deref(), Some("first\nsecond"));
        assert_eq!(changes.proposed, "");
        let diff = changes.diff.unwrap();
        assert!(diff.iter().all(|op| matches!(op, DiffOp::Delete(_))));
        assert_eq!(diff.len(), 2);
    }
}
