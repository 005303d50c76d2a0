/// Score awarded to a non-contiguous, in-order character match.
pub const SUBSEQUENCE_SCORE: u32 = 60;

/// Ceiling for substring matches; the match position is subtracted from it.
pub const SUBSTRING_BASE: u32 = 100;

/// Scores `text` against `query`.
///
/// An empty query matches everything with the lowest positive score so that
/// unranked listings keep their input order. Substring matches outrank
/// subsequence matches, and earlier substring matches outrank later ones.
/// Returns 0 when the query does not match at all.
#[must_use]
pub fn score(query: &str, text: &str) -> u32 {
    if query.is_empty() {
        return 1;
    }

    let q = query.to_lowercase();
    let t = text.to_lowercase();

    if let Some(byte_idx) = t.find(&q) {
        let char_idx = t[..byte_idx].chars().count();
        return SUBSTRING_BASE.saturating_sub(char_idx as u32);
    }

    if is_subsequence(&q, &t) {
        SUBSEQUENCE_SCORE
    } else {
        0
    }
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut wanted = needle.chars().peekable();
    for c in haystack.chars() {
        match wanted.peek() {
            Some(&w) if w == c => {
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    wanted.peek().is_none()
}
