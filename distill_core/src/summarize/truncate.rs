//! Hard character cap applied to every digest, whatever produced it.

/// Appended when the cap has to cut mid-sentence.
pub const ELLIPSIS: &str = "...";

/// A full stop counts as a clean cut only past this share of the cap.
const CLEAN_CUT_FLOOR: f64 = 0.7;

const fn is_full_stop(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '。' | '！' | '？')
}

/// Truncate `text` to at most `cap` characters.
///
/// Prefers cutting right after the last full stop found at or beyond 70% of
/// the cap; otherwise cuts at `cap - 3` characters and appends [`ELLIPSIS`].
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Caps stay far below f64 mantissa range and are non-negative"
)]
pub fn hard_cap(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }

    let floor = (cap as f64 * CLEAN_CUT_FLOOR).ceil() as usize;
    let clean_cut = text
        .char_indices()
        .take(cap)
        .enumerate()
        .filter(|&(n, (_, c))| is_full_stop(c) && n + 1 >= floor)
        .map(|(_, (offset, c))| offset + c.len_utf8())
        .last();
    if let Some(end) = clean_cut {
        return text[..end].to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if cap <= ellipsis_len {
        return text.chars().take(cap).collect();
    }
    let head: String = text.chars().take(cap - ellipsis_len).collect();
    format!("{}{ELLIPSIS}", head.trim_end())
}
