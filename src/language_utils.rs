/*!
 * Target-script detection helpers.
 *
 * Some source files in the tree already contain Chinese text. Sending those
 * through a translation backend wastes API spend and can degrade the text,
 * so the batch runner copies them verbatim when the share of Han characters
 * crosses a configurable threshold. The ratio check is a heuristic policy,
 * not a language detector.
 */

/// CJK Unified Ideographs block
const HAN_RANGE: std::ops::RangeInclusive<char> = '\u{4e00}'..='\u{9fff}';

/// Whether a character is a Han ideograph
pub fn is_han_char(c: char) -> bool {
    HAN_RANGE.contains(&c)
}

/// Share of Han characters in the text, over all characters.
/// Returns 0.0 for empty input.
pub fn han_ratio(text: &str) -> f32 {
    let mut total = 0usize;
    let mut han = 0usize;
    for c in text.chars() {
        total += 1;
        if is_han_char(c) {
            han += 1;
        }
    }

    if total == 0 {
        0.0
    } else {
        han as f32 / total as f32
    }
}

/// Whether the text is predominantly target-script and should be copied
/// verbatim instead of translated
pub fn is_mostly_target_script(text: &str, threshold: f32) -> bool {
    text.chars().any(is_han_char) && han_ratio(text) > threshold
}
