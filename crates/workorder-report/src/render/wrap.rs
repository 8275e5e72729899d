/// Hard-wrap `text` into lines of at most `width` characters.
///
/// Breaks fall exactly where the line estimator assumes them, so the number
/// of returned lines always equals `estimate_lines(text, width)`.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let width = width.max(1);
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let segment = segment.strip_suffix('\r').unwrap_or(segment);
        let chars: Vec<char> = segment.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}
