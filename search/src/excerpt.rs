const WINDOW: usize = 200;
const STEP: usize = 50;
const BACKUP: usize = 50;

/// Slide a fixed window over the lowercased body, find the region hit by
/// the most distinct query tokens, and slice `max_len` bytes around it.
/// Bodies shorter than the window are taken from the start.
pub(crate) fn extract(content: &str, tokens: &[String], max_len: usize) -> String {
    if content.is_empty() {
        return String::new();
    }
    let lower = content.to_lowercase();
    let mut best_pos = 0;
    let mut best_hits = 0;
    if lower.len() > WINDOW {
        let mut i = 0;
        while i < lower.len() - WINDOW {
            let window = &lower[align(&lower, i)..align(&lower, i + WINDOW)];
            let hits = tokens
                .iter()
                .filter(|tok| window.contains(tok.as_str()))
                .count();
            if hits > best_hits {
                best_hits = hits;
                best_pos = i;
            }
            i += STEP;
        }
    }

    let start = align(content, best_pos.saturating_sub(BACKUP).min(content.len()));
    let end = align(content, (start + max_len).min(content.len()));
    let mut excerpt = content[start..end].trim().to_string();
    if start > 0 {
        excerpt = format!("...{excerpt}");
    }
    if end < content.len() {
        excerpt = format!("{excerpt}...");
    }
    excerpt
}

/// Snap a byte offset back to the nearest UTF-8 character boundary.
fn align(s: &str, mut idx: usize) -> usize {
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_returned_whole() {
        let out = extract("Rigidbody2D moves things.", &["rigidbody2d".into()], 300);
        assert_eq!(out, "Rigidbody2D moves things.");
    }

    #[test]
    fn excerpt_centers_on_the_densest_window() {
        let filler = "lorem ipsum dolor sit amet ".repeat(20);
        let body = format!("{filler}Rigidbody2D applies physics forces to sprites. {filler}");
        let out = extract(&body, &["physics".into(), "forces".into()], 300);
        assert!(out.starts_with("..."));
        assert!(out.ends_with("..."));
        assert!(out.contains("physics forces"));
    }

    #[test]
    fn multibyte_bodies_do_not_split_characters() {
        let body = "日本語".repeat(100);
        let out = extract(&body, &["zz".into()], 100);
        assert!(out.ends_with("..."));
    }
}
