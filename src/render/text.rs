//! Text measurement, truncation, and wrapping utilities.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Longest prefix of `text` fitting `max_px`, ending in an ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    for keep in (0..chars.len()).rev() {
        let candidate: String = chars[..keep].iter().chain(std::iter::once(&'…')).collect();
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            return if keep == 0 { String::new() } else { candidate };
        }
    }
    String::new()
}

/// Wrap on word boundaries to fit `max_px`; words longer than a line are truncated.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            cur = candidate;
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        if estimate_text_width_px(word, font_px) <= max_px {
            cur = word.to_string();
        } else {
            lines.push(truncate_to_width(word, font_px, max_px));
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Climat", 10, 200), "Climat");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        let out = truncate_to_width("Électricité renouvelable", 10, 60);
        assert!(out.ends_with('…'));
        assert!(estimate_text_width_px(&out, 10) <= 60);
    }

    #[test]
    fn wraps_on_words() {
        let lines = wrap_text_to_width("Trajectoire compatible 1.5°C", 10, 100);
        assert_eq!(lines, vec!["Trajectoire", "compatible 1.5°C"]);
    }
}
