/// Sanitize recognized text before layout and parsing.
/// Strips control characters, maps ideographic and no-break spaces to ASCII
/// spaces, trims lines and drops blank ones. CJK text and report punctuation
/// (full-width colons, parentheses, ↑/↓, ℃) pass through untouched.
pub fn sanitize_extracted_text(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '\u{3000}' | '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\t' => Some(' '),
            '\n' => Some('\n'),
            c if c.is_control() => None,
            '\u{200B}' | '\u{FEFF}' => None,
            c => Some(c),
        })
        .collect::<String>()
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_bytes() {
        let raw = "血红蛋白\x00: 150";
        let clean = sanitize_extracted_text(raw);
        assert_eq!(clean, "血红蛋白: 150");
    }

    #[test]
    fn strips_control_characters() {
        let raw = "体重: 68kg\x01\x02\x03\n身高: 172cm";
        let clean = sanitize_extracted_text(raw);
        assert_eq!(clean, "体重: 68kg\n身高: 172cm");
    }

    #[test]
    fn normalizes_ideographic_and_no_break_spaces() {
        let raw = "白细胞计数\u{3000}6.2\u{00A0}10^9/L";
        assert_eq!(sanitize_extracted_text(raw), "白细胞计数 6.2 10^9/L");
    }

    #[test]
    fn preserves_report_punctuation() {
        let raw = "体温：36.8℃ ↑ (复查)";
        assert_eq!(sanitize_extracted_text(raw), raw);
    }

    #[test]
    fn collapses_blank_lines() {
        let raw = "第一行\n\n\n\n第二行\r\n\n第三行";
        let clean = sanitize_extracted_text(raw);
        assert_eq!(clean, "第一行\n第二行\n第三行");
    }

    #[test]
    fn trims_whitespace_per_line() {
        let raw = "  leading spaces  \n  trailing too  ";
        assert_eq!(sanitize_extracted_text(raw), "leading spaces\ntrailing too");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(sanitize_extracted_text(""), "");
        assert_eq!(sanitize_extracted_text("\x00\x01\x02"), "");
    }

    #[test]
    fn strips_zero_width_characters() {
        assert_eq!(sanitize_extracted_text("\u{FEFF}尿\u{200B}糖"), "尿糖");
    }
}
