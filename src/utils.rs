use polars::prelude::{AnyValue, Column};

/// Formats an optional f64 to 2 decimal places, or returns "—" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.2}"),
        _ => "—".to_owned(),
    }
}

/// Display text of one cell; nulls render as an empty string.
pub fn cell_text(column: &Column, row: usize) -> String {
    match column.get(row) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(value) => value.str_value().into_owned(),
    }
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with "…".
pub fn truncate_cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(150.0)), "150.00");
        assert_eq!(fmt_opt(Some(f64::NAN)), "—");
        assert_eq!(fmt_opt(None), "—");
    }

    #[test]
    fn test_cell_text_nulls_are_blank() {
        let column = Column::new("VESSEL_NAME".into(), [Some("Aurora"), None]);
        assert_eq!(cell_text(&column, 0), "Aurora");
        assert_eq!(cell_text(&column, 1), "");
        assert_eq!(cell_text(&column, 7), "");
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("Aurora", 10), "Aurora");
        assert_eq!(truncate_cell("Northern Aurora", 6), "North…");
    }
}
