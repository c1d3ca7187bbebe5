// Brazilian number and date handling shared by the engine and its presentation layer.
//
// Ledger exports are hand-edited spreadsheets, so the parsers here never fail: a value
// that cannot be read becomes 0 (amounts) or None (dates) and the row stays in the dataset.

pub mod brazilian_format {
    use chrono::{Datelike, NaiveDate};

    const CURRENCY_SYMBOL: &str = "R$";
    const MIN_YEAR: i64 = 1900;
    const MAX_YEAR: i64 = 2100;

    /// Raw amount as it may arrive from an import: already numeric, text, or absent.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum RawAmount<'a> {
        Number(f64),
        Text(&'a str),
        Missing,
    }

    impl From<f64> for RawAmount<'_> {
        fn from(value: f64) -> Self {
            RawAmount::Number(value)
        }
    }

    impl<'a> From<&'a str> for RawAmount<'a> {
        fn from(value: &'a str) -> Self {
            RawAmount::Text(value)
        }
    }

    impl<'a> From<Option<&'a str>> for RawAmount<'a> {
        fn from(value: Option<&'a str>) -> Self {
            value.map_or(RawAmount::Missing, RawAmount::Text)
        }
    }

    /// Parses amounts like "1.234,56", "1234.56" or "R$ 50". Unreadable input is 0.
    pub fn parse_monetary_value<'a>(input: impl Into<RawAmount<'a>>) -> f64 {
        let value = match input.into() {
            RawAmount::Number(n) => n,
            RawAmount::Missing => 0.0,
            RawAmount::Text(text) => parse_amount_text(text),
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    fn parse_amount_text(text: &str) -> f64 {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        let cleaned = trimmed
            .strip_prefix(CURRENCY_SYMBOL)
            .unwrap_or(trimmed)
            .trim();

        // A decimal comma means '.' can only be a thousands separator.
        let normalized = if cleaned.contains(',') {
            cleaned.replace('.', "").replacen(',', ".", 1)
        } else {
            cleaned.to_string()
        };

        leading_float(&normalized).unwrap_or(0.0)
    }

    // Longest prefix that reads as a float: "12.5abc" -> 12.5, "abc" -> None.
    fn leading_float(s: &str) -> Option<f64> {
        let s = s.trim_start();
        let bytes = s.as_bytes();
        let digits_from = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let int_start = end;
        end = digits_from(end);
        let mut mantissa_digits = end - int_start;

        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            mantissa_digits += frac_end - (end + 1);
            end = frac_end;
        }
        if mantissa_digits == 0 {
            return None;
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }

        s[..end].parse::<f64>().ok()
    }

    // Leading integer with optional sign: " 07x" -> 7.
    fn leading_int(s: &str) -> Option<i64> {
        let s = s.trim_start();
        let bytes = s.as_bytes();
        let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits_start {
            return None;
        }
        s[..end].parse::<i64>().ok()
    }

    /// Parses a "dd/mm/yyyy" date. Any other shape, a year outside 1900..=2100 or a day
    /// that does not exist in that month yields None.
    pub fn parse_local_date(input: &str) -> Option<NaiveDate> {
        if !input.contains('/') {
            return None;
        }
        let parts: Vec<&str> = input.split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return None;
        };

        let day = leading_int(day)?;
        let month = leading_int(month)?;
        let year = leading_int(year)?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        let date = NaiveDate::from_ymd_opt(
            i32::try_from(year).ok()?,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )?;
        // from_ymd_opt already rejects rollover dates; keep the round-trip explicit.
        let round_trips = i64::from(date.year()) == year
            && i64::from(date.month()) == month
            && i64::from(date.day()) == day;
        round_trips.then_some(date)
    }

    pub fn format_local_date(date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    /// Formats with '.' as thousands separator and ',' as decimal separator.
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        if let Some(frac) = frac_part {
            grouped.push(',');
            grouped.push_str(frac);
        }

        let is_zero = grouped.chars().all(|c| matches!(c, '0' | '.' | ','));
        if value.is_sign_negative() && !is_zero {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// pt-BR currency rendering, e.g. "R$ 1.234,56" and "-R$ 10,00".
    pub fn format_currency(value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let body = format_decimal(value, 2);
        match body.strip_prefix('-') {
            Some(abs) => format!("-{} {}", CURRENCY_SYMBOL, abs),
            None => format!("{} {}", CURRENCY_SYMBOL, body),
        }
    }

}
