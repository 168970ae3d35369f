//! Форматирование сумм для дашбордов

/// Целое число с разделителем тысяч (точка), как принято для đồng
///
/// `1234567.4` → `"1.234.567"`, `-1500.0` → `"-1.500"`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }
    let grouped: String = result.chars().rev().collect();

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Сумма с суффиксом валюты
pub fn format_money(value: f64) -> String {
    format!("{} ₫", format_amount(value))
}

/// Процент с одним знаком после запятой
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "0.0%".to_string()
    }
}

/// Сумма, введённая пользователем: точки, запятые и пробелы считаются
/// разделителями тысяч
///
/// `"15.000"` → `15000.0`; пустая строка и мусор дают `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let digits: String = text
        .trim()
        .trim_end_matches('₫')
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' ' | '\u{a0}'))
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}
