use regex::Regex;
use std::sync::OnceLock;

const CONSENT_WORDS: [&str; 5] = ["sí", "si", "claro", "por supuesto", "ok"];
const CONFIRMATION_WORDS: [&str; 5] = ["sí", "si", "ok", "bien", "perfecto"];

/// 只比對完整的詞："necesito" 裡的 "si" 不算同意
fn word_pattern(words: &[&str]) -> Regex {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
        .unwrap_or_else(|e| panic!("invalid word pattern: {e}"))
}

fn consent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| word_pattern(&CONSENT_WORDS))
}

fn confirmation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| word_pattern(&CONFIRMATION_WORDS))
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(\p{Lu}\p{Ll}+(?:\s+\p{Lu}\p{Ll}+)+)\b")
            .unwrap_or_else(|e| panic!("invalid name pattern: {e}"))
    })
}

/// 每個字母序列首字大寫，其餘小寫
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}

/// 從回答中取出姓名：先找連續兩個以上首字大寫的詞，否則接受 2 到 3 個詞的回答
pub fn extract_name(text: &str) -> Option<String> {
    let titled = title_case(text.trim());
    if let Some(m) = name_pattern().find(&titled) {
        return Some(m.as_str().to_string());
    }

    let words: Vec<&str> = titled.split_whitespace().collect();
    if (2..=3).contains(&words.len()) {
        return Some(words.join(" "));
    }
    None
}

/// 只保留數字，長度需在 8 到 15 位之間
pub fn extract_phone(text: &str) -> Option<String> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if (8..=15).contains(&digits.len()) {
        Some(digits)
    } else {
        None
    }
}

pub fn is_consent(text: &str) -> bool {
    consent_pattern().is_match(&text.to_lowercase())
}

pub fn is_confirmation(text: &str) -> bool {
    confirmation_pattern().is_match(&text.to_lowercase())
}

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// `2024-01-02` -> `02 de enero`; cualquier otro formato se devuelve tal cual
pub fn spoken_date(date: &str) -> String {
    match chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => {
            use chrono::Datelike;
            format!("{} de {}", d.format("%d"), MONTHS[d.month0() as usize])
        }
        Err(_) => date.to_string(),
    }
}
