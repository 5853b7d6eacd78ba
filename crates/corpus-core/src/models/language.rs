//! Languages accepted by the corpus platform.

/// Supported languages, canonical lower-case form.
pub const ALLOWED_LANGUAGES: [&str; 22] = [
    "assamese",
    "bengali",
    "bodo",
    "dogri",
    "gujarati",
    "hindi",
    "kannada",
    "kashmiri",
    "konkani",
    "maithili",
    "malayalam",
    "marathi",
    "meitei",
    "nepali",
    "odia",
    "punjabi",
    "sanskrit",
    "santali",
    "sindhi",
    "tamil",
    "telugu",
    "urdu",
];

/// Case-insensitive membership check. Surrounding whitespace is not stripped.
pub fn is_allowed_language(language: &str) -> bool {
    let lower = language.to_lowercase();
    ALLOWED_LANGUAGES.contains(&lower.as_str())
}

/// "hindi" -> "Hindi"
pub fn display_name(language: &str) -> String {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
