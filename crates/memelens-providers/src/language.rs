//! Explanation language table.

/// Code for the Hinglish (code-switched Hindi-English) option.
pub const HINGLISH: &str = "hi-en";

/// Map a short language code to a display name for prompts.
///
/// Unrecognized codes fall back to English; the provider defaults gracefully.
pub fn language_name(code: &str) -> &'static str {
    match code {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "hi" => "Hindi",
        "hi-en" => "Hinglish (Hindi-English mix)",
        "ar" => "Arabic",
        _ => "English",
    }
}
