//! Prompt fragments shared by both providers.

/// Extra instruction appended for Hinglish explanations.
pub(crate) const HINGLISH_INSTRUCTION: &str = "For Hinglish responses, mix Hindi and \
     English naturally as people do in conversation. Use Hindi words for emotions, \
     expressions, and cultural references while keeping technical terms in English.";

/// Build the user-facing request text, naming the meme's origin.
pub(crate) fn user_text(language: &str, meme_url: Option<&str>) -> String {
    let origin = match meme_url {
        Some(url) => format!("The meme was found at: {url}"),
        None => "This meme was uploaded by the user.".to_string(),
    };
    format!("Please analyze this meme and explain it in {language}. {origin}")
}
