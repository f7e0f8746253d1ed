/*!
 * Small language-code helpers.
 *
 * Media containers tag streams with a mix of ISO 639-1 and 639-2 codes
 * ("ja" vs "jpn"), and prompts want human-readable names. The app only deals
 * with a handful of languages, so a static table is enough.
 */

/// Human-readable language name for an ISO code, used in prompts and track
/// matching. Unknown codes pass through unchanged.
pub fn language_display_name(code: &str) -> &str {
    match code.to_lowercase().as_str() {
        "ja" | "jpn" => "Japanese",
        "en" | "eng" => "English",
        "zh" | "zho" | "chi" => "Chinese",
        "ko" | "kor" => "Korean",
        "fr" | "fra" | "fre" => "French",
        "de" | "deu" | "ger" => "German",
        "es" | "spa" => "Spanish",
        _ => code,
    }
}

/// Whether two language codes refer to the same language, tolerating the
/// 639-1 / 639-2 split (e.g. "ja" matches "jpn").
pub fn language_codes_match(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    let name_a = language_display_name(a);
    let name_b = language_display_name(b);
    // Both resolved to a known name: compare names. Unknown codes only match
    // exactly.
    name_a != a && name_b != b && name_a == name_b
}
