/// Language codes accepted by the translation collaborator, paired with
/// display names for the glossary.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("pt", "Portuguese"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ru", "Russian"),
    ("zh-Hans", "Chinese (Simplified)"),
];

pub fn name_for(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

pub fn print_glossary() {
    println!("--- LANGUAGE CODE GLOSSARY ---");
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("{:<10} : {}", code, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_names() {
        assert_eq!(name_for("pt"), Some("Portuguese"));
        assert_eq!(name_for("zh-Hans"), Some("Chinese (Simplified)"));
    }

    #[test]
    fn unknown_codes_resolve_to_none() {
        assert_eq!(name_for("xx"), None);
        assert_eq!(name_for("PT"), None);
    }
}
