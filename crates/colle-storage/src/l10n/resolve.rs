use super::Language;

/// Picks the display language from the available hints, strongest first:
/// an explicit `lang` request parameter, then the visitor's stored
/// preference, then the hostname (a `fr` subdomain or `.fr`-style suffix),
/// and finally English.
pub fn resolve_language(
    query: Option<&str>,
    stored: Option<&str>,
    hostname: Option<&str>,
) -> Language {
    if let Some(language) = query.and_then(Language::from_key) {
        return language;
    }
    if let Some(language) = stored.and_then(Language::from_key) {
        return language;
    }
    if let Some(host) = hostname {
        let host = host.trim().to_ascii_lowercase();
        if host.starts_with("fr.") || host.ends_with(".fr") {
            return Language::Fr;
        }
    }
    Language::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parameter_beats_everything() {
        let language = resolve_language(Some("fr"), Some("en"), Some("collestorage.com"));
        assert_eq!(language, Language::Fr);
    }

    #[test]
    fn stored_preference_beats_hostname() {
        let language = resolve_language(None, Some("en"), Some("fr.collestorage.com"));
        assert_eq!(language, Language::En);
    }

    #[test]
    fn hostname_hint_applies_when_nothing_else_set() {
        assert_eq!(
            resolve_language(None, None, Some("fr.collestorage.com")),
            Language::Fr
        );
        assert_eq!(
            resolve_language(None, None, Some("entreposagecolle.fr")),
            Language::Fr
        );
    }

    #[test]
    fn garbage_hints_fall_through_to_default() {
        assert_eq!(
            resolve_language(Some("de"), Some("xx"), Some("collestorage.com")),
            Language::En
        );
        assert_eq!(resolve_language(None, None, None), Language::En);
    }
}
