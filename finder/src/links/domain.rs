use regex::Regex;
use url::Url;

lazy_static::lazy_static! {
    static ref LOOSE_HOST: Regex =
        Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*://)?(?:www\.)?([^/?#:\s]+)").unwrap();
}

/// Host of `url` without scheme or a leading "www.", lower case.
///
/// Falls back to a loose pattern when the URL does not parse, and to an
/// empty string when nothing host-like is found.
pub fn resolve_domain(url: &str) -> String {
    let trimmed = url.trim();
    if let Ok(parsed) = Url::parse(trimmed) {
        if let Some(host) = parsed.host_str() {
            let host = host.to_lowercase();
            return host.strip_prefix("www.").map(str::to_string).unwrap_or(host);
        }
    }

    LOOSE_HOST
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default()
}

/// True when `domain` is `key` or one of its subdomains.
pub fn domain_matches(domain: &str, key: &str) -> bool {
    domain == key
        || domain
            .strip_suffix(key)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Whether the URL has a path beyond "/".
pub fn has_path(url: &str) -> bool {
    match Url::parse(url.trim()) {
        Ok(parsed) => !parsed.path().trim_matches('/').is_empty(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_domain_strips_scheme_and_www() {
        assert_eq!(resolve_domain("https://www.zalando.fr/robe.html"), "zalando.fr");
        assert_eq!(resolve_domain("https://www2.hm.com/fr_fr/index.html"), "www2.hm.com");
        assert_eq!(resolve_domain("HTTP://WWW.Asos.COM/fr/"), "asos.com");
    }

    #[test]
    fn test_resolve_domain_without_scheme() {
        assert_eq!(resolve_domain("www.sarenza.com/bottines"), "sarenza.com");
        assert_eq!(resolve_domain("fr.shein.com"), "fr.shein.com");
        assert_eq!(resolve_domain(""), "");
    }

    #[test]
    fn test_domain_matches_subdomains_only() {
        assert!(domain_matches("www2.hm.com", "hm.com"));
        assert!(domain_matches("hm.com", "hm.com"));
        assert!(!domain_matches("ohm.com", "hm.com"));
    }

    #[test]
    fn test_has_path() {
        assert!(has_path("https://www.clarks.fr/c/desert-chelsea-2/26078358.html"));
        assert!(!has_path("https://www.clarks.fr/"));
        assert!(!has_path("not a url"));
    }
}
