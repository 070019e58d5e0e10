//! Per-merchant deep link rewriting.
//!
//! Each merchant maps to an ordered list of rules; the first rule whose
//! pattern matches wins. Every rewritten URL either fails to match its
//! merchant's rules or rewrites to itself, so canonicalization is idempotent.

use regex::{Captures, Regex};

use super::domain::{domain_matches, resolve_domain};

/// How captures are substituted into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// Replace `{id}` with the given capture group.
    Single(usize),
    /// Replace `{1}`, `{2}`, ... with the matching capture groups.
    AllGroups,
}

#[derive(Debug)]
pub struct RewriteRule {
    pattern: Regex,
    template: &'static str,
    substitution: Substitution,
}

impl RewriteRule {
    fn new(pattern: &str, template: &'static str, substitution: Substitution) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            template,
            substitution,
        }
    }

    fn apply(&self, url: &str) -> Option<String> {
        let captures = self.pattern.captures(url)?;
        render(self.template, self.substitution, &captures)
    }
}

fn render(template: &str, substitution: Substitution, captures: &Captures<'_>) -> Option<String> {
    match substitution {
        Substitution::Single(group) => {
            let id = captures.get(group)?.as_str();
            Some(template.replace("{id}", id))
        }
        Substitution::AllGroups => {
            let mut rendered = template.to_string();
            for group in 1..captures.len() {
                let value = captures.get(group)?.as_str();
                rendered = rendered.replace(&format!("{{{group}}}"), value);
            }
            Some(rendered)
        }
    }
}

pub struct MerchantRules {
    pub domains: &'static [&'static str],
    pub rules: Vec<RewriteRule>,
}

const AMAZON_DOMAINS: &[&str] = &[
    "amazon.fr",
    "amazon.com",
    "amazon.de",
    "amazon.co.uk",
    "amazon.it",
    "amazon.es",
];

lazy_static::lazy_static! {
    static ref MERCHANTS: Vec<MerchantRules> = {
        use Substitution::{AllGroups, Single};
        vec![
            MerchantRules {
                domains: &["zalando.fr"],
                rules: vec![RewriteRule::new(
                    r"(?i)-([a-z0-9]{9}-[a-z0-9]{3})\.html(?:[?#].*)?$",
                    "https://www.zalando.fr/article/{id}",
                    Single(1),
                )],
            },
            MerchantRules {
                domains: &["hm.com"],
                rules: vec![RewriteRule::new(
                    r"(?i)productpage\.([0-9]+)\.html",
                    "https://www2.hm.com/fr_fr/productpage.{id}.html",
                    Single(1),
                )],
            },
            MerchantRules {
                domains: &["asos.com", "asos.fr"],
                rules: vec![
                    RewriteRule::new(
                        r"(?i)/prd/([0-9]+)",
                        "https://www.asos.com/fr/prd/{id}",
                        Single(1),
                    ),
                    RewriteRule::new(
                        r"/([0-9]{5,})/?(?:[?#].*)?$",
                        "https://www.asos.com/fr/prd/{id}",
                        Single(1),
                    ),
                ],
            },
            MerchantRules {
                domains: &["laredoute.fr"],
                rules: vec![RewriteRule::new(
                    r"(?i)/ppdp/prod-([0-9]+)\.aspx",
                    "https://www.laredoute.fr/ppdp/prod-{id}.aspx",
                    Single(1),
                )],
            },
            MerchantRules {
                domains: &["zara.com"],
                rules: vec![RewriteRule::new(
                    r"(?i)-p([0-9]{8})\.html",
                    "https://www.zara.com/fr/fr/-p{id}.html",
                    Single(1),
                )],
            },
            MerchantRules {
                domains: &["sarenza.com"],
                rules: vec![RewriteRule::new(
                    r"(?i)/[^/]+-s([0-9]+)\.aspx",
                    "https://www.sarenza.com/produit/{id}",
                    Single(1),
                )],
            },
            MerchantRules {
                domains: &["spartoo.com"],
                rules: vec![RewriteRule::new(
                    r"(?i)/[^/]+-x([0-9]+)\.php",
                    "https://www.spartoo.com/x{id}.php",
                    Single(1),
                )],
            },
            MerchantRules {
                domains: AMAZON_DOMAINS,
                rules: vec![RewriteRule::new(
                    r"(?i)^https?://(?:www\.)?amazon\.([a-z.]+)/(?:[^?#]*/)?(?:dp|gp/product)/([A-Z0-9]{10})",
                    "https://www.amazon.{1}/dp/{2}",
                    AllGroups,
                )],
            },
        ]
    };

    static ref ZALANDO_TAIL: Regex = Regex::new(r"/[a-zA-Z0-9-]+-([a-zA-Z0-9]+)/?$").unwrap();
    static ref TRAILING_DIGITS: Regex = Regex::new(r"/([0-9]+)/?$").unwrap();
    static ref LONG_DIGITS: Regex = Regex::new(r"([0-9]{7,})").unwrap();
}

fn merchant_for(domain: &str) -> Option<&'static MerchantRules> {
    MERCHANTS
        .iter()
        .find(|m| m.domains.iter().any(|key| domain_matches(domain, key)))
}

/// Rewrite a URL into its merchant's stable product URL.
///
/// Unknown merchants and unmatched URLs are returned unchanged.
pub fn canonicalize(url: &str) -> String {
    let domain = resolve_domain(url);
    if domain.is_empty() {
        return url.to_string();
    }

    merchant_for(&domain)
        .and_then(|merchant| merchant.rules.iter().find_map(|rule| rule.apply(url)))
        .unwrap_or_else(|| url.to_string())
}

/// Last-resort guess at a product URL, tried when both the canonical and
/// the raw link are unreachable. Returns the input when no guess applies.
pub fn alternative_link(url: &str) -> String {
    let domain = resolve_domain(url);
    let path_end = url.split(['?', '#']).next().unwrap_or(url);

    if domain_matches(&domain, "zalando.fr") || domain_matches(&domain, "zalando.be") {
        if let Some(id) = ZALANDO_TAIL.captures(path_end).and_then(|c| c.get(1)) {
            return format!("https://www.{domain}/article/{}", id.as_str());
        }
    }

    if domain_matches(&domain, "asos.com") {
        if let Some(id) = TRAILING_DIGITS.captures(path_end).and_then(|c| c.get(1)) {
            return format!("https://www.asos.com/fr/prd/{}", id.as_str());
        }
    }

    if domain_matches(&domain, "hm.com") {
        if let Some(id) = LONG_DIGITS.captures(url).and_then(|c| c.get(1)) {
            return format!("https://www2.hm.com/fr_fr/productpage.{}.html", id.as_str());
        }
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zalando_article() {
        assert_eq!(
            canonicalize("https://www.zalando.fr/selected-homme-slhlouis-chelsea-boot-bottines-marron-se622d0dy-o11.html"),
            "https://www.zalando.fr/article/se622d0dy-o11"
        );
    }

    #[test]
    fn test_hm_productpage() {
        assert_eq!(
            canonicalize("https://www2.hm.com/en_gb/productpage.1115237001.html?x=1"),
            "https://www2.hm.com/fr_fr/productpage.1115237001.html"
        );
    }

    #[test]
    fn test_asos_rules_in_order() {
        let url = "https://www.asos.com/fr/asos-design/robe-cape/prd/203080653?clr=navy";
        assert_eq!(canonicalize(url), "https://www.asos.com/fr/prd/203080653");
        assert_eq!(
            canonicalize("https://www.asos.com/asos-design/robe/203080653"),
            "https://www.asos.com/fr/prd/203080653"
        );
    }

    #[test]
    fn test_zara_and_amazon() {
        assert_eq!(
            canonicalize("https://www.zara.com/fr/fr/robe-mi-longue-effet-cape-p02731168.html"),
            "https://www.zara.com/fr/fr/-p02731168.html"
        );
        assert_eq!(
            canonicalize("https://www.amazon.co.uk/Clarks-Desert-Boot/dp/B07ABCDE12/ref=sr_1_1"),
            "https://www.amazon.co.uk/dp/B07ABCDE12"
        );
    }

    #[test]
    fn test_unknown_merchant_is_identity() {
        let url = "https://www.veja-store.com/fr/v10.html";
        assert_eq!(canonicalize(url), url);
        assert_eq!(canonicalize("not a url at all"), "not a url at all");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let urls = [
            "https://www.zalando.fr/selected-homme-slhlouis-chelsea-boot-bottines-marron-se622d0dy-o11.html",
            "https://www2.hm.com/fr_fr/productpage.1115237001.html",
            "https://www.asos.com/fr/asos-design/robe-cape/prd/203080653",
            "https://www.asos.com/asos-design/robe/203080653",
            "https://www.laredoute.fr/ppdp/prod-512345678.aspx?dpt=1",
            "https://www.zara.com/fr/fr/robe-mi-longue-effet-cape-p02731168.html",
            "https://www.sarenza.com/clarks-desert-boot-s1234567.aspx",
            "https://www.spartoo.com/Clarks-Desert-Boot-x1234567.php",
            "https://www.amazon.fr/Clarks-Desert-Boot/dp/B07ABCDE12",
            "https://www.zalando.fr/recherche/?q=robe",
            "https://www.veja-store.com/fr/",
        ];
        for url in urls {
            let once = canonicalize(url);
            assert_eq!(canonicalize(&once), once, "not idempotent for {url}");
        }
    }

    #[test]
    fn test_alternative_link() {
        assert_eq!(
            alternative_link("https://www.zalando.fr/clarks-desert-boot-cl512b01x"),
            "https://www.zalando.fr/article/cl512b01x"
        );
        assert_eq!(
            alternative_link("https://www.asos.com/asos-design/robe/203080653"),
            "https://www.asos.com/fr/prd/203080653"
        );
        assert_eq!(
            alternative_link("https://www2.hm.com/fr_fr/robe-1115237001"),
            "https://www2.hm.com/fr_fr/productpage.1115237001.html"
        );
        assert_eq!(
            alternative_link("https://www.clarks.fr/c/desert"),
            "https://www.clarks.fr/c/desert"
        );
    }
}
