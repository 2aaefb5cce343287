//! Country-name resolution: free-text guesses -> canonical country.
//!
//! Matching is exact on the normalized form. Aliases are consulted first,
//! then the normalized canonical display names. Both lookup tables are built
//! once on first use.

pub mod aliases;
pub mod gazetteer;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use aliases::ALIAS_ENTRIES;
use gazetteer::COUNTRY_ENTRIES;

/// Characters removed during normalization. Includes the typographic
/// apostrophe that phone keyboards substitute for `'`.
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '\'', '\u{2019}', '-', '(', ')'];

/// A guess that resolved to a canonical country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedCountry {
    pub iso_code: &'static str,
    pub display_name: &'static str,
}

static COUNTRIES_BY_ISO: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRY_ENTRIES.iter().copied().collect());

static ALIAS_TO_ISO: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(ALIAS_ENTRIES.len());
    for &(alias, iso) in ALIAS_ENTRIES {
        let key = normalize(alias);
        if !key.is_empty() {
            map.entry(key).or_insert(iso);
        }
    }
    map
});

static NORMALIZED_NAME_TO_ISO: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(COUNTRY_ENTRIES.len());
    for &(iso, name) in COUNTRY_ENTRIES {
        let key = normalize(name);
        if !key.is_empty() {
            map.entry(key).or_insert(iso);
        }
    }
    tracing::debug!(entries = map.len(), "built normalized country name table");
    map
});

/// Normalize user input for matching.
///
/// Trims, lowercases, drops the punctuation in [`STRIPPED_PUNCTUATION`] and
/// collapses whitespace runs to a single space, so `"  U.S.A. "` becomes
/// `"usa"`. Idempotent.
pub fn normalize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a free-text guess to a canonical country, or `None`.
pub fn resolve(input: &str) -> Option<ResolvedCountry> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return None;
    }

    let iso = ALIAS_TO_ISO
        .get(&normalized)
        .or_else(|| NORMALIZED_NAME_TO_ISO.get(&normalized))
        .copied()?;

    // An alias pointing at a code the gazetteer lacks resolves to nothing.
    let display_name = display_name(iso)?;
    Some(ResolvedCountry {
        iso_code: iso,
        display_name,
    })
}

/// Canonical display name for a code.
pub fn display_name(iso_code: &str) -> Option<&'static str> {
    COUNTRIES_BY_ISO.get(iso_code).copied()
}

/// The canonical code -> display name table.
pub fn countries_by_iso() -> &'static HashMap<&'static str, &'static str> {
    &COUNTRIES_BY_ISO
}

/// All canonical codes, in gazetteer order.
pub fn country_iso_codes() -> Vec<&'static str> {
    COUNTRY_ENTRIES.iter().map(|&(iso, _)| iso).collect()
}

/// Curated aliases for a code, as written in the alias table.
pub fn aliases_for(iso_code: &str) -> impl Iterator<Item = &'static str> + '_ {
    ALIAS_ENTRIES
        .iter()
        .filter(move |&&(_, iso)| iso == iso_code)
        .map(|&(alias, _)| alias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  USA  "), "usa");
        assert_eq!(normalize("U.S.A."), "usa");
        assert_eq!(normalize("Korea   (South)"), "korea south");
        assert_eq!(normalize("\tSouth\n Korea "), "south korea");
        assert_eq!(normalize("Guinea-Bissau"), "guineabissau");
        assert_eq!(normalize(" ( ) "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "U.S.A.",
            "Côte d'Ivoire",
            "  Bosnia - and -  Herzegovina ",
            "Lao People's Democratic Republic",
            "Türkiye",
            "a . b , c ; d : e",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_resolve_united_states_variants() {
        for input in ["USA", "usa", "U.S.A.", "United States", "united states of america"] {
            let resolved = resolve(input).expect(input);
            assert_eq!(resolved.iso_code, "US");
            assert_eq!(resolved.display_name, "United States of America");
        }
    }

    #[test]
    fn test_resolve_aliases_and_canonical_names() {
        assert_eq!(resolve("UK").map(|r| r.iso_code), Some("GB"));
        assert_eq!(resolve("South Korea").map(|r| r.iso_code), Some("KR"));
        let czech = resolve("Czech Republic").expect("czech republic");
        assert_eq!(czech.iso_code, "CZ");
        assert_eq!(czech.display_name, "Czechia");
        assert_eq!(resolve("ivory coast").map(|r| r.iso_code), Some("CI"));
        assert_eq!(resolve("Cote d'Ivoire").map(|r| r.iso_code), Some("CI"));
        assert_eq!(resolve("Côte d’Ivoire").map(|r| r.iso_code), Some("CI"));
        assert_eq!(resolve("france").map(|r| r.display_name), Some("France"));
        assert_eq!(resolve("Timor-Leste").map(|r| r.iso_code), Some("TL"));
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("   "), None);
        assert_eq!(resolve("Not a country"), None);
        assert_eq!(resolve("Frabce"), None);
        assert_eq!(resolve("fra"), None);
    }

    #[test]
    fn test_every_alias_targets_known_code() {
        for &(alias, iso) in ALIAS_ENTRIES {
            assert!(display_name(iso).is_some(), "alias {:?} -> unknown {}", alias, iso);
        }
    }

    #[test]
    fn test_aliases_do_not_conflict() {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for &(alias, iso) in ALIAS_ENTRIES {
            let key = normalize(alias);
            if let Some(prev) = seen.insert(key.clone(), iso) {
                assert_eq!(prev, iso, "alias {:?} maps to both {} and {}", key, prev, iso);
            }
        }
        for &(alias, iso) in ALIAS_ENTRIES {
            if let Some(&canonical) = NORMALIZED_NAME_TO_ISO.get(&normalize(alias)) {
                assert_eq!(canonical, iso, "alias {:?} shadows a canonical name", alias);
            }
        }
    }

    #[test]
    fn test_gazetteer_is_consistent() {
        let codes = country_iso_codes();
        assert!(codes.len() > 150);
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
        assert_eq!(countries_by_iso().get("US"), Some(&"United States of America"));
        for &(iso, name) in COUNTRY_ENTRIES {
            assert_eq!(resolve(name).map(|r| r.iso_code), Some(iso), "{}", name);
        }
    }

    #[test]
    fn test_aliases_for() {
        let us: Vec<_> = aliases_for("US").collect();
        assert!(us.contains(&"USA"));
        assert_eq!(aliases_for("ZZ").count(), 0);
    }
}
