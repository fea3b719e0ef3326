//! Forgiving name search for company and operator pickers.

/// Case-insensitive match of `term` against `haystack`.
///
/// A match is any of:
/// - `term` is a substring of `haystack`
/// - every word of `term` is a substring of some word of `haystack`
/// - the initials of `haystack`'s words contain `term` without spaces
/// - `haystack` without spaces contains `term` without spaces
///
/// A blank term matches everything.
#[must_use]
pub fn matches(haystack: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let haystack = haystack.to_lowercase();

    if haystack.contains(&term) {
        return true;
    }

    let hay_words: Vec<&str> = haystack.split_whitespace().collect();
    if term
        .split_whitespace()
        .all(|tw| hay_words.iter().any(|hw| hw.contains(tw)))
    {
        return true;
    }

    let compact_term: String = term.split_whitespace().collect();
    let initials: String = hay_words.iter().filter_map(|w| w.chars().next()).collect();
    if initials.contains(&compact_term) {
        return true;
    }

    let compact_hay: String = hay_words.concat();
    compact_hay.contains(&compact_term)
}

/// Keep the items whose key matches `term`.
pub fn filter<T, F>(items: Vec<T>, term: &str, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    items.into_iter().filter(|item| matches(key(item), term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Supermercado La Torre", "", true)]
    #[case("Supermercado La Torre", "  ", true)]
    #[case("Supermercado La Torre", "la torre", true)]
    #[case("Supermercado La Torre", "torre super", true)]
    #[case("Supermercado La Torre", "slt", true)]
    #[case("Supermercado La Torre", "s l t", true)]
    #[case("Supermercado La Torre", "mercadolatorre", true)]
    #[case("Supermercado La Torre", "paiz", false)]
    #[case("Supermercado La Torre", "torre xyz", false)]
    #[case("JUAN PÉREZ", "pérez", true)]
    fn fuzzy_cases(#[case] haystack: &str, #[case] term: &str, #[case] expected: bool) {
        assert_eq!(matches(haystack, term), expected);
    }

    #[test]
    fn filter_keeps_order() {
        let names = vec!["Ana López", "Luis Ramos", "Ana Ruiz"];
        assert_eq!(filter(names, "ana", |n| *n), vec!["Ana López", "Ana Ruiz"]);
    }
}
