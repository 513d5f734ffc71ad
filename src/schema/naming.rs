//! Naming heuristics for generated record types
//!
//! Names only label record types and key the type cache; they never change
//! validation outcomes. Forms that are not recognized are left unchanged.

use heck::ToUpperCamelCase;

/// Plurals that do not follow a suffix rule
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("indices", "index"),
    ("vertices", "vertex"),
    ("matrices", "matrix"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("statuses", "status"),
    ("movies", "movie"),
    ("cookies", "cookie"),
];

/// Words that are the same in singular and plural
const UNCOUNTABLE: &[&str] = &[
    "data",
    "metadata",
    "media",
    "news",
    "series",
    "species",
    "information",
    "sheep",
    "fish",
];

/// Derive a record type name from a field or operation name
///
/// `body_images` becomes `BodyImages`, `votd` becomes `Votd`.
pub fn type_name(field: &str) -> String {
    let name = field.to_upper_camel_case();
    if name.is_empty() {
        field.to_string()
    } else {
        name
    }
}

/// Naming context for the elements of a list found under `context`
pub fn element_context(context: &str) -> String {
    type_name(&singularize(context))
}

/// Strip English plural markers from the last word of `word`
///
/// Works on snake_case, kebab-case and CamelCase names; only the last word
/// is changed (`plan_completions` → `plan_completion`, `BodyImages` → `BodyImage`).
pub fn singularize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    if last.is_empty() {
        return word.to_string();
    }

    let lower = last.to_ascii_lowercase();
    let upper_tail = last.ends_with(|c: char| c.is_ascii_uppercase());

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return format!("{head}{}", match_case(last, singular));
    }

    let stem = if lower.len() > 4 && lower.ends_with("ies") {
        let y = if upper_tail { "Y" } else { "y" };
        format!("{}{y}", &last[..last.len() - 3])
    } else if ["sses", "xes", "ches", "shes", "zes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        last[..last.len() - 2].to_string()
    } else if lower.len() > 1
        && lower.ends_with('s')
        && !["ss", "us", "is"].iter().any(|suffix| lower.ends_with(suffix))
    {
        last[..last.len() - 1].to_string()
    } else {
        return word.to_string();
    };

    format!("{head}{stem}")
}

/// Split a name into everything before its last word and the last word
fn split_last_word(word: &str) -> (&str, &str) {
    let boundary = word
        .char_indices()
        .rev()
        .find(|(i, c)| matches!(c, '_' | '-' | ' ') || (c.is_uppercase() && *i > 0))
        .map_or(0, |(i, c)| if c.is_uppercase() { i } else { i + c.len_utf8() });

    // All-caps words like `URLs` split on their last capital; keep them whole
    let (head, last) = word.split_at(boundary);
    if last.len() <= 2 && head.ends_with(|c: char| c.is_uppercase()) {
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_uppercase())
            .map_or(0, |(i, c)| i + c.len_utf8());
        return word.split_at(start);
    }
    (head, last)
}

/// Copy the capitalization of the first letter of `original` onto `replacement`
fn match_case(original: &str, replacement: &str) -> String {
    if original.starts_with(|c: char| c.is_uppercase()) {
        let mut chars = replacement.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod naming_tests {
    use super::*;
    use test_case::test_case;

    #[test_case("verses", "verse" ; "regular plural")]
    #[test_case("Moments", "Moment" ; "capitalized plural")]
    #[test_case("Moment", "Moment" ; "already singular")]
    #[test_case("Votd", "Votd" ; "no plural marker")]
    #[test_case("categories", "category" ; "ies to y")]
    #[test_case("matches", "match" ; "ches")]
    #[test_case("boxes", "box" ; "xes")]
    #[test_case("classes", "class" ; "sses")]
    #[test_case("class", "class" ; "ss unchanged")]
    #[test_case("status", "status" ; "us unchanged")]
    #[test_case("statuses", "status" ; "irregular status")]
    #[test_case("people", "person" ; "irregular")]
    #[test_case("data", "data" ; "uncountable")]
    #[test_case("body_images", "body_image" ; "snake case last word")]
    #[test_case("PlanCompletions", "PlanCompletion" ; "camel case last word")]
    #[test_case("RecommendedLanguages", "RecommendedLanguage" ; "ges")]
    #[test_case("URLs", "URL" ; "acronym plural")]
    #[test_case("s", "s" ; "single letter")]
    #[test_case("", "" ; "empty")]
    fn test_singularize(input: &str, expected: &str) {
        assert_eq!(singularize(input), expected);
    }

    #[test_case("verses", "Verses")]
    #[test_case("body_images", "BodyImages")]
    #[test_case("usfm", "Usfm")]
    #[test_case("votd", "Votd")]
    #[test_case("Moment", "Moment")]
    fn test_type_name(input: &str, expected: &str) {
        assert_eq!(type_name(input), expected);
    }

    #[test]
    fn test_element_context() {
        assert_eq!(element_context("verses"), "Verse");
        assert_eq!(element_context("Verses"), "Verse");
        assert_eq!(element_context("body_images"), "BodyImage");
        assert_eq!(element_context("Moment"), "Moment");
        assert_eq!(element_context("people"), "Person");
    }

    #[test]
    fn test_type_name_falls_back_to_field() {
        assert_eq!(type_name("_"), "_");
    }
}
