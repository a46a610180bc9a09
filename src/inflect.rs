//! English pluralization for collection keys.
//!
//! Only the last word of a camelCase / snake_case identifier is inflected
//! (`userProfile` → `userProfiles`, `line_item` → `line_items`); its capitalization is
//! kept (`Person` → `People`, `SHEEP` → `SHEEP`).

/// Key for a root node: first character lower-cased, then pluralized.
pub fn collection_name(name: &str) -> String {
    let mut chars = name.chars();
    let head = match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    pluralize(&head)
}

pub fn pluralize(ident: &str) -> String {
    let (prefix, word) = ident.split_at(last_word_start(ident));
    if word.is_empty() {
        return ident.to_string();
    }
    let lower = word.to_lowercase();
    let plural = plural_of(&lower);
    format!("{prefix}{}", restore_case(word, &lower, &plural))
}

// ———————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ———————————————————————————————————————————————————————————————————————————

const UNCOUNTABLE: &[&str] = &[
    "advice", "aircraft", "bison", "data", "deer", "equipment", "evidence", "feedback",
    "fish", "furniture", "information", "jeans", "knowledge", "luggage", "media", "metadata",
    "money", "moose", "news", "police", "rice", "series", "sheep", "species", "staff",
    "swine", "traffic", "trout", "tuna",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("die", "dice"),
    ("quiz", "quizzes"),
    ("human", "humans"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("appendix", "appendices"),
];

const UM_TO_A: &[&str] = &["datum", "medium", "curriculum", "bacterium", "memorandum", "stratum"];
const US_TO_I: &[&str] = &["alumnus", "cactus", "fungus", "nucleus", "radius", "stimulus", "syllabus"];
const O_TO_OES: &[&str] = &["echo", "hero", "potato", "tomato", "torpedo", "veto"];

fn plural_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == word) {
        return plural.to_string();
    }
    if let Some(stem) = UM_TO_A.contains(&word).then(|| word.strip_suffix("um")).flatten() {
        return format!("{stem}a");
    }
    if let Some(stem) = US_TO_I.contains(&word).then(|| word.strip_suffix("us")).flatten() {
        return format!("{stem}i");
    }
    if O_TO_OES.contains(&word) {
        return format!("{word}es");
    }
    for (suffix, plural) in [("knife", "knives"), ("wife", "wives"), ("life", "lives")] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{stem}{plural}");
        }
    }
    for suffix in ["arf", "lf", "eaf", "eof", "oaf", "hoof"] {
        if let Some(stem) = word.strip_suffix('f').filter(|_| word.ends_with(suffix)) {
            return format!("{stem}ves");
        }
    }
    if let Some(stem) = word.strip_suffix('y') {
        if stem.ends_with("qu") || stem.chars().last().is_some_and(is_consonant) {
            return format!("{stem}ies");
        }
        return format!("{word}s");
    }
    if let Some(stem) = word.strip_suffix("sis") {
        return format!("{stem}ses");
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{word}es");
    }
    format!("{word}s")
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Byte offset where the last word of an identifier starts.
fn last_word_start(ident: &str) -> usize {
    let chars: Vec<(usize, char)> = ident.char_indices().collect();
    let mut start = 0;
    for (i, &(offset, c)) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            start = offset + c.len_utf8();
            continue;
        }
        let Some(&(_, prev)) = i.checked_sub(1).and_then(|p| chars.get(p)) else { continue };
        let next_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
        // `userProfile` | `HTTPServer`
        if c.is_uppercase() && (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)) {
            start = offset;
        }
    }
    start
}

fn restore_case(original: &str, lower: &str, plural: &str) -> String {
    if original == lower {
        return plural.to_string();
    }
    if original.chars().all(|c| !c.is_lowercase()) {
        return plural.to_uppercase();
    }
    let mut chars = plural.chars();
    match chars.next() {
        Some(first) if original.starts_with(char::is_uppercase) => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => plural.to_string(),
    }
}
