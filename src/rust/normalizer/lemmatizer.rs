use std::collections::HashMap;
use lazy_static::lazy_static;

lazy_static! {
    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("lice", "louse"),
        ("mice", "mouse"),
        ("children", "child"),
        ("women", "woman"),
        ("men", "man"),
        ("knives", "knife"),
        ("lives", "life"),
        ("calves", "calf"),
        ("halves", "half"),
        ("wolves", "wolf"),
        ("ate", "eat"),
        ("felt", "feel"),
        ("got", "get"),
        ("threw", "throw"),
        ("thrown", "throw"),
        ("bled", "bleed"),
        ("went", "go"),
        ("swollen", "swell"),
        // past forms whose base keeps a final `e`
        ("ached", "ache"),
        ("sneezed", "sneeze"),
        ("wheezed", "wheeze"),
        ("bruised", "bruise"),
        ("choked", "choke"),
    ]
    .into_iter()
    .collect();
}

/// Words whose base form keeps their `s` or `ed` ending
const INVARIANT: [&str; 15] = [
    "diabetes", "measles", "mumps", "herpes", "rabies", "scabies", "aids",
    "arthritis", "hepatitis", "psoriasis", "tuberculosis", "jaundice", "series", "news",
    "tired",
];

const MIN_STEM: usize = 3;

/// Reduces a lower-cased word to its dictionary form.
///
/// Only inflections that never change a symptom's meaning are undone: noun
/// plurals, regular past tense and a small table of irregular forms. Gerunds
/// such as `vomiting` or `itching` are left intact because that is how symptom
/// names are spelled.
pub fn lemmatize(word: &str) -> String {
    if let Some(base) = IRREGULAR.get(word) {
        return (*base).to_string();
    }
    if INVARIANT.contains(&word) {
        return word.to_string();
    }
    if word.ends_with("ed") {
        return past_tense_base(word).unwrap_or_else(|| word.to_string());
    }
    if !word.ends_with('s') {
        return word.to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") || word.ends_with("ous") {
        return word.to_string();
    }

    let strip = |suffix: &str, replacement: &str| -> Option<String> {
        let stem = word.strip_suffix(suffix)?;
        (stem.len() >= MIN_STEM).then(|| format!("{}{}", stem, replacement))
    };

    if word.ends_with("aches") {
        // headaches, backaches
        return strip("s", "").unwrap_or_else(|| word.to_string());
    }

    strip("ies", "y")
        .or_else(|| ["ches", "shes", "xes", "zzes", "sses"]
            .iter()
            .find(|suffix| word.ends_with(*suffix))
            .and_then(|_| strip("es", "")))
        .or_else(|| strip("s", ""))
        .unwrap_or_else(|| word.to_string())
}

/// `coughed` -> `cough`, `worried` -> `worry`, `throbbed` -> `throb`.
///
/// `None` when the stem would be shorter than `MIN_STEM` or the word ends in
/// `eed` (`need`, `bleed`), leaving the word as it is.
fn past_tense_base(word: &str) -> Option<String> {
    if word.ends_with("eed") {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ied") {
        return (stem.len() >= MIN_STEM).then(|| format!("{}y", stem));
    }

    let stem = word.strip_suffix("ed")?;
    if stem.len() < MIN_STEM {
        return None;
    }
    let bytes = stem.as_bytes();
    let last = bytes[bytes.len() - 1];
    let doubled = last == bytes[bytes.len() - 2]
        && last.is_ascii_lowercase()
        && !b"aeioulsz".contains(&last);
    if doubled {
        Some(stem[..stem.len() - 1].to_string())
    } else {
        Some(stem.to_string())
    }
}
