//! "Did you mean ...?" hints for misspelled names.

const MAX_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Related { distance: usize },
    Unrelated,
}

pub fn relation(a: &str, b: &str) -> Relation {
    let distance = levenshtein::levenshtein(a, b);
    if distance <= MAX_DISTANCE {
        Relation::Related { distance }
    } else {
        Relation::Unrelated
    }
}

/// The candidate closest to `name`, ties broken alphabetically. Identical
/// names and names of built-in entities (starting with `$`) are never
/// suggested.
pub fn closest<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: Vec<&str> = candidates
        .into_iter()
        .filter(|candidate| *candidate != name && !candidate.starts_with('$'))
        .collect();
    candidates.sort();
    candidates.dedup();

    candidates
        .into_iter()
        .filter_map(|candidate| match relation(name, candidate) {
            Relation::Related { distance } => Some((distance, candidate)),
            Relation::Unrelated => None,
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

/// The formatted hint appended to error messages, empty if there is no
/// similar candidate.
pub fn hint<'a, I>(name: &str, candidates: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    match closest(name, candidates) {
        Some(candidate) => format!(", did you mean '{}'?", candidate),
        None => String::new(),
    }
}
