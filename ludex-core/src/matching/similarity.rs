use strsim::normalized_levenshtein;

/// Ceiling for matches that only agree after reordering words, so that
/// 1.0 stays reserved for titles equal after normalization.
const REORDERED_CEILING: f64 = 0.95;

/// Lowercase, keep alphanumerics, turn everything else into single spaces.
pub fn normalize_title(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn sorted_tokens(normalized: &str) -> String {
    let mut tokens: Vec<&str> = normalized.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Case- and punctuation-insensitive similarity in `[0, 1]`.
///
/// Edit distance over the normalized titles, also tried with the words
/// sorted so "Tale Plague" still resembles "Plague Tale".
pub fn title_similarity(query: &str, candidate: &str) -> f64 {
    let query = normalize_title(query);
    let candidate = normalize_title(candidate);

    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    if query == candidate {
        return 1.0;
    }

    let direct = normalized_levenshtein(&query, &candidate);
    let reordered = normalized_levenshtein(
        &sorted_tokens(&query),
        &sorted_tokens(&candidate),
    )
    .min(REORDERED_CEILING);

    direct.max(reordered).clamp(0.0, 1.0)
}
