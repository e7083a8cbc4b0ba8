//! Keyword extraction and containment scoring

/// Extract keywords from a free-text job description: lowercase whitespace
/// tokens longer than two characters. No stemming, no stop words; duplicates
/// are harmless because scoring checks containment, not frequency.
pub fn extract_keywords(description: &str) -> Vec<String> {
    description
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(|word| word.to_lowercase())
        .collect()
}

/// Count how many keywords occur in the given text fragments.
///
/// Fragments are joined with spaces and lowercased; a keyword counts when its
/// lowercased form appears as a substring anywhere in that string. This is
/// containment, not token matching: "go" matches inside "good". Kept
/// compatible with the original scoring on purpose.
pub fn keyword_score<S: AsRef<str>>(fragments: &[S], keywords: &[String]) -> usize {
    let haystack = fragments
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    keywords
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .count()
}
