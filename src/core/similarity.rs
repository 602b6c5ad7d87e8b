//! Title similarity scoring.
//!
//! The score is the minimum of three InDel ratios, each in 0-100:
//! a plain ratio over the full strings, a ratio over alphabetically sorted
//! tokens, and a partial (best-window) ratio over sorted tokens. A candidate
//! has to look good under all three to score high.
//!
//! The InDel ratio is `1 - (insertions + deletions) / (len_a + len_b)`, so a
//! missing word costs half as much as under a plain Levenshtein ratio.

use rapidfuzz::distance::indel;

/// Combined similarity of two titles, in `[0, 100]`. Case-insensitive.
pub fn match_score(title: &str, candidate: &str) -> f64 {
    let a = title.trim().to_lowercase();
    let b = candidate.trim().to_lowercase();

    ratio(&a, &b)
        .min(token_sort_ratio(&a, &b))
        .min(partial_token_sort_ratio(&a, &b))
}

/// InDel similarity over the full strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    indel::normalized_similarity(a.chars(), b.chars()) * 100.0
}

/// `ratio` after sorting whitespace-delimited tokens, so word order does not matter.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sort_tokens(a), &sort_tokens(b))
}

/// Best `ratio` of the shorter sorted-token string against the windows of
/// the longer one.
pub fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sort_tokens(a), &sort_tokens(b))
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Windows are every full-length slice of the longer string plus the
/// shorter prefixes and suffixes that overhang its edges.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let n = short.len();
    let edges = (1..n).flat_map(|len| [&long[..len], &long[long.len() - len..]]);
    let windows = long.windows(n).chain(edges);

    let mut best = 0.0_f64;
    for window in windows {
        best = best.max(indel::normalized_similarity(
            short.iter().copied(),
            window.iter().copied(),
        ));
        if best >= 1.0 {
            break;
        }
    }
    best * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_scores_max() {
        assert_eq!(match_score("Inception", "Inception"), 100.0);
        assert_eq!(match_score("The Dark Knight", "the dark knight "), 100.0);
    }

    #[test]
    fn test_indel_scale() {
        // 6 insertions over 36 characters
        let score = ratio("the dark knight", "the dark knight rises");
        assert!((score - 83.33).abs() < 0.01, "score was {}", score);
        assert_eq!(ratio("", ""), 100.0);
    }

    #[test]
    fn test_token_order_ignored_by_token_sort() {
        assert_eq!(token_sort_ratio("knight dark the", "the dark knight"), 100.0);
        // ...but the plain ratio still penalises the reordering
        assert!(match_score("Knight Dark The", "The Dark Knight") < 80.0);
    }

    #[test]
    fn test_substring_alone_does_not_score_high() {
        // Perfect partial match, half the tokens missing
        assert_eq!(partial_token_sort_ratio("dark knight", "dark knight returns part 2"), 100.0);
        assert!(match_score("The Dark Knight", "The Dark Knight Returns Part 2") < 80.0);
    }

    #[test]
    fn test_one_extra_word_still_accepted() {
        let score = match_score("The Dark Knight", "The Dark Knight Rises");
        assert!(score >= 80.0 && score < 98.0, "score was {}", score);
    }

    #[test]
    fn test_partial_ratio_edge_windows() {
        // "knight" overhangs the end of "the dark knig"
        assert!(partial_ratio("knight", "the dark knig") > partial_ratio("knight", "the dark xxxx"));
    }

    #[test]
    fn test_punctuation_difference_accepted() {
        let score = match_score("Star Wars Episode IV", "Star Wars: Episode IV");
        assert!(score >= 80.0, "score was {}", score);
        assert!(score < 98.0, "score was {}", score);
    }

    #[test]
    fn test_unrelated_titles_score_low() {
        assert!(match_score("Inception", "Interstellar") < 50.0);
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(partial_ratio("", ""), 100.0);
        assert_eq!(partial_ratio("", "abc"), 0.0);
    }
}
