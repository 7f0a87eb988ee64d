use crate::checker::dictionary::WordSet;

/// Generate spelling suggestions using edit distance
pub fn generate(word: &str, words: &WordSet, max_suggestions: usize) -> Vec<String> {
    let word = word.to_lowercase();
    let mut candidates = Vec::new();

    // 1. Single edits the dictionary knows (cheap, catches most typos)
    for candidate in generate_transformations(&word) {
        if words.contains(&candidate) {
            candidates.push((1, candidate));
        }
    }

    // 2. Prefix matching, for typos two edits away
    let char_count = word.chars().count();
    for prefix_len in [3, 2] {
        if candidates.len() >= max_suggestions || char_count <= prefix_len {
            continue;
        }
        let prefix: String = word.chars().take(prefix_len).collect();
        for candidate in words.words_with_prefix(&prefix) {
            let distance = edit_distance(&word, &candidate);
            if distance > 0 && distance <= 2 {
                candidates.push((distance, candidate));
            }
        }
    }

    rank(candidates, max_suggestions)
}

/// Order by distance then alphabetically, dropping duplicates.
pub fn rank(mut candidates: Vec<(usize, String)>, max_suggestions: usize) -> Vec<String> {
    candidates.sort();

    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|(_, w)| seen.insert(w.clone()))
        .map(|(_, w)| w)
        .take(max_suggestions)
        .collect()
}

/// Give a lowercase suggestion the capitalization of the misspelled word.
pub fn match_case(original: &str, suggestion: &str) -> String {
    if suggestion.chars().any(char::is_uppercase) {
        return suggestion.to_string();
    }

    let mut letters = original.chars().filter(|c| c.is_alphabetic());
    let Some(first) = letters.next() else {
        return suggestion.to_string();
    };

    let rest_upper: Vec<bool> = letters.map(char::is_uppercase).collect();
    if first.is_uppercase() && !rest_upper.is_empty() && rest_upper.iter().all(|&u| u) {
        suggestion.to_uppercase()
    } else if first.is_uppercase() {
        let mut chars = suggestion.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        suggestion.to_string()
    }
}

/// Optimal string alignment distance (Levenshtein plus adjacent transpositions)
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, item) in matrix[0].iter_mut().enumerate() {
        *item = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            let mut best = std::cmp::min(
                std::cmp::min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution
            );

            if i > 1
                && j > 1
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                best = best.min(matrix[i - 2][j - 2] + 1); // transposition
            }

            matrix[i][j] = best;
        }
    }

    matrix[a_len][b_len]
}

/// Every string one edit away from `word`
fn generate_transformations(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut alphabet: Vec<char> = ('a'..='z').collect();
    for &ch in &chars {
        if ch.is_alphabetic() && !alphabet.contains(&ch) {
            alphabet.push(ch);
        }
    }

    let mut transformations = Vec::new();

    // Deletions
    for i in 0..chars.len() {
        let mut new_word = chars.clone();
        new_word.remove(i);
        transformations.push(new_word.iter().collect());
    }

    // Transpositions (swap adjacent)
    for i in 0..chars.len().saturating_sub(1) {
        let mut new_word = chars.clone();
        new_word.swap(i, i + 1);
        transformations.push(new_word.iter().collect());
    }

    // Replacements
    for i in 0..chars.len() {
        for &to in &alphabet {
            if chars[i] != to {
                let mut new_word = chars.clone();
                new_word[i] = to;
                transformations.push(new_word.iter().collect());
            }
        }
    }

    // Insertions
    for i in 0..=chars.len() {
        for &ch in &alphabet {
            let mut new_word = chars.clone();
            new_word.insert(i, ch);
            transformations.push(new_word.iter().collect());
        }
    }

    transformations
}
