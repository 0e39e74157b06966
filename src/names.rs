//! Name forms: "surname given patronymic" queries versus "surname, g.p." index keys

use crate::error::DegenerateInputError;

/// How a candidate's stored initials line up with the query's given names
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitialsCoincidence {
    /// A stored initial disagrees with the query
    Mismatch,
    /// The query ran out of tokens after this many agreeing initials
    Exhausted(usize),
    /// Every stored initial agrees
    Complete(usize),
}

impl InitialsCoincidence {
    /// Agreeing initials, with a mismatch counting as none
    pub fn count(self) -> usize {
        match self {
            Self::Mismatch => 0,
            Self::Exhausted(n) | Self::Complete(n) => n,
        }
    }
}

pub fn tokenize(fullname: &str) -> Vec<&str> {
    fullname.split_whitespace().collect()
}

/// Render tokens as `"surname, a.b."` using the first `initials` given names
pub fn article_form(tokens: &[&str], initials: usize) -> Result<String, DegenerateInputError> {
    let (surname, given) = tokens
        .split_first()
        .ok_or(DegenerateInputError::EmptyQuery)?;

    let mut name = format!("{surname}, ");
    for (i, token) in given.iter().take(initials).enumerate() {
        let first = token
            .chars()
            .next()
            .ok_or(DegenerateInputError::EmptyToken { position: i + 1 })?;
        name.push(first);
        name.push('.');
    }
    Ok(name)
}

/// Number of dots in an index key, i.e. how many initials it spells out
pub fn initial_count(name: &str) -> usize {
    name.matches('.').count()
}

/// Initials after the last comma of an index key: `"smith, j.a."` gives `["j", "a"]`.
///
/// Keys without a comma yield their whole text minus the final character, which
/// then never lines up with a single query letter.
pub fn stored_initials(name: &str) -> Vec<&str> {
    let tail = name.rsplit(',').next().unwrap_or(name).trim();
    let body = match tail.char_indices().next_back() {
        Some((last, _)) => &tail[..last],
        None => tail,
    };

    if initial_count(tail) > 1 {
        body.split('.').collect()
    } else {
        vec![body]
    }
}

/// Compare stored initials, in order, with the first letters of the query's
/// given-name tokens (`query_tokens[0]` is the surname)
pub fn initials_coincidence(candidate: &str, query_tokens: &[&str]) -> InitialsCoincidence {
    let mut count = 0;
    for (idx, letter) in stored_initials(candidate).into_iter().enumerate() {
        let Some(first) = query_tokens.get(idx + 1).and_then(|t| t.chars().next()) else {
            return InitialsCoincidence::Exhausted(count);
        };
        if !is_single_letter(letter, first) {
            return InitialsCoincidence::Mismatch;
        }
        count += 1;
    }
    InitialsCoincidence::Complete(count)
}

fn is_single_letter(text: &str, letter: char) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(letter) && chars.next().is_none()
}
