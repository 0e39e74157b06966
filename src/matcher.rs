//! Resolving a full name to index keys and author identifiers

use std::sync::Arc;

use ahash::AHashSet;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::MatchThresholds;
use crate::error::DegenerateInputError;
use crate::index::AuthorIndex;
use crate::names::{article_form, initial_count, initials_coincidence, tokenize};
use crate::similarity::{letters_only, Signals};
use crate::translit::{Translify, Transliterate};

/// Which stage produced a result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPath {
    /// An article-form key built from the query exists verbatim in the index
    Exact,
    /// Candidates were scored one by one
    Fallback,
    /// The query could not be processed at all
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub names: AHashSet<String>,
    pub ids: AHashSet<String>,
    pub path: MatchPath,
}

impl MatchResult {
    fn empty(path: MatchPath) -> Self {
        Self {
            names: AHashSet::new(),
            ids: AHashSet::new(),
            path,
        }
    }

    fn add(&mut self, name: &str, ids: &AHashSet<String>) {
        self.names.insert(name.to_string());
        self.ids.extend(ids.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Matches queries against a shared, read-only author index.
///
/// Queries never mutate anything, so one matcher can serve many threads.
pub struct NameMatcher<T = Translify> {
    index: Arc<AuthorIndex>,
    thresholds: MatchThresholds,
    transliterator: T,
}

impl NameMatcher<Translify> {
    pub fn new(index: Arc<AuthorIndex>) -> Self {
        Self::with_transliterator(index, Translify)
    }
}

impl<T: Transliterate> NameMatcher<T> {
    pub fn with_transliterator(index: Arc<AuthorIndex>, transliterator: T) -> Self {
        Self {
            index,
            thresholds: MatchThresholds::default(),
            transliterator,
        }
    }

    pub fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn index(&self) -> &AuthorIndex {
        &self.index
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Lower-case and transliterate a query into the index alphabet
    fn prepare(&self, fullname: &str) -> Result<String, DegenerateInputError> {
        let transliterated = self
            .transliterator
            .transliterate(&fullname.to_lowercase())
            .to_lowercase();
        if transliterated.trim().is_empty() {
            return Err(DegenerateInputError::EmptyQuery);
        }
        Ok(transliterated)
    }

    /// Resolve a full name ("surname given patronymic") to matching index keys
    /// and the union of their identifiers. Never fails; bad input gives an
    /// empty result.
    pub fn match_name(&self, fullname: &str) -> MatchResult {
        let transliterated = match self.prepare(fullname) {
            Ok(t) => t,
            Err(err) => {
                debug!(error = %err, "query rejected");
                return MatchResult::empty(MatchPath::Rejected);
            }
        };
        let tokens = tokenize(&transliterated);

        if let Some((key, ids)) = self.exact_key(&tokens) {
            debug!(query = fullname, key = key.as_str(), "exact initials match");
            let mut result = MatchResult::empty(MatchPath::Exact);
            result.add(&key, ids);
            return result;
        }

        self.scan(&tokens)
    }

    /// The most specific `"surname, a.b."` key present in the index, if any
    pub fn try_exact_match(&self, fullname: &str) -> Option<String> {
        let transliterated = self.prepare(fullname).ok()?;
        self.exact_key(&tokenize(&transliterated))
            .map(|(key, _)| key)
    }

    fn exact_key(&self, tokens: &[&str]) -> Option<(String, &AHashSet<String>)> {
        let (surname, given) = tokens.split_first()?;

        let mut key = format!("{surname}, ");
        let mut found = None;
        for token in given {
            let first = token.chars().next()?;
            key.push(first);
            key.push('.');
            if let Some(ids) = self.index.ids_for_name(&key) {
                found = Some((key.clone(), ids));
            }
        }
        found
    }

    /// Score every index key against the query, skipping the exact-match stage
    pub fn match_all(&self, fullname: &str) -> MatchResult {
        match self.prepare(fullname) {
            Ok(transliterated) => self.scan(&tokenize(&transliterated)),
            Err(err) => {
                debug!(error = %err, "query rejected");
                MatchResult::empty(MatchPath::Rejected)
            }
        }
    }

    fn scan(&self, tokens: &[&str]) -> MatchResult {
        let mut result = MatchResult::empty(MatchPath::Fallback);
        for (candidate, ids) in self.index.entries() {
            match self.evaluate(candidate, tokens) {
                Ok(Some(signals)) => {
                    trace!(
                        candidate,
                        distance = signals.distance,
                        f1 = signals.f1,
                        length_ratio = signals.length_ratio,
                        "candidate accepted"
                    );
                    result.add(candidate, ids);
                }
                Ok(None) => {}
                Err(err) => trace!(candidate, error = %err, "candidate not scorable"),
            }
        }
        result
    }

    /// Signals for an accepted candidate, `None` for a rejected one
    fn evaluate(
        &self,
        candidate: &str,
        tokens: &[&str],
    ) -> Result<Option<Signals>, DegenerateInputError> {
        if initials_coincidence(candidate, tokens).count() == 0 {
            return Ok(None);
        }

        let rendered = article_form(tokens, initial_count(candidate))?;
        let signals = Signals::compute(&letters_only(&rendered), &letters_only(candidate))?;
        Ok(signals.accepts(&self.thresholds).then_some(signals))
    }
}

impl<T: Transliterate + Sync> NameMatcher<T> {
    /// Resolve independent queries in parallel; results keep the input order
    pub fn match_many<S>(&self, fullnames: &[S]) -> Vec<MatchResult>
    where
        S: AsRef<str> + Sync,
    {
        fullnames
            .par_iter()
            .map(|fullname| self.match_name(fullname.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::record::ArticleRecord;

    fn link(id: &str) -> String {
        format!("https://www.scopus.com/authid/detail.uri?authorId={id}&amp;eid=1")
    }

    fn matcher(authors: &[(&str, &str)]) -> NameMatcher {
        let records = authors
            .iter()
            .map(|(name, id)| ArticleRecord::new([*name], [link(id)]));
        NameMatcher::new(Arc::new(AuthorIndex::build(records, &IndexConfig::default())))
    }

    fn set(items: &[&str]) -> AHashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_prefers_most_specific_key() {
        let m = matcher(&[("Ivanov, I.", "1"), ("Ivanov, I.P.", "2")]);
        let result = m.match_name("Иванов Иван Петрович");

        assert_eq!(result.path, MatchPath::Exact);
        assert_eq!(result.names, set(&["ivanov, i.p."]));
        assert_eq!(result.ids, set(&["2"]));
    }

    #[test]
    fn test_exact_keeps_shorter_key_when_longer_missing() {
        let m = matcher(&[("Ivanov, I.", "1")]);
        assert_eq!(
            m.try_exact_match("иванов иван петрович").as_deref(),
            Some("ivanov, i.")
        );
    }

    #[test]
    fn test_exact_needs_given_name() {
        let m = matcher(&[("Ivanov, I.", "1")]);
        assert_eq!(m.try_exact_match("иванов"), None);
    }

    #[test]
    fn test_fallback_accepts_typo() {
        let m = matcher(&[("Ivanov, I.P.", "7")]);
        let result = m.match_name("иванав иван петрович");

        assert_eq!(result.path, MatchPath::Fallback);
        assert_eq!(result.names, set(&["ivanov, i.p."]));
        assert_eq!(result.ids, set(&["7"]));
    }

    #[test]
    fn test_fallback_collects_all_matches() {
        let m = matcher(&[
            ("Ivanova, I.P.", "1"),
            ("Ivanav, I.", "2"),
            ("Petrov, I.P.", "3"),
            ("Ivanov, S.P.", "4"),
        ]);
        let result = m.match_all("иванов иван петрович");

        assert_eq!(result.names, set(&["ivanova, i.p.", "ivanav, i."]));
        assert_eq!(result.ids, set(&["1", "2"]));
    }

    #[test]
    fn test_initials_mismatch_is_skipped() {
        let m = matcher(&[("Ivanov, S.", "1")]);
        assert!(m.match_name("иванов иван").is_empty());
    }

    #[test]
    fn test_empty_query() {
        let m = matcher(&[("Ivanov, I.", "1")]);
        for query in ["", "   "] {
            let result = m.match_name(query);
            assert!(result.is_empty());
            assert!(result.ids.is_empty());
            assert_eq!(result.path, MatchPath::Rejected);
        }
    }

    #[test]
    fn test_custom_transliterator_and_thresholds() {
        let index = Arc::new(AuthorIndex::build(
            [ArticleRecord::new(["Smith, J."], [link("5")])],
            &IndexConfig::default(),
        ));
        let m = NameMatcher::with_transliterator(index, |text: &str| text.replace('ß', "ss"))
            .with_thresholds(MatchThresholds::new(0.0, 1.1));

        assert_eq!(m.match_name("SMITH John").ids, set(&["5"]));
        // strict thresholds reject even a one-letter typo
        assert!(m.match_name("smyth john").is_empty());
    }

    #[test]
    fn test_match_many_keeps_order() {
        let m = matcher(&[("Ivanov, I.P.", "1"), ("Petrov, A.", "2")]);
        let results = m.match_many(&["петров алексей", "", "иванов иван петрович"]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].ids, set(&["2"]));
        assert!(results[1].is_empty());
        assert_eq!(results[2].ids, set(&["1"]));
    }
}
