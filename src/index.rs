//! Bidirectional author index: identifier to names and name to identifiers

use std::io::BufRead;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::IndexConfig;
use crate::error::RecordError;
use crate::record::{read_json_lines, ArticleRecord, AuthorPair};

/// Counters collected while building an index
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records_seen: usize,
    pub records_admitted: usize,
    pub records_skipped: usize,
}

impl BuildStats {
    fn merge(self, other: Self) -> Self {
        Self {
            records_seen: self.records_seen + other.records_seen,
            records_admitted: self.records_admitted + other.records_admitted,
            records_skipped: self.records_skipped + other.records_skipped,
        }
    }
}

/// Author names and identifiers, built once and then only read.
///
/// Both maps are filled from the same pairs, so every name maps to a non-empty
/// identifier set and every identifier maps back to a non-empty name set.
#[derive(Clone, Debug, Default)]
pub struct AuthorIndex {
    names_by_id: AHashMap<String, AHashSet<String>>,
    ids_by_name: AHashMap<String, AHashSet<String>>,
}

impl AuthorIndex {
    pub fn build<I>(records: I, config: &IndexConfig) -> Self
    where
        I: IntoIterator<Item = ArticleRecord>,
    {
        Self::build_with_stats(records, config).0
    }

    pub fn build_with_stats<I>(records: I, config: &IndexConfig) -> (Self, BuildStats)
    where
        I: IntoIterator<Item = ArticleRecord>,
    {
        Self::from_results(records.into_iter().map(Ok), config)
    }

    /// Build from JSON-lines text; lines that fail to parse count as skipped records
    pub fn from_json_lines<R: BufRead>(reader: R, config: &IndexConfig) -> (Self, BuildStats) {
        Self::from_results(read_json_lines(reader), config)
    }

    /// Parallel build. Record order does not matter, so partial indexes are
    /// folded per worker and merged.
    pub fn build_par<I>(records: I, config: &IndexConfig) -> (Self, BuildStats)
    where
        I: IntoParallelIterator<Item = ArticleRecord>,
    {
        let (index, stats) = records
            .into_par_iter()
            .fold(
                || (Self::default(), BuildStats::default()),
                |(mut index, mut stats), record| {
                    index.admit(Ok(record), config, &mut stats);
                    (index, stats)
                },
            )
            .reduce(
                || (Self::default(), BuildStats::default()),
                |(left, left_stats), (right, right_stats)| {
                    (left.merge(right), left_stats.merge(right_stats))
                },
            );
        index.log_summary(&stats);
        (index, stats)
    }

    /// Build from records that may already have failed upstream; failures are
    /// counted and skipped
    pub fn from_results<I>(items: I, config: &IndexConfig) -> (Self, BuildStats)
    where
        I: IntoIterator<Item = Result<ArticleRecord, RecordError>>,
    {
        let mut index = Self::default();
        let mut stats = BuildStats::default();
        for item in items {
            index.admit(item, config, &mut stats);
        }
        index.log_summary(&stats);
        (index, stats)
    }

    fn admit(
        &mut self,
        item: Result<ArticleRecord, RecordError>,
        config: &IndexConfig,
        stats: &mut BuildStats,
    ) {
        stats.records_seen += 1;
        match item.and_then(|record| record.author_pairs(config)) {
            Ok(pairs) => {
                self.insert_pairs(pairs);
                stats.records_admitted += 1;
            }
            Err(err) => {
                debug!(record = stats.records_seen, error = %err, "skipping article record");
                stats.records_skipped += 1;
            }
        }
    }

    fn insert_pairs(&mut self, pairs: Vec<AuthorPair>) {
        for (name, id) in pairs {
            self.names_by_id
                .entry(id.clone())
                .or_default()
                .insert(name.clone());
            self.ids_by_name.entry(name).or_default().insert(id);
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (id, names) in other.names_by_id {
            self.names_by_id.entry(id).or_default().extend(names);
        }
        for (name, ids) in other.ids_by_name {
            self.ids_by_name.entry(name).or_default().extend(ids);
        }
        self
    }

    fn log_summary(&self, stats: &BuildStats) {
        info!(
            records = stats.records_seen,
            admitted = stats.records_admitted,
            skipped = stats.records_skipped,
            names = self.name_count(),
            ids = self.id_count(),
            "author index built"
        );
    }

    pub fn ids_for_name(&self, name: &str) -> Option<&AHashSet<String>> {
        self.ids_by_name.get(name)
    }

    pub fn names_for_id(&self, id: &str) -> Option<&AHashSet<String>> {
        self.names_by_id.get(id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.ids_by_name.contains_key(name)
    }

    /// Name to identifiers mapping
    pub fn ids_by_name(&self) -> &AHashMap<String, AHashSet<String>> {
        &self.ids_by_name
    }

    /// Identifier to names mapping
    pub fn names_by_id(&self) -> &AHashMap<String, AHashSet<String>> {
        &self.names_by_id
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &AHashSet<String>)> {
        self.ids_by_name
            .iter()
            .map(|(name, ids)| (name.as_str(), ids))
    }

    pub fn name_count(&self) -> usize {
        self.ids_by_name.len()
    }

    pub fn id_count(&self) -> usize {
        self.names_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids_by_name.is_empty()
    }
}
