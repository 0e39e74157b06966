//! Python bindings, built with the `python` feature

use std::collections::HashSet;
use std::sync::Arc;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use tracing::warn;

use crate::config::{IndexConfig, MatchThresholds};
use crate::error::RecordError;
use crate::index::{AuthorIndex, BuildStats};
use crate::matcher::{MatchResult, NameMatcher};
use crate::record::ArticleRecord;
use crate::translit::{Translify, Transliterate};

/// One article dict as handed over from Python
#[derive(Debug, FromPyObject)]
struct RecordData {
    #[pyo3(item("authorlist"))]
    authors: Vec<String>,
    #[pyo3(item("authorlistLinks"))]
    links: Vec<String>,
}

impl From<RecordData> for ArticleRecord {
    fn from(data: RecordData) -> Self {
        ArticleRecord {
            authors: data.authors,
            links: data.links,
        }
    }
}

type NameSets = (HashSet<String>, HashSet<String>);

fn to_sets(result: MatchResult) -> NameSets {
    (
        result.names.into_iter().collect(),
        result.ids.into_iter().collect(),
    )
}

/// Author index built once from a list of article dicts
#[pyclass(name = "AuthorIndex", frozen)]
struct PyAuthorIndex {
    inner: Arc<AuthorIndex>,
    stats: BuildStats,
}

#[pymethods]
impl PyAuthorIndex {
    #[new]
    #[pyo3(signature = (records, id_offset = 50))]
    fn new(records: Vec<Bound<'_, PyAny>>, id_offset: usize) -> Self {
        let config = IndexConfig {
            id_offset,
            ..IndexConfig::default()
        };
        let items = records.iter().map(|record| {
            record
                .extract::<RecordData>()
                .map(ArticleRecord::from)
                .map_err(|err| RecordError::Malformed(err.to_string()))
        });
        let (index, stats) = AuthorIndex::from_results(items, &config);
        Self {
            inner: Arc::new(index),
            stats,
        }
    }

    fn ids_for_name(&self, name: &str) -> Option<HashSet<String>> {
        self.inner
            .ids_for_name(name)
            .map(|ids| ids.iter().cloned().collect())
    }

    fn names_for_id(&self, id: &str) -> Option<HashSet<String>> {
        self.inner
            .names_for_id(id)
            .map(|names| names.iter().cloned().collect())
    }

    #[getter]
    fn name_count(&self) -> usize {
        self.inner.name_count()
    }

    #[getter]
    fn id_count(&self) -> usize {
        self.inner.id_count()
    }

    #[getter]
    fn records_skipped(&self) -> usize {
        self.stats.records_skipped
    }
}

/// Built-in table or a Python callable `str -> str`
enum PyTransliterator {
    Builtin(Translify),
    Callable(Py<PyAny>),
}

impl Transliterate for PyTransliterator {
    fn transliterate(&self, text: &str) -> String {
        match self {
            Self::Builtin(table) => table.transliterate(text),
            Self::Callable(func) => Python::with_gil(|py| {
                func.call1(py, (text,))
                    .and_then(|out| out.extract::<String>(py))
                    .unwrap_or_else(|err| {
                        warn!(error = %err, "transliterator callable failed");
                        String::new()
                    })
            }),
        }
    }
}

#[pyclass(name = "NameMatcher", frozen)]
struct PyNameMatcher {
    inner: NameMatcher<PyTransliterator>,
}

#[pymethods]
impl PyNameMatcher {
    #[new]
    #[pyo3(signature = (index, d1 = 0.5, f1 = 0.5, transliterate = None))]
    fn new(
        index: PyRef<'_, PyAuthorIndex>,
        d1: f64,
        f1: f64,
        transliterate: Option<Py<PyAny>>,
    ) -> PyResult<Self> {
        let thresholds = MatchThresholds::new(d1, f1);
        thresholds
            .validate()
            .map_err(|err| PyValueError::new_err(err.to_string()))?;

        let transliterator = match transliterate {
            Some(func) => PyTransliterator::Callable(func),
            None => PyTransliterator::Builtin(Translify),
        };
        let inner = NameMatcher::with_transliterator(Arc::clone(&index.inner), transliterator)
            .with_thresholds(thresholds);
        Ok(Self { inner })
    }

    /// Matched index names and their author identifiers
    fn match_name(&self, fullname: &str) -> NameSets {
        to_sets(self.inner.match_name(fullname))
    }

    fn match_many(&self, py: Python<'_>, fullnames: Vec<String>) -> Vec<NameSets> {
        py.allow_threads(|| self.inner.match_many(&fullnames))
            .into_iter()
            .map(to_sets)
            .collect()
    }
}

/// Author name resolution implemented in Rust.
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAuthorIndex>()?;
    m.add_class::<PyNameMatcher>()?;
    Ok(())
}
