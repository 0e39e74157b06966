//! Article records and author identifier extraction

use std::io::BufRead;

use serde::Deserialize;

use crate::config::IndexConfig;
use crate::error::{ExtractionError, RecordError};

/// One article as it appears in the dataset: author display-names and their
/// profile links, position by position
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "authorlist")]
    pub authors: Vec<String>,
    #[serde(rename = "authorlistLinks")]
    pub links: Vec<String>,
}

/// Lower-cased author name paired with the identifier taken from its link
pub type AuthorPair = (String, String);

impl ArticleRecord {
    pub fn new<N, L>(authors: N, links: L) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            authors: authors.into_iter().map(Into::into).collect(),
            links: links.into_iter().map(Into::into).collect(),
        }
    }

    /// Pair every author with its identifier. Any bad position fails the whole
    /// record, so callers never see a partial list.
    pub fn author_pairs(&self, config: &IndexConfig) -> Result<Vec<AuthorPair>, RecordError> {
        if self.authors.len() != self.links.len() {
            return Err(RecordError::LengthMismatch {
                names: self.authors.len(),
                links: self.links.len(),
            });
        }

        self.authors
            .iter()
            .zip(&self.links)
            .enumerate()
            .map(|(position, (name, link))| {
                if name.trim().is_empty() {
                    return Err(RecordError::BlankName { position });
                }
                let id = extract_author_id(link, config)
                    .map_err(|source| RecordError::Extraction { position, source })?;
                Ok((name.to_lowercase(), id))
            })
            .collect()
    }
}

/// Take the identifier that starts `id_offset` characters into `link` and ends
/// right before the next delimiter
pub fn extract_author_id(link: &str, config: &IndexConfig) -> Result<String, ExtractionError> {
    let offset = config.id_offset;
    let start = link
        .char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .ok_or_else(|| ExtractionError::LinkTooShort {
            len: link.chars().count(),
            offset,
        })?;

    let rest = &link[start..];
    let end = rest
        .find(config.id_delimiter)
        .ok_or(ExtractionError::MissingDelimiter {
            offset,
            delimiter: config.id_delimiter,
        })?;

    if end == 0 {
        return Err(ExtractionError::EmptyIdentifier { offset });
    }
    Ok(rest[..end].to_string())
}

/// Parse one record per line. Blank lines are ignored; a line that fails to
/// parse yields an error item and the iterator moves on.
pub fn read_json_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<ArticleRecord, RecordError>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(serde_json::from_str::<ArticleRecord>(&line).map_err(RecordError::from)),
        Err(err) => Some(Err(RecordError::from(err))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "https://www.scopus.com/authid/detail.uri?authorId=";

    fn link(id: &str) -> String {
        format!("{PREFIX}{id}&amp;eid=2-s2.0-85000000000")
    }

    #[test]
    fn test_prefix_is_offset_long() {
        assert_eq!(PREFIX.chars().count(), IndexConfig::default().id_offset);
    }

    #[test]
    fn test_extract_author_id() {
        let id = extract_author_id(&link("12345"), &IndexConfig::default()).unwrap();
        assert_eq!(id, "12345");
    }

    #[test]
    fn test_extract_stops_at_first_delimiter() {
        let raw = format!("{PREFIX}777&a=1&b=2");
        assert_eq!(extract_author_id(&raw, &IndexConfig::default()).unwrap(), "777");
    }

    #[test]
    fn test_extract_missing_delimiter() {
        let raw = format!("{PREFIX}12345");
        assert_eq!(
            extract_author_id(&raw, &IndexConfig::default()),
            Err(ExtractionError::MissingDelimiter {
                offset: 50,
                delimiter: '&'
            })
        );
    }

    #[test]
    fn test_extract_short_link() {
        assert!(matches!(
            extract_author_id("https://example.org/?id=1&x", &IndexConfig::default()),
            Err(ExtractionError::LinkTooShort { offset: 50, .. })
        ));
    }

    #[test]
    fn test_extract_empty_identifier() {
        let raw = format!("{PREFIX}&x=1");
        assert_eq!(
            extract_author_id(&raw, &IndexConfig::default()),
            Err(ExtractionError::EmptyIdentifier { offset: 50 })
        );
    }

    #[test]
    fn test_extract_counts_characters_not_bytes() {
        let config = IndexConfig {
            id_offset: 3,
            id_delimiter: '&',
        };
        assert_eq!(extract_author_id("ёжиk42&", &config).unwrap(), "k42");
    }

    #[test]
    fn test_author_pairs_lowercases() {
        let record = ArticleRecord::new(["Smith, J.A.", "Ivanov, I.P."], [link("1"), link("2")]);
        let pairs = record.author_pairs(&IndexConfig::default()).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("smith, j.a.".to_string(), "1".to_string()),
                ("ivanov, i.p.".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_author_pairs_length_mismatch() {
        let record = ArticleRecord::new(["Smith, J.", "Doe, A."], [link("1")]);
        assert!(matches!(
            record.author_pairs(&IndexConfig::default()),
            Err(RecordError::LengthMismatch { names: 2, links: 1 })
        ));
    }

    #[test]
    fn test_author_pairs_bad_link_fails_record() {
        let record = ArticleRecord::new(
            ["Smith, J.", "Doe, A."],
            [link("1"), "broken".to_string()],
        );
        assert!(matches!(
            record.author_pairs(&IndexConfig::default()),
            Err(RecordError::Extraction { position: 1, .. })
        ));
    }

    #[test]
    fn test_author_pairs_blank_name() {
        let record = ArticleRecord::new(["  "], [link("1")]);
        assert!(matches!(
            record.author_pairs(&IndexConfig::default()),
            Err(RecordError::BlankName { position: 0 })
        ));
    }

    #[test]
    fn test_read_json_lines() {
        let text = format!(
            "{{\"authorlist\": [\"Smith, J.\"], \"authorlistLinks\": [\"{}\"]}}\n\n{{\"authorlist\": []}}\nnot json\n",
            link("9")
        );
        let items: Vec<_> = read_json_lines(text.as_bytes()).collect();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0].as_ref().unwrap(),
            &ArticleRecord::new(["Smith, J."], [link("9")])
        );
        assert!(matches!(items[1], Err(RecordError::Json(_))));
        assert!(matches!(items[2], Err(RecordError::Json(_))));
    }
}
