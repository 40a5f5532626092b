use crate::error::{KnnError, Result};
use crate::extract::Document;
use crate::tokenizer::tokenize;
use std::collections::HashMap;

/// Raw term counts for a single token sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermCounts {
    /// Number of tokens, duplicates included.
    pub total: usize,
    pub counts: HashMap<String, u32>,
}

/// Output of [`aggregate`]. Position `i` in `titles` and `documents` refers to
/// the same input document, and to row `i` of the matrix built from it.
#[derive(Debug, Clone, Default)]
pub struct CorpusFrequencies {
    pub titles: Vec<String>,
    /// Per-document relative frequencies (count / document token total).
    pub documents: Vec<HashMap<String, f64>>,
    /// Absolute counts summed over every document.
    pub global: HashMap<String, u64>,
}

impl CorpusFrequencies {
    pub fn len(&self) -> usize { self.titles.len() }
    pub fn is_empty(&self) -> bool { self.titles.is_empty() }
}

pub fn count_tokens<S: AsRef<str>>(tokens: &[S]) -> TermCounts {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    TermCounts { total: tokens.len(), counts }
}

/// Tokenize and count every document, in input order.
///
/// Fails on the first document with no tokens, and on a title that was
/// already seen (titles are the lookup key for neighbor queries).
pub fn aggregate(documents: &[Document]) -> Result<CorpusFrequencies> {
    let mut out = CorpusFrequencies {
        titles: Vec::with_capacity(documents.len()),
        documents: Vec::with_capacity(documents.len()),
        global: HashMap::new(),
    };
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (pos, doc) in documents.iter().enumerate() {
        if let Some(&first) = seen.get(doc.title.as_str()) {
            return Err(KnnError::DuplicateTitle { title: doc.title.clone(), first, second: pos });
        }
        seen.insert(doc.title.as_str(), pos);

        let TermCounts { total, counts } = count_tokens(&tokenize(&doc.body));
        if total == 0 {
            return Err(KnnError::EmptyDocument { title: doc.title.clone() });
        }

        let mut relative: HashMap<String, f64> = HashMap::with_capacity(counts.len());
        for (word, count) in counts {
            *out.global.entry(word.clone()).or_insert(0) += u64::from(count);
            relative.insert(word, f64::from(count) / total as f64);
        }
        tracing::debug!(title = %doc.title, tokens = total, distinct = relative.len(), "aggregated document");

        out.titles.push(doc.title.clone());
        out.documents.push(relative);
    }

    tracing::info!(num_docs = out.len(), num_terms = out.global.len(), "aggregated corpus");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, body: &str) -> Document {
        Document { source: format!("{title}.xml"), title: title.into(), body: body.into() }
    }

    #[test]
    fn counts_duplicates() {
        let c = count_tokens(&["a", "b", "a"]);
        assert_eq!(c.total, 3);
        assert_eq!(c.counts["a"], 2);
        assert_eq!(c.counts["b"], 1);
    }

    #[test]
    fn empty_sequence_counts_nothing() {
        let c = count_tokens::<&str>(&[]);
        assert_eq!(c, TermCounts::default());
    }

    #[test]
    fn relative_and_global() {
        let freqs = aggregate(&[doc("One", "a a b"), doc("Two", "b c")]).unwrap();
        assert_eq!(freqs.titles, vec!["One", "Two"]);
        assert!((freqs.documents[0]["a"] - 2.0 / 3.0).abs() < 1e-12);
        assert!((freqs.documents[1]["c"] - 0.5).abs() < 1e-12);
        assert_eq!(freqs.global["a"], 2);
        assert_eq!(freqs.global["b"], 2);
        assert_eq!(freqs.global["c"], 1);
    }

    #[test]
    fn empty_document_is_an_error() {
        let err = aggregate(&[doc("Ok", "words"), doc("Blank", "{{infobox}}")]).unwrap_err();
        assert_eq!(err, KnnError::EmptyDocument { title: "Blank".into() });
    }

    #[test]
    fn duplicate_title_is_an_error() {
        let err = aggregate(&[doc("Same", "a"), doc("Other", "b"), doc("Same", "c")]).unwrap_err();
        assert_eq!(err, KnnError::DuplicateTitle { title: "Same".into(), first: 0, second: 2 });
    }
}
