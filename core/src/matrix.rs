use crate::error::{KnnError, Result};
use crate::frequency::CorpusFrequencies;
use nalgebra::{DMatrix, RowDVector};
use serde::Serialize;
use std::collections::HashMap;

/// A vocabulary column: a word and its count over the whole corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTerm {
    pub word: String,
    pub count: u64,
}

/// Rank words by corpus count (descending), breaking ties by the word itself,
/// and keep at most `vocab_size` of them.
pub fn rank_vocabulary(global: &HashMap<String, u64>, vocab_size: usize) -> Vec<RankedTerm> {
    let mut ranked: Vec<RankedTerm> = global
        .iter()
        .map(|(word, &count)| RankedTerm { word: word.clone(), count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(vocab_size);
    ranked
}

/// Dense document-term matrix of relative frequencies.
///
/// Row `i` is the document titled `titles()[i]`; column `j` is the word
/// `vocabulary()[j].word`.
#[derive(Debug, Clone)]
pub struct DocumentMatrix {
    titles: Vec<String>,
    vocabulary: Vec<RankedTerm>,
    values: DMatrix<f64>,
}

impl DocumentMatrix {
    /// Build the matrix over the `vocab_size` most frequent words.
    ///
    /// The column count is `min(vocab_size, distinct words)`; words outside the
    /// vocabulary are dropped and absent words are 0.
    pub fn build(freqs: &CorpusFrequencies, vocab_size: usize) -> Self {
        let vocabulary = rank_vocabulary(&freqs.global, vocab_size);
        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(j, term)| (term.word.as_str(), j))
            .collect();

        let mut values = DMatrix::<f64>::zeros(freqs.titles.len(), vocabulary.len());
        for (i, doc) in freqs.documents.iter().enumerate() {
            for (word, &freq) in doc {
                if let Some(&j) = column.get(word.as_str()) {
                    values[(i, j)] = freq;
                }
            }
        }

        tracing::info!(rows = values.nrows(), cols = values.ncols(), "built document matrix");
        Self { titles: freqs.titles.clone(), vocabulary, values }
    }

    pub fn titles(&self) -> &[String] { &self.titles }
    pub fn vocabulary(&self) -> &[RankedTerm] { &self.vocabulary }
    pub fn values(&self) -> &DMatrix<f64> { &self.values }
    pub fn nrows(&self) -> usize { self.values.nrows() }
    pub fn ncols(&self) -> usize { self.values.ncols() }

    pub fn row(&self, i: usize) -> Result<RowDVector<f64>> {
        if i >= self.nrows() {
            return Err(KnnError::RowOutOfRange { row: i, rows: self.nrows() });
        }
        Ok(self.values.row(i).clone_owned())
    }

    /// Position of the first row with this title.
    pub fn row_of(&self, title: &str) -> Result<usize> {
        self.titles
            .iter()
            .position(|t| t == title)
            .ok_or_else(|| KnnError::TitleNotFound(title.to_string()))
    }
}
