//! Bag-of-words nearest neighbors over a small corpus of article exports.

pub mod error;
pub mod extract;
pub mod frequency;
pub mod matrix;
pub mod neighbors;
pub mod tokenizer;

pub use error::{KnnError, Result};
pub use extract::{extract_document, Document};
pub use frequency::{aggregate, count_tokens, CorpusFrequencies, TermCounts};
pub use matrix::{rank_vocabulary, DocumentMatrix, RankedTerm};
pub use neighbors::{euclidean_distance, nearest_neighbors, neighbor_count, rank_neighbors, Neighbor};

/// Vocabulary size used when the caller does not pick one.
pub const DEFAULT_VOCAB_SIZE: usize = 20_000;

/// Aggregate `documents` and build their matrix over the `vocab_size` most frequent words.
pub fn build_matrix(documents: &[Document], vocab_size: usize) -> Result<DocumentMatrix> {
    let freqs = aggregate(documents)?;
    Ok(DocumentMatrix::build(&freqs, vocab_size))
}
