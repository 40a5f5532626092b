use crate::error::{KnnError, Result};
use crate::matrix::DocumentMatrix;
use nalgebra::DMatrix;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub row: usize,
    pub title: String,
    pub distance: f64,
}

/// Euclidean distance between rows `a` and `b`.
pub fn euclidean_distance(matrix: &DMatrix<f64>, a: usize, b: usize) -> f64 {
    (matrix.row(a) - matrix.row(b)).norm()
}

/// Validate a caller-supplied neighbor count.
pub fn neighbor_count(raw: i64) -> Result<usize> {
    usize::try_from(raw).map_err(|_| KnnError::InvalidNeighborCount(raw))
}

/// The `k` rows closest to `query_row`, nearest first.
///
/// Ties on distance are ordered by title, then row. The query row is left
/// out. Titles must be unique, since they are how callers name rows. This is a
/// full scan: O(rows × columns) per call.
pub fn rank_neighbors(matrix: &DMatrix<f64>, titles: &[String], query_row: usize, k: usize) -> Result<Vec<Neighbor>> {
    if matrix.nrows() != titles.len() {
        return Err(KnnError::ShapeMismatch { rows: matrix.nrows(), titles: titles.len() });
    }
    ensure_unique(titles)?;
    if query_row >= titles.len() {
        return Err(KnnError::RowOutOfRange { row: query_row, rows: titles.len() });
    }
    let mut ranked: Vec<Neighbor> = titles
        .iter()
        .enumerate()
        .filter(|&(row, _)| row != query_row)
        .map(|(row, title)| Neighbor {
            row,
            title: title.clone(),
            distance: euclidean_distance(matrix, query_row, row),
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.row.cmp(&b.row))
    });
    ranked.truncate(k);
    Ok(ranked)
}

fn ensure_unique(titles: &[String]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(titles.len());
    for (pos, title) in titles.iter().enumerate() {
        if let Some(&first) = seen.get(title.as_str()) {
            return Err(KnnError::DuplicateTitle { title: title.clone(), first, second: pos });
        }
        seen.insert(title.as_str(), pos);
    }
    Ok(())
}

/// Titles of the `k` documents nearest to the one titled `query_title`.
///
/// Asking for more neighbors than exist returns all of them.
pub fn nearest_neighbors(matrix: &DMatrix<f64>, titles: &[String], query_title: &str, k: usize) -> Result<Vec<String>> {
    let query_row = titles
        .iter()
        .position(|t| t == query_title)
        .ok_or_else(|| KnnError::TitleNotFound(query_title.to_string()))?;
    let ranked = rank_neighbors(matrix, titles, query_row, k)?;
    Ok(ranked.into_iter().map(|n| n.title).collect())
}

impl DocumentMatrix {
    pub fn nearest_neighbors(&self, query_title: &str, k: usize) -> Result<Vec<String>> {
        nearest_neighbors(self.values(), self.titles(), query_title, k)
    }

    pub fn neighbors_of_row(&self, row: usize, k: usize) -> Result<Vec<Neighbor>> {
        rank_neighbors(self.values(), self.titles(), row, k)
    }
}
