use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wikiknn_core::{aggregate, extract_document, rank_vocabulary, Document, DocumentMatrix, KnnError, Neighbor, RankedTerm};

/// Collect the `.xml` files under `input` (or `input` itself), sorted by path.
pub fn collect_sources(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("xml") {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }
    files.sort();
    Ok(files)
}

/// Read and extract every article under `input`, in path order.
///
/// A file missing a title or text marker aborts the run unless
/// `skip_malformed` is set, in which case it is logged and left out.
pub fn load_documents(input: &Path, skip_malformed: bool) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    for file in collect_sources(input)? {
        let markup = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
        match extract_document(&file.to_string_lossy(), &markup) {
            Ok(doc) => docs.push(doc),
            Err(err @ KnnError::MalformedDocument { .. }) if skip_malformed => {
                tracing::warn!(%err, "skipping document");
            }
            Err(err) => return Err(err.into()),
        }
    }
    tracing::info!(num_docs = docs.len(), input = %input.display(), "loaded documents");
    Ok(docs)
}

#[derive(Serialize)]
pub struct NeighborsReport<'a> {
    pub query: &'a str,
    pub k: usize,
    pub neighbors: &'a [Neighbor],
}

/// List every title with its index, then read lines until one is an index in range.
pub fn prompt_choice<R: BufRead, W: Write>(titles: &[String], input: &mut R, out: &mut W) -> Result<usize> {
    if titles.is_empty() {
        bail!("no articles to choose from");
    }
    writeln!(out, "Enter the integer corresponding to the article whose nearest neighbors you would like to find. Your options are:")?;
    for (idx, title) in titles.iter().enumerate() {
        writeln!(out, "\t{idx}. {title}")?;
    }

    let mut line = String::new();
    loop {
        write!(out, "Enter your choice here: ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a choice was made");
        }
        match line.trim().parse::<usize>() {
            Ok(choice) if choice < titles.len() => return Ok(choice),
            _ => writeln!(out, "Error: you must enter an integer between 0 and {}, inclusive.", titles.len() - 1)?,
        }
    }
}

pub fn write_neighbors<W: Write>(out: &mut W, query: &str, k: usize, neighbors: &[Neighbor]) -> Result<()> {
    writeln!(out, "\nThe {k} nearest neighbors of {query} are:")?;
    for n in neighbors {
        writeln!(out, "\t{}", n.title)?;
    }
    Ok(())
}

/// One round of the interactive session: choose an article, print its neighbors.
pub fn run_interactive<R: BufRead, W: Write>(matrix: &DocumentMatrix, k: usize, input: &mut R, out: &mut W) -> Result<Vec<Neighbor>> {
    let choice = prompt_choice(matrix.titles(), input, out)?;
    let neighbors = matrix.neighbors_of_row(choice, k)?;
    write_neighbors(out, &matrix.titles()[choice], k, &neighbors)?;
    Ok(neighbors)
}

/// Print the `k` nearest neighbors of the article titled `title`, as text or JSON.
pub fn run_neighbors<W: Write>(matrix: &DocumentMatrix, title: &str, k: usize, json: bool, out: &mut W) -> Result<Vec<Neighbor>> {
    let row = matrix.row_of(title)?;
    let neighbors = matrix.neighbors_of_row(row, k)?;
    if json {
        let report = NeighborsReport { query: title, k, neighbors: &neighbors };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write_neighbors(out, title, k, &neighbors)?;
    }
    Ok(neighbors)
}

/// Print the `top` most frequent words of the corpus with their counts.
pub fn run_vocabulary<W: Write>(documents: &[Document], top: usize, json: bool, out: &mut W) -> Result<Vec<RankedTerm>> {
    let freqs = aggregate(documents)?;
    let ranked = rank_vocabulary(&freqs.global, top);
    if json {
        serde_json::to_writer_pretty(&mut *out, &ranked)?;
        writeln!(out)?;
    } else {
        for (rank, term) in ranked.iter().enumerate() {
            writeln!(out, "{rank:>5}  {:<24} {}", term.word, term.count)?;
        }
    }
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reprompts_until_valid() {
        let titles = vec!["A".to_string(), "B".into()];
        let mut input = Cursor::new("x\n-1\n5\n1\n");
        let mut out = Vec::new();
        let choice = prompt_choice(&titles, &mut input, &mut out).unwrap();
        assert_eq!(choice, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\t0. A\n\t1. B\n"));
        assert_eq!(text.matches("Error: you must enter an integer between 0 and 1, inclusive.").count(), 3);
    }

    #[test]
    fn closed_input_is_an_error() {
        let titles = vec!["A".to_string()];
        let mut out = Vec::new();
        assert!(prompt_choice(&titles, &mut Cursor::new(""), &mut out).is_err());
    }
}
