use wikiknn_core::tokenizer::tokenize;

#[test]
fn it_strips_markup_spans() {
    let toks = tokenize("keep {{x}} one [[y]] two [z] three <w> four &lt;v&gt; five {|t|} six");
    assert_eq!(toks, vec!["keep", "one", "two", "three", "four", "five", "six"]);
}

#[test]
fn it_strips_spans_across_lines_and_empty_spans() {
    let toks = tokenize("a {{Infobox\n| name = x\n}} b [] c <> d {{}} e");
    assert_eq!(toks, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn it_is_non_greedy() {
    let toks = tokenize("[ref one] kept [ref two]");
    assert_eq!(toks, vec!["kept"]);
}

#[test]
fn it_drops_file_before_lowercasing() {
    assert_eq!(tokenize("File:Example.jpg"), vec!["example", "jpg"]);
    // Only the exact case is removed.
    assert_eq!(tokenize("file Files"), vec!["file", "s"]);
}

#[test]
fn it_lowercases_and_removes_punctuation() {
    let toks = tokenize("Hello, WORLD! (Rust) -- \"quoted\"; it's fine... isn't it? cats' toys");
    for t in &toks {
        assert_eq!(t, &t.to_lowercase());
        let punct: Vec<char> = t.chars().filter(|c| c.is_ascii_punctuation()).collect();
        // Only the apostrophe of a kept contraction survives.
        assert!(punct.is_empty() || (t == "it's" || t == "isn't"), "unexpected token {t:?}");
    }
    assert!(toks.contains(&"it's".to_string()));
    assert!(toks.contains(&"isn't".to_string()));
    assert!(toks.contains(&"cats".to_string()));
}

#[test]
fn it_keeps_punctuation_only_before_s_or_t_then_whitespace() {
    assert_eq!(tokenize("x-s y"), vec!["x-s", "y"]);
    assert_eq!(tokenize("x-sy"), vec!["x", "sy"]);
    assert_eq!(tokenize("x-a y"), vec!["x", "a", "y"]);
}
