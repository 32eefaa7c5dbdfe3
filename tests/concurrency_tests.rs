use std::sync::Arc;
use std::thread;

use parasim::{Label, MatchResult, Pipeline, PipelineConfig, RawDocument};

/// Originals over a small shared vocabulary; each paraphrase swaps two words.
fn synthetic_corpus(pairs: usize) -> Vec<RawDocument> {
    let word = |n: usize| format!("w{}", n % 397);
    let mut docs = Vec::with_capacity(pairs * 2);
    for i in 0..pairs {
        let words: Vec<String> = (0..12).map(|j| word(i * 31 + j * 7)).collect();
        let mut swapped = words.clone();
        swapped[3] = word(i * 17 + 1001);
        swapped[9] = word(i * 19 + 2003);
        docs.push(RawDocument::new(
            format!("{i:04}-original.txt"),
            Label::Original,
            words.join(" "),
        ));
        docs.push(RawDocument::new(
            format!("{i:04}-paraphrase.txt"),
            Label::Paraphrase,
            swapped.join(" "),
        ));
    }
    docs
}

fn results(cfg: PipelineConfig, docs: Vec<RawDocument>) -> Vec<MatchResult> {
    Pipeline::new(cfg)
        .expect("valid config")
        .run(docs)
        .expect("pipeline run")
        .results
}

#[test]
fn shared_pipeline_across_threads() {
    let pipeline = Arc::new(Pipeline::new(PipelineConfig::default()).expect("valid config"));
    let expected = pipeline.run(synthetic_corpus(50)).expect("run").results;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || pipeline.run(synthetic_corpus(50)).expect("run").results)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), expected);
    }
}

#[test]
fn parallel_matches_sequential_on_larger_corpus() {
    let mut cfg = PipelineConfig::default();
    cfg.matcher.top_k = 100;

    let par = results(cfg.clone().with_parallel(true), synthetic_corpus(300));
    let seq = results(cfg.with_parallel(false), synthetic_corpus(300));

    assert!(!par.is_empty());
    assert_eq!(par, seq);
}

#[test]
fn paraphrases_find_their_original() {
    let mut cfg = PipelineConfig::default();
    cfg.perceptual.num_hashes = 128;
    cfg.index.num_bands = 64;
    cfg.matcher.top_k = 1000;

    let found = results(cfg, synthetic_corpus(40));
    // 10 of 14 distinct terms shared: Jaccard 0.71, so banding with two rows
    // almost surely pairs every document with its paraphrase.
    let own = found
        .iter()
        .filter(|r| r.original_id[..4] == r.paraphrase_id[..4])
        .count();
    assert!(own >= 38, "only {own} of 40 pairs recovered");
}
