use canonical::{CanonicalizeConfig, Canonicalizer};

fn main() {
    let text = "The cat sat on the mat, and the cat was happy.";
    let canonicalizer =
        Canonicalizer::new(&CanonicalizeConfig::default()).expect("default config is valid");

    let doc = canonicalizer
        .canonicalize("demo-doc", text)
        .expect("canonicalization succeeds");
    println!("tokens:          {:?}", doc.tokens);
    println!("filtered tokens: {:?}", doc.filtered_tokens);
}
