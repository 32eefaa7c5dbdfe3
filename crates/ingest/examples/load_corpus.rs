use std::env;

use ingest::{IngestConfig, Label, load_directory};

fn main() {
    let Some(dir) = env::args().nth(1) else {
        eprintln!("usage: load_corpus <dir>");
        std::process::exit(2);
    };

    let cfg = IngestConfig {
        max_file_bytes: Some(1 << 20),
        ..Default::default()
    };
    match load_directory(&dir, &cfg) {
        Ok(docs) => {
            for doc in &docs {
                let marker = match doc.label {
                    Label::Original => "O",
                    Label::Paraphrase => "P",
                };
                println!("{marker} {:<32} {} bytes", doc.id, doc.text.len());
            }
            println!("{} documents", docs.len());
        }
        Err(err) => {
            eprintln!("failed to load {dir}: {err}");
            std::process::exit(1);
        }
    }
}
