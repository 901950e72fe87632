//! Folio CLI: paginate a text file and print its pages
//! The main interface is through WASM bindings.

use folio::{normalize_line_breaks, Document, EditorConfig, FontMetrics, MetricsProvider};
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut text = String::new();
    let read = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).map(|content| text = content),
        None => std::io::stdin().read_to_string(&mut text).map(|_| ()),
    };
    if let Err(err) = read {
        eprintln!("folio: {err}");
        return ExitCode::FAILURE;
    }

    let config = EditorConfig::default();
    let measure = Box::new(FontMetrics::for_font_size(config.metrics.font_size));
    let metrics = match MetricsProvider::new(config.metrics, measure) {
        Ok(metrics) => metrics,
        Err(err) => {
            eprintln!("folio: {err}");
            return ExitCode::FAILURE;
        }
    };

    let document = Document::paginate(&normalize_line_breaks(&text), &metrics);
    let total = document.len();
    for (idx, page) in document.pages().iter().enumerate() {
        println!("--- page {}/{} ---", idx + 1, total);
        for line in page.lines() {
            println!("{}", line.text());
        }
    }
    ExitCode::SUCCESS
}
