use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use codepad::analysis::analyze;
use codepad::document::FileType;
use codepad::html;
use codepad::render::render;

/// Generate a document with a given number of body elements, some of which
/// trip the analyzer's rules.
fn generate_document(elements: usize) -> String {
    let mut doc = String::from(
        "<!DOCTYPE html><html><head><title>Bench</title>\
         <script src=\"a.js\"></script><script src=\"b.js\"></script><script src=\"c.js\"></script>\
         </head><body>",
    );
    for i in 0..elements {
        if i % 10 == 0 {
            doc.push_str(&format!("<img src=\"img{}.png\">", i));
        } else {
            doc.push_str(&format!("<p class=\"row\">paragraph {}</p>", i));
        }
    }
    doc.push_str("</body></html>");
    doc
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_parse");
    for size in [100, 1_000, 10_000] {
        let doc = generate_document(size);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| html::parse(black_box(doc)));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for size in [100, 1_000, 10_000] {
        let tree = html::parse(&generate_document(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| analyze(black_box(tree)));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let markdown: String = (0..500)
        .map(|i| format!("## Section {}\n\nSome *text* with `code`.\n\n", i))
        .collect();
    group.bench_function("markdown_500_sections", |b| {
        b.iter(|| render(black_box(&markdown), FileType::Markdown));
    });

    let json = serde_json::to_string(&vec![vec![1u32; 100]; 100]).expect("build json fixture");
    group.bench_function("json_pretty_print", |b| {
        b.iter(|| render(black_box(&json), FileType::Json));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_analyze, bench_render);
criterion_main!(benches);
