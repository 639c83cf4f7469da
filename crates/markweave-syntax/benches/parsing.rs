use criterion::{Criterion, criterion_group, criterion_main};
use markweave_syntax::{ParseOptions, parse, to_mdast};

fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **content** and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n> Quoted `code` and text\n> continued lazily\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n| a | b |\n| - | :-: |\n| c | d |\n\n";
    base.repeat(size)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = generate_markdown_content(100);
    let options = ParseOptions::gfm();

    group.bench_function("events", |b| {
        b.iter(|| {
            let (events, _) = parse(std::hint::black_box(&content), &options).unwrap();
            std::hint::black_box(events.len());
        });
    });

    group.bench_function("mdast", |b| {
        b.iter(|| {
            let tree = to_mdast(std::hint::black_box(&content), &options).unwrap();
            std::hint::black_box(tree);
        });
    });

    // Unclosed emphasis and brackets are the expensive cases for resolvers.
    let nested = "*a **b [c ".repeat(500);
    group.bench_function("unclosed_openers", |b| {
        b.iter(|| {
            let tree = to_mdast(std::hint::black_box(&nested), &options).unwrap();
            std::hint::black_box(tree);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
