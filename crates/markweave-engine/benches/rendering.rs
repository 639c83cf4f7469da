use criterion::{Criterion, criterion_group, criterion_main};
use markweave_engine::{Options, html, to_hast, to_html};

fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with *some* **content**, a [link][ref] and a note[^n].\n\n[ref]: https://example.com \"Example\"\n\n1. First\n2. Second\n\n   Loose paragraph\n\n> Quoted `code` and ~~gone~~ text\n\n| a | b |\n| - | :-: |\n| c | d |\n\n[^n]: The note.\n\n";
    base.repeat(size)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.sample_size(10);

    let content = generate_markdown_content(100);
    let options = Options::gfm();

    group.bench_function("to_html", |b| {
        b.iter(|| {
            let output = to_html(std::hint::black_box(&content), &options).unwrap();
            std::hint::black_box(output.len());
        });
    });

    let tree = to_hast(&content, &options).unwrap();
    group.bench_function("serialize", |b| {
        b.iter(|| {
            let output = html::to_html(std::hint::black_box(&tree));
            std::hint::black_box(output.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
