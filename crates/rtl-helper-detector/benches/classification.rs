use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rtl_helper_core::HelperConfig;
use rtl_helper_detector::{DirectionClassifier, Dispatcher, ElementClassifier};
use rtl_helper_dom::{Document, NodeSpec};

/// Build a board with `cards` card titles and one rich description
fn create_board(cards: usize) -> Document {
    let mut list = NodeSpec::element("ol");
    for i in 0..cards {
        let title = if i % 2 == 0 {
            format!("بطاقة رقم {}", i)
        } else {
            format!("Card number {}", i)
        };
        list = list.child(
            NodeSpec::element("li").child(NodeSpec::element("a").test_id("card-name").text(title)),
        );
    }

    let description = NodeSpec::element("div")
        .class("ak-renderer-wrapper")
        .child(NodeSpec::element("p").text("هذا وصف البطاقة مع رابط "))
        .child(
            NodeSpec::element("ul")
                .child(NodeSpec::element("li").text("العنصر الأول"))
                .child(NodeSpec::element("li").text("Second item")),
        )
        .child(NodeSpec::element("pre").child(NodeSpec::element("code").text("npm install")))
        .child(
            NodeSpec::element("a")
                .attr("href", "https://www.example.com/path")
                .text("www.example.com/path"),
        );

    let root = NodeSpec::element("body")
        .child(NodeSpec::element("h2").test_id("list-name").text("قائمة"))
        .child(list)
        .child(description);
    Document::from_spec(&root).expect("fixture builds")
}

fn bench_direction(c: &mut Criterion) {
    let mut group = c.benchmark_group("direction");
    let classifier = DirectionClassifier::new();

    let samples = [
        ("latin", "Release notes for the next sprint planning meeting"),
        ("arabic", "ملاحظات الإصدار لاجتماع تخطيط السباق القادم"),
        ("mixed", "Project Xylophone release مرحبا بالعالم v2.1"),
    ];
    for (name, text) in samples {
        group.bench_with_input(BenchmarkId::new("classify", name), text, |b, text| {
            b.iter(|| classifier.classify(black_box(text)))
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let dispatcher = Dispatcher::new(&HelperConfig::default()).expect("default config");
    let classifier = ElementClassifier::standard();

    for cards in [10usize, 100, 500] {
        let doc = create_board(cards);
        group.bench_with_input(BenchmarkId::new("scan", cards), &doc, |b, doc| {
            b.iter_batched(
                || doc.clone(),
                |mut doc| {
                    let nodes = classifier
                        .recognized_within(&doc, doc.body())
                        .expect("query succeeds");
                    for node in nodes {
                        let _ = dispatcher.dispatch(&mut doc, node);
                    }
                    doc
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_direction, bench_dispatch);
criterion_main!(benches);
