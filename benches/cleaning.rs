use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sentiment_dashboard::{pipelines::aggregation::top_bigrams, text::Cleaner};

const REVIEWS: &[&str] = &[
    "Aplikasinya BAGUS banget!! dokternya ramah, tp obatnya agak mahal :( https://halodoc.com",
    "@halodoc gk bisa login dr kemarin, udh update tetep error #kecewa",
    "Pelayanan cepet, dr nya responsif. Recommended bgt 👍👍",
    "lemot bgt, chat sama dokter sering putus. tolong diperbaiki ya min",
    "thx min udh dibantu, obat sampe dlm 1 jam",
];

fn cleaning(c: &mut Criterion) {
    let cleaner = Cleaner::default();

    c.bench_function("clean review", |b| {
        b.iter(|| {
            for review in REVIEWS {
                black_box(cleaner.clean(black_box(review)));
            }
        })
    });

    let corpus: Vec<String> = REVIEWS
        .iter()
        .cycle()
        .take(1_000)
        .map(|review| cleaner.clean(review))
        .collect();

    c.bench_function("top bigrams", |b| {
        b.iter(|| black_box(top_bigrams(black_box(&corpus), 10)))
    });
}

criterion_group!(benches, cleaning);
criterion_main!(benches);
