use criterion::{criterion_group, criterion_main, Criterion};
use search::tokenizer::tokenize;
use search::{Document, Engine};

const PAGE: &str = "Rigidbody2D is the component that puts a sprite under the \
control of the 2D physics engine. Forces, gravity and collisions move the \
body each physics step, while transform changes are driven by the solver. \
AudioSource plays back an AudioClip in the scene, with rolloff over \
distance and optional looping. NavMeshAgent components move characters \
along paths baked into the navigation mesh, steering around obstacles.";

fn corpus(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| Document {
            id: format!("doc-{i}"),
            title: format!("Page {i}"),
            url: format!("https://docs.example.com/{i}"),
            content: format!("{PAGE} variant {i}"),
            tags: Vec::new(),
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_page", |b| b.iter(|| tokenize(PAGE)));
}

fn bench_search(c: &mut Criterion) {
    let engine = Engine::new();
    engine.upsert_many(corpus(1000));
    c.bench_function("search_1k_docs", |b| {
        b.iter(|| engine.search("2d physics movement", 5))
    });
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
