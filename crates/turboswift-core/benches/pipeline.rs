use criterion::{black_box, criterion_group, criterion_main, Criterion};
use turboswift_core::{check, parse, run_source, tokenize, BridgeRegistry, RunConfig};

const SOURCE: &str = r#"contract App {
    import grey aka grey;
    public var title : String;

    public func main() -> Void {
        let title = "Benchmark";
        let window = grey.GRC();
        window.title(title);
        window.width(800);
        let label = grey.Label();
        label.text("ready");
        label.pack();
        window.show();
    }
}
"#;

fn bench_front_end(c: &mut Criterion) {
    c.bench_function("turbalance", |b| b.iter(|| check(black_box(SOURCE))));
    c.bench_function("tokenize", |b| b.iter(|| tokenize(black_box(SOURCE))));

    let tokens = tokenize(SOURCE);
    c.bench_function("parse", |b| b.iter(|| parse(black_box(&tokens))));
}

fn bench_run(c: &mut Criterion) {
    let bridges = BridgeRegistry::with_grey();
    let config = RunConfig::default();
    c.bench_function("run_source", |b| {
        b.iter(|| run_source(black_box(SOURCE), &config, &bridges, std::io::sink()))
    });
}

criterion_group!(benches, bench_front_end, bench_run);
criterion_main!(benches);
