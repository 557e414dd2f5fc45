use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion};
use mapcss_rules::{class, tag, Rule, RuleIndex, Tags};

fn build_shared_index() -> (Arc<RuleIndex>, Tags) {
    let mut rules = Vec::new();
    let n = 64;

    for i in 0..n {
        let key = format!("k{}", i % 16);
        rules.push(
            Rule::new("way")
                .unwrap()
                .when(tag(&key).eq("yes"))
                .when(tag("layer").gte("0")),
        );
        if i % 8 == 0 {
            rules.push(Rule::new("").unwrap().when(tag(&key).unset()).when(class("halo")));
        }
    }

    let mut tags = Tags::new().set("layer", "1");
    for i in 0..4 {
        tags.insert(format!("k{i}"), "yes");
    }

    (Arc::new(RuleIndex::new(rules)), tags)
}

fn bench_throughput(c: &mut Criterion) {
    let thread_counts = [1, 2, 4, 8];

    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(5));

    for &threads in &thread_counts {
        let (index, tags) = build_shared_index();

        group.bench_function(&format!("{threads}_threads"), |b| {
            b.iter_custom(|iters| {
                let per_thread = iters / threads as u64;
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let idx = Arc::clone(&index);
                        let t = tags.clone();
                        thread::spawn(move || {
                            let start = Instant::now();
                            for _ in 0..per_thread {
                                let _ = idx.matching("line", &t, 14);
                            }
                            start.elapsed()
                        })
                    })
                    .collect();

                let mut max_elapsed = Duration::ZERO;
                for h in handles {
                    let elapsed = h.join().unwrap();
                    if elapsed > max_elapsed {
                        max_elapsed = elapsed;
                    }
                }
                max_elapsed
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
