use criterion::{criterion_group, criterion_main, Criterion};
use digest::Update;
use digest::{core_api::CoreWrapper, FixedOutput};
use rand::Rng;
use x11hash::{groestl::Groestl512Core, Stage};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rnd = rand::thread_rng();
    let mut header = [0; 80];
    for i in header.iter_mut() {
        *i = rnd.gen();
    }

    c.bench_function("x11 80 bytes", |b| b.iter(|| x11hash::digest(&header)));

    let mut state = [0; 64];
    for i in state.iter_mut() {
        *i = rnd.gen();
    }

    for stage in Stage::ALL {
        c.bench_function(&format!("{} 64 bytes", stage), |b| b.iter(|| stage.compute(&state)));
    }

    let mut buf = [0; 600];
    for i in buf.iter_mut() {
        *i = rnd.gen();
    }

    c.bench_function("groestl512 600 bytes", |b| {
        b.iter(|| {
            let mut cw = CoreWrapper::<Groestl512Core>::default();
            cw.update(&buf);
            cw.finalize_fixed();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
