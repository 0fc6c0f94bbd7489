// benches/bitvector_vs_vec_bool.rs

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use packed_bits::BitVector;

const SIZES: [usize; 3] = [1 << 10, 1 << 14, 1 << 18];

fn alternating(n: usize) -> BitVector {
    let mut bits = BitVector::with_len(n, false).unwrap();
    for i in 0..n {
        bits.set(i, i & 1 == 1).unwrap();
    }
    bits
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("bitvector", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = BitVector::with_len(n, false).unwrap();
                for i in 0..n {
                    bits.bit_mut(i).unwrap().set(i & 1 == 1);
                }
                black_box(bits)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_bool", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = vec![false; n];
                for (i, bit) in bits.iter_mut().enumerate() {
                    *bit = i & 1 == 1;
                }
                black_box(bits)
            });
        });
    }
    group.finish();
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("bitvector", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = BitVector::new();
                bits.reserve(n).unwrap();
                for i in 0..n {
                    bits.push(i & 1 == 1).unwrap();
                }
                black_box(bits)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_bool", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = Vec::with_capacity(n);
                for i in 0..n {
                    bits.push(i & 1 == 1);
                }
                black_box(bits)
            });
        });
    }
    group.finish();
}

fn bench_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("access");
    for size in SIZES {
        let bits = alternating(size);
        group.bench_with_input(BenchmarkId::new("bitvector", size), &size, |b, &n| {
            b.iter(|| {
                let mut sum = 0usize;
                for i in 0..n {
                    sum += bits[i] as usize;
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("bitvector_iter", size), &size, |b, _| {
            b.iter(|| black_box(bits.iter().filter(|&b| b).count()));
        });

        let model: Vec<bool> = (0..size).map(|i| i & 1 == 1).collect();
        group.bench_with_input(BenchmarkId::new("vec_bool", size), &size, |b, &n| {
            b.iter(|| {
                let mut sum = 0usize;
                for i in 0..n {
                    sum += model[i] as usize;
                }
                black_box(sum)
            });
        });
    }
    group.finish();
}

fn bench_set_true(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_true");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("checked", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = BitVector::with_len(n, false).unwrap();
                for i in 0..n {
                    bits.set(i, true).unwrap();
                }
                black_box(bits)
            });
        });

        group.bench_with_input(BenchmarkId::new("unchecked", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = BitVector::with_len(n, false).unwrap();
                for i in 0..n {
                    unsafe { bits.set_true_unchecked(i) };
                }
                black_box(bits)
            });
        });

        group.bench_with_input(BenchmarkId::new("six_at_once", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = BitVector::with_len(n, false).unwrap();
                let mut pos = 0;
                while pos + 5 < n {
                    unsafe { bits.set_true_6_unchecked(pos, 1) };
                    pos += 6;
                }
                black_box(bits)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_bool", size), &size, |b, &n| {
            b.iter(|| {
                let mut bits = vec![false; n];
                for bit in bits.iter_mut() {
                    *bit = true;
                }
                black_box(bits)
            });
        });
    }
    group.finish();
}

fn bench_progression(c: &mut Criterion) {
    let mut group = c.benchmark_group("progression");
    for size in SIZES {
        for stride in [3usize, 7, 64] {
            let count = size.div_ceil(stride);
            let id = format!("{size}/stride_{stride}");

            group.bench_with_input(BenchmarkId::new("batch", &id), &size, |b, &n| {
                let mut bits = BitVector::with_len(n, false).unwrap();
                b.iter(|| {
                    unsafe { bits.set_progression_unchecked(0, stride, count) };
                    black_box(bits.as_words());
                });
            });

            group.bench_with_input(BenchmarkId::new("loop", &id), &size, |b, &n| {
                let mut bits = BitVector::with_len(n, false).unwrap();
                b.iter(|| {
                    for i in 0..count {
                        unsafe { bits.set_true_unchecked(i * stride) };
                    }
                    black_box(bits.as_words());
                });
            });

            group.bench_with_input(BenchmarkId::new("vec_bool", &id), &size, |b, &n| {
                let mut bits = vec![false; n];
                b.iter(|| {
                    for i in 0..count {
                        bits[i * stride] = true;
                    }
                    black_box(&bits);
                });
            });
        }
    }
    group.finish();
}

fn bench_skip_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("skip_ones");
    for size in SIZES {
        let mut bits = BitVector::with_len(size, true).unwrap();
        bits.set(size - 1, false).unwrap();

        group.bench_with_input(BenchmarkId::new("bitvector", size), &size, |b, _| {
            b.iter(|| black_box(bits.skip_ones(black_box(0)).unwrap()));
        });

        let mut model = vec![true; size];
        model[size - 1] = false;
        group.bench_with_input(BenchmarkId::new("vec_bool", size), &size, |b, _| {
            b.iter(|| black_box(model.iter().position(|&b| !b)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_push,
    bench_access,
    bench_set_true,
    bench_progression,
    bench_skip_ones
);
criterion_main!(benches);
