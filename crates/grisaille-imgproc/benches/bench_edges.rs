use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use grisaille_image::{Image, ImageSize};
use grisaille_imgproc::{edges, filter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn create_test_image(width: usize, height: usize) -> Image<u8, 1> {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<u8> = (0..(width * height)).map(|_| rng.random()).collect();
    let size = ImageSize { width, height };
    Image::new(size, data).unwrap()
}

fn bench_gradients(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gradients");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let src = create_test_image(*width, *height);

        group.bench_with_input(BenchmarkId::new("sobel", &parameter_string), &src, |b, i| {
            b.iter(|| black_box(edges::sobel(i)))
        });

        group.bench_with_input(
            BenchmarkId::new("prewitt", &parameter_string),
            &src,
            |b, i| b.iter(|| black_box(edges::prewitt(i))),
        );

        group.bench_with_input(BenchmarkId::new("kirsch", &parameter_string), &src, |b, i| {
            b.iter(|| black_box(edges::kirsch(i)))
        });

        group.bench_with_input(
            BenchmarkId::new("difference", &parameter_string),
            &src,
            |b, i| b.iter(|| black_box(edges::difference(i))),
        );
    }

    group.finish();
}

fn bench_window_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Window Operators");

    let (width, height) = (512, 448);
    let src = create_test_image(width, height);

    for window_size in [3, 5, 7].iter() {
        group.throughput(criterion::Throughput::Elements(
            (width * height * window_size * window_size) as u64,
        ));

        let parameter_string = format!("{}x{}x{}", width, height, window_size);

        group.bench_with_input(
            BenchmarkId::new("variance", &parameter_string),
            &src,
            |b, i| b.iter(|| black_box(edges::variance(i, *window_size))),
        );

        group.bench_with_input(
            BenchmarkId::new("median", &parameter_string),
            &src,
            |b, i| b.iter(|| black_box(filter::median_filter(i, *window_size))),
        );

        group.bench_with_input(
            BenchmarkId::new("difference_of_gaussians", &parameter_string),
            &src,
            |b, i| b.iter(|| black_box(edges::difference_of_gaussians(i, *window_size, 1.0, 2.0))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_gradients, bench_window_operators);
criterion_main!(benches);
