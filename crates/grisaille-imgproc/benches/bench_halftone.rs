use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use grisaille_image::{Image, ImageSize};
use grisaille_imgproc::{halftone, histogram, threshold};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn create_test_image(width: usize, height: usize) -> Image<u8, 1> {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<u8> = (0..(width * height)).map(|_| rng.random()).collect();
    let size = ImageSize { width, height };
    Image::new(size, data).unwrap()
}

fn bench_halftone(c: &mut Criterion) {
    let mut group = c.benchmark_group("Halftone");

    // We will test on Full HD only for clear results
    let (w, h) = (1920, 1080);
    let src = create_test_image(w, h);
    let parameter_string = format!("{}x{}", w, h);

    group.bench_with_input(
        BenchmarkId::new("simple", &parameter_string),
        &src,
        |b, src| b.iter(|| black_box(halftone::simple_halftone(src))),
    );

    // the scan is sequential, this is the serial baseline
    group.bench_with_input(
        BenchmarkId::new("error_diffusion", &parameter_string),
        &src,
        |b, src| {
            b.iter(|| {
                black_box(halftone::error_diffusion_halftone(
                    src,
                    halftone::DEFAULT_DIFFUSION_THRESHOLD,
                ))
            })
        },
    );

    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Segmentation");

    let (w, h) = (1920, 1080);
    let src = create_test_image(w, h);
    let parameter_string = format!("{}x{}", w, h);

    group.bench_with_input(
        BenchmarkId::new("histogram", &parameter_string),
        &src,
        |b, src| b.iter(|| black_box(histogram::compute_histogram(src))),
    );

    group.bench_with_input(
        BenchmarkId::new("equalize", &parameter_string),
        &src,
        |b, src| b.iter(|| black_box(histogram::equalize(src))),
    );

    group.bench_with_input(
        BenchmarkId::new("peak", &parameter_string),
        &src,
        |b, src| b.iter(|| black_box(threshold::peak_segmentation(src))),
    );

    for block_size in [8, 16, 64].iter() {
        group.bench_with_input(
            BenchmarkId::new("adaptive", format!("{}x{}", parameter_string, block_size)),
            &src,
            |b, src| b.iter(|| black_box(threshold::adaptive_segmentation(src, *block_size))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_halftone, bench_segmentation);
criterion_main!(benches);
