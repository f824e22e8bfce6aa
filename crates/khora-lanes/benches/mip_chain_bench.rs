use criterion::{criterion_group, criterion_main, Criterion};
use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use khora_core::{asset::TextureInfo, task::ImmediateScheduler};
use khora_infra::RayonTaskScheduler;
use khora_lanes::asset_lane::{extract_rgba, Bitmap, MipChainGenerator};
use std::hint::black_box;

fn base_bitmap() -> Bitmap {
    Bitmap::new(DynamicImage::ImageRgba8(RgbaImage::from_fn(
        1024,
        1024,
        |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255]),
    )))
}

fn bench_mip_chain(c: &mut Criterion) {
    let source = base_bitmap();
    let base = extract_rgba(&source).unwrap();

    let mut group = c.benchmark_group("Mip Chain (1024x1024)");
    group.sample_size(10);

    group.bench_function("Immediate", |b| {
        b.iter(|| {
            let mut info = TextureInfo::with_size(1024, 1024, true);
            info.mip_levels.push(base.clone());
            let generator = MipChainGenerator::new(&ImmediateScheduler, FilterType::Lanczos3);
            black_box(generator.generate(&source, &mut info));
        });
    });

    let pool = RayonTaskScheduler::with_threads(4).unwrap();
    group.bench_function("Rayon (4 threads)", |b| {
        b.iter(|| {
            let mut info = TextureInfo::with_size(1024, 1024, true);
            info.mip_levels.push(base.clone());
            let generator = MipChainGenerator::new(&pool, FilterType::Lanczos3);
            black_box(generator.generate(&source, &mut info));
        });
    });

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let source = base_bitmap();
    c.bench_function("Extract RGBA (1024x1024)", |b| {
        b.iter(|| black_box(extract_rgba(&source).unwrap()));
    });
}

criterion_group!(benches, bench_mip_chain, bench_extract);
criterion_main!(benches);
