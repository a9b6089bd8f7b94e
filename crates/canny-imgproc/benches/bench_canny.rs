use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use canny_image::{Frame, Plane};
use canny_imgproc::{
    color::gray_from_rgba,
    edges::{hysteresis_threshold, non_max_suppression},
    filter::{gaussian_blur3, kernels, spatial_gradient, GradientField},
    parallel::ExecutionStrategy,
    Pipeline, PipelineConfig,
};

/// A frame with a bright disk on a dark background, so every stage has work to do.
fn disk_frame(width: usize, height: usize) -> Frame {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = width.min(height) as f32 / 3.0;
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            let v = if d < radius { 200 } else { 40 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    Frame::new([width, height].into(), data).unwrap()
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Canny Stages");

    for (width, height) in [(640, 480), (1280, 720), (1920, 1080)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let frame = disk_frame(*width, *height);
        let mut luma = Plane::from_size_val(frame.size(), 0.0).unwrap();
        gray_from_rgba(&frame, &mut luma).unwrap();
        let mut blurred = Plane::from_size_val(frame.size(), 0.0).unwrap();
        gaussian_blur3(&luma, &mut blurred, &kernels::GAUSSIAN_KERNEL3).unwrap();
        let mut grad = GradientField::from_size(frame.size()).unwrap();
        spatial_gradient(
            &blurred,
            &mut grad,
            &kernels::SOBEL_X_KERNEL3,
            &kernels::SOBEL_Y_KERNEL3,
        )
        .unwrap();
        let mut suppressed = Plane::from_size_val(frame.size(), 0.0).unwrap();
        non_max_suppression(&grad, &mut suppressed).unwrap();

        group.bench_with_input(
            BenchmarkId::new("gray_from_rgba", &parameter_string),
            &frame,
            |b, src| {
                let mut dst = luma.clone();
                b.iter(|| black_box(gray_from_rgba(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("gaussian_blur3", &parameter_string),
            &luma,
            |b, src| {
                let mut dst = blurred.clone();
                b.iter(|| black_box(gaussian_blur3(src, &mut dst, &kernels::GAUSSIAN_KERNEL3)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("spatial_gradient", &parameter_string),
            &blurred,
            |b, src| {
                let mut dst = grad.clone();
                b.iter(|| {
                    black_box(spatial_gradient(
                        src,
                        &mut dst,
                        &kernels::SOBEL_X_KERNEL3,
                        &kernels::SOBEL_Y_KERNEL3,
                    ))
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("non_max_suppression", &parameter_string),
            &grad,
            |b, src| {
                let mut dst = suppressed.clone();
                b.iter(|| black_box(non_max_suppression(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("hysteresis_threshold", &parameter_string),
            &suppressed,
            |b, src| {
                let mut dst = Plane::from_size_val(src.size(), 0u8).unwrap();
                b.iter(|| black_box(hysteresis_threshold(src, &mut dst, 20.0, 50.0)))
            },
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Canny Pipeline");

    let frame = disk_frame(1280, 720);
    group.throughput(criterion::Throughput::Elements((1280 * 720) as u64));

    for (name, strategy) in [
        ("parallel_rows", ExecutionStrategy::ParallelRows),
        ("fixed_1", ExecutionStrategy::Fixed(1)),
        ("fixed_4", ExecutionStrategy::Fixed(4)),
    ] {
        let config = PipelineConfig::default().with_strategy(strategy).unwrap();
        let pipeline = Pipeline::new(config);
        group.bench_with_input(BenchmarkId::new("process", name), &frame, |b, src| {
            b.iter(|| black_box(pipeline.process(src)))
        });
    }

    let pipeline = Pipeline::new(PipelineConfig::simplified(100.0).unwrap());
    group.bench_with_input(
        BenchmarkId::new("process", "simplified"),
        &frame,
        |b, src| b.iter(|| black_box(pipeline.process(src))),
    );

    group.finish();
}

criterion_group!(benches, bench_stages, bench_pipeline);
criterion_main!(benches);
