//! Criterion benchmarks for the spacenavd packet codec.
//!
//! The daemon streams motion packets at the device's sample rate (typically
//! every 16 ms or faster), so decoding sits on the hot path of every tick.
//!
//! Run with:
//! ```bash
//! cargo bench --package spnav-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spnav_core::{decode_packet, encode_packet, ButtonEvent, DeviceEvent, MotionEvent};

// ── Packet fixtures ───────────────────────────────────────────────────────────

fn make_motion() -> DeviceEvent {
    DeviceEvent::Motion(MotionEvent {
        x: 120,
        y: -35,
        z: 8,
        rx: -250,
        ry: 14,
        rz: 300,
        period_ms: 16,
    })
}

fn make_button() -> DeviceEvent {
    DeviceEvent::Button(ButtonEvent { id: 1, pressed: true })
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_decode(c: &mut Criterion) {
    let motion = encode_packet(&make_motion());
    let button = encode_packet(&make_button());

    c.bench_function("decode_motion", |b| {
        b.iter(|| decode_packet(black_box(&motion)).unwrap())
    });
    c.bench_function("decode_button", |b| {
        b.iter(|| decode_packet(black_box(&button)).unwrap())
    });
}

fn bench_encode(c: &mut Criterion) {
    let motion = make_motion();

    c.bench_function("encode_motion", |b| b.iter(|| encode_packet(black_box(&motion))));
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
