// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use vita49::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut signal_data = Vrt::new_signal_data_packet();
    signal_data.set_stream_id(Some(0xDEAD_BEEF));
    signal_data
        .set_signal_payload(&(0..256u32).flat_map(|v| v.to_be_bytes()).collect::<Vec<u8>>())
        .unwrap();
    signal_data.update_packet_size();
    let data_vec = signal_data.to_bytes().unwrap();

    let mut context = Vrt::new_context_packet();
    context.set_stream_id(Some(1));
    {
        let ctx = context.payload_mut().context_mut().unwrap();
        ctx.set_bandwidth_hz(Some(6e6));
        ctx.set_rf_ref_freq_hz(Some(100e6));
        ctx.set_sample_rate_sps(Some(8e6));
    }
    context.update_packet_size();
    let context_vec = context.to_bytes().unwrap();

    c.bench_function("Parse signal data", |p| {
        p.iter(|| Vrt::try_from(black_box(&data_vec[..])).unwrap())
    });
    c.bench_function("Parse context", |p| {
        p.iter(|| Vrt::try_from(black_box(&context_vec[..])).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
