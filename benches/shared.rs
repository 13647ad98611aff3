#![allow(dead_code)]

//! Shared utilities for rtree2d benchmarks.
//!
//! This module provides the benchmark payload type, common parameters, and data
//! generators used by the per-operation benchmark modules.

use criterion::Criterion;
use rtree2d::geometry::Rectangle;
use rtree2d::rtree::RTreeObject;

//
// Benchmark Parameters
//
pub const BENCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
pub const BENCH_NUM_ITEMS: u32 = 1000;

//
// Payload Type
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchItem {
    pub id: u32,
    pub bbox: Rectangle,
}

impl RTreeObject for BenchItem {
    fn mbr(&self) -> Rectangle {
        self.bbox
    }
}

//
// Data Generation
//
pub fn generate_items(count: u32) -> Vec<BenchItem> {
    (0..count)
        .map(|id| {
            // A deterministic scatter over a 10,000 x 10,000 plane.
            let x = (id.wrapping_mul(2_654_435_761)) % 10_000;
            let y = (id.wrapping_mul(40_503)) % 10_000;
            let w = 10 + id % 90;
            let h = 10 + id % 70;
            BenchItem {
                id,
                bbox: Rectangle::from_edges(x, y, x + w, y + h),
            }
        })
        .collect()
}

pub fn query_windows() -> Vec<Rectangle> {
    (0..100u32)
        .map(|i| {
            let x = (i * 97) % 9_000;
            let y = (i * 131) % 9_000;
            Rectangle::from_edges(x, y, x + 500, y + 500)
        })
        .collect()
}

pub fn configure_criterion() -> Criterion {
    Criterion::default().measurement_time(BENCH_TIMEOUT)
}
