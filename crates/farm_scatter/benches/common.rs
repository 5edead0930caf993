use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Particle scales swept by the tank and floor benches, coarse to fine.
pub const SCALES: [f32; 4] = [1.0, 0.7, 0.5, 0.3];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn particles_throughput(particles: usize) -> Throughput {
    Throughput::Elements(particles.max(1) as u64)
}
