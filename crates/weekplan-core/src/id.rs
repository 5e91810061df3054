//! Identifier generation for placements.

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::sync::atomic::{AtomicU64, Ordering};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Source of unique ids for scheduled tasks.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random UUIDv4 ids from the OS entropy source.
///
/// If the entropy source is unavailable, falls back to
/// `sched_<unix millis>_<8 base36 chars>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        generate_schedule_id()
    }
}

/// Generate one placement id.
pub fn generate_schedule_id() -> String {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes).into_uuid().to_string(),
        Err(_) => fallback_id(),
    }
}

fn fallback_id() -> String {
    let now = Utc::now();
    let counter = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let seed = (now.timestamp_nanos_opt().unwrap_or_default() as u64) ^ counter.rotate_left(32);
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let suffix: String = (0..8)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    format!("sched_{}_{}", now.timestamp_millis(), suffix)
}
