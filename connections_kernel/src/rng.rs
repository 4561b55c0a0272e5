/// Connections kernel — Random Sources
///
/// Every draw the kernel makes goes through `RandomSource`, a stream of
/// floats in [0, 1). Seeded sources are bit-for-bit reproducible across
/// platforms: the seed string is hashed with SHA-256 and the first eight
/// bytes (little endian) seed a PCG-64 generator.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use sha2::{Digest, Sha256};

/// Uniform source of floats in [0, 1).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Closures act as sources, so tests can script exact draws.
impl<F: FnMut() -> f64> RandomSource for F {
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Derive the 64-bit PCG seed for a seed string.
pub fn seed_to_u64(seed: &str) -> u64 {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Deterministic source. Equal seeds give equal streams, forever.
pub struct SeededSource {
    rng: Pcg64,
}

impl SeededSource {
    pub fn from_seed_str(seed: &str) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed_to_u64(seed)),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Non-deterministic source backed by the thread-local generator.
pub struct EntropySource {
    rng: ThreadRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
