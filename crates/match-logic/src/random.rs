//! Seeded pseudo-random number generator
//!
//! Strategies never touch a process-wide random source. Each side of each
//! round receives its own generator, derived from the tournament seed, the
//! matrix cell and the round, so a tournament replays bit-exactly whether
//! cells run sequentially or on a worker pool.

/// Seeded xorshift64* generator
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create the generator for one matrix cell of a tournament
    pub fn new(seed: u64, cell: u32) -> Self {
        let mut state = seed ^ 0x6a09e667f3bcc908;
        state ^= (cell as u64).wrapping_mul(0x517cc1b727220a95);
        // xorshift has a fixed point at zero
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Derive the generator handed to one side for one round
    pub fn for_turn(&self, round: u32, side: u8) -> Self {
        let salt = ((round as u64) << 1) | side as u64;
        let mut state = self.state ^ salt.wrapping_mul(0x9e3779b97f4a7c15);
        if state == 0 {
            state = 0x2545f4914f6cdd1d;
        }

        let mut rng = Self { state };
        rng.next_u64();
        rng
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Value in 0..100, for percentage checks
    pub fn next_percent(&mut self) -> u8 {
        (self.next_u32() % 100) as u8
    }
}
