/// 128-bit PCG with the DXSM output permutation.
///
/// The state advances before every output, the LCG multiplier and increment are the full
/// 128-bit PCG constants, and the bounded/float draws use the same reductions as Go's
/// `math/rand/v2`. Changing any of this changes every monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pcg64Dxsm {
    hi: u64,
    lo: u64,
}

impl Pcg64Dxsm {
    const MUL: u128 = 0x2360_ed05_1fc6_5da4_4385_df64_9fcc_f645;
    const INC: u128 = 0x5851_f42d_4c95_7f2d_1405_7b7e_f767_814f;
    const CHEAP_MUL: u64 = 0xda94_2042_e4dd_58b5;

    /// Build a generator from the two halves of its 128-bit state.
    pub fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Seed from a 64-bit digest: `hi = digest`, `lo = (digest >> 1) | 1`.
    pub fn from_digest(digest: u64) -> Self {
        Self::new(digest, (digest >> 1) | 1)
    }

    fn step(&mut self) {
        let state = (u128::from(self.hi) << 64) | u128::from(self.lo);
        let state = state.wrapping_mul(Self::MUL).wrapping_add(Self::INC);
        self.hi = (state >> 64) as u64;
        self.lo = state as u64;
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.step();
        let mut hi = self.hi;
        hi ^= hi >> 32;
        hi = hi.wrapping_mul(Self::CHEAP_MUL);
        hi ^= hi >> 48;
        hi.wrapping_mul(self.lo | 1)
    }

    /// Uniform integer in `[0, n)`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "below() needs a non-empty range");
        if n & (n - 1) == 0 {
            return self.next_u64() & (n - 1);
        }

        let (mut hi, mut lo) = mul_wide(self.next_u64(), n);
        if lo < n {
            let thresh = n.wrapping_neg() % n;
            while lo < thresh {
                (hi, lo) = mul_wide(self.next_u64(), n);
            }
        }
        hi
    }

    /// Uniform float in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() & ((1u64 << 53) - 1);
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let p = u128::from(a) * u128::from(b);
    ((p >> 64) as u64, p as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/select/rng.rs"]
mod tests;
