#[cfg(target_arch = "aarch64")]
mod aarch64_neon;
mod scalar;
#[cfg(target_arch = "x86_64")]
mod x86_avx2;

/// Symbol-class counts for one stretch of sequence text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BaseCounts {
    /// Symbols in `{A,C,G,T,U}`, case-insensitive.
    pub acgtu: u64,
    /// Symbols in `{G,C}`, case-insensitive.
    pub gc: u64,
}

impl BaseCounts {
    pub fn add_assign(&mut self, other: BaseCounts) {
        self.acgtu += other.acgtu;
        self.gc += other.gc;
    }
}

pub fn count_bases(seq: &[u8]) -> BaseCounts {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx2") {
            // SAFETY: avx2 availability checked above.
            return unsafe { x86_avx2::count_bases_avx2(seq) };
        }
        return scalar::count_bases(seq);
    }
    #[cfg(target_arch = "aarch64")]
    {
        // SAFETY: neon is part of the aarch64 baseline.
        return unsafe { aarch64_neon::count_bases_neon(seq) };
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        return scalar::count_bases(seq);
    }
}
