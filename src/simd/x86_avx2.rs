#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::BaseCounts;

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn count_bases_avx2(seq: &[u8]) -> BaseCounts {
    let mut acgtu = 0u64;
    let mut gc = 0u64;
    let mut i = 0usize;
    let len = seq.len();

    let upper_mask = _mm256_set1_epi8(0xDFu8 as i8);
    let va = _mm256_set1_epi8(b'A' as i8);
    let vc = _mm256_set1_epi8(b'C' as i8);
    let vg = _mm256_set1_epi8(b'G' as i8);
    let vt = _mm256_set1_epi8(b'T' as i8);
    let vu = _mm256_set1_epi8(b'U' as i8);

    while i + 32 <= len {
        let ptr = unsafe { seq.as_ptr().add(i) as *const __m256i };
        let mut v = unsafe { _mm256_loadu_si256(ptr) };
        v = _mm256_and_si256(v, upper_mask);
        let m_gc = _mm256_or_si256(_mm256_cmpeq_epi8(v, vc), _mm256_cmpeq_epi8(v, vg));
        let m_atu = _mm256_or_si256(
            _mm256_or_si256(_mm256_cmpeq_epi8(v, va), _mm256_cmpeq_epi8(v, vt)),
            _mm256_cmpeq_epi8(v, vu),
        );
        let gc_bits = _mm256_movemask_epi8(m_gc) as u32;
        let atu_bits = _mm256_movemask_epi8(m_atu) as u32;
        gc += gc_bits.count_ones() as u64;
        acgtu += (gc_bits | atu_bits).count_ones() as u64;
        i += 32;
    }

    let tail = super::scalar::count_bases(&seq[i..]);
    BaseCounts {
        acgtu: acgtu + tail.acgtu,
        gc: gc + tail.gc,
    }
}
