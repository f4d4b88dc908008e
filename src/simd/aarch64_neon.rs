#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::BaseCounts;

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn count_bases_neon(seq: &[u8]) -> BaseCounts {
    let mut acgtu = 0u64;
    let mut gc = 0u64;
    let mut i = 0usize;
    let len = seq.len();

    let upper_mask = vdupq_n_u8(0xDF);
    let va = vdupq_n_u8(b'A');
    let vc = vdupq_n_u8(b'C');
    let vg = vdupq_n_u8(b'G');
    let vt = vdupq_n_u8(b'T');
    let vu = vdupq_n_u8(b'U');
    let ones = vdupq_n_u8(1);

    while i + 16 <= len {
        let v = unsafe { vld1q_u8(seq.as_ptr().add(i)) };
        let v = vandq_u8(v, upper_mask);

        let m_gc = vorrq_u8(vceqq_u8(v, vc), vceqq_u8(v, vg));
        let m_atu = vorrq_u8(vorrq_u8(vceqq_u8(v, va), vceqq_u8(v, vt)), vceqq_u8(v, vu));

        gc += vaddvq_u8(vandq_u8(m_gc, ones)) as u64;
        acgtu += vaddvq_u8(vandq_u8(vorrq_u8(m_gc, m_atu), ones)) as u64;

        i += 16;
    }

    let tail = super::scalar::count_bases(&seq[i..]);
    BaseCounts {
        acgtu: acgtu + tail.acgtu,
        gc: gc + tail.gc,
    }
}
