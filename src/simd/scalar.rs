use super::BaseCounts;

pub fn count_bases(seq: &[u8]) -> BaseCounts {
    let mut acgtu = 0u64;
    let mut gc = 0u64;
    for &b in seq {
        match b & 0xDF {
            b'C' | b'G' => {
                acgtu += 1;
                gc += 1;
            }
            b'A' | b'T' | b'U' => acgtu += 1,
            _ => {}
        }
    }
    BaseCounts { acgtu, gc }
}
