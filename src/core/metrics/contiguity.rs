/// Contig-length contiguity summary of one assembly.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Contiguity {
    pub n50: u64,
    pub l50: u64,
}

/// N50/L50 over per-contig lengths.
///
/// Sorts `lengths` in place, longest first, then walks the running sum until it covers half
/// of `total`. N50 is the contig length at the crossing point and L50 the number of contigs
/// consumed to reach it. With `total == 0` there is no crossing point and both stay zero.
pub fn n50_l50(lengths: &mut [u64], total: u64) -> Contiguity {
    if total == 0 {
        return Contiguity::default();
    }
    lengths.sort_by(|a, b| b.cmp(a));
    let mut running = 0u64;
    for (i, &len) in lengths.iter().enumerate() {
        running += len;
        // 2 * running >= total, without the float division.
        if running >= total.saturating_sub(running) {
            return Contiguity {
                n50: len,
                l50: i as u64 + 1,
            };
        }
    }
    Contiguity::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![60, 40], 60, 1, "first contig covers half")]
    #[case(vec![30, 30, 40], 30, 2, "crossing at the second longest")]
    #[case(vec![50, 50], 50, 1, "exactly half counts")]
    #[case(vec![10, 10, 10, 10], 10, 2, "all equal")]
    #[case(vec![1, 1, 1], 1, 2, "odd total needs the ceiling")]
    #[case(vec![0, 7, 0], 7, 1, "empty contigs are carried along")]
    #[case(vec![100], 100, 1, "single contig")]
    fn test_n50_l50(
        #[case] mut lengths: Vec<u64>,
        #[case] n50: u64,
        #[case] l50: u64,
        #[case] description: &str,
    ) {
        let total = lengths.iter().sum();
        assert_eq!(n50_l50(&mut lengths, total), Contiguity { n50, l50 }, "{description}");
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(n50_l50(&mut [0, 0], 0), Contiguity::default());
        assert_eq!(n50_l50(&mut [], 0), Contiguity::default());
    }

    #[test]
    fn test_crossing_is_first_to_reach_half() {
        let mut lengths = vec![5, 3, 9, 1, 12, 7, 2, 8];
        let total: u64 = lengths.iter().sum();
        let c = n50_l50(&mut lengths, total);
        let prefix: u64 = lengths[..c.l50 as usize].iter().sum();
        let before: u64 = lengths[..c.l50 as usize - 1].iter().sum();
        assert!(2 * prefix >= total);
        assert!(2 * before < total);
        assert!(lengths.contains(&c.n50));
        assert_eq!(lengths[c.l50 as usize - 1], c.n50);
    }
}
