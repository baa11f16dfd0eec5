//! Identifier → hue hashing.
//!
//! FNV-1a over the identifier's UTF-8 bytes, optionally XOR-ed with the
//! FNV-1a of the seed's decimal form, reduced modulo 360. All arithmetic
//! is on `u32`, so the hue is identical on every platform.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a.
#[must_use]
pub fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Stable hue in [0, 360) for a workspace identifier.
///
/// A seed of 0 leaves the identifier's hash untouched; any other seed
/// moves every identifier to a different, equally stable hue.
#[must_use]
pub fn base_hue(identifier: &str, seed: i64) -> u16 {
    let mut hash = fnv1a(identifier.as_bytes());
    if seed != 0 {
        hash ^= fnv1a(seed.to_string().as_bytes());
    }
    // Safe: the remainder is below 360.
    #[allow(clippy::cast_possible_truncation)]
    let hue = (hash % 360) as u16;
    hue
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(fnv1a(b""), 0x811c_9dc5);
        assert_eq!(fnv1a(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn my_project_snapshot() {
        assert_eq!(fnv1a(b"my-project"), 2_692_180_491);
        assert_eq!(base_hue("my-project", 0), 51);
    }

    #[test]
    fn seed_moves_the_hue() {
        assert_eq!(base_hue("my-project", 7), 93);
        assert_ne!(base_hue("my-project", 7), base_hue("my-project", 0));
    }

    #[test]
    fn deterministic() {
        assert_eq!(base_hue("workspace", 3), base_hue("workspace", 3));
    }

    #[test]
    fn negative_seed_is_hashed_with_its_sign() {
        let hash = fnv1a(b"repo") ^ fnv1a(b"-4");
        assert_eq!(u32::from(base_hue("repo", -4)), hash % 360);
    }

    #[test]
    fn non_ascii_identifiers_use_utf8_bytes() {
        let hash = fnv1a("プロジェクト".as_bytes());
        assert_eq!(u32::from(base_hue("プロジェクト", 0)), hash % 360);
    }

    #[test]
    fn always_below_360() {
        for i in 0..2000 {
            assert!(base_hue(&format!("project-{i}"), i64::from(i % 5)) < 360);
        }
    }

    #[test]
    fn different_identifiers_spread_over_the_wheel() {
        let hues: HashSet<u16> = (0..1000).map(|i| base_hue(&format!("/home/dev/repo-{i}"), 0)).collect();
        assert!(hues.len() > 300, "only {} distinct hues", hues.len());
    }

    #[test]
    fn paired_identifiers_rarely_collide() {
        let differing = (0..2000)
            .filter(|i| base_hue(&format!("workspace-a-{i}"), 0) != base_hue(&format!("workspace-b-{i}"), 0))
            .count();
        assert!(differing >= 1980, "{differing} of 2000 pairs differ");
    }
}
