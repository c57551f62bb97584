//! Id batching for the render-URL endpoint.

/// Maximum node ids per render-URL call.
///
/// The remote API caps the number of ids in one request; this constant is
/// configuration, not derived.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Splits an ordered id sequence into order-preserving chunks of at most
/// `chunk_size` elements. The last chunk may be shorter; an empty input
/// yields no chunks.
///
/// A `chunk_size` of zero is clamped to one.
#[must_use]
pub fn chunk_ids(ids: &[String], chunk_size: usize) -> Vec<Vec<String>> {
    ids.chunks(chunk_size.max(1))
        .map(<[String]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunk_ids(&[], DEFAULT_CHUNK_SIZE).is_empty());
    }

    #[test]
    fn test_chunk_count_is_ceiling_of_n_over_c() {
        for (n, c, expected) in [(1, 100, 1), (100, 100, 1), (101, 100, 2), (250, 100, 3), (7, 3, 3)] {
            assert_eq!(chunk_ids(&ids(n), c).len(), expected, "n={n} c={c}");
        }
    }

    #[test]
    fn test_concatenation_preserves_order_and_elements() {
        let input = ids(37);
        for c in [1, 2, 5, 36, 37, 38, 100] {
            let flattened: Vec<String> = chunk_ids(&input, c).into_iter().flatten().collect();
            assert_eq!(flattened, input, "chunk size {c}");
        }
    }

    #[test]
    fn test_all_chunks_full_except_possibly_last() {
        let chunks = chunk_ids(&ids(25), 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[1].len(), 10);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn test_exact_multiple_has_full_last_chunk() {
        let chunks = chunk_ids(&ids(30), 10);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|chunk| chunk.len() == 10));
    }

    #[test]
    fn test_chunk_size_one() {
        let chunks = chunk_ids(&ids(4), 1);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|chunk| chunk.len() == 1));
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let chunks = chunk_ids(&ids(3), 0);
        assert_eq!(chunks.len(), 3);
    }
}
