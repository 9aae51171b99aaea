//! Round-robin batch selection.
//!
//! Pure, total index arithmetic: each cycle takes the next fixed-size
//! window of the catalog, wrapping with modulo so every record shows
//! infinitely often in stable order regardless of how catalog and batch
//! sizes relate.

/// Indices of the records shown in cycle `cycle_index`.
///
/// Window start is `(cycle_index * batch_size) % catalog_len`; indices
/// wrap within the window. An empty catalog yields an empty batch. When
/// `batch_size > catalog_len`, records repeat within the batch — that is
/// the defined behavior, not an error.
pub fn select_batch(catalog_len: usize, batch_size: usize, cycle_index: u64) -> Vec<usize> {
    if catalog_len == 0 {
        return Vec::new();
    }

    let start = (cycle_index as usize).wrapping_mul(batch_size) % catalog_len;
    (0..batch_size).map(|i| (start + i) % catalog_len).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
