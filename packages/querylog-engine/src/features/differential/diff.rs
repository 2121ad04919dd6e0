use std::cmp::Ordering;

use crate::shared::models::{DiffResults, ResultSet, Row, RowTyped};

/// Compute rows added and removed going from `previous` to `current`.
///
/// A row present `p` times before and `c` times now appears `c - p` times in
/// `added` (when `c > p`) or `p - c` times in `removed` (when `p > c`).
/// Rows compare by their text projection. `removed` follows the sorted order
/// of `previous`; `added` keeps the engine order of `current`.
pub fn diff(previous: &ResultSet, current: &[RowTyped]) -> DiffResults {
    let keys: Vec<Row> = current.iter().map(RowTyped::to_row).collect();
    let mut order: Vec<usize> = (0..current.len()).collect();
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

    let prev = previous.entries();
    let mut is_added = vec![false; current.len()];
    let mut removed = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < prev.len() && j < order.len() {
        match prev[i].0.cmp(&keys[order[j]]) {
            Ordering::Less => {
                removed.push(prev[i].1.clone());
                i += 1;
            }
            Ordering::Greater => {
                is_added[order[j]] = true;
                j += 1;
            }
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    removed.extend(prev[i..].iter().map(|(_, row)| row.clone()));
    for &idx in &order[j..] {
        is_added[idx] = true;
    }

    let added = current
        .iter()
        .zip(is_added)
        .filter(|(_, added)| *added)
        .map(|(row, _)| row.clone())
        .collect();

    DiffResults { added, removed }
}
