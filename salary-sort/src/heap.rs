use log::trace;

/// The value a record is ordered by. Everything else on the record is payload
/// and is carried along untouched.
pub trait SortKey {
    type Key: Ord;

    fn sort_key(&self) -> Self::Key;
}

/// Sorts `items` in place by descending key.
///
/// A min-heap is built over the whole slice, then the minimum is repeatedly
/// swapped to the back of the shrinking heap, so the sorted region grows from
/// the end towards the front. Equal keys may come out in any order.
pub fn sort<T: SortKey>(items: &mut [T]) {
    let mut n = items.len();
    build_heap(items, n);
    debug_assert!(is_min_heap(items, n));

    while n > 0 {
        items.swap(0, n - 1);
        n -= 1;
        let swaps = heapify(items, 0, n);
        trace!("moved minimum to index {n}, heap restored with {swaps} swaps");
    }
}

/// Turns `items[..n]` into a min-heap.
pub fn build_heap<T: SortKey>(items: &mut [T], n: usize) {
    // leaves are already heaps, and a parent can only be fixed once both of
    // its subtrees are, so walk the internal nodes bottom up
    for i in (0..n / 2).rev() {
        heapify(items, i, n);
    }
}

/// Sifts `items[i]` down until the subtree rooted at `i` is a min-heap again.
///
/// Both subtrees below `i` must already be min-heaps. Only `items[..n]` is
/// treated as part of the heap. Returns the number of swaps it took, which is
/// zero when the subtree was already a heap.
pub fn heapify<T: SortKey>(items: &mut [T], i: usize, n: usize) -> usize {
    let left = 2 * i + 1;
    let right = 2 * i + 2;

    // the left child has the lower index, if it is out of bounds so is the right one
    if left >= n {
        return 0;
    }

    let smaller = if right < n && items[right].sort_key() <= items[left].sort_key() {
        right
    } else {
        left
    };

    if items[smaller].sort_key() < items[i].sort_key() {
        items.swap(smaller, i);
        return 1 + heapify(items, smaller, n);
    }

    0
}

pub fn is_min_heap<T: SortKey>(items: &[T], n: usize) -> bool {
    (1..n).all(|child| items[(child - 1) / 2].sort_key() <= items[child].sort_key())
}

pub fn is_sorted_desc<T: SortKey>(items: &[T]) -> bool {
    items
        .windows(2)
        .all(|pair| pair[0].sort_key() >= pair[1].sort_key())
}
