use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::info;

/// Keeps a seeded uniform sample of at most `cap` items, preserving their
/// original relative order. A cap of zero, or a collection already within the
/// cap, is returned untouched.
pub fn downsample<T>(items: Vec<T>, cap: usize, seed: u64) -> Vec<T> {
    if cap == 0 || items.len() <= cap {
        return items;
    }

    let total = items.len();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keep = index::sample(&mut rng, total, cap).into_vec();
    keep.sort_unstable();

    let mut selected = Vec::with_capacity(cap);
    let mut wanted = keep.into_iter().peekable();
    for (position, item) in items.into_iter().enumerate() {
        if wanted.peek() == Some(&position) {
            selected.push(item);
            wanted.next();
        }
    }

    info!(total, kept = selected.len(), seed, "downsampled applications");
    selected
}
