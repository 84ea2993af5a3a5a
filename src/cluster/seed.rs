use rand::Rng;

/// Pick `min(k, n)` distinct indices in `0..n`, uniformly without replacement.
pub(crate) fn random_medoids<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, n, k.min(n)).into_vec()
}
