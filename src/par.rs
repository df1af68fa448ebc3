/// Map `$f` over the elements of `$slice`, collecting into any `FromIterator`
/// (including `Result<Vec<_>, _>`). Runs on the rayon pool with the
/// `parallel` feature; output order always matches input order.
macro_rules! par_map {
    ($slice:expr, $f:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            $slice.par_iter().map($f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice.iter().map($f).collect()
        }
    }};
}
