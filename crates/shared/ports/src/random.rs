/// Port for the simulation's single random stream
///
/// Agents and the matching engine draw from one injected handle, so a
/// fixed seed (or a scripted source in tests) yields a fixed trajectory.
pub trait RandomSource {
    /// Gaussian draw; a non-positive `std_dev` returns `mean`
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;

    /// Gamma draw with the given shape and scale
    fn gamma(&mut self, shape: f64, scale: f64) -> f64;

    /// Uniform draw in `[low, high)`; returns `low` when the range is empty
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform index in `[0, upper)`; `upper` must be positive
    fn index(&mut self, upper: usize) -> usize;
}

/// Fisher-Yates shuffle driven by a [`RandomSource`]
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}
