//! K-means clustering of RGB samples with k-means++ seeding.
//!
//! # Algorithm
//! 1. Seed centroids with k-means++: the first uniformly at random, each
//!    following one by roulette selection weighted by squared distance to
//!    the nearest centroid chosen so far
//! 2. Assign every point to its nearest centroid (Euclidean RGB distance,
//!    ties to the lower index)
//! 3. Stop when no assignment changed or the iteration bound is reached
//! 4. Otherwise move each centroid to the rounded mean of its points; a
//!    centroid left without points is reseeded to a random input point
//!
//! Assignment is embarrassingly parallel and runs on rayon above a size
//! threshold. Centroid recomputation is a sequential reduce, so results are
//! identical with or without parallelism for a given random source.
//!
//! # Complexity
//! O(iterations × n × k)

use std::ops::ControlFlow;

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::model::Rgb;

/// Default bound on refinement iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;
/// Point count at which assignment switches to the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Marks a point that has not been assigned yet.
const UNASSIGNED: usize = usize::MAX;

/// One dominant color and the number of samples it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterResult {
    pub color: Rgb,
    pub count: usize,
}

/// Snapshot handed to the checkpoint hook after each completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationProgress {
    /// Iterations completed so far (1-based).
    pub iteration: usize,
    pub max_iterations: usize,
    /// Points whose assignment changed in this iteration.
    pub changed: usize,
}

/// Full result of a clustering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeansOutcome {
    /// Non-empty clusters, largest first.
    pub clusters: Vec<ClusterResult>,
    /// Iterations completed.
    pub iterations: usize,
    /// `true` when the run stopped because assignments settled.
    pub converged: bool,
    /// `true` when the checkpoint hook stopped the run early. The clusters
    /// then reflect the last fully completed iteration.
    pub cancelled: bool,
}

impl KMeansOutcome {
    fn settled(clusters: Vec<ClusterResult>) -> Self {
        Self {
            clusters,
            iterations: 0,
            converged: true,
            cancelled: false,
        }
    }
}

/// K-means clusterer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
    parallel_threshold: usize,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Bound on refinement iterations. At least one iteration always runs.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Cluster `points`, drawing all randomness from `rng`.
    pub fn run<R: Rng + ?Sized>(&self, points: &[Rgb], rng: &mut R) -> Vec<ClusterResult> {
        self.run_with_checkpoint(points, rng, |_| ControlFlow::Continue(()))
            .clusters
    }

    /// Cluster `points`, calling `checkpoint` after every completed iteration.
    ///
    /// Returning [`ControlFlow::Break`] stops the run at that iteration
    /// boundary; the outcome is marked `cancelled` and holds the clusters of
    /// the iteration just completed.
    pub fn run_with_checkpoint<R, F>(&self, points: &[Rgb], rng: &mut R, mut checkpoint: F) -> KMeansOutcome
    where
        R: Rng + ?Sized,
        F: FnMut(&IterationProgress) -> ControlFlow<()>,
    {
        if points.is_empty() || self.k == 0 {
            return KMeansOutcome::settled(Vec::new());
        }
        if points.len() <= self.k {
            let clusters = points
                .iter()
                .map(|&color| ClusterResult { color, count: 1 })
                .collect();
            return KMeansOutcome::settled(clusters);
        }

        let mut centroids = initialize_centroids(points, self.k, rng);
        let mut assignments = vec![UNASSIGNED; points.len()];
        let mut iterations = 0;
        let mut converged = false;
        let mut cancelled = false;

        while iterations < self.max_iterations {
            let next = self.assign(points, &centroids);
            let changed = next
                .iter()
                .zip(&assignments)
                .filter(|(new, old)| new != old)
                .count();
            assignments = next;
            iterations += 1;

            if changed == 0 {
                converged = true;
                break;
            }
            centroids = recompute_centroids(points, &assignments, self.k, rng);
            tracing::trace!(iteration = iterations, changed, "k-means iteration");

            let progress = IterationProgress {
                iteration: iterations,
                max_iterations: self.max_iterations,
                changed,
            };
            if checkpoint(&progress).is_break() {
                cancelled = true;
                break;
            }
        }

        tracing::debug!(
            k = self.k,
            points = points.len(),
            iterations,
            converged,
            cancelled,
            "k-means finished"
        );

        KMeansOutcome {
            clusters: summarize(&centroids, &assignments),
            iterations,
            converged,
            cancelled,
        }
    }

    fn assign(&self, points: &[Rgb], centroids: &[Rgb]) -> Vec<usize> {
        if points.len() >= self.parallel_threshold {
            points
                .par_iter()
                .map(|point| nearest_centroid(*point, centroids))
                .collect()
        } else {
            points
                .iter()
                .map(|point| nearest_centroid(*point, centroids))
                .collect()
        }
    }
}

/// Squared Euclidean distance in RGB space.
fn distance_squared(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r.abs_diff(b.r) as u32;
    let dg = a.g.abs_diff(b.g) as u32;
    let db = a.b.abs_diff(b.b) as u32;
    dr * dr + dg * dg + db * db
}

fn nearest_centroid(point: Rgb, centroids: &[Rgb]) -> usize {
    let mut nearest = 0;
    let mut best = u32::MAX;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = distance_squared(point, *centroid);
        if d < best {
            best = d;
            nearest = i;
        }
    }
    nearest
}

fn initialize_centroids<R: Rng + ?Sized>(points: &[Rgb], k: usize, rng: &mut R) -> Vec<Rgb> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())]);

    // Squared distance from each point to its nearest chosen centroid
    let mut weights: Vec<f64> = points
        .iter()
        .map(|p| distance_squared(*p, centroids[0]) as f64)
        .collect();

    for _ in 1..k {
        let total: f64 = weights.iter().sum();
        let threshold = rng.r#gen::<f64>() * total;

        let mut cumulative = 0.0;
        let mut chosen = points.len() - 1;
        for (i, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if cumulative >= threshold {
                chosen = i;
                break;
            }
        }

        let centroid = points[chosen];
        centroids.push(centroid);
        for (weight, point) in weights.iter_mut().zip(points) {
            *weight = weight.min(distance_squared(*point, centroid) as f64);
        }
    }
    centroids
}

fn recompute_centroids<R: Rng + ?Sized>(
    points: &[Rgb],
    assignments: &[usize],
    k: usize,
    rng: &mut R,
) -> Vec<Rgb> {
    let mut sums = vec![[0u64; 3]; k];
    let mut counts = vec![0u64; k];

    for (point, &cluster) in points.iter().zip(assignments) {
        let sum = &mut sums[cluster];
        sum[0] += point.r as u64;
        sum[1] += point.g as u64;
        sum[2] += point.b as u64;
        counts[cluster] += 1;
    }

    sums.iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            if count == 0 {
                points[rng.gen_range(0..points.len())]
            } else {
                let n = count as f64;
                Rgb::from_clamped(sum[0] as f64 / n, sum[1] as f64 / n, sum[2] as f64 / n)
            }
        })
        .collect()
}

/// Non-empty clusters sorted by size; ties keep centroid order.
fn summarize(centroids: &[Rgb], assignments: &[usize]) -> Vec<ClusterResult> {
    let mut counts = vec![0usize; centroids.len()];
    for &cluster in assignments {
        if let Some(count) = counts.get_mut(cluster) {
            *count += 1;
        }
    }

    let mut clusters: Vec<ClusterResult> = centroids
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(&color, count)| ClusterResult { color, count })
        .collect();
    clusters.sort_by(|a, b| b.count.cmp(&a.count));
    clusters
}
