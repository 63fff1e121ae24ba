//! Planted core-periphery graph generator.
//!
//! Nodes `c0..` form the planted core and `p0..` the periphery. Core nodes are
//! chained and every periphery node is anchored to a random core node, so the
//! generated graph is always connected; the densities add further edges on
//! top of that skeleton.

use coreper_core::{Graph, GraphBuilder};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::PlantedError;

/// Parameters of a planted core-periphery graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantedConfig {
    /// Nodes in the planted core.
    pub core_size: usize,
    /// Nodes in the planted periphery.
    pub periphery_size: usize,
    /// Probability of an edge between two core nodes.
    pub core_density: f64,
    /// Probability of an edge between a core and a periphery node.
    pub mixed_density: f64,
    /// Probability of an edge between two periphery nodes.
    pub periphery_density: f64,
    /// Seed of the edge sampler.
    pub seed: u64,
}

impl PlantedConfig {
    /// Dense core, sparse rim: the shape the extraction benchmarks target.
    #[must_use]
    pub fn typical(core_size: usize, periphery_size: usize, seed: u64) -> Self {
        Self {
            core_size,
            periphery_size,
            core_density: 0.6,
            mixed_density: 0.05,
            periphery_density: 0.005,
            seed,
        }
    }

    fn validate(&self) -> Result<(), PlantedError> {
        if self.core_size == 0 {
            return Err(PlantedError::EmptyCore);
        }
        for (parameter, value) in [
            ("core_density", self.core_density),
            ("mixed_density", self.mixed_density),
            ("periphery_density", self.periphery_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PlantedError::InvalidProbability { parameter, value });
            }
        }
        Ok(())
    }
}

/// Sampled edge list with known core membership.
#[derive(Clone, Debug)]
pub struct PlantedGraph {
    core_size: usize,
    periphery_size: usize,
    edges: Vec<(String, String)>,
}

impl PlantedGraph {
    /// Samples a graph according to `config`.
    ///
    /// # Errors
    /// Returns [`PlantedError`] when the core is empty or a density lies
    /// outside `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use coreper_benches::planted::{PlantedConfig, PlantedGraph};
    ///
    /// let planted = PlantedGraph::generate(&PlantedConfig::typical(5, 20, 7))
    ///     .expect("valid config");
    /// let graph = planted.build(7);
    /// assert_eq!(graph.node_count(), 25);
    /// ```
    pub fn generate(config: &PlantedConfig) -> Result<Self, PlantedError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut edges = Vec::new();
        let core = |i: usize| format!("c{i}");
        let rim = |i: usize| format!("p{i}");

        for i in 1..config.core_size {
            edges.push((core(i - 1), core(i)));
        }
        for i in 0..config.periphery_size {
            let anchor = rng.gen_range(0..config.core_size);
            edges.push((rim(i), core(anchor)));
        }

        for i in 0..config.core_size {
            for j in (i + 2)..config.core_size {
                if rng.gen_bool(config.core_density) {
                    edges.push((core(i), core(j)));
                }
            }
            for j in 0..config.periphery_size {
                if rng.gen_bool(config.mixed_density) {
                    edges.push((core(i), rim(j)));
                }
            }
        }
        for i in 0..config.periphery_size {
            for j in (i + 1)..config.periphery_size {
                if rng.gen_bool(config.periphery_density) {
                    edges.push((rim(i), rim(j)));
                }
            }
        }

        Ok(Self {
            core_size: config.core_size,
            periphery_size: config.periphery_size,
            edges,
        })
    }

    /// Number of planted core nodes.
    #[must_use]
    pub fn core_size(&self) -> usize {
        self.core_size
    }

    /// Total number of planted nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.core_size + self.periphery_size
    }

    /// Sampled token pairs; may contain an edge in both directions.
    #[must_use]
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    /// Renders the sample in the edge-list file format.
    #[must_use]
    pub fn to_edge_list(&self) -> String {
        let mut text = String::new();
        for (source, target) in &self.edges {
            text.push_str(source);
            text.push(' ');
            text.push_str(target);
            text.push('\n');
        }
        text
    }

    /// Builds the sampled graph in memory.
    #[must_use]
    pub fn build(&self, seed: u64) -> Graph {
        GraphBuilder::new()
            .with_name("planted")
            .with_seed(seed)
            .build_from_edges(self.edges.iter().map(|(s, t)| (s.as_str(), t.as_str())))
    }
}
