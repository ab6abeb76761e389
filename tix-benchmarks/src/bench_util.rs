//! Utilities for benchmarking [tix::compute_transfer_indices].

use clap::clap_derive::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tix::generate::{generate_caterpillar, generate_random_tree, taxon_names};
use tix::Tree;

/// How to print benchmark results.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum PrintType {
	Silent,
	Print,
	Json,
}

impl PrintType {
	pub fn from_args( print : bool, json : bool ) -> Self {
		if print {
			if json {
				eprintln!( "Cannot both print and print json" )
			}
			Self::Print
		} else if json {
			Self::Json
		} else {
			Self::Silent
		}
	}
}

/// The shape of the alternative tree to benchmark against, usable by CLAP.
///
/// `Balanced` exercises the amortised heavy-path scheme at its best case (every root-to-leaf
/// walk through the alt-tree is O(log n)); `Caterpillar` exercises its worst case (a single
/// heavy path of length n), which is exactly the shape `HeavyPathTree` exists to make fast.
#[derive( Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum )]
pub enum AltShape {
	/// Alternative tree generated the same (random-split) way as the reference tree.
	Random,
	/// Alternative tree is a left-leaning caterpillar: maximally unbalanced.
	Caterpillar,
}

impl AltShape {
	pub fn all() -> Vec<AltShape> {
		vec![ AltShape::Random, AltShape::Caterpillar ]
	}

	pub fn name( &self ) -> &'static str {
		match self {
			AltShape::Random => "random",
			AltShape::Caterpillar => "caterpillar",
		}
	}
}

/// Build a reference/alternative tree pair over `n` shared taxa: the reference tree is always a
/// random bifurcating topology; the alternative tree's shape is chosen by `shape`. Both trees are
/// already [Tree::prepare]d.
pub fn generate_pair( n : usize, shape : AltShape, seed : u64 ) -> (Tree, Tree) {
	let taxa = taxon_names( n );
	let mut rng = StdRng::seed_from_u64( seed );

	let reference = generate_random_tree( &taxa, &mut rng );
	let alternative = match shape {
		AltShape::Random => generate_random_tree( &taxa, &mut rng ),
		AltShape::Caterpillar => generate_caterpillar( &taxa ),
	};
	(reference, alternative)
}

/// Report one benchmark measurement, either as a human-readable line or as a JSON object,
/// matching the shape `stt-benchmarks` uses for its own per-implementation timings.
pub fn report_result( print : PrintType, n : usize, shape : AltShape, dur : std::time::Duration ) {
	match print {
		PrintType::Silent => {}
		PrintType::Print => {
			let millis = dur.as_micros() as f64 / 1000.;
			let micros_per_leaf = dur.as_micros() as f64 / n as f64;
			println!(
				"n={n:<8} alt={:<12} {millis:10.3}ms ({micros_per_leaf:7.3}\u{b5}s/leaf)",
				shape.name()
			)
		}
		PrintType::Json => {
			println!(
				"{}",
				json::stringify( json::object! {
					num_taxa : n,
					alt_shape : shape.name(),
					time_ns : dur.as_nanos() as usize,
				} )
			)
		}
	}
}
