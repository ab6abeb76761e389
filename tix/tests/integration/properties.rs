//! Quantified invariants checked against randomly generated tree pairs rather than the fixed
//! scenarios in `scenarios.rs`.

use rand::rngs::StdRng;
use rand::SeedableRng;

use tix::altindex::AltIndex;
use tix::bijection::set_leaf_bijection;
use tix::generate::{generate_random_tree, naive_transfer_indices, taxon_names};
use tix::heavypath::HeavyPathTree;
use tix::tree::{NodeIdx, Tree};
use tix::compute_transfer_indices;

/// For a suite of small random binary trees, `compute_transfer_indices` agrees with the
/// quadratic baseline, and every transfer index lands in `[0, n/2]`.
#[test]
fn property_matches_naive_baseline_and_stays_bounded() {
	let mut rng = StdRng::seed_from_u64( 20260728 );
	for n in [ 2, 3, 4, 5, 8, 13, 21, 30 ] {
		for _ in 0..20 {
			let taxa = taxon_names( n );
			let mut reference = generate_random_tree( &taxa, &mut rng );
			let mut alternative = generate_random_tree( &taxa, &mut rng );

			let expected = naive_transfer_indices( &reference, &alternative );
			let result = compute_transfer_indices( &mut reference, &mut alternative, false ).unwrap();

			assert_eq!( result.transfer_index, expected, "mismatch vs. naive baseline for n={n}" );
			assert!( result.transfer_index.iter().all( |&ti| ti <= n / 2 ), "transfer index out of [0, n/2] for n={n}" );
		}
	}
}

/// Every edge whose child end is a leaf has transfer index 0 and, if sets are requested, a
/// transfer set that is exactly that one leaf.
#[cfg(feature = "transfer_sets")]
#[test]
fn property_terminal_edges_are_trivial() {
	let mut rng = StdRng::seed_from_u64( 7 );
	let taxa = taxon_names( 16 );
	let mut reference = generate_random_tree( &taxa, &mut rng );
	let mut alternative = generate_random_tree( &taxa, &mut rng );
	let result = compute_transfer_indices( &mut reference, &mut alternative, true ).unwrap();
	let sets = result.transfer_sets.as_ref().unwrap();

	for e in reference.edges() {
		if reference.is_leaf( e.right() ) {
			assert_eq!( result.transfer_index[e.id().index()], 0 );
			let set = &sets[e.id().index()];
			assert_eq!( set.len(), 1 );
			assert_eq!( set[0], reference.other( e.right() ).unwrap() );
		}
	}
}

/// Whenever transfer sets are requested, every internal edge's transfer set has size exactly
/// equal to its reported transfer index.
#[cfg(feature = "transfer_sets")]
#[test]
fn property_transfer_sets_match_reported_size() {
	let mut rng = StdRng::seed_from_u64( 99 );
	for n in [ 4, 10, 25, 40 ] {
		let taxa = taxon_names( n );
		let mut reference = generate_random_tree( &taxa, &mut rng );
		let mut alternative = generate_random_tree( &taxa, &mut rng );
		let result = compute_transfer_indices( &mut reference, &mut alternative, true ).unwrap();
		let sets = result.transfer_sets.unwrap();

		for e in reference.edges() {
			if !reference.is_leaf( e.right() ) {
				assert_eq!(
					sets[e.id().index()].len(),
					result.transfer_index[e.id().index()],
					"set/TI size mismatch for n={n}, edge {:?}",
					e.id()
				);
			}
		}
	}
}

/// On inputs where the alternative tree is balanced, the direct (no heavy-path overlay)
/// [AltIndex] scheme and the [HeavyPathTree]-driven scheme produce identical per-edge transfer
/// indices. This exercises `tix::altindex` directly rather than through
/// `compute_transfer_indices` (which always takes the general HPT path), as its own from-scratch
/// recomputation of the same quantity.
#[test]
fn property_direct_altindex_agrees_with_heavypath_tree() {
	let mut rng = StdRng::seed_from_u64( 1234 );
	for n in [ 2, 4, 8, 16, 32 ] {
		let taxa = taxon_names( n );
		// Balanced by construction: repeated even splits of a power-of-two-sized taxon list.
		let mut reference = generate_random_tree( &taxa, &mut rng );
		let mut alternative = balanced_tree( &taxa );

		set_leaf_bijection( &mut reference, &mut alternative ).unwrap();

		let via_altindex = compute_node_ti_via_altindex( &reference, &alternative );
		let via_hpt = compute_node_ti_via_heavypath( &reference, &alternative );
		assert_eq!( via_altindex, via_hpt, "AltIndex and HeavyPathTree disagree for n={n}" );
	}
}

fn balanced_tree( taxa : &[String] ) -> Tree {
	fn build( b : &mut tix::TreeBuilder, parent : NodeIdx, taxa : &[String] ) {
		if taxa.len() == 1 {
			b.add_leaf_child( parent, taxa[0].clone() );
			return;
		}
		let half = taxa.len() / 2;
		for side in [ &taxa[..half], &taxa[half..] ] {
			if side.len() == 1 {
				b.add_leaf_child( parent, side[0].clone() );
			} else {
				let child = b.add_internal_child( parent );
				build( &mut *b, child, side );
			}
		}
	}
	let mut b = Tree::builder();
	let root = b.add_root();
	build( &mut b, root, taxa );
	let mut t = b.build();
	t.prepare().unwrap();
	t
}

/// Replays the driver's heavy-path walk over `ref_tree`, but against a direct [AltIndex] instead
/// of a [HeavyPathTree]. `ref_tree`/`alt_tree` must already be bijected.
fn compute_node_ti_via_altindex( ref_tree : &Tree, alt_tree : &Tree ) -> Vec<usize> {
	let n = alt_tree.n();
	let mut idx = AltIndex::new( alt_tree );
	let mut node_ti = vec![ 0usize; ref_tree.num_nodes() ];

	for &start in ref_tree.leaves() {
		let mut u = start;
		loop {
			if ref_tree.is_leaf( u ) {
				idx.add_leaf( ref_tree.other( u ).unwrap() );
			} else {
				for &light in ref_tree.light_leaves( u ) {
					idx.add_leaf( ref_tree.other( light ).unwrap() );
				}
			}
			let ti_min = idx.query_min();
			let ti_max = idx.query_max();
			node_ti[u.index()] = ti_min.min( n - ti_max ).min( n / 2 );
			match ref_tree.parent( u ) {
				Some( p ) if ref_tree.is_heavychild( u ) => u = p,
				_ => break,
			}
		}

		let mut u = start;
		loop {
			if ref_tree.is_leaf( u ) {
				idx.reset_leaf( ref_tree.other( u ).unwrap() );
			} else {
				for &light in ref_tree.light_leaves( u ) {
					idx.reset_leaf( ref_tree.other( light ).unwrap() );
				}
			}
			match ref_tree.parent( u ) {
				Some( p ) if ref_tree.is_heavychild( u ) => u = p,
				_ => break,
			}
		}
	}
	node_ti
}

/// Same walk as [compute_node_ti_via_altindex], but against a [HeavyPathTree].
fn compute_node_ti_via_heavypath( ref_tree : &Tree, alt_tree : &Tree ) -> Vec<usize> {
	let n = alt_tree.n();
	let mut hpt = HeavyPathTree::build( alt_tree );
	let mut node_ti = vec![ 0usize; ref_tree.num_nodes() ];

	for &start in ref_tree.leaves() {
		let mut u = start;
		loop {
			if ref_tree.is_leaf( u ) {
				hpt.add_leaf( ref_tree.other( u ).unwrap() );
			} else {
				for &light in ref_tree.light_leaves( u ) {
					hpt.add_leaf( ref_tree.other( light ).unwrap() );
				}
			}
			let ti_min = hpt.ti_min() as usize;
			let ti_max = hpt.ti_max() as usize;
			node_ti[u.index()] = ti_min.min( n - ti_max ).min( n / 2 );
			match ref_tree.parent( u ) {
				Some( p ) if ref_tree.is_heavychild( u ) => u = p,
				_ => break,
			}
		}

		let mut u = start;
		loop {
			if ref_tree.is_leaf( u ) {
				hpt.reset_leaf( ref_tree.other( u ).unwrap() );
			} else {
				for &light in ref_tree.light_leaves( u ) {
					hpt.reset_leaf( ref_tree.other( light ).unwrap() );
				}
			}
			match ref_tree.parent( u ) {
				Some( p ) if ref_tree.is_heavychild( u ) => u = p,
				_ => break,
			}
		}
	}
	node_ti
}
