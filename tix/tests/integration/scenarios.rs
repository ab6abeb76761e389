//! End-to-end scenarios: small, hand-built reference/alternative pairs with known transfer
//! indices and transfer sets.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tix::generate::{generate_caterpillar, generate_random_tree, naive_transfer_indices, taxon_names};
use tix::{compute_transfer_indices, Tree};

use super::util::{internal_edge_tis, leaf, node, tree};

fn quartet_ref() -> Tree {
	// ((a,b),(c,d))
	tree( vec![ node( vec![ leaf( "a" ), leaf( "b" ) ] ), node( vec![ leaf( "c" ), leaf( "d" ) ] ) ] )
}

/// Identical quartets. Both internal edges have TI 0: every leaf the reconstruction would need
/// to add to reach the matching alternative clade is already there, so the transfer sets are
/// empty.
#[cfg(feature = "transfer_sets")]
#[test]
fn identical_quartets_have_zero_ti_and_empty_sets() {
	let mut r = quartet_ref();
	let mut a = quartet_ref();
	let result = compute_transfer_indices( &mut r, &mut a, true ).unwrap();

	assert_eq!(
		internal_edge_tis( &r, &result.transfer_index ),
		vec![ (vec![ "a", "b" ], 0), (vec![ "c", "d" ], 0) ]
	);

	let sets = result.transfer_sets.unwrap();
	for e in r.edges() {
		if !r.is_leaf( e.right() ) {
			assert!( sets[e.id().index()].is_empty() );
		}
	}
}

/// ref = ((a,b),(c,d)); alt = ((a,c),(b,d)). Every internal edge has TI 1, and every internal
/// transfer set has size 1.
#[cfg(feature = "transfer_sets")]
#[test]
fn swapped_quartets_have_ti_one_and_singleton_sets() {
	let mut r = quartet_ref();
	let mut a = tree( vec![ node( vec![ leaf( "a" ), leaf( "c" ) ] ), node( vec![ leaf( "b" ), leaf( "d" ) ] ) ] );
	let result = compute_transfer_indices( &mut r, &mut a, true ).unwrap();

	assert_eq!(
		internal_edge_tis( &r, &result.transfer_index ),
		vec![ (vec![ "a", "b" ], 1), (vec![ "c", "d" ], 1) ]
	);

	let sets = result.transfer_sets.unwrap();
	for e in r.edges() {
		if !r.is_leaf( e.right() ) {
			assert_eq!( sets[e.id().index()].len(), 1 );
		}
	}
}

/// ref = (((a,b),c),d); alt = (a,(b,(c,d))). No alt clade equals `{a,b}` exactly, but alt's
/// `{c,d}` clade is exactly `{a,b}`'s complement within the shared 4-taxon set, so the rooted TI
/// (a min over both a clade and its complement) is 0.
#[test]
fn caterpillar_pair_gives_ti_zero_for_ab_via_complement() {
	let mut r = tree( vec![ node( vec![ node( vec![ leaf( "a" ), leaf( "b" ) ] ), leaf( "c" ) ] ), leaf( "d" ) ] );
	let mut a = tree( vec![ leaf( "a" ), node( vec![ leaf( "b" ), node( vec![ leaf( "c" ), leaf( "d" ) ] ) ] ) ] );
	let result = compute_transfer_indices( &mut r, &mut a, false ).unwrap();

	let ab_edge = r
		.edges()
		.iter()
		.find( |e| {
			let mut names = super::util::leaf_names_below( &r, e.right() );
			names.sort_unstable();
			names == vec![ "a", "b" ]
		} )
		.unwrap();
	assert_eq!( result.transfer_index[ab_edge.id().index()], 0 );
}

/// The same reference quartet against an unbalanced (caterpillar-shaped) alternative tree
/// over the same taxa. The HPT-driven computation must agree with the quadratic baseline on
/// every internal reference edge, regardless of how unbalanced the alternative tree is.
#[test]
fn unbalanced_alt_tree_matches_naive_baseline() {
	let mut r = quartet_ref();
	let mut a = tree( vec![ leaf( "a" ), node( vec![ leaf( "b" ), node( vec![ leaf( "c" ), leaf( "d" ) ] ) ] ) ] );

	let expected = naive_transfer_indices( &r, &a );
	let result = compute_transfer_indices( &mut r, &mut a, false ).unwrap();
	assert_eq!( result.transfer_index, expected );
}

/// Two identical complete binary trees on 8 leaves. Every internal transfer index is 0 and
/// every transfer set is empty, since no leaf needs to move to reach the matching clade.
#[cfg(feature = "transfer_sets")]
#[test]
fn identical_complete_binary_trees_have_zero_ti() {
	fn complete( names : &[&'static str] ) -> tix::Tree {
		fn build( names : &[&'static str] ) -> super::util::Shape {
			if names.len() == 1 {
				leaf( names[0] )
			} else {
				let half = names.len() / 2;
				node( vec![ build( &names[..half] ), build( &names[half..] ) ] )
			}
		}
		match build( names ) {
			super::util::Shape::Node( children ) => tree( children ),
			super::util::Shape::Leaf( _ ) => unreachable!( "8 leaves never degenerates to a single leaf at the root" ),
		}
	}

	let names = [ "a", "b", "c", "d", "e", "f", "g", "h" ];
	let mut r = complete( &names );
	let mut a = complete( &names );
	let result = compute_transfer_indices( &mut r, &mut a, true ).unwrap();

	for e in r.edges() {
		if !r.is_leaf( e.right() ) {
			assert_eq!( result.transfer_index[e.id().index()], 0 );
		}
	}

	let sets = result.transfer_sets.unwrap();
	for e in r.edges() {
		if !r.is_leaf( e.right() ) {
			assert!( sets[e.id().index()].is_empty() );
		}
	}
}

/// A balanced reference tree against a left-leaning caterpillar alternative tree, cross-checked
/// edge-for-edge against the quadratic baseline. Scaled down to 96 taxa to keep test runtime
/// reasonable; larger counts exercise the same code path and are covered by the benchmark binary.
#[test]
fn stress_balanced_ref_vs_caterpillar_alt() {
	let n = 96;
	let taxa = taxon_names( n );
	let mut rng = StdRng::seed_from_u64( 1024 );
	let mut reference = generate_random_tree( &taxa, &mut rng );
	let mut alternative = generate_caterpillar( &taxa );

	let expected = naive_transfer_indices( &reference, &alternative );
	let result = compute_transfer_indices( &mut reference, &mut alternative, false ).unwrap();
	assert_eq!( result.transfer_index, expected );
	assert!( result.transfer_index.iter().all( |&ti| ti <= n / 2 ) );
}
