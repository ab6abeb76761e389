//! Random tree generation and a quadratic reference implementation, used only by tests and
//! benchmarks. Mirrors `stt::generate`'s role in the teacher crate: nothing here is reachable
//! from the main `compute_transfer_indices` path.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::tree::{NodeIdx, Tree, TreeBuilder};

/// `n` taxon names `"t0".."t{n-1}"`, in a fixed order (callers that want i.i.d. topologies should
/// shuffle their own copy before building a tree from them).
pub fn taxon_names( n : usize ) -> Vec<String> {
	(0..n).map( |i| format!( "t{i}" ) ).collect()
}

/// Generate a uniformly random bifurcating rooted tree over `taxa`, by repeatedly splitting a
/// shuffled taxon list in two at a random point. `taxa` must have at least 2 elements.
pub fn generate_random_tree( taxa : &[String], rng : &mut impl Rng ) -> Tree {
	assert!( taxa.len() >= 2, "need at least 2 taxa to generate a tree" );
	let mut shuffled = taxa.to_vec();
	shuffled.shuffle( rng );

	let mut b = Tree::builder();
	let root = b.add_root();
	build_random_subtree( &mut b, root, &shuffled, rng );

	let mut t = b.build();
	t.prepare().expect( "a freshly generated tree always satisfies the shape invariants" );
	t
}

fn build_random_subtree( b : &mut TreeBuilder, parent : NodeIdx, taxa : &[String], rng : &mut impl Rng ) {
	debug_assert!( !taxa.is_empty() );
	if taxa.len() == 1 {
		b.add_leaf_child( parent, taxa[0].clone() );
		return;
	}

	let split = rng.gen_range( 1..taxa.len() );
	for side in [ &taxa[..split], &taxa[split..] ] {
		if side.len() == 1 {
			b.add_leaf_child( parent, side[0].clone() );
		} else {
			let child = b.add_internal_child( parent );
			build_random_subtree( b, child, side, rng );
		}
	}
}

/// Generate a left-leaning caterpillar over `taxa`, in the given order: every internal node's
/// non-heavy child is a single leaf. Useful for exercising [crate::heavypath::HeavyPathTree] on
/// a maximally unbalanced alternative tree.
pub fn generate_caterpillar( taxa : &[String] ) -> Tree {
	assert!( taxa.len() >= 2, "need at least 2 taxa to generate a tree" );
	let mut b = Tree::builder();
	let root = b.add_root();
	let mut cur = root;
	// Every node but the last internal one gets a single leaf and an internal child; the last
	// internal node on the spine gets the final two taxa as leaves, so no node is ever left with
	// only one child.
	for (i, name) in taxa.iter().enumerate() {
		if i + 2 == taxa.len() {
			b.add_leaf_child( cur, name.clone() );
			b.add_leaf_child( cur, taxa[i + 1].clone() );
			break;
		}
		b.add_leaf_child( cur, name.clone() );
		cur = b.add_internal_child( cur );
	}
	let mut t = b.build();
	t.prepare().expect( "a freshly generated tree always satisfies the shape invariants" );
	t
}

/// Quadratic reference algorithm: for every internal edge of `ref_tree`, the minimum
/// symmetric-difference cardinality against every node of `alt_tree` *or its complement*,
/// clipped to `n/2`. Used only to differentially test [crate::driver::compute_transfer_indices],
/// which is itself defined as `min(ti_min, n - ti_max)` (the rooted TI is a min over both a
/// clade and its complement, since an unrooted bipartition matches either orientation).
pub fn naive_transfer_indices( ref_tree : &Tree, alt_tree : &Tree ) -> Vec<usize> {
	let n = ref_tree.n();
	let ref_sets = leaf_name_sets( ref_tree );
	let alt_sets = leaf_name_sets( alt_tree );

	let mut out = vec![ 0usize; ref_tree.edges().len() ];
	for v in ref_tree.node_indices() {
		let Some( e ) = ref_tree.parent_edge( v ) else { continue };
		let rs = &ref_sets[v.index()];

		let mut best = n;
		for w in alt_tree.node_indices() {
			let ws = &alt_sets[w.index()];
			let sym_diff = rs.symmetric_difference( ws ).count();
			best = best.min( sym_diff.min( n - sym_diff ) );
		}
		out[e.index()] = best.min( n / 2 );
	}
	out
}

fn leaf_name_sets( tree : &Tree ) -> Vec<HashSet<&str>> {
	let mut sets : Vec<HashSet<&str>> = vec![ HashSet::new(); tree.num_nodes() ];
	fill_leaf_set( tree, tree.root(), &mut sets );
	sets
}

fn fill_leaf_set<'a>( tree : &'a Tree, v : NodeIdx, sets : &mut Vec<HashSet<&'a str>> ) {
	if tree.is_leaf( v ) {
		sets[v.index()].insert( tree.name( v ).unwrap() );
		return;
	}
	for &c in tree.children( v ) {
		fill_leaf_set( tree, c, sets );
	}
	let mut combined = HashSet::new();
	for &c in tree.children( v ) {
		combined.extend( sets[c.index()].iter().copied() );
	}
	sets[v.index()] = combined;
}
