//! Heavy-path decomposition of the alternative tree — the segment-tree-like overlay that makes
//! `add_leaf`/`reset_leaf` run in O(log n) rather than O(depth) when the alternative tree is
//! unbalanced.
//!
//! Every maximal heavy path of the alternative tree becomes a balanced binary "path tree" (PT)
//! over its nodes; PTs are glued together into one "heavy-path tree" (HPT) via
//! `child_heavypaths` / `parent_heavypath` links. This is a flat arena of [Path]s addressed by
//! [PathId] — no intrusive back-pointers, no cycles. The alt-tree's nodes hold no HPT state of
//! their own; `HeavyPathTree` keeps a side table (`node_path`) from [NodeIdx] to the [Path] that
//! represents that node's position.

#[cfg(feature = "transfer_sets")]
use itertools::Itertools;

use crate::error::TixError;
use crate::tree::{NodeIdx, Tree};

/// Arena index into a [HeavyPathTree]'s `paths`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct PathId(usize);

impl PathId {
	#[inline]
	fn index( &self ) -> usize {
		self.0
	}
}

/// Which side of the min/max pair a query or transfer-set reconstruction is for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
	/// The `d_min`/`TI_min` side: the leaves that would need to be *added* to `L(u)` to reach
	/// some alternative-tree clade exactly.
	Min,
	/// The `d_max`/`TI_max` side: the leaves that would need to be *removed* from `L(u)` to reach
	/// some alternative-tree clade's complement exactly.
	Max,
}

#[derive(Clone, Debug)]
enum PathVariant {
	/// A pure combine node over two contiguous sub-ranges of the same heavy path.
	Internal { left : PathId, right : PathId },

	/// The heavy-path position of an internal alt-tree node: owns one [PathId] per non-heavy
	/// child, each the root of that child's own (recursively decomposed) heavy path.
	PtLeaf { node : NodeIdx, child_heavypaths : Vec<PathId> },

	/// The heavy-path position of an alt-tree leaf. Terminal: no children, no pendants.
	HptLeaf { node : NodeIdx },
}

/// One node of the heavy-path tree: either an internal binary-split node of a path tree, a leaf
/// of a path tree that pairs with an original alt-tree leaf, or a leaf of the outer heavy-path
/// tree that pairs with an alt-tree node with multiple children. Back-references (`parent`,
/// `sibling`, `parent_heavypath`) are arena indices, not pointers.
#[derive(Clone, Debug)]
struct Path {
	variant : PathVariant,

	parent : Option<PathId>,
	sibling : Option<PathId>,
	parent_heavypath : Option<PathId>,

	total_depth : usize,
	num_hpt_leaves : usize,

	d_min_path : i64,
	d_max_path : i64,
	d_min_subtree : Option<i64>,
	d_max_subtree : Option<i64>,
	diff_path : i64,
	diff_subtree : i64,

	#[cfg(feature = "transfer_sets")]
	include_path : Vec<NodeIdx>,
	#[cfg(feature = "transfer_sets")]
	include_subtree : Vec<NodeIdx>,
	#[cfg(feature = "transfer_sets")]
	exclude : Vec<NodeIdx>,
	#[cfg(feature = "transfer_sets")]
	exclude_path : Vec<NodeIdx>,
}

impl Path {
	fn fresh( variant : PathVariant ) -> Self {
		Path {
			variant,
			parent : None,
			sibling : None,
			parent_heavypath : None,
			total_depth : 0,
			num_hpt_leaves : 0,
			d_min_path : 0,
			d_max_path : 0,
			d_min_subtree : None,
			d_max_subtree : None,
			diff_path : 0,
			diff_subtree : 0,
			#[cfg(feature = "transfer_sets")]
			include_path : Vec::new(),
			#[cfg(feature = "transfer_sets")]
			include_subtree : Vec::new(),
			#[cfg(feature = "transfer_sets")]
			exclude : Vec::new(),
			#[cfg(feature = "transfer_sets")]
			exclude_path : Vec::new(),
		}
	}
}

/// Heavy-path decomposition of one alternative tree, with the `add_leaf`/`reset_leaf` machinery
/// needed to compute rooted Transfer Indices against it in O(log n) amortised per reference leaf.
///
/// Built once by [HeavyPathTree::build] and mutated exclusively through
/// [HeavyPathTree::add_leaf]/[HeavyPathTree::reset_leaf] for the lifetime of one
/// `compute_transfer_indices` call; see `crate::driver`.
pub struct HeavyPathTree<'a> {
	tree : &'a Tree,
	paths : Vec<Path>,
	root : PathId,

	/// `node_path[v.index()]` is the [Path] representing `v`'s heavy-path position.
	node_path : Vec<PathId>,
}

impl<'a> HeavyPathTree<'a> {
	/// Decompose `tree` into a fresh heavy-path tree. `tree` must already have `heavychild` and
	/// `subtreesize` filled in by [Tree::prepare].
	pub fn build( tree : &'a Tree ) -> Self {
		debug_assert!( tree.is_prepared() );
		let mut hpt = HeavyPathTree {
			tree,
			paths : Vec::new(),
			root : PathId( 0 ),
			node_path : vec![ PathId( 0 ); tree.num_nodes() ],
		};
		hpt.root = hpt.heavy_decomposition( tree.root() );
		hpt.compute_total_depths();
		hpt
	}

	fn alloc( &mut self, variant : PathVariant ) -> PathId {
		let id = PathId( self.paths.len() );
		self.paths.push( Path::fresh( variant ) );
		id
	}

	fn path_min( &self, p : PathId ) -> i64 {
		let path = &self.paths[p.index()];
		path.d_min_path + path.diff_path
	}

	fn path_max( &self, p : PathId ) -> i64 {
		let path = &self.paths[p.index()];
		path.d_max_path + path.diff_path
	}

	fn subtree_min( &self, p : PathId ) -> i64 {
		let path = &self.paths[p.index()];
		match path.d_min_subtree {
			Some( v ) => v + path.diff_subtree,
			None => self.path_min( p ),
		}
	}

	fn subtree_max( &self, p : PathId ) -> i64 {
		let path = &self.paths[p.index()];
		match path.d_max_subtree {
			Some( v ) => v + path.diff_subtree,
			None => self.path_max( p ),
		}
	}

	// ---- construction ----

	fn heavy_decomposition( &mut self, v : NodeIdx ) -> PathId {
		let mut chain = vec![ v ];
		let mut cur = v;
		while let Some( h ) = self.tree.heavychild( cur ) {
			chain.push( h );
			cur = h;
		}
		if chain.len() == 1 {
			self.heavypath_leaf( v )
		} else {
			let positions : Vec<PathId> = chain.iter().map( |&n| self.heavypath_leaf( n ) ).collect();
			self.partition_heavypath( &positions )
		}
	}

	fn heavypath_leaf( &mut self, v : NodeIdx ) -> PathId {
		if self.tree.is_leaf( v ) {
			let id = self.alloc( PathVariant::HptLeaf { node : v } );
			let p = &mut self.paths[id.index()];
			p.d_min_path = 1;
			p.d_max_path = 1;
			p.num_hpt_leaves = 1;
			self.node_path[v.index()] = id;
			return id;
		}

		let heavy = self.tree.heavychild( v );
		let mut child_heavypaths = Vec::new();
		for &c in self.tree.children( v ) {
			if Some( c ) != heavy {
				child_heavypaths.push( self.heavy_decomposition( c ) );
			}
		}

		let mut d_min_subtree = None;
		let mut d_max_subtree = None;
		let mut num_hpt_leaves = 0usize;
		for &c in &child_heavypaths {
			let cand_min = self.path_min( c ).min( self.subtree_min( c ) );
			let cand_max = self.path_max( c ).max( self.subtree_max( c ) );
			d_min_subtree = Some( d_min_subtree.map_or( cand_min, |m : i64| m.min( cand_min ) ) );
			d_max_subtree = Some( d_max_subtree.map_or( cand_max, |m : i64| m.max( cand_max ) ) );
			num_hpt_leaves += self.paths[c.index()].num_hpt_leaves;
		}

		let size = self.tree.subtreesize( v ) as i64;
		let id = self.alloc( PathVariant::PtLeaf { node : v, child_heavypaths : child_heavypaths.clone() } );
		{
			let p = &mut self.paths[id.index()];
			p.d_min_path = size;
			p.d_max_path = size;
			p.d_min_subtree = d_min_subtree;
			p.d_max_subtree = d_max_subtree;
			p.num_hpt_leaves = num_hpt_leaves;
		}
		for &c in &child_heavypaths {
			self.paths[c.index()].parent_heavypath = Some( id );
		}
		self.node_path[v.index()] = id;
		id
	}

	/// Builds a balanced binary tree over `positions` (one Path per heavy-path node, root-first),
	/// splitting each range into a `ceil(len/2)`-sized left half and the rest.
	fn partition_heavypath( &mut self, positions : &[PathId] ) -> PathId {
		if positions.len() == 1 {
			return positions[0];
		}
		let half = ( positions.len() + 1 ) / 2;
		let left = self.partition_heavypath( &positions[..half] );
		let right = self.partition_heavypath( &positions[half..] );

		let d_min_path = self.path_min( left ).min( self.path_min( right ) );
		let d_max_path = self.path_max( left ).max( self.path_max( right ) );
		let d_min_subtree = self.subtree_min( left ).min( self.subtree_min( right ) );
		let d_max_subtree = self.subtree_max( left ).max( self.subtree_max( right ) );
		let num_hpt_leaves = self.paths[left.index()].num_hpt_leaves + self.paths[right.index()].num_hpt_leaves;

		let id = self.alloc( PathVariant::Internal { left, right } );
		{
			let p = &mut self.paths[id.index()];
			p.d_min_path = d_min_path;
			p.d_max_path = d_max_path;
			p.d_min_subtree = Some( d_min_subtree );
			p.d_max_subtree = Some( d_max_subtree );
			p.num_hpt_leaves = num_hpt_leaves;
		}
		self.paths[left.index()].parent = Some( id );
		self.paths[right.index()].parent = Some( id );
		self.paths[left.index()].sibling = Some( right );
		self.paths[right.index()].sibling = Some( left );
		id
	}

	fn compute_total_depths( &mut self ) {
		let mut stack = vec![ (self.root, 0usize) ];
		while let Some( (p, d) ) = stack.pop() {
			self.paths[p.index()].total_depth = d;
			match self.paths[p.index()].variant.clone() {
				PathVariant::Internal { left, right } => {
					stack.push( (left, d + 1) );
					stack.push( (right, d + 1) );
				}
				PathVariant::PtLeaf { child_heavypaths, .. } => {
					for c in child_heavypaths {
						stack.push( (c, d + 1) );
					}
				}
				PathVariant::HptLeaf { .. } => {}
			}
		}
	}

	/// Root-to-`leaf` sequence of Paths (root first), following within-PT `parent` links and
	/// cross-PT `parent_heavypath` jumps.
	fn path_to_root( &self, leaf : NodeIdx ) -> Vec<PathId> {
		let mut cur = self.node_path[leaf.index()];
		let mut seq = vec![ cur ];
		loop {
			let p = &self.paths[cur.index()];
			match (p.parent, p.parent_heavypath) {
				(Some( par ), _) => cur = par,
				(None, Some( owner )) => cur = owner,
				(None, None) => break,
			}
			seq.push( cur );
		}
		seq.reverse();
		seq
	}

	// ---- mutation: add_leaf / reset_leaf ----

	/// Add `leaf` (a leaf of the alternative tree) to `L(u)`. Mirrors §4.2's `add_leaf` but
	/// walking O(log n) Paths instead of O(depth) alt-tree nodes.
	pub fn add_leaf( &mut self, leaf : NodeIdx ) {
		debug_assert!( self.tree.is_leaf( leaf ) );
		let seq = self.path_to_root( leaf );

		for i in 0..seq.len() - 1 {
			let p = seq[i];
			let next = seq[i + 1];
			self.push_leaf_downward( p, next, leaf );
		}

		{
			let last = *seq.last().unwrap();
			#[cfg(feature = "transfer_sets")]
			self.paths[last.index()].exclude.push( leaf );
			let lp = &mut self.paths[last.index()];
			let dp = lp.diff_path;
			lp.d_min_path += dp - 1;
			lp.d_max_path = lp.d_min_path;
			lp.diff_path = 0;
			lp.diff_subtree = 0;
		}

		for i in (0..seq.len() - 1).rev() {
			self.recompute_from_children( seq[i] );
		}
	}

	#[allow(unused_variables)]
	fn push_leaf_downward( &mut self, p : PathId, next : PathId, leaf : NodeIdx ) {
		match self.paths[p.index()].variant.clone() {
			PathVariant::PtLeaf { child_heavypaths, .. } => {
				#[cfg(feature = "transfer_sets")]
				self.paths[p.index()].exclude.push( leaf );

				let diff_subtree_p = self.paths[p.index()].diff_subtree;
				for &c in &child_heavypaths {
					self.paths[c.index()].diff_path += diff_subtree_p;
					self.paths[c.index()].diff_subtree += diff_subtree_p;
					if c != next {
						#[cfg(feature = "transfer_sets")]
						{
							self.paths[c.index()].include_subtree.push( leaf );
							self.paths[c.index()].include_path.push( leaf );
						}
						self.paths[c.index()].diff_path += 1;
						self.paths[c.index()].diff_subtree += 1;
					}
				}

				let pp = &mut self.paths[p.index()];
				let diff_path_p = pp.diff_path;
				pp.d_min_path += diff_path_p - 1;
				pp.d_max_path = pp.d_min_path;
				pp.diff_path = 0;
				pp.diff_subtree = 0;
			}
			PathVariant::Internal { left, right } => {
				let diff_path_p = self.paths[p.index()].diff_path;
				let diff_subtree_p = self.paths[p.index()].diff_subtree;
				self.paths[next.index()].diff_path += diff_path_p;
				self.paths[next.index()].diff_subtree += diff_subtree_p;

				let sib = if next == right { left } else { right };
				if next == right {
					#[cfg(feature = "transfer_sets")]
					{
						self.paths[sib.index()].include_subtree.push( leaf );
						self.paths[sib.index()].exclude_path.push( leaf );
					}
					self.paths[sib.index()].diff_path += diff_path_p - 1;
					self.paths[sib.index()].diff_subtree += diff_subtree_p + 1;
				} else {
					#[cfg(feature = "transfer_sets")]
					{
						self.paths[sib.index()].include_path.push( leaf );
						self.paths[sib.index()].include_subtree.push( leaf );
					}
					self.paths[sib.index()].diff_path += diff_path_p + 1;
					self.paths[sib.index()].diff_subtree += diff_subtree_p + 1;
				}

				self.paths[p.index()].diff_path = 0;
				self.paths[p.index()].diff_subtree = 0;
			}
			PathVariant::HptLeaf { .. } => unreachable!( "an HPT leaf cannot have a downstream Path" ),
		}
	}

	fn recompute_from_children( &mut self, p : PathId ) {
		match self.paths[p.index()].variant.clone() {
			PathVariant::Internal { left, right } => {
				let d_min_path = self.path_min( left ).min( self.path_min( right ) );
				let d_max_path = self.path_max( left ).max( self.path_max( right ) );
				let d_min_subtree = self.subtree_min( left ).min( self.subtree_min( right ) );
				let d_max_subtree = self.subtree_max( left ).max( self.subtree_max( right ) );
				let pp = &mut self.paths[p.index()];
				pp.d_min_path = d_min_path;
				pp.d_max_path = d_max_path;
				pp.d_min_subtree = Some( d_min_subtree );
				pp.d_max_subtree = Some( d_max_subtree );
			}
			PathVariant::PtLeaf { child_heavypaths, .. } => {
				let mut d_min = None;
				let mut d_max = None;
				for &c in &child_heavypaths {
					let cmin = self.path_min( c ).min( self.subtree_min( c ) );
					let cmax = self.path_max( c ).max( self.subtree_max( c ) );
					d_min = Some( d_min.map_or( cmin, |m : i64| m.min( cmin ) ) );
					d_max = Some( d_max.map_or( cmax, |m : i64| m.max( cmax ) ) );
				}
				let pp = &mut self.paths[p.index()];
				pp.d_min_subtree = d_min;
				pp.d_max_subtree = d_max;
			}
			PathVariant::HptLeaf { .. } => unreachable!( "an HPT leaf has no children to recompute from" ),
		}
	}

	/// Undo a previous [HeavyPathTree::add_leaf] call for the same `leaf`.
	pub fn reset_leaf( &mut self, leaf : NodeIdx ) {
		debug_assert!( self.tree.is_leaf( leaf ) );
		let seq = self.path_to_root( leaf );

		for i in 0..seq.len() - 1 {
			let p = seq[i];
			let next = seq[i + 1];
			match self.paths[p.index()].variant.clone() {
				PathVariant::Internal { left, right } => {
					let sib = if next == right { left } else { right };
					self.clear_diff_and_sets( sib );
				}
				PathVariant::PtLeaf { child_heavypaths, .. } => {
					for c in child_heavypaths {
						if c != next {
							self.clear_diff_and_sets( c );
						}
					}
				}
				PathVariant::HptLeaf { .. } => unreachable!(),
			}
		}

		for i in (0..seq.len()).rev() {
			let p = seq[i];
			self.clear_diff_and_sets( p );
			match self.paths[p.index()].variant.clone() {
				PathVariant::HptLeaf { node } => {
					let pp = &mut self.paths[p.index()];
					pp.d_min_path = 1;
					pp.d_max_path = 1;
					let _ = node;
				}
				PathVariant::PtLeaf { node, .. } => {
					let size = self.tree.subtreesize( node ) as i64;
					let pp = &mut self.paths[p.index()];
					pp.d_min_path = size;
					pp.d_max_path = size;
					self.recompute_from_children( p );
				}
				PathVariant::Internal { .. } => {
					self.recompute_from_children( p );
				}
			}
		}
	}

	fn clear_diff_and_sets( &mut self, p : PathId ) {
		let pp = &mut self.paths[p.index()];
		pp.diff_path = 0;
		pp.diff_subtree = 0;
		#[cfg(feature = "transfer_sets")]
		{
			pp.include_path.clear();
			pp.include_subtree.clear();
			pp.exclude.clear();
			pp.exclude_path.clear();
		}
	}

	// ---- queries ----

	/// `TI_min(u)` given everything added to `L(u)` so far.
	pub fn ti_min( &self ) -> i64 {
		self.path_min( self.root ).min( self.subtree_min( self.root ) )
	}

	/// `TI_max(u)` given everything added to `L(u)` so far.
	pub fn ti_max( &self ) -> i64 {
		self.path_max( self.root ).max( self.subtree_max( self.root ) )
	}

	// ---- transfer-set reconstruction ----

	/// Reconstruct a witness set for `side`, where `descend_target` is the raw `d_min`/`d_max`
	/// value at the HPT root (i.e. `ti_min()` or `ti_max()`) and `expected_size` is the transfer
	/// index actually being reported for this edge (`min_value` or `n - max_value`).
	///
	/// Returns [TixError::InvariantFailure] if the reconstructed set's size disagrees with
	/// `expected_size` — this always indicates a bug in this crate, not bad input.
	#[cfg(feature = "transfer_sets")]
	pub fn get_transfer_set( &self, side : Side, descend_target : i64, expected_size : usize ) -> Result<Vec<NodeIdx>, TixError> {
		let target = self.descend_to_target( side, descend_target );
		let raw = match side {
			Side::Min => self.collect_min_set( target ),
			Side::Max => self.collect_max_set( target ),
		};
		let set : Vec<NodeIdx> = raw.into_iter().sorted_by_key( |n| n.index() ).dedup().collect();

		if set.len() != expected_size {
			return Err( TixError::InvariantFailure {
				message : format!(
					"reconstructed {side:?}-side transfer set has size {} but expected {expected_size}",
					set.len()
				),
			} );
		}
		Ok( set )
	}

	#[cfg(feature = "transfer_sets")]
	fn eval( &self, p : PathId, side : Side, acc_path : i64, acc_subtree : i64 ) -> (i64, i64) {
		let path = &self.paths[p.index()];
		let (raw_path, raw_subtree) = match side {
			Side::Min => (path.d_min_path, path.d_min_subtree),
			Side::Max => (path.d_max_path, path.d_max_subtree),
		};
		let path_val = raw_path + path.diff_path + acc_path;
		let subtree_val = match raw_subtree {
			Some( v ) => v + path.diff_subtree + acc_subtree,
			None => path_val,
		};
		(path_val, subtree_val)
	}

	/// Non-mutating: descends via `acc_path`/`acc_subtree`, the pending delta inherited from
	/// strict ancestors but not yet physically pushed into this node's own `diff_*` fields
	/// (see §4.5's "propagating accum_path and accum_subtree adjustments").
	#[cfg(feature = "transfer_sets")]
	fn descend_to_target( &self, side : Side, target : i64 ) -> PathId {
		let mut cur = self.root;
		let mut acc_path = 0i64;
		let mut acc_subtree = 0i64;
		loop {
			let (path_val, _) = self.eval( cur, side, acc_path, acc_subtree );
			let diff_path = self.paths[cur.index()].diff_path;
			let diff_subtree = self.paths[cur.index()].diff_subtree;

			match self.paths[cur.index()].variant.clone() {
				PathVariant::HptLeaf { .. } => return cur,
				PathVariant::Internal { left, right } => {
					if path_val == target {
						// The witness is a single position within this range; tie-break right
						// before left.
						let next_acc_path = acc_path + diff_path;
						let next_acc_subtree = acc_subtree + diff_subtree;
						let (right_path_val, _) = self.eval( right, side, next_acc_path, next_acc_subtree );
						cur = if right_path_val == target { right } else { left };
						acc_path = next_acc_path;
						acc_subtree = next_acc_subtree;
					} else {
						// The witness lies in a pendant subtree reachable through left or right.
						let next_acc_path = acc_path + diff_path;
						let next_acc_subtree = acc_subtree + diff_subtree;
						let (_, right_subtree_val) = self.eval( right, side, next_acc_path, next_acc_subtree );
						cur = if right_subtree_val == target { right } else { left };
						acc_path = next_acc_path;
						acc_subtree = next_acc_subtree;
					}
				}
				PathVariant::PtLeaf { child_heavypaths, .. } => {
					if path_val == target {
						return cur;
					}
					let eff = acc_subtree + diff_subtree;
					let mut next = child_heavypaths[0];
					for &c in &child_heavypaths {
						let (_, sv) = self.eval( c, side, eff, eff );
						if sv == target {
							next = c;
							break;
						}
					}
					cur = next;
					acc_path = eff;
					acc_subtree = eff;
				}
			}
		}
	}

	#[cfg(feature = "transfer_sets")]
	fn collect_min_set( &self, target : PathId ) -> Vec<NodeIdx> {
		let mut set = Vec::new();
		let mut cur = target;
		let mut crossed = false;
		loop {
			let p = &self.paths[cur.index()];
			if crossed {
				set.extend( p.include_subtree.iter().copied() );
			} else {
				set.extend( p.include_path.iter().copied() );
			}
			match (p.parent, p.parent_heavypath) {
				(Some( par ), _) => cur = par,
				(None, Some( owner )) => {
					cur = owner;
					crossed = true;
				}
				(None, None) => break,
			}
		}

		if let Some( node ) = self.node_of( target ) {
			self.collect_subtree_leaves( node, &mut set );
		}
		set
	}

	#[cfg(feature = "transfer_sets")]
	fn collect_max_set( &self, target : PathId ) -> Vec<NodeIdx> {
		let mut set : Vec<NodeIdx> = self.paths[target.index()].exclude.clone();
		let mut cur = target;
		loop {
			let p = &self.paths[cur.index()];
			set.extend( p.exclude_path.iter().copied() );
			match (p.parent, p.parent_heavypath) {
				(Some( par ), _) => {
					if let PathVariant::Internal { left, right } = &self.paths[par.index()].variant {
						let sib = if *left == cur { *right } else { *left };
						self.collect_all_under_path( sib, &mut set );
					}
					cur = par;
				}
				(None, Some( owner )) => {
					if let PathVariant::PtLeaf { child_heavypaths, .. } = &self.paths[owner.index()].variant {
						for &c in child_heavypaths {
							if c != cur {
								self.collect_all_under_path( c, &mut set );
							}
						}
					}
					cur = owner;
				}
				(None, None) => break,
			}
		}
		set
	}

	#[cfg(feature = "transfer_sets")]
	fn node_of( &self, p : PathId ) -> Option<NodeIdx> {
		match &self.paths[p.index()].variant {
			PathVariant::HptLeaf { node } | PathVariant::PtLeaf { node, .. } => Some( *node ),
			PathVariant::Internal { .. } => None,
		}
	}

	#[cfg(feature = "transfer_sets")]
	fn collect_all_under_path( &self, p : PathId, out : &mut Vec<NodeIdx> ) {
		match &self.paths[p.index()].variant {
			PathVariant::HptLeaf { node } => {
				if !self.paths[p.index()].exclude.contains( node ) {
					out.push( *node );
				}
			}
			PathVariant::PtLeaf { node, .. } => self.collect_subtree_leaves( *node, out ),
			PathVariant::Internal { left, right } => {
				self.collect_all_under_path( *left, out );
				self.collect_all_under_path( *right, out );
			}
		}
	}

	/// Every leaf under `v` (inclusive, following both pendant children and heavy-path
	/// continuation) whose node is not already marked `exclude`d at its own heavy-path position.
	#[cfg(feature = "transfer_sets")]
	fn collect_subtree_leaves( &self, v : NodeIdx, out : &mut Vec<NodeIdx> ) {
		let p = self.node_path[v.index()];
		if self.tree.is_leaf( v ) {
			if !self.paths[p.index()].exclude.contains( &v ) {
				out.push( v );
			}
			return;
		}

		let pp = &self.paths[p.index()];
		let heavy = self.tree.heavychild( v );
		if pp.exclude.len() < pp.num_hpt_leaves {
			for &c in self.tree.children( v ) {
				if Some( c ) != heavy {
					self.collect_subtree_leaves( c, out );
				}
			}
		}
		if let Some( h ) = heavy {
			self.collect_subtree_leaves( h, out );
		}
	}
}
