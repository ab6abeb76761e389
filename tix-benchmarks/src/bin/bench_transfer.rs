use std::io::{stdout, Write};
use std::time::Instant;

use clap::Parser;
use tix::generate::naive_transfer_indices;
use tix::compute_transfer_indices;

use tix_benchmarks::bench_util::{generate_pair, report_result, AltShape, PrintType};

#[derive(Parser)]
#[command(name = "Transfer Index Benchmark")]
struct CLI {
	/// Number of shared taxa in the reference/alternative tree pair.
	#[arg(short = 'n', long, default_value_t = 1_000)]
	num_taxa : usize,

	/// Shape of the alternative tree. Include all if omitted.
	#[arg(long, value_enum)]
	shape : Vec<AltShape>,

	/// Verify the result against the quadratic baseline (`tix::generate::naive_transfer_indices`).
	/// Quadratic in `num_taxa`; only sensible for small trees.
	#[arg(long, default_value_t = false)]
	verify : bool,

	/// Print the results in human-readable form.
	#[arg(long, default_value_t = false)]
	print : bool,

	/// Output the results as JSON.
	#[arg(long, default_value_t = false)]
	json : bool,

	/// Seed for the random tree generator.
	#[arg(long, default_value_t = 0)]
	seed : u64,

	/// Also reconstruct a witness transfer set for every edge, not just its size.
	#[arg(long, default_value_t = false)]
	want_sets : bool,
}

fn main() {
	let cli = CLI::parse();
	let print = PrintType::from_args( cli.print, cli.json );

	let shapes = if cli.shape.is_empty() { AltShape::all() } else { cli.shape.clone() };

	for shape in shapes {
		if cli.print {
			println!( "Generating reference/alternative pair: n={}, alt={}, seed={}.", cli.num_taxa, shape.name(), cli.seed );
			stdout().flush().expect( "failed to flush stdout" );
		}

		let (mut reference, mut alternative) = generate_pair( cli.num_taxa, shape, cli.seed );

		let start = Instant::now();
		let result = compute_transfer_indices( &mut reference, &mut alternative, cli.want_sets )
			.expect( "generated trees always satisfy the shape/taxon invariants" );
		let dur = start.elapsed();

		if cli.verify {
			let expected = naive_transfer_indices( &reference, &alternative );
			assert_eq!(
				result.transfer_index, expected,
				"compute_transfer_indices disagrees with the quadratic baseline for n={}, alt={}",
				cli.num_taxa,
				shape.name()
			);
		}

		report_result( print, cli.num_taxa, shape, dur );
	}
}
