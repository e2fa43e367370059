use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use structopt::StructOpt;

use std::time;

use tangotree::TangoTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "size", default_value = "1000000")]
    size: i64,

    #[structopt(long = "searches", default_value = "1000000")]
    searches: usize,

    // query distribution over the universe, uniform or gaussian
    #[structopt(long = "dist", default_value = "u")]
    dist: String,
}

fn main() {
    let opts = Opt::from_args();
    let seed = opts.seed.unwrap_or_else(random);
    let mut rng = SmallRng::seed_from_u64(seed);
    println!("perf seed:{}", seed);

    let start = time::Instant::now();
    let mut index = TangoTree::new(opts.size);
    println!("built {} keys in {:?}", opts.size, start.elapsed());

    let (mean, std_dev) = (opts.size as f64 / 2.0, opts.size as f64 / 4.0);

    let start = time::Instant::now();
    let mut hits = 0;
    for _i in 0..opts.searches {
        let key = match opts.dist.as_str() {
            // central-limit approximation of a gaussian, clipped into
            // the universe
            "g" => {
                let s: f64 = (0..12).map(|_| rng.gen::<f64>()).sum::<f64>() - 6.0;
                (mean + s * std_dev).max(1.0).min(opts.size as f64) as i64
            }
            _ => rng.gen_range(1..=opts.size),
        };
        if index.search(key) {
            hits += 1;
        }
    }
    println!(
        "{} searches ({} hits), took {:?}",
        opts.searches,
        hits,
        start.elapsed()
    );

    index.validate().unwrap();
}
