//! Letter-classification entry point.
//!
//! Builds a fixed-topology network, loads the 52 letter sample files from a
//! data directory (first CLI argument, default `letters`), trains to a fixed
//! target error, saves the weights, reloads them, and runs one inference as
//! a smoke test. All of this is orchestration glue around the library.

use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use letternet::data::labels;
use letternet::persist::weights;
use letternet::{EpochStats, Error, Network, TrainConfig, TrainingSet};

const N_INPUT: usize = 10_000;
const N_HIDDEN: usize = 30;
const CLASS_COUNT: usize = 52;
const WEIGHT_RANGE: f64 = 0.5;
const TARGET_ERROR: f64 = 0.1;
const LEARNING_RATE: f64 = 1.0;
const MAX_EPOCHS: usize = 100_000;
const WEIGHTS_FILE: &str = "weights.txt";

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Sample files are named by letter: `a.txt`..`z.txt` for the lowercase
/// samples, then `au.txt`..`zu.txt` for the uppercase ones.
fn sample_files() -> Vec<String> {
    let lower = ('a'..='z').map(|c| format!("{}.txt", c));
    let upper = ('a'..='z').map(|c| format!("{}u.txt", c));
    lower.chain(upper).collect()
}

fn run() -> Result<(), Error> {
    let data_dir = PathBuf::from(env::args().nth(1).unwrap_or_else(|| "letters".into()));

    let width = labels::label_width(CLASS_COUNT);
    let label_table = labels::class_labels(CLASS_COUNT, width)?;

    let mut set = TrainingSet::new(N_INPUT, width);
    for (slot, name) in sample_files().iter().enumerate() {
        set.push_sample_file(data_dir.join(name), label_table[slot].clone())?;
    }
    println!("loaded {} samples from {}", set.len(), data_dir.display());

    let mut network = Network::random(N_INPUT, N_HIDDEN, width, WEIGHT_RANGE);

    // The trainer reports progress over a channel; printing happens here so
    // the library never touches stdout.
    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            if stats.epoch % 100 == 0 {
                println!("epoch {:>6}  error: {}", stats.epoch, stats.aggregate_error);
            }
        }
    });

    let mut config = TrainConfig::new(TARGET_ERROR, LEARNING_RATE, MAX_EPOCHS);
    config.progress_tx = Some(tx);

    let achieved = letternet::train(&mut network, &set, &config)?;
    drop(config);
    printer.join().expect("printer thread never panics");
    println!("trained to aggregate error {}", achieved);

    weights::save_weights(&network, WEIGHTS_FILE)?;
    println!("saved weights to {}", WEIGHTS_FILE);

    let reloaded = weights::load_weights(WEIGHTS_FILE, N_INPUT, N_HIDDEN, width)?;
    let output = reloaded.predict(set.input(0))?;
    println!("a: {:?}", output);

    Ok(())
}
