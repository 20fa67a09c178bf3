use letternet::{train, Network, TrainConfig, TrainingSet};

fn main() {
    let set = TrainingSet::xor();
    let mut network = Network::random(2, 3, 1, 1.0);
    let config = TrainConfig::new(0.1, 1.0, 100_000);

    match train(&mut network, &set, &config) {
        Ok(error) => println!("converged, aggregate error {:.6}", error),
        Err(e) => {
            eprintln!("training failed: {}", e);
            std::process::exit(1);
        }
    }

    for (input, target) in set.iter() {
        let output = network
            .predict(input)
            .expect("inputs come from the training set");
        println!("{:?} -> {:.4} (target {:.0})", input, output[0], target[0]);
    }
}
