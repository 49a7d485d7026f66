use backprop::{Cost, Network, Topology, Trainer, TrainingSet, Vector};
use env_logger::Env;

fn main() -> backprop::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Classic XOR dataset.
    let mut xor = TrainingSet::new(2, 1)?;
    xor.push(Vector::from(vec![0.0, 0.0]), Vector::from(vec![0.0]))?;
    xor.push(Vector::from(vec![0.0, 1.0]), Vector::from(vec![1.0]))?;
    xor.push(Vector::from(vec![1.0, 0.0]), Vector::from(vec![1.0]))?;
    xor.push(Vector::from(vec![1.0, 1.0]), Vector::from(vec![0.0]))?;

    // 2 -> 2 -> 1 network, the minimal XOR solver.
    let topology = Topology::new(vec![2, 2, 1])?;
    let mut network = Network::new_with_seed(topology, 0.4, 0.9, 7);

    let epochs = Trainer::new(&mut network, 40_000, 0.01)
        .run_training(&xor, &Cost::MeanSquared)?;
    println!("stopped after {epochs} epochs");

    for (input, target) in xor.samples() {
        network.set_input(input)?;
        network.feed_forward();
        let out = network.copy_output()[0];
        println!(
            "{:?} -> {out:.4} (target {})",
            input.as_slice(),
            target[0]
        );
    }

    Ok(())
}
