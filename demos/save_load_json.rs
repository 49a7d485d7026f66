#[cfg(not(feature = "serde"))]
fn main() {
    println!("enable the `serde` feature: cargo run --example save_load_json --features serde");
}

#[cfg(feature = "serde")]
fn main() -> backprop::Result<()> {
    use backprop::{Cost, Network, Topology, Trainer, TrainingSet, Vector};

    let mut xor = TrainingSet::new(2, 1)?;
    xor.push(Vector::from(vec![0.0, 0.0]), Vector::from(vec![0.0]))?;
    xor.push(Vector::from(vec![0.0, 1.0]), Vector::from(vec![1.0]))?;
    xor.push(Vector::from(vec![1.0, 0.0]), Vector::from(vec![1.0]))?;
    xor.push(Vector::from(vec![1.0, 1.0]), Vector::from(vec![0.0]))?;

    let topology = Topology::new(vec![2, 2, 1])?;
    let mut network = Network::new_with_seed(topology, 0.4, 0.9, 7);
    Trainer::new(&mut network, 1000, 0.01).run_training(&xor, &Cost::MeanSquared)?;

    let path = "target/tmp_network.json";
    network.save_json(path)?;

    let loaded = Network::load_json(path)?;
    assert_eq!(loaded.topology(), network.topology());
    println!("saved and loaded network: {path}");

    Ok(())
}
