//! Save/load scenarios for the canonical text format.

use backprop::{Network, Topology, Vector};

fn probe_bits(network: &mut Network, probe: &Vector) -> Vec<u64> {
    network.set_input(probe).unwrap();
    network.feed_forward();
    network
        .copy_output()
        .iter()
        .map(|v| v.to_bits())
        .collect()
}

#[test]
fn trained_network_round_trips_through_a_stream() {
    let topology = Topology::new(vec![3, 4, 2]).unwrap();
    let mut network = Network::new_with_seed(topology, 0.1, 0.5, 99);

    // A few arbitrary steps so weights, biases, and momentum deltas all
    // carry non-trivial values.
    let input = Vector::from(vec![0.2, -0.4, 0.6]);
    let target = Vector::from(vec![1.0, 0.0]);
    network.set_input(&input).unwrap();
    for _ in 0..10 {
        network.feed_forward();
        network.back_propagate(&target).unwrap();
    }

    let mut buffer = Vec::new();
    network.save(&mut buffer).unwrap();
    let mut loaded = Network::load(buffer.as_slice()).unwrap();

    assert_eq!(network.topology(), loaded.topology());
    assert_eq!(network.learning_rate(), loaded.learning_rate());
    assert_eq!(network.momentum(), loaded.momentum());

    let probe = Vector::from(vec![0.9, 0.1, -0.3]);
    assert_eq!(
        probe_bits(&mut network, &probe),
        probe_bits(&mut loaded, &probe)
    );
}

#[test]
fn file_round_trip() {
    let topology = Topology::new(vec![3, 4, 2]).unwrap();
    let mut network = Network::new_with_seed(topology, 0.1, 0.5, 7);

    let path = std::env::temp_dir().join(format!(
        "backprop_persistence_{}.txt",
        std::process::id()
    ));
    network.save_file(&path).unwrap();
    let mut loaded = Network::load_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let probe = Vector::from(vec![0.5, 0.5, 0.5]);
    assert_eq!(
        probe_bits(&mut network, &probe),
        probe_bits(&mut loaded, &probe)
    );
}

#[test]
fn golden_text_fixture_is_stable() {
    let golden = include_str!("golden/network_v1.txt");
    let network = Network::from_text(golden).unwrap();

    assert_eq!(network.topology().as_slice(), &[2, 2, 1]);
    assert_eq!(network.learning_rate(), 0.4);
    assert_eq!(network.momentum(), 0.9);
    assert_eq!(network.layers()[0][0].bias(), 0.25);
    assert_eq!(network.layers()[0][1].weights().as_slice(), &[1.0, 2.0]);
    assert_eq!(network.layers()[1][0].weights().as_slice(), &[-1.0, 1.0]);

    // Re-encoding reproduces the fixture byte for byte.
    assert_eq!(network.to_text(), golden);
}
