use backprop::{Perceptron, TrainingSet, Vector, DEFAULT_THRESHOLD};
use env_logger::Env;

fn main() -> backprop::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut and = TrainingSet::new(2, 1)?;
    and.push(Vector::from(vec![0.0, 0.0]), Vector::from(vec![0.0]))?;
    and.push(Vector::from(vec![0.0, 1.0]), Vector::from(vec![0.0]))?;
    and.push(Vector::from(vec![1.0, 0.0]), Vector::from(vec![0.0]))?;
    and.push(Vector::from(vec![1.0, 1.0]), Vector::from(vec![1.0]))?;

    let mut perceptron = Perceptron::new(2, 0.2, DEFAULT_THRESHOLD);
    let epochs = perceptron.run_training(&and, 2000, 0.01)?;
    println!("stopped after {epochs} epochs");

    for (input, target) in and.samples() {
        perceptron.set_input(input)?;
        perceptron.feed_forward();
        println!(
            "{:?} -> {} (target {})",
            input.as_slice(),
            perceptron.sharp_output(),
            target[0]
        );
    }

    Ok(())
}
