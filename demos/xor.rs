// XOR on a [-1, 1] sigmoid, mixing backprop with a crossover round:
// a small population is trained briefly, the two best members are bred, and
// the child is trained to convergence.
//   cargo run --example xor
use dense_mlp::{crossover_mutate, train_network, ActivationRange, Network, Sgd};
use rand::rngs::StdRng;
use rand::SeedableRng;

const POPULATION: usize = 6;
const WARMUP_PASSES: usize = 500;
const FINAL_PASSES: usize = 8000;

fn main() -> dense_mlp::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let range = ActivationRange::new(-1.0, 1.0)?;

    let inputs = vec![
        vec![-1.0, -1.0],
        vec![-1.0, 1.0],
        vec![1.0, -1.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![-0.8], vec![0.8], vec![0.8], vec![-0.8]];
    let optimizer = Sgd::new(0.2);

    let mut scored = Vec::with_capacity(POPULATION);
    for _ in 0..POPULATION {
        let mut network = Network::with_range(2, &[4, 1], range, &mut rng)?;
        let mut loss = 0.0;
        for _ in 0..WARMUP_PASSES {
            loss = train_network(&mut network, &inputs, &targets, &optimizer)?;
        }
        scored.push((loss, network));
    }
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (rank, (loss, _)) in scored.iter().enumerate() {
        println!("member {rank}: loss after warmup = {loss:.6}");
    }

    let parents: Vec<Network> = scored.into_iter().take(2).map(|(_, net)| net).collect();
    let mut child = crossover_mutate(&parents, 0.05, &mut rng)?;

    for pass in 0..FINAL_PASSES {
        let loss = train_network(&mut child, &inputs, &targets, &optimizer)?;
        if pass % 1000 == 0 {
            println!("child pass {pass}: loss = {loss:.6}");
        }
    }

    for (input, target) in inputs.iter().zip(&targets) {
        let output = child.feed(input)?[0];
        println!("{input:?} -> {output:+.4} (target {:+.1})", target[0]);
    }

    Ok(())
}
