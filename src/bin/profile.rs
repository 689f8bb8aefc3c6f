use std::time::Instant;

use mazetrace::{
    animator::{AnimationSummary, Animator, Callbacks, Speed},
    generators::{MAX_DIMENSION, generate_seeded},
    maze::Grid,
    solvers::{Algorithm, solve},
};

/// Generate, solve and play back the largest maze repeatedly, without rendering.
fn main() {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);

    let started = Instant::now();
    let mut frames = 0usize;
    for i in 0..num_iters {
        let grid = generate_seeded(MAX_DIMENSION, MAX_DIMENSION, Some(i as u64));
        for algorithm in Algorithm::ALL {
            let result = match solve(&grid, algorithm) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("{}", e);
                    return;
                }
            };
            let mut animator = Animator::new(
                grid.clone(),
                Callbacks {
                    on_mutation: |_: &Grid| {},
                    on_complete: |_: AnimationSummary| {},
                },
            );
            animator.start(&result, Speed::Fast);
            while let Some(deadline) = animator.next_deadline() {
                frames += animator.advance_to(deadline);
            }
        }
    }
    println!(
        "{} iterations, {} frames in {:?}",
        num_iters,
        frames,
        started.elapsed()
    );
}
