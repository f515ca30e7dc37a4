use env_logger::{Builder, Env, Target};

use subsum_core::can_form_sum;

const EXAMPLE_ELEMENTS: [u64; 6] = [3, 34, 4, 12, 5, 2];
const EXAMPLE_TARGET: u64 = 30;

/// Runs the built-in example with the recursive decider.
fn run_example() -> bool {
    let found = can_form_sum(&EXAMPLE_ELEMENTS, EXAMPLE_TARGET);
    log::info!(
        "elements={:?} target={} found={}",
        EXAMPLE_ELEMENTS,
        EXAMPLE_TARGET,
        found
    );
    found
}

fn main() {
    // stdout には結果だけを出す。ログは stderr（RUST_LOG で調整）
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();

    println!("{}", run_example());
}
