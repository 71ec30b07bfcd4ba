mod progress_simulator;

pub use progress_simulator::{Dice, ProgressSimulator, RandomDice};
