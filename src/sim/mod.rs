mod input;

pub use input::{InputCmd, Keys, MOVE_STEP, SPRINT_FACTOR, TURN_RATE, player_input};
