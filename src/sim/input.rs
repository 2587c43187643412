use bitflags::bitflags;

use crate::world::Camera;

pub const TURN_RATE: f64 = 0.025; // rad / frame
pub const MOVE_STEP: f64 = 0.2; // map-units / frame
pub const SPRINT_FACTOR: f64 = 2.0;

bitflags! {
    /// Keys held down during this frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u8 {
        const UP     = 0x01;
        const DOWN   = 0x02;
        const LEFT   = 0x04;
        const RIGHT  = 0x08;
        const SPRINT = 0x10;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f64, // –1, 0, +1
    pub turn: f64,    // –1, 0, +1  (left / right)
    pub run: bool,    // Shift
}

impl InputCmd {
    /// Collapse held keys into one command.  Opposite keys do not cancel:
    /// RIGHT wins over LEFT and UP wins over DOWN.
    pub fn from_keys(keys: Keys) -> Self {
        let turn = if keys.contains(Keys::RIGHT) {
            1.0
        } else if keys.contains(Keys::LEFT) {
            -1.0
        } else {
            0.0
        };
        let forward = if keys.contains(Keys::UP) {
            1.0
        } else if keys.contains(Keys::DOWN) {
            -1.0
        } else {
            0.0
        };
        Self {
            forward,
            turn,
            run: keys.contains(Keys::SPRINT),
        }
    }
}

/// Advance the player pose by one frame of input: turn first, then move.
pub fn player_input(camera: &mut Camera, cmd: InputCmd) {
    camera.turn(cmd.turn * TURN_RATE);

    let step = if cmd.run {
        MOVE_STEP * SPRINT_FACTOR
    } else {
        MOVE_STEP
    };
    if cmd.forward != 0.0 {
        camera.step(cmd.forward * step);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
