pub const DEFAULT_DIE_SIDES: u32 = 6;

/// Maps one draw from a `[0, 1)` source onto a die face. Sources that misbehave
/// (values outside `[0, 1)`) are clamped into the valid face range rather than
/// panicking, since a bad source is a programming error and not a game state.
pub fn roll_die(rng: &mut dyn FnMut() -> f64, sides: u32) -> u32 {
    let sides = sides.max(1);
    let face = (rng() * sides as f64).floor() as i64 + 1;
    face.clamp(1, sides as i64) as u32
}

/// Clamps an externally supplied roll (e.g. a UI dice reveal) into range.
pub fn clamp_roll(roll: u32, sides: u32) -> u32 {
    roll.clamp(1, sides.max(1))
}
