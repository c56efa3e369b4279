//! Initiative rolls
//!
//! Turn order is fixed once at encounter start from each participant's
//! rolled initiative; the encounter itself never rolls. Drivers can use
//! this helper or supply their own values.

use rand::Rng;

/// Roll initiative: d20 plus the participant's modifier
pub fn roll_initiative(rng: &mut impl Rng, modifier: i32) -> i32 {
    rng.gen_range(1..=20) + modifier
}
