pub mod before_after;
pub mod delimited;
pub mod left_right_mid;

pub use before_after::{TextAfterFn, TextBeforeFn};
pub use left_right_mid::{LeftFn, MidFn, RightFn};

pub fn register_builtins() {
    left_right_mid::register_builtins();
    before_after::register_builtins();
}
