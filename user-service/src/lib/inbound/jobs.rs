pub mod user_counter;

pub use user_counter::UserCounter;
