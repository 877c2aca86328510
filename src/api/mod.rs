pub mod dira;

pub use dira::{DiraClient, LotterySource};
