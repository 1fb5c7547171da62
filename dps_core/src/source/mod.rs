//! Gear sources that feed a comparison

mod gear;

pub use gear::Item;
