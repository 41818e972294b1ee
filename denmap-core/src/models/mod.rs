pub mod range;
pub mod range_collection;

// re-export for cleaner imports
pub use self::range::SeqRange;
pub use self::range_collection::RangeCollection;
