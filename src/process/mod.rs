pub mod normalize;
pub mod reconcile;
pub mod table;
