pub mod normalize;
pub mod status;
pub mod ticket;
