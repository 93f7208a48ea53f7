pub mod indoor;
pub mod not_found;
