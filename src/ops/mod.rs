pub mod date_rules;
pub mod id_tag;
pub mod reconcile;
pub mod session;
pub mod slice;
