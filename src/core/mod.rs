/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod cardinality;
pub mod errors;
pub mod notation;
pub mod patterns;
pub mod rules;
pub mod schedule;
pub mod targets;
pub mod utils;
