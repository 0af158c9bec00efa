//! sea-orm entities for the farms service database.

pub mod activities;
pub mod animals;
pub mod farm_members;
pub mod farms;
pub mod users;
