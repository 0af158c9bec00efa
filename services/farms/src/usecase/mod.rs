pub mod activity;
pub mod animal;
pub mod farm;
pub mod farm_context;
pub mod member;
pub mod notification;
