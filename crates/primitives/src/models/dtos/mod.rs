pub mod checkout_dto;
pub mod health_dto;
pub mod notification_dto;
pub mod providers;
pub mod webhook_dto;

pub use checkout_dto::*;
pub use health_dto::*;
pub use notification_dto::*;
pub use webhook_dto::*;
