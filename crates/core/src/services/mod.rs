pub mod booking_service;
pub mod checkout_service;
pub mod webhook_service;
