pub mod errors;
pub mod db;
pub mod slug;
pub mod category;
pub mod workshop_instructor;
pub mod workshop;
pub mod workshop_benefit;
pub mod booking_transaction;
pub mod workshop_participant;

#[cfg(test)]
mod tests;
