// One module per provider resource. Every function takes the shared client by
// reference and issues exactly one provider call.

pub mod auth;
pub mod card;
pub mod deck;
pub mod folder;
pub mod profile;
