//! Routing facades: extract input, run one service operation in a session,
//! shape the response.

pub mod health;
pub mod todo_items;
pub mod todo_lists;
pub mod users;
