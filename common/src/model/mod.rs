pub mod affected_rows;
pub mod analysis;
pub mod history;
pub mod issue;
pub mod user;

mod lenient;
