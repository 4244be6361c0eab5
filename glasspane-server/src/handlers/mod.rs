pub mod appearance;
pub mod dashboard;
pub mod highlight;
pub mod search;
