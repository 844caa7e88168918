pub mod detect;
pub mod recommend;
pub mod score;
