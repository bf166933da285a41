pub mod contact;
pub mod countdown;
pub mod feed;
pub mod reveal;
