pub mod appearance;
pub mod bus;
pub mod comment_view;
pub mod document;
pub mod error;
pub mod event;
pub mod field;
pub mod formats;
pub mod highlight;
pub mod model;
pub mod panel;
pub mod search;
pub mod text_view;
