pub mod dense_key;
pub mod link_word;
