mod address;
mod common;
mod form;
mod price;
