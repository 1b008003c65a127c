mod accounting;
mod common;
mod validation;
