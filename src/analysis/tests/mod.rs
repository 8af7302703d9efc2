mod common;
mod gateway;
mod rules;
